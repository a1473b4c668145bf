use std::fs;
use std::path::{Path, PathBuf};

use super::BillError;

/// Destination for rendered bills, addressed by an integer id.
pub trait BillSink {
    fn write_bill(&self, id: i32, bill: &str) -> Result<(), BillError>;
}

/// Writes each bill to `bill<id>.txt` under a directory.
#[derive(Debug, Clone)]
pub struct FileBillSink {
    dir: PathBuf,
}

impl FileBillSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: i32) -> PathBuf {
        self.dir.join(format!("bill{id}.txt"))
    }
}

impl BillSink for FileBillSink {
    fn write_bill(&self, id: i32, bill: &str) -> Result<(), BillError> {
        let path = self.path_for(id);

        fs::write(&path, bill.as_bytes()).map_err(|source| BillError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(bill_id = id, path = %path.display(), "Bill written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileBillSink::new(dir.path());

        sink.write_bill(42, "BILL\nTotal cost: 0").unwrap();

        let written = fs::read_to_string(dir.path().join("bill42.txt")).unwrap();
        assert_eq!(written, "BILL\nTotal cost: 0");
    }

    #[test]
    fn test_rewrite_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileBillSink::new(dir.path());

        sink.write_bill(1, "first bill that is longer").unwrap();
        sink.write_bill(1, "second").unwrap();

        assert_eq!(fs::read_to_string(sink.path_for(1)).unwrap(), "second");
    }

    #[test]
    fn test_missing_directory_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileBillSink::new(dir.path().join("no").join("such").join("dir"));

        let err = sink.write_bill(3, "BILL").unwrap_err();

        assert!(matches!(err, BillError::Io { .. }));
        assert!(err.to_string().contains("bill3.txt"));
    }
}
