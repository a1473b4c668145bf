use std::env;
use std::path::PathBuf;

// ============================================================================
// Application Configuration
// ============================================================================

pub const DATA_FILE_VAR: &str = "RESTAURANT_DATA_FILE";
pub const BILL_DIR_VAR: &str = "RESTAURANT_BILL_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Where the restaurant is loaded from at start and saved to on exit.
    pub data_file: PathBuf,
    /// Directory that receives `bill<id>.txt` files.
    pub bill_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("restaurant.json"),
            bill_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by `RESTAURANT_DATA_FILE` / `RESTAURANT_BILL_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            data_file: lookup(DATA_FILE_VAR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            bill_dir: lookup(BILL_DIR_VAR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.bill_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_file, PathBuf::from("restaurant.json"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (DATA_FILE_VAR, "/var/lib/restaurant/state.json"),
            (BILL_DIR_VAR, "/var/lib/restaurant/bills"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_file, PathBuf::from("/var/lib/restaurant/state.json"));
        assert_eq!(config.bill_dir, PathBuf::from("/var/lib/restaurant/bills"));
    }

    #[test]
    fn test_empty_value_keeps_default() {
        let config = AppConfig::from_lookup(|key| {
            (key == BILL_DIR_VAR).then(String::new)
        });
        assert_eq!(config.bill_dir, PathBuf::from("."));
    }
}
