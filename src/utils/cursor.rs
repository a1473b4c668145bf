// ============================================================================
// Cursor - position over an index-addressed list
// ============================================================================
//
// Browsing steps the position first and then fetches. When the fetch
// reports an out-of-range index the cursor snaps back to the nearest end
// (0 or len - 1) and the caller gets a `Boundary` to show the user.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Boundary {
    #[error("This is the first {noun} in the list.")]
    First { noun: &'static str },

    #[error("This is the last {noun} in the list.")]
    Last { noun: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    noun: &'static str,
}

impl Cursor {
    pub fn new(noun: &'static str) -> Self {
        Self { position: 0, noun }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn next<T, E>(
        &mut self,
        len: usize,
        fetch: impl FnOnce(usize) -> Result<T, E>,
    ) -> Result<T, Boundary> {
        self.position = self.position.saturating_add(1);
        fetch(self.position).map_err(|_| {
            self.position = len.saturating_sub(1);
            Boundary::Last { noun: self.noun }
        })
    }

    pub fn prev<T, E>(
        &mut self,
        fetch: impl FnOnce(usize) -> Result<T, E>,
    ) -> Result<T, Boundary> {
        match self.position.checked_sub(1) {
            Some(position) => {
                self.position = position;
                fetch(position).map_err(|_| {
                    self.position = 0;
                    Boundary::First { noun: self.noun }
                })
            }
            None => Err(Boundary::First { noun: self.noun }),
        }
    }

    /// Re-fetch at the current position, snapping to the last element if
    /// the list shrank underneath the cursor.
    pub fn current<T, E>(
        &mut self,
        len: usize,
        fetch: impl FnOnce(usize) -> Result<T, E>,
    ) -> Result<T, Boundary> {
        fetch(self.position).map_err(|_| {
            self.position = len.saturating_sub(1);
            Boundary::Last { noun: self.noun }
        })
    }
}
