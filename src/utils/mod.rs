pub mod cursor;

pub use cursor::{Boundary, Cursor};
