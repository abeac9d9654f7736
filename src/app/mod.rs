pub mod error;

pub use error::{ErrorKind, GleanerError, Result};
