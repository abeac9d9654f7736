pub mod locale;
pub mod review;
pub mod target;

pub use locale::Locale;
pub use review::{ReviewRecord, ReviewTable, UnreconciledColumns};
pub use target::Target;
