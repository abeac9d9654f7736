use thiserror::Error;

#[derive(Error, Debug)]
pub enum GleanerError {
    #[error("Navigation failed for {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Scrolling stopped moving at step {step} (offset {offset})")]
    StalledScroll { step: usize, offset: i64 },

    #[error("No document snapshot captured yet")]
    NoSnapshot,

    #[error("Required element not found: {0}")]
    LocatorNotFound(String),

    #[error("Browser session unavailable: {0}")]
    SessionUnavailable(String),

    #[error("Unsupported locale {0:?}, expected 'en' or 'cs'")]
    InvalidLocale(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Rating label has no number: {0:?}")]
    MalformedRating(String),

    #[error("Column lengths differ: {reviews} reviews, {ratings} ratings, {supports} supports")]
    ColumnMismatch {
        reviews: usize,
        ratings: usize,
        supports: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker failed: {0}")]
    Worker(String),
}

/// Coarse classification of a [`GleanerError`], cheap to copy into state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Navigation,
    StalledScroll,
    NoSnapshot,
    LocatorNotFound,
    SessionUnavailable,
    Configuration,
    Extraction,
    Io,
    Worker,
}

impl GleanerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Navigation { .. } => ErrorKind::Navigation,
            Self::StalledScroll { .. } => ErrorKind::StalledScroll,
            Self::NoSnapshot => ErrorKind::NoSnapshot,
            Self::LocatorNotFound(_) => ErrorKind::LocatorNotFound,
            Self::SessionUnavailable(_) => ErrorKind::SessionUnavailable,
            Self::InvalidLocale(_) | Self::InvalidUrl(_) | Self::Config(_) => {
                ErrorKind::Configuration
            }
            Self::MalformedRating(_) | Self::ColumnMismatch { .. } => ErrorKind::Extraction,
            Self::Io(_) => ErrorKind::Io,
            Self::Worker(_) => ErrorKind::Worker,
        }
    }
}

pub type Result<T> = std::result::Result<T, GleanerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_configuration_errors() {
        assert_eq!(
            GleanerError::InvalidLocale("de".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            GleanerError::Config("bad selector".into()).kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_stalled_scroll_message() {
        let err = GleanerError::StalledScroll {
            step: 5,
            offset: 100,
        };
        assert_eq!(err.kind(), ErrorKind::StalledScroll);
        assert!(err.to_string().contains("step 5"));
    }
}
