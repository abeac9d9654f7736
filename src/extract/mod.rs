//! Review extraction from captured page snapshots.
//!
//! # Architecture
//!
//! ```text
//! DocumentSnapshot → DocumentParser → (short, long, rating, support)
//!                                   → build_table → reconcile → ReviewTable
//! ```

mod config;
mod parser;
mod reconcile;
mod snapshot;

pub use config::{ExtractConfig, RatingLocators};
pub use parser::{parse_rating, DocumentParser};
pub use reconcile::{reconcile, Reconciled};
pub use snapshot::DocumentSnapshot;

use tracing::info;

use crate::app::{GleanerError, Result};
use crate::domain::{Locale, ReviewRecord, ReviewTable, UnreconciledColumns};

/// Assemble the table from the four extracted columns.
///
/// An empty review, rating or support column is treated as a changed page
/// structure rather than an empty listing.
pub fn build_table(
    short: Vec<String>,
    long: Vec<String>,
    ratings: Vec<u32>,
    supports: Vec<String>,
    locale: Locale,
) -> Result<ReviewTable> {
    if short.is_empty() && long.is_empty() {
        return Err(GleanerError::LocatorNotFound("review text".to_string()));
    }
    if ratings.is_empty() {
        return Err(GleanerError::LocatorNotFound(format!(
            "rating ({} label)",
            locale
        )));
    }
    if supports.is_empty() {
        return Err(GleanerError::LocatorNotFound("support count".to_string()));
    }

    let table = assemble_table(reconcile(short, long), ratings, supports)?;
    info!("Extracted {} reviews", table.len());
    Ok(table)
}

/// Zip reconciled reviews with ratings and support counts by position.
pub fn assemble_table(
    reviews: Reconciled,
    ratings: Vec<u32>,
    supports: Vec<String>,
) -> Result<ReviewTable> {
    match reviews {
        Reconciled::Merged(reviews) => {
            if reviews.len() != ratings.len() || reviews.len() != supports.len() {
                return Err(GleanerError::ColumnMismatch {
                    reviews: reviews.len(),
                    ratings: ratings.len(),
                    supports: supports.len(),
                });
            }

            let records = reviews
                .into_iter()
                .zip(ratings)
                .zip(supports)
                .map(|((review, rating), support)| ReviewRecord {
                    review,
                    rating,
                    support,
                })
                .collect();
            Ok(ReviewTable::Records(records))
        }
        Reconciled::Unreconciled { short, long } => {
            if ratings.len() != supports.len() {
                return Err(GleanerError::ColumnMismatch {
                    reviews: short.len(),
                    ratings: ratings.len(),
                    supports: supports.len(),
                });
            }

            Ok(ReviewTable::Unreconciled(UnreconciledColumns {
                short,
                long,
                rating: ratings,
                support: supports,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_build_merged_table() {
        let table = build_table(
            strings(&["Great", ""]),
            strings(&["", "Crashes every time I open the camera"]),
            vec![5, 2],
            strings(&["3", "41"]),
            Locale::En,
        )
        .unwrap();

        assert_eq!(
            table,
            ReviewTable::Records(vec![
                ReviewRecord {
                    review: "Great".into(),
                    rating: 5,
                    support: "3".into(),
                },
                ReviewRecord {
                    review: "Crashes every time I open the camera".into(),
                    rating: 2,
                    support: "41".into(),
                },
            ])
        );
    }

    #[test]
    fn test_build_unreconciled_table() {
        let table = build_table(
            strings(&["one", "two"]),
            strings(&["uno", "dos"]),
            vec![4, 3],
            strings(&["0", "1"]),
            Locale::En,
        )
        .unwrap();

        match table {
            ReviewTable::Unreconciled(cols) => {
                assert_eq!(cols.short, vec!["one", "two"]);
                assert_eq!(cols.long, vec!["uno", "dos"]);
                assert_eq!(cols.rating, vec![4, 3]);
            }
            other => panic!("expected unreconciled columns, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_reviews_is_locator_error() {
        let err = build_table(vec![], vec![], vec![1], strings(&["0"]), Locale::En).unwrap_err();
        assert!(matches!(err, GleanerError::LocatorNotFound(what) if what == "review text"));
    }

    #[test]
    fn test_missing_ratings_names_locale() {
        let err = build_table(strings(&["Great"]), strings(&[""]), vec![], strings(&["3"]), Locale::Cs)
            .unwrap_err();
        assert!(matches!(err, GleanerError::LocatorNotFound(what) if what.contains("cs")));
    }

    #[test]
    fn test_missing_supports_is_locator_error() {
        let err = build_table(strings(&["Great"]), strings(&[""]), vec![5], vec![], Locale::En)
            .unwrap_err();
        assert!(matches!(err, GleanerError::LocatorNotFound(what) if what == "support count"));
    }

    #[test]
    fn test_column_length_mismatch() {
        let err = assemble_table(
            Reconciled::Merged(vec!["a".into(), "b".into()]),
            vec![1],
            vec!["0".into(), "0".into()],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            GleanerError::ColumnMismatch {
                reviews: 2,
                ratings: 1,
                supports: 2
            }
        ));
    }

    #[test]
    fn test_unreconciled_rating_support_mismatch() {
        let err = assemble_table(
            Reconciled::Unreconciled {
                short: vec!["a".into(), "b".into()],
                long: vec!["c".into(), "d".into()],
            },
            vec![4, 5],
            vec!["0".into()],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            GleanerError::ColumnMismatch {
                reviews: 2,
                ratings: 2,
                supports: 1
            }
        ));
    }
}
