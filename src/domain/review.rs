use serde::{Deserialize, Serialize};

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub review: String,
    pub rating: u32,
    /// Helpfulness count as rendered on the page, left unparsed
    pub support: String,
}

/// Columns returned when short and long review texts could not be merged.
///
/// The two text sequences are kept apart because their empty positions
/// coincide, so there is no way to tell which one carries each review.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnreconciledColumns {
    pub short: Vec<String>,
    pub long: Vec<String>,
    pub rating: Vec<u32>,
    pub support: Vec<String>,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum ReviewTable {
    Records(Vec<ReviewRecord>),
    Unreconciled(UnreconciledColumns),
}

impl ReviewTable {
    /// Number of logical rows; for unreconciled output this is the rating count.
    pub fn len(&self) -> usize {
        match self {
            ReviewTable::Records(rows) => rows.len(),
            ReviewTable::Unreconciled(cols) => cols.rating.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> Option<&[ReviewRecord]> {
        match self {
            ReviewTable::Records(rows) => Some(rows),
            ReviewTable::Unreconciled(_) => None,
        }
    }
}
