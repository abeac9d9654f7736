use tracing::warn;

/// Short and long review texts after reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// One review per position
    Merged(Vec<String>),
    /// The sequences could not be paired and are handed back untouched
    Unreconciled { short: Vec<String>, long: Vec<String> },
}

/// Merge parallel short/long review sequences.
///
/// The listing renders each review either truncated or expanded, so the
/// non-empty positions of the two sequences are complementary. When their
/// emptiness masks differ the pairs are concatenated; identical masks (or
/// sequences of different length) give no way to pair them.
pub fn reconcile(short: Vec<String>, long: Vec<String>) -> Reconciled {
    if short.len() != long.len() {
        warn!(
            "Cannot pair {} short with {} long reviews",
            short.len(),
            long.len()
        );
        return Reconciled::Unreconciled { short, long };
    }

    let masks_differ = short
        .iter()
        .zip(&long)
        .any(|(s, l)| s.is_empty() != l.is_empty());

    if !masks_differ {
        warn!("Short and long reviews share empty positions, leaving them unmerged");
        return Reconciled::Unreconciled { short, long };
    }

    Reconciled::Merged(
        short
            .into_iter()
            .zip(long)
            .map(|(mut s, l)| {
                s.push_str(&l);
                s
            })
            .collect(),
    )
}
