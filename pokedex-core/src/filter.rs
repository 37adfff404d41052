//! Text filtering over the full record set

use crate::catalog::Record;

/// Records whose name contains `query`, ignoring case.
///
/// Matching is unanchored. A blank or whitespace-only query returns every
/// record. Relative order is preserved either way.
pub fn filter_by_text(full: &[Record], query: &str) -> Vec<Record> {
    if query.trim().is_empty() {
        return full.to_vec();
    }

    let query_lower = query.to_lowercase();

    full.iter()
        .filter(|record| record.name.to_lowercase().contains(&query_lower))
        .cloned()
        .collect()
}
