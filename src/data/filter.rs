use thiserror::Error;

use super::model::{Record, TrackingTable};

// ---------------------------------------------------------------------------
// Search query
// ---------------------------------------------------------------------------

/// The three user-supplied search fields, as typed (untrimmed).
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub reference: String,
    pub part_number: String,
    pub client: String,
}

impl SearchQuery {
    /// Non-empty terms after trimming, paired with their field accessor.
    fn active_terms(&self) -> Vec<(&str, fn(&Record) -> Option<&str>)> {
        let mut terms: Vec<(&str, fn(&Record) -> Option<&str>)> = Vec::new();
        if !self.reference.trim().is_empty() {
            terms.push((self.reference.trim(), |r| r.reference.as_deref()));
        }
        if !self.part_number.trim().is_empty() {
            terms.push((self.part_number.trim(), |r| r.part_number.as_deref()));
        }
        if !self.client.trim().is_empty() {
            terms.push((self.client.trim(), |r| r.client.as_deref()));
        }
        terms
    }
}

/// Running a search with no criteria is a caller error: it would expose the
/// full table, which the export policy forbids.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Debes ingresar al menos un criterio de búsqueda")]
    EmptyQuery,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of records matching every supplied term, in source order.
///
/// Each supplied term must appear as a case-insensitive substring of its
/// field (logical AND across fields); fields without a term are
/// unconstrained. A missing field value compares as the empty string, so it
/// never matches a non-empty term.
pub fn filter_indices(
    table: &TrackingTable,
    query: &SearchQuery,
) -> Result<Vec<usize>, QueryError> {
    let terms = query.active_terms();
    if terms.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    let needles: Vec<(String, fn(&Record) -> Option<&str>)> = terms
        .into_iter()
        .map(|(term, field)| (term.to_lowercase(), field))
        .collect();

    Ok(table
        .records
        .iter()
        .enumerate()
        .filter(|&(_, rec)| {
            needles.iter().all(|(needle, field)| {
                field(rec)
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(needle.as_str())
            })
        })
        .map(|(i, _)| i)
        .collect())
}
