use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Source schema
// ---------------------------------------------------------------------------

/// Source column headers, in display/export order.
pub const COLUMNS: &[&str] = &[
    "ORIGEN",
    "NP",
    "NP_ACEPTADA",
    "DESCRIPCION",
    "MOD",
    "STATUS",
    "CLIENTE",
    "SOLICITADO",
    "REFERENCIA",
    "ESTADO",
    "ETD",
    "SHIP_DATE",
    "FECHA_INGRESO",
    "FECHA_SOLICITADO",
];

/// Raw tokens that all mean "no value" in the source export.
/// Replaced with the missing marker before any typing or comparison.
pub const MISSING_TOKENS: &[&str] = &["", "nan", "NaN", "None", "N/A", "n/a", "(en blanco)"];

/// `FECHA_INGRESO` carries a sentinel convention: a raw value of exactly
/// `1900-01-01` means "not yet entered" and collapses to missing, the same
/// as an empty or unparsable cell. The source never distinguishes the two.
pub fn entry_date_sentinel() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()
}

/// Normalize one raw text cell: trim surrounding whitespace and map every
/// recognized missing token to `None`.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if MISSING_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the tracking table
// ---------------------------------------------------------------------------

/// A single normalized tracking record (one row of the source CSV).
/// `None` is the canonical missing marker for every field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub origin: Option<String>,
    pub part_number: Option<String>,
    pub accepted_part_number: Option<String>,
    pub description: Option<String>,
    pub model: Option<String>,
    pub status: Option<String>,
    pub client: Option<String>,
    pub requested_by: Option<String>,
    pub reference: Option<String>,
    pub state: Option<String>,
    pub etd: Option<NaiveDate>,
    pub ship_date: Option<NaiveDate>,
    /// `None` covers both "never entered" and the `1900-01-01` sentinel.
    pub entry_date: Option<NaiveDate>,
    pub requested_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// TrackingTable – the immutable loaded snapshot
// ---------------------------------------------------------------------------

/// The full normalized snapshot. Never mutated after loading; a refresh
/// replaces the whole table.
#[derive(Debug, Clone, Default)]
pub struct TrackingTable {
    pub records: Vec<Record>,
}

impl TrackingTable {
    pub fn from_records(records: Vec<Record>) -> Self {
        TrackingTable { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of distinct non-missing values of one field (sidebar summary).
    pub fn unique_count<'a>(&'a self, field: impl Fn(&'a Record) -> Option<&'a str>) -> usize {
        self.records
            .iter()
            .filter_map(&field)
            .collect::<BTreeSet<&str>>()
            .len()
    }

    /// ESTADO value counts, most frequent first, capped at `top`.
    pub fn state_distribution(&self, top: usize) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for rec in &self.records {
            if let Some(state) = rec.state.as_deref() {
                *counts.entry(state).or_default() += 1;
            }
        }
        let mut entries: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(state, n)| (state.to_string(), n))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(top);
        entries
    }
}
