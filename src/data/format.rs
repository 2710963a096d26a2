use chrono::NaiveDate;

use super::model::{Record, TrackingTable, COLUMNS};

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

/// Dates render day-first, matching the source convention.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Shown for a missing `FECHA_INGRESO` (never entered, or the collapsed
/// `1900-01-01` sentinel).
pub const PENDING_MARKER: &str = "Pendiente";

/// A render-ready copy of some subset of the table: all cells are strings,
/// columns in [`COLUMNS`] order. Built fresh per render and per export;
/// display strings are terminal and never parsed back into dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTable {
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    pub fn headers() -> &'static [&'static str] {
        COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format the records at `indices` for display, preserving the given
/// order. The source table is not touched.
pub fn format_rows(table: &TrackingTable, indices: &[usize]) -> DisplayTable {
    DisplayTable {
        rows: indices
            .iter()
            .map(|&i| format_record(&table.records[i]))
            .collect(),
    }
}

fn format_record(rec: &Record) -> Vec<String> {
    vec![
        text_cell(&rec.origin),
        text_cell(&rec.part_number),
        text_cell(&rec.accepted_part_number),
        text_cell(&rec.description),
        text_cell(&rec.model),
        text_cell(&rec.status),
        text_cell(&rec.client),
        text_cell(&rec.requested_by),
        text_cell(&rec.reference),
        text_cell(&rec.state),
        date_cell(rec.etd),
        date_cell(rec.ship_date),
        entry_date_cell(rec.entry_date),
        date_cell(rec.requested_date),
    ]
}

fn text_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// `ETD`, `SHIP_DATE`, `FECHA_SOLICITADO`: missing renders empty.
fn date_cell(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// `FECHA_INGRESO`: missing renders as the pending marker instead.
fn entry_date_cell(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| PENDING_MARKER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn column(name: &str) -> usize {
        COLUMNS.iter().position(|c| *c == name).unwrap()
    }

    #[test]
    fn dates_render_day_first() {
        let table = TrackingTable::from_records(vec![Record {
            etd: Some(date(2026, 3, 5)),
            ship_date: Some(date(2026, 12, 31)),
            requested_date: None,
            ..Record::default()
        }]);
        let display = format_rows(&table, &[0]);
        let row = &display.rows[0];
        assert_eq!(row[column("ETD")], "05/03/2026");
        assert_eq!(row[column("SHIP_DATE")], "31/12/2026");
        assert_eq!(row[column("FECHA_SOLICITADO")], "");
    }

    #[test]
    fn missing_entry_date_renders_pendiente() {
        // Covers both "never entered" and the 1900-01-01 sentinel: by the
        // time a record exists the two are already conflated, as documented.
        let table = TrackingTable::from_records(vec![
            Record {
                entry_date: None,
                ..Record::default()
            },
            Record {
                entry_date: Some(date(2026, 1, 15)),
                ..Record::default()
            },
        ]);
        let display = format_rows(&table, &[0, 1]);
        assert_eq!(display.rows[0][column("FECHA_INGRESO")], "Pendiente");
        assert_eq!(display.rows[1][column("FECHA_INGRESO")], "15/01/2026");
    }

    #[test]
    fn text_columns_pass_through() {
        let table = TrackingTable::from_records(vec![Record {
            reference: Some("NI1025M".to_string()),
            client: None,
            ..Record::default()
        }]);
        let display = format_rows(&table, &[0]);
        assert_eq!(display.rows[0][column("REFERENCIA")], "NI1025M");
        assert_eq!(display.rows[0][column("CLIENTE")], "");
    }

    #[test]
    fn formatting_preserves_index_order_and_input() {
        let table = TrackingTable::from_records(vec![
            Record {
                reference: Some("A".to_string()),
                ..Record::default()
            },
            Record {
                reference: Some("B".to_string()),
                ..Record::default()
            },
        ]);
        let display = format_rows(&table, &[1, 0]);
        assert_eq!(display.rows[0][column("REFERENCIA")], "B");
        assert_eq!(display.rows[1][column("REFERENCIA")], "A");
        // Pure function: same input, same output.
        assert_eq!(display, format_rows(&table, &[1, 0]));
    }

    #[test]
    fn row_width_matches_headers() {
        let table = TrackingTable::from_records(vec![Record::default()]);
        let display = format_rows(&table, &[0]);
        assert_eq!(display.rows[0].len(), DisplayTable::headers().len());
    }
}
