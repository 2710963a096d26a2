use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use super::format::DisplayTable;

// ---------------------------------------------------------------------------
// Export policy
// ---------------------------------------------------------------------------

/// Downloading the complete unfiltered dataset is forbidden. The gate
/// compares result-set size against source size; the UI hiding its buttons
/// is not the enforcement.
pub fn export_allowed(n_filtered: usize, n_total: usize) -> bool {
    n_filtered > 0 && n_filtered < n_total
}

/// Default download name, e.g. `resultados_20260323_141503.csv`.
pub fn default_filename(extension: &str) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("resultados_{stamp}.{extension}")
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Excel on Windows mis-detects plain UTF-8; the BOM keeps accents intact.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Serialize a display table as CSV: UTF-8 with BOM, comma-delimited,
/// header row, no index column. Cells are the displayed strings.
pub fn to_csv(display: &DisplayTable) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.extend_from_slice(UTF8_BOM);

    let mut writer = csv::Writer::from_writer(buf);
    writer
        .write_record(DisplayTable::headers())
        .context("writing CSV header")?;
    for row in &display.rows {
        writer.write_record(row).context("writing CSV row")?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV export: {e}"))
}

// ---------------------------------------------------------------------------
// XLSX
// ---------------------------------------------------------------------------

pub const XLSX_SHEET_NAME: &str = "Resultados";

/// Serialize a display table as a single-sheet XLSX workbook. Date cells
/// are written as their displayed strings, not as Excel date serials.
pub fn to_xlsx(display: &DisplayTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(XLSX_SHEET_NAME)
        .context("naming results sheet")?;

    for (col, header) in DisplayTable::headers().iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .context("writing XLSX header")?;
    }
    for (row_no, row) in display.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            sheet
                .write_string(row_no as u32 + 1, col as u16, cell)
                .context("writing XLSX row")?;
        }
    }

    workbook
        .save_to_buffer()
        .context("serializing XLSX export")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::format::format_rows;
    use crate::data::loader::load_reader;

    const SAMPLE: &str = "\
ORIGEN,NP,NP_ACEPTADA,DESCRIPCION,MOD,STATUS,CLIENTE,SOLICITADO,REFERENCIA,ESTADO,ETD,SHIP_DATE,FECHA_INGRESO,FECHA_SOLICITADO
JAPON,110445RB0A,110445RB0A,EMPAQUE,X-TRAIL,OK,ACME,jperez,NI1025M,EN TRANSITO,05/03/2026,10/03/2026,01/01/1900,01/03/2026
USA,558900XX1C,,VALVULA,SENTRA,OK,GLOBEX,mlopez,NI1026M,ENTREGADO,,,15/02/2026,
";

    #[test]
    fn export_policy_forbids_full_and_empty_sets() {
        assert!(export_allowed(3, 100));
        assert!(export_allowed(99, 100));
        assert!(!export_allowed(0, 100), "nothing to export");
        assert!(!export_allowed(100, 100), "full dataset is forbidden");
        assert!(!export_allowed(0, 0));
    }

    #[test]
    fn csv_export_starts_with_bom() {
        let table = load_reader(SAMPLE.as_bytes()).unwrap();
        let display = format_rows(&table, &[0]);
        let bytes = to_csv(&display).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn csv_export_round_trips_visible_strings() {
        let table = load_reader(SAMPLE.as_bytes()).unwrap();
        let display = format_rows(&table, &[0, 1]);
        let bytes = to_csv(&display).unwrap();

        let mut reader = csv::Reader::from_reader(&bytes[3..]);
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, DisplayTable::headers());

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        assert_eq!(rows, display.rows);
        // Spot-check the formatted values survived as-is.
        assert!(rows[0].contains(&"Pendiente".to_string()));
        assert!(rows[1].contains(&"15/02/2026".to_string()));
    }

    #[test]
    fn xlsx_export_produces_a_workbook() {
        let table = load_reader(SAMPLE.as_bytes()).unwrap();
        let display = format_rows(&table, &[0]);
        let bytes = to_xlsx(&display).unwrap();
        // XLSX is a zip container.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn default_filename_carries_extension() {
        let name = default_filename("xlsx");
        assert!(name.starts_with("resultados_"));
        assert!(name.ends_with(".xlsx"));
    }
}
