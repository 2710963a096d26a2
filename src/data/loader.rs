use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::model::{entry_date_sentinel, normalize_text, Record, TrackingTable};
use crate::config::DataSource;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch the tracking CSV from its configured URL and normalize it.
///
/// Any failure (unreachable host, non-2xx status, malformed CSV) is an
/// error the caller surfaces as "data unavailable"; no partial table is
/// ever produced.
pub fn load_url(url: &str) -> Result<TrackingTable> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("building HTTP client")?;
    let response = client
        .get(url)
        .send()
        .context("requesting tracking CSV")?
        .error_for_status()
        .context("tracking CSV request rejected")?;
    let body = response.text().context("reading tracking CSV body")?;
    load_reader(body.as_bytes())
}

/// Load the configured source, whichever kind it is.
pub fn load_source(source: &DataSource) -> Result<TrackingTable> {
    match source {
        DataSource::Url(url) => load_url(url),
        DataSource::File(path) => load_path(path),
    }
}

/// Load a local CSV export (File → Abrir…, tests).
pub fn load_path(path: &Path) -> Result<TrackingTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    load_reader(file)
}

/// Parse and normalize a CSV stream into a [`TrackingTable`].
///
/// Schema: any subset of the 14 named columns may be present; an absent
/// column simply loads as all-missing. Extra columns are ignored.
pub fn load_reader(reader: impl Read) -> Result<TrackingTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row_no, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw: RawRecord = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.normalize());
    }

    Ok(TrackingTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Raw rows and normalization
// ---------------------------------------------------------------------------

/// One row exactly as it appears in the source export, before any
/// normalization. Every cell is text; `#[serde(default)]` makes each
/// column optional so partial exports still load.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "ORIGEN", default)]
    origin: Option<String>,
    #[serde(rename = "NP", default)]
    part_number: Option<String>,
    #[serde(rename = "NP_ACEPTADA", default)]
    accepted_part_number: Option<String>,
    #[serde(rename = "DESCRIPCION", default)]
    description: Option<String>,
    #[serde(rename = "MOD", default)]
    model: Option<String>,
    #[serde(rename = "STATUS", default)]
    status: Option<String>,
    #[serde(rename = "CLIENTE", default)]
    client: Option<String>,
    #[serde(rename = "SOLICITADO", default)]
    requested_by: Option<String>,
    #[serde(rename = "REFERENCIA", default)]
    reference: Option<String>,
    #[serde(rename = "ESTADO", default)]
    state: Option<String>,
    #[serde(rename = "ETD", default)]
    etd: Option<String>,
    #[serde(rename = "SHIP_DATE", default)]
    ship_date: Option<String>,
    #[serde(rename = "FECHA_INGRESO", default)]
    entry_date: Option<String>,
    #[serde(rename = "FECHA_SOLICITADO", default)]
    requested_date: Option<String>,
}

impl RawRecord {
    fn normalize(self) -> Record {
        Record {
            origin: normalize_cell(self.origin),
            part_number: normalize_cell(self.part_number),
            accepted_part_number: normalize_cell(self.accepted_part_number),
            description: normalize_cell(self.description),
            model: normalize_cell(self.model),
            status: normalize_cell(self.status),
            client: normalize_cell(self.client),
            requested_by: normalize_cell(self.requested_by),
            reference: normalize_cell(self.reference),
            state: normalize_cell(self.state),
            etd: parse_date_cell(self.etd.as_deref()),
            ship_date: parse_date_cell(self.ship_date.as_deref()),
            entry_date: parse_entry_date_cell(self.entry_date.as_deref()),
            requested_date: parse_date_cell(self.requested_date.as_deref()),
        }
    }
}

fn normalize_cell(raw: Option<String>) -> Option<String> {
    raw.as_deref().and_then(normalize_text)
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

/// Day-first date formats seen in BOL02 exports. `%d/%m/%y` must come
/// before `%d/%m/%Y`: chrono's `%Y` accepts a two-digit number as a
/// literal year, so `05/03/26` would otherwise become year 0026. `%y`
/// consumes exactly two digits and maps them to 2000–2068/1969–1999,
/// matching what pandas' dayfirst parsing did for these cells. The
/// `%Y-%m-%d` variants cover rows the upstream system re-exports in
/// ISO form.
const DATE_FORMATS: &[&str] = &["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse one date cell with the day-before-month convention.
/// Missing tokens and unparsable values yield `None`, never an error.
pub fn parse_date_cell(raw: Option<&str>) -> Option<NaiveDate> {
    let text = normalize_text(raw?)?;
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&text, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(&text, format) {
            return Some(stamp.date());
        }
    }
    log::debug!("unparsable date cell {text:?} treated as missing");
    None
}

/// `FECHA_INGRESO` rule: missing and the literal `1900-01-01` sentinel both
/// mean "not yet entered" and collapse to `None`.
pub fn parse_entry_date_cell(raw: Option<&str>) -> Option<NaiveDate> {
    parse_date_cell(raw).filter(|date| *date != entry_date_sentinel())
}
