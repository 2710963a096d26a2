use std::path::PathBuf;
use std::sync::Arc;

use crate::config::DataSource;
use crate::data::cache::{SnapshotCache, REFRESH_INTERVAL};
use crate::data::filter::{filter_indices, QueryError, SearchQuery};
use crate::data::format::{format_rows, DisplayTable};
use crate::data::loader;
use crate::data::model::TrackingTable;

// ---------------------------------------------------------------------------
// Search outcome
// ---------------------------------------------------------------------------

/// What the last search produced. Results are a transient, render-ready
/// derived view; they never index back into a replaced snapshot.
#[derive(Debug, Default)]
pub enum SearchOutcome {
    /// No search run yet (or the last one was rejected).
    #[default]
    Idle,
    /// Matching rows, already formatted, plus the snapshot size they were
    /// filtered from (for the export policy gate).
    Results {
        display: DisplayTable,
        total_rows: usize,
    },
    NoMatches,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Configured data source (None until the env var is set or a local
    /// file is opened).
    pub source: Option<DataSource>,

    /// TTL cache holding the current normalized snapshot.
    pub cache: SnapshotCache,

    /// Snapshot the UI is rendering from (shared, read-only).
    pub snapshot: Option<Arc<TrackingTable>>,

    /// The three search inputs, as typed.
    pub query: SearchQuery,

    /// Result of the last search.
    pub outcome: SearchOutcome,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source: DataSource::from_env(),
            cache: SnapshotCache::new(REFRESH_INTERVAL),
            snapshot: None,
            query: SearchQuery::default(),
            outcome: SearchOutcome::Idle,
            status_message: None,
        }
    }
}

impl AppState {
    /// Fetch (or re-fetch) the snapshot from the configured source. With
    /// `force`, the TTL is ignored and a fresh fetch happens now.
    ///
    /// On failure the previous snapshot, if any, stays in service and the
    /// error is surfaced as a status message.
    pub fn refresh_snapshot(&mut self, force: bool) {
        let Some(source) = self.source.clone() else {
            self.status_message = Some(format!(
                "Configura {} o abre un CSV local (File → Abrir…)",
                crate::config::SOURCE_ENV_VAR
            ));
            return;
        };

        if force {
            self.cache.invalidate();
        }
        match self.cache.get_or_refresh(|| loader::load_source(&source)) {
            // A zero-row export is "data unavailable", same as a failed
            // fetch: nothing to search, nothing to render.
            Ok(table) if table.is_empty() => {
                log::warn!("source {source} produced an empty table");
                self.snapshot = None;
                self.status_message = Some("No se pudieron cargar los datos.".to_string());
            }
            Ok(table) => {
                log::info!("snapshot ready: {} registros desde {source}", table.len());
                self.snapshot = Some(table);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load tracking data: {e:#}");
                // Previous snapshot, if any, stays in service.
                self.snapshot = self.cache.snapshot().filter(|t| !t.is_empty());
                self.status_message = Some(format!("No se pudieron cargar los datos: {e:#}"));
            }
        }
    }

    /// Load a local CSV export chosen by the user; it becomes the current
    /// source and snapshot.
    pub fn open_local_file(&mut self, path: PathBuf) {
        match loader::load_path(&path) {
            Ok(table) if table.is_empty() => {
                log::warn!("{} produced an empty table", path.display());
                self.status_message = Some("No se pudieron cargar los datos.".to_string());
            }
            Ok(table) => {
                log::info!("loaded {} registros from {}", table.len(), path.display());
                self.snapshot = Some(self.cache.install(table));
                self.source = Some(DataSource::File(path));
                self.outcome = SearchOutcome::Idle;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("No se pudieron cargar los datos: {e:#}"));
            }
        }
    }

    /// Run the search over the current snapshot, refreshing it first if
    /// stale. Rejects an all-empty query before any filtering happens.
    ///
    /// Only the previous search's message is cleared here: if the refresh
    /// below fails while an older snapshot keeps serving, its failure
    /// message must stay visible alongside the results.
    pub fn run_search(&mut self) {
        self.status_message = None;
        if self.cache.is_stale() && self.source.is_some() {
            self.refresh_snapshot(false);
        }

        let Some(snapshot) = self.snapshot.clone() else {
            self.outcome = SearchOutcome::Idle;
            if self.status_message.is_none() {
                self.status_message = Some("No se pudieron cargar los datos.".to_string());
            }
            return;
        };

        match filter_indices(&snapshot, &self.query) {
            Err(QueryError::EmptyQuery) => {
                self.outcome = SearchOutcome::Idle;
                self.status_message = Some(QueryError::EmptyQuery.to_string());
            }
            Ok(indices) if indices.is_empty() => {
                self.outcome = SearchOutcome::NoMatches;
            }
            Ok(indices) => {
                self.outcome = SearchOutcome::Results {
                    display: format_rows(&snapshot, &indices),
                    total_rows: snapshot.len(),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    const SAMPLE: &str = "\
ORIGEN,NP,NP_ACEPTADA,DESCRIPCION,MOD,STATUS,CLIENTE,SOLICITADO,REFERENCIA,ESTADO,ETD,SHIP_DATE,FECHA_INGRESO,FECHA_SOLICITADO
JAPON,110445RB0A,,EMPAQUE,X-TRAIL,OK,ACME,jperez,NI1025M,EN TRANSITO,05/03/2026,,,01/03/2026
USA,558900XX1C,,VALVULA,SENTRA,OK,GLOBEX,mlopez,NI1026M,ENTREGADO,,,15/02/2026,
MEXICO,110445RB0A,,EMPAQUE,X-TRAIL,OK,ACME,jperez,NI1027M,PENDIENTE,,,,
";

    fn state_with_sample() -> AppState {
        let mut state = AppState {
            source: None,
            ..AppState::default()
        };
        let table = load_reader(SAMPLE.as_bytes()).unwrap();
        state.snapshot = Some(state.cache.install(table));
        state
    }

    #[test]
    fn empty_query_is_rejected_with_warning() {
        let mut state = state_with_sample();
        state.query = SearchQuery::default();
        state.run_search();
        assert!(matches!(state.outcome, SearchOutcome::Idle));
        assert_eq!(
            state.status_message.as_deref(),
            Some("Debes ingresar al menos un criterio de búsqueda")
        );
    }

    #[test]
    fn matching_query_yields_formatted_results() {
        let mut state = state_with_sample();
        state.query.part_number = "110445RB0A".to_string();
        state.run_search();
        match &state.outcome {
            SearchOutcome::Results {
                display,
                total_rows,
            } => {
                assert_eq!(display.len(), 2);
                assert_eq!(*total_rows, 3);
            }
            other => panic!("expected results, got {other:?}"),
        }
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn no_matches_is_its_own_outcome() {
        let mut state = state_with_sample();
        state.query.reference = "ZZZ".to_string();
        state.run_search();
        assert!(matches!(state.outcome, SearchOutcome::NoMatches));
    }

    #[test]
    fn refresh_failure_message_survives_a_successful_search() {
        use std::time::Duration;

        let mut state = AppState {
            source: Some(DataSource::File(std::path::PathBuf::from(
                "/no/such/export.csv",
            ))),
            ..AppState::default()
        };
        // Zero TTL: the snapshot is stale by the time the search runs, so
        // run_search re-fetches from the broken source.
        state.cache = SnapshotCache::new(Duration::ZERO);
        let table = load_reader(SAMPLE.as_bytes()).unwrap();
        state.snapshot = Some(state.cache.install(table));

        state.query.client = "ACME".to_string();
        state.run_search();

        // The old snapshot still answers the search...
        assert!(matches!(state.outcome, SearchOutcome::Results { .. }));
        // ...and the fetch failure stays visible.
        let msg = state.status_message.as_deref().expect("failure message kept");
        assert!(msg.contains("No se pudieron cargar los datos"), "{msg}");
    }

    #[test]
    fn search_without_snapshot_reports_unavailable() {
        let mut state = AppState {
            source: None,
            ..AppState::default()
        };
        state.query.reference = "NI1025".to_string();
        state.run_search();
        assert!(matches!(state.outcome, SearchOutcome::Idle));
        assert!(state.status_message.is_some());
    }
}
