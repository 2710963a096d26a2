use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::{self, default_filename};
use crate::data::format::DisplayTable;
use crate::state::{AppState, SearchOutcome};

// ---------------------------------------------------------------------------
// Central panel – search form and results
// ---------------------------------------------------------------------------

/// Render the search form, the outcome message, and the results table.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Búsqueda de Pedidos");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Referencia");
        ui.text_edit_singleline(&mut state.query.reference);
        ui.label("NP");
        ui.text_edit_singleline(&mut state.query.part_number);
        ui.label("Cliente");
        ui.text_edit_singleline(&mut state.query.client);
        if ui.button("Buscar").clicked() {
            state.run_search();
        }
    });

    ui.separator();

    match &state.outcome {
        SearchOutcome::Idle => {
            ui.label("Ingresa al menos un criterio y pulsa Buscar.");
        }
        SearchOutcome::NoMatches => {
            ui.label(RichText::new("No se encontraron resultados").color(Color32::YELLOW));
        }
        SearchOutcome::Results {
            display,
            total_rows,
        } => {
            ui.label(
                RichText::new(format!("Se encontraron {} registros", display.len()))
                    .color(Color32::GREEN),
            );

            // The policy gate compares sizes; the buttons are only wiring.
            if export::export_allowed(display.len(), *total_rows) {
                export_buttons(ui, display);
            }

            ui.add_space(4.0);
            results_table(ui, display);
        }
    }

    footer(ui);
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

fn footer(ui: &mut Ui) {
    ui.add_space(8.0);
    ui.separator();
    ui.weak("© 2026 Tracking GJ");
    ui.weak(last_updated_caption());
}

fn last_updated_caption() -> String {
    format!(
        "Última actualización: {}",
        chrono::Local::now().format("%d/%m/%Y %H:%M:%S")
    )
}

// ---------------------------------------------------------------------------
// Results table
// ---------------------------------------------------------------------------

fn results_table(ui: &mut Ui, display: &DisplayTable) {
    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), DisplayTable::headers().len())
            .header(20.0, |mut header| {
                for title in DisplayTable::headers() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, display.len(), |mut row| {
                    let cells = &display.rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.as_str());
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Export buttons
// ---------------------------------------------------------------------------

fn export_buttons(ui: &mut Ui, display: &DisplayTable) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Descargar CSV").clicked() {
            save_export(display, "csv");
        }
        if ui.button("Descargar XLSX").clicked() {
            save_export(display, "xlsx");
        }
    });
}

fn save_export(display: &DisplayTable, extension: &str) {
    let bytes = match extension {
        "csv" => export::to_csv(display),
        _ => export::to_xlsx(display),
    };
    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("export failed: {e:#}");
            return;
        }
    };

    let file = rfd::FileDialog::new()
        .set_title("Guardar resultados")
        .set_file_name(default_filename(extension))
        .add_filter(extension.to_uppercase(), &[extension])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = std::fs::write(&path, &bytes) {
            log::error!("failed to write {}: {e}", path.display());
        } else {
            log::info!("exported {} rows to {}", display.len(), path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_updated_caption_carries_a_full_timestamp() {
        let caption = last_updated_caption();
        let stamp = caption
            .strip_prefix("Última actualización: ")
            .expect("caption prefix");
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%d/%m/%Y %H:%M:%S").is_ok());
    }
}
