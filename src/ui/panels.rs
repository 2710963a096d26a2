use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Abrir CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Actualizar datos").clicked() {
                state.refresh_snapshot(true);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Tracking BOL02");
        ui.separator();

        if let Some(table) = &state.snapshot {
            ui.label(format!("{} registros cargados", table.len()));
        } else {
            ui.label("Sin datos");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – dataset summary
// ---------------------------------------------------------------------------

/// Render the sidebar summary of the loaded snapshot.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Información");
    ui.separator();

    let table = match &state.snapshot {
        Some(table) => table,
        None => {
            ui.label("No hay datos cargados.");
            return;
        }
    };

    ui.label(format!("Total de registros: {}", table.len()));
    ui.label(format!(
        "Referencias únicas: {}",
        table.unique_count(|r| r.reference.as_deref())
    ));
    ui.label(format!(
        "NPs únicos: {}",
        table.unique_count(|r| r.part_number.as_deref())
    ));
    ui.label(format!(
        "Clientes únicos: {}",
        table.unique_count(|r| r.client.as_deref())
    ));

    let distribution = table.state_distribution(5);
    if !distribution.is_empty() {
        ui.add_space(8.0);
        ui.strong("Distribución por Estado");
        for (state_name, count) in &distribution {
            ui.label(format!("• {state_name}: {count}"));
        }
    }

    ui.add_space(8.0);
    ui.separator();
    ui.small("Usa al menos un filtro.");
    ui.small("Búsqueda no sensible a mayúsculas.");
    ui.small("No se permite descargar el dataset completo.");
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir export BOL02")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_local_file(path);
    }
}
