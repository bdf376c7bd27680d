use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – one entry per source file
// ---------------------------------------------------------------------------

/// Render the list of loaded profiles.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Profiles");
    ui.label(format!(
        "{}/{}",
        state.settings.dir.display(),
        state.settings.pattern
    ));
    ui.separator();

    if state.figures.is_empty() {
        ui.label("No profiles loaded.");
        return;
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, (path, _)) in state.figures.iter().enumerate() {
                let label = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                if ui
                    .selectable_label(state.selected == i, label)
                    .on_hover_text(path.display().to_string())
                    .clicked()
                {
                    clicked = Some(i);
                }
            }
        });

    if let Some(i) = clicked {
        state.select(i);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open directory…").clicked() {
                open_directory_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("{} profile(s) loaded", state.figures.len()));

        ui.separator();

        if ui
            .selectable_label(state.show_density, "Density")
            .clicked()
        {
            state.show_density = !state.show_density;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_directory_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open statistics directory")
        .set_directory(&state.settings.dir)
        .pick_folder();

    if let Some(dir) = dir {
        state.load_directory(&dir);
    }
}
