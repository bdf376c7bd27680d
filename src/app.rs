use eframe::egui;

use crate::data::model::iteration_of;
use crate::state::AppState;
use crate::ui::{panels, plot};

const APP_NAME: &str = "Flow Profile Viewer";

pub struct FlowPlotApp {
    pub state: AppState,
    /// Last title sent to the window, to avoid resending it every frame.
    shown_title: String,
}

impl FlowPlotApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            shown_title: String::new(),
        }
    }

    /// Up/Down step through the profile list.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (next, previous) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowDown),
                i.key_pressed(egui::Key::ArrowUp),
            )
        });
        if next {
            self.state.select_next();
        }
        if previous {
            self.state.select_previous();
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = window_title(&self.state);
        if title != self.shown_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.shown_title = title;
        }
    }
}

/// `"<app> - it<N> (k/n)"` for the selected profile, or just the app name.
fn window_title(state: &AppState) -> String {
    match state.figures.get(state.selected) {
        Some((source, _)) => {
            let name = match iteration_of(source) {
                Some(it) => format!("it{it}"),
                None => source.display().to_string(),
            };
            format!(
                "{APP_NAME} - {name} ({}/{})",
                state.selected + 1,
                state.figures.len()
            )
        }
        None => APP_NAME.to_string(),
    }
}

impl eframe::App for FlowPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        self.sync_title(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        egui::TopBottomPanel::bottom("source_bar").show(ctx, |ui| {
            match self.state.figures.get(self.state.selected) {
                Some((source, _)) => ui.monospace(source.display().to_string()),
                None => ui.weak("no profile loaded"),
            };
        });

        egui::SidePanel::left("profile_list")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            plot::profile_plot(ui, &self.state);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn run_viewer(state: AppState) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|_cc| Ok(Box::new(FlowPlotApp::new(state)))),
    )
}
