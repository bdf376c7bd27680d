use std::path::{Path, PathBuf};

use crate::batch::{self, Collector, Settings};
use crate::chart::ProfileFigure;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Search settings used for the current figures.
    pub settings: Settings,

    /// One figure per source file, in discovery order.
    pub figures: Vec<(PathBuf, ProfileFigure)>,

    /// Index into `figures` shown in the central panel.
    pub selected: usize,

    /// Draw the density series on the right-hand axis.
    pub show_density: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            figures: Vec::new(),
            selected: 0,
            show_density: true,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn new(settings: Settings, figures: Vec<(PathBuf, ProfileFigure)>) -> Self {
        let mut state = AppState {
            settings,
            ..AppState::default()
        };
        state.set_figures(figures);
        state
    }

    /// Replace the figures and select the first one.
    pub fn set_figures(&mut self, figures: Vec<(PathBuf, ProfileFigure)>) {
        self.status_message = if figures.is_empty() {
            Some(format!(
                "No CSV files found in {}/",
                self.settings.dir.display()
            ))
        } else {
            None
        };
        self.figures = figures;
        self.selected = 0;
    }

    pub fn selected_figure(&self) -> Option<&ProfileFigure> {
        self.figures.get(self.selected).map(|(_, fig)| fig)
    }

    /// Select a figure; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.figures.len() {
            self.selected = index;
        }
    }

    /// Step to the next figure, wrapping around.
    pub fn select_next(&mut self) {
        if !self.figures.is_empty() {
            self.selected = (self.selected + 1) % self.figures.len();
        }
    }

    /// Step to the previous figure, wrapping around.
    pub fn select_previous(&mut self) {
        if !self.figures.is_empty() {
            self.selected = (self.selected + self.figures.len() - 1) % self.figures.len();
        }
    }

    /// Re-run discovery and loading against another directory.
    ///
    /// The current figures and settings are kept when loading fails.
    pub fn load_directory(&mut self, dir: &Path) {
        let settings = Settings {
            dir: dir.to_path_buf(),
            ..self.settings.clone()
        };
        let mut collector = Collector::default();
        match batch::run(&settings, &mut collector, &mut std::io::sink()) {
            Ok(report) => {
                self.settings = settings;
                log::info!(
                    "Loaded {} profile(s) from {}",
                    report.plotted.len(),
                    dir.display()
                );
                self.set_figures(collector.figures);
                if !report.failed.is_empty() {
                    self.status_message =
                        Some(format!("{} file(s) could not be loaded", report.failed.len()));
                }
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", dir.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FlowProfile;

    fn figure(name: &str) -> (PathBuf, ProfileFigure) {
        let mut profile = FlowProfile::new(name);
        profile.push(0.0, 1.0, 2.0);
        (PathBuf::from(name), ProfileFigure::from_profile(&profile))
    }

    #[test]
    fn empty_figure_list_reports_missing_files() {
        let state = AppState::new(Settings::default(), Vec::new());
        assert!(state.selected_figure().is_none());
        assert_eq!(
            state.status_message.as_deref(),
            Some("No CSV files found in statistics/")
        );
    }

    #[test]
    fn selection_ignores_out_of_range_indices() {
        let mut state = AppState::new(Settings::default(), vec![figure("a.csv"), figure("b.csv")]);
        state.select(1);
        assert_eq!(state.selected, 1);
        state.select(5);
        assert_eq!(state.selected, 1);
        assert_eq!(state.selected_figure().unwrap().title, "Flow Profile at b.csv");
    }

    #[test]
    fn stepping_wraps_around() {
        let mut state = AppState::new(
            Settings::default(),
            vec![figure("a.csv"), figure("b.csv"), figure("c.csv")],
        );
        state.select_previous();
        assert_eq!(state.selected, 2);
        state.select_next();
        assert_eq!(state.selected, 0);
        state.select_next();
        assert_eq!(state.selected, 1);

        let mut empty = AppState::default();
        empty.select_next();
        empty.select_previous();
        assert_eq!(empty.selected, 0);
    }

    #[test]
    fn failed_reload_keeps_the_previous_directory() {
        let good = tempfile::tempdir().unwrap();
        std::fs::write(
            good.path().join("flow_profile_it1.csv"),
            "BinMidPoint,AverageVelocityY,Density\n0,1.0,10\n1,2.0,20\n",
        )
        .unwrap();
        let bad = tempfile::tempdir().unwrap();
        std::fs::write(bad.path().join("flow_profile_it1.csv"), "BinMidPoint\n0\n").unwrap();

        let mut state = AppState::default();
        state.load_directory(good.path());
        assert_eq!(state.settings.dir, good.path());
        assert_eq!(state.figures.len(), 1);

        state.load_directory(bad.path());

        assert_eq!(state.settings.dir, good.path());
        assert_eq!(state.figures.len(), 1);
        assert!(state.figures[0].0.starts_with(good.path()));
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|msg| msg.starts_with("Error: ")));
    }

    #[test]
    fn successful_reload_switches_directory() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(
            second.path().join("flow_profile_it3.csv"),
            "BinMidPoint,AverageVelocityY,Density\n0,1.0,10\n",
        )
        .unwrap();

        let mut state = AppState::default();
        state.load_directory(first.path());
        assert!(state.figures.is_empty());
        assert_eq!(
            state.status_message,
            Some(format!("No CSV files found in {}/", first.path().display()))
        );

        state.load_directory(second.path());
        assert_eq!(state.settings.dir, second.path());
        assert_eq!(state.figures.len(), 1);
        assert!(state.status_message.is_none());
    }
}
