use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{
    AxisHints, GridMark, HPlacement, Legend, Line, MarkerShape, Plot, PlotPoints, PlotUi, Points,
};

use crate::chart::{Marker, Series, TwinAxis};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Flow profile plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected figure in the central panel.
///
/// egui_plot has a single coordinate space, so the density series is mapped
/// onto the velocity range and the right-hand axis is labelled with the
/// inverse mapping.
pub fn profile_plot(ui: &mut Ui, state: &AppState) {
    let figure = match state.selected_figure() {
        Some(fig) => fig,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No flow profiles loaded  (File → Open directory…)");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&figure.title);
    });

    let twin = figure.twin_axis();
    let v_range = twin.primary;

    let mut y_axes = vec![AxisHints::new_y().label(figure.velocity.axis_label.as_str())];
    if state.show_density {
        y_axes.push(
            AxisHints::new_y()
                .label(figure.density.axis_label.as_str())
                .placement(HPlacement::Right)
                .formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                    format_tick(twin.to_secondary(mark.value))
                }),
        );
    }

    Plot::new("flow_profile_plot")
        .legend(Legend::default())
        .x_axis_label(figure.x_label.as_str())
        .custom_y_axes(y_axes)
        .include_y(v_range.min)
        .include_y(v_range.max)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            draw_series(plot_ui, &figure.velocity, None);
            if state.show_density {
                draw_series(plot_ui, &figure.density, Some(&twin));
            }
        });
}

/// Line + markers for one series, optionally mapped from a secondary axis.
fn draw_series(plot_ui: &mut PlotUi, series: &Series, twin: Option<&TwinAxis>) {
    let coords = plot_coords(series, twin);
    let color = series.color.to_color32(series.alpha);

    let line = Line::new(coords.iter().copied().collect::<PlotPoints>())
        .name(&series.name)
        .color(color)
        .width(1.5);

    let shape = match series.marker {
        Marker::Circle => MarkerShape::Circle,
        Marker::Cross => MarkerShape::Cross,
    };
    let points = Points::new(coords.into_iter().collect::<PlotPoints>())
        .name(&series.name)
        .shape(shape)
        .radius(3.5)
        .filled(true)
        .color(color);

    plot_ui.line(line);
    plot_ui.points(points);
}

fn plot_coords(series: &Series, twin: Option<&TwinAxis>) -> Vec<[f64; 2]> {
    series
        .points
        .iter()
        .map(|&(x, y)| match twin {
            Some(t) => [x, t.to_primary(y)],
            None => [x, y],
        })
        .collect()
}

fn format_tick(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
