//! Static chart renderer.
//!
//! Layout of every image:
//! 1. Caption: the figure title, centered
//! 2. Velocity line + circle markers against the left axis, dashed grid
//! 3. Density line + cross markers against the right axis (own scale)
//! 4. Legend box in the upper right corner

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use super::figure::{AxisRange, Marker, ProfileFigure, Series};
use crate::color::GRID_GRAY;

/// Default canvas: 10×6 inches at 100 dpi.
pub const DEFAULT_SIZE: (u32, u32) = (1000, 600);

const GRID_LINES: usize = 10;
const MARKER_SIZE: u32 = 4;

/// Image format written by [`render_figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// `<out_dir>/<stem of source>.<ext>`; `out_dir` defaults to the source's directory.
pub fn output_path(source: &Path, out_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "figure".into());
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| source.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let mut path = dir.join(stem);
    path.set_extension(format.extension());
    path
}

/// Render `figure` to `path`.
pub fn render_figure(
    figure: &ProfileFigure,
    path: &Path,
    format: OutputFormat,
    size: (u32, u32),
) -> Result<()> {
    let drawn = match format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_figure(root, figure)
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_figure(root, figure)
        }
    };
    drawn.with_context(|| format!("rendering {}", path.display()))
}

fn draw_figure<DB>(root: DrawingArea<DB, Shift>, figure: &ProfileFigure) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let x_range = figure.x_range();
    let v_range = figure.velocity_range();
    let d_range = figure.density_range();

    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(x_range.as_range(), v_range.as_range())?
        .set_secondary_coord(x_range.as_range(), d_range.as_range());

    let velocity_color = figure.velocity.color.to_plotters();
    let density_color = figure.density.color.to_plotters();

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(GRID_LINES)
        .y_labels(GRID_LINES)
        .x_desc(figure.x_label.as_str())
        .axis_desc_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 13).into_font().color(&velocity_color))
        .draw()?;

    // The mesh has one description style, so the coloured y title gets its own pass.
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(GRID_LINES)
        .y_desc(figure.velocity.axis_label.as_str())
        .axis_desc_style(("sans-serif", 16).into_font().color(&velocity_color))
        .y_label_style(("sans-serif", 13).into_font().color(&velocity_color))
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_labels(GRID_LINES)
        .y_desc(figure.density.axis_label.as_str())
        .axis_desc_style(("sans-serif", 16).into_font().color(&density_color))
        .label_style(("sans-serif", 13).into_font().color(&density_color))
        .draw()?;

    // Dashed grid on the primary axis.
    let grid_style = GRID_GRAY.to_plotters_alpha(figure.grid_alpha).stroke_width(1);
    for x in grid_positions(x_range) {
        chart.draw_series(DashedLineSeries::new(
            vec![(x, v_range.min), (x, v_range.max)],
            4,
            4,
            grid_style,
        ))?;
    }
    for y in grid_positions(v_range) {
        chart.draw_series(DashedLineSeries::new(
            vec![(x_range.min, y), (x_range.max, y)],
            4,
            4,
            grid_style,
        ))?;
    }

    let velocity_style = figure
        .velocity
        .color
        .to_plotters_alpha(figure.velocity.alpha)
        .stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            figure.velocity.points.iter().copied(),
            velocity_style,
        ))?
        .label(figure.velocity.name.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], velocity_style));
    chart.draw_series(marker_elements(&figure.velocity))?;

    let density_style = figure
        .density
        .color
        .to_plotters_alpha(figure.density.alpha)
        .stroke_width(2);
    chart
        .draw_secondary_series(LineSeries::new(
            figure.density.points.iter().copied(),
            density_style,
        ))?
        .label(figure.density.name.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], density_style));
    chart.draw_secondary_series(marker_elements(&figure.density))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn marker_elements<DB: DrawingBackend>(
    series: &Series,
) -> Vec<DynElement<'static, DB, (f64, f64)>> {
    let style = series.color.to_plotters_alpha(series.alpha);
    series
        .points
        .iter()
        .map(|&point| match series.marker {
            Marker::Circle => Circle::new(point, MARKER_SIZE, style.filled()).into_dyn(),
            Marker::Cross => Cross::new(point, MARKER_SIZE, style.stroke_width(2)).into_dyn(),
        })
        .collect()
}

/// Round-valued tick positions inside `range`, matching the mesh labels.
fn grid_positions(range: AxisRange) -> Vec<f64> {
    let coord: RangedCoordf64 = range.as_range().into();
    coord.key_points(GRID_LINES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::figure::{DENSITY_LABEL, VELOCITY_LABEL, X_LABEL};
    use crate::data::model::FlowProfile;

    /// The opening `<text>` tag of the element whose content is `label`.
    fn text_tag_for<'a>(svg: &'a str, label: &str) -> &'a str {
        let lines: Vec<&str> = svg.lines().collect();
        let at = lines
            .iter()
            .position(|line| line.trim() == label)
            .unwrap_or_else(|| panic!("{label} not in svg"));
        lines[at - 1]
    }

    #[test]
    fn axis_titles_take_their_series_colour() {
        let mut profile = FlowProfile::new("statistics/flow_profile_it5.csv");
        profile.push(0.0, 1.0, 10.0);
        profile.push(1.0, 2.0, 20.0);
        let figure = ProfileFigure::from_profile(&profile);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("it5.svg");

        render_figure(&figure, &path, OutputFormat::Svg, DEFAULT_SIZE).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();

        assert!(text_tag_for(&svg, VELOCITY_LABEL).contains("fill=\"#1F77B4\""));
        assert!(text_tag_for(&svg, DENSITY_LABEL).contains("fill=\"#D62728\""));
        assert!(text_tag_for(&svg, X_LABEL).contains("fill=\"#000000\""));
    }

    #[test]
    fn image_lands_next_to_the_source_by_default() {
        let path = output_path(
            Path::new("statistics/flow_profile_it40.csv"),
            None,
            OutputFormat::Png,
        );
        assert_eq!(path, PathBuf::from("statistics/flow_profile_it40.png"));
    }

    #[test]
    fn out_dir_overrides_the_source_directory() {
        let path = output_path(
            Path::new("statistics/flow_profile_it40.csv"),
            Some(Path::new("plots")),
            OutputFormat::Svg,
        );
        assert_eq!(path, PathBuf::from("plots/flow_profile_it40.svg"));
    }

    #[test]
    fn grid_positions_stay_inside_the_range() {
        let range = AxisRange { min: -0.1, max: 2.1 };
        let ticks = grid_positions(range);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|&t| t >= range.min && t <= range.max));
    }
}
