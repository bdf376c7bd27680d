use std::ops::Range;

use crate::color::{Rgb, TAB_BLUE, TAB_RED};
use crate::data::model::FlowProfile;

pub const X_LABEL: &str = "Position along X-axis (Channel Width)";
pub const VELOCITY_LABEL: &str = "Average Velocity Vy";
pub const DENSITY_LABEL: &str = "Particle Count (Density)";

/// Relative padding added on each side of a data range.
const RANGE_MARGIN: f64 = 0.05;

// ---------------------------------------------------------------------------
// Series description
// ---------------------------------------------------------------------------

/// Which y-axis a series is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left axis.
    Primary,
    /// Right axis, independent scale.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Cross,
}

/// One plotted line with markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub axis: Axis,
    /// Y-axis description, drawn in the series colour.
    pub axis_label: String,
    pub color: Rgb,
    pub alpha: f64,
    pub marker: Marker,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, y)| y)
    }

    pub fn x_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(x, _)| x)
    }
}

// ---------------------------------------------------------------------------
// ProfileFigure
// ---------------------------------------------------------------------------

/// Everything needed to draw one flow profile, independent of the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFigure {
    pub title: String,
    pub x_label: String,
    /// Velocity on the primary axis.
    pub velocity: Series,
    /// Density on the secondary axis.
    pub density: Series,
    /// Dashed grid opacity on the primary axis.
    pub grid_alpha: f64,
}

impl ProfileFigure {
    pub fn from_profile(profile: &FlowProfile) -> Self {
        ProfileFigure {
            title: format!("Flow Profile at {}", profile.source.display()),
            x_label: X_LABEL.to_string(),
            velocity: Series {
                name: "Velocity".to_string(),
                axis: Axis::Primary,
                axis_label: VELOCITY_LABEL.to_string(),
                color: TAB_BLUE,
                alpha: 1.0,
                marker: Marker::Circle,
                points: profile.velocity_points(),
            },
            density: Series {
                name: "Density".to_string(),
                axis: Axis::Secondary,
                axis_label: DENSITY_LABEL.to_string(),
                color: TAB_RED,
                alpha: 0.5,
                marker: Marker::Cross,
                points: profile.density_points(),
            },
            grid_alpha: 0.6,
        }
    }

    pub fn x_range(&self) -> AxisRange {
        AxisRange::fit(self.velocity.x_values().chain(self.density.x_values()))
    }

    pub fn velocity_range(&self) -> AxisRange {
        AxisRange::fit(self.velocity.y_values())
    }

    pub fn density_range(&self) -> AxisRange {
        AxisRange::fit(self.density.y_values())
    }

    /// Maps density values onto the velocity axis.
    pub fn twin_axis(&self) -> TwinAxis {
        TwinAxis::new(self.velocity_range(), self.density_range())
    }
}

// ---------------------------------------------------------------------------
// Axis ranges
// ---------------------------------------------------------------------------

/// A closed data interval with display padding applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Fit the finite values with a small margin. A single value (or all
    /// equal values) is widened by ±0.5; no finite values gives `0..1`.
    pub fn fit(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() {
            return AxisRange { min: 0.0, max: 1.0 };
        }
        if max - min <= f64::EPSILON * max.abs().max(1.0) {
            return AxisRange {
                min: min - 0.5,
                max: max + 0.5,
            };
        }
        let pad = (max - min) * RANGE_MARGIN;
        AxisRange {
            min: min - pad,
            max: max + pad,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn as_range(&self) -> Range<f64> {
        self.min..self.max
    }
}

/// Linear map between a secondary axis and the primary axis, so a series
/// on its own scale can be drawn in the primary coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwinAxis {
    pub primary: AxisRange,
    pub secondary: AxisRange,
}

impl TwinAxis {
    pub fn new(primary: AxisRange, secondary: AxisRange) -> Self {
        TwinAxis { primary, secondary }
    }

    /// Secondary value → primary coordinate.
    pub fn to_primary(&self, secondary_value: f64) -> f64 {
        let t = (secondary_value - self.secondary.min) / self.secondary.span();
        self.primary.min + t * self.primary.span()
    }

    /// Primary coordinate → secondary value (for labelling the right axis).
    pub fn to_secondary(&self, primary_value: f64) -> f64 {
        let t = (primary_value - self.primary.min) / self.primary.span();
        self.secondary.min + t * self.secondary.span()
    }
}
