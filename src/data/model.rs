use std::path::{Path, PathBuf};

use thiserror::Error;

/// Column names shared by the loader and the profile writer.
pub const COL_BIN_MID_POINT: &str = "BinMidPoint";
pub const COL_AVERAGE_VELOCITY_Y: &str = "AverageVelocityY";
pub const COL_DENSITY: &str = "Density";

// ---------------------------------------------------------------------------
// ProfileError – typed failures of the data layer
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("invalid binning: {0}")]
    InvalidBinning(String),
    #[error("invalid file pattern '{0}': at most one '*' is supported")]
    InvalidPattern(String),
}

// ---------------------------------------------------------------------------
// FlowProfile – one statistics file
// ---------------------------------------------------------------------------

/// Per-bin velocity and density along the channel width.
///
/// The three columns always have the same length, one entry per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowProfile {
    /// File the profile was loaded from (or will be written to).
    pub source: PathBuf,
    /// Representative x-coordinate of each bin.
    pub bin_mid_point: Vec<f64>,
    /// Mean Y velocity of the particles in each bin.
    pub average_velocity_y: Vec<f64>,
    /// Particles per unit bin volume.
    pub density: Vec<f64>,
}

impl FlowProfile {
    /// An empty profile attributed to `source`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        FlowProfile {
            source: source.into(),
            bin_mid_point: Vec::new(),
            average_velocity_y: Vec::new(),
            density: Vec::new(),
        }
    }

    /// Append one bin.
    pub fn push(&mut self, bin_mid_point: f64, average_velocity_y: f64, density: f64) {
        self.bin_mid_point.push(bin_mid_point);
        self.average_velocity_y.push(average_velocity_y);
        self.density.push(density);
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bin_mid_point.len()
    }

    /// Whether the profile has no bins.
    pub fn is_empty(&self) -> bool {
        self.bin_mid_point.is_empty()
    }

    /// `(x, velocity)` pairs.
    pub fn velocity_points(&self) -> Vec<(f64, f64)> {
        zip_points(&self.bin_mid_point, &self.average_velocity_y)
    }

    /// `(x, density)` pairs.
    pub fn density_points(&self) -> Vec<(f64, f64)> {
        zip_points(&self.bin_mid_point, &self.density)
    }
}

fn zip_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter().copied().zip(y.iter().copied()).collect()
}

/// Simulation step encoded in a file name, e.g. `flow_profile_it250.csv` → 250.
pub fn iteration_of(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let (_, tail) = stem.rsplit_once("it")?;
    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}

// ---------------------------------------------------------------------------
// Particle – input to the profiler
// ---------------------------------------------------------------------------

/// A simulated particle as seen by the profiler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    /// Particle kind; walls use a dedicated type that profiling skips.
    pub type_id: i32,
}

impl Particle {
    pub fn new(position: [f64; 3], velocity: [f64; 3], type_id: i32) -> Self {
        Particle {
            position,
            velocity,
            type_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_is_parsed_from_file_name() {
        assert_eq!(iteration_of(Path::new("statistics/flow_profile_it250.csv")), Some(250));
        assert_eq!(iteration_of(Path::new("flow_profile_it0.csv")), Some(0));
        assert_eq!(iteration_of(Path::new("flow_profile_itx.csv")), None);
        assert_eq!(iteration_of(Path::new("flow_profile_it.csv")), None);
        assert_eq!(iteration_of(Path::new("density.csv")), None);
    }

    #[test]
    fn points_share_the_x_column() {
        let mut profile = FlowProfile::new("p.csv");
        profile.push(0.0, 1.0, 10.0);
        profile.push(1.0, 2.0, 20.0);

        assert_eq!(profile.len(), 2);
        assert_eq!(profile.velocity_points(), vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(profile.density_points(), vec![(0.0, 10.0), (1.0, 20.0)]);
    }
}
