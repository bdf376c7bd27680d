use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{
    FlowProfile, Particle, ProfileError, COL_AVERAGE_VELOCITY_Y, COL_BIN_MID_POINT, COL_DENSITY,
};

/// Particle type of the fixed channel walls.
pub const WALL_TYPE: i32 = 1;

// ---------------------------------------------------------------------------
// ProfileBinner – particles → FlowProfile
// ---------------------------------------------------------------------------

/// Splits the x-extent of the simulation box into equal bins and computes
/// the mean Y velocity and the number density of each bin.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileBinner {
    /// Box extent along x, y and z.
    pub box_size: [f64; 3],
    pub n_bins: usize,
    /// Particles of this type are ignored.
    pub wall_type: i32,
}

impl ProfileBinner {
    pub fn new(box_size: [f64; 3], n_bins: usize) -> Result<Self, ProfileError> {
        if n_bins == 0 {
            return Err(ProfileError::InvalidBinning("at least one bin is required".into()));
        }
        if box_size.iter().any(|&s| s <= 0.0 || !s.is_finite()) {
            return Err(ProfileError::InvalidBinning(format!(
                "box dimensions must be positive, got {box_size:?}"
            )));
        }
        Ok(ProfileBinner {
            box_size,
            n_bins,
            wall_type: WALL_TYPE,
        })
    }

    pub fn bin_width(&self) -> f64 {
        self.box_size[0] / self.n_bins as f64
    }

    /// Bin of an x-coordinate; positions outside the box land in the edge bins.
    pub fn bin_index(&self, x: f64) -> usize {
        let idx = (x / self.bin_width()).floor();
        if idx.is_nan() || idx < 0.0 {
            0
        } else {
            (idx as usize).min(self.n_bins - 1)
        }
    }

    /// Profile of the given particles. Empty bins report zero velocity.
    pub fn compute(&self, particles: &[Particle]) -> FlowProfile {
        let width = self.bin_width();
        let mut velocity_sum = vec![0.0; self.n_bins];
        let mut counts = vec![0usize; self.n_bins];

        for p in particles.iter().filter(|p| p.type_id != self.wall_type) {
            let bin = self.bin_index(p.position[0]);
            counts[bin] += 1;
            velocity_sum[bin] += p.velocity[1];
        }

        let bin_volume = width * self.box_size[1] * self.box_size[2];
        let mut profile = FlowProfile::new("");
        for (i, (&sum, &count)) in velocity_sum.iter().zip(&counts).enumerate() {
            let average = if count > 0 { sum / count as f64 } else { 0.0 };
            profile.push((i as f64 + 0.5) * width, average, count as f64 / bin_volume);
        }
        profile
    }
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ProfileRow {
    #[serde(rename = "BinMidPoint")]
    bin_mid_point: f64,
    #[serde(rename = "AverageVelocityY")]
    average_velocity_y: f64,
    #[serde(rename = "Density")]
    density: f64,
}

/// File name used for the profile of a given simulation step.
pub fn profile_file_name(iteration: u64) -> String {
    format!("flow_profile_it{iteration}.csv")
}

/// Write a profile as CSV (header always present, even without rows).
pub fn write_profile<W: Write>(profile: &FlowProfile, output: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);
    writer.write_record([COL_BIN_MID_POINT, COL_AVERAGE_VELOCITY_Y, COL_DENSITY])?;

    for i in 0..profile.len() {
        writer.serialize(ProfileRow {
            bin_mid_point: profile.bin_mid_point[i],
            average_velocity_y: profile.average_velocity_y[i],
            density: profile.density[i],
        })?;
    }
    writer.flush().context("flushing profile CSV")?;
    Ok(())
}

/// Write `flow_profile_it{iteration}.csv` into `dir`, creating it if needed.
pub fn write_profile_file(profile: &FlowProfile, dir: &Path, iteration: u64) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(profile_file_name(iteration));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_profile(profile, file).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {} bins to {}", profile.len(), path.display());
    Ok(path)
}
