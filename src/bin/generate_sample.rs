//! Writes a few synthetic `flow_profile_it*.csv` files so the plotter can be
//! tried without running a simulation.
//!
//! Usage: `generate_sample [OUT_DIR]` (defaults to `statistics`).

use std::path::PathBuf;

use anyhow::Result;
use flowplot::data::model::Particle;
use flowplot::data::profiling::{write_profile_file, ProfileBinner, WALL_TYPE};

/// Channel box: width along x, periodic along y and z.
const BOX_SIZE: [f64; 3] = [30.0, 30.0, 10.0];
const N_BINS: usize = 50;
const N_FLUID: usize = 6000;
/// Lennard-Jones sigma, sets the layering wavelength near the walls.
const SIGMA: f64 = 1.1;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Relative density at `x`: damped oscillation near each wall.
fn layering(x: f64) -> f64 {
    let wall_distance = x.min(BOX_SIZE[0] - x);
    1.0 + 0.8 * (2.0 * std::f64::consts::PI * wall_distance / SIGMA).cos()
        * (-wall_distance / 2.5).exp()
}

/// Parabolic (Poiseuille) velocity profile, zero at both walls.
fn poiseuille(x: f64, v_max: f64) -> f64 {
    let w = BOX_SIZE[0];
    4.0 * v_max * x * (w - x) / (w * w)
}

fn sample_particles(rng: &mut SimpleRng, v_max: f64) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(N_FLUID + 2 * N_BINS);

    // Rejection sampling against the layering envelope (max 1.8).
    while particles.len() < N_FLUID {
        let x = rng.next_f64() * BOX_SIZE[0];
        if rng.next_f64() * 1.8 > layering(x) {
            continue;
        }
        let y = rng.next_f64() * BOX_SIZE[1];
        let z = rng.next_f64() * BOX_SIZE[2];
        let vy = poiseuille(x, v_max) + rng.gauss(0.0, 0.05 * v_max.max(0.1));
        particles.push(Particle::new([x, y, z], [rng.gauss(0.0, 0.05), vy, 0.0], 0));
    }

    // Fixed walls; the profiler ignores them.
    for i in 0..N_BINS {
        let y = i as f64 * BOX_SIZE[1] / N_BINS as f64;
        particles.push(Particle::new([0.0, y, 0.0], [0.0; 3], WALL_TYPE));
        particles.push(Particle::new([BOX_SIZE[0] - 1e-9, y, 0.0], [0.0; 3], WALL_TYPE));
    }
    particles
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("statistics"));

    let binner = ProfileBinner::new(BOX_SIZE, N_BINS)?;
    let mut rng = SimpleRng::new(42);

    // The flow accelerates towards a steady state.
    for (iteration, v_max) in [(1000u64, 0.4), (5000, 1.2), (10000, 1.8), (20000, 2.0)] {
        let particles = sample_particles(&mut rng, v_max);
        let profile = binner.compute(&particles);
        let path = write_profile_file(&profile, &out_dir, iteration)?;
        println!("Wrote {} bins to {}", profile.len(), path.display());
    }

    Ok(())
}
