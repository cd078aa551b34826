//! Constant-velocity tracking model.
//!
//! Each particle is `(pos_x, pos_y, vel_x, vel_y)`. Positions drift by one
//! tenth of the velocity per step plus Gaussian noise, velocities follow a
//! Gaussian random walk, and positions are observed with Student-t noise.
//!
//! The move kernel is layout specific: the row-major population updates
//! particle by particle, the column-major one updates whole coordinate
//! columns. Both run on the rayon pool and consume the same noise buffers,
//! so for a given seed they produce identical populations.

use rand_distr::{Distribution, StudentT};
use rayon::prelude::*;
use smc_core::{ColMajorMatrix, Fixed, RowMajorMatrix, StateMatrix};
use smc_random::rng::{Normal, SmcRng};

use crate::error::{CliError, Result};

/// Coordinates per particle.
pub const DIM: usize = 4;

/// Time step scaling the velocity in the position update.
pub const DELTA: f64 = 0.1;

/// Position noise variance per step.
pub const VAR_POS: f64 = 0.02;

/// Velocity noise variance per step.
pub const VAR_VEL: f64 = 0.001;

/// Initial position standard deviation.
pub const SD_POS0: f64 = 2.0;

/// Initial velocity standard deviation.
pub const SD_VEL0: f64 = 1.0;

/// Degrees of freedom of the observation noise.
pub const NU: f64 = 10.0;

/// Inverse scale of the observation noise.
pub const SCALE: f64 = 10.0;

/// Log-likelihood of a position given an observation, up to a constant.
#[inline]
pub fn log_likelihood(px: f64, py: f64, ox: f64, oy: f64) -> f64 {
    let dx = SCALE * (px - ox);
    let dy = SCALE * (py - oy);
    let lx = (1.0 + dx * dx / NU).ln();
    let ly = (1.0 + dy * dy / NU).ln();
    -0.5 * (NU + 1.0) * (lx + ly)
}

/// One step worth of noise, one buffer per coordinate.
#[derive(Debug, Clone, Default)]
pub struct MoveNoise {
    pub pos_x: Vec<f64>,
    pub pos_y: Vec<f64>,
    pub vel_x: Vec<f64>,
    pub vel_y: Vec<f64>,
}

impl MoveNoise {
    /// Draws fresh noise for `n` particles.
    pub fn draw(&mut self, n: usize, rng: &mut SmcRng) -> Result<()> {
        let pos = Normal::new(0.0, VAR_POS.sqrt())?;
        let vel = Normal::new(0.0, VAR_VEL.sqrt())?;
        for (buffer, dist) in [
            (&mut self.pos_x, &pos),
            (&mut self.pos_y, &pos),
            (&mut self.vel_x, &vel),
            (&mut self.vel_y, &vel),
        ] {
            buffer.resize(n, 0.0);
            rng.fill_with(dist, buffer);
        }
        Ok(())
    }
}

/// Population storage usable by the tracking filter.
pub trait TrackingState: StateMatrix<Value = f64> {
    /// `n` particles at the origin.
    fn with_particles(n: usize) -> Self;

    /// Applies one constant-velocity step.
    fn apply_move(&mut self, noise: &MoveNoise);
}

impl TrackingState for RowMajorMatrix<f64, Fixed<DIM>> {
    fn with_particles(n: usize) -> Self {
        Self::new(n)
    }

    fn apply_move(&mut self, noise: &MoveNoise) {
        self.data_mut()
            .par_chunks_exact_mut(DIM)
            .enumerate()
            .for_each(|(i, p)| {
                p[0] += noise.pos_x[i] + DELTA * p[2];
                p[1] += noise.pos_y[i] + DELTA * p[3];
                p[2] += noise.vel_x[i];
                p[3] += noise.vel_y[i];
            });
    }
}

impl TrackingState for ColMajorMatrix<f64, Fixed<DIM>> {
    fn with_particles(n: usize) -> Self {
        Self::new(n)
    }

    fn apply_move(&mut self, noise: &MoveNoise) {
        let mut columns = self.columns_mut();
        if let [pos_x, pos_y, vel_x, vel_y] = &mut columns[..] {
            drift(pos_x, vel_x, &noise.pos_x);
            drift(pos_y, vel_y, &noise.pos_y);
            diffuse(vel_x, &noise.vel_x);
            diffuse(vel_y, &noise.vel_y);
        }
    }
}

fn drift(pos: &mut [f64], vel: &[f64], noise: &[f64]) {
    pos.par_iter_mut()
        .zip(vel.par_iter())
        .zip(noise.par_iter())
        .for_each(|((p, v), e)| *p += e + DELTA * v);
}

fn diffuse(vel: &mut [f64], noise: &[f64]) {
    vel.par_iter_mut()
        .zip(noise.par_iter())
        .for_each(|(v, e)| *v += e);
}

/// Draws every particle from the initial distribution.
pub fn initialise<M: TrackingState>(state: &mut M, rng: &mut SmcRng) -> Result<()> {
    let n = state.size();
    let pos = Normal::new(0.0, SD_POS0)?;
    let vel = Normal::new(0.0, SD_VEL0)?;

    let mut prior = vec![0.0; n * DIM];
    for p in prior.chunks_exact_mut(DIM) {
        p[0] = pos.sample(rng);
        p[1] = pos.sample(rng);
        p[2] = vel.sample(rng);
        p[3] = vel.sample(rng);
    }
    for (i, p) in prior.chunks_exact(DIM).enumerate() {
        state.state_unpack(i, p)?;
    }
    Ok(())
}

/// Reusable buffers for the weighting step.
#[derive(Debug, Clone, Default)]
pub struct Likelihood {
    pos_x: Vec<f64>,
    pos_y: Vec<f64>,
    values: Vec<f64>,
}

impl Likelihood {
    /// Log-likelihood of every particle against observation `obs`.
    pub fn evaluate<M: StateMatrix<Value = f64>>(&mut self, state: &M, obs: [f64; 2]) -> Result<&[f64]> {
        self.pos_x.clear();
        self.pos_y.clear();
        state.read_state(0, &mut self.pos_x)?;
        state.read_state(1, &mut self.pos_y)?;

        self.pos_x
            .par_iter()
            .zip(self.pos_y.par_iter())
            .map(|(&px, &py)| log_likelihood(px, py, obs[0], obs[1]))
            .collect_into_vec(&mut self.values);
        Ok(self.values.as_slice())
    }

    /// Positions read by the last evaluation.
    pub fn positions(&self) -> (&[f64], &[f64]) {
        (&self.pos_x, &self.pos_y)
    }
}

/// Synthetic ground truth and its observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub truth: Vec<[f64; 2]>,
    pub observations: Vec<[f64; 2]>,
}

impl Track {
    /// Simulates `steps` states from the model and observes each one.
    pub fn simulate(steps: usize, rng: &mut SmcRng) -> Result<Self> {
        let pos_noise = Normal::new(0.0, VAR_POS.sqrt())?;
        let vel_noise = Normal::new(0.0, VAR_VEL.sqrt())?;
        let obs_noise = StudentT::new(NU)
            .map_err(|e| CliError::InvalidArgument(format!("observation noise: {}", e)))?;

        let mut x = [
            Normal::new(0.0, SD_POS0)?.sample(rng),
            Normal::new(0.0, SD_POS0)?.sample(rng),
            Normal::new(0.0, SD_VEL0)?.sample(rng),
            Normal::new(0.0, SD_VEL0)?.sample(rng),
        ];

        let mut truth = Vec::with_capacity(steps);
        let mut observations = Vec::with_capacity(steps);
        for t in 0..steps {
            if t > 0 {
                x[0] += pos_noise.sample(rng) + DELTA * x[2];
                x[1] += pos_noise.sample(rng) + DELTA * x[3];
                x[2] += vel_noise.sample(rng);
                x[3] += vel_noise.sample(rng);
            }
            truth.push([x[0], x[1]]);
            let ox: f64 = obs_noise.sample(rng);
            let oy: f64 = obs_noise.sample(rng);
            observations.push([x[0] + ox / SCALE, x[1] + oy / SCALE]);
        }
        Ok(Self {
            truth,
            observations,
        })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the track is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
