//! Filter command implementation
//!
//! Runs a bootstrap particle filter over a synthetic constant-velocity track
//! and reports the tracking error.

use std::fmt;
use std::time::{Duration, Instant};

use smc_core::{ColMajorMatrix, Fixed, MatrixLayout, RowMajorMatrix};
use smc_random::{ResampleScheme, Resampler, SmcRng, Weights};
use tracing::{debug, info};

use crate::config::FilterConfig;
use crate::model::{initialise, Likelihood, MoveNoise, Track, TrackingState, DIM};
use crate::Result;

/// Outcome of one filter run
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport {
    pub particles: usize,
    pub steps: usize,
    pub layout: MatrixLayout,
    pub scheme: ResampleScheme,
    /// Mean Euclidean distance between estimated and true positions
    pub error: f64,
    /// Number of steps at which the population was resampled
    pub resamples: usize,
    /// Weighted position estimate at every step
    pub estimates: Vec<[f64; 2]>,
    pub elapsed: Duration,
}

impl FilterReport {
    /// Column headers matching the `Display` output
    pub fn header() -> String {
        format!(
            "{:<10}{:<22}{:<12}{:>12}{:>12}{:>12}",
            "N", "Scheme", "Layout", "Error", "Resamples", "Time (s)"
        )
    }
}

impl fmt::Display for FilterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10}{:<22}{:<12}{:>12.6}{:>12}{:>12.6}",
            self.particles,
            self.scheme.as_str(),
            self.layout.as_str(),
            self.error,
            self.resamples,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Run the filter command
pub fn run(config: &FilterConfig) -> Result<FilterReport> {
    info!("Starting particle filter...");
    info!("  Particles: {}", config.particles);
    info!("  Steps: {}", config.steps);
    info!("  Layout: {}", config.layout);
    info!("  Scheme: {} (threshold {})", config.scheme, config.threshold);
    info!("  Seed: {}", config.seed);

    let report = simulate(config)?;

    println!("{}", FilterReport::header());
    println!("{}", report);

    info!(
        error = report.error,
        resamples = report.resamples,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Filter complete"
    );
    Ok(report)
}

/// Runs the filter without printing anything
pub fn simulate(config: &FilterConfig) -> Result<FilterReport> {
    config.validate()?;
    match config.layout {
        MatrixLayout::RowMajor => run_with::<RowMajorMatrix<f64, Fixed<DIM>>>(config),
        MatrixLayout::ColMajor => run_with::<ColMajorMatrix<f64, Fixed<DIM>>>(config),
    }
}

fn run_with<M: TrackingState>(config: &FilterConfig) -> Result<FilterReport> {
    let master = SmcRng::from_seed(config.seed);
    let track = Track::simulate(config.steps, &mut master.split(0))?;
    let mut rng = master.split(1);

    let n = config.particles;
    let mut state = M::with_particles(n);
    let mut weights = Weights::new(n);
    let mut resampler = Resampler::from_config(&config.resample_config()?);
    let mut likelihood = Likelihood::default();
    let mut noise = MoveNoise::default();

    let mut estimates = Vec::with_capacity(track.len());
    let mut resamples = 0;

    let start = Instant::now();
    for (t, &obs) in track.observations.iter().enumerate() {
        if t == 0 {
            initialise(&mut state, &mut rng)?;
        } else {
            noise.draw(n, &mut rng)?;
            state.apply_move(&noise);
        }

        weights.add_log(likelihood.evaluate(&state, obs)?)?;

        let (pos_x, pos_y) = likelihood.positions();
        let w = weights.data();
        let estimate = [
            pos_x.iter().zip(w).map(|(x, w)| x * w).sum::<f64>(),
            pos_y.iter().zip(w).map(|(y, w)| y * w).sum::<f64>(),
        ];
        estimates.push(estimate);

        if let Some(index) = resampler.resample_if_degenerate(&mut weights, &mut rng)? {
            state.select(n, Some(&index))?;
            resamples += 1;
        }
        debug!(step = t, ess = weights.ess(), "step complete");
    }
    let elapsed = start.elapsed();

    let error = estimates
        .iter()
        .zip(&track.truth)
        .map(|(e, x)| ((e[0] - x[0]).powi(2) + (e[1] - x[1]).powi(2)).sqrt())
        .sum::<f64>()
        / track.len() as f64;

    Ok(FilterReport {
        particles: n,
        steps: config.steps,
        layout: M::LAYOUT,
        scheme: config.scheme,
        error,
        resamples,
        estimates,
        elapsed,
    })
}
