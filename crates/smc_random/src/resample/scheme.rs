//! Replication-count algorithms.
//!
//! Each algorithm turns normalised weights `w` (length `m`, summing to one)
//! into counts summing to `n`. They share one primitive: walking a sorted
//! set of points in `[0, 1)` against the cumulative weights.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::rng::SmcRng;

/// Resampling algorithm.
///
/// # Examples
///
/// ```rust
/// use smc_random::resample::ResampleScheme;
///
/// let scheme: ResampleScheme = "residual-systematic".parse().unwrap();
/// assert_eq!(scheme, ResampleScheme::ResidualSystematic);
/// assert_eq!(scheme.to_string(), "residual_systematic");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResampleScheme {
    /// `n` independent draws from the weights.
    Multinomial,
    /// One uniform draw in each of `n` equal strata.
    #[default]
    Stratified,
    /// One uniform offset shared by `n` equally spaced points.
    Systematic,
    /// Deterministic `floor(n w)` copies, residual by multinomial draws.
    Residual,
    /// Deterministic copies, residual by stratified draws.
    ResidualStratified,
    /// Deterministic copies, residual by systematic draws.
    ResidualSystematic,
}

impl ResampleScheme {
    /// All schemes, in declaration order.
    pub const ALL: [ResampleScheme; 6] = [
        Self::Multinomial,
        Self::Stratified,
        Self::Systematic,
        Self::Residual,
        Self::ResidualStratified,
        Self::ResidualSystematic,
    ];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multinomial => "multinomial",
            Self::Stratified => "stratified",
            Self::Systematic => "systematic",
            Self::Residual => "residual",
            Self::ResidualStratified => "residual_stratified",
            Self::ResidualSystematic => "residual_systematic",
        }
    }
}

impl fmt::Display for ResampleScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown resampling scheme name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unknown resampling scheme '{0}'")]
pub struct ParseSchemeError(pub String);

impl FromStr for ResampleScheme {
    type Err = ParseSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == name)
            .ok_or_else(|| ParseSchemeError(s.to_string()))
    }
}

/// Counts how many of the sorted points `u` fall into each weight bin.
///
/// Points beyond the last positive weight (possible only through rounding
/// of the cumulative sum) go to that last positive bin, so a zero weight
/// never receives offspring.
pub(crate) fn count_sorted(w: &[f64], u: &[f64], replication: &mut [usize]) {
    replication.fill(0);
    let Some(last) = w.iter().rposition(|&x| x > 0.0) else {
        return;
    };

    let mut j = 0;
    let mut acc = w[0];
    for &x in u {
        while j < last && x >= acc {
            j += 1;
            acc += w[j];
        }
        replication[j] += 1;
    }
}

/// `n` sorted independent uniforms, via normalised exponential spacings.
fn sorted_uniforms(n: usize, rng: &mut SmcRng, u: &mut Vec<f64>) {
    u.clear();
    if n == 0 {
        return;
    }
    let mut acc = 0.0;
    for _ in 0..n {
        acc += -rng.gen_u01(crate::rng::U01Interval::OpenClosed).ln();
        u.push(acc);
    }
    acc += -rng.gen_u01(crate::rng::U01Interval::OpenClosed).ln();
    for x in u.iter_mut() {
        *x /= acc;
    }
}

fn stratified_points(n: usize, rng: &mut SmcRng, u: &mut Vec<f64>) {
    u.clear();
    let delta = 1.0 / n as f64;
    u.extend((0..n).map(|i| (i as f64 + rng.gen_uniform()) * delta));
}

fn systematic_points(n: usize, rng: &mut SmcRng, u: &mut Vec<f64>) {
    u.clear();
    let delta = 1.0 / n as f64;
    let offset = rng.gen_uniform();
    u.extend((0..n).map(|i| (i as f64 + offset) * delta));
}

/// Scratch buffers reused across resampling steps.
#[derive(Clone, Debug, Default)]
pub(crate) struct Scratch {
    u: Vec<f64>,
    residual: Vec<f64>,
    counts: Vec<usize>,
}

/// Fills `replication` (length `w.len()`) with counts summing to `n`.
pub(crate) fn replicate(
    scheme: ResampleScheme,
    w: &[f64],
    n: usize,
    rng: &mut SmcRng,
    scratch: &mut Scratch,
    replication: &mut [usize],
) {
    match scheme {
        ResampleScheme::Multinomial => {
            sorted_uniforms(n, rng, &mut scratch.u);
            count_sorted(w, &scratch.u, replication);
        }
        ResampleScheme::Stratified => {
            stratified_points(n, rng, &mut scratch.u);
            count_sorted(w, &scratch.u, replication);
        }
        ResampleScheme::Systematic => {
            systematic_points(n, rng, &mut scratch.u);
            count_sorted(w, &scratch.u, replication);
        }
        ResampleScheme::Residual
        | ResampleScheme::ResidualStratified
        | ResampleScheme::ResidualSystematic => {
            residual(scheme, w, n, rng, scratch, replication);
        }
    }
}

fn residual(
    scheme: ResampleScheme,
    w: &[f64],
    n: usize,
    rng: &mut SmcRng,
    scratch: &mut Scratch,
    replication: &mut [usize],
) {
    let nf = n as f64;
    scratch.residual.clear();
    let mut deterministic = 0;
    for (r, &wk) in replication.iter_mut().zip(w) {
        let scaled = nf * wk;
        let whole = scaled.floor();
        *r = whole as usize;
        deterministic += *r;
        scratch.residual.push(scaled - whole);
    }

    // Rounding can push the floor sum above n; trim from the largest.
    while deterministic > n {
        if let Some(k) = (0..replication.len()).max_by_key(|&k| replication[k]) {
            replication[k] -= 1;
            deterministic -= 1;
        }
    }

    let rest = n - deterministic;
    if rest == 0 {
        return;
    }
    let total: f64 = scratch.residual.iter().sum();
    if total <= 0.0 {
        // Fractions vanished through rounding: give the rest to the heaviest.
        if let Some(k) = (0..w.len()).max_by(|&a, &b| w[a].total_cmp(&w[b])) {
            replication[k] += rest;
        }
        return;
    }
    for x in &mut scratch.residual {
        *x /= total;
    }

    match scheme {
        ResampleScheme::ResidualStratified => stratified_points(rest, rng, &mut scratch.u),
        ResampleScheme::ResidualSystematic => systematic_points(rest, rng, &mut scratch.u),
        _ => sorted_uniforms(rest, rng, &mut scratch.u),
    }
    scratch.counts.resize(w.len(), 0);
    count_sorted(&scratch.residual, &scratch.u, &mut scratch.counts);
    for (r, c) in replication.iter_mut().zip(&scratch.counts) {
        *r += c;
    }
}
