//! Standard uniform variates with explicit endpoint conventions.
//!
//! Every conversion consumes exactly one 64-bit word and uses 53 (or 52 for
//! the open interval) of its bits, so the four conventions are each exact
//! grids of evenly spaced doubles.

use rand::RngCore;

/// 2^-53.
const EPS53: f64 = 1.0 / (1u64 << 53) as f64;
/// 2^-52.
const EPS52: f64 = 1.0 / (1u64 << 52) as f64;
/// 2^53 - 1.
const MAX53: f64 = ((1u64 << 53) - 1) as f64;

/// Which endpoints of the unit interval may be produced.
///
/// # Examples
///
/// ```rust
/// use smc_random::rng::U01Interval;
///
/// assert_eq!(U01Interval::OpenClosed.from_bits(0), 1.0 / (1u64 << 53) as f64);
/// assert_eq!(U01Interval::OpenClosed.from_bits(u64::MAX), 1.0);
/// assert_eq!(U01Interval::ClosedOpen.from_bits(0), 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum U01Interval {
    /// `[0, 1]`.
    Closed,
    /// `[0, 1)`.
    #[default]
    ClosedOpen,
    /// `(0, 1]`.
    OpenClosed,
    /// `(0, 1)`.
    Open,
}

impl U01Interval {
    /// Maps one raw 64-bit word onto the interval.
    #[inline]
    pub fn from_bits(self, bits: u64) -> f64 {
        match self {
            Self::Closed => (bits >> 11) as f64 / MAX53,
            Self::ClosedOpen => (bits >> 11) as f64 * EPS53,
            Self::OpenClosed => ((bits >> 11) + 1) as f64 * EPS53,
            Self::Open => ((bits >> 12) as f64 + 0.5) * EPS52,
        }
    }

    /// Draws one variate from any bit source.
    #[inline]
    pub fn sample<R: RngCore + ?Sized>(self, rng: &mut R) -> f64 {
        self.from_bits(rng.next_u64())
    }
}
