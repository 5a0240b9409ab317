use std::sync::OnceLock;

use crate::error::{ConfigError, Result};

static GLOBAL: OnceLock<Tolerance> = OnceLock::new();

/// Comparison tolerance shared by equality and hashing of points and vectors.
///
/// Two coordinates are equal when they differ by less than `epsilon`.
/// Hashing rounds each coordinate to `sig_figures` decimal digits so that
/// values within `epsilon` of each other usually land on the same hash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    epsilon: f64,
    sig_figures: u32,
}

impl Tolerance {
    /// Tolerance used when nothing has been installed.
    pub const DEFAULT: Self = Self {
        epsilon: 1e-10,
        sig_figures: 10,
    };

    /// Creates a validated tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` is not finite and positive, if
    /// `sig_figures` is outside `1..=15`, or if `epsilon` is wider than the
    /// rounding step `10^-sig_figures` (values equal under epsilon would
    /// then round to different hashes).
    pub fn new(epsilon: f64, sig_figures: u32) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(epsilon).into());
        }
        if !(1..=15).contains(&sig_figures) {
            return Err(ConfigError::InvalidSigFigures(sig_figures).into());
        }
        // Slack absorbs rounding in products like 1e-10 * 1e10.
        if epsilon * rounding_scale(sig_figures) > 1.0 + 1e-9 {
            return Err(ConfigError::EpsilonExceedsRounding {
                epsilon,
                sig_figures,
            }
            .into());
        }
        Ok(Self {
            epsilon,
            sig_figures,
        })
    }

    /// Returns the process-wide tolerance.
    ///
    /// The first call fixes the value: either the one passed to
    /// [`Tolerance::install`] or [`Tolerance::DEFAULT`].
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::DEFAULT)
    }

    /// Installs `self` as the process-wide tolerance.
    ///
    /// Must happen before any equality or hashing reads the global.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyInstalled`] if the global tolerance has
    /// already been installed or read.
    pub fn install(self) -> Result<()> {
        GLOBAL
            .set(self)
            .map_err(|_| ConfigError::AlreadyInstalled)?;
        tracing::debug!(
            epsilon = self.epsilon,
            sig_figures = self.sig_figures,
            "installed global tolerance"
        );
        Ok(())
    }

    /// Maximum absolute difference still considered equal.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of decimal digits kept when hashing.
    #[must_use]
    pub fn sig_figures(&self) -> u32 {
        self.sig_figures
    }

    /// Returns whether `a` and `b` differ by less than epsilon.
    #[must_use]
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.epsilon
    }

    /// Rounds `value` to `sig_figures` decimal digits.
    ///
    /// Negative zero is folded into positive zero so both hash alike.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        let scale = rounding_scale(self.sig_figures);
        let scaled = value * scale;
        if !scaled.is_finite() {
            return value + 0.0;
        }
        scaled.round() / scale + 0.0
    }

    /// Feeds three coordinates into `state`.
    ///
    /// Each rounded coordinate is hashed along with the three pairwise
    /// products of rounded coordinates, so that permuted triples such as
    /// `(1, 2, 0)` and `(2, 1, 0)` keep distinct fingerprints. `order`
    /// selects which index pairs form the products.
    pub(crate) fn hash_triple<H: std::hash::Hasher>(
        &self,
        coords: [f64; 3],
        order: [(usize, usize); 3],
        state: &mut H,
    ) {
        let r = coords.map(|c| self.round(c));
        for c in r {
            state.write_u64(c.to_bits());
        }
        for (i, j) in order {
            state.write_u64((r[i] * r[j] + 0.0).to_bits());
        }
    }
}

/// Number of rounding buckets per unit, `10^sig_figures`.
fn rounding_scale(sig_figures: u32) -> f64 {
    // sig_figures <= 15, so the cast is lossless.
    #[allow(clippy::cast_possible_wrap)]
    let exp = sig_figures as i32;
    10f64.powi(exp)
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
