use thiserror::Error;

/// Top-level error type for the geom3d primitives.
#[derive(Debug, Error)]
pub enum Geom3dError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while building or operating on points and vectors.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("{kind} takes {expected} components, got {found}")]
    InvalidArity {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("expected a {expected}, found a {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("invalid rotation axis: {0}")]
    InvalidAxis(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("cannot parse coordinates: {0}")]
    Parse(String),
}

/// Errors related to the tolerance configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),

    #[error("significant figures must be in 1..=15, got {0}")]
    InvalidSigFigures(u32),

    #[error("epsilon {epsilon} is wider than the hash rounding step 1e-{sig_figures}")]
    EpsilonExceedsRounding { epsilon: f64, sig_figures: u32 },

    #[error("global tolerance is already in use")]
    AlreadyInstalled,
}

/// Convenience type alias for results using [`Geom3dError`].
pub type Result<T> = std::result::Result<T, Geom3dError>;
