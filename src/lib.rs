//! 3D points, free vectors and anchored vectors.
//!
//! Equality between points and vectors is tolerant (see [`Tolerance`]) and
//! hashing is kept consistent with it, so both types can key hash maps.
//! Rotations are built by [`math::rotation_matrix`].

pub mod error;
pub mod geometry;
pub mod math;

pub use error::{Geom3dError, Result};
pub use geometry::{AnchoredVector, Point, Vector};
pub use math::Tolerance;
