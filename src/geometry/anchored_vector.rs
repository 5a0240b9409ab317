use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::Result;
use crate::math::Tolerance;

use super::{Point, Vector};

/// A [`Vector`] tied to an anchor [`Point`].
///
/// The end point `anchor + vector` is kept in step with every mutation.
/// Moving slides the anchor without changing the displacement; rotating
/// turns the displacement about the origin and, when a center is given,
/// also carries the anchor around that center.
#[derive(Debug, Clone, Copy)]
pub struct AnchoredVector {
    vector: Vector,
    anchor: Point,
    end_point: Point,
}

impl AnchoredVector {
    /// Creates an anchored vector. The anchor defaults to the origin.
    #[must_use]
    pub fn new(vector: impl Into<Vector>, anchor: Option<Point>) -> Self {
        let vector = vector.into();
        let anchor = anchor.unwrap_or_else(Point::origin);
        Self {
            vector,
            anchor,
            end_point: anchor + vector,
        }
    }

    /// The vector from `tail` to `head`, anchored at `tail`.
    #[must_use]
    pub fn from_points(tail: Point, head: Point) -> Self {
        Self::new(Vector::between(&tail, &head), Some(tail))
    }

    /// The free displacement.
    #[must_use]
    pub fn vector(&self) -> &Vector {
        &self.vector
    }

    /// Returns the anchor point (the tail).
    #[must_use]
    pub fn anchor(&self) -> &Point {
        &self.anchor
    }

    /// `anchor + vector`.
    #[must_use]
    pub fn end_point(&self) -> &Point {
        &self.end_point
    }

    /// Returns the length of the displacement.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector.length()
    }

    /// Slides the anchor by `displacement`; the vector itself is unchanged.
    pub fn move_by(&mut self, displacement: impl Into<Vector>) {
        self.anchor.move_by(displacement);
        self.sync();
        tracing::trace!(result = %self, "moved anchored vector");
    }

    /// Rotates the displacement by `angle` radians about `axis` through the
    /// origin. With a `center`, the anchor is also rotated about that
    /// center; without one it stays where it is.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::InvalidAxis`] if the axis has no
    /// direction. Nothing is modified in that case.
    pub fn rotate(
        &mut self,
        angle: f64,
        axis: impl Into<Vector>,
        center: Option<&Point>,
    ) -> Result<()> {
        let axis = axis.into();
        let vector = self.vector.rotated(angle, axis)?;
        let mut anchor = self.anchor;
        if center.is_some() {
            anchor.rotate(angle, axis, center)?;
        }
        self.vector = vector;
        self.anchor = anchor;
        self.sync();
        tracing::trace!(angle, %axis, result = %self, "rotated anchored vector");
        Ok(())
    }

    /// Compares vector, anchor and end point against an explicit tolerance.
    #[must_use]
    pub fn approx_eq_with(&self, other: &Self, tol: &Tolerance) -> bool {
        self.vector.approx_eq_with(&other.vector, tol)
            && self.anchor.approx_eq_with(&other.anchor, tol)
            && self.end_point.approx_eq_with(&other.end_point, tol)
    }

    /// Hashes vector and anchor using an explicit tolerance.
    pub fn hash_with<H: Hasher>(&self, state: &mut H, tol: &Tolerance) {
        self.vector.hash_with(state, tol);
        self.anchor.hash_with(state, tol);
    }

    fn sync(&mut self) {
        self.end_point = self.anchor + self.vector;
    }
}

impl PartialEq for AnchoredVector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq_with(other, Tolerance::global())
    }
}

impl Eq for AnchoredVector {}

impl Hash for AnchoredVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(state, Tolerance::global());
    }
}

impl fmt::Display for AnchoredVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnchoredVector({}, {}, {}, anchor={})",
            self.vector.x(),
            self.vector.y(),
            self.vector.z(),
            self.anchor
        )
    }
}

/// Anchored at the origin.
impl From<Vector> for AnchoredVector {
    fn from(vector: Vector) -> Self {
        Self::new(vector, None)
    }
}

impl Add<Vector> for AnchoredVector {
    type Output = AnchoredVector;

    fn add(self, rhs: Vector) -> AnchoredVector {
        AnchoredVector::new(self.vector + rhs, Some(self.anchor))
    }
}

impl Sub<Vector> for AnchoredVector {
    type Output = AnchoredVector;

    fn sub(self, rhs: Vector) -> AnchoredVector {
        AnchoredVector::new(self.vector - rhs, Some(self.anchor))
    }
}

impl Mul<f64> for AnchoredVector {
    type Output = AnchoredVector;

    fn mul(self, rhs: f64) -> AnchoredVector {
        AnchoredVector::new(self.vector * rhs, Some(self.anchor))
    }
}

impl Neg for AnchoredVector {
    type Output = AnchoredVector;

    fn neg(self) -> AnchoredVector {
        AnchoredVector::new(-self.vector, Some(self.anchor))
    }
}
