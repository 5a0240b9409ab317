use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Index, IndexMut, Sub};
use std::str::FromStr;

use crate::error::{Geom3dError, Result};
use crate::math::{rotation_matrix, transform_point, Point3, Tolerance};

use super::parse::{parse_triple, triple_from_slice};
use super::{AnchoredVector, Vector};

/// An absolute position in 3D space.
///
/// Coordinates live in a single backing triple; the named accessors and
/// indexing read and write the same storage. Equality and hashing follow
/// the same tolerance rules as [`Vector`].
#[derive(Debug, Clone, Copy)]
pub struct Point {
    p: Point3,
}

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            p: Point3::new(x, y, z),
        }
    }

    /// Returns a fresh point at `(0, 0, 0)`.
    #[must_use]
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Returns the x coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.p.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.p.y
    }

    /// Returns the z coordinate.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.p.z
    }

    /// Sets the x coordinate.
    pub fn set_x(&mut self, value: f64) {
        self.p.x = value;
    }

    /// Sets the y coordinate.
    pub fn set_y(&mut self, value: f64) {
        self.p.y = value;
    }

    /// Sets the z coordinate.
    pub fn set_z(&mut self, value: f64) {
        self.p.z = value;
    }

    /// Returns the coordinates as an array.
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.p.x, self.p.y, self.p.z]
    }

    /// Returns the underlying `nalgebra` point.
    #[must_use]
    pub fn as_raw(&self) -> &Point3 {
        &self.p
    }

    /// The displacement from the origin to this point.
    ///
    /// The result is a copy; changing it does not move the point.
    #[must_use]
    pub fn position_vector(&self) -> Vector {
        Vector::from(self.p.coords)
    }

    /// Moves this point by `displacement` and returns the moved position.
    ///
    /// The point is changed in place; the returned copy is for chaining.
    pub fn move_by(&mut self, displacement: impl Into<Vector>) -> Point {
        let d = displacement.into();
        self.p += *d.as_raw();
        tracing::trace!(%d, result = %self, "moved point");
        *self
    }

    /// Rotates this point by `angle` radians about `axis`, passing through
    /// `center` (the origin when `None`), and returns the new position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::InvalidAxis`] if the axis has no
    /// direction. The point is left untouched in that case.
    pub fn rotate(
        &mut self,
        angle: f64,
        axis: impl Into<Vector>,
        center: Option<&Point>,
    ) -> Result<Point> {
        let axis = axis.into();
        let matrix = rotation_matrix(angle, axis.as_raw(), center.map(Point::as_raw))?;
        self.p = transform_point(&self.p, &matrix);
        tracing::trace!(angle, %axis, ?center, result = %self, "rotated point");
        Ok(*self)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.p.x - other.p.x).powi(2)
            + (self.p.y - other.p.y).powi(2)
            + (self.p.z - other.p.z).powi(2))
        .sqrt()
    }

    /// The vector from this point to `other`, anchored here.
    #[must_use]
    pub fn vector_to(&self, other: &Point) -> AnchoredVector {
        AnchoredVector::from_points(*self, *other)
    }

    /// Coordinate-wise comparison against an explicit tolerance.
    #[must_use]
    pub fn approx_eq_with(&self, other: &Self, tol: &Tolerance) -> bool {
        (0..3).all(|i| tol.approx_eq(self.p[i], other.p[i]))
    }

    /// Hashes the rounded coordinates using an explicit tolerance.
    pub fn hash_with<H: Hasher>(&self, state: &mut H, tol: &Tolerance) {
        "Point".hash(state);
        tol.hash_triple(self.to_array(), [(0, 1), (0, 2), (1, 2)], state);
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq_with(other, Tolerance::global())
    }
}

// See the note on `Eq for Vector`.
impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(state, Tolerance::global());
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {}, {})", self.p.x, self.p.y, self.p.z)
    }
}

impl FromStr for Point {
    type Err = Geom3dError;

    fn from_str(s: &str) -> Result<Self> {
        parse_triple(s, "Point").map(Self::from)
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.p[index]
    }
}

impl IndexMut<usize> for Point {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.p[index]
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

/// The point reached by moving the origin by `v`.
impl From<Vector> for Point {
    fn from(v: Vector) -> Self {
        Self {
            p: Point3::from(*v.as_raw()),
        }
    }
}

impl From<Point3> for Point {
    fn from(p: Point3) -> Self {
        Self { p }
    }
}

impl From<Point> for Point3 {
    fn from(p: Point) -> Self {
        p.p
    }
}

impl TryFrom<&[f64]> for Point {
    type Error = Geom3dError;

    fn try_from(values: &[f64]) -> Result<Self> {
        triple_from_slice(values, "Point").map(Self::from)
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = Geom3dError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::try_from(values.as_slice())
    }
}

/// `b - a` is the vector leading from `a` to `b`.
impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::between(&rhs, &self)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point {
            p: self.p + *rhs.as_raw(),
        }
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point {
            p: self.p - *rhs.as_raw(),
        }
    }
}
