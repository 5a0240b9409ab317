use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};
use std::str::FromStr;

use crate::error::{Geom3dError, GeometryError, Result};
use crate::math::{rotation_matrix, transform_direction, Tolerance, Vector3};

use super::parse::{parse_triple, triple_from_slice};
use super::Point;

/// A free displacement in 3D space.
///
/// A vector has no location, only direction and magnitude. Equality is
/// tolerant: two vectors are equal when every component differs by less
/// than the global [`Tolerance`] epsilon, and hashing rounds components so
/// that equal vectors hash alike.
#[derive(Debug, Clone, Copy)]
pub struct Vector {
    v: Vector3,
}

impl Vector {
    /// Creates a vector from its components.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            v: Vector3::new(x, y, z),
        }
    }

    /// The zero vector `(0, 0, 0)`.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// The unit vector `(1, 0, 0)`.
    #[must_use]
    pub fn x_unit() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// The unit vector `(0, 1, 0)`.
    #[must_use]
    pub fn y_unit() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// The unit vector `(0, 0, 1)`.
    #[must_use]
    pub fn z_unit() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// The displacement leading from `tail` to `head`, i.e. `head - tail`.
    #[must_use]
    pub fn between(tail: &Point, head: &Point) -> Self {
        Self {
            v: *head.as_raw() - *tail.as_raw(),
        }
    }

    /// Returns the x component.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.v.x
    }

    /// Returns the y component.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.v.y
    }

    /// Returns the z component.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.v.z
    }

    /// Sets the x component.
    pub fn set_x(&mut self, value: f64) {
        self.v.x = value;
    }

    /// Sets the y component.
    pub fn set_y(&mut self, value: f64) {
        self.v.y = value;
    }

    /// Sets the z component.
    pub fn set_z(&mut self, value: f64) {
        self.v.z = value;
    }

    /// Returns the components as an array.
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.v.x, self.v.y, self.v.z]
    }

    /// Returns the underlying `nalgebra` vector.
    #[must_use]
    pub fn as_raw(&self) -> &Vector3 {
        &self.v
    }

    /// Dot product. Also available as `u * v`.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.v.dot(&other.v)
    }

    /// Right-handed cross product `self × other`.
    ///
    /// Not commutative: `a.cross(&b) == -b.cross(&a)`.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        let (a, b) = (&self.v, &other.v);
        Self::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    /// Euclidean length, `sqrt(self · self)`.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the length is below epsilon.
    pub fn normalized(&self) -> Result<Self> {
        let len = self.length();
        if len.is_nan() || len < Tolerance::global().epsilon() {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(*self / len)
    }

    /// Returns whether the two vectors are parallel (or anti-parallel).
    ///
    /// The zero vector is parallel to everything. The tolerance is scaled by
    /// `self.length()` only, so `a.parallel(&b)` and `b.parallel(&a)` can
    /// disagree for vectors of very different lengths; see
    /// [`Vector::parallel_symmetric`].
    #[must_use]
    pub fn parallel(&self, other: &Self) -> bool {
        let zero = Self::zero();
        if *self == zero || *other == zero || self == other {
            return true;
        }
        let (a, b) = (self.length(), other.length());
        (self.dot(other).abs() - a * b).abs() < Tolerance::global().epsilon() * a
    }

    /// Like [`Vector::parallel`], with the tolerance scaled by the longer
    /// of the two vectors so the result does not depend on operand order.
    #[must_use]
    pub fn parallel_symmetric(&self, other: &Self) -> bool {
        let zero = Self::zero();
        if *self == zero || *other == zero || self == other {
            return true;
        }
        let (a, b) = (self.length(), other.length());
        (self.dot(other).abs() - a * b).abs() < Tolerance::global().epsilon() * a.max(b)
    }

    /// Returns whether `|self · other|` is below epsilon.
    #[must_use]
    pub fn orthogonal(&self, other: &Self) -> bool {
        self.dot(other).abs() < Tolerance::global().epsilon()
    }

    /// Angle between the two vectors in radians, within `[0, π]`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if either vector has zero length.
    pub fn angle(&self, other: &Self) -> Result<f64> {
        let eps = Tolerance::global().epsilon();
        let (a, b) = (self.length(), other.length());
        if a.is_nan() || b.is_nan() || a < eps || b < eps {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok((self.dot(other) / (a * b)).clamp(-1.0, 1.0).acos())
    }

    /// Rotates this vector in place by `angle` radians about `axis`.
    ///
    /// Vectors carry no location, so the rotation is always about the
    /// origin.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidAxis`] if the axis has no direction.
    /// The vector is left untouched in that case.
    pub fn rotate(&mut self, angle: f64, axis: impl Into<Vector>) -> Result<()> {
        let axis = axis.into();
        let matrix = rotation_matrix(angle, &axis.v, None)?;
        self.v = transform_direction(&self.v, &matrix);
        tracing::trace!(angle, %axis, result = %self, "rotated vector");
        Ok(())
    }

    /// Returns a copy rotated by `angle` radians about `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidAxis`] if the axis has no direction.
    pub fn rotated(&self, angle: f64, axis: impl Into<Vector>) -> Result<Self> {
        let mut out = *self;
        out.rotate(angle, axis)?;
        Ok(out)
    }

    /// Component-wise comparison against an explicit tolerance.
    #[must_use]
    pub fn approx_eq_with(&self, other: &Self, tol: &Tolerance) -> bool {
        (0..3).all(|i| tol.approx_eq(self.v[i], other.v[i]))
    }

    /// Hashes the rounded components using an explicit tolerance.
    pub fn hash_with<H: Hasher>(&self, state: &mut H, tol: &Tolerance) {
        "Vector".hash(state);
        tol.hash_triple(self.to_array(), [(0, 1), (1, 2), (2, 0)], state);
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq_with(other, Tolerance::global())
    }
}

// Tolerant equality is not transitive; `Eq` is provided so vectors can key
// hash maps, where the rounding in `Hash` decides buckets.
impl Eq for Vector {}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(state, Tolerance::global());
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({}, {}, {})", self.v.x, self.v.y, self.v.z)
    }
}

impl FromStr for Vector {
    type Err = Geom3dError;

    fn from_str(s: &str) -> Result<Self> {
        parse_triple(s, "Vector").map(Self::from)
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.v[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.v[index]
    }
}

impl From<[f64; 3]> for Vector {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vector {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(Point, Point)> for Vector {
    fn from((tail, head): (Point, Point)) -> Self {
        Self::between(&tail, &head)
    }
}

impl From<Vector3> for Vector {
    fn from(v: Vector3) -> Self {
        Self { v }
    }
}

impl From<Vector> for Vector3 {
    fn from(v: Vector) -> Self {
        v.v
    }
}

impl TryFrom<&[f64]> for Vector {
    type Error = Geom3dError;

    fn try_from(values: &[f64]) -> Result<Self> {
        triple_from_slice(values, "Vector").map(Self::from)
    }
}

impl TryFrom<Vec<f64>> for Vector {
    type Error = Geom3dError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::try_from(values.as_slice())
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector { v: self.v + rhs.v }
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector { v: self.v - rhs.v }
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector { v: -self.v }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector { v: self.v * rhs }
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

/// `u * v` is the dot product.
impl Mul for Vector {
    type Output = f64;

    fn mul(self, rhs: Vector) -> f64 {
        self.dot(&rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector { v: self.v / rhs }
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.v += rhs.v;
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        self.v -= rhs.v;
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, rhs: f64) {
        self.v *= rhs;
    }
}

impl DivAssign<f64> for Vector {
    fn div_assign(&mut self, rhs: f64) {
        self.v /= rhs;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use approx::assert_relative_eq;

    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z)
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut h = DefaultHasher::new();
        value.hash(&mut h);
        h.finish()
    }

    #[test]
    fn zero_and_units() {
        assert_eq!(Vector::zero(), v(0.0, 0.0, 0.0));
        assert_eq!(Vector::x_unit().cross(&Vector::y_unit()), Vector::z_unit());
    }

    #[test]
    fn index_and_named_accessors_share_storage() {
        let mut a = v(2.0, 3.0, 5.0);
        a[0] = 7.0;
        a.set_y(11.0);
        a[2] = 13.0;
        assert_eq!(a, v(7.0, 11.0, 13.0));
        assert!((a.x() - a[0]).abs() < f64::EPSILON);
        assert!((a[1] - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_points_is_head_minus_tail() {
        let a = Point::new(1.0, 1.0, 1.0);
        let b = Point::new(2.0, 4.0, 7.0);
        assert_eq!(Vector::from((a, b)), v(1.0, 3.0, 6.0));
        assert_eq!(Vector::between(&b, &a), v(-1.0, -3.0, -6.0));
    }

    #[test]
    fn sequence_constructors_agree() {
        let reference = v(1.0, 2.0, 3.0);
        assert_eq!(Vector::from([1.0, 2.0, 3.0]), reference);
        assert_eq!(Vector::from((1.0, 2.0, 3.0)), reference);
        assert_eq!(Vector::try_from(vec![1.0, 2.0, 3.0]).unwrap(), reference);
        assert_eq!(Vector::from(Vector3::new(1.0, 2.0, 3.0)), reference);
    }

    #[test]
    fn wrong_length_slice_is_arity_error() {
        let err = Vector::try_from(&[1.0, 2.0][..]).unwrap_err();
        assert!(matches!(
            err,
            Geom3dError::Geometry(GeometryError::InvalidArity { kind: "Vector", .. })
        ));
    }

    #[test]
    fn equality_within_epsilon() {
        assert_eq!(v(1.0, 2.0, 3.0), v(1.0, 2.0, 3.0 + 1e-12));
        assert_ne!(v(1.0, 2.0, 3.0), v(1.0, 2.0, 4.0));
        assert_ne!(v(1.0, 2.0, 3.0), v(1.0, 2.0, 3.0 + 1e-9));
    }

    #[test]
    fn explicit_tolerance_overrides_global() {
        let loose = Tolerance::new(1e-3, 3).unwrap();
        let a = v(1.0, 2.0, 3.0);
        let b = v(1.0, 2.0, 3.0004);
        assert!(a.approx_eq_with(&b, &loose));
        assert_ne!(a, b);
    }

    #[test]
    fn loose_tolerance_hashes_equal_vectors_alike() {
        let loose = Tolerance::new(1e-3, 3).unwrap();
        let hash_with = |x: &Vector| {
            let mut h = DefaultHasher::new();
            x.hash_with(&mut h, &loose);
            h.finish()
        };
        let a = v(1.0, 2.0, 3.0);
        for b in [v(1.0, 2.0, 3.0004), v(0.9996, 2.0002, 3.0), v(1.0, 1.9997, 2.9998)] {
            assert!(a.approx_eq_with(&b, &loose));
            assert_eq!(hash_with(&a), hash_with(&b), "{b}");
        }
    }

    #[test]
    fn equal_vectors_hash_alike() {
        assert_eq!(hash_of(&v(1.0, 2.0, 3.0)), hash_of(&v(1.0, 2.0, 3.0)));
        assert_eq!(hash_of(&v(0.0, -0.0, 1.0)), hash_of(&v(-0.0, 0.0, 1.0)));
        assert_eq!(
            hash_of(&v(0.1 + 0.2, 1.0, 1.0)),
            hash_of(&v(0.3, 1.0, 1.0))
        );
        assert_ne!(hash_of(&v(1.0, 2.0, 3.0)), hash_of(&v(1.0, 2.0, 4.0)));
    }

    #[test]
    fn hash_distinguishes_from_point() {
        let p = Point::new(1.0, 2.0, 3.0);
        assert_ne!(hash_of(&v(1.0, 2.0, 3.0)), hash_of(&p));
    }

    #[test]
    fn addition_and_subtraction() {
        assert_eq!(v(2.0, 3.0, 5.0) + v(7.0, 11.0, 13.0), v(9.0, 14.0, 18.0));
        assert_eq!(v(9.0, 14.0, 18.0) - v(7.0, 11.0, 13.0), v(2.0, 3.0, 5.0));
        let u = v(0.3, -1.7, 2.2);
        let w = v(5.5, 0.25, -3.0);
        assert_eq!((u + w) - w, u);
    }

    #[test]
    fn scalar_multiplication_commutes() {
        let a = v(2.0, 3.0, 5.0);
        assert_eq!(2.0 * a, v(4.0, 6.0, 10.0));
        assert_eq!(a * 2.0, 2.0 * a);
    }

    #[test]
    fn vector_product_is_dot() {
        let d = v(2.0, 3.0, 5.0) * v(7.0, 11.0, 13.0);
        assert!((d - (2.0 * 7.0 + 3.0 * 11.0 + 5.0 * 13.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn divide_and_negate() {
        assert_eq!(v(2.0, 3.0, 5.0) / 2.0, v(1.0, 1.5, 2.5));
        assert_eq!(-v(2.0, 3.0, 5.0), v(-2.0, -3.0, -5.0));
    }

    #[test]
    fn compound_assignment() {
        let mut a = v(1.0, 1.0, 1.0);
        a += v(1.0, 2.0, 3.0);
        a -= v(0.0, 0.0, 1.0);
        a *= 3.0;
        a /= 2.0;
        assert_eq!(a, v(3.0, 4.5, 4.5));
    }

    #[test]
    fn cross_product() {
        let a = v(2.0, 3.0, 5.0);
        let b = v(7.0, 11.0, 13.0);
        let c = a.cross(&b);
        assert_eq!(
            c,
            v(3.0 * 13.0 - 5.0 * 11.0, 5.0 * 7.0 - 2.0 * 13.0, 2.0 * 11.0 - 3.0 * 7.0)
        );
        assert!(c.orthogonal(&a));
        assert!(c.orthogonal(&b));
        assert_eq!(b.cross(&a), -c);
    }

    #[test]
    fn length_of_pythagorean_triple() {
        assert_relative_eq!(v(3.0, 4.0, 0.0).length(), 5.0);
    }

    #[test]
    fn normalized_has_unit_length() {
        let n = v(1.0, 1.0, 1.0).normalized().unwrap();
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert!(n.parallel(&v(1.0, 1.0, 1.0)));
    }

    #[test]
    fn normalizing_zero_is_an_error() {
        let err = Vector::zero().normalized().unwrap_err();
        assert!(matches!(err, Geom3dError::Geometry(GeometryError::ZeroVector)));
        assert!(v(f64::NAN, 0.0, 0.0).normalized().is_err());
    }

    #[test]
    fn parallel() {
        assert!(v(2.0, 3.0, 5.0).parallel(&v(4.0, 6.0, 10.0)));
        assert!(v(1.0, 0.0, 0.0).parallel(&v(10.0, 0.0, 0.0)));
        assert!(v(1.0, 0.0, 0.0).parallel(&v(-3.0, 0.0, 0.0)));
        assert!(!v(2.0, 3.0, 5.0).parallel(&v(4.0, 6.0, 11.0)));
        assert!(!v(1.0, 0.0, 0.0).parallel(&v(0.0, 1.0, 0.0)));
    }

    #[test]
    fn zero_is_parallel_to_everything() {
        assert!(Vector::zero().parallel(&v(1.0, 2.0, 3.0)));
        assert!(v(1.0, 2.0, 3.0).parallel(&Vector::zero()));
    }

    #[test]
    fn parallel_tolerance_depends_on_first_operand() {
        // |dot| - |a||b| is about 1.25e-10: within eps * 100 but not within
        // eps * 1e-3.
        let long = v(100.0, 0.0, 0.0);
        let short = v(1e-3, 5e-8, 0.0);
        assert!(long.parallel(&short) != short.parallel(&long));
        assert!(long.parallel_symmetric(&short));
        assert!(short.parallel_symmetric(&long));
    }

    #[test]
    fn orthogonal() {
        assert!(v(1.0, 0.0, 0.0).orthogonal(&v(0.0, 1.0, 1.0)));
        assert!(!v(1.0, 0.0, 0.0).orthogonal(&v(1.0, 0.0, 0.0)));
    }

    #[test]
    fn angle() {
        assert_relative_eq!(
            v(1.0, 0.0, 0.0).angle(&v(1.0, 0.0, 1.0)).unwrap(),
            FRAC_PI_4,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            v(1.0, 0.0, 0.0).angle(&v(-2.0, 0.0, 0.0)).unwrap(),
            PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn angle_of_nearly_identical_vectors_is_finite() {
        let a = v(0.1, 0.2, 0.3);
        let angle = a.angle(&(a * 3.0)).unwrap();
        assert!(angle.is_finite());
        assert!(angle.abs() < 1e-7);
    }

    #[test]
    fn angle_with_zero_is_an_error() {
        assert!(Vector::zero().angle(&v(1.0, 0.0, 0.0)).is_err());
        assert!(v(1.0, 0.0, 0.0).angle(&Vector::zero()).is_err());
    }

    #[test]
    fn angle_between_short_vectors() {
        // Each length is 1e-6: above epsilon, though the product is not.
        let a = v(1e-6, 0.0, 0.0);
        let b = v(0.0, 1e-6, 0.0);
        assert!(a.normalized().is_ok());
        assert!(b.normalized().is_ok());
        assert_relative_eq!(a.angle(&b).unwrap(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn rotate_about_z() {
        let mut a = v(1.0, 0.0, 0.0);
        a.rotate(FRAC_PI_2, v(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(a, v(0.0, 1.0, 0.0));
    }

    #[test]
    fn rotate_accepts_unnormalized_triple_axis() {
        let r = v(1.0, 2.0, 3.0).rotated(FRAC_PI_2, [5.0, 0.0, 0.0]).unwrap();
        assert_eq!(r, v(1.0, -3.0, 2.0));
    }

    #[test]
    fn rotate_preserves_length() {
        let a = v(0.3, -1.2, 4.4);
        let r = a.rotated(0.77, (1.0, 1.0, -2.0)).unwrap();
        assert_relative_eq!(r.length(), a.length(), epsilon = 1e-12);
    }

    #[test]
    fn rotate_with_zero_axis_leaves_vector_untouched() {
        let mut a = v(1.0, 2.0, 3.0);
        let err = a.rotate(1.0, Vector::zero()).unwrap_err();
        assert!(matches!(err, Geom3dError::Geometry(GeometryError::InvalidAxis(_))));
        assert_eq!(a, v(1.0, 2.0, 3.0));
    }

    #[test]
    fn display_and_parse() {
        let a = v(1.0, -2.5, 3.0);
        assert_eq!(a.to_string(), "Vector(1, -2.5, 3)");
        assert_eq!(a.to_string().parse::<Vector>().unwrap(), a);
        assert!("Point(1, 2, 3)".parse::<Vector>().is_err());
    }
}
