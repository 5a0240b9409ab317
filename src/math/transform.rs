use crate::error::{GeometryError, Result};

use super::{Matrix4, Point3, Vector3, TOLERANCE};

/// Builds a 4x4 homogeneous rotation by `angle` radians around `axis`.
///
/// The axis does not need to be normalized. When `center` is given the
/// rotation is about the line through `center` with direction `axis`,
/// otherwise about the line through the origin.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidAxis`] if the axis is zero-length or has
/// non-finite components.
pub fn rotation_matrix(angle: f64, axis: &Vector3, center: Option<&Point3>) -> Result<Matrix4> {
    let len = axis.norm();
    if !len.is_finite() || len < TOLERANCE {
        tracing::warn!(?axis, "rejected rotation axis");
        return Err(GeometryError::InvalidAxis(format!(
            "axis ({}, {}, {}) has no direction",
            axis.x, axis.y, axis.z
        ))
        .into());
    }
    let rot = axis_angle(&(axis / len), angle);

    Ok(match center {
        Some(c) => {
            // Translate to origin, rotate, translate back
            let t_neg = Matrix4::new_translation(&(-c.coords));
            let t_pos = Matrix4::new_translation(&c.coords);
            t_pos * rot * t_neg
        }
        None => rot,
    })
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(point: &Point3, matrix: &Matrix4) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}

/// Transforms a direction vector by a 4x4 matrix (ignoring translation).
#[must_use]
pub fn transform_direction(dir: &Vector3, matrix: &Matrix4) -> Vector3 {
    let v = matrix * nalgebra::Vector4::new(dir.x, dir.y, dir.z, 0.0);
    Vector3::new(v.x, v.y, v.z)
}

/// Rodrigues rotation around a unit axis through the origin.
#[allow(clippy::many_single_char_names)]
#[rustfmt::skip]
fn axis_angle(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}
