use nalgebra::{UnitQuaternion, Vector3};

/// Minimum planar length that still has a direction.
const PLANAR_EPS: f32 = 1.0e-6;

/// Rotation about +Y by `yaw` radians.
#[inline]
pub fn yaw_rotation(yaw: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)
}

/// Unit forward heading (local -Z rotated by `yaw`).
#[inline]
pub fn heading_from_yaw(yaw: f32) -> Vector3<f32> {
    yaw_rotation(yaw) * Vector3::new(0.0, 0.0, -1.0)
}

/// Length of the XZ part of `v`.
#[inline]
pub fn planar_speed(v: &Vector3<f32>) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Unit XZ direction of `v`, or `None` when it has no planar component.
#[inline]
pub fn planar_direction(v: &Vector3<f32>) -> Option<Vector3<f32>> {
    Vector3::new(v.x, 0.0, v.z).try_normalize(PLANAR_EPS)
}

/// Planar (XZ) distance squared between two world positions.
pub fn planar_distance_sq(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    let x = b.x - a.x;
    let z = b.z - a.z;
    x * x + z * z
}
