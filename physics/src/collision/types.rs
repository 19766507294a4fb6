/*!
Core collision types and math aliases shared by the collision submodules.

This module contains no algorithms. It defines the data exchanged between:
- the scene snapshot (static geometry and its rapier query world)
- ray probes (forward pre-check, cardinal probes, ground sample)
- the resolver and the kinematic integrator
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// Index of an entry inside a [`super::SceneGeometry`] snapshot.
pub type GeometryId = u32;

/// A rigid transform (isometry) in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Convert to nalgebra `Isometry3` for use with rapier colliders.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(
            na::Translation3::new(self.translation.x, self.translation.y, self.translation.z),
            self.rotation,
        )
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// Result of a single ray probe. Never kept beyond one resolution step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// World-space contact point.
    pub point: Vec3,
    /// World-space unit surface normal at the contact.
    pub normal: Vec3,
    /// Distance travelled along the ray.
    pub distance: f32,
    /// Scene entry that was hit.
    pub object: GeometryId,
}

/// Outcome of the downward ground probe.
///
/// `found == false` carries a height of 0 and no normal; the frame keeps going.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundSample {
    pub found: bool,
    /// Resting height for the body's reference point (surface height + rest height).
    pub height: f32,
    pub normal: Option<Vec3>,
}

impl GroundSample {
    #[inline]
    pub fn not_found() -> Self {
        Self {
            found: false,
            height: 0.0,
            normal: None,
        }
    }

    #[inline]
    pub fn at(height: f32, normal: Vec3) -> Self {
        Self {
            found: true,
            height,
            normal: Some(normal),
        }
    }
}

impl Default for GroundSample {
    fn default() -> Self {
        Self::not_found()
    }
}
