/*!
Collision root module.

Static scene snapshot plus the ray probes and resolver that keep the skate body out of it.
rapier3d provides the broad phase and the ray casts; everything else is plain data.

- types:    shared data types (Transform, Bounds, RayHit, GroundSample)
- scene:    geometry definitions and the immutable rapier-backed snapshot
- classify: surface classification (ground, wall, rail, pickup)
- probe:    single filtered ray casts
- resolver: forward/cardinal collision checks with rollback, and ground sampling
*/

pub mod classify;
pub mod probe;
pub mod resolver;
pub mod scene;
pub mod types;

// Re-export commonly used types and functions.
pub use classify::{SurfaceClass, is_rail_object};
pub use probe::{ProbeSet, cast_probe, cast_probe_all};
pub use resolver::{CollisionResolver, can_pass_under};
pub use scene::{GeometryDef, SceneEntry, SceneGeometry, ShapeDef};
pub use types::{Bounds, GeometryId, GroundSample, Iso, Quat, RayHit, Transform, Vec3};

/// Convenience: a ground plane at `height` with normal +Y.
#[inline]
pub fn ground_plane(id: u32, height: f32) -> GeometryDef {
    GeometryDef::new(
        id,
        "ground",
        ShapeDef::Plane {
            offset_along_normal: 0.0,
        },
    )
    .at(Vec3::new(0.0, height, 0.0))
}

/// Convenience: an axis-aligned box whose bottom face rests at `base.y`.
#[inline]
pub fn box_on_floor(id: u32, tag: &str, base: Vec3, half_extents: Vec3) -> GeometryDef {
    GeometryDef::new(id, tag, ShapeDef::Cuboid { half_extents })
        .at(base + Vec3::new(0.0, half_extents.y, 0.0))
}
