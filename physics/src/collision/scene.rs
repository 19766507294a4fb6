//! Read-only scene snapshot for collision probing.
//!
//! The scene collaborator describes its static shapes with [`GeometryDef`]s.
//! [`SceneGeometry::build`] turns them into an immutable snapshot: each entry keeps its tag,
//! transform, bounds and a [`SurfaceClass`] computed once, and all entries are inserted into a
//! rapier query world that answers the ray probes.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: the snapshot is only ever read by the resolver.
//! - Immutable world: nothing in the core mutates the snapshot after construction.

use rapier3d::na::Point3;
use rapier3d::parry::bounding_volume::Aabb;
use rapier3d::parry::shape::Shape as _;
use rapier3d::prelude::*;

use super::classify::SurfaceClass;
use super::types::{Bounds, GeometryId, Quat, Transform, Vec3};

/// Segments used to approximate a torus with a ring of capsules.
const TORUS_SEGMENTS: usize = 16;

/// Canonical definition of one static shape supplied by the scene collaborator.
///
/// Conventions
/// - Units are world units.
/// - Rotation is a unit quaternion.
/// - For planes, the normal is `rotation * +Y` and the plane passes through
///   `translation + normal * offset_along_normal`.
#[derive(Clone, Debug)]
pub struct GeometryDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// Name/tag, e.g. `"ground"`, `"wall_north"`, `"rail_low"`, `"coin_3"`.
    pub tag: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub shape: ShapeDef,
    /// Invisible shapes are ignored by the horizontal probes.
    pub visible: bool,
}

impl GeometryDef {
    pub fn new(id: u32, tag: impl Into<String>, shape: ShapeDef) -> Self {
        Self {
            id,
            tag: tag.into(),
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            shape,
            visible: true,
        }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        Transform::new(self.translation, self.rotation)
    }
}

/// Supported static shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeDef {
    /// Infinite plane (half-space) with normal `rotation * +Y`.
    Plane { offset_along_normal: f32 },

    /// Oriented box with the given half-extents.
    Cuboid { half_extents: Vec3 },

    Sphere { radius: f32 },

    /// Cylinder aligned with the local +Y axis.
    CylinderY { radius: f32, half_height: f32 },

    /// Ring lying in the local XZ plane around +Y, swept from angle 0 to `arc` radians.
    ///
    /// Approximated for ray queries by a chain of capsules.
    Torus {
        major_radius: f32,
        minor_radius: f32,
        arc: f32,
    },
}

/// One shape in the snapshot.
#[derive(Clone, Debug)]
pub struct SceneEntry {
    /// Position of this entry in the snapshot; what [`super::RayHit::object`] refers to.
    pub index: GeometryId,
    /// The collaborator's id.
    pub id: u32,
    pub tag: String,
    pub transform: Transform,
    pub shape: ShapeDef,
    pub visible: bool,
    pub class: SurfaceClass,
    pub local_bounds: Bounds,
    pub world_bounds: Bounds,
}

/// Immutable per-frame view of the static world.
///
/// Holds the rapier structures needed for scene queries:
/// - `RigidBodySet`/`ColliderSet` containing the static geometry.
/// - `NarrowPhase` and `BroadPhaseBvh` used to create a borrowed `QueryPipeline`.
pub struct SceneGeometry {
    entries: Vec<SceneEntry>,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
}

impl SceneGeometry {
    /// Build a snapshot from a list of definitions.
    ///
    /// The input is sorted by `id` before insertion so the result does not depend on the
    /// order the collaborator enumerated its shapes in.
    pub fn build(mut defs: Vec<GeometryDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut modified_colliders = Vec::with_capacity(defs.len());
        let mut entries = Vec::with_capacity(defs.len());

        for (index, def) in defs.into_iter().enumerate() {
            let index = index as GeometryId;
            let mut collider = collider_from_def(&def, index);
            collider.set_position(collider_pose(&def));

            let local_bounds = to_bounds(&collider.shape().compute_local_aabb());
            let world_bounds = to_bounds(&collider.compute_aabb());
            let class = SurfaceClass::classify(&def);

            log::debug!(
                "scene entry {} `{}` classified as {:?}",
                def.id,
                def.tag,
                class
            );

            modified_colliders.push(colliders.insert(collider));
            entries.push(SceneEntry {
                index,
                id: def.id,
                transform: def.transform(),
                tag: def.tag,
                shape: def.shape,
                visible: def.visible,
                class,
                local_bounds,
                world_bounds,
            });
        }

        let mut broad_phase = BroadPhaseBvh::new();
        let mut events = Vec::new();
        broad_phase.update(
            &IntegrationParameters::default(),
            &colliders,
            &bodies,
            &modified_colliders,
            &[],
            &mut events,
        );

        Self {
            entries,
            bodies,
            colliders,
            broad_phase,
            narrow_phase: NarrowPhase::default(),
        }
    }

    #[inline]
    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    #[inline]
    pub fn entry(&self, index: GeometryId) -> Option<&SceneEntry> {
        self.entries.get(index as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Map a rapier collider handle back to its snapshot entry.
    pub(crate) fn entry_for_collider(&self, handle: ColliderHandle) -> Option<&SceneEntry> {
        let collider = self.colliders.get(handle)?;
        self.entry(collider.user_data as GeometryId)
    }

    /// Create a borrowed `QueryPipeline` restricted by `filter`.
    pub(crate) fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

/// World pose of the collider built for `def`.
fn collider_pose(def: &GeometryDef) -> Isometry<Real> {
    let translation = match def.shape {
        // Shift the plane along its own normal so it passes through the offset point.
        ShapeDef::Plane {
            offset_along_normal,
        } => def.translation + (def.rotation * Vec3::y()) * offset_along_normal,
        _ => def.translation,
    };
    Transform::new(translation, def.rotation).iso()
}

/// Build a rapier collider (identity local transform) tagged with its snapshot index.
fn collider_from_def(def: &GeometryDef, index: GeometryId) -> Collider {
    let builder = match def.shape {
        ShapeDef::Plane { .. } => ColliderBuilder::halfspace(Vec3::y_axis()),

        ShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ShapeDef::Sphere { radius } => ColliderBuilder::ball(radius),

        ShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(half_height, radius),

        ShapeDef::Torus {
            major_radius,
            minor_radius,
            arc,
        } => ColliderBuilder::new(torus_shape(major_radius, minor_radius, arc)),
    };

    builder.user_data(index as u128).build()
}

/// Chain of capsules following the torus centre line.
fn torus_shape(major_radius: f32, minor_radius: f32, arc: f32) -> SharedShape {
    let arc = if arc.is_finite() && arc > 0.0 {
        arc.min(std::f32::consts::TAU)
    } else {
        std::f32::consts::TAU
    };
    let ring_point = |t: f32| {
        let angle = arc * t;
        Point3::new(major_radius * angle.cos(), 0.0, major_radius * angle.sin())
    };

    let parts = (0..TORUS_SEGMENTS)
        .map(|i| {
            let a = ring_point(i as f32 / TORUS_SEGMENTS as f32);
            let b = ring_point((i + 1) as f32 / TORUS_SEGMENTS as f32);
            (Isometry::identity(), SharedShape::capsule(a, b, minor_radius))
        })
        .collect::<Vec<_>>();

    SharedShape::compound(parts)
}

fn to_bounds(aabb: &Aabb) -> Bounds {
    Bounds::new(aabb.mins.coords, aabb.maxs.coords)
}
