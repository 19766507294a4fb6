//! Ray probes against a [`SceneGeometry`] snapshot.
//!
//! [`cast_probe`] returns `Result<Option<RayHit>, ProbeError>`:
//! - `Ok(Some(hit))`: nearest accepted surface along the ray.
//! - `Ok(None)`: nothing within range.
//! - `Err(_)`: the probe could not be evaluated; callers log it and treat it as a miss.
//!
//! [`cast_probe_all`] returns every accepted surface along the ray, nearest first.

use rapier3d::na::Point3;
use rapier3d::prelude::{Collider, ColliderHandle, QueryFilter, Ray, RayIntersection};

use super::classify::SurfaceClass;
use super::scene::{SceneEntry, SceneGeometry};
use super::types::{GeometryId, RayHit, Vec3};
use crate::error::ProbeError;

/// Minimum direction length accepted by a probe.
const DIRECTION_EPS: f32 = 1.0e-6;

/// Which scene entries a probe may hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeSet {
    /// Horizontal collision probes: visible geometry that is neither ground nor a pickup.
    Obstacles,
    /// Downward ground sample: everything except pickups and rails.
    Ground,
}

impl ProbeSet {
    pub fn accepts(self, entry: &SceneEntry) -> bool {
        match self {
            ProbeSet::Obstacles => {
                entry.visible
                    && !matches!(entry.class, SurfaceClass::Ground | SurfaceClass::Pickup)
            }
            ProbeSet::Ground => !matches!(entry.class, SurfaceClass::Pickup | SurfaceClass::Rail),
        }
    }
}

/// Cast a single ray and return the nearest hit within `max_distance` on an entry that
/// `accept` lets through. Rejected entries are transparent: the ray continues past them.
pub fn cast_probe(
    scene: &SceneGeometry,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    accept: impl Fn(&SceneEntry) -> bool,
) -> Result<Option<RayHit>, ProbeError> {
    let ray = probe_ray(origin, direction)?;
    if scene.is_empty() || max_distance <= 0.0 {
        return Ok(None);
    }

    let predicate = |_handle: ColliderHandle, collider: &Collider| {
        scene
            .entry(collider.user_data as GeometryId)
            .is_some_and(&accept)
    };
    let pipeline = scene.query_pipeline(QueryFilter::default().predicate(&predicate));

    pipeline
        .cast_ray_and_get_normal(&ray, max_distance, true)
        .map(|(handle, intersection)| ray_hit(scene, &ray, handle, intersection))
        .transpose()
}

/// Like [`cast_probe`], but return every accepted hit within `max_distance`, sorted by
/// distance. Each collider contributes at most one hit.
pub fn cast_probe_all(
    scene: &SceneGeometry,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    accept: impl Fn(&SceneEntry) -> bool,
) -> Result<Vec<RayHit>, ProbeError> {
    let ray = probe_ray(origin, direction)?;
    if scene.is_empty() || max_distance <= 0.0 {
        return Ok(Vec::new());
    }

    let predicate = |_handle: ColliderHandle, collider: &Collider| {
        scene
            .entry(collider.user_data as GeometryId)
            .is_some_and(&accept)
    };
    let pipeline = scene.query_pipeline(QueryFilter::default().predicate(&predicate));

    let mut hits = pipeline
        .intersect_ray(ray, max_distance, true)
        .map(|(handle, _, intersection)| ray_hit(scene, &ray, handle, intersection))
        .collect::<Result<Vec<_>, _>>()?;
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.object.cmp(&b.object)));
    Ok(hits)
}

fn probe_ray(origin: Vec3, direction: Vec3) -> Result<Ray, ProbeError> {
    if !origin.iter().all(|c| c.is_finite()) {
        return Err(ProbeError::NonFiniteOrigin(origin.x, origin.y, origin.z));
    }
    let direction = direction
        .try_normalize(DIRECTION_EPS)
        .filter(|d| d.iter().all(|c| c.is_finite()))
        .ok_or(ProbeError::DegenerateDirection)?;
    Ok(Ray::new(Point3::from(origin), direction))
}

fn ray_hit(
    scene: &SceneGeometry,
    ray: &Ray,
    handle: ColliderHandle,
    intersection: RayIntersection,
) -> Result<RayHit, ProbeError> {
    let object = scene
        .entry_for_collider(handle)
        .ok_or(ProbeError::UnknownCollider)?;

    let distance = intersection.time_of_impact;
    let point = ray.point_at(distance).coords;
    let normal = intersection.normal;
    if !distance.is_finite()
        || !point.iter().all(|c| c.is_finite())
        || !normal.iter().all(|c| c.is_finite())
    {
        return Err(ProbeError::NonFiniteHit { id: object.index });
    }

    Ok(RayHit {
        point,
        normal,
        distance,
        object: object.index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::scene::{GeometryDef, ShapeDef};

    fn obstacles(entry: &SceneEntry) -> bool {
        ProbeSet::Obstacles.accepts(entry)
    }

    fn ground(entry: &SceneEntry) -> bool {
        ProbeSet::Ground.accepts(entry)
    }

    fn scene() -> SceneGeometry {
        SceneGeometry::build(vec![
            GeometryDef::new(
                0,
                "ground",
                ShapeDef::Plane {
                    offset_along_normal: 0.0,
                },
            ),
            GeometryDef::new(
                1,
                "crate",
                ShapeDef::Cuboid {
                    half_extents: Vec3::new(0.5, 0.5, 0.5),
                },
            )
            .at(Vec3::new(0.0, 0.5, -3.0)),
            GeometryDef::new(2, "coin_1", ShapeDef::Sphere { radius: 0.3 })
                .at(Vec3::new(0.0, 0.5, -1.5)),
            GeometryDef::new(
                3,
                "ghost",
                ShapeDef::Cuboid {
                    half_extents: Vec3::new(0.5, 0.5, 0.5),
                },
            )
            .at(Vec3::new(3.0, 0.5, 0.0))
            .hidden(),
        ])
    }

    #[test]
    fn obstacle_probe_skips_pickups_and_hits_crate() {
        let scene = scene();
        let hit = cast_probe(
            &scene,
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            10.0,
            obstacles,
        )
        .unwrap()
        .expect("crate should be hit");

        assert_eq!(scene.entry(hit.object).unwrap().tag, "crate");
        assert!((hit.distance - 2.5).abs() < 1.0e-3);
        assert!((hit.normal.z - 1.0).abs() < 1.0e-3);
    }

    #[test]
    fn obstacle_probe_ignores_hidden_geometry() {
        let scene = scene();
        let hit = cast_probe(
            &scene,
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            10.0,
            obstacles,
        )
        .unwrap();
        assert!(hit.is_none());
    }

    #[test]
    fn ground_probe_hits_plane() {
        let scene = scene();
        let hit = cast_probe(
            &scene,
            Vec3::new(5.0, 2.0, 5.0),
            Vec3::new(0.0, -1.0, 0.0),
            10.0,
            ground,
        )
        .unwrap()
        .expect("plane below");

        assert!(hit.point.y.abs() < 1.0e-4);
        assert!((hit.normal.y - 1.0).abs() < 1.0e-4);
    }

    #[test]
    fn degenerate_direction_is_an_error() {
        let scene = scene();
        let result = cast_probe(&scene, Vec3::zeros(), Vec3::zeros(), 1.0, obstacles);
        assert_eq!(result, Err(ProbeError::DegenerateDirection));
    }

    #[test]
    fn non_finite_origin_is_an_error() {
        let scene = scene();
        let result = cast_probe(&scene, Vec3::new(f32::NAN, 0.0, 0.0), Vec3::x(), 1.0, obstacles);
        assert!(matches!(result, Err(ProbeError::NonFiniteOrigin(..))));
    }

    #[test]
    fn all_hits_come_back_nearest_first() {
        let scene = scene();
        let hits = cast_probe_all(
            &scene,
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            10.0,
            |_: &SceneEntry| true,
        )
        .unwrap();

        let tags: Vec<&str> = hits
            .iter()
            .map(|hit| scene.entry(hit.object).unwrap().tag.as_str())
            .collect();
        assert_eq!(tags, vec!["coin_1", "crate"]);
        assert!(hits[0].distance < hits[1].distance);
        assert!((hits[1].distance - 2.5).abs() < 1.0e-3);
    }

    #[test]
    fn all_hits_respect_range_and_filter() {
        let scene = scene();
        let hits = cast_probe_all(
            &scene,
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            2.0,
            obstacles,
        )
        .unwrap();
        assert!(hits.is_empty());

        let result = cast_probe_all(&scene, Vec3::zeros(), Vec3::zeros(), 1.0, obstacles);
        assert_eq!(result, Err(ProbeError::DegenerateDirection));
    }

    #[test]
    fn floor_tagged_rail_is_not_an_obstacle() {
        let rail = GeometryDef::new(
            0,
            "floor_rail",
            ShapeDef::Cuboid {
                half_extents: Vec3::new(0.05, 0.05, 2.0),
            },
        )
        .at(Vec3::new(0.0, 0.5, -1.0));
        let scene = SceneGeometry::build(vec![rail]);
        let entry = &scene.entries()[0];
        assert!(!ProbeSet::Obstacles.accepts(entry));
        assert!(ProbeSet::Ground.accepts(entry));

        let hit = cast_probe(
            &scene,
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            5.0,
            obstacles,
        )
        .unwrap();
        assert!(hit.is_none());
    }
}
