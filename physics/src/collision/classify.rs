use super::scene::{GeometryDef, ShapeDef};
use super::types::Vec3;

/// Cylinders thinner than this can be rails.
const RAIL_MAX_RADIUS: f32 = 0.3;

/// A cylinder counts as lying down when its axis has at most this much vertical component
/// (about 80 degrees of rotation about X or Z).
const HORIZONTAL_AXIS_MAX_Y: f32 = 0.17;

const RAIL_TAGS: [&str; 3] = ["rail", "coping", "bar"];
const GROUND_TAGS: [&str; 2] = ["ground", "floor"];
const WALL_TAGS: [&str; 2] = ["wall", "structure"];
const PICKUP_TAGS: [&str; 1] = ["coin"];

/// How the resolver treats a piece of static geometry.
///
/// Computed once per entry when the scene snapshot is built.
/// Tags are matched in the order pickup, ground/floor, rail, wall/structure, so a
/// floor-tagged rail stays out of the horizontal probes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceClass {
    /// Floor surfaces. Only the ground probe sees them.
    Ground,
    /// Explicit walls and structures. Always blocking.
    Wall,
    /// Rails and coping. The body may pass underneath; never used as ground.
    Rail,
    /// Collectibles. Ignored by every probe.
    Pickup,
    /// Anything else: blocking or walkable depending on the contact normal.
    Generic,
}

impl SurfaceClass {
    pub fn classify(def: &GeometryDef) -> Self {
        let tag = def.tag.to_ascii_lowercase();
        if contains_any(&tag, &PICKUP_TAGS) {
            SurfaceClass::Pickup
        } else if contains_any(&tag, &GROUND_TAGS) {
            SurfaceClass::Ground
        } else if is_rail_object(def) {
            SurfaceClass::Rail
        } else if contains_any(&tag, &WALL_TAGS) {
            SurfaceClass::Wall
        } else {
            SurfaceClass::Generic
        }
    }

    #[inline]
    pub fn is_rail(self) -> bool {
        self == SurfaceClass::Rail
    }
}

/// Rail detection, in order of precedence:
/// 1. the tag names a rail, coping or bar;
/// 2. a thin cylinder lying on its side;
/// 3. any torus (coping lips are built from them).
pub fn is_rail_object(def: &GeometryDef) -> bool {
    let tag = def.tag.to_ascii_lowercase();
    if contains_any(&tag, &RAIL_TAGS) {
        return true;
    }

    match def.shape {
        ShapeDef::CylinderY { radius, .. } if radius < RAIL_MAX_RADIUS => {
            let axis = def.rotation * Vec3::y();
            axis.y.abs() <= HORIZONTAL_AXIS_MAX_Y
        }
        ShapeDef::Torus { .. } => true,
        _ => false,
    }
}

fn contains_any(tag: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| tag.contains(n))
}
