//! Collision resolution against the static scene.
//!
//! Horizontal contact is detected with short ray probes fired from the body after it has
//! been integrated for the frame. A blocking contact rolls the body back to the position
//! snapshotted by `handle_input`, so the body never ends a frame inside a wall.
//!
//! Probes
//! - forward: three rays along the heading at increasing heights,
//!   `2 * probe_distance` long. Every hit along a ray is checked in order; the first wall
//!   or steep face is a hard stop.
//! - cardinal: one ray along each of +-X and +-Z that points with the motion, from chest
//!   height, `probe_distance` long. Low steps are rolled over instead of blocking.
//! - ground: one ray straight down, started above the body so it also finds ledges the
//!   body has sunk into during a fast fall.

use super::classify::SurfaceClass;
use super::probe::{ProbeSet, cast_probe, cast_probe_all};
use super::scene::{SceneEntry, SceneGeometry};
use super::types::{GroundSample, RayHit, Vec3};
use crate::kinematic::{KinematicIntegrator, KinematicState};
use crate::settings::PhysicsSettings;
use crate::utils::planar_direction;

/// Normals flatter than this (in |y|) make a forward hit a wall.
const FORWARD_WALL_NORMAL_Y: f32 = 0.4;
/// Normals flatter than this (in |y|) make a cardinal hit wall-like.
const CARDINAL_WALL_NORMAL_Y: f32 = 0.7;
/// Minimum alignment between a cardinal axis and the motion for it to be probed.
const CARDINAL_ALIGNMENT: f32 = 0.3;
/// Contact heights (above the board) in this open range count as a step to roll over.
const LOW_STEP_RANGE: (f32, f32) = (-0.1, 0.3);
/// Extra headroom a rail must leave above the body to be passable.
const RAIL_CLEARANCE: f32 = 0.1;

#[derive(Clone, Debug, Default)]
pub struct CollisionResolver {
    wall_collision_detected: bool,
    last_contact: Option<RayHit>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the most recent forward probe stopped the body dead.
    ///
    /// Cleared at the start of every [`Self::check_collisions`] call.
    #[inline]
    pub fn wall_collision_detected(&self) -> bool {
        self.wall_collision_detected
    }

    /// The hit that caused the last blocking contact, if the last check blocked.
    #[inline]
    pub fn last_contact(&self) -> Option<&RayHit> {
        self.last_contact.as_ref()
    }

    /// Probe around the body and roll it back on a blocking contact.
    ///
    /// Returns `true` when a rollback happened. The forward probes always run; the cardinal
    /// probes need horizontal motion to pick their directions. Calling this again after a
    /// rollback leaves the body where it is.
    pub fn check_collisions(
        &mut self,
        body: &mut KinematicIntegrator,
        scene: &SceneGeometry,
    ) -> bool {
        self.wall_collision_detected = false;
        self.last_contact = None;

        let state = *body.state();
        let settings = *body.settings();
        let passable = |entry: &SceneEntry| can_pass_under(entry, &state, &settings);
        let blocking = |entry: &SceneEntry| ProbeSet::Obstacles.accepts(entry) && !passable(entry);
        let base_y = state.position.y - settings.rest_height;

        let heading = body.heading();
        let reach = settings.forward_probe_distance();
        for height in settings.forward_probe_heights {
            let origin = Vec3::new(state.position.x, base_y + height, state.position.z);
            for hit in probe_all(scene, origin, heading, reach, &blocking) {
                let Some(entry) = scene.entry(hit.object) else {
                    continue;
                };
                if entry.class != SurfaceClass::Wall
                    && hit.normal.y.abs() >= FORWARD_WALL_NORMAL_Y
                {
                    continue;
                }

                log::debug!(
                    "forward probe at +{height:.2} hit `{}` at {:.3}; stopping",
                    entry.tag,
                    hit.distance
                );
                body.reset_position();
                body.halt();
                body.clear_air_flags();
                self.wall_collision_detected = true;
                self.last_contact = Some(hit);
                return true;
            }
        }

        let Some(motion) = planar_direction(&state.velocity) else {
            return false;
        };
        let origin = Vec3::new(state.position.x, base_y + settings.chest_height, state.position.z);
        for direction in cardinal_directions() {
            if direction.dot(&motion) <= CARDINAL_ALIGNMENT {
                continue;
            }
            let Some(hit) = probe(scene, origin, direction, settings.probe_distance, &blocking)
            else {
                continue;
            };

            let normal = if hit.normal.norm_squared() > f32::EPSILON {
                hit.normal
            } else {
                -direction
            };
            let wall_like = normal.y.abs() < CARDINAL_WALL_NORMAL_Y;
            let contact_height = hit.point.y - base_y;
            if wall_like && contact_height > LOW_STEP_RANGE.0 && contact_height < LOW_STEP_RANGE.1 {
                log::trace!("stepping over contact at +{contact_height:.3}");
                continue;
            }

            log::debug!(
                "cardinal probe ({:.0}, {:.0}) hit object {} (wall_like={wall_like}); rolling back",
                direction.x,
                direction.z,
                hit.object
            );
            body.reset_position();
            body.halt();
            if wall_like {
                body.clear_air_flags();
            }
            self.last_contact = Some(hit);
            return true;
        }

        false
    }

    /// Height the body rests at under its current horizontal position, and the surface normal.
    pub fn check_ground(&self, body: &KinematicIntegrator, scene: &SceneGeometry) -> GroundSample {
        let settings = body.settings();
        let position = body.state().position;
        let origin = position + Vec3::y() * settings.ground_probe_lift;
        let max_distance = settings.ground_probe_lift + settings.ground_probe_distance;

        match probe(scene, origin, -Vec3::y(), max_distance, |entry: &SceneEntry| {
            ProbeSet::Ground.accepts(entry)
        }) {
            Some(hit) => {
                let normal = if hit.normal.norm_squared() > f32::EPSILON {
                    hit.normal
                } else {
                    Vec3::y()
                };
                GroundSample::at(hit.point.y + settings.rest_height, normal)
            }
            None => {
                log::trace!(
                    "no ground under ({:.2}, {:.2}, {:.2})",
                    position.x,
                    position.y,
                    position.z
                );
                GroundSample::not_found()
            }
        }
    }
}

/// A rail can be passed under when its lowest point is above the top of the body.
pub fn can_pass_under(
    entry: &SceneEntry,
    state: &KinematicState,
    settings: &PhysicsSettings,
) -> bool {
    entry.class.is_rail()
        && entry.world_bounds.min.y > state.position.y + settings.rest_height + RAIL_CLEARANCE
}

fn cardinal_directions() -> [Vec3; 4] {
    [Vec3::x(), -Vec3::x(), Vec3::z(), -Vec3::z()]
}

/// Probe that treats failures as misses.
fn probe(
    scene: &SceneGeometry,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    accept: impl Fn(&SceneEntry) -> bool,
) -> Option<RayHit> {
    cast_probe(scene, origin, direction, max_distance, accept).unwrap_or_else(|err| {
        log::warn!("probe failed: {err}");
        None
    })
}

/// All hits along a probe, nearest first; failures count as no hits.
fn probe_all(
    scene: &SceneGeometry,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    accept: impl Fn(&SceneEntry) -> bool,
) -> Vec<RayHit> {
    cast_probe_all(scene, origin, direction, max_distance, accept).unwrap_or_else(|err| {
        log::warn!("probe failed: {err}");
        Vec::new()
    })
}
