//! Headless simulation loop.

use serde::Serialize;
use skate_physics::utils::planar_distance_sq;
use skate_physics::{
    FrameOutput, MovementState, PhysicsSettings, SceneGeometry, SkateBody, SurfaceClass, Vec3,
};

use crate::script::InputScript;

/// Pickups within this planar distance of the rider count as passed through.
const PICKUP_RADIUS: f32 = 0.8;

#[derive(Clone, Debug, Default, Serialize)]
pub struct Summary {
    pub frames: u32,
    pub final_position: [f32; 3],
    pub final_yaw: f32,
    pub collisions: u32,
    pub landings: u32,
    pub max_height: f32,
    pub max_speed: f32,
    pub distance_travelled: f32,
    /// Tags of pickups the rider passed through, in order.
    pub pickups: Vec<String>,
}

pub struct RunOptions {
    pub frames: u32,
    pub dt: f32,
    /// Log the body's state every this many frames; 0 disables.
    pub trace_every: u32,
}

pub fn simulate(
    settings: PhysicsSettings,
    scene: &SceneGeometry,
    spawn: Vec3,
    script: &InputScript,
    options: &RunOptions,
) -> Summary {
    let mut body = SkateBody::new(settings, spawn);
    let mut summary = Summary {
        max_height: spawn.y,
        ..Summary::default()
    };
    let mut last_position = spawn;

    for frame in 0..options.frames {
        let out = body.step(&script.input_at(frame), scene, options.dt);

        if out.collided {
            summary.collisions += 1;
            tracing::debug!(frame, x = out.position.x, z = out.position.z, "collision rollback");
        }
        if out.movement == MovementState::Landed {
            summary.landings += 1;
            tracing::info!(frame, y = out.position.y, "landed");
        }
        collect_pickups(scene, &out, &mut summary.pickups, frame);

        summary.max_height = summary.max_height.max(out.position.y);
        summary.max_speed = summary.max_speed.max(out.horizontal_speed);
        summary.distance_travelled += (out.position - last_position).norm();
        last_position = out.position;

        if options.trace_every > 0 && frame % options.trace_every == 0 {
            trace_frame(frame, &out);
        }
        summary.frames = frame + 1;
    }

    let state = body.state();
    summary.final_position = [state.position.x, state.position.y, state.position.z];
    summary.final_yaw = state.yaw;
    summary
}

fn collect_pickups(
    scene: &SceneGeometry,
    out: &FrameOutput,
    pickups: &mut Vec<String>,
    frame: u32,
) {
    let radius_sq = PICKUP_RADIUS * PICKUP_RADIUS;
    for entry in scene.entries() {
        if entry.class != SurfaceClass::Pickup || pickups.contains(&entry.tag) {
            continue;
        }
        if planar_distance_sq(&entry.transform.translation, &out.position) <= radius_sq {
            tracing::info!(frame, tag = %entry.tag, "pickup");
            pickups.push(entry.tag.clone());
        }
    }
}

fn trace_frame(frame: u32, out: &FrameOutput) {
    tracing::info!(
        frame,
        x = out.position.x,
        y = out.position.y,
        z = out.position.z,
        yaw = out.yaw,
        speed = out.horizontal_speed,
        movement = ?out.movement,
        "state"
    );
}
