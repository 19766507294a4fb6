use std::f32::consts::TAU;

use super::state::{KinematicState, MovementState};
use crate::collision::Vec3;
use crate::constants::{
    AIRBORNE_MARGIN, CRUISE_JUMP_BOOST, FLAT_NORMAL_Y, LANDING_FRICTION, LANDING_STOP_SPEED,
    REVERSE_SPEED_FACTOR, SPRINT_JUMP_BOOST, STOP_SPEED, THRUST_FACTOR, TILT_SMOOTHING,
    VELOCITY_SNAP,
};
use crate::input::FrameInput;
use crate::settings::{PhysicsSettings, time_scale};
use crate::utils::{heading_from_yaw, yaw_rotation};

/// Owns the body's kinematic state and turns intents plus elapsed time into motion.
///
/// All rules are tuned per 1/60 s step and scaled by `time_scale = dt * 60`.
#[derive(Clone, Debug)]
pub struct KinematicIntegrator {
    settings: PhysicsSettings,
    state: KinematicState,
}

impl KinematicIntegrator {
    pub fn new(settings: PhysicsSettings, position: Vec3) -> Self {
        Self {
            state: KinematicState::at_rest(position, settings.base_speed),
            settings,
        }
    }

    #[inline]
    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    #[inline]
    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// Direct access for collaborators that restore or script a state.
    #[inline]
    pub fn state_mut(&mut self) -> &mut KinematicState {
        &mut self.state
    }

    /// Unit heading the body faces (yaw applied to -Z).
    #[inline]
    pub fn heading(&self) -> Vec3 {
        heading_from_yaw(self.state.yaw)
    }

    /// Move the body without any physics, dropping all motion.
    pub fn teleport(&mut self, position: Vec3) {
        self.state = KinematicState {
            yaw: self.state.yaw,
            ..KinematicState::at_rest(position, self.settings.base_speed)
        };
    }

    /// Apply rotation, sprint ramp, thrust and jump for one frame.
    ///
    /// Snapshots `previous_position` before touching anything else.
    pub fn handle_input(&mut self, input: &FrameInput, dt: f32) {
        let ts = time_scale(dt);
        let input = input.sanitized();
        let settings = self.settings;
        let state = &mut self.state;

        state.previous_position = state.position;
        state.yaw += input.rotation * ts;

        let forward = input.move_z < 0.0;
        let backward = input.move_z > 0.0;

        let ramp = settings.sprint_acceleration * ts;
        state.current_speed = if input.sprint_requested && forward {
            (state.current_speed + ramp).min(settings.max_sprint_speed)
        } else if forward || backward {
            (state.current_speed - ramp * 1.5).max(settings.base_speed)
        } else {
            (state.current_speed - ramp * 2.0).max(settings.base_speed)
        };

        if forward || backward {
            let effective = if forward {
                state.current_speed
            } else {
                settings.base_speed * REVERSE_SPEED_FACTOR
            };
            let direction = yaw_rotation(state.yaw) * Vec3::new(0.0, 0.0, input.move_z.signum());
            state.velocity += direction * (effective * THRUST_FACTOR * ts);
        }

        if input.jump_requested && !state.is_jumping && !state.in_air {
            state.velocity.y = settings.jump_force * input.jump_power_multiplier;

            if state.horizontal_speed() > STOP_SPEED {
                let base = if input.sprint_requested {
                    SPRINT_JUMP_BOOST
                } else {
                    CRUISE_JUMP_BOOST
                };
                let boost = base.powf(ts.min(1.0));
                state.velocity.x *= boost;
                state.velocity.z *= boost;
            }

            state.is_jumping = true;
            log::debug!(
                "jump: vy={:.3} power={:.2}",
                state.velocity.y,
                input.jump_power_multiplier
            );
        }
    }

    /// Friction, stop detection, horizontal integration and the world bounds clamp.
    pub fn update_physics(&mut self, dt: f32) {
        let ts = time_scale(dt);
        let retain = self.settings.friction.powf(ts);
        let bounds = self.settings.world_bounds;

        let state = &mut self.state;
        state.velocity.x *= retain;
        state.velocity.z *= retain;
        if state.velocity.x.abs() < VELOCITY_SNAP {
            state.velocity.x = 0.0;
        }
        if state.velocity.z.abs() < VELOCITY_SNAP {
            state.velocity.z = 0.0;
        }

        let speed = state.horizontal_speed();
        if speed < STOP_SPEED {
            if state.was_moving {
                state.was_moving = false;
                self.reset_sprint();
            }
        } else {
            state.was_moving = true;
        }

        let state = &mut self.state;
        state.position.x = (state.position.x + state.velocity.x * ts).clamp(-bounds, bounds);
        state.position.z = (state.position.z + state.velocity.z * ts).clamp(-bounds, bounds);

        state.wheel_rotation =
            (state.wheel_rotation + speed * self.settings.wheel_spin_factor * ts).rem_euclid(TAU);
    }

    /// Vertical integration against `ground_height`; returns the resulting movement state.
    ///
    /// - Jumping/airborne: gravity, integrate `y`, land once `y <= ground_height`.
    /// - Grounded: start falling when more than the airborne margin above ground,
    ///   otherwise stay pinned to it.
    pub fn apply_gravity(&mut self, ground_height: f32, dt: f32) -> MovementState {
        let ts = time_scale(dt);
        let gravity = self.settings.gravity;
        let state = &mut self.state;

        let movement = if state.is_airborne() {
            state.velocity.y -= gravity * ts;
            state.position.y += state.velocity.y * ts;

            if state.position.y > ground_height + AIRBORNE_MARGIN {
                state.in_air = true;
            }

            if state.position.y <= ground_height {
                self.land(ground_height, ts);
                MovementState::Landed
            } else if state.is_jumping {
                MovementState::Jumping
            } else {
                MovementState::Airborne
            }
        } else if state.position.y > ground_height + AIRBORNE_MARGIN {
            // Free fall starts next call; keep whatever vertical velocity we had.
            state.in_air = true;
            MovementState::Airborne
        } else {
            state.position.y = ground_height;
            state.velocity.y = 0.0;
            MovementState::Grounded
        };

        self.state.movement = movement;
        movement
    }

    fn land(&mut self, ground_height: f32, ts: f32) {
        let state = &mut self.state;
        state.position.y = ground_height;
        state.is_jumping = false;
        state.in_air = false;
        state.velocity.y = 0.0;
        state.air_spin = 0.0;

        if state.horizontal_speed() > STOP_SPEED {
            let impact = LANDING_FRICTION.powf(ts);
            state.velocity.x *= impact;
            state.velocity.z *= impact;
            if state.horizontal_speed() < LANDING_STOP_SPEED {
                self.reset_sprint();
            }
        } else {
            self.reset_sprint();
        }
        log::trace!("landed at y={ground_height:.3}");
    }

    /// Ease the board toward the slope under it and let gravity pull it downhill.
    ///
    /// Only called while grounded. Flat ground relaxes tilt toward zero.
    pub fn apply_tilt(&mut self, normal: Vec3, dt: f32) {
        let ts = time_scale(dt);
        let slope_acceleration = self.settings.slope_acceleration;
        let state = &mut self.state;

        let (target_x, target_z) = if normal.y < FLAT_NORMAL_Y {
            let slide = (1.0 - normal.y) * slope_acceleration * ts;
            state.velocity.x += normal.x * slide;
            state.velocity.z += normal.z * slide;
            (normal.z.atan2(normal.y), -normal.x.atan2(normal.y))
        } else {
            (0.0, 0.0)
        };

        state.tilt_x += (target_x - state.tilt_x) * TILT_SMOOTHING;
        state.tilt_z += (target_z - state.tilt_z) * TILT_SMOOTHING;
    }

    /// Cosmetic board spin while off the ground.
    pub fn apply_air_rotation(&mut self, dt: f32) {
        if !self.state.is_airborne() {
            return;
        }
        let ts = time_scale(dt);
        self.state.air_spin =
            (self.state.air_spin + self.settings.air_spin_rate * ts).rem_euclid(TAU);
    }

    /// Roll back to the last safe position and drop horizontal motion and sprint.
    pub fn reset_position(&mut self) {
        self.state.position = self.state.previous_position;
        self.state.velocity.x = 0.0;
        self.state.velocity.z = 0.0;
        self.reset_sprint();
    }

    #[inline]
    pub fn reset_sprint(&mut self) {
        self.state.current_speed = self.settings.base_speed;
    }

    /// Zero every velocity component.
    #[inline]
    pub fn halt(&mut self) {
        self.state.velocity = Vec3::zeros();
    }

    #[inline]
    pub fn clear_air_flags(&mut self) {
        self.state.is_jumping = false;
        self.state.in_air = false;
    }
}
