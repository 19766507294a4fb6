//! One simulated frame of the skate body.

use crate::collision::{CollisionResolver, GroundSample, SceneGeometry, Vec3};
use crate::input::FrameInput;
use crate::kinematic::{KinematicIntegrator, KinematicState, MovementState};
use crate::settings::PhysicsSettings;

/// What the renderer and game state need after a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    pub position: Vec3,
    pub yaw: f32,
    pub tilt_x: f32,
    pub tilt_z: f32,
    pub is_jumping: bool,
    pub in_air: bool,
    pub horizontal_speed: f32,
    pub wheel_rotation: f32,
    pub air_spin: f32,
    pub movement: MovementState,
    /// A collision rolled the body back this frame.
    pub collided: bool,
    pub ground: GroundSample,
}

impl FrameOutput {
    fn capture(state: &KinematicState, collided: bool, ground: GroundSample) -> Self {
        Self {
            position: state.position,
            yaw: state.yaw,
            tilt_x: state.tilt_x,
            tilt_z: state.tilt_z,
            is_jumping: state.is_jumping,
            in_air: state.in_air,
            horizontal_speed: state.horizontal_speed(),
            wheel_rotation: state.wheel_rotation,
            air_spin: state.air_spin,
            movement: state.movement,
            collided,
            ground,
        }
    }
}

/// Integrator plus resolver, driven in the fixed per-frame order.
#[derive(Clone, Debug)]
pub struct SkateBody {
    integrator: KinematicIntegrator,
    resolver: CollisionResolver,
}

impl SkateBody {
    pub fn new(settings: PhysicsSettings, position: Vec3) -> Self {
        Self {
            integrator: KinematicIntegrator::new(settings, position),
            resolver: CollisionResolver::new(),
        }
    }

    #[inline]
    pub fn integrator(&self) -> &KinematicIntegrator {
        &self.integrator
    }

    #[inline]
    pub fn integrator_mut(&mut self) -> &mut KinematicIntegrator {
        &mut self.integrator
    }

    #[inline]
    pub fn resolver(&self) -> &CollisionResolver {
        &self.resolver
    }

    #[inline]
    pub fn state(&self) -> &KinematicState {
        self.integrator.state()
    }

    /// Drop the body at `position` with no motion, keeping its heading.
    pub fn teleport(&mut self, position: Vec3) {
        self.integrator.teleport(position);
    }

    /// Run one frame:
    /// input, friction and integration, collisions, ground sample, gravity,
    /// slope tilt while grounded, air rotation.
    pub fn step(&mut self, input: &FrameInput, scene: &SceneGeometry, dt: f32) -> FrameOutput {
        let body = &mut self.integrator;

        body.handle_input(input, dt);
        body.update_physics(dt);
        let collided = self.resolver.check_collisions(body, scene);

        let ground = self.resolver.check_ground(body, scene);
        let movement = body.apply_gravity(ground.height, dt);
        if movement.is_on_ground()
            && let Some(normal) = ground.normal
        {
            body.apply_tilt(normal, dt);
        }
        body.apply_air_rotation(dt);

        FrameOutput::capture(body.state(), collided, ground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::ground_plane;
    use crate::constants::DEFAULT_DT;

    #[test]
    fn idle_body_stays_put() {
        let scene = SceneGeometry::build(vec![ground_plane(0, 0.0)]);
        let mut body = SkateBody::new(PhysicsSettings::default(), Vec3::new(1.0, 0.5, 2.0));

        for _ in 0..30 {
            let out = body.step(&FrameInput::idle(), &scene, DEFAULT_DT);
            assert_eq!(out.position, Vec3::new(1.0, 0.5, 2.0));
            assert_eq!(out.movement, MovementState::Grounded);
            assert!(!out.collided);
            assert!(out.ground.found);
        }
    }

    #[test]
    fn no_ground_falls_to_zero_height() {
        let scene = SceneGeometry::build(Vec::new());
        let mut body = SkateBody::new(PhysicsSettings::default(), Vec3::new(0.0, 3.0, 0.0));

        let out = body.step(&FrameInput::idle(), &scene, DEFAULT_DT);
        assert!(!out.ground.found);
        assert_eq!(out.movement, MovementState::Airborne);

        let mut landed = false;
        for _ in 0..200 {
            let out = body.step(&FrameInput::idle(), &scene, DEFAULT_DT);
            if out.movement == MovementState::Landed {
                assert_eq!(out.position.y, 0.0);
                landed = true;
                break;
            }
        }
        assert!(landed);
    }
}
