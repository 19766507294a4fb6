use crate::collision::Vec3;
use crate::utils::planar_speed;

/// Label of the movement state machine after the last gravity step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementState {
    /// Resting on the ground sample.
    #[default]
    Grounded,
    /// Rising or falling after a jump.
    Jumping,
    /// Falling without having jumped (rolled off an edge).
    Airborne,
    /// Touched down during this frame.
    Landed,
}

impl MovementState {
    #[inline]
    pub fn is_on_ground(self) -> bool {
        matches!(self, MovementState::Grounded | MovementState::Landed)
    }
}

/// Everything the integrator knows about the body.
///
/// Written by the integrator and, on a blocking contact, by the resolver; nothing else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub tilt_x: f32,
    pub tilt_z: f32,
    pub is_jumping: bool,
    pub in_air: bool,
    /// Sprint-ramped forward speed, always within `[base_speed, max_sprint_speed]`.
    pub current_speed: f32,
    /// Last collision-safe position; the rollback target.
    pub previous_position: Vec3,
    /// Horizontal speed was above the stop threshold on the previous physics step.
    pub was_moving: bool,
    /// Cosmetic wheel angle (radians).
    pub wheel_rotation: f32,
    /// Cosmetic board rotation while airborne (radians).
    pub air_spin: f32,
    pub movement: MovementState,
}

impl KinematicState {
    pub fn at_rest(position: Vec3, base_speed: f32) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            yaw: 0.0,
            tilt_x: 0.0,
            tilt_z: 0.0,
            is_jumping: false,
            in_air: false,
            current_speed: base_speed,
            previous_position: position,
            was_moving: false,
            wheel_rotation: 0.0,
            air_spin: 0.0,
            movement: MovementState::Grounded,
        }
    }

    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        planar_speed(&self.velocity)
    }

    /// Jumping or free-falling.
    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.is_jumping || self.in_air
    }
}
