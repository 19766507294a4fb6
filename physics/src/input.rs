use crate::constants::DEFAULT_DT;

/// Per-frame intents produced by the input/game-state collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Signed yaw delta per unscaled (1/60 s) step.
    pub rotation: f32,
    /// Negative = forward, positive = backward. Only the sign drives thrust.
    pub move_z: f32,
    /// Edge-triggered: true only on the frame a jump should begin.
    pub jump_requested: bool,
    pub sprint_requested: bool,
    /// Jump strength, clamped to `[1.0, 2.0]`.
    pub jump_power_multiplier: f32,
}

impl FrameInput {
    /// Frame time collaborators should pass when they have no clock of their own.
    pub const DEFAULT_DT: f32 = DEFAULT_DT;

    pub const MIN_JUMP_POWER: f32 = 1.0;
    pub const MAX_JUMP_POWER: f32 = 2.0;

    /// No rotation, no movement, no jump.
    pub fn idle() -> Self {
        Self {
            rotation: 0.0,
            move_z: 0.0,
            jump_requested: false,
            sprint_requested: false,
            jump_power_multiplier: Self::MIN_JUMP_POWER,
        }
    }

    pub fn forward() -> Self {
        Self {
            move_z: -1.0,
            ..Self::idle()
        }
    }

    pub fn backward() -> Self {
        Self {
            move_z: 1.0,
            ..Self::idle()
        }
    }

    pub fn with_sprint(mut self) -> Self {
        self.sprint_requested = true;
        self
    }

    pub fn with_jump(mut self, power: f32) -> Self {
        self.jump_requested = true;
        self.jump_power_multiplier = power;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Copy with non-finite axes zeroed and the jump power clamped.
    pub fn sanitized(&self) -> Self {
        let finite_or_zero = |v: f32| if v.is_finite() { v } else { 0.0 };
        let power = if self.jump_power_multiplier.is_finite() {
            self.jump_power_multiplier
                .clamp(Self::MIN_JUMP_POWER, Self::MAX_JUMP_POWER)
        } else {
            Self::MIN_JUMP_POWER
        };

        Self {
            rotation: finite_or_zero(self.rotation),
            move_z: finite_or_zero(self.move_z),
            jump_power_multiplier: power,
            ..*self
        }
    }
}

impl Default for FrameInput {
    fn default() -> Self {
        Self::idle()
    }
}
