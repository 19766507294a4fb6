/*!
Tunable parameters for the skate body.

Defaults come from [`crate::constants`]. A collaborator can override them from
game data (the `sim` binary reads JSON) and must call
[`PhysicsSettings::validate`] before handing them to a body.

Notes
- Speeds are world units per 1/60 s step, accelerations per step squared.
- Distances are world units.
*/

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::SettingsError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub base_speed: f32,
    pub max_sprint_speed: f32,
    pub sprint_acceleration: f32,
    pub friction: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub world_bounds: f32,
    pub rest_height: f32,
    pub probe_distance: f32,
    pub forward_probe_heights: [f32; 3],
    pub chest_height: f32,
    pub ground_probe_lift: f32,
    pub ground_probe_distance: f32,
    pub slope_acceleration: f32,
    pub wheel_spin_factor: f32,
    pub air_spin_rate: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            max_sprint_speed: MAX_SPRINT_SPEED,
            sprint_acceleration: SPRINT_ACCELERATION,
            friction: FRICTION,
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,
            world_bounds: WORLD_BOUNDS,
            rest_height: REST_HEIGHT,
            probe_distance: PROBE_DISTANCE,
            forward_probe_heights: FORWARD_PROBE_HEIGHTS,
            chest_height: CHEST_HEIGHT,
            ground_probe_lift: GROUND_PROBE_LIFT,
            ground_probe_distance: GROUND_PROBE_DISTANCE,
            slope_acceleration: SLOPE_ACCELERATION,
            wheel_spin_factor: WHEEL_SPIN_FACTOR,
            air_spin_rate: AIR_SPIN_RATE,
        }
    }
}

impl PhysicsSettings {
    /// Reject settings that would break the integrator's invariants.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let scalars = [
            ("base_speed", self.base_speed),
            ("max_sprint_speed", self.max_sprint_speed),
            ("sprint_acceleration", self.sprint_acceleration),
            ("friction", self.friction),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("world_bounds", self.world_bounds),
            ("rest_height", self.rest_height),
            ("probe_distance", self.probe_distance),
            ("chest_height", self.chest_height),
            ("ground_probe_lift", self.ground_probe_lift),
            ("ground_probe_distance", self.ground_probe_distance),
            ("slope_acceleration", self.slope_acceleration),
            ("wheel_spin_factor", self.wheel_spin_factor),
            ("air_spin_rate", self.air_spin_rate),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(SettingsError::NonFinite(name));
            }
        }
        if self.forward_probe_heights.iter().any(|h| !h.is_finite()) {
            return Err(SettingsError::NonFinite("forward_probe_heights"));
        }

        for (name, value) in [
            ("base_speed", self.base_speed),
            ("gravity", self.gravity),
            ("world_bounds", self.world_bounds),
            ("probe_distance", self.probe_distance),
            ("ground_probe_distance", self.ground_probe_distance),
        ] {
            if value <= 0.0 {
                return Err(SettingsError::NotPositive(name, value));
            }
        }

        if self.friction <= 0.0 || self.friction > 1.0 {
            return Err(SettingsError::FrictionOutOfRange(self.friction));
        }
        if self.base_speed > self.max_sprint_speed {
            return Err(SettingsError::SpeedOrder {
                base: self.base_speed,
                max: self.max_sprint_speed,
            });
        }
        Ok(())
    }

    /// Length of the three forward pre-check rays.
    #[inline]
    pub fn forward_probe_distance(&self) -> f32 {
        self.probe_distance * 2.0
    }
}

/// Convert elapsed seconds to the step multiplier used by every integration rule.
///
/// Non-finite or non-positive `dt` falls back to [`DEFAULT_DT`].
#[inline]
pub fn time_scale(dt: f32) -> f32 {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { DEFAULT_DT };
    dt * STEPS_PER_SECOND
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(PhysicsSettings::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_friction_above_one() {
        let settings = PhysicsSettings {
            friction: 1.2,
            ..PhysicsSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::FrictionOutOfRange(1.2))
        );
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let settings = PhysicsSettings {
            base_speed: 0.5,
            max_sprint_speed: 0.3,
            ..PhysicsSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::SpeedOrder { .. })
        ));
    }

    #[test]
    fn rejects_nan() {
        let settings = PhysicsSettings {
            gravity: f32::NAN,
            ..PhysicsSettings::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::NonFinite("gravity")));
    }

    #[test]
    fn time_scale_is_one_at_sixty_hz() {
        assert!((time_scale(1.0 / 60.0) - 1.0).abs() < 1.0e-6);
        assert!((time_scale(1.0 / 30.0) - 2.0).abs() < 1.0e-6);
    }

    #[test]
    fn time_scale_falls_back_on_bad_dt() {
        assert!((time_scale(0.0) - 1.0).abs() < 1.0e-6);
        assert!((time_scale(f32::NAN) - 1.0).abs() < 1.0e-6);
        assert!((time_scale(-0.5) - 1.0).abs() < 1.0e-6);
    }
}
