use thiserror::Error;

use crate::collision::GeometryId;

/// A single ray probe could not be evaluated.
///
/// Probes never abort a frame: callers log the error and treat it as "no hit".
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProbeError {
    #[error("probe origin is not finite: ({0}, {1}, {2})")]
    NonFiniteOrigin(f32, f32, f32),

    #[error("probe direction has zero length or is not finite")]
    DegenerateDirection,

    #[error("probe hit on geometry {id} produced a non-finite result")]
    NonFiniteHit { id: GeometryId },

    #[error("probe hit a collider that is not part of the scene snapshot")]
    UnknownCollider,
}

/// Physics settings failed validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettingsError {
    #[error("setting `{0}` must be finite")]
    NonFinite(&'static str),

    #[error("setting `{0}` must be greater than zero, got {1}")]
    NotPositive(&'static str, f32),

    #[error("friction must be in (0, 1], got {0}")]
    FrictionOutOfRange(f32),

    #[error("base speed {base} exceeds max sprint speed {max}")]
    SpeedOrder { base: f32, max: f32 },
}
