/// Number of simulated steps per second the tuning constants below were authored for.
///
/// Every per-step magnitude is multiplied by `time_scale = dt * STEPS_PER_SECOND`,
/// which keeps motion identical at any frame rate.
pub const STEPS_PER_SECOND: f32 = 60.0;

/// Frame time assumed when the caller has none (seconds).
pub const DEFAULT_DT: f32 = 1.0 / STEPS_PER_SECOND;

/// Cruising speed with no sprint applied (world units per step).
pub const BASE_SPEED: f32 = 0.2;

/// Upper bound of the sprint ramp (world units per step).
pub const MAX_SPRINT_SPEED: f32 = 0.4;

/// How much `current_speed` ramps per step while sprinting forward.
pub const SPRINT_ACCELERATION: f32 = 0.004;

/// Per-step horizontal velocity retention. Applied as `FRICTION^time_scale`.
pub const FRICTION: f32 = 0.9;

/// Vertical launch velocity of a jump at multiplier 1.0 (world units per step).
pub const JUMP_FORCE: f32 = 0.3;

/// Downward acceleration while airborne (world units per step^2).
pub const GRAVITY: f32 = 0.015;

/// Half extent of the playable square; x and z are clamped to `±WORLD_BOUNDS`.
pub const WORLD_BOUNDS: f32 = 98.0;

/// Height of the body's reference point above the surface it stands on.
pub const REST_HEIGHT: f32 = 0.5;

/// Length of a cardinal collision probe. The forward pre-check uses twice this.
pub const PROBE_DISTANCE: f32 = 0.4;

/// Heights above the body's base for the three forward pre-check rays.
pub const FORWARD_PROBE_HEIGHTS: [f32; 3] = [0.35, 0.8, 1.4];

/// Height above the body's base of the cardinal probes.
pub const CHEST_HEIGHT: f32 = 1.0;

/// The ground ray starts this far above `position.y`.
pub const GROUND_PROBE_LIFT: f32 = 2.0;

/// Maximum length of the downward ground ray.
pub const GROUND_PROBE_DISTANCE: f32 = 50.0;

/// Slope-induced acceleration per unit of `1 - normal.y`.
pub const SLOPE_ACCELERATION: f32 = 0.02;

/// Wheel angle advanced per world unit travelled (radians).
pub const WHEEL_SPIN_FACTOR: f32 = 3.0;

/// Cosmetic board rotation rate while airborne (radians per step).
pub const AIR_SPIN_RATE: f32 = 0.05;

/// Vertical slack above the ground before a grounded body counts as airborne.
pub const AIRBORNE_MARGIN: f32 = 0.1;

/// Horizontal speeds below this count as stopped.
pub const STOP_SPEED: f32 = 0.01;

/// Velocity components below this snap to zero after friction.
pub const VELOCITY_SNAP: f32 = 0.001;

/// Landing friction applied once on touchdown (`LANDING_FRICTION^time_scale`).
pub const LANDING_FRICTION: f32 = 0.7;

/// After landing friction, speeds below this also reset the sprint ramp.
pub const LANDING_STOP_SPEED: f32 = 0.05;

/// Reverse thrust runs at this fraction of `BASE_SPEED`.
pub const REVERSE_SPEED_FACTOR: f32 = 0.8;

/// Thrust per step is `effective_speed * THRUST_FACTOR * time_scale`.
pub const THRUST_FACTOR: f32 = 0.1;

/// Jump boost base when sprinting / when cruising.
pub const SPRINT_JUMP_BOOST: f32 = 1.1;
pub const CRUISE_JUMP_BOOST: f32 = 1.05;

/// Exponential smoothing factor for slope tilt, per call.
pub const TILT_SMOOTHING: f32 = 0.1;

/// Ground normals with `y` at or above this count as flat.
pub const FLAT_NORMAL_Y: f32 = 0.99;
