pub mod collision;
pub mod constants;
pub mod error;
pub mod frame;
pub mod input;
pub mod kinematic;
pub mod settings;
pub mod utils;

pub use collision::{
    CollisionResolver, GeometryDef, GeometryId, GroundSample, RayHit, SceneGeometry, ShapeDef,
    SurfaceClass, Vec3,
};
pub use constants::{DEFAULT_DT, STEPS_PER_SECOND};
pub use error::{ProbeError, SettingsError};
pub use frame::{FrameOutput, SkateBody};
pub use input::FrameInput;
pub use kinematic::{KinematicIntegrator, KinematicState, MovementState};
pub use settings::{PhysicsSettings, time_scale};
pub use utils::{heading_from_yaw, planar_distance_sq};
