/*!
Kinematic integration for the skate body.

- state:      the body's kinematic state and the movement state machine label
- integrator: input handling, friction/integration, gravity, slope tilt, rollback
*/

pub mod integrator;
pub mod state;

pub use integrator::KinematicIntegrator;
pub use state::{KinematicState, MovementState};
