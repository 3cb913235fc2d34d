pub mod bodies;
pub mod engine;

pub use bodies::{Obstacle, PlayerBody, TargetZone};
pub use engine::{GameEngine, GamePhase, StepOutcome};
