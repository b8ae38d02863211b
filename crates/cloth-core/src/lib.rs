//! Verlet cloth: a grid of particles joined by tearable distance constraints,
//! relaxed a few times per frame and driven by pointer drag and cut input.

pub mod cloth;
pub mod config;
pub mod constraint;
pub mod draw;
pub mod error;
pub mod forces;
pub mod math;
pub mod point;
pub mod simulation;

pub use cloth::Cloth;
pub use config::{ClothConfig, CutPolicy};
pub use constraint::{ConstraintArena, ConstraintId, DistanceConstraint};
pub use draw::{DrawSurface, Segment};
pub use error::ClothError;
pub use forces::pointer::{InputMode, PointerButton, PointerInfluence, PointerState};
pub use math::Bounds;
pub use point::Point;
pub use simulation::Simulation;
