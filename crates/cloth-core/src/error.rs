//! Error types for cloth setup and the simulation driver.

use std::fmt;

/// Errors that can occur while configuring or driving a cloth simulation.
///
/// Physics itself never fails: overstretched constraints tear, pinned points
/// ignore forces and stray points are clamped. Only setup and host-level
/// operations surface errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Canvas dimensions must be finite and larger than the 1-unit margin on each side.
    InvalidCanvas { width: f32, height: f32 },
    /// The grid needs at least one cell in each direction and no more points
    /// than a `u32` can index.
    InvalidGridDimensions { width: usize, height: usize },
    /// Lattice spacing must be positive and finite.
    InvalidSpacing(f32),
    /// Tear distance must be positive and finite.
    InvalidTearDistance(f32),
    /// Pointer radii must be non-negative and finite.
    InvalidRadius(f32),
    /// At least one relaxation pass per frame is required.
    InvalidIterations,
    /// Damping must be in (0, 1].
    InvalidDamping(f32),
    /// The nominal time step must be positive and finite.
    InvalidTimeStep(f32),
    /// Gravity must be finite.
    InvalidGravity(f32),
    /// Point index is out of bounds.
    PointOutOfBounds { index: usize, count: usize },
    /// A constraint cannot join a point to itself.
    SelfConstraint(usize),
    /// The host could not provide a draw surface.
    SurfaceUnavailable(String),
    /// The simulation has been torn down.
    Stopped,
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidCanvas { width, height } => {
                write!(f, "canvas {}x{} is too small or not finite", width, height)
            }
            ClothError::InvalidGridDimensions { width, height } => {
                write!(f, "cloth grid {}x{} is empty or too large", width, height)
            }
            ClothError::InvalidSpacing(s) => write!(f, "spacing {} must be positive", s),
            ClothError::InvalidTearDistance(d) => write!(f, "tear distance {} must be positive", d),
            ClothError::InvalidRadius(r) => write!(f, "pointer radius {} must be non-negative", r),
            ClothError::InvalidIterations => write!(f, "physics accuracy must be at least 1"),
            ClothError::InvalidDamping(d) => write!(f, "damping {} must be in (0, 1]", d),
            ClothError::InvalidTimeStep(dt) => write!(f, "time step {} must be positive", dt),
            ClothError::InvalidGravity(g) => write!(f, "gravity {} must be finite", g),
            ClothError::PointOutOfBounds { index, count } => {
                write!(f, "point index {} out of bounds (count: {})", index, count)
            }
            ClothError::SelfConstraint(index) => {
                write!(f, "point {} cannot be constrained to itself", index)
            }
            ClothError::SurfaceUnavailable(msg) => write!(f, "draw surface unavailable: {}", msg),
            ClothError::Stopped => write!(f, "simulation has been stopped"),
        }
    }
}

impl std::error::Error for ClothError {}
