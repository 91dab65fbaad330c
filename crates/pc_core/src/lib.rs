//! # pc_core - Deterministic Pitch Control Engine
//!
//! Computes, for two opposing teams of mobile agents on a bounded field,
//! a graded spatial control map, a segment-interception safety test for
//! passes, and a deterministic timeline capture/replay mechanism.
//!
//! ## Features
//! - 100% deterministic evaluation (same snapshot = same output)
//! - Velocity-biased arrival costs without kinematic simulation
//! - Resolution-decoupled field sampling (renderer handles upscaling)
//! - Lossless record/replay of agent and ball trajectories
//!
//! Presentation, input translation, and viewport handling are external
//! collaborators: they feed a [`Session`] absolute logical coordinates and a
//! monotonically increasing tick timestamp, and consume its cell grid, pass
//! verdicts, and replay snapshots.

pub mod constants;
pub mod engine;
pub mod error;
pub mod models;
pub mod replay;
pub mod session;

// Re-export the public API surface
pub use engine::{
    arrival_cost, arrival_time, ball_travel_time, CellControl, ControlCell, ControlMode,
    EngineConfig, PassCandidate, PassVerdict, VelocityBias,
};
pub use error::{CoreError, Result};
pub use models::{Agent, Ball, Field, TeamSide, Vec2};
pub use replay::{AgentFrame, RecordingFrame, Timeline, TimelineState};
pub use session::Session;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
