//! Computational engines
//!
//! - [`arrival`]: velocity-biased arrival cost model
//! - [`control`]: grid-sampled control field
//! - [`pass`]: segment-interception pass safety test
//! - [`config`]: shared tunable parameters

pub mod arrival;
pub mod config;
pub mod control;
pub mod pass;

pub use arrival::{arrival_cost, arrival_time, ball_travel_time, VelocityBias};
pub use config::EngineConfig;
pub use control::{CellControl, ControlCell, ControlMode};
pub use pass::{PassCandidate, PassVerdict};
