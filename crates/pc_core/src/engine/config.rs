//! Engine configuration
//!
//! The contest thresholds and nominal speeds are empirically tuned values;
//! they live here as parameters so callers can vary them without recompiling.
//! Defaults reproduce the constants in [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants::{control, motion};

/// Tunable parameters shared by the control field and pass safety engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cost ratio below which a cell reads as uncontested (contest 0)
    pub fade_start: f32,
    /// Cost ratio at or above which a cell is maximally contested (contest 1)
    pub full_contest: f32,
    /// Default grid sampling step (logical units)
    pub grid_step: f32,
    /// Nominal agent speed (units/tick) for converting costs to times
    pub agent_speed: f32,
    /// Nominal straight-line ball speed (units/tick)
    pub ball_speed: f32,
    /// Clamp on the closing-speed component used by the arrival cost bias
    pub max_closing_speed: f32,
    /// Ticks worth of head start credited per unit of closing speed
    pub velocity_credit: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fade_start: control::FADE_START,
            full_contest: control::FULL_CONTEST,
            grid_step: control::DEFAULT_STEP,
            agent_speed: motion::NOMINAL_AGENT_SPEED,
            ball_speed: motion::NOMINAL_BALL_SPEED,
            max_closing_speed: motion::MAX_CLOSING_SPEED,
            velocity_credit: motion::VELOCITY_CREDIT,
        }
    }
}
