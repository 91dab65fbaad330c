//! Control field engine
//!
//! Samples a coarse grid over the field and decides, per cell, which team
//! reaches the cell center first. The grid resolution is decoupled from any
//! display resolution: callers get one value per sampled cell and are
//! responsible for upscaling.
//!
//! Two modes:
//! - Plain: pure arrival-cost race between the two sides, with a graded
//!   contest scalar where the costs are close.
//! - Ball-relative: arrival *times* are compared against the ball's own
//!   straight-line travel time; a cell both sides can reach before the ball
//!   has no uncontested first touch and is reported neutral.

use rayon::prelude::*;

use crate::constants::control;
use crate::engine::arrival::{arrival_cost, arrival_time, ball_travel_time, VelocityBias};
use crate::engine::config::EngineConfig;
use crate::models::{Agent, TeamSide, Vec2};

/// Field sampling mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControlMode {
    #[default]
    Plain,
    BallRelative,
}

/// Per-cell control verdict with a contest scalar in [0, 1]
/// (0 = unambiguous control, 1 = maximal contest)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellControl {
    Held { side: TeamSide, contest: f32 },
    Contested { contest: f32 },
}

impl CellControl {
    /// Winning side, if any
    pub fn side(&self) -> Option<TeamSide> {
        match self {
            CellControl::Held { side, .. } => Some(*side),
            CellControl::Contested { .. } => None,
        }
    }

    pub fn contest(&self) -> f32 {
        match self {
            CellControl::Held { contest, .. } | CellControl::Contested { contest } => *contest,
        }
    }
}

/// One sampled grid cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlCell {
    pub center: Vec2,
    pub control: CellControl,
}

/// Map a min/max ratio through the fade-start / full-contest window
fn contest_scalar(ratio: f32, cfg: &EngineConfig) -> f32 {
    if cfg.full_contest <= cfg.fade_start {
        // Degenerate window: hard cut at the threshold
        return if ratio >= cfg.full_contest { 1.0 } else { 0.0 };
    }
    ((ratio - cfg.fade_start) / (cfg.full_contest - cfg.fade_start)).clamp(0.0, 1.0)
}

/// Minimum arrival cost over one side's agents; empty side is unreachable
fn best_cost(agents: &[&Agent], target: Vec2, cfg: &EngineConfig, bias: VelocityBias) -> f32 {
    agents
        .iter()
        .map(|a| arrival_cost(a, target, cfg, bias))
        .fold(f32::INFINITY, f32::min)
}

/// Minimum arrival time over one side's agents
fn best_time(agents: &[&Agent], target: Vec2, cfg: &EngineConfig, bias: VelocityBias) -> f32 {
    agents
        .iter()
        .map(|a| arrival_time(a, target, cfg, bias))
        .fold(f32::INFINITY, f32::min)
}

fn plain_cell(cost_home: f32, cost_away: f32, cfg: &EngineConfig) -> Option<CellControl> {
    match (cost_home.is_finite(), cost_away.is_finite()) {
        (false, false) => None,
        (true, false) => Some(CellControl::Held { side: TeamSide::Home, contest: 0.0 }),
        (false, true) => Some(CellControl::Held { side: TeamSide::Away, contest: 0.0 }),
        (true, true) => {
            // Ties break to Home: first side scanned wins at equal cost
            let side = if cost_home <= cost_away { TeamSide::Home } else { TeamSide::Away };
            let (lo, hi) = if cost_home <= cost_away {
                (cost_home, cost_away)
            } else {
                (cost_away, cost_home)
            };
            let ratio = if hi > 0.0 { lo / hi } else { 1.0 };
            Some(CellControl::Held { side, contest: contest_scalar(ratio, cfg) })
        }
    }
}

fn ball_relative_cell(
    time_home: f32,
    time_away: f32,
    ball_time: f32,
    cfg: &EngineConfig,
) -> Option<CellControl> {
    match (time_home.is_finite(), time_away.is_finite()) {
        (false, false) => None,
        (true, false) => Some(CellControl::Held { side: TeamSide::Home, contest: 0.0 }),
        (false, true) => Some(CellControl::Held { side: TeamSide::Away, contest: 0.0 }),
        (true, true) => {
            if time_home < ball_time && time_away < ball_time {
                // Both sides beat the ball: nobody gets an uncontested first touch
                return Some(CellControl::Contested { contest: 1.0 });
            }
            let side = if time_home <= time_away { TeamSide::Home } else { TeamSide::Away };
            let (lo, hi) =
                if time_home <= time_away { (time_home, time_away) } else { (time_away, time_home) };
            let ratio = if hi > 0.0 { lo / hi } else { 1.0 };
            Some(CellControl::Held { side, contest: contest_scalar(ratio, cfg) })
        }
    }
}

/// Sample the control field at `step` resolution.
///
/// Deterministic: a pure function of the given snapshot and parameters. Rows
/// are evaluated in parallel but collected in row-major order.
pub fn evaluate_field(
    agents: &[Agent],
    ball_pos: Vec2,
    field_width: f32,
    field_height: f32,
    step: f32,
    mode: ControlMode,
    bias: VelocityBias,
    cfg: &EngineConfig,
) -> Vec<ControlCell> {
    let step = step.max(control::MIN_STEP);
    let home: Vec<&Agent> = agents.iter().filter(|a| a.side == TeamSide::Home).collect();
    let away: Vec<&Agent> = agents.iter().filter(|a| a.side == TeamSide::Away).collect();
    if home.is_empty() && away.is_empty() {
        return Vec::new();
    }

    let cols = (field_width / step).ceil() as usize;
    let rows = (field_height / step).ceil() as usize;

    (0..rows)
        .into_par_iter()
        .map(|row| {
            let cy = (row as f32 + 0.5) * step;
            let mut out = Vec::with_capacity(cols);
            for col in 0..cols {
                let center = Vec2::new((col as f32 + 0.5) * step, cy);
                let control = match mode {
                    ControlMode::Plain => {
                        let ch = best_cost(&home, center, cfg, bias);
                        let ca = best_cost(&away, center, cfg, bias);
                        plain_cell(ch, ca, cfg)
                    }
                    ControlMode::BallRelative => {
                        let th = best_time(&home, center, cfg, bias);
                        let ta = best_time(&away, center, cfg, bias);
                        let bt = ball_travel_time(ball_pos, center, cfg);
                        ball_relative_cell(th, ta, bt, cfg)
                    }
                };
                if let Some(control) = control {
                    out.push(ControlCell { center, control });
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}
