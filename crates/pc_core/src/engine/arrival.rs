//! Arrival cost model
//!
//! Ranks how quickly an agent can reach an arbitrary point without simulating
//! kinematics. The cost is the square of an *effective distance*: the straight
//! line distance, reduced by a bounded credit for velocity already carrying
//! the agent toward the target (or increased when it carries the agent away).
//! The squared form lets callers compare agents without a square root;
//! [`arrival_time`] takes the root and divides by the nominal agent speed when
//! an actual time estimate is needed.

use crate::engine::config::EngineConfig;
use crate::models::{Agent, Vec2};

/// Whether current velocity biases the arrival cost
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VelocityBias {
    #[default]
    Enabled,
    Disabled,
}

/// Squared effective distance from `agent` to `target`.
///
/// Never negative. Zero iff the agent is on the target, or close enough that
/// its closing-speed credit covers the whole remaining distance.
pub fn arrival_cost(agent: &Agent, target: Vec2, cfg: &EngineConfig, bias: VelocityBias) -> f32 {
    let delta = target - agent.pos;
    let dist = delta.length();
    if dist == 0.0 {
        return 0.0;
    }

    let effective = match bias {
        VelocityBias::Disabled => dist,
        VelocityBias::Enabled => {
            // Component of velocity along the line to the target:
            // positive = approaching, negative = receding.
            let closing = agent
                .vel
                .dot(delta.normalized())
                .clamp(-cfg.max_closing_speed, cfg.max_closing_speed);
            (dist - cfg.velocity_credit * closing).max(0.0)
        }
    };

    effective * effective
}

/// Estimated ticks for `agent` to reach `target`
pub fn arrival_time(agent: &Agent, target: Vec2, cfg: &EngineConfig, bias: VelocityBias) -> f32 {
    arrival_cost(agent, target, cfg, bias).sqrt() / cfg.agent_speed
}

/// Estimated ticks for the ball to travel the straight line `from` -> `to`
pub fn ball_travel_time(from: Vec2, to: Vec2, cfg: &EngineConfig) -> f32 {
    from.distance(to) / cfg.ball_speed
}
