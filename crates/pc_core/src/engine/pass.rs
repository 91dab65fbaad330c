//! Pass safety analyzer
//!
//! Decides whether a straight pass from an origin to a receiver can be
//! intercepted. Each opponent is projected onto the pass segment (projection
//! parameter clamped to [0, 1] so the test point never falls behind the
//! origin or beyond the receiver); the opponent races the ball to that point.

use crate::constants::pass;
use crate::engine::arrival::{arrival_time, VelocityBias};
use crate::engine::config::EngineConfig;
use crate::models::{Agent, Vec2};

/// Verdict for one candidate pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassVerdict {
    Safe,
    /// The first opponent found that reaches the segment no later than the ball
    Unsafe { interceptor: u32 },
    /// Origin and receiver coincide; no meaningful segment to project onto
    Degenerate,
}

impl PassVerdict {
    #[inline]
    pub fn is_safe(&self) -> bool {
        matches!(self, PassVerdict::Safe)
    }
}

/// A (receiver, verdict) pair from a bulk evaluation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassCandidate {
    pub receiver: u32,
    pub verdict: PassVerdict,
}

/// Closest point on the segment `origin` -> `receiver` to `p`,
/// with the clamped projection parameter
fn project_onto_segment(p: Vec2, origin: Vec2, receiver: Vec2) -> (Vec2, f32) {
    let seg = receiver - origin;
    let t = ((p - origin).dot(seg) / seg.length_sq()).clamp(0.0, 1.0);
    (origin + seg * t, t)
}

/// Test one pass against every opponent. Stops at the first interceptor.
///
/// The `<=` rule is deliberate: an opponent that arrives exactly when the
/// ball does wins the duel, so equality reads as unsafe.
pub fn evaluate_pass(
    origin: Vec2,
    receiver_pos: Vec2,
    opponents: &[&Agent],
    cfg: &EngineConfig,
    bias: VelocityBias,
) -> PassVerdict {
    let seg_len = origin.distance(receiver_pos);
    if seg_len < pass::SEGMENT_EPSILON {
        return PassVerdict::Degenerate;
    }

    for opp in opponents {
        let (point, t) = project_onto_segment(opp.pos, origin, receiver_pos);
        let ball_time = (seg_len * t) / cfg.ball_speed;
        let opp_time = arrival_time(opp, point, cfg, bias);
        if opp_time <= ball_time {
            return PassVerdict::Unsafe { interceptor: opp.id };
        }
    }
    PassVerdict::Safe
}

/// Evaluate every agent in `receivers` as an independent pass candidate
pub fn evaluate_receivers(
    origin: Vec2,
    receivers: &[&Agent],
    opponents: &[&Agent],
    cfg: &EngineConfig,
    bias: VelocityBias,
) -> Vec<PassCandidate> {
    receivers
        .iter()
        .map(|r| PassCandidate {
            receiver: r.id,
            verdict: evaluate_pass(origin, r.pos, opponents, cfg, bias),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamSide;

    fn opponent(id: u32, x: f32, y: f32) -> Agent {
        Agent { id, side: TeamSide::Away, pos: Vec2::new(x, y), vel: Vec2::ZERO }
    }

    #[test]
    fn test_no_opponents_is_safe() {
        let cfg = EngineConfig::default();
        let verdict = evaluate_pass(
            Vec2::ZERO,
            Vec2::new(40.0, 0.0),
            &[],
            &cfg,
            VelocityBias::Enabled,
        );
        assert_eq!(verdict, PassVerdict::Safe);
    }

    #[test]
    fn test_degenerate_segment_is_not_safe() {
        let cfg = EngineConfig::default();
        let opp = opponent(7, 90.0, 90.0);
        let verdict = evaluate_pass(
            Vec2::new(5.0, 5.0),
            Vec2::new(5.0, 5.0),
            &[&opp],
            &cfg,
            VelocityBias::Enabled,
        );
        assert_eq!(verdict, PassVerdict::Degenerate);
        assert!(!verdict.is_safe());
    }

    #[test]
    fn test_opponent_on_receiver_intercepts() {
        let cfg = EngineConfig::default();
        let receiver = Vec2::new(30.0, 0.0);
        let opp = opponent(3, 30.0, 0.0);
        let verdict =
            evaluate_pass(Vec2::ZERO, receiver, &[&opp], &cfg, VelocityBias::Enabled);
        assert_eq!(verdict, PassVerdict::Unsafe { interceptor: 3 });
    }

    #[test]
    fn test_projection_clamps_behind_origin() {
        // Opponent well behind the origin projects to t = 0; ball time there
        // is 0, opponent time is positive, so it cannot intercept at t = 0.
        let cfg = EngineConfig::default();
        let opp = opponent(1, -50.0, 0.0);
        let verdict = evaluate_pass(
            Vec2::ZERO,
            Vec2::new(40.0, 0.0),
            &[&opp],
            &cfg,
            VelocityBias::Enabled,
        );
        assert_eq!(verdict, PassVerdict::Safe);
    }

    #[test]
    fn test_borderline_equality_reads_unsafe() {
        // Ball (0,0) -> receiver (100,0), lone opponent at (50,1).
        // Projected point is (50,0): ball time = 50/ball_speed, opponent time
        // = 1/agent_speed. Choose speeds so the two are exactly equal.
        let mut cfg = EngineConfig::default();
        cfg.agent_speed = 2.5;
        cfg.ball_speed = 125.0; // 50/125 = 0.4 = 1/2.5
        let opp = opponent(9, 50.0, 1.0);
        let verdict = evaluate_pass(
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            &[&opp],
            &cfg,
            VelocityBias::Enabled,
        );
        assert_eq!(verdict, PassVerdict::Unsafe { interceptor: 9 });

        // Any faster ball and the same pass is safe
        cfg.ball_speed = 126.0;
        let verdict = evaluate_pass(
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            &[&opp],
            &cfg,
            VelocityBias::Enabled,
        );
        assert_eq!(verdict, PassVerdict::Safe);
    }

    #[test]
    fn test_first_interceptor_reported() {
        let cfg = EngineConfig::default();
        let near = opponent(1, 10.0, 0.5);
        let far = opponent(2, 30.0, 0.5);
        let verdict = evaluate_pass(
            Vec2::ZERO,
            Vec2::new(40.0, 0.0),
            &[&near, &far],
            &cfg,
            VelocityBias::Enabled,
        );
        assert_eq!(verdict, PassVerdict::Unsafe { interceptor: 1 });
    }

    #[test]
    fn test_receivers_evaluated_independently() {
        let cfg = EngineConfig::default();
        let covered = Agent {
            id: 10,
            side: TeamSide::Home,
            pos: Vec2::new(40.0, 0.0),
            vel: Vec2::ZERO,
        };
        let open = Agent {
            id: 11,
            side: TeamSide::Home,
            pos: Vec2::new(0.0, 40.0),
            vel: Vec2::ZERO,
        };
        let marker = opponent(20, 40.0, 0.0);

        let candidates = evaluate_receivers(
            Vec2::ZERO,
            &[&covered, &open],
            &[&marker],
            &cfg,
            VelocityBias::Enabled,
        );
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].verdict, PassVerdict::Unsafe { interceptor: 20 });
        assert_eq!(candidates[1].receiver, 11);
        assert!(candidates[1].verdict.is_safe());
    }
}
