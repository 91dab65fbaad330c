//! Session: owner of all per-session state
//!
//! One `Session` is created at session start and torn down at session end; it
//! owns the roster, the ball, the field, the engine configuration, and the
//! timeline. There is no ambient global state. All mutation is sequenced by
//! the external tick driver, so every operation here is synchronous and runs
//! to completion.

use log::warn;

use crate::constants::motion;
use crate::engine::arrival::VelocityBias;
use crate::engine::config::EngineConfig;
use crate::engine::control::{evaluate_field, ControlCell, ControlMode};
use crate::engine::pass::{evaluate_pass, evaluate_receivers, PassCandidate, PassVerdict};
use crate::error::{CoreError, Result};
use crate::models::{Agent, Ball, Field, TeamSide, Vec2};
use crate::replay::{RecordingFrame, Timeline, TimelineController, TimelineState};

pub struct Session {
    field: Field,
    agents: Vec<Agent>,
    ball: Ball,
    config: EngineConfig,
    timeline: TimelineController,
}

impl Session {
    /// Create a session with `per_side` agents per team in a fixed mirrored
    /// formation: each side forms a vertical line at a quarter of the field
    /// length, spread evenly across the width. The ball starts at center.
    pub fn new(field: Field, per_side: u32) -> Self {
        let mut agents = Vec::with_capacity(per_side as usize * 2);
        for i in 0..per_side {
            let y = field.height() * (i + 1) as f32 / (per_side + 1) as f32;
            agents.push(Agent {
                id: i,
                side: TeamSide::Home,
                pos: field.clamp_agent(Vec2::new(field.width() * 0.25, y)),
                vel: Vec2::ZERO,
            });
            agents.push(Agent {
                id: per_side + i,
                side: TeamSide::Away,
                pos: field.clamp_agent(Vec2::new(field.width() * 0.75, y)),
                vel: Vec2::ZERO,
            });
        }
        Self {
            field,
            agents,
            ball: Ball { pos: field.center() },
            config: EngineConfig::default(),
            timeline: TimelineController::new(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    // ========================================
    // Entity model: reads
    // ========================================

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: u32) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agents_on(&self, side: TeamSide) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(move |a| a.side == side)
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    // ========================================
    // Entity model: clamped writes
    // ========================================

    /// Move an agent; the point is clamped into the inset field rectangle.
    pub fn set_agent_position(&mut self, id: u32, point: Vec2) -> Result<()> {
        let clamped = self.field.clamp_agent(point);
        let agent = self.agent_mut(id)?;
        agent.pos = clamped;
        Ok(())
    }

    /// Set an agent's velocity; magnitude is clamped to the configured maximum.
    pub fn set_agent_velocity(&mut self, id: u32, vector: Vec2) -> Result<()> {
        let agent = self.agent_mut(id)?;
        agent.vel = vector.clamp_length(motion::MAX_AGENT_SPEED);
        Ok(())
    }

    pub fn set_ball_position(&mut self, point: Vec2) {
        self.ball.pos = self.field.clamp_ball(point);
    }

    fn agent_mut(&mut self, id: u32) -> Result<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id).ok_or(CoreError::AgentNotFound(id))
    }

    // ========================================
    // Control field
    // ========================================

    /// Sample the control field over the whole field extent.
    pub fn evaluate_field(
        &self,
        step: f32,
        mode: ControlMode,
        bias: VelocityBias,
    ) -> Vec<ControlCell> {
        evaluate_field(
            &self.agents,
            self.ball.pos,
            self.field.width(),
            self.field.height(),
            step,
            mode,
            bias,
            &self.config,
        )
    }

    // ========================================
    // Pass safety
    // ========================================

    /// Can the ball travel from `origin` to the named receiver without any
    /// agent of the opposing side intercepting it?
    pub fn pass_safety(&self, origin: Vec2, receiver: u32, bias: VelocityBias) -> Result<PassVerdict> {
        let receiver = self.agent(receiver).ok_or(CoreError::AgentNotFound(receiver))?;
        let opponents: Vec<&Agent> = self.agents_on(receiver.side.opponent()).collect();
        Ok(evaluate_pass(origin, receiver.pos, &opponents, &self.config, bias))
    }

    /// Evaluate every agent of `side` as an independent pass candidate from
    /// `origin`.
    pub fn safe_receivers(
        &self,
        origin: Vec2,
        side: TeamSide,
        bias: VelocityBias,
    ) -> Vec<PassCandidate> {
        let receivers: Vec<&Agent> = self.agents_on(side).collect();
        let opponents: Vec<&Agent> = self.agents_on(side.opponent()).collect();
        evaluate_receivers(origin, &receivers, &opponents, &self.config, bias)
    }

    // ========================================
    // Timeline
    // ========================================

    pub fn timeline(&self) -> &Timeline {
        self.timeline.timeline()
    }

    pub fn timeline_state(&self) -> &TimelineState {
        self.timeline.state()
    }

    pub fn start_recording(&mut self, now: f64) -> Result<()> {
        self.timeline.start_recording(now)
    }

    pub fn stop_recording(&mut self) -> Result<()> {
        self.timeline.stop_recording()
    }

    pub fn start_replay(&mut self, now: f64, speed: f32) -> Result<()> {
        self.timeline.start_replay(now, speed)
    }

    pub fn stop_replay(&mut self) -> Result<()> {
        self.timeline.stop_replay()
    }

    /// One evaluation tick at timestamp `now`.
    ///
    /// Replay overwrite runs before capture so a recorded frame always
    /// reflects the state actually exposed to readers this tick. (The two
    /// states are mutually exclusive, so in practice one branch runs.)
    pub fn tick(&mut self, now: f64) {
        if let Some(frame) = self.timeline.playback_frame(now) {
            self.apply_frame(&frame);
        }
        if self.timeline.is_recording() {
            let frame = self.snapshot();
            self.timeline.capture(now, frame);
        }
    }

    /// Deep-copy snapshot of all tracked entity state
    fn snapshot(&self) -> RecordingFrame {
        RecordingFrame {
            t: 0.0, // stamped by the controller relative to recording start
            agents: self.agents.iter().map(Into::into).collect(),
            ball: self.ball.pos,
        }
    }

    fn apply_frame(&mut self, frame: &RecordingFrame) {
        for af in &frame.agents {
            match self.agents.iter_mut().find(|a| a.id == af.id) {
                Some(agent) => {
                    agent.pos = self.field.clamp_agent(af.pos);
                    agent.vel = af.vel.clamp_length(motion::MAX_AGENT_SPEED);
                }
                None => warn!("replay frame references unknown agent {}", af.id),
            }
        }
        self.ball.pos = self.field.clamp_ball(frame.ball);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Field::with_size(100.0, 100.0), 2)
    }

    #[test]
    fn test_formation_is_mirrored() {
        let s = session();
        assert_eq!(s.agents().len(), 4);
        let home: Vec<&Agent> = s.agents_on(TeamSide::Home).collect();
        let away: Vec<&Agent> = s.agents_on(TeamSide::Away).collect();
        assert_eq!(home.len(), 2);
        for (h, a) in home.iter().zip(&away) {
            assert_eq!(h.pos.y, a.pos.y);
            assert!((h.pos.x - 25.0).abs() < 1e-5);
            assert!((a.pos.x - 75.0).abs() < 1e-5);
        }
        assert_eq!(s.ball().pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_unknown_agent_write_is_reported_not_fatal() {
        let mut s = session();
        let before = s.agents().to_vec();
        assert_eq!(s.set_agent_position(99, Vec2::new(1.0, 1.0)), Err(CoreError::AgentNotFound(99)));
        assert_eq!(s.set_agent_velocity(99, Vec2::new(1.0, 1.0)), Err(CoreError::AgentNotFound(99)));
        assert_eq!(s.agents(), &before[..]);
    }

    #[test]
    fn test_writes_are_clamped() {
        let mut s = session();
        s.set_agent_position(0, Vec2::new(-500.0, 500.0)).unwrap();
        let a = s.agent(0).unwrap();
        assert!(a.pos.x >= 0.0 && a.pos.y <= 100.0);

        s.set_agent_velocity(0, Vec2::new(100.0, 0.0)).unwrap();
        assert!(s.agent(0).unwrap().vel.length() <= motion::MAX_AGENT_SPEED + 1e-5);

        s.set_ball_position(Vec2::new(1e6, -1e6));
        let b = s.ball().pos;
        assert!(b.x <= 100.0 && b.y >= 0.0);
    }

    #[test]
    fn test_record_replay_round_trip_is_lossless() {
        let mut s = session();
        s.start_recording(0.0).unwrap();

        // Drive some motion while recording
        let mut expected = Vec::new();
        for i in 0..5u32 {
            s.set_agent_position(0, Vec2::new(30.0 + i as f32 * 3.0, 40.0)).unwrap();
            s.set_agent_velocity(0, Vec2::new(1.0, 0.5 * i as f32)).unwrap();
            s.set_ball_position(Vec2::new(50.0, 50.0 - i as f32));
            s.tick(i as f64);
            expected.push((s.agent(0).unwrap().clone(), s.ball().pos));
        }
        s.stop_recording().unwrap();
        assert_eq!(s.timeline().len(), 5);

        // Scramble live state, then replay and compare at matched timestamps
        s.set_agent_position(0, Vec2::new(90.0, 90.0)).unwrap();
        s.set_ball_position(Vec2::new(10.0, 10.0));

        s.start_replay(100.0, 1.0).unwrap();
        for (i, (agent, ball)) in expected.iter().enumerate() {
            s.tick(100.0 + i as f64);
            assert_eq!(s.agent(0).unwrap().pos, agent.pos, "frame {}", i);
            assert_eq!(s.agent(0).unwrap().vel, agent.vel, "frame {}", i);
            assert_eq!(s.ball().pos, *ball, "frame {}", i);
        }
        // Final frame consumed: back to Idle
        assert_eq!(*s.timeline_state(), TimelineState::Idle);
    }

    #[test]
    fn test_replay_overwrites_external_mutation() {
        let mut s = session();
        s.start_recording(0.0).unwrap();
        s.set_agent_position(0, Vec2::new(20.0, 20.0)).unwrap();
        s.tick(0.0);
        s.tick(1.0);
        s.stop_recording().unwrap();

        s.start_replay(10.0, 1.0).unwrap();
        s.set_agent_position(0, Vec2::new(80.0, 80.0)).unwrap();
        s.tick(10.0);
        assert_eq!(s.agent(0).unwrap().pos, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_recorded_frames_capture_post_mutation_state() {
        let mut s = session();
        s.start_recording(0.0).unwrap();
        s.set_agent_position(1, Vec2::new(33.0, 44.0)).unwrap();
        s.tick(0.5);
        let frame = &s.timeline().frames()[0];
        assert_eq!(frame.t, 0.5);
        let af = frame.agents.iter().find(|a| a.id == 1).unwrap();
        assert_eq!(af.pos, Vec2::new(33.0, 44.0));
    }

    #[test]
    fn test_pass_safety_uses_receiver_side_opponents() {
        let mut s = session();
        // Put the only away agents far from the Home receiver's lane
        s.set_agent_position(2, Vec2::new(75.0, 95.0)).unwrap();
        s.set_agent_position(3, Vec2::new(75.0, 95.0)).unwrap();
        s.set_agent_position(0, Vec2::new(25.0, 10.0)).unwrap();

        let verdict =
            s.pass_safety(Vec2::new(10.0, 10.0), 0, VelocityBias::Enabled).unwrap();
        assert!(verdict.is_safe());

        // Unknown receiver surfaces as not-found, not a crash
        assert_eq!(
            s.pass_safety(Vec2::ZERO, 42, VelocityBias::Enabled),
            Err(CoreError::AgentNotFound(42))
        );
    }

    #[test]
    fn test_evaluate_field_sees_session_snapshot() {
        let s = Session::new(Field::with_size(100.0, 100.0), 1);
        let cells = s.evaluate_field(10.0, ControlMode::Plain, VelocityBias::Enabled);
        assert_eq!(cells.len(), 100);
        // Two calls on the same snapshot agree
        assert_eq!(cells, s.evaluate_field(10.0, ControlMode::Plain, VelocityBias::Enabled));
    }

    #[test]
    fn test_safe_receivers_covers_whole_side() {
        let s = session();
        let candidates = s.safe_receivers(Vec2::new(50.0, 50.0), TeamSide::Home, VelocityBias::Enabled);
        assert_eq!(candidates.len(), 2);
    }
}
