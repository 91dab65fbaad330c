//! Recording frames and the timeline they belong to
//!
//! A frame is immutable once captured: it holds copies of every agent's
//! position/velocity and the ball position, never references into live state.
//! The whole timeline is a serializable value; `serde_json` round-trips it
//! losslessly.

use serde::{Deserialize, Serialize};

use crate::models::{Agent, Vec2};

/// Snapshot of one agent inside a [`RecordingFrame`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentFrame {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl From<&Agent> for AgentFrame {
    fn from(agent: &Agent) -> Self {
        Self { id: agent.id, pos: agent.pos, vel: agent.vel }
    }
}

/// One timestamped snapshot of all tracked entity state.
/// `t` is relative to the recording's start time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordingFrame {
    pub t: f64,
    pub agents: Vec<AgentFrame>,
    pub ball: Vec2,
}

/// Append-only frame sequence for one recording session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    frames: Vec<RecordingFrame>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn push(&mut self, frame: RecordingFrame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[RecordingFrame] {
        &self.frames
    }

    pub fn frame(&self, idx: usize) -> Option<&RecordingFrame> {
        self.frames.get(idx)
    }

    /// Advance `cursor` to the last frame with `t <= elapsed`, forward only.
    /// A cursor already past `elapsed` stays where it is.
    pub fn advance_cursor(&self, mut cursor: usize, elapsed: f64) -> usize {
        while cursor + 1 < self.frames.len() && self.frames[cursor + 1].t <= elapsed {
            cursor += 1;
        }
        cursor
    }
}
