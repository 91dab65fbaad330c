//! Recorder/player state machine
//!
//! Owns the timeline and the Idle/Recording/Replaying state. Starting one
//! long-lived operation while the other is active is rejected; starting a new
//! recording discards the previous timeline.

use log::{debug, warn};

use crate::constants::timeline as speed_limits;
use crate::error::{CoreError, Result};
use crate::replay::timeline::{RecordingFrame, Timeline};

/// Recorder/player state. Recording and Replaying are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimelineState {
    Idle,
    Recording { started_at: f64 },
    Replaying { started_at: f64, speed: f32, cursor: usize },
}

impl TimelineState {
    fn name(&self) -> &'static str {
        match self {
            TimelineState::Idle => "Idle",
            TimelineState::Recording { .. } => "Recording",
            TimelineState::Replaying { .. } => "Replaying",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TimelineController {
    timeline: Timeline,
    state: TimelineState,
}

impl Default for TimelineState {
    fn default() -> Self {
        TimelineState::Idle
    }
}

impl TimelineController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, TimelineState::Recording { .. })
    }

    pub fn is_replaying(&self) -> bool {
        matches!(self.state, TimelineState::Replaying { .. })
    }

    /// Begin a new recording at `now`, discarding any previous timeline.
    /// Restarting while already recording is allowed and also discards.
    pub fn start_recording(&mut self, now: f64) -> Result<()> {
        if self.is_replaying() {
            warn!("start_recording rejected while replaying");
            return Err(CoreError::IllegalTransition { from: "Replaying", to: "Recording" });
        }
        self.timeline.clear();
        self.state = TimelineState::Recording { started_at: now };
        debug!("recording started at t={}", now);
        Ok(())
    }

    /// Recording -> Idle. The timeline becomes read-only playback material.
    pub fn stop_recording(&mut self) -> Result<()> {
        if !self.is_recording() {
            return Err(CoreError::IllegalTransition { from: self.state.name(), to: "Idle" });
        }
        debug!("recording stopped with {} frames", self.timeline.len());
        self.state = TimelineState::Idle;
        Ok(())
    }

    /// Idle -> Replaying from the first frame. Speed is clamped to the
    /// supported playback range.
    pub fn start_replay(&mut self, now: f64, speed: f32) -> Result<()> {
        match self.state {
            TimelineState::Idle => {}
            _ => {
                warn!("start_replay rejected from {}", self.state.name());
                return Err(CoreError::IllegalTransition {
                    from: self.state.name(),
                    to: "Replaying",
                });
            }
        }
        if self.timeline.is_empty() {
            return Err(CoreError::EmptyTimeline);
        }
        let speed =
            speed.clamp(speed_limits::MIN_REPLAY_SPEED, speed_limits::MAX_REPLAY_SPEED);
        self.state = TimelineState::Replaying { started_at: now, speed, cursor: 0 };
        debug!("replay started at t={} ({}x)", now, speed);
        Ok(())
    }

    /// Replaying -> Idle. Frames are retained for repeat playback.
    pub fn stop_replay(&mut self) -> Result<()> {
        if !self.is_replaying() {
            return Err(CoreError::IllegalTransition { from: self.state.name(), to: "Idle" });
        }
        self.state = TimelineState::Idle;
        Ok(())
    }

    /// Append a frame while recording; its timestamp is relative to the
    /// recording start. Ignored (None) outside the Recording state.
    pub fn capture(&mut self, now: f64, mut frame: RecordingFrame) -> Option<f64> {
        let TimelineState::Recording { started_at } = self.state else {
            return None;
        };
        let t = now - started_at;
        frame.t = t;
        self.timeline.push(frame);
        Some(t)
    }

    /// Advance the playback cursor for tick time `now` and return the frame
    /// the caller must overwrite entity state with. Returns None when not
    /// replaying or when elapsed time has not yet reached the first frame.
    ///
    /// Transitions to Idle once the cursor reaches the final frame.
    pub fn playback_frame(&mut self, now: f64) -> Option<RecordingFrame> {
        let TimelineState::Replaying { started_at, speed, cursor } = self.state else {
            return None;
        };
        let elapsed = (now - started_at).max(0.0) * speed as f64;
        let cursor = self.timeline.advance_cursor(cursor, elapsed);

        let frame = self.timeline.frame(cursor)?;
        if frame.t > elapsed {
            // First frame not yet due; hold state without applying anything
            self.state = TimelineState::Replaying { started_at, speed, cursor };
            return None;
        }
        let frame = frame.clone();

        if cursor + 1 >= self.timeline.len() {
            debug!("replay finished after {} frames", self.timeline.len());
            self.state = TimelineState::Idle;
        } else {
            self.state = TimelineState::Replaying { started_at, speed, cursor };
        }
        Some(frame)
    }
}
