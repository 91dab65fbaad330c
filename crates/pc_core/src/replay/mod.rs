//! Timeline capture and playback
//!
//! Records periodic deep-copy snapshots of all entity state and plays them
//! back deterministically. Recording and replaying are mutually exclusive;
//! the playback cursor only ever moves forward.

pub mod controller;
pub mod timeline;

pub use controller::{TimelineController, TimelineState};
pub use timeline::{AgentFrame, RecordingFrame, Timeline};
