//! Tuning constants for the pitch control engine
//!
//! Empirically chosen values; anything a caller may reasonably want to vary is
//! mirrored as a field on [`crate::engine::config::EngineConfig`].

// ============================================================
// Field geometry (logical units)
// ============================================================
pub mod field {
    /// Standard field length (logical units)
    pub const LENGTH: f32 = 105.0;

    /// Standard field width (logical units)
    pub const WIDTH: f32 = 68.0;

    /// Inset applied when clamping agent positions (agent visual radius)
    pub const AGENT_MARGIN: f32 = 2.0;

    /// Inset applied when clamping the ball position
    pub const BALL_MARGIN: f32 = 1.0;
}

// ============================================================
// Motion model (logical units per tick)
// ============================================================
pub mod motion {
    /// Hard cap on agent velocity magnitude
    pub const MAX_AGENT_SPEED: f32 = 4.0;

    /// Closing speed is clamped to this magnitude before it can bias
    /// an arrival cost, approaching or receding
    pub const MAX_CLOSING_SPEED: f32 = 3.0;

    /// Ticks worth of head start credited per unit of closing speed
    pub const VELOCITY_CREDIT: f32 = 8.0;

    /// Nominal agent speed used to turn an arrival cost into a time estimate
    pub const NOMINAL_AGENT_SPEED: f32 = 2.5;

    /// Nominal straight-line ball speed for pass and first-touch timing
    pub const NOMINAL_BALL_SPEED: f32 = 5.0;
}

// ============================================================
// Control field thresholds
// ============================================================
pub mod control {
    /// Cost ratio below which a cell is rendered as uncontested (contest 0)
    pub const FADE_START: f32 = 0.6;

    /// Cost ratio at or above which a cell is maximally contested (contest 1)
    pub const FULL_CONTEST: f32 = 0.85;

    /// Default sampling step (logical units per grid cell)
    pub const DEFAULT_STEP: f32 = 4.0;

    /// Floor for caller-supplied grid steps
    pub const MIN_STEP: f32 = 0.5;
}

// ============================================================
// Pass safety
// ============================================================
pub mod pass {
    /// Segments shorter than this cannot be projected onto meaningfully
    pub const SEGMENT_EPSILON: f32 = 1e-3;
}

// ============================================================
// Timeline playback
// ============================================================
pub mod timeline {
    /// Playback speed multiplier bounds (0.25x ~ 4x)
    pub const MIN_REPLAY_SPEED: f32 = 0.25;
    pub const MAX_REPLAY_SPEED: f32 = 4.0;
}
