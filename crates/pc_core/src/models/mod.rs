//! Entity model
//!
//! Authoritative state for agents, the ball, and the field rectangle.
//! All positions are in logical field units; clamping to the inset field
//! rectangle happens at every mutation path so reads never observe an
//! out-of-bounds entity.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::constants::field;

/// Team affiliation for an agent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// 2D point / vector in logical field units
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or zero for a zero-length vector
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::ZERO
        }
    }

    /// Clamp magnitude to `max`, preserving direction
    pub fn clamp_length(self, max: f32) -> Self {
        let len = self.length();
        if len > max && len > 0.0 {
            self * (max / len)
        } else {
            self
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 { x: self.x * rhs, y: self.y * rhs }
    }
}

/// A team-affiliated mobile agent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u32,
    pub side: TeamSide,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// The ball carries no persistent velocity; its influence on timing is
/// derived from a nominal speed constant and straight-line distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
}

/// Axis-aligned field rectangle in logical coordinates, origin at (0, 0).
/// Read-only after construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    width: f32,
    height: f32,
}

impl Field {
    /// Standard football field proportions
    pub fn standard() -> Self {
        Self { width: field::LENGTH, height: field::WIDTH }
    }

    pub fn with_size(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point into the rectangle inset by the agent margin
    pub fn clamp_agent(&self, p: Vec2) -> Vec2 {
        self.clamp_inset(p, field::AGENT_MARGIN)
    }

    /// Clamp a point into the rectangle inset by the ball margin
    pub fn clamp_ball(&self, p: Vec2) -> Vec2 {
        self.clamp_inset(p, field::BALL_MARGIN)
    }

    fn clamp_inset(&self, p: Vec2, margin: f32) -> Vec2 {
        // Degenerate fields (smaller than twice the margin) collapse to center
        let max_x = (self.width - margin).max(margin);
        let max_y = (self.height - margin).max(margin);
        Vec2::new(p.x.clamp(margin, max_x), p.y.clamp(margin, max_y))
    }
}
