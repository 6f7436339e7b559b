use std::fmt;

use crate::reveal::animation::{Pose, RevealAnimation};

/// Stable identity of a content block, e.g. `skills/card/2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// `section/role/index`
    pub fn indexed(section: &str, role: &str, index: usize) -> Self {
        Self(format!("{section}/{role}/{index}"))
    }

    /// Key of an element nested inside this one, e.g. a chip inside a card.
    pub fn child(&self, role: &str, index: usize) -> Self {
        Self(format!("{}/{role}/{index}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Axis aligned rectangle in document coordinates (px, y grows downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Grows the rectangle by `margin` on every side; a negative margin shrinks it.
    pub fn inflate(&self, margin: f32) -> Bounds {
        Bounds {
            x: self.x - margin,
            y: self.y - margin,
            width: (self.width + 2.0 * margin).max(0.0),
            height: (self.height + 2.0 * margin).max(0.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Overlap test. Edges count when either rectangle has no area, so an empty block
    /// lying inside the viewport is visible.
    pub fn intersects(&self, other: &Bounds) -> bool {
        if self.is_empty() || other.is_empty() {
            self.x <= other.right()
                && other.x <= self.right()
                && self.y <= other.bottom()
                && other.y <= self.bottom()
        } else {
            self.x < other.right()
                && other.x < self.right()
                && self.y < other.bottom()
                && other.y < self.bottom()
        }
    }
}

/// A content block that plays its entrance animation once.
///
/// `has_entered` only ever goes from `false` to `true`, and only the
/// [`RevealController`](crate::reveal::RevealController) flips it.
#[derive(Clone, Debug)]
pub struct RevealableBlock {
    key: BlockKey,
    pub bounds: Bounds,
    pub animation: RevealAnimation,
    has_entered: bool,
}

impl RevealableBlock {
    pub fn new(key: BlockKey, animation: RevealAnimation) -> Self {
        Self {
            key,
            bounds: Bounds::default(),
            animation,
            has_entered: false,
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn has_entered(&self) -> bool {
        self.has_entered
    }

    /// Closes the latch. Returns `true` only on the call that actually closed it.
    pub(crate) fn enter(&mut self) -> bool {
        !std::mem::replace(&mut self.has_entered, true)
    }

    /// Pose before the block entered the viewport.
    pub fn resting_pose(&self) -> Pose {
        self.animation.initial
    }
}
