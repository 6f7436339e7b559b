//! Visibility sources feeding the reveal controller.
//!
//! A source answers "is this block in the viewport right now?" for every block it was
//! asked to observe. The controller never looks at layout itself.

use std::collections::HashMap;

use crate::{
    error::VisibilityError,
    reveal::block::{BlockKey, Bounds},
};

/// Answer of a [`VisibilitySource`] for one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    /// The platform cannot tell. Blocks are shown in their final state.
    Unsupported,
}

pub trait VisibilitySource {
    /// Starts observing `key`. `margin_px` grows the viewport on every side before the
    /// intersection test; negative values shrink it.
    fn observe(&mut self, key: &BlockKey, bounds: Bounds, margin_px: f32)
        -> Result<(), VisibilityError>;

    fn unobserve(&mut self, key: &BlockKey);

    fn visibility(&self, key: &BlockKey) -> Visibility;

    /// Number of blocks currently observed.
    fn observed(&self) -> usize;
}

/// Source for platforms without any visibility primitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unsupported;

impl VisibilitySource for Unsupported {
    fn observe(&mut self, _: &BlockKey, _: Bounds, _: f32) -> Result<(), VisibilityError> {
        Err(VisibilityError::Unsupported)
    }

    fn unobserve(&mut self, _: &BlockKey) {}

    fn visibility(&self, _: &BlockKey) -> Visibility {
        Visibility::Unsupported
    }

    fn observed(&self) -> usize {
        0
    }
}

#[derive(Clone, Copy, Debug)]
struct Target {
    bounds: Bounds,
    margin: f32,
}

/// Pure geometric source: a scrollable viewport over blocks with known bounds.
#[derive(Clone, Debug)]
pub struct ViewportGeometry {
    viewport: Bounds,
    targets: HashMap<BlockKey, Target>,
}

impl ViewportGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Bounds::new(0.0, 0.0, width, height),
            targets: HashMap::new(),
        }
    }

    pub fn viewport(&self) -> Bounds {
        self.viewport
    }

    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.viewport.y = scroll_y.max(0.0);
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.viewport.y + delta);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    /// Layout change of an observed block. Unknown keys are ignored.
    pub fn set_bounds(&mut self, key: &BlockKey, bounds: Bounds) {
        if let Some(target) = self.targets.get_mut(key) {
            target.bounds = bounds;
        }
    }
}

impl VisibilitySource for ViewportGeometry {
    fn observe(
        &mut self,
        key: &BlockKey,
        bounds: Bounds,
        margin_px: f32,
    ) -> Result<(), VisibilityError> {
        self.targets.insert(
            key.clone(),
            Target {
                bounds,
                margin: margin_px,
            },
        );
        Ok(())
    }

    fn unobserve(&mut self, key: &BlockKey) {
        self.targets.remove(key);
    }

    fn visibility(&self, key: &BlockKey) -> Visibility {
        match self.targets.get(key) {
            Some(target) if self.viewport.inflate(target.margin).intersects(&target.bounds) => {
                Visibility::Visible
            }
            _ => Visibility::Hidden,
        }
    }

    fn observed(&self) -> usize {
        self.targets.len()
    }
}
