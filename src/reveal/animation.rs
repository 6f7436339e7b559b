//! Entrance animation descriptors and their sampling.

use instant::Duration;

/// Presentation state of a block: opacity, a 2D offset (px), a uniform scale and a
/// tilt about the horizontal axis (degrees).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotate_x: f32,
}

impl Pose {
    /// Fully visible, untransformed.
    pub const SETTLED: Pose = Pose {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotate_x: 0.0,
    };

    pub const fn hidden() -> Self {
        Pose {
            opacity: 0.0,
            ..Self::SETTLED
        }
    }

    pub const fn offset(x: f32, y: f32) -> Self {
        Pose {
            opacity: 0.0,
            x,
            y,
            ..Self::SETTLED
        }
    }

    pub const fn with_scale(self, scale: f32) -> Self {
        Pose { scale, ..self }
    }

    pub const fn with_tilt(self, rotate_x: f32) -> Self {
        Pose { rotate_x, ..self }
    }

    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            opacity: mix(self.opacity, other.opacity),
            x: mix(self.x, other.x),
            y: mix(self.y, other.y),
            scale: mix(self.scale, other.scale),
            rotate_x: mix(self.rotate_x, other.rotate_x),
        }
    }

    /// CSS `transform` value for this pose. The tilt is left out while it is zero.
    pub fn css_transform(&self) -> String {
        let transform = format!(
            "translate({:.2}px, {:.2}px) scale({:.4})",
            self.x, self.y, self.scale
        );
        if self.rotate_x == 0.0 {
            transform
        } else {
            format!("{transform} rotateX({:.2}deg)", self.rotate_x)
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::SETTLED
    }
}

/// A one-time transition from `initial` to `target`.
///
/// `delay` is counted from the moment the block is triggered, so two blocks triggered in
/// the same check cycle cascade by the difference of their delays.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealAnimation {
    pub initial: Pose,
    pub target: Pose,
    pub duration: Duration,
    pub delay: Duration,
}

impl RevealAnimation {
    pub fn new(initial: Pose, duration: Duration) -> Self {
        Self {
            initial,
            target: Pose::SETTLED,
            duration,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Pose `since_start` after the animation began (the delay already elapsed).
    pub fn sample(&self, since_start: Duration) -> Pose {
        if self.duration.is_zero() {
            return self.target;
        }
        let progress = (since_start.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.initial.lerp(&self.target, ease_out_cubic(progress))
    }

    pub fn is_finished(&self, since_start: Duration) -> bool {
        since_start >= self.duration
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
