//! Scroll-triggered, one-shot entrance animations.
//!
//! Blocks are registered with a [`RevealController`] that asks a [`VisibilitySource`]
//! whether each block is in the viewport. The first time the answer is yes, the block's
//! latch closes and its animation is scheduled with the block's delay. The latch never
//! reopens.
//!
//! - `animation` holds [`Pose`] and [`RevealAnimation`] sampling
//! - `block` holds [`RevealableBlock`], [`BlockKey`] and [`Bounds`]
//! - `stagger` computes index-proportional delays for a [`StaggerGroup`]
//! - `visibility` defines the source trait and the geometric/unsupported sources
//! - `controller` holds the latch policy

pub mod animation;
pub mod block;
pub mod controller;
pub mod stagger;
pub mod visibility;

pub use animation::{Pose, RevealAnimation};
pub use block::{BlockKey, Bounds, RevealableBlock};
pub use controller::{RevealController, RevealHandle, RevealOptions, RevealTrigger};
pub use stagger::StaggerGroup;
pub use visibility::{Unsupported, ViewportGeometry, Visibility, VisibilitySource};
