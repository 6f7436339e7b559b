//! The procedural 3D backdrop.
//!
//! - `object` defines object kinds, their motion rules and [`ObjectPose`]s
//! - `parts` lists the mesh parts each kind is built from
//! - `particles` samples the particle field and the star shell
//! - `layout` holds [`SceneConfig`] with the hand-placed objects
//! - `animator` advances everything from elapsed time
//! - `backdrop` is the render flow that puts the animator on screen

pub mod animator;
pub mod backdrop;
pub mod layout;
pub mod object;
pub mod particles;
pub mod parts;

pub use animator::{Lifecycle, ProceduralSceneAnimator};
pub use backdrop::Backdrop;
pub use layout::{Placement, SceneConfig, SceneLayout};
pub use object::{FloatMotion, ObjectPose, SceneObject, SceneObjectKind, Transform, UpdateRule};
pub use particles::ParticleField;
