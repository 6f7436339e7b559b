//! folio-ngin
//!
//! The moving parts of a single-page portfolio site: one-shot scroll reveals for the
//! page's content blocks and a procedural 3D backdrop rendered with wgpu, on native
//! and WASM alike. Both degrade quietly when the platform lacks a capability.
//!
//! High-level modules
//! - `reveal`: reveal latches, stagger groups and visibility sources
//! - `page`: builds the reveal plan of the page from its `content`
//! - `scene`: backdrop objects, their motion and the animator that drives them
//! - `camera`: orbit camera, projection and uniforms
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: procedural meshes, instances, materials and depth textures
//! - `pipelines`: lit, transparent and flat (points/lines) render pipelines
//! - `render`: render composition for efficient pipeline reuse
//! - `flow`: flow control and the event loop
//! - `web`: DOM bindings (wasm32 only)
//!

pub mod camera;
pub mod content;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod page;
pub mod pipelines;
pub mod render;
pub mod reveal;
pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use content::PageContent;
pub use error::{ContentError, SceneError, VisibilityError};
pub use reveal::{RevealController, RevealTrigger, ViewportGeometry};
pub use scene::{ProceduralSceneAnimator, SceneConfig};
