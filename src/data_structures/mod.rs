//! Engine data structures: geometry, meshes, materials and instances.
//!
//! - `geometry` builds the procedural primitives on the CPU
//! - `model` contains vertex formats, materials and GPU meshes
//! - `instance` holds per-instance transforms and their GPU layout
//! - `texture` creates depth attachments

pub mod geometry;
pub mod instance;
pub mod model;
pub mod texture;
