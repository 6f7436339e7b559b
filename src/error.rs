//! Error types shared across the crate.
//!
//! Everything here describes an *environment-unsupported* condition. None of these are
//! fatal for the page: callers degrade (reveal immediately, render nothing) and log.

use thiserror::Error;

/// Failure to acquire the rasterizer for the decorative backdrop.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no canvas element with id `{0}` in the document")]
    MissingCanvas(String),
    #[error("the window could not be created: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("the surface could not be created: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("the graphics device could not be opened: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("the surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Returned by a [`crate::reveal::VisibilitySource`] that cannot observe anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VisibilityError {
    #[error("viewport visibility observation is not available on this platform")]
    Unsupported,
    #[error("no element is bound to reveal key `{0}`")]
    UnknownTarget(String),
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("page content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
