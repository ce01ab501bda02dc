//! Error Types
//!
//! The main error type [`LumenError`] covers the failure modes of the
//! rendering core: GPU initialization, device loss, resource allocation,
//! shader compilation, and scene persistence.
//!
//! Fatal errors (device lost, allocation failure, surface acquisition)
//! propagate out of the frame loop; everything recoverable is clamped at
//! the site of the problem and reported through `log` instead.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, LumenError>`.
//!
//! ```rust,ignore
//! use lumen::{LumenError, Renderer, RenderSettings, WgpuContext};
//!
//! fn run_frame(renderer: &mut Renderer) {
//!     match renderer.render_frame(&snapshot, &camera, &gizmo) {
//!         Ok(()) => {}
//!         // Fatal: stop the loop; recovery is a full re-init.
//!         Err(LumenError::DeviceLost(reason)) => panic!("device lost: {reason}"),
//!         Err(e) => log::error!("frame skipped: {e}"),
//!     }
//! }
//! ```

use thiserror::Error;

/// The main error type for the Lumen core.
#[derive(Error, Debug)]
pub enum LumenError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// The GPU device was lost mid-run. Recovery requires a full re-init.
    #[error("GPU device lost: {0}")]
    DeviceLost(String),

    /// A texture or buffer could not be allocated at the requested size.
    #[error("GPU resource allocation failed: {0}")]
    AllocFailed(String),

    /// A WGSL module failed to compile.
    #[error("Shader compilation failed: {0}")]
    ShaderCompileFailed(String),

    /// The swap-chain image could not be acquired this frame.
    #[error("Failed to acquire swap-chain frame: {0}")]
    SurfaceAcquireFailed(String),

    /// Window system error.
    #[error("Window system error: {0}")]
    WindowError(#[from] raw_window_handle::HandleError),

    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    // ========================================================================
    // Scene Persistence Errors
    // ========================================================================
    /// JSON (de)serialization error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, LumenError>`.
pub type Result<T> = std::result::Result<T, LumenError>;
