//! Render settings.
//!
//! Changing any sampling field at runtime invalidates the accumulated
//! image; the orchestrator handles that when the settings are swapped in.

/// Configuration for the path tracer and the GPU context.
///
/// | Field | Description | Default |
/// |-------|-------------|---------|
/// | `samples_per_pixel` | Paths traced per pixel per dispatch | `1` |
/// | `max_bounces` | Scatter depth limit per path | `8` |
/// | `accumulate` | Average samples across frames | `true` |
/// | `sky_gradient` | Vertical background gradient instead of flat | `false` |
/// | `vsync` | Present with vertical sync | `true` |
/// | `power_preference` | GPU selection preference | `HighPerformance` |
///
/// # Example
///
/// ```rust,ignore
/// use lumen::RenderSettings;
///
/// // Converge faster per frame at proportional GPU cost, with an
/// // uncapped framerate for benchmarking.
/// let settings = RenderSettings {
///     samples_per_pixel: 4,
///     max_bounces: 12,
///     vsync: false,
///     ..Default::default()
/// };
///
/// // Swapping settings at runtime restarts accumulation when any
/// // sampling-relevant field changed.
/// renderer.set_settings(settings);
/// ```
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Paths traced per pixel per dispatch. Higher values converge faster
    /// per frame at proportional GPU cost.
    pub samples_per_pixel: u32,

    /// Maximum number of scatters before a path is cut off.
    pub max_bounces: u32,

    /// Average samples across frames. When off, every frame stands alone
    /// (useful while debugging the kernel).
    pub accumulate: bool,

    /// Shade the miss color as a vertical gradient (horizon = configured
    /// background, zenith darkened) instead of a flat fill.
    pub sky_gradient: bool,

    /// Enable vertical synchronization.
    pub vsync: bool,

    /// GPU adapter selection preference.
    pub power_preference: wgpu::PowerPreference,

    /// Required wgpu features; adapter init fails if unsupported.
    pub required_features: wgpu::Features,

    /// Required wgpu limits.
    pub required_limits: wgpu::Limits,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            max_bounces: 8,
            accumulate: true,
            sky_gradient: false,
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}

impl RenderSettings {
    /// The kernel's settings-uniform flag bits.
    #[must_use]
    pub fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.accumulate {
            flags |= 1;
        }
        if self.sky_gradient {
            flags |= 2;
        }
        flags
    }

    /// True when swapping `self` for `other` requires an accumulation
    /// reset (any sampling-relevant field differs).
    #[must_use]
    pub fn sampling_differs(&self, other: &Self) -> bool {
        self.samples_per_pixel != other.samples_per_pixel
            || self.max_bounces != other.max_bounces
            || self.accumulate != other.accumulate
            || self.sky_gradient != other.sky_gradient
    }
}
