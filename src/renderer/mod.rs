//! Frame orchestration.
//!
//! The renderer is pull-only: each frame it takes a scene snapshot, the
//! orbit camera, and the gizmo state, decides from version counters what
//! changed, resets accumulation when anything did, and encodes
//! compute -> blit -> gizmo in that order into one submission.

pub mod blit;
pub mod context;
pub mod gizmo_pass;
pub mod instances;
pub mod raytrace;
pub mod settings;

pub use context::WgpuContext;
pub use instances::{pack_instances, GpuInstance, GpuSceneHeader, PackedScene, MAX_INSTANCES};
pub use raytrace::{CameraUniform, RaytracePipeline, SettingsUniform};
pub use settings::RenderSettings;

use std::time::Instant;

use bitflags::bitflags;

use crate::errors::{LumenError, Result};
use crate::geometry::MeshLibrary;
use crate::scene::{GizmoMode, GizmoState, OrbitCamera, SceneSnapshot};

bitflags! {
    /// The change kinds the orchestrator reacts to. Any set bit resets
    /// accumulation before the next dispatch.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u32 {
        const SCENE      = 1 << 0;
        const CAMERA     = 1 << 1;
        const BACKGROUND = 1 << 2;
        const SELECTION  = 1 << 3;
        const RESIZE     = 1 << 4;
        const SETTINGS   = 1 << 5;
        const INVALIDATE = 1 << 6;
    }
}

/// Per-frame statistics for HUD consumption.
///
/// The stats own their timing: every presented frame is stamped, the
/// frame-to-frame delta derived, and `fps` refreshed from a one-second
/// window of frames.
#[derive(Debug, Clone)]
pub struct RenderStats {
    pub fps: f32,
    /// Last frame-to-frame interval in milliseconds.
    pub frame_time: f32,
    pub frame_count: u64,
    /// Accumulated samples per pixel since the last reset.
    pub sample_count: u32,

    last_frame: Instant,
    window_start: Instant,
    window_frames: u32,
}

impl Default for RenderStats {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            fps: 0.0,
            frame_time: 0.0,
            frame_count: 0,
            sample_count: 0,
            last_frame: now,
            window_start: now,
            window_frames: 0,
        }
    }
}

impl RenderStats {
    /// Stamps one presented frame with the current sample depth.
    fn tick(&mut self, sample_count: u32) {
        let now = Instant::now();
        self.frame_time = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        self.frame_count += 1;
        self.sample_count = sample_count;

        self.window_frames += 1;
        let window = (now - self.window_start).as_secs_f32();
        if window >= 1.0 {
            self.fps = self.window_frames as f32 / window;
            self.window_start = now;
            self.window_frames = 0;
        }
    }
}

pub struct Renderer {
    ctx: WgpuContext,
    library: MeshLibrary,
    raytrace: RaytracePipeline,
    blit: blit::BlitPipeline,
    gizmo: gizmo_pass::GizmoPass,
    settings: RenderSettings,

    dirty: DirtyFlags,
    last_scene_version: Option<u64>,
    last_render_epoch: u64,
    last_camera_version: Option<u64>,
    last_selected: Option<String>,
    last_background: Option<u32>,

    stats: RenderStats,
}

impl Renderer {
    /// Builds the mesh library and all GPU pipelines, and sizes the
    /// output to the surface. Fails if any of the WGSL modules do not
    /// compile on this device.
    pub fn new(ctx: WgpuContext, settings: RenderSettings) -> Result<Self> {
        let library = MeshLibrary::build();
        let mut raytrace = RaytracePipeline::new(&ctx.device, &library)?;
        raytrace.set_sampling(
            settings.samples_per_pixel,
            settings.max_bounces,
            settings.flags(),
        );
        raytrace.resize_output(&ctx.device, ctx.config.width, ctx.config.height);

        let mut blit = blit::BlitPipeline::new(&ctx.device, ctx.color_format())?;
        if let Some(view) = raytrace.output_view() {
            blit.set_source(&ctx.device, view);
        }
        let gizmo = gizmo_pass::GizmoPass::new(&ctx.device, ctx.color_format())?;

        Ok(Self {
            ctx,
            library,
            raytrace,
            blit,
            gizmo,
            settings,
            dirty: DirtyFlags::empty(),
            last_scene_version: None,
            last_render_epoch: 0,
            last_camera_version: None,
            last_selected: None,
            last_background: None,
            stats: RenderStats::default(),
        })
    }

    /// Resizes the surface and the compute output together.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        self.raytrace
            .resize_output(&self.ctx.device, width, height);
        if let Some(view) = self.raytrace.output_view() {
            self.blit.set_source(&self.ctx.device, view);
        }
        self.dirty |= DirtyFlags::RESIZE;
    }

    /// Swaps the render settings; sampling changes invalidate the
    /// accumulated image.
    pub fn set_settings(&mut self, settings: RenderSettings) {
        if self.settings.sampling_differs(&settings) {
            self.dirty |= DirtyFlags::SETTINGS;
        }
        self.raytrace.set_sampling(
            settings.samples_per_pixel,
            settings.max_bounces,
            settings.flags(),
        );
        self.settings = settings;
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// The immutable mesh library, shared with the picker.
    #[must_use]
    pub fn library(&self) -> &MeshLibrary {
        &self.library
    }

    #[must_use]
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        (self.ctx.config.width, self.ctx.config.height)
    }

    /// Renders one frame: change detection, uniform updates, then
    /// compute -> blit -> gizmo in a single submission.
    ///
    /// Fatal device conditions surface as errors; a merely outdated
    /// swap-chain skips the frame.
    pub fn render_frame(
        &mut self,
        snapshot: &SceneSnapshot,
        camera: &OrbitCamera,
        gizmo: &GizmoState,
    ) -> Result<()> {
        self.detect_changes(snapshot, camera);

        // 1. Any change since the last frame restarts accumulation.
        if !self.dirty.is_empty() {
            self.raytrace.reset_accumulation();
        }

        // 2. Scene or selection changes re-pack the instance list. The
        //    packer also resolves the dense highlight index so both stay
        //    in lock-step.
        if self
            .dirty
            .intersects(DirtyFlags::SCENE | DirtyFlags::SELECTION)
        {
            let packed = pack_instances(&snapshot.objects, snapshot.selected.as_deref(), &self.library);
            self.raytrace.update_scene(&self.ctx.queue, &packed);
        }
        self.raytrace.set_background(snapshot.background);

        // 3. The camera uniform is written every frame.
        let (width, height) = self.surface_size();
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        self.raytrace
            .update_camera(&self.ctx.queue, &CameraUniform::from_orbit(camera, aspect));

        self.dirty = DirtyFlags::empty();

        // 4. Encode compute, blit, and the overlay.
        let frame = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(frame)
            | wgpu::CurrentSurfaceTexture::Suboptimal(frame) => frame,
            wgpu::CurrentSurfaceTexture::Outdated
            | wgpu::CurrentSurfaceTexture::Timeout
            | wgpu::CurrentSurfaceTexture::Occluded => {
                // Transient; skip the frame and let the host resize us.
                return Ok(());
            }
            wgpu::CurrentSurfaceTexture::Lost => {
                return Err(LumenError::DeviceLost("surface lost".to_string()));
            }
            wgpu::CurrentSurfaceTexture::Validation => {
                return Err(LumenError::SurfaceAcquireFailed(
                    "surface validation error".to_string(),
                ));
            }
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.raytrace.dispatch(&self.ctx.queue, &mut encoder);
        self.blit.draw(&mut encoder, &target)?;

        if gizmo.mode != GizmoMode::None
            && let Some(selected) = selected_position(snapshot)
        {
            let view_projection = camera.projection(aspect) * camera.view();
            self.gizmo.prepare(
                &self.ctx.queue,
                gizmo,
                selected,
                view_projection,
                camera.distance(),
            );
            self.gizmo.draw(&mut encoder, &target);
        }

        // 5. Submit and present.
        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        self.stats.tick(self.raytrace.sample_count());

        Ok(())
    }

    fn detect_changes(&mut self, snapshot: &SceneSnapshot, camera: &OrbitCamera) {
        if self.last_scene_version != Some(snapshot.version) {
            self.dirty |= DirtyFlags::SCENE;
            self.last_scene_version = Some(snapshot.version);
        }
        if self.last_render_epoch != snapshot.render_epoch {
            self.dirty |= DirtyFlags::INVALIDATE;
            self.last_render_epoch = snapshot.render_epoch;
        }
        if self.last_camera_version != Some(camera.version()) {
            self.dirty |= DirtyFlags::CAMERA;
            self.last_camera_version = Some(camera.version());
        }
        if self.last_selected != snapshot.selected {
            self.dirty |= DirtyFlags::SELECTION;
            self.last_selected = snapshot.selected.clone();
        }
        if self.last_background != Some(snapshot.background) {
            self.dirty |= DirtyFlags::BACKGROUND;
            self.last_background = Some(snapshot.background);
        }
    }
}

/// Position of the selected object, if it exists and is visible.
fn selected_position(snapshot: &SceneSnapshot) -> Option<glam::Vec3> {
    let id = snapshot.selected.as_deref()?;
    snapshot
        .objects
        .iter()
        .find(|o| o.id == id && o.visible)
        .map(|o| o.transform.position)
}
