//! The ray-tracing compute pipeline.
//!
//! Owns every GPU resource the kernel touches: the camera and settings
//! uniforms, the immutable mesh-library buffers, the per-frame instance
//! buffer, the accumulation buffer, and the storage output texture.
//! `dispatch` is a no-op until an output size has been configured, so
//! callers never have to order init and first-frame carefully.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::errors::Result;
use crate::geometry::MeshLibrary;
use crate::renderer::context::compile_shader;
use crate::renderer::instances::{GpuSceneHeader, PackedScene, MAX_INSTANCES};
use crate::scene::OrbitCamera;

/// Workgroup edge of the kernel (8x8 threads).
pub const WORKGROUP_SIZE: u32 = 8;

/// Camera uniform, 144 bytes: `inverseProjection`, `inverseView`,
/// `position`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub inverse_projection: [[f32; 4]; 4],
    pub inverse_view: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad: f32,
}

impl CameraUniform {
    #[must_use]
    pub fn from_orbit(camera: &OrbitCamera, aspect: f32) -> Self {
        Self {
            inverse_projection: camera.inverse_projection(aspect).to_cols_array_2d(),
            inverse_view: camera.inverse_view().to_cols_array_2d(),
            position: camera.position().to_array(),
            _pad: 0.0,
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            inverse_projection: Mat4::IDENTITY.to_cols_array_2d(),
            inverse_view: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }
}

/// Settings uniform, 48 bytes. `flags` bit 0 = accumulate, bit 1 = sky
/// gradient. `bg_color` is packed `0xRRGGBB` and sits at offset 32.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SettingsUniform {
    pub frame_index: u32,
    pub samples_per_pixel: u32,
    pub max_bounces: u32,
    pub flags: u32,
    pub selected_index: i32,
    pub _pad0: [u32; 3],
    pub bg_color: u32,
    pub _pad1: [u32; 3],
}

impl Default for SettingsUniform {
    fn default() -> Self {
        Self {
            frame_index: 0,
            samples_per_pixel: 1,
            max_bounces: 8,
            flags: 1,
            selected_index: -1,
            _pad0: [0; 3],
            bg_color: 0x0087_CEEB,
            _pad1: [0; 3],
        }
    }
}

struct OutputTarget {
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

pub struct RaytracePipeline {
    pipeline: wgpu::ComputePipeline,
    layout: wgpu::BindGroupLayout,

    camera_buffer: wgpu::Buffer,
    settings_buffer: wgpu::Buffer,
    scene_header_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    mesh_meta_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    node_buffer: wgpu::Buffer,

    output: Option<OutputTarget>,
    accumulation_buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,

    settings: SettingsUniform,
}

impl RaytracePipeline {
    /// Creates the pipeline and uploads the immutable mesh library.
    pub fn new(device: &wgpu::Device, library: &MeshLibrary) -> Result<Self> {
        let shader = compile_shader(
            device,
            "Path Tracer Shader",
            include_str!("shaders/pathtracer.wgsl"),
        )?;

        let layout = Self::create_bind_group_layout(device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Path Tracer Pipeline Layout"),
            bind_group_layouts: &[Some(&layout)],
            immediate_size: 0,
        });
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Path Tracer Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform"),
            contents: bytemuck::bytes_of(&CameraUniform::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let settings = SettingsUniform::default();
        let settings_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Settings Uniform"),
            contents: bytemuck::bytes_of(&settings),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let scene_header_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Header Uniform"),
            contents: bytemuck::bytes_of(&GpuSceneHeader {
                instance_count: 0,
                mesh_count: library.mesh_count(),
                _pad: [0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (MAX_INSTANCES * std::mem::size_of::<crate::renderer::GpuInstance>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mesh_meta_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Meta Buffer"),
            contents: bytemuck::cast_slice(&library.meta),
            usage: wgpu::BufferUsages::STORAGE,
        });
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&library.vertices),
            usage: wgpu::BufferUsages::STORAGE,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&library.indices),
            usage: wgpu::BufferUsages::STORAGE,
        });
        let node_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("BLAS Node Buffer"),
            contents: bytemuck::cast_slice(&library.nodes),
            usage: wgpu::BufferUsages::STORAGE,
        });

        Ok(Self {
            pipeline,
            layout,
            camera_buffer,
            settings_buffer,
            scene_header_buffer,
            instance_buffer,
            mesh_meta_buffer,
            vertex_buffer,
            index_buffer,
            node_buffer,
            output: None,
            accumulation_buffer: None,
            bind_group: None,
            settings,
        })
    }

    fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let uniform = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let storage = |binding, read_only| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Path Tracer Layout"),
            entries: &[
                uniform(0), // camera
                uniform(1), // settings
                wgpu::BindGroupLayoutEntry {
                    binding: 2, // output image
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: wgpu::TextureFormat::Rgba8Unorm,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                storage(3, false), // accumulation
                uniform(4),        // mesh scene header
                storage(5, true),  // mesh meta
                storage(6, true),  // vertices
                storage(7, true),  // indices
                storage(8, true),  // BLAS nodes
                storage(9, true),  // instances
            ],
        })
    }

    /// Recreates the output texture and accumulation buffer for a new
    /// size and rebuilds the bind group. A zero size tears the output
    /// down, which turns `dispatch` into a no-op.
    pub fn resize_output(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.reset_accumulation();

        if width == 0 || height == 0 {
            self.output = None;
            self.accumulation_buffer = None;
            self.bind_group = None;
            return;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Path Tracer Output"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let accumulation_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Accumulation Buffer"),
            size: u64::from(width) * u64::from(height) * 16,
            usage: wgpu::BufferUsages::STORAGE,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Path Tracer Bind Group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.settings_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: accumulation_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: self.scene_header_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: self.mesh_meta_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 6,
                    resource: self.vertex_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 7,
                    resource: self.index_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 8,
                    resource: self.node_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 9,
                    resource: self.instance_buffer.as_entire_binding(),
                },
            ],
        });

        self.output = Some(OutputTarget {
            view,
            width,
            height,
        });
        self.accumulation_buffer = Some(accumulation_buffer);
        self.bind_group = Some(bind_group);
    }

    /// Writes the camera uniform. Does not reset accumulation by itself;
    /// the orchestrator decides that from the camera's version.
    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(camera));
    }

    /// Uploads a packed scene and adopts its selection index.
    pub fn update_scene(&mut self, queue: &wgpu::Queue, packed: &PackedScene) {
        if !packed.instances.is_empty() {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&packed.instances),
            );
        }
        queue.write_buffer(&self.scene_header_buffer, 0, bytemuck::bytes_of(&packed.header));
        self.settings.selected_index = packed.selected_index;
    }

    /// Selection index into the visible-instance list; -1 for none.
    /// Out-of-range values simply draw no highlight.
    pub fn set_selected_index(&mut self, index: i32) {
        self.settings.selected_index = index;
    }

    /// Sets the packed `0xRRGGBB` background; resets accumulation iff the
    /// value changed.
    pub fn set_background(&mut self, color: u32) {
        let color = color & 0x00FF_FFFF;
        if self.settings.bg_color != color {
            self.settings.bg_color = color;
            self.reset_accumulation();
        }
    }

    /// Applies sampling settings from the render configuration.
    pub fn set_sampling(&mut self, samples_per_pixel: u32, max_bounces: u32, flags: u32) {
        self.settings.samples_per_pixel = samples_per_pixel.max(1);
        self.settings.max_bounces = max_bounces.max(1);
        self.settings.flags = flags;
    }

    /// Restarts progressive accumulation at frame zero. The kernel
    /// overwrites (rather than adds to) the accumulation buffer when
    /// `frame_index == 0`, so no GPU-side clear is needed.
    pub fn reset_accumulation(&mut self) {
        self.settings.frame_index = 0;
    }

    /// Encodes the compute pass for one frame and advances the frame
    /// index. A no-op while the output is unsized.
    pub fn dispatch(&mut self, queue: &wgpu::Queue, encoder: &mut wgpu::CommandEncoder) {
        let (Some(output), Some(bind_group)) = (&self.output, &self.bind_group) else {
            return;
        };

        queue.write_buffer(&self.settings_buffer, 0, bytemuck::bytes_of(&self.settings));

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Path Trace Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.dispatch_workgroups(
                output.width.div_ceil(WORKGROUP_SIZE),
                output.height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        self.settings.frame_index += 1;
    }

    /// The storage texture the blit pass samples, while sized.
    #[must_use]
    pub fn output_view(&self) -> Option<&wgpu::TextureView> {
        self.output.as_ref().map(|o| &o.view)
    }

    /// Accumulated samples per pixel since the last reset.
    #[must_use]
    pub fn sample_count(&self) -> u32 {
        self.settings.frame_index * self.settings.samples_per_pixel
    }

    #[must_use]
    pub fn settings_snapshot(&self) -> SettingsUniform {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_the_wire_format() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
        assert_eq!(std::mem::size_of::<SettingsUniform>(), 48);
    }

    #[test]
    fn background_sits_at_offset_32() {
        let settings = SettingsUniform {
            bg_color: 0x0012_3456,
            ..SettingsUniform::default()
        };
        let bytes = bytemuck::bytes_of(&settings);
        let bg = u32::from_le_bytes(bytes[32..36].try_into().unwrap());
        assert_eq!(bg, 0x0012_3456);
    }
}
