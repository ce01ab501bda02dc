//! Gizmo overlay pass.
//!
//! Draws the transform gizmo for the selected object as a line list on
//! top of the blitted image: axis arrows for translate, rings for
//! rotate, axis handles with box tips for scale. The hovered axis is
//! brightened and the active axis drawn in the pick color. Gizmo picking
//! and drag math live outside the core; this pass only needs the
//! object's position and the camera's view-projection.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::errors::Result;
use crate::renderer::context::compile_shader;
use crate::scene::{GizmoAxis, GizmoMode, GizmoState};

/// Ring tessellation for rotate mode.
const RING_SEGMENTS: u32 = 48;

/// Gizmo size as a fraction of the camera distance, so it keeps a
/// roughly constant screen footprint.
const SIZE_FACTOR: f32 = 0.15;

const ACTIVE_COLOR: Vec3 = Vec3::new(1.0, 0.85, 0.2);

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct GizmoVertex {
    position: [f32; 3],
    color: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct GizmoUniform {
    view_projection: [[f32; 4]; 4],
}

/// Worst-case vertex count: three rings plus arrows and tips.
const VERTEX_CAPACITY: u64 = 1024;

pub struct GizmoPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_count: u32,
}

impl GizmoPass {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Result<Self> {
        let shader = compile_shader(device, "Gizmo Shader", include_str!("shaders/gizmo.wgsl"))?;

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Gizmo Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Gizmo Pipeline Layout"),
            bind_group_layouts: &[Some(&layout)],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Gizmo Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<GizmoVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 12,
                            shader_location: 1,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Gizmo Uniform"),
            size: std::mem::size_of::<GizmoUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Gizmo Vertices"),
            size: VERTEX_CAPACITY * std::mem::size_of::<GizmoVertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Gizmo Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            pipeline,
            uniform_buffer,
            vertex_buffer,
            bind_group,
            vertex_count: 0,
        })
    }

    /// Rebuilds the gizmo geometry for this frame. With mode `None` the
    /// pass draws nothing.
    pub fn prepare(
        &mut self,
        queue: &wgpu::Queue,
        state: &GizmoState,
        origin: Vec3,
        view_projection: Mat4,
        camera_distance: f32,
    ) {
        self.vertex_count = 0;
        if state.mode == GizmoMode::None {
            return;
        }

        let size = camera_distance * SIZE_FACTOR;
        let mut vertices: Vec<GizmoVertex> = Vec::new();

        for (axis, direction, base_color) in [
            (GizmoAxis::X, Vec3::X, Vec3::new(0.9, 0.2, 0.2)),
            (GizmoAxis::Y, Vec3::Y, Vec3::new(0.2, 0.9, 0.2)),
            (GizmoAxis::Z, Vec3::Z, Vec3::new(0.2, 0.4, 0.9)),
        ] {
            let color = axis_color(state, axis, base_color);
            match state.mode {
                GizmoMode::Translate => {
                    push_arrow(&mut vertices, origin, direction, size, color);
                }
                GizmoMode::Rotate => {
                    push_ring(&mut vertices, origin, direction, size, color);
                }
                GizmoMode::Scale => {
                    push_handle(&mut vertices, origin, direction, size, color);
                }
                GizmoMode::None => unreachable!(),
            }
        }

        let count = (vertices.len() as u64).min(VERTEX_CAPACITY);
        self.vertex_count = count as u32;
        queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&vertices[..count as usize]),
        );
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&GizmoUniform {
                view_projection: view_projection.to_cols_array_2d(),
            }),
        );
    }

    /// Encodes the overlay on top of the existing image.
    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        if self.vertex_count == 0 {
            return;
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Gizmo Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

fn axis_color(state: &GizmoState, axis: GizmoAxis, base: Vec3) -> Vec3 {
    if state.active_axis == Some(axis) {
        ACTIVE_COLOR
    } else if state.hovered_axis == Some(axis) {
        (base * 1.5).min(Vec3::ONE)
    } else {
        base
    }
}

fn push_line(vertices: &mut Vec<GizmoVertex>, a: Vec3, b: Vec3, color: Vec3) {
    vertices.push(GizmoVertex {
        position: a.to_array(),
        color: color.to_array(),
    });
    vertices.push(GizmoVertex {
        position: b.to_array(),
        color: color.to_array(),
    });
}

/// Axis line with a two-line arrowhead.
fn push_arrow(vertices: &mut Vec<GizmoVertex>, origin: Vec3, direction: Vec3, size: f32, color: Vec3) {
    let tip = origin + direction * size;
    push_line(vertices, origin, tip, color);

    let side = if direction.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    let wing = direction.cross(side).normalize() * size * 0.08;
    let back = tip - direction * size * 0.18;
    push_line(vertices, tip, back + wing, color);
    push_line(vertices, tip, back - wing, color);
}

/// Circle around `normal`, for rotate mode.
fn push_ring(vertices: &mut Vec<GizmoVertex>, origin: Vec3, normal: Vec3, size: f32, color: Vec3) {
    let side = if normal.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    let u = normal.cross(side).normalize();
    let v = normal.cross(u);

    let mut previous = origin + u * size;
    for seg in 1..=RING_SEGMENTS {
        let angle = seg as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
        let point = origin + (u * angle.cos() + v * angle.sin()) * size;
        push_line(vertices, previous, point, color);
        previous = point;
    }
}

/// Axis line with a small box tip, for scale mode.
fn push_handle(vertices: &mut Vec<GizmoVertex>, origin: Vec3, direction: Vec3, size: f32, color: Vec3) {
    let tip = origin + direction * size;
    push_line(vertices, origin, tip, color);

    let side = if direction.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    let u = direction.cross(side).normalize() * size * 0.06;
    let v = direction.cross(u).normalize() * size * 0.06;
    let d = direction * size * 0.06;
    // Box tip as its 12 edges.
    let corners = [
        tip - u - v, tip + u - v, tip + u + v, tip - u + v,
        tip - u - v + d, tip + u - v + d, tip + u + v + d, tip - u + v + d,
    ];
    for (a, b) in [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ] {
        push_line(vertices, corners[a], corners[b], color);
    }
}
