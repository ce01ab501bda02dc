//! Winit-based interactive shell.
//!
//! A minimal editor host: it owns the scene store, the orbit camera and
//! the renderer, maps mouse input to orbiting/zooming, click-picks
//! objects, and drives one render per redraw. The real editor UI is an
//! external collaborator; this shell exists so the core can be run and
//! exercised end to end.
//!
//! # Controls
//!
//! | Input | Action |
//! |-------|--------|
//! | Left drag | Orbit the camera |
//! | Left click | Pick / select object |
//! | Scroll wheel | Zoom |
//! | `1`-`6` | Add sphere / cuboid / cylinder / cone / capsule / torus |
//! | `G` / `R` / `S` | Gizmo translate / rotate / scale |
//! | `Delete` | Remove the selected object |
//! | `Escape` | Clear selection |

use std::sync::Arc;

use glam::Vec2;
use log::{error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::errors::Result;
use crate::geometry::PrimitiveKind;
use crate::picker;
use crate::renderer::{Renderer, RenderSettings, WgpuContext};
use crate::scene::{GizmoMode, GizmoState, OrbitCamera, SceneCommand, SceneStore};

/// Drag distance (pixels) below which a release still counts as a click.
const CLICK_SLOP: f32 = 4.0;

const ORBIT_SPEED: f32 = 0.008;
const ZOOM_SPEED: f32 = 0.6;

/// Builder for the editor shell.
pub struct App {
    title: String,
    render_settings: RenderSettings,
    scene: SceneStore,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Lumen".into(),
            render_settings: RenderSettings::default(),
            scene: SceneStore::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.render_settings = settings;
        self
    }

    /// Starts from an existing scene instead of an empty one.
    #[must_use]
    pub fn with_scene(mut self, scene: SceneStore) -> Self {
        self.scene = scene;
        self
    }

    /// Runs the event loop; blocks until the window closes.
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut shell = EditorShell {
            title: self.title,
            render_settings: self.render_settings,
            scene: self.scene,
            camera: OrbitCamera::new(),
            gizmo: GizmoState {
                mode: GizmoMode::Translate,
                ..GizmoState::default()
            },
            window: None,
            renderer: None,
            cursor: Vec2::ZERO,
            left_down: false,
            drag_travel: 0.0,
        };
        event_loop.run_app(&mut shell)?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

struct EditorShell {
    title: String,
    render_settings: RenderSettings,
    scene: SceneStore,
    camera: OrbitCamera,
    gizmo: GizmoState,

    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,

    cursor: Vec2,
    left_down: bool,
    drag_travel: f32,
}

impl EditorShell {
    fn pick_at_cursor(&mut self) {
        let Some(renderer) = &self.renderer else {
            return;
        };
        let size = renderer.surface_size();
        let ray = picker::camera_ray(&self.camera, (self.cursor.x, self.cursor.y), size);
        let hit = picker::pick(renderer.library(), self.scene.objects(), &ray);
        self.scene.apply(SceneCommand::SetSelection {
            id: hit.map(|h| h.object_id),
        });
    }

    fn handle_key(&mut self, key: &Key) {
        let primitive = match key.to_text() {
            Some("1") => Some(PrimitiveKind::Sphere),
            Some("2") => Some(PrimitiveKind::Cuboid),
            Some("3") => Some(PrimitiveKind::Cylinder),
            Some("4") => Some(PrimitiveKind::Cone),
            Some("5") => Some(PrimitiveKind::Capsule),
            Some("6") => Some(PrimitiveKind::Torus),
            _ => None,
        };
        if let Some(primitive) = primitive {
            let id = self.scene.apply(SceneCommand::AddObject { primitive });
            self.scene.apply(SceneCommand::SetSelection { id });
            return;
        }

        match key {
            Key::Character(c) if c.eq_ignore_ascii_case("g") => {
                self.gizmo.mode = GizmoMode::Translate;
            }
            Key::Character(c) if c.eq_ignore_ascii_case("r") => {
                self.gizmo.mode = GizmoMode::Rotate;
            }
            Key::Character(c) if c.eq_ignore_ascii_case("s") => {
                self.gizmo.mode = GizmoMode::Scale;
            }
            Key::Named(NamedKey::Delete) => {
                if let Some(id) = self.scene.selected().map(str::to_string) {
                    self.scene.apply(SceneCommand::RemoveObject { id });
                }
            }
            Key::Named(NamedKey::Escape) => {
                self.scene.apply(SceneCommand::SetSelection { id: None });
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for EditorShell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title(self.title.clone());
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let ctx = match pollster::block_on(WgpuContext::new(
            window.clone(),
            size.width,
            size.height,
            &self.render_settings,
        )) {
            Ok(ctx) => ctx,
            Err(e) => {
                error!("failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match Renderer::new(ctx, self.render_settings.clone()) {
            Ok(renderer) => renderer,
            Err(e) => {
                error!("failed to build renderer: {e}");
                event_loop.exit();
                return;
            }
        };

        self.renderer = Some(renderer);
        self.window = Some(window);
        info!("renderer initialized");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let next = Vec2::new(position.x as f32, position.y as f32);
                if self.left_down {
                    let delta = next - self.cursor;
                    self.drag_travel += delta.length();
                    self.camera
                        .orbit(-delta.x * ORBIT_SPEED, delta.y * ORBIT_SPEED);
                }
                self.cursor = next;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => {
                            self.left_down = true;
                            self.drag_travel = 0.0;
                        }
                        ElementState::Released => {
                            self.left_down = false;
                            if self.drag_travel < CLICK_SLOP {
                                self.pick_at_cursor();
                            }
                        }
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
                self.camera.zoom(-amount * ZOOM_SPEED);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    self.handle_key(&event.logical_key);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    let snapshot = self.scene.snapshot();
                    if let Err(e) = renderer.render_frame(&snapshot, &self.camera, &self.gizmo) {
                        // Fatal per the error taxonomy; stop the loop.
                        error!("render failed: {e}");
                        event_loop.exit();
                        return;
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
