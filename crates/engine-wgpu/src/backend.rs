use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::{Mat4, Vec2, Vec3};
use shapeyard_common::{Bounds, Color, Model, ModelHandle, Pose};
use shapeyard_engine::{
    DisplayMode, Engine, EngineConfig, EngineError, FrameCtx, FrameServices, MaterialDesc,
    MeshPrimitive, ShaderRef, StepFlow, Transparency,
};
use shapeyard_input::{ControllerState, Handed};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::camera::{CameraMoves, FlyCamera};
use crate::gpu::{DrawBatch, GpuMesh, InstanceRaw, LineVertex, SceneRenderer};
use crate::mesh;
use crate::panel::PanelBridge;
use crate::pick::{self, DragState, Ray};

/// Tint the translucent floor shader file maps to on this backend.
const FLOOR_TINT: [f32; 4] = [0.25, 0.25, 0.30, 0.6];

/// A model as this backend retains it. The device mesh is uploaded lazily
/// because models can be created before the first event pump brings the
/// GPU up.
struct ModelEntry {
    mesh: MeshPrimitive,
    transparency: Transparency,
    tint: [f32; 4],
    gpu: Option<GpuMesh>,
}

/// Device-side session state, live from `resumed` until teardown.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

/// Windowed wgpu backend.
///
/// Frames are host-driven: `step` pumps the event loop once, runs the frame
/// callback against the accumulated input state, then renders and presents.
/// The window and device come up inside the first pump; until then steps
/// are no-ops that report [`StepFlow::Continue`].
pub struct WgpuEngine {
    config: EngineConfig,
    event_loop: EventLoop<()>,
    host: HostApp,
    shut_down: bool,
}

impl WgpuEngine {
    /// Bring up the event loop. Fails when the config names no application
    /// or the platform refuses a loop; the window itself is created on the
    /// first `step`.
    pub fn init(config: EngineConfig) -> Result<Self, EngineError> {
        if config.app_name.trim().is_empty() {
            return Err(EngineError::Init("config names no application".to_string()));
        }
        let event_loop = EventLoop::new().map_err(|e| EngineError::Init(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        tracing::info!(app = %config.app_name, "wgpu engine initialized");
        let host = HostApp::new(config.app_name.clone());
        Ok(Self {
            config,
            event_loop,
            host,
            shut_down: false,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Initial window size in physical pixels. Takes effect at window
    /// creation; resizes afterwards come from the user.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.host.window_size = PhysicalSize::new(width.max(1), height.max(1));
    }

    /// Override the reported display mode. The desktop window composites
    /// nothing, so passthrough here only simulates an AR display for the
    /// scene callback.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.host.display_mode = mode;
    }
}

impl Engine for WgpuEngine {
    fn create_model(
        &mut self,
        mesh: MeshPrimitive,
        material: MaterialDesc,
    ) -> Result<Model, EngineError> {
        if self.shut_down {
            return Err(EngineError::Backend(
                "create_model after shutdown".to_string(),
            ));
        }
        let tint = match &material.shader {
            ShaderRef::Default | ShaderRef::DefaultUi => [1.0, 1.0, 1.0, 1.0],
            ShaderRef::File(path) => {
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
                if stem != "floor" {
                    return Err(EngineError::UnknownShader(path.display().to_string()));
                }
                tracing::debug!(
                    path = %self.config.assets_dir.join(path).display(),
                    "floor shader mapped to tinted blend material"
                );
                FLOOR_TINT
            }
        };
        let handle = ModelHandle(self.host.models.len() as u64);
        self.host.models.push(ModelEntry {
            mesh,
            transparency: material.transparency,
            tint,
            gpu: None,
        });
        tracing::debug!(handle = handle.0, "model created");
        Ok(Model {
            handle,
            bounds: mesh.bounds(),
        })
    }

    fn display_mode(&self) -> DisplayMode {
        self.host.display_mode
    }

    fn step(&mut self, frame: &mut dyn FnMut(&mut FrameCtx)) -> Result<StepFlow, EngineError> {
        if self.shut_down {
            return Err(EngineError::Backend("step after shutdown".to_string()));
        }

        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.host);
        if let Some(err) = self.host.init_error.take() {
            return Err(err);
        }
        if let PumpStatus::Exit(_) = status {
            return Ok(StepFlow::Exit);
        }
        if !self.host.ready() {
            // still waiting for the platform to resume us
            return Ok(StepFlow::Continue);
        }

        self.host.begin_frame();
        {
            let mut ctx = FrameCtx::new(&mut self.host);
            frame(&mut ctx);
            debug_assert_eq!(ctx.depth(), 0, "unbalanced hierarchy at frame end");
        }
        self.host.end_frame()?;
        Ok(StepFlow::Continue)
    }

    fn shutdown(&mut self) {
        if !self.shut_down {
            self.shut_down = true;
            self.host.teardown();
            tracing::info!("wgpu engine shut down");
        }
    }
}

/// The winit application driven by [`WgpuEngine::step`].
///
/// Doubles as the frame services sink: draw calls land in per-model
/// instance buckets, UI calls replay through the egui bridge, and handle
/// calls resolve against the cursor ray captured at frame start.
struct HostApp {
    title: String,
    window_size: PhysicalSize<u32>,
    display_mode: DisplayMode,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    egui_ctx: egui::Context,
    init_error: Option<EngineError>,

    camera: FlyCamera,
    keys_held: HashSet<KeyCode>,
    mouse_captured: bool,
    last_frame: Instant,
    cursor_pos: Vec2,
    pointer_down: bool,
    pointer_pressed: bool,
    cursor_ray: Option<Ray>,
    drag: Option<DragState>,
    pending_grab: Option<DragState>,

    models: Vec<ModelEntry>,
    instances: Vec<Vec<InstanceRaw>>,
    lines: Vec<LineVertex>,
    texts: Vec<(String, Mat4)>,
    panel: PanelBridge,
}

impl HostApp {
    fn new(title: String) -> Self {
        Self {
            title,
            window_size: PhysicalSize::new(1280, 720),
            display_mode: DisplayMode::Opaque,
            window: None,
            gpu: None,
            egui_ctx: egui::Context::default(),
            init_error: None,
            camera: FlyCamera::default(),
            keys_held: HashSet::new(),
            mouse_captured: false,
            last_frame: Instant::now(),
            cursor_pos: Vec2::ZERO,
            pointer_down: false,
            pointer_pressed: false,
            cursor_ray: None,
            drag: None,
            pending_grab: None,
            models: Vec::new(),
            instances: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            panel: PanelBridge::default(),
        }
    }

    fn ready(&self) -> bool {
        self.window.is_some() && self.gpu.is_some()
    }

    fn bring_up(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.window_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| EngineError::Init(format!("create window: {e}")))?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| EngineError::Init(format!("create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| EngineError::Init("no compatible gpu adapter".to_string()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("shapeyard_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| EngineError::Init(format!("create device: {e}")))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.camera.set_aspect(config.width, config.height);

        let scene = SceneRenderer::new(&device, surface_format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width = config.width,
            height = config.height,
            "gpu session ready"
        );

        self.window = Some(window);
        self.gpu = Some(Gpu {
            surface,
            device,
            queue,
            config,
            scene,
            egui_winit,
            egui_renderer,
        });
        Ok(())
    }

    /// Advance the camera, realize pending meshes and reset frame buckets.
    fn begin_frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        let moves = CameraMoves {
            forward: self.keys_held.contains(&KeyCode::KeyW),
            back: self.keys_held.contains(&KeyCode::KeyS),
            left: self.keys_held.contains(&KeyCode::KeyA),
            right: self.keys_held.contains(&KeyCode::KeyD),
            up: self.keys_held.contains(&KeyCode::Space),
            down: self.keys_held.contains(&KeyCode::ControlLeft),
            fast: self.keys_held.contains(&KeyCode::ShiftLeft),
        };
        self.camera.apply_moves(moves, dt);

        if let Some(gpu) = &self.gpu {
            for entry in &mut self.models {
                if entry.gpu.is_none() {
                    let (vertices, indices) = mesh::generate(&entry.mesh);
                    entry.gpu = Some(GpuMesh::upload(&gpu.device, &vertices, &indices));
                }
            }
            self.cursor_ray = Some(pick::cursor_ray(
                &self.camera,
                self.cursor_pos,
                Vec2::new(gpu.config.width as f32, gpu.config.height as f32),
            ));
        }

        for bucket in &mut self.instances {
            bucket.clear();
        }
        self.instances.resize_with(self.models.len(), Vec::new);
        self.lines.clear();
        self.texts.clear();
    }

    /// Settle grabs, run egui over the recorded panel, render and present.
    fn end_frame(&mut self) -> Result<(), EngineError> {
        if self.pointer_down {
            if self.drag.is_none() {
                self.drag = self.pending_grab.take();
            }
        } else {
            self.drag = None;
        }
        self.pending_grab = None;
        self.pointer_pressed = false;

        let Some(window) = self.window.clone() else {
            return Ok(());
        };
        let Some(gpu) = &mut self.gpu else {
            return Ok(());
        };

        let view_proj = self.camera.view_projection();
        let viewport = Vec2::new(gpu.config.width as f32, gpu.config.height as f32);

        let raw_input = gpu.egui_winit.take_egui_input(&window);
        let panel = &mut self.panel;
        let texts = &self.texts;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            panel.show(ctx);
            paint_labels(ctx, texts, view_proj, viewport);
        });

        gpu.egui_winit
            .handle_platform_output(&window, full_output.platform_output);
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(EngineError::Backend("surface out of memory".to_string()));
            }
            Err(e) => {
                tracing::warn!("surface error: {e}");
                return Ok(());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut batches = Vec::new();
        for (entry, bucket) in self.models.iter().zip(&self.instances) {
            let Some(mesh) = &entry.gpu else {
                continue;
            };
            if bucket.is_empty() {
                continue;
            }
            batches.push(DrawBatch {
                mesh,
                transparency: entry.transparency,
                instances: bucket,
            });
        }
        gpu.scene.render(&gpu.device, &gpu.queue, &view, view_proj, &batches, &self.lines);

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        Ok(())
    }

    fn teardown(&mut self) {
        self.gpu = None;
        self.window = None;
    }
}

impl ApplicationHandler for HostApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.bring_up(event_loop) {
            tracing::error!("gpu bring-up failed: {err}");
            self.init_error = Some(err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(gpu), Some(window)) = (&mut self.gpu, &self.window) {
            let response = gpu.egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.scene
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                    self.camera.set_aspect(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                if state == ElementState::Pressed {
                    self.keys_held.insert(key);
                    if key == KeyCode::Escape {
                        event_loop.exit();
                    }
                } else {
                    self.keys_held.remove(&key);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_pos = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if pressed && !self.pointer_down {
                    self.pointer_pressed = true;
                }
                self.pointer_down = pressed;
                if !pressed {
                    self.drag = None;
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state,
                ..
            } => {
                self.mouse_captured = state == ElementState::Pressed;
                if let Some(window) = &self.window {
                    window.set_cursor_visible(!self.mouse_captured);
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.mouse_captured {
                self.camera.rotate(delta.0 as f32, delta.1 as f32);
            }
        }
    }
}

impl FrameServices for HostApp {
    fn draw_model(&mut self, model: Model, transform: Mat4, color: Color) {
        let idx = model.handle.0 as usize;
        let Some(bucket) = self.instances.get_mut(idx) else {
            tracing::warn!(handle = model.handle.0, "draw of unknown model dropped");
            return;
        };
        let tint = self.models[idx].tint;
        bucket.push(InstanceRaw::new(
            transform,
            [
                color.r * tint[0],
                color.g * tint[1],
                color.b * tint[2],
                color.a * tint[3],
            ],
        ));
    }

    fn draw_text(&mut self, text: &str, transform: Mat4) {
        self.texts.push((text.to_string(), transform));
    }

    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, _thickness: f32) {
        // hairline rendering; thickness has no pipeline support here
        let color = [color.r, color.g, color.b, color.a];
        self.lines.push(LineVertex {
            position: start.to_array(),
            color,
        });
        self.lines.push(LineVertex {
            position: end.to_array(),
            color,
        });
    }

    fn ui_window_begin(&mut self, title: &str, _pose: &mut Pose, size: Vec2) {
        // the desktop panel lives in screen space; the world pose and any
        // user moves of the egui window stay independent
        self.panel.begin(title, size);
    }

    fn ui_label(&mut self, text: &str) {
        self.panel.label(text);
    }

    fn ui_radio(&mut self, label: &str, active: bool) -> bool {
        self.panel.radio(label, active)
    }

    fn ui_same_line(&mut self) {
        self.panel.same_line();
    }

    fn ui_button(&mut self, label: &str) -> bool {
        self.panel.button(label)
    }

    fn ui_window_end(&mut self) {}

    fn handle(&mut self, id: &str, pose: &mut Pose, bounds: Bounds) -> bool {
        let Some(ray) = self.cursor_ray else {
            return false;
        };

        if let Some(drag) = &self.drag {
            if drag.id == id && self.pointer_down {
                pose.position = ray.origin + ray.dir * drag.distance - drag.offset;
                return true;
            }
        }

        if self.pointer_pressed && self.drag.is_none() {
            if let Some(t) = pick::ray_hits_box(&ray, pose, bounds) {
                let closest = self.pending_grab.as_ref().is_none_or(|g| t < g.distance);
                if closest {
                    let hit = ray.origin + ray.dir * t;
                    self.pending_grab = Some(DragState {
                        id: id.to_string(),
                        distance: t,
                        offset: hit - pose.position,
                    });
                }
            }
        }
        false
    }

    fn controller(&self, _hand: Handed) -> ControllerState {
        // no tracked controllers on a desktop host
        ControllerState::default()
    }

    fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }
}

/// Project world-anchored text onto the screen through the egui foreground
/// layer.
fn paint_labels(ctx: &egui::Context, texts: &[(String, Mat4)], view_proj: Mat4, viewport: Vec2) {
    if texts.is_empty() {
        return;
    }
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("world_labels"),
    ));
    let ppp = ctx.pixels_per_point();
    for (text, transform) in texts {
        let clip = view_proj * transform.w_axis;
        if clip.w <= 0.0 {
            continue;
        }
        let ndc = clip / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            continue;
        }
        let px = Vec2::new((ndc.x * 0.5 + 0.5) * viewport.x, (0.5 - ndc.y * 0.5) * viewport.y);
        painter.text(
            egui::pos2(px.x / ppp, px.y / ppp),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::monospace(14.0),
            egui::Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_rejects_unnamed_app() {
        let config = EngineConfig {
            app_name: "  ".to_string(),
            ..EngineConfig::default()
        };
        let err = WgpuEngine::init(config).err().map(|e| e.to_string());
        assert!(err.is_some_and(|m| m.contains("initialization failed")));
    }

    #[test]
    fn floor_tint_is_translucent() {
        assert!(FLOOR_TINT[3] < 1.0);
    }
}
