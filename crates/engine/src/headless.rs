use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3};
use shapeyard_common::{Bounds, Color, Model, ModelHandle, Pose};
use shapeyard_input::{ControllerRig, ControllerState, Handed, ScriptedControllers};

use crate::adapter::{DisplayMode, Engine, EngineConfig, EngineError, StepFlow};
use crate::frame::{FrameCtx, FrameServices};
use crate::mesh::{MaterialDesc, MeshPrimitive, ShaderRef};

/// One recorded call from a frame, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawRecord {
    Model {
        model: ModelHandle,
        transform: Mat4,
        color: Color,
    },
    Text {
        text: String,
        transform: Mat4,
    },
    Line {
        start: Vec3,
        end: Vec3,
        color: Color,
        thickness: f32,
    },
    WindowBegin {
        title: String,
        pose: Pose,
        size: Vec2,
    },
    Label {
        text: String,
    },
    Radio {
        label: String,
        active: bool,
    },
    SameLine,
    Button {
        label: String,
    },
    WindowEnd,
    Handle {
        id: String,
        pose: Pose,
        bounds: Bounds,
    },
}

/// A model as the headless backend retained it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessModel {
    pub handle: ModelHandle,
    pub mesh: MeshPrimitive,
    pub material: MaterialDesc,
}

/// Recording backend: draws become [`DrawRecord`]s, input comes from scripts.
///
/// Tests and the CLI drive whole frames through this backend and assert on
/// (or print) the recorded stream. UI interactions are staged one frame
/// ahead: call `press_button`, `select_radio` or `move_handle`, then `step`;
/// the staged interaction fires during that step and is consumed.
pub struct HeadlessEngine {
    config: EngineConfig,
    display_mode: DisplayMode,
    models: Vec<HeadlessModel>,
    next_handle: u64,
    script: ScriptedControllers,
    frame_limit: Option<u64>,
    exit_requested: bool,
    frame_index: u64,
    shut_down: bool,

    // working state for the frame being stepped
    rig: ControllerRig,
    pending_button: Option<String>,
    pending_radio: Option<String>,
    pending_moves: HashMap<String, Pose>,
    records: Vec<DrawRecord>,
    frames: Vec<Vec<DrawRecord>>,
}

impl HeadlessEngine {
    /// Bring up a recording session. Fails when the config names no
    /// application, which is the backend's one initialization requirement.
    pub fn init(config: EngineConfig) -> Result<Self, EngineError> {
        if config.app_name.trim().is_empty() {
            return Err(EngineError::Init("config names no application".to_string()));
        }
        tracing::info!(app = %config.app_name, "headless engine initialized");
        Ok(Self {
            config,
            display_mode: DisplayMode::Opaque,
            models: Vec::new(),
            next_handle: 0,
            script: ScriptedControllers::default(),
            frame_limit: None,
            exit_requested: false,
            frame_index: 0,
            shut_down: false,
            rig: ControllerRig::default(),
            pending_button: None,
            pending_radio: None,
            pending_moves: HashMap::new(),
            records: Vec::new(),
            frames: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// Replace the controller script. Playback starts at its first frame.
    pub fn set_controllers(&mut self, script: ScriptedControllers) {
        self.script = script;
    }

    /// Stage a press of the button `label` for the next frame.
    pub fn press_button(&mut self, label: impl Into<String>) {
        self.pending_button = Some(label.into());
    }

    /// Stage a selection of the radio `label` for the next frame.
    pub fn select_radio(&mut self, label: impl Into<String>) {
        self.pending_radio = Some(label.into());
    }

    /// Stage a drag of the handle `id` to `pose` for the next frame.
    pub fn move_handle(&mut self, id: impl Into<String>, pose: Pose) {
        self.pending_moves.insert(id.into(), pose);
    }

    /// Report [`StepFlow::Exit`] once this many frames have stepped.
    pub fn exit_after(&mut self, frames: u64) {
        self.frame_limit = Some(frames);
    }

    /// Report [`StepFlow::Exit`] at the end of the current or next step.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Every recorded frame, in step order.
    pub fn frames(&self) -> &[Vec<DrawRecord>] {
        &self.frames
    }

    /// Records from the most recent step.
    pub fn last_frame(&self) -> Option<&[DrawRecord]> {
        self.frames.last().map(|f| f.as_slice())
    }

    /// Frames stepped so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Models created through this backend, in creation order.
    pub fn models(&self) -> &[HeadlessModel] {
        &self.models
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl Engine for HeadlessEngine {
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
        if let ShaderRef::File(path) = &material.shader {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if stem != "floor" {
                return Err(EngineError::UnknownShader(path.display().to_string()));
            }
        }
        self.next_handle += 1;
        let handle = ModelHandle(self.next_handle);
        let model = Model {
            handle,
            bounds: mesh.bounds(),
        };
        self.models.push(HeadlessModel {
            handle,
            mesh,
            material,
        });
        tracing::debug!(handle = handle.0, "model created");
        Ok(model)
    }

    fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    fn step(&mut self, frame: &mut dyn FnMut(&mut FrameCtx)) -> Result<StepFlow, EngineError> {
        if self.shut_down {
            return Err(EngineError::Backend("step after shutdown".to_string()));
        }
        self.rig = self.script.advance();
        self.records.clear();

        {
            let mut ctx = FrameCtx::new(self);
            frame(&mut ctx);
            debug_assert_eq!(ctx.depth(), 0, "unbalanced hierarchy at frame end");
        }

        self.frames.push(std::mem::take(&mut self.records));
        self.frame_index += 1;
        // staged interactions are one-shot
        self.pending_button = None;
        self.pending_radio = None;
        self.pending_moves.clear();

        let exit = self.exit_requested
            || self
                .frame_limit
                .is_some_and(|limit| self.frame_index >= limit);
        if exit {
            Ok(StepFlow::Exit)
        } else {
            Ok(StepFlow::Continue)
        }
    }

    fn shutdown(&mut self) {
        if !self.shut_down {
            self.shut_down = true;
            tracing::info!(frames = self.frame_index, "headless engine shut down");
        }
    }
}

impl FrameServices for HeadlessEngine {
    fn draw_model(&mut self, model: Model, transform: Mat4, color: Color) {
        self.records.push(DrawRecord::Model {
            model: model.handle,
            transform,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, transform: Mat4) {
        self.records.push(DrawRecord::Text {
            text: text.to_string(),
            transform,
        });
    }

    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, thickness: f32) {
        self.records.push(DrawRecord::Line {
            start,
            end,
            color,
            thickness,
        });
    }

    fn ui_window_begin(&mut self, title: &str, pose: &mut Pose, size: Vec2) {
        self.records.push(DrawRecord::WindowBegin {
            title: title.to_string(),
            pose: *pose,
            size,
        });
    }

    fn ui_label(&mut self, text: &str) {
        self.records.push(DrawRecord::Label {
            text: text.to_string(),
        });
    }

    fn ui_radio(&mut self, label: &str, active: bool) -> bool {
        self.records.push(DrawRecord::Radio {
            label: label.to_string(),
            active,
        });
        self.pending_radio.as_deref() == Some(label)
    }

    fn ui_same_line(&mut self) {
        self.records.push(DrawRecord::SameLine);
    }

    fn ui_button(&mut self, label: &str) -> bool {
        self.records.push(DrawRecord::Button {
            label: label.to_string(),
        });
        self.pending_button.as_deref() == Some(label)
    }

    fn ui_window_end(&mut self) {
        self.records.push(DrawRecord::WindowEnd);
    }

    fn handle(&mut self, id: &str, pose: &mut Pose, bounds: Bounds) -> bool {
        let grabbed = if let Some(target) = self.pending_moves.get(id) {
            *pose = *target;
            true
        } else {
            false
        };
        self.records.push(DrawRecord::Handle {
            id: id.to_string(),
            pose: *pose,
            bounds,
        });
        grabbed
    }

    fn controller(&self, hand: Handed) -> ControllerState {
        *self.rig.controller(hand)
    }

    fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }
}
