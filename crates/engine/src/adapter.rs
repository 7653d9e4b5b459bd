use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shapeyard_common::Model;
use thiserror::Error;

use crate::frame::FrameCtx;
use crate::mesh::{MaterialDesc, MeshPrimitive};

/// Settings a backend needs before it can bring up a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Application name reported to the platform.
    pub app_name: String,
    /// Directory shader files and other assets are resolved against.
    pub assets_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "shapeyard".to_string(),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// Session bring-up failed. Fatal; callers must not enter the frame loop.
    #[error("engine initialization failed: {0}")]
    Init(String),
    #[error("unknown shader `{0}`")]
    UnknownShader(String),
    #[error("backend fault: {0}")]
    Backend(String),
}

/// How the display composites with the physical world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Fully rendered view (flat screens, VR). Scene backdrops are wanted.
    Opaque,
    /// The world shows through (AR passthrough). Backdrops would occlude it.
    Passthrough,
}

/// Whether the adapter wants another frame after this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepFlow {
    Continue,
    Exit,
}

/// The render engine boundary.
///
/// Backends construct themselves from an [`EngineConfig`] with an inherent
/// `init` constructor; the trait covers everything after that. `step` runs
/// one frame: the backend samples input, invokes the callback with this
/// frame's services, then presents.
pub trait Engine {
    /// Upload a primitive mesh paired with a material. The returned model is
    /// shared: draw it any number of times per frame.
    fn create_model(
        &mut self,
        mesh: MeshPrimitive,
        material: MaterialDesc,
    ) -> Result<Model, EngineError>;

    /// The display's compositing mode. Fixed for the session.
    fn display_mode(&self) -> DisplayMode;

    /// Run exactly one frame, handing the callback this frame's services.
    fn step(&mut self, frame: &mut dyn FnMut(&mut FrameCtx)) -> Result<StepFlow, EngineError>;

    /// Release session resources. Idempotent; stepping afterwards is an error.
    fn shutdown(&mut self);
}
