use glam::{Mat4, Vec2, Vec3};
use shapeyard_common::{Bounds, Color, Model, Pose};
use shapeyard_input::{ControllerState, Handed};

use crate::adapter::DisplayMode;

/// Per-frame drawing, UI, and input services a backend provides.
///
/// Transforms and points arriving here are already world-space; [`FrameCtx`]
/// applies the hierarchy stack before forwarding. UI windows and grab handles
/// are world-anchored and bypass the hierarchy.
pub trait FrameServices {
    fn draw_model(&mut self, model: Model, transform: Mat4, color: Color);
    fn draw_text(&mut self, text: &str, transform: Mat4);
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, thickness: f32);

    /// Open a window at `pose`. `size` is in meters; a zero component
    /// auto-sizes that axis. The backend may write the pose back when the
    /// user moves the window.
    fn ui_window_begin(&mut self, title: &str, pose: &mut Pose, size: Vec2);
    fn ui_label(&mut self, text: &str);
    /// Returns true when the radio was selected this frame.
    fn ui_radio(&mut self, label: &str, active: bool) -> bool;
    /// Lay the next widget out on the same line as the previous one.
    fn ui_same_line(&mut self);
    /// Returns true when the button was pressed this frame.
    fn ui_button(&mut self, label: &str) -> bool;
    fn ui_window_end(&mut self);

    /// A grabbable region around `bounds` at `pose`. The backend writes the
    /// pose back while the user drags it; returns true while grabbed.
    fn handle(&mut self, id: &str, pose: &mut Pose, bounds: Bounds) -> bool;

    fn controller(&self, hand: Handed) -> ControllerState;
    fn display_mode(&self) -> DisplayMode;
}

/// The context handed to the frame callback.
///
/// Wraps the backend's [`FrameServices`] with a hierarchy stack: `push` a
/// transform and subsequent draws compose with it, nested pushes compose
/// left to right. Pushes must be balanced by pops before the callback
/// returns.
pub struct FrameCtx<'a> {
    services: &'a mut dyn FrameServices,
    hierarchy: Vec<Mat4>,
}

impl<'a> FrameCtx<'a> {
    pub fn new(services: &'a mut dyn FrameServices) -> Self {
        Self {
            services,
            hierarchy: Vec::new(),
        }
    }

    /// Compose `local` onto the hierarchy for subsequent draws.
    pub fn push(&mut self, local: Mat4) {
        let top = match self.hierarchy.last() {
            Some(parent) => *parent * local,
            None => local,
        };
        self.hierarchy.push(top);
    }

    pub fn pop(&mut self) {
        self.hierarchy.pop();
    }

    /// Current hierarchy depth. Zero outside any push.
    pub fn depth(&self) -> usize {
        self.hierarchy.len()
    }

    fn to_world(&self, local: Mat4) -> Mat4 {
        match self.hierarchy.last() {
            Some(top) => *top * local,
            None => local,
        }
    }

    fn point_to_world(&self, point: Vec3) -> Vec3 {
        match self.hierarchy.last() {
            Some(top) => top.transform_point3(point),
            None => point,
        }
    }

    pub fn draw_model(&mut self, model: Model, local: Mat4, color: Color) {
        let transform = self.to_world(local);
        self.services.draw_model(model, transform, color);
    }

    pub fn draw_text(&mut self, text: &str, local: Mat4) {
        let transform = self.to_world(local);
        self.services.draw_text(text, transform);
    }

    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, thickness: f32) {
        let start = self.point_to_world(start);
        let end = self.point_to_world(end);
        self.services.draw_line(start, end, color, thickness);
    }

    pub fn ui_window_begin(&mut self, title: &str, pose: &mut Pose, size: Vec2) {
        self.services.ui_window_begin(title, pose, size);
    }

    pub fn ui_label(&mut self, text: &str) {
        self.services.ui_label(text);
    }

    pub fn ui_radio(&mut self, label: &str, active: bool) -> bool {
        self.services.ui_radio(label, active)
    }

    pub fn ui_same_line(&mut self) {
        self.services.ui_same_line();
    }

    pub fn ui_button(&mut self, label: &str) -> bool {
        self.services.ui_button(label)
    }

    pub fn ui_window_end(&mut self) {
        self.services.ui_window_end();
    }

    pub fn handle(&mut self, id: &str, pose: &mut Pose, bounds: Bounds) -> bool {
        self.services.handle(id, pose, bounds)
    }

    pub fn controller(&self, hand: Handed) -> ControllerState {
        self.services.controller(hand)
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.services.display_mode()
    }
}
