use glam::Vec2;
use serde::{Deserialize, Serialize};
use shapeyard_common::Pose;

/// Which hand a controller belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handed {
    Left,
    Right,
}

impl Handed {
    /// Both hands, left first.
    pub const BOTH: [Handed; 2] = [Handed::Left, Handed::Right];

    /// +1 for the right hand, -1 for the left. Used to mirror geometry that
    /// sits on the inner edge of the controller.
    pub fn sign(&self) -> f32 {
        match self {
            Handed::Right => 1.0,
            Handed::Left => -1.0,
        }
    }
}

/// Tracking confidence reported for a sensed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackState {
    /// Not tracked at all.
    None,
    /// Estimated from stale or indirect data.
    Inferred,
    /// Directly observed this frame.
    Known,
}

impl Default for TrackState {
    fn default() -> Self {
        TrackState::None
    }
}

/// Snapshot of one motion controller for the current frame.
///
/// `pose` is the grip frame overlays attach to; `aim` is the world-space
/// pointer frame. Analog axes are already normalized to `0..=1` (trigger,
/// grip) or `-1..=1` (stick) by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerState {
    pub pose: Pose,
    pub aim: Pose,
    pub tracked: bool,
    pub tracked_pos: TrackState,
    pub tracked_rot: TrackState,
    pub stick: Vec2,
    pub stick_clicked: bool,
    pub trigger: f32,
    pub grip: f32,
    pub menu: bool,
    pub x1: bool,
    pub x2: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            pose: Pose::IDENTITY,
            aim: Pose::IDENTITY,
            tracked: false,
            tracked_pos: TrackState::None,
            tracked_rot: TrackState::None,
            stick: Vec2::ZERO,
            stick_clicked: false,
            trigger: 0.0,
            grip: 0.0,
            menu: false,
            x1: false,
            x2: false,
        }
    }
}

/// The pair of controllers sampled for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerRig {
    pub left: ControllerState,
    pub right: ControllerState,
}

impl ControllerRig {
    pub fn controller(&self, hand: Handed) -> &ControllerState {
        match hand {
            Handed::Left => &self.left,
            Handed::Right => &self.right,
        }
    }

    pub fn controller_mut(&mut self, hand: Handed) -> &mut ControllerState {
        match hand {
            Handed::Left => &mut self.left,
            Handed::Right => &mut self.right,
        }
    }
}
