use serde::{Deserialize, Serialize};

use crate::controller::ControllerRig;

/// Plays back a fixed sequence of controller rigs, one per frame.
///
/// Frames past the end of the script hold the last rig, so a short script can
/// drive an arbitrarily long run. An empty script yields untracked
/// controllers forever.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedControllers {
    frames: Vec<ControllerRig>,
    #[serde(skip)]
    cursor: usize,
}

impl ScriptedControllers {
    pub fn new(frames: Vec<ControllerRig>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Append one frame to the script.
    pub fn push(&mut self, rig: ControllerRig) {
        self.frames.push(rig);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Rig for the next frame, advancing the playback cursor.
    pub fn advance(&mut self) -> ControllerRig {
        let rig = self
            .frames
            .get(self.cursor)
            .or_else(|| self.frames.last())
            .copied()
            .unwrap_or_default();
        if self.cursor < self.frames.len() {
            self.cursor += 1;
        }
        rig
    }

    /// Rewind playback to the first frame.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Handed, TrackState};

    fn rig_with_trigger(trigger: f32) -> ControllerRig {
        let mut rig = ControllerRig::default();
        let right = rig.controller_mut(Handed::Right);
        right.tracked = true;
        right.trigger = trigger;
        rig
    }

    #[test]
    fn empty_script_stays_untracked() {
        let mut script = ScriptedControllers::default();
        for _ in 0..3 {
            let rig = script.advance();
            assert!(!rig.right.tracked);
            assert!(!rig.left.tracked);
        }
    }

    #[test]
    fn script_plays_in_order() {
        let mut script =
            ScriptedControllers::new(vec![rig_with_trigger(0.25), rig_with_trigger(0.5)]);
        assert_eq!(script.advance().right.trigger, 0.25);
        assert_eq!(script.advance().right.trigger, 0.5);
    }

    #[test]
    fn script_holds_last_frame() {
        let mut script = ScriptedControllers::new(vec![rig_with_trigger(1.0)]);
        script.advance();
        assert_eq!(script.advance().right.trigger, 1.0);
        assert_eq!(script.advance().right.trigger, 1.0);
    }

    #[test]
    fn reset_restarts_playback() {
        let mut script =
            ScriptedControllers::new(vec![rig_with_trigger(0.1), rig_with_trigger(0.9)]);
        script.advance();
        script.advance();
        script.reset();
        assert_eq!(script.advance().right.trigger, 0.1);
    }

    #[test]
    fn terse_json_fills_defaults() {
        // scripts only need to name the fields they care about
        let json = r#"{"frames": [{"right": {"tracked": true, "tracked_pos": "Known", "grip": 0.5}}]}"#;
        let mut script: ScriptedControllers = serde_json::from_str(json).unwrap();
        let rig = script.advance();
        assert!(rig.right.tracked);
        assert_eq!(rig.right.tracked_pos, TrackState::Known);
        assert_eq!(rig.right.grip, 0.5);
        assert_eq!(rig.right.trigger, 0.0);
        assert!(!rig.left.tracked);
    }
}
