//! Timed input script for headless runs.
//!
//! A script is a list of segments, each holding one set of intents for a number of frames.
//! Scripts load from JSON:
//!
//! ```json
//! { "segments": [
//!     { "frames": 60, "move_z": -1.0 },
//!     { "frames": 1, "move_z": -1.0, "jump": 1.5 },
//!     { "frames": 90, "move_z": -1.0, "rotation": 0.02, "sprint": true }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use skate_physics::FrameInput;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Segment {
    pub frames: u32,
    pub move_z: f32,
    pub rotation: f32,
    pub sprint: bool,
    /// Jump power; the jump fires on the first frame of the segment only.
    pub jump: Option<f32>,
}

impl Segment {
    fn input(&self, first_frame: bool) -> FrameInput {
        FrameInput {
            rotation: self.rotation,
            move_z: self.move_z,
            sprint_requested: self.sprint,
            jump_requested: first_frame && self.jump.is_some(),
            jump_power_multiplier: self.jump.unwrap_or(FrameInput::MIN_JUMP_POWER),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub segments: Vec<Segment>,
}

impl InputScript {
    /// Settle, cruise down the coin lane, jump, turn, then sprint and jump again.
    pub fn demo() -> Self {
        let forward = |frames| Segment {
            frames,
            move_z: -1.0,
            ..Segment::default()
        };
        Self {
            segments: vec![
                Segment {
                    frames: 30,
                    ..Segment::default()
                },
                forward(90),
                Segment {
                    jump: Some(1.5),
                    ..forward(1)
                },
                forward(60),
                Segment {
                    rotation: 0.03,
                    ..forward(60)
                },
                Segment {
                    sprint: true,
                    ..forward(120)
                },
                Segment {
                    sprint: true,
                    jump: Some(2.0),
                    ..forward(1)
                },
                Segment {
                    sprint: true,
                    ..forward(100)
                },
                Segment {
                    frames: 60,
                    ..Segment::default()
                },
            ],
        }
    }

    pub fn total_frames(&self) -> u32 {
        self.segments.iter().map(|s| s.frames).sum()
    }

    /// Intents for `frame`; idle once the script has run out.
    pub fn input_at(&self, frame: u32) -> FrameInput {
        let mut start = 0;
        for segment in &self.segments {
            if frame < start + segment.frames {
                return segment.input(frame == start);
            }
            start += segment.frames;
        }
        FrameInput::idle()
    }
}
