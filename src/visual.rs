//! Presentational state derived from press state.
//!
//! Icon names follow SF Symbols naming (`circle` / `circle.fill`, `dpad.up.filled`, ...). They are
//! recomputed from the [`PressTracker`] on every snapshot and never stored separately.

use crate::button::SemanticButton;
use crate::tracker::PressTracker;
use serde::Serialize;
use std::collections::BTreeMap;

/// Icon names and pressed flags for a controller diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Visuals {
    /// `dpad` at rest, otherwise the held direction evaluated last (Up, Down, Left, Right).
    pub dpad: &'static str,
    /// Face buttons keyed `A`, `B`, `X`, `Y`.
    pub face: BTreeMap<&'static str, &'static str>,
    /// Shoulders and triggers keyed `L1`, `R1`, `L2`, `R2`.
    pub shoulders: BTreeMap<&'static str, &'static str>,
    /// Thumbstick clicks keyed `L`, `R`.
    pub thumbstick_pressed: BTreeMap<&'static str, bool>,
}

const FACE: [(&str, SemanticButton); 4] = [
    ("A", SemanticButton::A),
    ("B", SemanticButton::B),
    ("X", SemanticButton::X),
    ("Y", SemanticButton::Y),
];

const SHOULDERS: [(&str, SemanticButton, &str, &str); 4] = [
    (
        "L1",
        SemanticButton::LeftShoulder,
        "l1.button.roundedbottom.horizontal",
        "l1.button.roundedbottom.horizontal.fill",
    ),
    (
        "R1",
        SemanticButton::RightShoulder,
        "r1.button.roundedbottom.horizontal",
        "r1.button.roundedbottom.horizontal.fill",
    ),
    (
        "L2",
        SemanticButton::LeftTrigger,
        "l2.button.roundedtop.horizontal",
        "l2.button.roundedtop.horizontal.fill",
    ),
    (
        "R2",
        SemanticButton::RightTrigger,
        "r2.button.roundedtop.horizontal",
        "r2.button.roundedtop.horizontal.fill",
    ),
];

fn dpad_icon(button: SemanticButton) -> &'static str {
    match button {
        SemanticButton::DPadUp => "dpad.up.filled",
        SemanticButton::DPadDown => "dpad.down.filled",
        SemanticButton::DPadLeft => "dpad.left.filled",
        SemanticButton::DPadRight => "dpad.right.filled",
        _ => "dpad",
    }
}

impl Visuals {
    pub fn derive(tracker: &PressTracker) -> Self {
        let dpad = SemanticButton::DPAD
            .iter()
            .rev()
            .find(|&&b| tracker.is_held(b))
            .map(|&b| dpad_icon(b))
            .unwrap_or("dpad");

        let face = FACE
            .iter()
            .map(|&(key, b)| {
                let icon = if tracker.is_held(b) { "circle.fill" } else { "circle" };
                (key, icon)
            })
            .collect();

        let shoulders = SHOULDERS
            .iter()
            .map(|&(key, b, idle, held)| (key, if tracker.is_held(b) { held } else { idle }))
            .collect();

        let thumbstick_pressed = [
            ("L", tracker.is_held(SemanticButton::LeftThumbstick)),
            ("R", tracker.is_held(SemanticButton::RightThumbstick)),
        ]
        .into_iter()
        .collect();

        Self {
            dpad,
            face,
            shoulders,
            thumbstick_pressed,
        }
    }
}

impl Default for Visuals {
    fn default() -> Self {
        Self::derive(&PressTracker::new())
    }
}
