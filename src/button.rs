//! Semantic button labels.
//!
//! [`SemanticButton`] is the device-independent name of a logical control. Every raw button or
//! D-pad notification resolves to exactly one of these; see [`Resolver`](crate::resolver::Resolver).
//!
//! Labels serialize as their display strings (`"Button A"`, `"D-Pad Up"`, ...).

use crate::profile::Slot;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SemanticButton {
    #[serde(rename = "Button A")]
    A,
    #[serde(rename = "Button B")]
    B,
    #[serde(rename = "Button X")]
    X,
    #[serde(rename = "Button Y")]
    Y,
    #[serde(rename = "Left Shoulder")]
    LeftShoulder,
    #[serde(rename = "Right Shoulder")]
    RightShoulder,
    #[serde(rename = "Left Trigger")]
    LeftTrigger,
    #[serde(rename = "Right Trigger")]
    RightTrigger,
    #[serde(rename = "Left Thumbstick")]
    LeftThumbstick,
    #[serde(rename = "Right Thumbstick")]
    RightThumbstick,
    #[serde(rename = "D-Pad Up")]
    DPadUp,
    #[serde(rename = "D-Pad Down")]
    DPadDown,
    #[serde(rename = "D-Pad Left")]
    DPadLeft,
    #[serde(rename = "D-Pad Right")]
    DPadRight,
    /// The profile's options slot (labelled "Create" on DualSense-style pads).
    #[serde(rename = "Create Button")]
    Create,
    /// The profile's menu slot.
    #[serde(rename = "Options Button")]
    Options,
    #[serde(rename = "PS Button")]
    Home,
    /// A button the device exposes outside the named slots.
    #[serde(rename = "Touchpad Button")]
    Touchpad,
    #[serde(rename = "Unknown Button")]
    Unknown,
}

impl SemanticButton {
    pub const ALL: [SemanticButton; 19] = [
        SemanticButton::A,
        SemanticButton::B,
        SemanticButton::X,
        SemanticButton::Y,
        SemanticButton::LeftShoulder,
        SemanticButton::RightShoulder,
        SemanticButton::LeftTrigger,
        SemanticButton::RightTrigger,
        SemanticButton::LeftThumbstick,
        SemanticButton::RightThumbstick,
        SemanticButton::DPadUp,
        SemanticButton::DPadDown,
        SemanticButton::DPadLeft,
        SemanticButton::DPadRight,
        SemanticButton::Create,
        SemanticButton::Options,
        SemanticButton::Home,
        SemanticButton::Touchpad,
        SemanticButton::Unknown,
    ];

    /// D-pad directions in evaluation order.
    pub const DPAD: [SemanticButton; 4] = [
        SemanticButton::DPadUp,
        SemanticButton::DPadDown,
        SemanticButton::DPadLeft,
        SemanticButton::DPadRight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SemanticButton::A => "Button A",
            SemanticButton::B => "Button B",
            SemanticButton::X => "Button X",
            SemanticButton::Y => "Button Y",
            SemanticButton::LeftShoulder => "Left Shoulder",
            SemanticButton::RightShoulder => "Right Shoulder",
            SemanticButton::LeftTrigger => "Left Trigger",
            SemanticButton::RightTrigger => "Right Trigger",
            SemanticButton::LeftThumbstick => "Left Thumbstick",
            SemanticButton::RightThumbstick => "Right Thumbstick",
            SemanticButton::DPadUp => "D-Pad Up",
            SemanticButton::DPadDown => "D-Pad Down",
            SemanticButton::DPadLeft => "D-Pad Left",
            SemanticButton::DPadRight => "D-Pad Right",
            SemanticButton::Create => "Create Button",
            SemanticButton::Options => "Options Button",
            SemanticButton::Home => "PS Button",
            SemanticButton::Touchpad => "Touchpad Button",
            SemanticButton::Unknown => "Unknown Button",
        }
    }

    /// Label for a named button slot. `None` for the D-pad and the sticks.
    pub fn from_slot(slot: Slot) -> Option<Self> {
        Some(match slot {
            Slot::ButtonA => SemanticButton::A,
            Slot::ButtonB => SemanticButton::B,
            Slot::ButtonX => SemanticButton::X,
            Slot::ButtonY => SemanticButton::Y,
            Slot::LeftShoulder => SemanticButton::LeftShoulder,
            Slot::RightShoulder => SemanticButton::RightShoulder,
            Slot::LeftTrigger => SemanticButton::LeftTrigger,
            Slot::RightTrigger => SemanticButton::RightTrigger,
            Slot::LeftThumbstickButton => SemanticButton::LeftThumbstick,
            Slot::RightThumbstickButton => SemanticButton::RightThumbstick,
            Slot::Options => SemanticButton::Create,
            Slot::Menu => SemanticButton::Options,
            Slot::Home => SemanticButton::Home,
            Slot::DPad | Slot::LeftThumbstick | Slot::RightThumbstick => return None,
        })
    }
}

impl fmt::Display for SemanticButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_unique() {
        let labels: std::collections::BTreeSet<_> =
            SemanticButton::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels.len(), SemanticButton::ALL.len());
    }

    #[test]
    fn serializes_as_display_label() {
        let json = serde_json::to_string(&SemanticButton::DPadLeft).unwrap();
        assert_eq!(json, "\"D-Pad Left\"");
        let back: SemanticButton = serde_json::from_str("\"PS Button\"").unwrap();
        assert_eq!(back, SemanticButton::Home);
    }

    #[test]
    fn menu_slots_use_dualsense_names() {
        assert_eq!(
            SemanticButton::from_slot(Slot::Options),
            Some(SemanticButton::Create)
        );
        assert_eq!(
            SemanticButton::from_slot(Slot::Menu),
            Some(SemanticButton::Options)
        );
        assert_eq!(SemanticButton::from_slot(Slot::DPad), None);
    }

    #[test]
    fn ordering_follows_declaration() {
        assert!(SemanticButton::A < SemanticButton::B);
        assert!(SemanticButton::DPadRight < SemanticButton::Create);
        assert!(SemanticButton::Touchpad < SemanticButton::Unknown);
    }
}
