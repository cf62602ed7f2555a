//! Scripted gamepad.
//!
//! [`VirtualGamepad`] queues input events stamped with caller-provided instants, which makes hold
//! durations exact and reproducible. It keeps its own D-pad reading so each direction change is
//! reported as a full [`PadReading`], the way hardware pads do.

use crate::device::Device;
use crate::event::{Direction, DirectionState, InputEvent, PadReading};
use crate::profile::{ElementId, GamepadProfile, ProfileId, Slot, Stick};
use log::warn;
use std::time::Instant;

pub struct VirtualGamepad {
    id: String,
    name: String,
    profile: GamepadProfile,
    pad: PadReading,
    events: Vec<InputEvent>,
}

impl VirtualGamepad {
    /// A gamepad exposing every slot.
    pub fn new(id: &str, name: &str) -> Self {
        Self::with_profile(id, name, GamepadProfile::standard(ProfileId::next()))
    }

    pub fn with_profile(id: &str, name: &str, profile: GamepadProfile) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            profile,
            pad: PadReading::neutral(),
            events: Vec::new(),
        }
    }

    /// Inject a raw input event.
    pub fn feed(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    fn button(&mut self, slot: Slot, pressed: bool, at: Instant) {
        match self.profile.element_ref(slot) {
            Some(element) if slot.is_button() => {
                self.feed(InputEvent::button(at, element, pressed));
            }
            _ => warn!("{}: no button in slot {slot:?}", self.id),
        }
    }

    pub fn press(&mut self, slot: Slot, at: Instant) {
        self.button(slot, true, at);
    }

    pub fn release(&mut self, slot: Slot, at: Instant) {
        self.button(slot, false, at);
    }

    /// Press or release an element that is not in a named slot (e.g. an extra button).
    pub fn raw_button(&mut self, element: ElementId, pressed: bool, at: Instant) {
        let element = self.profile.reference(element);
        self.feed(InputEvent::button(at, element, pressed));
    }

    /// Change one D-pad direction and report the whole pad.
    pub fn dpad(&mut self, dir: Direction, pressed: bool, at: Instant) {
        let state = if pressed {
            DirectionState::PRESSED
        } else {
            DirectionState::RELEASED
        };
        *self.pad.get_mut(dir) = state;
        self.send_pad(at);
    }

    /// Return every D-pad direction to rest.
    pub fn dpad_neutral(&mut self, at: Instant) {
        self.pad = PadReading::neutral();
        self.send_pad(at);
    }

    fn send_pad(&mut self, at: Instant) {
        match self.profile.element_ref(Slot::DPad) {
            Some(element) => {
                let reading = self.pad;
                self.feed(InputEvent::pad(at, element, reading));
            }
            None => warn!("{}: profile has no D-pad", self.id),
        }
    }

    pub fn move_stick(&mut self, stick: Stick, x: f32, y: f32, at: Instant) {
        let slot = match stick {
            Stick::Left => Slot::LeftThumbstick,
            Stick::Right => Slot::RightThumbstick,
        };
        match self.profile.element_ref(slot) {
            Some(element) => self.feed(InputEvent::thumbstick(at, element, x, y)),
            None => warn!("{}: profile has no {stick:?} stick", self.id),
        }
    }
}

impl Device for VirtualGamepad {
    fn poll(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn profile(&self) -> &GamepadProfile {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EngineEvent, InputKind};
    use std::time::Duration;

    #[test]
    fn poll_drains_queue() {
        let now = Instant::now();
        let mut pad = VirtualGamepad::new("virtual:0", "Virtual Pad");
        pad.press(Slot::ButtonA, now);
        pad.release(Slot::ButtonA, now + Duration::from_millis(5));
        assert_eq!(pad.poll().len(), 2);
        assert!(pad.poll().is_empty());
    }

    #[test]
    fn dpad_reports_full_reading() {
        let now = Instant::now();
        let mut pad = VirtualGamepad::new("virtual:0", "Virtual Pad");
        pad.dpad(Direction::Up, true, now);
        pad.dpad(Direction::Left, true, now);
        let events = pad.poll();
        match &events[1].kind {
            InputKind::Pad { reading, .. } => {
                assert!(reading.up.pressed);
                assert!(reading.left.pressed);
                assert!(!reading.down.pressed);
            }
            other => panic!("expected pad event, got {other:?}"),
        }
    }

    #[test]
    fn missing_slots_emit_nothing() {
        let profile = GamepadProfile::standard(ProfileId::next()).without(Slot::Home);
        let mut pad = VirtualGamepad::with_profile("v", "V", profile);
        pad.press(Slot::Home, Instant::now());
        pad.press(Slot::DPad, Instant::now());
        assert!(pad.poll().is_empty());
    }

    #[test]
    fn connected_event_carries_profile() {
        let pad = VirtualGamepad::new("virtual:1", "Scripted");
        match pad.connected_event() {
            EngineEvent::Connected { name, profile } => {
                assert_eq!(name, "Scripted");
                assert_eq!(&profile, pad.profile());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
