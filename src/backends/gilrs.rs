//! `gilrs` backend.
//!
//! [`GilrsSource`] drains gilrs events on the thread that owns it and forwards the active
//! controller's changes into the engine channel. It never touches engine state itself.
//!
//! # Mapping
//! gilrs uses positional names; slots map as follows:
//!
//! | gilrs            | slot                    |
//! |------------------|-------------------------|
//! | South/East/West/North | A/B/X/Y            |
//! | LeftTrigger/RightTrigger | shoulders (L1/R1) |
//! | LeftTrigger2/RightTrigger2 | triggers (L2/R2) |
//! | LeftThumb/RightThumb | thumbstick buttons  |
//! | Select / Start / Mode | options / menu / home |
//! | C, Z             | extra buttons           |
//!
//! The D-pad may arrive as four buttons or as the `DPadX`/`DPadY` axes depending on the mapping;
//! both are folded into one [`PadReading`] per change.
//!
//! # Controller selection
//! The first controller (already connected at start-up, or connecting later) whose name passes
//! [`SessionConfig::accepts`] becomes active. Controllers connecting while it is active are
//! ignored. When it disconnects, the next acceptable controller that is still connected takes
//! over.

use crate::config::{Config, SessionConfig};
use crate::error::{Error, Result};
use crate::event::{Direction, DirectionState, InputEvent, PadReading};
use crate::profile::{ElementId, GamepadProfile, ProfileId, Slot};
use crate::runtime::EngineSender;
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Named buttons and the slot each fills.
const SLOT_BUTTONS: [(Button, Slot); 13] = [
    (Button::South, Slot::ButtonA),
    (Button::East, Slot::ButtonB),
    (Button::West, Slot::ButtonX),
    (Button::North, Slot::ButtonY),
    (Button::LeftTrigger, Slot::LeftShoulder),
    (Button::RightTrigger, Slot::RightShoulder),
    (Button::LeftTrigger2, Slot::LeftTrigger),
    (Button::RightTrigger2, Slot::RightTrigger),
    (Button::LeftThumb, Slot::LeftThumbstickButton),
    (Button::RightThumb, Slot::RightThumbstickButton),
    (Button::Select, Slot::Options),
    (Button::Start, Slot::Menu),
    (Button::Mode, Slot::Home),
];

const EXTRA_BUTTONS: [Button; 2] = [Button::C, Button::Z];

const DPAD_BUTTONS: [(Button, Direction); 4] = [
    (Button::DPadUp, Direction::Up),
    (Button::DPadDown, Direction::Down),
    (Button::DPadLeft, Direction::Left),
    (Button::DPadRight, Direction::Right),
];

const DPAD_ELEMENT: ElementId = 100;
const LEFT_STICK_ELEMENT: ElementId = 101;
const RIGHT_STICK_ELEMENT: ElementId = 102;
const EXTRA_ELEMENT_BASE: ElementId = 200;
const UNMAPPED_ELEMENT: ElementId = ElementId::MAX;

/// Axis magnitude at which a D-pad axis counts as pressed.
const DPAD_AXIS_THRESHOLD: f32 = 0.5;

fn element_of(button: Button) -> ElementId {
    if let Some(i) = SLOT_BUTTONS.iter().position(|&(b, _)| b == button) {
        return i as ElementId;
    }
    if let Some(i) = EXTRA_BUTTONS.iter().position(|&b| b == button) {
        return EXTRA_ELEMENT_BASE + i as ElementId;
    }
    UNMAPPED_ELEMENT
}

/// Build the capability profile of `gamepad` from the controls its mapping reports.
pub fn profile_for(gamepad: &Gamepad<'_>) -> GamepadProfile {
    let mut profile = GamepadProfile::new(ProfileId::next());
    for (button, slot) in SLOT_BUTTONS {
        if gamepad.button_code(button).is_some() {
            profile = profile.with(slot, element_of(button));
        }
    }
    for button in EXTRA_BUTTONS {
        if gamepad.button_code(button).is_some() {
            profile = profile.with_extra_button(element_of(button));
        }
    }

    let dpad_buttons = DPAD_BUTTONS
        .iter()
        .any(|&(b, _)| gamepad.button_code(b).is_some());
    let dpad_axes =
        gamepad.axis_code(Axis::DPadX).is_some() || gamepad.axis_code(Axis::DPadY).is_some();
    if dpad_buttons || dpad_axes {
        profile = profile.with(Slot::DPad, DPAD_ELEMENT);
    }
    if gamepad.axis_code(Axis::LeftStickX).is_some() || gamepad.axis_code(Axis::LeftStickY).is_some()
    {
        profile = profile.with(Slot::LeftThumbstick, LEFT_STICK_ELEMENT);
    }
    if gamepad.axis_code(Axis::RightStickX).is_some()
        || gamepad.axis_code(Axis::RightStickY).is_some()
    {
        profile = profile.with(Slot::RightThumbstick, RIGHT_STICK_ELEMENT);
    }
    profile
}

struct Active {
    id: GamepadId,
    profile: GamepadProfile,
    pad: PadReading,
}

pub struct GilrsSource {
    gilrs: Gilrs,
    session: SessionConfig,
    active: Option<Active>,
}

impl GilrsSource {
    pub fn new(config: &Config) -> Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| Error::Backend(e.to_string()))?;
        Ok(Self {
            gilrs,
            session: config.session.clone(),
            active: None,
        })
    }

    /// Bind the first acceptable controller that is already connected.
    ///
    /// Returns `false` if none is connected.
    pub fn announce_connected(&mut self, tx: &EngineSender) -> Result<bool> {
        let found = self
            .gilrs
            .gamepads()
            .find(|(_, gp)| self.session.accepts(gp.name()))
            .map(|(id, _)| id);
        match found {
            Some(id) => {
                self.bind(id, tx)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn bind(&mut self, id: GamepadId, tx: &EngineSender) -> Result<()> {
        let gamepad = self.gilrs.gamepad(id);
        let name = gamepad.name().to_string();
        let profile = profile_for(&gamepad);
        info!("gilrs: using \"{name}\" ({id:?})");
        tx.connect(name, profile.clone())?;
        self.active = Some(Active {
            id,
            profile,
            pad: PadReading::neutral(),
        });
        Ok(())
    }

    /// Drain pending gilrs events. Returns how many engine events were sent.
    pub fn pump(&mut self, tx: &EngineSender) -> Result<usize> {
        let mut sent = 0;
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            let now = Instant::now();
            match event {
                EventType::Connected => {
                    let name = self.gilrs.gamepad(id).name().to_string();
                    if takes_over(&self.session, self.active.is_some(), &name) {
                        self.bind(id, tx)?;
                        sent += 1;
                    } else {
                        debug!("gilrs: ignoring \"{name}\"");
                    }
                }
                EventType::Disconnected => {
                    if self.active.as_ref().is_some_and(|a| a.id == id) {
                        self.active = None;
                        tx.disconnect()?;
                        sent += 1;
                        if self.announce_connected(tx)? {
                            sent += 1;
                        }
                    }
                }
                other => {
                    let Some(active) = self.active.as_mut().filter(|a| a.id == id) else {
                        continue;
                    };
                    if let Some(input) = translate(&self.gilrs, active, other, now) {
                        tx.input(input)?;
                        sent += 1;
                    }
                }
            }
        }
        Ok(sent)
    }

    /// Announce, then pump every `poll_interval` until the engine channel closes.
    pub fn run(mut self, tx: EngineSender, poll_interval: Duration) -> Result<()> {
        if !self.announce_connected(&tx)? {
            info!("gilrs: no controller connected yet");
        }
        loop {
            match self.pump(&tx) {
                Ok(_) => {}
                Err(Error::Closed) => return Ok(()),
                Err(e) => return Err(e),
            }
            std::thread::sleep(poll_interval);
        }
    }
}

fn translate(gilrs: &Gilrs, active: &mut Active, event: EventType, at: Instant) -> Option<InputEvent> {
    let profile = &active.profile;
    match event {
        EventType::ButtonPressed(button, _) | EventType::ButtonReleased(button, _) => {
            let pressed = matches!(event, EventType::ButtonPressed(..));
            if fold_dpad_button(&mut active.pad, button, pressed) {
                return Some(InputEvent::pad(
                    at,
                    profile.reference(DPAD_ELEMENT),
                    active.pad,
                ));
            }
            Some(InputEvent::button(
                at,
                profile.reference(element_of(button)),
                pressed,
            ))
        }
        EventType::AxisChanged(axis @ (Axis::DPadX | Axis::DPadY), value, _) => {
            fold_dpad_axis(&mut active.pad, axis, value);
            Some(InputEvent::pad(
                at,
                profile.reference(DPAD_ELEMENT),
                active.pad,
            ))
        }
        EventType::AxisChanged(axis, _, _) => {
            let gamepad = gilrs.gamepad(active.id);
            let (element, x_axis, y_axis) = match axis {
                Axis::LeftStickX | Axis::LeftStickY => {
                    (LEFT_STICK_ELEMENT, Axis::LeftStickX, Axis::LeftStickY)
                }
                Axis::RightStickX | Axis::RightStickY => {
                    (RIGHT_STICK_ELEMENT, Axis::RightStickX, Axis::RightStickY)
                }
                _ => return None,
            };
            Some(InputEvent::thumbstick(
                at,
                profile.reference(element),
                gamepad.value(x_axis),
                gamepad.value(y_axis),
            ))
        }
        EventType::Dropped => {
            warn!("gilrs: event dropped by filter");
            None
        }
        _ => None,
    }
}

/// Whether a newly connected controller called `name` becomes the active one.
fn takes_over(session: &SessionConfig, has_active: bool, name: &str) -> bool {
    !has_active && session.accepts(name)
}

/// Apply a D-pad button edge to `pad`. Returns `false` if `button` is not a D-pad direction.
fn fold_dpad_button(pad: &mut PadReading, button: Button, pressed: bool) -> bool {
    let Some(&(_, dir)) = DPAD_BUTTONS.iter().find(|&&(b, _)| b == button) else {
        return false;
    };
    *pad.get_mut(dir) = if pressed {
        DirectionState::PRESSED
    } else {
        DirectionState::RELEASED
    };
    true
}

/// Apply a `DPadX` (right positive) or `DPadY` (up positive) value to `pad`. Returns `false` for
/// any other axis.
fn fold_dpad_axis(pad: &mut PadReading, axis: Axis, value: f32) -> bool {
    let (neg, pos) = match axis {
        Axis::DPadX => (Direction::Left, Direction::Right),
        Axis::DPadY => (Direction::Down, Direction::Up),
        _ => return false,
    };
    *pad.get_mut(neg) = axis_direction(-value);
    *pad.get_mut(pos) = axis_direction(value);
    true
}

fn axis_direction(value: f32) -> DirectionState {
    let value = value.max(0.0);
    DirectionState {
        pressed: value >= DPAD_AXIS_THRESHOLD,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_button_has_a_distinct_element() {
        let mut seen: Vec<ElementId> = SLOT_BUTTONS.iter().map(|&(b, _)| element_of(b)).collect();
        seen.extend(EXTRA_BUTTONS.iter().map(|&b| element_of(b)));
        let before = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), before);
        assert!(!seen.contains(&DPAD_ELEMENT));
        assert_eq!(element_of(Button::Unknown), UNMAPPED_ELEMENT);
    }

    #[test]
    fn dpad_axis_thresholds() {
        assert_eq!(axis_direction(-1.0), DirectionState::RELEASED);
        assert!(axis_direction(1.0).pressed);
        let partial = axis_direction(0.3);
        assert!(!partial.pressed);
        assert!(!partial.at_rest());
    }

    #[test]
    fn dpad_buttons_fold_into_readings() {
        let mut pad = PadReading::neutral();
        assert!(fold_dpad_button(&mut pad, Button::DPadUp, true));
        assert_eq!(pad, PadReading::only(Direction::Up));

        assert!(fold_dpad_button(&mut pad, Button::DPadUp, false));
        assert!(pad.is_neutral());
        assert_eq!(pad.up, DirectionState::RELEASED);

        assert!(!fold_dpad_button(&mut pad, Button::South, true));
        assert!(pad.is_neutral());
    }

    #[test]
    fn dpad_axes_fold_into_readings() {
        let mut pad = PadReading::neutral();
        assert!(fold_dpad_axis(&mut pad, Axis::DPadX, -1.0));
        assert!(pad.left.pressed);
        assert!(pad.right.at_rest());

        assert!(fold_dpad_axis(&mut pad, Axis::DPadY, 1.0));
        assert!(pad.up.pressed);
        assert!(pad.down.at_rest());
        assert!(pad.left.pressed);

        fold_dpad_axis(&mut pad, Axis::DPadX, 0.0);
        fold_dpad_axis(&mut pad, Axis::DPadY, 0.0);
        assert_eq!(pad, PadReading::neutral());

        assert!(!fold_dpad_axis(&mut pad, Axis::LeftStickX, 1.0));
        assert_eq!(pad, PadReading::neutral());
    }

    #[test]
    fn first_accepted_controller_keeps_the_session() {
        let any = SessionConfig::default();
        assert!(takes_over(&any, false, "Xbox Controller"));
        assert!(!takes_over(&any, true, "Xbox Controller"));

        let preferred = SessionConfig {
            prefer: Some("dualsense".to_string()),
        };
        assert!(takes_over(&preferred, false, "DualSense Wireless Controller"));
        assert!(!takes_over(&preferred, false, "Xbox Controller"));
        assert!(!takes_over(&preferred, true, "DualSense Wireless Controller"));
    }
}
