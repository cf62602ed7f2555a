//! Events delivered to the engine.
//!
//! Backends describe raw hardware changes as small deltas ([`InputKind`]) stamped with a
//! monotonic capture time ([`InputEvent`]). Together with the connect/disconnect lifecycle these
//! form the single tagged stream ([`EngineEvent`]) consumed by the event loop.
//!
//! ## Value conventions
//! - **Buttons:** `pressed` is the device's own pressed/released decision; `value` is the analog
//!   level in `[0.0, 1.0]` (digital buttons report `0.0` or `1.0`).
//! - **D-pad:** one [`PadReading`] carries all four directions at once. A direction is *at rest*
//!   when it is not pressed and its value is `0.0`.
//! - **Thumbsticks:** `x`/`y` in `[-1.0, 1.0]`, up is positive `y`.

use crate::button::SemanticButton;
use crate::profile::{ElementRef, GamepadProfile};
use std::time::Instant;

/// D-pad direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Evaluation order for compound pad updates.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn button(self) -> SemanticButton {
        match self {
            Direction::Up => SemanticButton::DPadUp,
            Direction::Down => SemanticButton::DPadDown,
            Direction::Left => SemanticButton::DPadLeft,
            Direction::Right => SemanticButton::DPadRight,
        }
    }
}

/// State of one D-pad direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DirectionState {
    pub pressed: bool,
    pub value: f32,
}

impl DirectionState {
    pub const RELEASED: DirectionState = DirectionState {
        pressed: false,
        value: 0.0,
    };

    pub const PRESSED: DirectionState = DirectionState {
        pressed: true,
        value: 1.0,
    };

    /// Not pressed and fully released.
    #[inline]
    pub fn at_rest(self) -> bool {
        !self.pressed && self.value == 0.0
    }
}

/// Full D-pad reading delivered with every pad change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PadReading {
    pub up: DirectionState,
    pub down: DirectionState,
    pub left: DirectionState,
    pub right: DirectionState,
}

impl PadReading {
    /// All four directions at rest.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Only `dir` fully pressed.
    pub fn only(dir: Direction) -> Self {
        Self::neutral().with(dir, DirectionState::PRESSED)
    }

    pub fn with(mut self, dir: Direction, state: DirectionState) -> Self {
        *self.get_mut(dir) = state;
        self
    }

    pub fn get(&self, dir: Direction) -> DirectionState {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn get_mut(&mut self, dir: Direction) -> &mut DirectionState {
        match dir {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// No direction reports pressed.
    pub fn is_neutral(&self) -> bool {
        Direction::ALL.iter().all(|&d| !self.get(d).pressed)
    }
}

/// Raw per-element change from the bound device.
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// A button's pressed state or analog level changed.
    Button {
        element: ElementRef,
        pressed: bool,
        value: f32,
    },

    /// A directional pad changed. The reading covers all four directions.
    Pad {
        element: ElementRef,
        reading: PadReading,
    },

    /// A thumbstick moved.
    Thumbstick { element: ElementRef, x: f32, y: f32 },
}

impl InputKind {
    /// The control that changed.
    pub fn element(&self) -> ElementRef {
        match *self {
            InputKind::Button { element, .. }
            | InputKind::Pad { element, .. }
            | InputKind::Thumbstick { element, .. } => element,
        }
    }
}

/// Timestamped input change.
#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    /// Capture time (monotonic). Hold durations are measured between these stamps.
    pub at: Instant,
    pub kind: InputKind,
}

impl InputEvent {
    pub fn new(at: Instant, kind: InputKind) -> Self {
        Self { at, kind }
    }

    /// Digital button edge.
    pub fn button(at: Instant, element: ElementRef, pressed: bool) -> Self {
        Self::new(
            at,
            InputKind::Button {
                element,
                pressed,
                value: if pressed { 1.0 } else { 0.0 },
            },
        )
    }

    pub fn pad(at: Instant, element: ElementRef, reading: PadReading) -> Self {
        Self::new(at, InputKind::Pad { element, reading })
    }

    pub fn thumbstick(at: Instant, element: ElementRef, x: f32, y: f32) -> Self {
        Self::new(at, InputKind::Thumbstick { element, x, y })
    }
}

/// Everything the engine's event loop consumes.
#[derive(Clone, Debug)]
pub enum EngineEvent {
    /// A device became the active controller.
    Connected {
        name: String,
        profile: GamepadProfile,
    },
    /// The active controller went away.
    Disconnected,
    Input(InputEvent),
    /// Stop the event loop.
    Shutdown,
}

impl From<InputEvent> for EngineEvent {
    fn from(event: InputEvent) -> Self {
        EngineEvent::Input(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_means_nothing_pressed() {
        assert!(PadReading::neutral().is_neutral());
        assert!(!PadReading::only(Direction::Left).is_neutral());

        let drifting = PadReading::neutral().with(
            Direction::Up,
            DirectionState {
                pressed: false,
                value: 0.2,
            },
        );
        assert!(drifting.is_neutral());
        assert!(!drifting.up.at_rest());
    }

    #[test]
    fn directions_map_to_dpad_labels() {
        let labels: Vec<_> = Direction::ALL.iter().map(|d| d.button()).collect();
        assert_eq!(labels, SemanticButton::DPAD.to_vec());
    }
}
