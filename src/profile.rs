//! Capability profiles.
//!
//! A [`GamepadProfile`] describes which controls one connected device actually exposes. It is
//! captured once when a device is bound and never changes afterwards; a reconnect produces a new
//! profile with a new [`ProfileId`].
//!
//! # Identity
//! Backends hand out opaque [`ElementId`] handles for the physical controls they report. An
//! [`ElementRef`] pairs such a handle with the profile snapshot it belongs to, so a handle that
//! survives a reconnect can never be confused with the same number on a different device.
//!
//! Controls are addressed by fixed [`Slot`]s (A/B/X/Y, shoulders, triggers, thumbstick buttons,
//! menu/options/home, the D-pad and the two sticks). Any button the device reports that fills none
//! of those slots is kept as an *extra* button (for example a touchpad click).

use crate::button::SemanticButton;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Backend-assigned handle for one physical control.
pub type ElementId = u32;

/// Identifies one profile snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(pub u64);

static NEXT_PROFILE_ID: AtomicU64 = AtomicU64::new(1);

impl ProfileId {
    /// Allocate a process-unique profile id.
    pub fn next() -> Self {
        ProfileId(NEXT_PROFILE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile#{}", self.0)
    }
}

/// Reference to a control on a specific profile snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef {
    pub profile: ProfileId,
    pub element: ElementId,
}

/// Thumbstick side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stick {
    Left,
    Right,
}

/// Fixed control slots a profile may fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    LeftThumbstickButton,
    RightThumbstickButton,
    Options,
    Menu,
    Home,
    DPad,
    LeftThumbstick,
    RightThumbstick,
}

impl Slot {
    pub const COUNT: usize = 16;

    pub const ALL: [Slot; Slot::COUNT] = [
        Slot::ButtonA,
        Slot::ButtonB,
        Slot::ButtonX,
        Slot::ButtonY,
        Slot::LeftShoulder,
        Slot::RightShoulder,
        Slot::LeftTrigger,
        Slot::RightTrigger,
        Slot::LeftThumbstickButton,
        Slot::RightThumbstickButton,
        Slot::Options,
        Slot::Menu,
        Slot::Home,
        Slot::DPad,
        Slot::LeftThumbstick,
        Slot::RightThumbstick,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `true` for slots that carry a single pressable button.
    pub fn is_button(self) -> bool {
        !matches!(
            self,
            Slot::DPad | Slot::LeftThumbstick | Slot::RightThumbstick
        )
    }

    pub fn stick(self) -> Option<Stick> {
        match self {
            Slot::LeftThumbstick => Some(Stick::Left),
            Slot::RightThumbstick => Some(Stick::Right),
            _ => None,
        }
    }
}

/// Snapshot of the controls a bound device exposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamepadProfile {
    id: ProfileId,
    slots: [Option<ElementId>; Slot::COUNT],
    extra_buttons: Vec<ElementId>,
}

impl GamepadProfile {
    /// An empty profile (no controls) with the given id.
    pub fn new(id: ProfileId) -> Self {
        Self {
            id,
            slots: [None; Slot::COUNT],
            extra_buttons: Vec::new(),
        }
    }

    /// A profile exposing every slot, using each slot's index as its element handle.
    ///
    /// Convenient for scripted devices; real backends build profiles from what the
    /// hardware reports.
    pub fn standard(id: ProfileId) -> Self {
        Slot::ALL
            .iter()
            .fold(Self::new(id), |p, &slot| p.with(slot, slot.index() as ElementId))
    }

    /// Bind `element` to `slot`.
    pub fn with(mut self, slot: Slot, element: ElementId) -> Self {
        self.slots[slot.index()] = Some(element);
        self
    }

    /// Remove `slot` from the profile.
    pub fn without(mut self, slot: Slot) -> Self {
        self.slots[slot.index()] = None;
        self
    }

    /// Register a button element that fills no named slot.
    pub fn with_extra_button(mut self, element: ElementId) -> Self {
        if !self.extra_buttons.contains(&element) {
            self.extra_buttons.push(element);
        }
        self
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn element(&self, slot: Slot) -> Option<ElementId> {
        self.slots[slot.index()]
    }

    /// Reference to the element bound to `slot` on this snapshot.
    pub fn element_ref(&self, slot: Slot) -> Option<ElementRef> {
        self.element(slot).map(|element| ElementRef {
            profile: self.id,
            element,
        })
    }

    /// Reference to an arbitrary element on this snapshot.
    pub fn reference(&self, element: ElementId) -> ElementRef {
        ElementRef {
            profile: self.id,
            element,
        }
    }

    pub fn extra_buttons(&self) -> &[ElementId] {
        &self.extra_buttons
    }

    /// Filled slots in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, ElementId)> + '_ {
        Slot::ALL
            .iter()
            .filter_map(move |&slot| self.element(slot).map(|e| (slot, e)))
    }

    /// Semantic buttons this device can actually produce.
    ///
    /// A present D-pad contributes all four directions. Extra buttons are not listed.
    pub fn supported_buttons(&self) -> BTreeSet<SemanticButton> {
        let mut out = BTreeSet::new();
        for (slot, _) in self.slots() {
            if slot == Slot::DPad {
                out.extend(SemanticButton::DPAD);
            } else if let Some(button) = SemanticButton::from_slot(slot) {
                out.insert(button);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_profile_fills_every_slot() {
        let p = GamepadProfile::standard(ProfileId(7));
        assert_eq!(p.slots().count(), Slot::COUNT);
        assert_eq!(p.element(Slot::Home), Some(Slot::Home.index() as ElementId));
        assert_eq!(
            p.element_ref(Slot::ButtonB),
            Some(ElementRef {
                profile: ProfileId(7),
                element: 1
            })
        );
    }

    #[test]
    fn supported_buttons_follow_present_slots() {
        let p = GamepadProfile::new(ProfileId(1))
            .with(Slot::ButtonA, 10)
            .with(Slot::DPad, 20)
            .with(Slot::LeftThumbstick, 30)
            .with_extra_button(40);

        let supported: Vec<_> = p.supported_buttons().into_iter().collect();
        assert_eq!(
            supported,
            vec![
                SemanticButton::A,
                SemanticButton::DPadUp,
                SemanticButton::DPadDown,
                SemanticButton::DPadLeft,
                SemanticButton::DPadRight,
            ]
        );
    }

    #[test]
    fn missing_slots_are_never_supported() {
        let p = GamepadProfile::standard(ProfileId(2))
            .without(Slot::Home)
            .without(Slot::LeftThumbstickButton);
        let supported = p.supported_buttons();
        assert!(!supported.contains(&SemanticButton::Home));
        assert!(!supported.contains(&SemanticButton::LeftThumbstick));
        assert!(supported.contains(&SemanticButton::RightThumbstick));
    }

    #[test]
    fn profile_ids_are_unique() {
        let a = ProfileId::next();
        let b = ProfileId::next();
        assert_ne!(a, b);
    }
}
