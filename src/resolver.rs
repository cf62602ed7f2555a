//! Identity resolution.
//!
//! A [`Resolver`] is built once per device bind from the bound [`GamepadProfile`]. It indexes
//! every element handle by the slot it fills, so resolving a notification is a single map lookup
//! instead of comparing against each named control in turn.
//!
//! Resolution never fails:
//! - an element from a different profile snapshot resolves to [`SemanticButton::Unknown`];
//! - a named button slot resolves to its label;
//! - an extra button the profile lists resolves to [`SemanticButton::Touchpad`];
//! - anything else is [`SemanticButton::Unknown`].

use crate::button::SemanticButton;
use crate::profile::{ElementId, ElementRef, GamepadProfile, ProfileId, Slot, Stick};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug)]
pub struct Resolver {
    profile: ProfileId,
    by_element: HashMap<ElementId, Slot>,
    extras: HashSet<ElementId>,
}

impl Resolver {
    pub fn new(profile: &GamepadProfile) -> Self {
        let mut by_element = HashMap::new();
        for (slot, element) in profile.slots() {
            // First slot wins if a backend reuses a handle.
            by_element.entry(element).or_insert(slot);
        }
        let extras = profile
            .extra_buttons()
            .iter()
            .copied()
            .filter(|e| !by_element.contains_key(e))
            .collect();

        Self {
            profile: profile.id(),
            by_element,
            extras,
        }
    }

    pub fn profile_id(&self) -> ProfileId {
        self.profile
    }

    fn slot(&self, element: ElementRef) -> Option<Slot> {
        if element.profile != self.profile {
            return None;
        }
        self.by_element.get(&element.element).copied()
    }

    /// Resolve a button notification to its semantic label.
    pub fn resolve_button(&self, element: ElementRef) -> SemanticButton {
        if element.profile != self.profile {
            return SemanticButton::Unknown;
        }
        match self.slot(element).and_then(SemanticButton::from_slot) {
            Some(label) => label,
            None if self.extras.contains(&element.element) => SemanticButton::Touchpad,
            None => SemanticButton::Unknown,
        }
    }

    /// `true` if `element` is the profile's D-pad.
    pub fn resolve_pad(&self, element: ElementRef) -> bool {
        self.slot(element) == Some(Slot::DPad)
    }

    pub fn resolve_stick(&self, element: ElementRef) -> Option<Stick> {
        self.slot(element).and_then(Slot::stick)
    }
}
