use crate::eventbus::{Change, StateListener};

/// Wraps a listener and forwards only changes matching a user-supplied predicate.
///
/// Use this when a [`ChangeFilter`](crate::eventbus::ChangeFilter) is too coarse, for example to
/// react only while a specific button is held.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&Change) -> bool + Send + Sync>,
    inner: Box<dyn StateListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&Change) -> bool + Send + Sync + 'static,
        inner: impl StateListener + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }
}

impl StateListener for FilteredListener {
    fn on_change(&mut self, change: &Change) {
        if (self.predicate)(change) {
            self.inner.on_change(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::SemanticButton;
    use crate::engine::Engine;
    use crate::eventbus::ChangeCause;
    use crate::event::InputEvent;
    use crate::profile::{GamepadProfile, ProfileId, Slot};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[test]
    fn forwards_only_matching_changes() {
        let seen = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&seen);
        let mut listener = FilteredListener::new(
            |c: &Change| c.snapshot.is_pressed(SemanticButton::A),
            move |_: &Change| *sink.lock().unwrap() += 1,
        );

        let mut engine = Engine::default();
        let p = GamepadProfile::standard(ProfileId::next());
        engine.connect("Pad", p.clone());

        let idle = Change {
            cause: ChangeCause::Connected,
            snapshot: engine.snapshot(),
        };
        listener.on_change(&idle);

        let a = p.element_ref(Slot::ButtonA).unwrap();
        engine.input(InputEvent::button(Instant::now(), a, true));
        let held = Change {
            cause: ChangeCause::Edge,
            snapshot: engine.snapshot(),
        };
        listener.on_change(&held);

        assert_eq!(*seen.lock().unwrap(), 1);
    }
}
