use padtrace::{
    Config, Device, Direction, Engine, EngineEvent, SemanticButton, Slot, TickerMode,
    VirtualGamepad, HISTORY_CAPACITY,
};
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Bind `pad` to a fresh engine and apply everything it has queued.
fn replay(engine: &mut Engine, pad: &mut VirtualGamepad) {
    engine.handle(pad.connected_event());
    flush(engine, pad);
}

fn flush(engine: &mut Engine, pad: &mut VirtualGamepad) {
    for event in pad.poll() {
        engine.handle(event.into());
    }
}

#[test]
fn single_press_is_recorded_with_its_duration() {
    let t0 = Instant::now();
    let mut pad = VirtualGamepad::new("virtual:0", "Pad");
    pad.press(Slot::ButtonA, t0);
    pad.release(Slot::ButtonA, t0 + ms(250));

    let mut engine = Engine::default();
    replay(&mut engine, &mut pad);

    let snap = engine.snapshot_at(t0 + ms(300));
    assert_eq!(snap.history.len(), 1);
    assert_eq!(snap.history[0].button, SemanticButton::A);
    assert_eq!(snap.history[0].started_at, t0);
    assert_eq!(snap.history[0].duration, ms(250));
    assert!(snap.currently_pressed.is_empty());
    assert_eq!(snap.last_pressed, None);
}

#[test]
fn overlapping_presses_are_tracked_independently() {
    let t0 = Instant::now();
    let mut pad = VirtualGamepad::new("virtual:0", "Pad");
    pad.press(Slot::ButtonA, t0);
    pad.press(Slot::ButtonB, t0 + ms(100));

    let mut engine = Engine::default();
    replay(&mut engine, &mut pad);

    let mid = engine.snapshot_at(t0 + ms(200));
    assert!(mid.is_pressed(SemanticButton::A));
    assert!(mid.is_pressed(SemanticButton::B));
    assert_eq!(mid.currently_pressed.len(), 2);
    assert_eq!(mid.last_pressed, Some(SemanticButton::B));
    assert!(mid.history.is_empty());

    pad.release(Slot::ButtonA, t0 + ms(300));
    pad.release(Slot::ButtonB, t0 + ms(400));
    flush(&mut engine, &mut pad);

    let history = engine.history_records();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].button, SemanticButton::A);
    assert_eq!(history[0].started_at, t0);
    assert_eq!(history[0].duration, ms(300));
    assert_eq!(history[1].button, SemanticButton::B);
    assert_eq!(history[1].started_at, t0 + ms(100));
    assert_eq!(history[1].duration, ms(300));
}

#[test]
fn releasing_an_older_hold_keeps_last_pressed() {
    let t0 = Instant::now();
    let mut pad = VirtualGamepad::new("virtual:0", "Pad");
    pad.press(Slot::ButtonA, t0);
    pad.press(Slot::ButtonB, t0 + ms(100));
    pad.release(Slot::ButtonA, t0 + ms(150));

    let mut engine = Engine::default();
    replay(&mut engine, &mut pad);
    assert_eq!(engine.last_pressed(), Some(SemanticButton::B));
}

#[test]
fn repeated_edges_are_idempotent() {
    let t0 = Instant::now();
    let mut pad = VirtualGamepad::new("virtual:0", "Pad");
    pad.press(Slot::ButtonX, t0);
    pad.press(Slot::ButtonX, t0 + ms(50));
    pad.release(Slot::ButtonX, t0 + ms(80));
    pad.release(Slot::ButtonX, t0 + ms(90));
    pad.release(Slot::ButtonY, t0 + ms(95));

    let mut engine = Engine::default();
    replay(&mut engine, &mut pad);

    let history = engine.history_records();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].button, SemanticButton::X);
    assert_eq!(history[0].started_at, t0);
    assert_eq!(history[0].duration, ms(80));
}

#[test]
fn disconnect_drops_open_holds_but_keeps_history() {
    let t0 = Instant::now();
    let mut pad = VirtualGamepad::new("virtual:0", "Pad");
    pad.press(Slot::ButtonA, t0);
    pad.release(Slot::ButtonA, t0 + ms(20));
    pad.press(Slot::RightTrigger, t0 + ms(30));

    let mut engine = Engine::default();
    replay(&mut engine, &mut pad);
    assert!(engine.next_deadline().is_some());

    engine.handle(EngineEvent::Disconnected);
    let snap = engine.snapshot();
    assert!(!snap.is_connected());
    assert!(snap.currently_pressed.is_empty());
    assert!(snap.supported_buttons.is_empty());
    assert_eq!(snap.live_duration, None);
    assert_eq!(snap.history.len(), 1);
    assert_eq!(engine.next_deadline(), None);

    // The release of the discarded hold arrives late and must not create a record.
    pad.release(Slot::RightTrigger, t0 + ms(60));
    flush(&mut engine, &mut pad);
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn dpad_neutral_releases_every_held_direction() {
    let t0 = Instant::now();
    let mut pad = VirtualGamepad::new("virtual:0", "Pad");
    pad.dpad(Direction::Up, true, t0);
    pad.dpad(Direction::Right, true, t0 + ms(40));

    let mut engine = Engine::default();
    replay(&mut engine, &mut pad);

    let held = engine.snapshot();
    assert!(held.is_pressed(SemanticButton::DPadUp));
    assert!(held.is_pressed(SemanticButton::DPadRight));
    assert_eq!(held.visuals.dpad, "dpad.right.filled");

    pad.dpad_neutral(t0 + ms(100));
    flush(&mut engine, &mut pad);

    let snap = engine.snapshot();
    assert!(snap.currently_pressed.is_empty());
    assert_eq!(snap.visuals.dpad, "dpad");
    let labels: Vec<_> = snap.history.iter().map(|r| r.button).collect();
    assert_eq!(labels, [SemanticButton::DPadUp, SemanticButton::DPadRight]);
    assert_eq!(snap.history[0].duration, ms(100));
    assert_eq!(snap.history[1].duration, ms(60));
}

#[test]
fn supported_buttons_follow_the_profile() {
    let mut engine = Engine::default();
    let pad = VirtualGamepad::new("virtual:0", "Pad");
    engine.handle(pad.connected_event());

    let supported = engine.supported_buttons();
    for b in SemanticButton::DPAD {
        assert!(supported.contains(&b));
    }
    assert!(supported.contains(&SemanticButton::Create));
    assert!(supported.contains(&SemanticButton::Options));
    assert!(supported.contains(&SemanticButton::Home));
    assert!(!supported.contains(&SemanticButton::Unknown));
}

#[test]
fn ticker_reports_live_duration_until_release() {
    let t0 = Instant::now();
    let mut pad = VirtualGamepad::new("virtual:0", "Pad");
    pad.press(Slot::LeftShoulder, t0);

    let mut engine = Engine::default();
    replay(&mut engine, &mut pad);
    assert_eq!(engine.live_duration(), None);

    assert!(engine.tick(t0 + ms(50)).is_none());
    assert!(engine.tick(t0 + ms(100)).is_some());
    assert_eq!(engine.live_duration(), Some(ms(100)));
    assert!(engine.tick(t0 + ms(205)).is_some());
    assert_eq!(engine.live_duration(), Some(ms(205)));

    pad.release(Slot::LeftShoulder, t0 + ms(230));
    flush(&mut engine, &mut pad);
    assert_eq!(engine.live_duration(), None);
    assert_eq!(engine.next_deadline(), None);
}

#[test]
fn last_pressed_mode_only_measures_the_newest_press() {
    let config = Config::from_toml_str("[ticker]\nmode = \"last_pressed\"\n").unwrap();
    assert_eq!(config.ticker.mode, TickerMode::LastPressed);

    let t0 = Instant::now();
    let mut pad = VirtualGamepad::new("virtual:0", "Pad");
    pad.press(Slot::ButtonA, t0);
    pad.press(Slot::ButtonB, t0 + ms(50));

    let mut engine = Engine::new(&config);
    replay(&mut engine, &mut pad);
    engine.tick(t0 + ms(150));
    assert_eq!(engine.live_durations().len(), 1);
    assert_eq!(engine.live_duration(), Some(ms(100)));

    // Releasing B leaves A held but unmeasured.
    pad.release(Slot::ButtonB, t0 + ms(160));
    flush(&mut engine, &mut pad);
    assert!(engine.currently_pressed().contains(&SemanticButton::A));
    assert_eq!(engine.next_deadline(), None);
}

#[test]
fn all_held_mode_measures_every_hold() {
    let t0 = Instant::now();
    let mut pad = VirtualGamepad::new("virtual:0", "Pad");
    pad.press(Slot::ButtonA, t0);
    pad.press(Slot::ButtonB, t0 + ms(50));

    let mut engine = Engine::default();
    replay(&mut engine, &mut pad);
    engine.tick(t0 + ms(150));
    assert_eq!(engine.live_durations()[&SemanticButton::A], ms(150));
    assert_eq!(engine.live_durations()[&SemanticButton::B], ms(100));
    assert_eq!(engine.live_duration(), Some(ms(100)));

    pad.release(Slot::ButtonB, t0 + ms(160));
    flush(&mut engine, &mut pad);
    assert!(engine.next_deadline().is_some());
    engine.tick(t0 + ms(250));
    assert_eq!(engine.live_durations()[&SemanticButton::A], ms(250));
}

proptest! {
    #[test]
    fn history_keeps_the_newest_presses(count in 1usize..40) {
        let slots = [Slot::ButtonA, Slot::ButtonB, Slot::ButtonX, Slot::ButtonY];
        let t0 = Instant::now();
        let mut pad = VirtualGamepad::new("virtual:0", "Pad");
        for i in 0..count {
            let slot = slots[i % slots.len()];
            let start = t0 + ms(i as u64 * 10);
            pad.press(slot, start);
            pad.release(slot, start + ms(5));
        }

        let mut engine = Engine::default();
        replay(&mut engine, &mut pad);

        let history = engine.history_records();
        prop_assert_eq!(history.len(), count.min(HISTORY_CAPACITY));
        let first = count.saturating_sub(HISTORY_CAPACITY);
        for (offset, record) in history.iter().enumerate() {
            let i = first + offset;
            prop_assert_eq!(record.started_at, t0 + ms(i as u64 * 10));
            prop_assert_eq!(
                Some(record.button),
                SemanticButton::from_slot(slots[i % slots.len()])
            );
        }
    }
}
