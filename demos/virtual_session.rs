use padtrace::profile::Stick;
use padtrace::{
    channel, forward, Change, ChangeFilter, Config, Device, Direction, EngineSender, LogListener,
    Slot, VirtualGamepad,
};
use std::time::{Duration, Instant};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let config = Config::default();
    let (tx, mut event_loop) = channel(&config);
    event_loop
        .bus_mut()
        .add_listener(LogListener::new(), ChangeFilter::EdgesOnly);
    event_loop.bus_mut().add_listener(
        |c: &Change| {
            if let Some(d) = c.snapshot.live_duration {
                println!("  live {:.1}s", d.as_secs_f64());
            }
        },
        ChangeFilter::TicksOnly,
    );
    let worker = std::thread::spawn(move || event_loop.run());

    let mut pad = VirtualGamepad::new("virtual:demo", "Demo Virtual Pad");
    tx.send(pad.connected_event()).expect("send connect");

    // Hold A for 250ms, overlap B, roll the D-pad from up to left, then hold Y long enough for
    // the ticker to report. Each step waits for its moment and is stamped when it happens.
    let t0 = Instant::now();
    let ms = |n| t0 + Duration::from_millis(n);
    play(&mut pad, &tx, ms(0), |p, at| p.press(Slot::ButtonA, at));
    play(&mut pad, &tx, ms(100), |p, at| p.press(Slot::ButtonB, at));
    play(&mut pad, &tx, ms(250), |p, at| p.release(Slot::ButtonA, at));
    play(&mut pad, &tx, ms(400), |p, at| p.release(Slot::ButtonB, at));
    play(&mut pad, &tx, ms(450), |p, at| p.dpad(Direction::Up, true, at));
    play(&mut pad, &tx, ms(500), |p, at| p.dpad(Direction::Left, true, at));
    play(&mut pad, &tx, ms(600), |p, at| p.dpad_neutral(at));
    play(&mut pad, &tx, ms(650), |p, at| p.move_stick(Stick::Left, 0.5, 1.0, at));
    play(&mut pad, &tx, ms(700), |p, at| p.press(Slot::ButtonY, at));
    play(&mut pad, &tx, ms(1050), |p, at| p.release(Slot::ButtonY, at));

    tx.shutdown().expect("shutdown");
    let engine = worker.join().expect("event loop panicked");

    println!("History (oldest first):");
    for record in engine.history().iter() {
        println!(
            "- {:<18} {:.3}s",
            record.button.label(),
            record.duration.as_secs_f64()
        );
    }
    println!(
        "{}",
        engine.snapshot().to_json().expect("serialize snapshot")
    );
}

/// Wait until `due`, apply `act` stamped with the current time and forward the result.
fn play(
    pad: &mut VirtualGamepad,
    tx: &EngineSender,
    due: Instant,
    act: impl FnOnce(&mut VirtualGamepad, Instant),
) {
    std::thread::sleep(due.saturating_duration_since(Instant::now()));
    act(pad, Instant::now());
    forward(pad, tx).expect("forward input");
}
