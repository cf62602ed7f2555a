use padtrace::backends::gilrs::GilrsSource;
use padtrace::{channel, Change, ChangeCause, ChangeFilter, Config, LogListener};
use std::time::Duration;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path).expect("load config"),
        None => Config::default(),
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.filter.as_str()),
    )
    .init();

    let source = GilrsSource::new(&config).expect("init gilrs");
    let (tx, mut event_loop) = channel(&config);
    event_loop
        .bus_mut()
        .add_listener(LogListener::new(), ChangeFilter::All);
    let mut printed = None;
    event_loop.bus_mut().add_listener(
        move |c: &Change| {
            let Some(last) = c.snapshot.history.last() else {
                return;
            };
            if c.cause == ChangeCause::Edge && printed != Some(last.started_at) {
                printed = Some(last.started_at);
                println!("{} held {:.2}s", last.button, last.duration.as_secs_f64());
            }
        },
        ChangeFilter::EdgesOnly,
    );
    std::thread::spawn(move || event_loop.run());

    // gilrs stays on the main thread; the engine runs on its own.
    source
        .run(tx, Duration::from_millis(4))
        .expect("gilrs source failed");
}
