//! Single-consumer event loop.
//!
//! [`channel`] splits the engine into a cloneable [`EngineSender`] for backends and an
//! [`EventLoop`] that owns the [`Engine`]. The loop is the only place engine state is mutated:
//! it blocks on the channel until either an event arrives or the ticker's deadline passes, applies
//! that one thing, and publishes a [`Change`] when state changed.
//!
//! ```no_run
//! use padtrace::{channel, Config, LogListener, ChangeFilter};
//!
//! let (tx, mut event_loop) = channel(&Config::default());
//! event_loop.bus_mut().add_listener(LogListener::new(), ChangeFilter::All);
//! let worker = std::thread::spawn(move || event_loop.run());
//! // ... hand `tx` clones to backends ...
//! tx.shutdown().ok();
//! let engine = worker.join().unwrap();
//! println!("{} presses recorded", engine.history().len());
//! ```

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::event::{EngineEvent, InputEvent};
use crate::eventbus::{Change, ChangeBus, ChangeCause};
use crate::profile::GamepadProfile;
use log::debug;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Instant;

/// Create a connected sender / event loop pair.
pub fn channel(config: &Config) -> (EngineSender, EventLoop) {
    let (tx, rx) = mpsc::channel();
    (
        EngineSender { tx },
        EventLoop {
            engine: Engine::new(config),
            rx,
            bus: ChangeBus::new(),
        },
    )
}

/// Producer side of the engine channel.
#[derive(Clone, Debug)]
pub struct EngineSender {
    tx: Sender<EngineEvent>,
}

impl EngineSender {
    pub fn send(&self, event: EngineEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| Error::Closed)
    }

    pub fn connect(&self, name: impl Into<String>, profile: GamepadProfile) -> Result<()> {
        self.send(EngineEvent::Connected {
            name: name.into(),
            profile,
        })
    }

    pub fn disconnect(&self) -> Result<()> {
        self.send(EngineEvent::Disconnected)
    }

    pub fn input(&self, event: InputEvent) -> Result<()> {
        self.send(EngineEvent::Input(event))
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(EngineEvent::Shutdown)
    }
}

/// Outcome of one [`EventLoop::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An event or tick was processed; the cause is set if state changed.
    Processed(Option<ChangeCause>),
    /// Nothing was pending.
    Idle,
    /// Shutdown was requested or every sender is gone.
    Finished,
}

pub struct EventLoop {
    engine: Engine,
    rx: Receiver<EngineEvent>,
    bus: ChangeBus,
}

impl EventLoop {
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn bus_mut(&mut self) -> &mut ChangeBus {
        &mut self.bus
    }

    /// Run until shutdown or until every sender is dropped, then hand the engine back.
    pub fn run(mut self) -> Engine {
        loop {
            let next = match self.engine.next_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match self.rx.recv_timeout(wait) {
                        Ok(event) => Some(event),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match self.rx.recv() {
                    Ok(event) => Some(event),
                    Err(_) => break,
                },
            };

            match next {
                Some(EngineEvent::Shutdown) => break,
                Some(event) => {
                    self.dispatch(event);
                }
                None => {}
            }
            self.tick(Instant::now());
        }
        debug!("event loop finished");
        self.engine
    }

    /// Process at most one pending event without blocking, then fire the ticker if due at `now`.
    ///
    /// Useful for hosts that own their own frame loop.
    pub fn step(&mut self, now: Instant) -> Step {
        match self.rx.try_recv() {
            Ok(EngineEvent::Shutdown) => Step::Finished,
            Ok(event) => {
                let cause = self.dispatch(event);
                Step::Processed(self.tick(now).or(cause))
            }
            Err(TryRecvError::Empty) => match self.tick(now) {
                Some(cause) => Step::Processed(Some(cause)),
                None => Step::Idle,
            },
            Err(TryRecvError::Disconnected) => Step::Finished,
        }
    }

    /// Drain every pending event, firing the ticker at `now` afterwards.
    pub fn drain(&mut self, now: Instant) -> Step {
        loop {
            match self.step(now) {
                Step::Processed(_) => continue,
                other => return other,
            }
        }
    }

    fn dispatch(&mut self, event: EngineEvent) -> Option<ChangeCause> {
        let cause = self.engine.handle(event);
        if let Some(cause) = cause {
            self.publish(cause);
        }
        cause
    }

    fn tick(&mut self, now: Instant) -> Option<ChangeCause> {
        let cause = self.engine.tick(now);
        if let Some(cause) = cause {
            self.publish(cause);
        }
        cause
    }

    fn publish(&mut self, cause: ChangeCause) {
        if self.bus.is_idle() {
            return;
        }
        let change = Change {
            cause,
            snapshot: self.engine.snapshot(),
        };
        self.bus.emit(&change);
    }
}
