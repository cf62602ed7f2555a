#![cfg_attr(docsrs, feature(doc_cfg))]

//! Controller input tracking.
//!
//! A backend ([`VirtualGamepad`], or the `gilrs` source behind the `gilrs` feature) feeds
//! [`EngineEvent`]s into an [`EngineSender`]. The [`EventLoop`] applies them to an [`Engine`], which
//! tracks held buttons, keeps the last ten completed presses and measures live hold durations,
//! and publishes [`Snapshot`]s to listeners on its [`ChangeBus`].

pub mod backends;
pub mod button;
pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod history;
pub mod logger;
pub mod profile;
pub mod resolver;
pub mod runtime;
pub mod session;
pub mod snapshot;
pub mod ticker;
pub mod tracker;
pub mod visual;

pub use backends::virtual_input::VirtualGamepad;
pub use button::SemanticButton;
pub use config::Config;
pub use device::{forward, Device};
pub use engine::Engine;
pub use error::{Error, Result};
pub use event::{Direction, DirectionState, EngineEvent, InputEvent, InputKind, PadReading};
pub use eventbus::{Change, ChangeBus, ChangeCause, ChangeFilter, StateListener};
pub use filtered_listener::FilteredListener;
pub use history::{HistoryRecord, HistoryRing, HISTORY_CAPACITY};
pub use logger::LogListener;
pub use profile::{ElementId, ElementRef, GamepadProfile, ProfileId, Slot, Stick};
pub use runtime::{channel, EngineSender, EventLoop, Step};
pub use snapshot::{Snapshot, StickPosition, Thumbsticks};
pub use ticker::TickerMode;
