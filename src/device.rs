//! Device abstraction.
//!
//! A [`Device`] is anything that can describe its controls ([`GamepadProfile`]) and report input
//! changes when polled. Backends wrap real hardware; [`VirtualGamepad`](crate::backends::virtual_input::VirtualGamepad)
//! is a scripted implementation for demos and tests.

use crate::error::Result;
use crate::event::{EngineEvent, InputEvent};
use crate::profile::GamepadProfile;
use crate::runtime::EngineSender;

pub trait Device {
    /// Drain input changes since the last poll, oldest first.
    fn poll(&mut self) -> Vec<InputEvent>;
    fn name(&self) -> &str;
    fn id(&self) -> &str;
    fn profile(&self) -> &GamepadProfile;

    /// The connect notification announcing this device.
    fn connected_event(&self) -> EngineEvent {
        EngineEvent::Connected {
            name: self.name().to_string(),
            profile: self.profile().clone(),
        }
    }
}

/// Poll `device` once and forward everything to the engine. Returns the number of events sent.
pub fn forward(device: &mut dyn Device, tx: &EngineSender) -> Result<usize> {
    let events = device.poll();
    let n = events.len();
    for event in events {
        tx.input(event)?;
    }
    Ok(n)
}
