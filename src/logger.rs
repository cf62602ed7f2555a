//! Change-bus listener that writes every published change to the `log` facade.
use crate::eventbus::{Change, ChangeCause, StateListener};
use log::{debug, info, trace};

/// Logs published changes: connects/disconnects at `info`, edges at `debug`, ticks and stick
/// motion at `trace`.
#[derive(Debug, Default)]
pub struct LogListener;

impl LogListener {
    pub fn new() -> Self {
        LogListener
    }
}

impl StateListener for LogListener {
    fn on_change(&mut self, change: &Change) {
        let snap = &change.snapshot;
        match change.cause {
            ChangeCause::Connected => info!(
                "[controller] connected: {} ({} supported buttons)",
                snap.connected_device.as_deref().unwrap_or("?"),
                snap.supported_buttons.len()
            ),
            ChangeCause::Disconnected => info!("[controller] disconnected"),
            ChangeCause::Edge => {
                let held: Vec<&str> = snap.currently_pressed.iter().map(|b| b.label()).collect();
                debug!(
                    "[controller] last={} held=[{}] history={}",
                    snap.last_pressed.map(|b| b.label()).unwrap_or("None"),
                    held.join(", "),
                    snap.history.len()
                );
            }
            ChangeCause::Thumbstick => trace!(
                "[controller] sticks L=({:.2},{:.2}) R=({:.2},{:.2})",
                snap.thumbsticks.left.x,
                snap.thumbsticks.left.y,
                snap.thumbsticks.right.x,
                snap.thumbsticks.right.y
            ),
            ChangeCause::Tick => trace!(
                "[controller] live={:.2}s",
                snap.live_duration.map(|d| d.as_secs_f64()).unwrap_or(0.0)
            ),
        }
    }
}
