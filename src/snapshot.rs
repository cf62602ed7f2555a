//! Published engine state.
//!
//! [`Snapshot`] is an **owned**, read-only view of everything a display needs at one point in
//! time. It is produced by [`Engine::snapshot`](crate::engine::Engine::snapshot) and handed to
//! change-bus listeners; display code never sees the engine itself.
//!
//! # Semantics
//! - A snapshot is **immutable**. To refresh, take a new one (or listen on the change bus).
//! - `history` is oldest-first and holds at most [`HISTORY_CAPACITY`](crate::history::HISTORY_CAPACITY) records.
//! - `live_duration` follows the most recently pressed button; `live_durations` covers every
//!   button the ticker is measuring.
//!
//! # JSON
//! [`Snapshot::to_json`] renders durations as fractional seconds and history start times as
//! seconds before the snapshot was taken, since `Instant`s have no absolute meaning:
//! ```ignore
//! println!("{}", engine.snapshot().to_json()?);
//! ```

use crate::button::SemanticButton;
use crate::error::Result;
use crate::history::HistoryRecord;
use crate::visual::Visuals;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

/// Display position of a thumbstick. `y` is inverted relative to the device (up is negative).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct StickPosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Thumbsticks {
    pub left: StickPosition,
    pub right: StickPosition,
}

#[derive(Clone, Debug)]
pub struct Snapshot {
    pub taken_at: Instant,
    pub connected_device: Option<String>,
    pub last_pressed: Option<SemanticButton>,
    pub currently_pressed: BTreeSet<SemanticButton>,
    pub live_duration: Option<Duration>,
    pub live_durations: BTreeMap<SemanticButton, Duration>,
    pub history: Vec<HistoryRecord>,
    pub supported_buttons: BTreeSet<SemanticButton>,
    pub visuals: Visuals,
    pub thumbsticks: Thumbsticks,
}

impl Snapshot {
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected_device.is_some()
    }

    #[inline]
    pub fn is_pressed(&self, button: SemanticButton) -> bool {
        self.currently_pressed.contains(&button)
    }

    /// Serialize for tooling and logs.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&SnapshotJson::from(self))?)
    }
}

#[derive(Serialize)]
struct HistoryJson {
    button: SemanticButton,
    started_secs_ago: f64,
    duration_secs: f64,
}

#[derive(Serialize)]
struct SnapshotJson<'a> {
    connected_device: Option<&'a str>,
    last_pressed: Option<SemanticButton>,
    currently_pressed: &'a BTreeSet<SemanticButton>,
    live_duration_secs: Option<f64>,
    live_durations_secs: BTreeMap<SemanticButton, f64>,
    history: Vec<HistoryJson>,
    supported_buttons: &'a BTreeSet<SemanticButton>,
    visuals: &'a Visuals,
    thumbsticks: &'a Thumbsticks,
}

impl<'a> From<&'a Snapshot> for SnapshotJson<'a> {
    fn from(s: &'a Snapshot) -> Self {
        Self {
            connected_device: s.connected_device.as_deref(),
            last_pressed: s.last_pressed,
            currently_pressed: &s.currently_pressed,
            live_duration_secs: s.live_duration.map(|d| d.as_secs_f64()),
            live_durations_secs: s
                .live_durations
                .iter()
                .map(|(&b, d)| (b, d.as_secs_f64()))
                .collect(),
            history: s
                .history
                .iter()
                .map(|r| HistoryJson {
                    button: r.button,
                    started_secs_ago: s.taken_at.saturating_duration_since(r.started_at).as_secs_f64(),
                    duration_secs: r.duration.as_secs_f64(),
                })
                .collect(),
            supported_buttons: &s.supported_buttons,
            visuals: &s.visuals,
            thumbsticks: &s.thumbsticks,
        }
    }
}
