//! Press/release tracking.
//!
//! [`PressTracker`] keeps, per semantic label, whether it is held and since when. It turns edges
//! into [`EdgeOutcome`]s; the engine applies those to the history and the ticker.
//!
//! # Invariants
//! - A label has at most one open hold. A second press of a held label is ignored, not a restart.
//! - A release without an open hold is ignored (some hardware reports releases twice).
//! - `last_pressed` is either `None` or a label that is currently held.

use crate::button::SemanticButton;
use crate::event::{Direction, PadReading};
use crate::history::HistoryRecord;
use log::debug;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Result of applying one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// A new hold was opened.
    Opened,
    /// A hold was closed, producing `record`.
    Closed { record: HistoryRecord },
    /// Redundant edge, nothing changed.
    Ignored,
}

impl EdgeOutcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, EdgeOutcome::Ignored)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PressTracker {
    open: BTreeMap<SemanticButton, Instant>,
    last_pressed: Option<SemanticButton>,
}

impl PressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a press (`pressed = true`) or release edge for `label` observed at `now`.
    pub fn on_edge(&mut self, label: SemanticButton, pressed: bool, now: Instant) -> EdgeOutcome {
        if pressed {
            if self.open.contains_key(&label) {
                return EdgeOutcome::Ignored;
            }
            self.open.insert(label, now);
            self.last_pressed = Some(label);
            debug!("press {label}");
            EdgeOutcome::Opened
        } else {
            let Some(started_at) = self.open.remove(&label) else {
                return EdgeOutcome::Ignored;
            };
            if self.last_pressed == Some(label) || !self.any_held() {
                self.last_pressed = None;
            }
            let record = HistoryRecord {
                button: label,
                started_at,
                duration: now.saturating_duration_since(started_at),
            };
            debug!("release {label} after {:.3}s", record.duration.as_secs_f64());
            EdgeOutcome::Closed { record }
        }
    }

    /// Apply one D-pad reading as a single compound transition.
    ///
    /// Directions are evaluated Up, Down, Left, Right. A pressed direction opens (or keeps) its
    /// hold; a direction at rest closes it. A neutral reading closes every open direction even if
    /// one still reports a residual analog value.
    pub fn on_pad(
        &mut self,
        reading: &PadReading,
        now: Instant,
    ) -> Vec<(SemanticButton, EdgeOutcome)> {
        let neutral = reading.is_neutral();
        let mut out = Vec::new();

        for dir in Direction::ALL {
            let state = reading.get(dir);
            let label = dir.button();
            let outcome = if state.pressed {
                self.on_edge(label, true, now)
            } else if state.at_rest() || neutral {
                self.on_edge(label, false, now)
            } else {
                EdgeOutcome::Ignored
            };
            if outcome.is_change() {
                out.push((label, outcome));
            }
        }
        out
    }

    /// Drop every open hold without producing records. Returns how many were open.
    pub fn discard_all(&mut self) -> usize {
        let n = self.open.len();
        self.open.clear();
        self.last_pressed = None;
        n
    }

    pub fn started_at(&self, label: SemanticButton) -> Option<Instant> {
        self.open.get(&label).copied()
    }

    pub fn is_held(&self, label: SemanticButton) -> bool {
        self.open.contains_key(&label)
    }

    /// Elapsed hold time of `label` at `now`, if held.
    pub fn held_for(&self, label: SemanticButton, now: Instant) -> Option<Duration> {
        self.started_at(label)
            .map(|start| now.saturating_duration_since(start))
    }

    /// Currently held labels in label order.
    pub fn currently_pressed(&self) -> impl Iterator<Item = SemanticButton> + '_ {
        self.open.keys().copied()
    }

    pub fn any_held(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn last_pressed(&self) -> Option<SemanticButton> {
        self.last_pressed
    }
}
