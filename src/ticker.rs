//! Live hold-duration ticker.
//!
//! The ticker does not own a thread or a timer. It keeps the deadline of its next tick; the event
//! loop waits on the input channel until that deadline and then calls [`Ticker::fire`]. Starting a
//! new target reschedules the pending tick, so at most one tick is ever outstanding.
//!
//! # Modes
//! - [`TickerMode::AllHeld`]: every held label is re-measured on each tick and published in
//!   [`Ticker::live_durations`].
//! - [`TickerMode::LastPressed`]: only the most recently pressed label is ticked. Pressing a second
//!   button retargets the ticker, and the first button's live duration stops updating.
//!
//! In both modes [`Ticker::live_duration`] reports the most recently pressed label only, and it
//! goes back to `None` once that label is released.

use crate::button::SemanticButton;
use crate::tracker::PressTracker;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

/// Default tick period.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

const NANOS_PER_SEC: u128 = 1_000_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickerMode {
    #[default]
    AllHeld,
    LastPressed,
}

#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    mode: TickerMode,
    targets: BTreeSet<SemanticButton>,
    primary: Option<SemanticButton>,
    next_due: Option<Instant>,
    live: BTreeMap<SemanticButton, Duration>,
}

impl Ticker {
    pub fn new(period: Duration, mode: TickerMode) -> Self {
        Self {
            // A zero period would never let the deadline move past `now`.
            period: period.max(Duration::from_millis(1)),
            mode,
            targets: BTreeSet::new(),
            primary: None,
            next_due: None,
            live: BTreeMap::new(),
        }
    }

    /// Start ticking `label`, cancelling the pending tick and scheduling the next at `now + period`.
    pub fn start(&mut self, label: SemanticButton, now: Instant) {
        if self.mode == TickerMode::LastPressed {
            self.targets.clear();
            self.live.clear();
        }
        self.targets.insert(label);
        self.primary = Some(label);
        self.next_due = Some(now + self.period);
    }

    /// Stop ticking `label`. Stops the ticker entirely once no target is left.
    pub fn release(&mut self, label: SemanticButton) {
        self.targets.remove(&label);
        self.live.remove(&label);
        if self.primary == Some(label) {
            self.primary = None;
        }
        if self.targets.is_empty() {
            self.stop();
        }
    }

    /// Cancel the pending tick and clear everything published.
    pub fn stop(&mut self) {
        self.targets.clear();
        self.live.clear();
        self.primary = None;
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next tick is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Run the tick if it is due at `now`. Returns `true` if the published durations were refreshed.
    pub fn fire(&mut self, now: Instant, tracker: &PressTracker) -> bool {
        let due = match self.next_due {
            Some(due) if now >= due => due,
            _ => return false,
        };

        for &label in &self.targets {
            match tracker.held_for(label, now) {
                Some(held) => {
                    self.live.insert(label, held);
                }
                None => {
                    self.live.remove(&label);
                }
            }
        }
        trace!("tick: {} live duration(s)", self.live.len());

        // Skip ticks missed while the loop was busy instead of firing them back to back.
        let behind = now.saturating_duration_since(due);
        let period = self.period.as_nanos();
        let advance = period * (behind.as_nanos() / period + 1);
        let advance = Duration::new(
            u64::try_from(advance / NANOS_PER_SEC).unwrap_or(u64::MAX),
            (advance % NANOS_PER_SEC) as u32,
        );
        self.next_due = due
            .checked_add(advance)
            .or_else(|| now.checked_add(self.period));
        true
    }

    /// Live duration of the most recently pressed label.
    pub fn live_duration(&self) -> Option<Duration> {
        self.primary.and_then(|l| self.live.get(&l).copied())
    }

    pub fn live_durations(&self) -> &BTreeMap<SemanticButton, Duration> {
        &self.live
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL, TickerMode::default())
    }
}
