//! The controller input tracking engine.
//!
//! [`Engine`] owns the device session, the press tracker, the history ring and the live-duration
//! ticker, and applies [`EngineEvent`]s to them strictly in arrival order. It is the only writer
//! of that state; readers get [`Snapshot`]s.
//!
//! Every mutating call reports what kind of change happened (if any) as a [`ChangeCause`], which
//! the event loop uses to decide whether to publish.

use crate::button::SemanticButton;
use crate::config::Config;
use crate::event::{EngineEvent, InputEvent, InputKind, PadReading};
use crate::eventbus::ChangeCause;
use crate::history::{HistoryRecord, HistoryRing};
use crate::profile::{GamepadProfile, Stick};
use crate::session::DeviceSession;
use crate::snapshot::{Snapshot, StickPosition, Thumbsticks};
use crate::ticker::Ticker;
use crate::tracker::{EdgeOutcome, PressTracker};
use crate::visual::Visuals;
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

pub struct Engine {
    session: DeviceSession,
    tracker: PressTracker,
    history: HistoryRing,
    ticker: Ticker,
    thumbsticks: Thumbsticks,
}

impl Engine {
    pub fn new(config: &Config) -> Self {
        Self {
            session: DeviceSession::new(),
            tracker: PressTracker::new(),
            history: HistoryRing::new(),
            ticker: Ticker::new(config.ticker_interval(), config.ticker.mode),
            thumbsticks: Thumbsticks::default(),
        }
    }

    /// Apply one event. `Shutdown` is a no-op here; the event loop handles it.
    pub fn handle(&mut self, event: EngineEvent) -> Option<ChangeCause> {
        match event {
            EngineEvent::Connected { name, profile } => {
                self.connect(name, profile);
                Some(ChangeCause::Connected)
            }
            EngineEvent::Disconnected => self.disconnect().then_some(ChangeCause::Disconnected),
            EngineEvent::Input(input) => self.input(input),
            EngineEvent::Shutdown => None,
        }
    }

    /// Bind to a controller. A controller that is already bound is replaced first.
    pub fn connect(&mut self, name: impl Into<String>, profile: GamepadProfile) {
        if self.session.is_bound() {
            self.disconnect();
        }
        self.session.bind(name, profile);
    }

    /// Unbind the current controller. Open holds are discarded without history records.
    ///
    /// Returns `false` if nothing was bound.
    pub fn disconnect(&mut self) -> bool {
        if self.session.unbind().is_none() {
            return false;
        }
        let dropped = self.tracker.discard_all();
        if dropped > 0 {
            info!("discarded {dropped} open hold(s) on disconnect");
        }
        self.ticker.stop();
        self.thumbsticks = Thumbsticks::default();
        true
    }

    /// Apply one raw input change from the bound controller.
    pub fn input(&mut self, event: InputEvent) -> Option<ChangeCause> {
        let Some(resolver) = self.session.resolver() else {
            debug!("dropping input while no controller is bound: {:?}", event.kind);
            return None;
        };
        // Handles from an earlier profile snapshot belong to a device that is gone.
        let profile = event.kind.element().profile;
        if profile != resolver.profile_id() {
            debug!(
                "dropping input from stale {profile} (bound: {})",
                resolver.profile_id()
            );
            return None;
        }

        match event.kind {
            InputKind::Button {
                element, pressed, ..
            } => {
                let label = resolver.resolve_button(element);
                let outcome = self.tracker.on_edge(label, pressed, event.at);
                self.apply(label, outcome, event.at)
                    .then_some(ChangeCause::Edge)
            }
            InputKind::Pad { element, reading } => {
                if !resolver.resolve_pad(element) {
                    debug!("ignoring pad that is not the bound D-pad: {element:?}");
                    return None;
                }
                self.pad(&reading, event.at).then_some(ChangeCause::Edge)
            }
            InputKind::Thumbstick { element, x, y } => {
                let stick = resolver.resolve_stick(element)?;
                self.move_stick(stick, x, y);
                Some(ChangeCause::Thumbstick)
            }
        }
    }

    fn pad(&mut self, reading: &PadReading, at: Instant) -> bool {
        let outcomes = self.tracker.on_pad(reading, at);
        let mut changed = false;
        for (label, outcome) in outcomes {
            changed |= self.apply(label, outcome, at);
        }
        changed
    }

    fn move_stick(&mut self, stick: Stick, x: f32, y: f32) {
        let pos = StickPosition { x, y: -y };
        match stick {
            Stick::Left => self.thumbsticks.left = pos,
            Stick::Right => self.thumbsticks.right = pos,
        }
    }

    fn apply(&mut self, label: SemanticButton, outcome: EdgeOutcome, at: Instant) -> bool {
        match outcome {
            EdgeOutcome::Opened => {
                self.ticker.start(label, at);
                true
            }
            EdgeOutcome::Closed { record } => {
                if let Some(evicted) = self.history.record(record) {
                    debug!("history full, evicted {}", evicted.button);
                }
                self.ticker.release(label);
                true
            }
            EdgeOutcome::Ignored => false,
        }
    }

    /// Fire the live-duration ticker if it is due.
    pub fn tick(&mut self, now: Instant) -> Option<ChangeCause> {
        self.ticker
            .fire(now, &self.tracker)
            .then_some(ChangeCause::Tick)
    }

    /// When [`Engine::tick`] next needs to run.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(Instant::now())
    }

    pub fn snapshot_at(&self, taken_at: Instant) -> Snapshot {
        Snapshot {
            taken_at,
            connected_device: self.session.device_name().map(str::to_string),
            last_pressed: self.tracker.last_pressed(),
            currently_pressed: self.currently_pressed(),
            live_duration: self.ticker.live_duration(),
            live_durations: self.ticker.live_durations().clone(),
            history: self.history.to_vec(),
            supported_buttons: self.session.supported_buttons(),
            visuals: Visuals::derive(&self.tracker),
            thumbsticks: self.thumbsticks,
        }
    }

    pub fn connected_device(&self) -> Option<&str> {
        self.session.device_name()
    }

    pub fn session(&self) -> &DeviceSession {
        &self.session
    }

    pub fn tracker(&self) -> &PressTracker {
        &self.tracker
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn last_pressed(&self) -> Option<SemanticButton> {
        self.tracker.last_pressed()
    }

    pub fn currently_pressed(&self) -> BTreeSet<SemanticButton> {
        self.tracker.currently_pressed().collect()
    }

    pub fn live_duration(&self) -> Option<Duration> {
        self.ticker.live_duration()
    }

    pub fn live_durations(&self) -> &BTreeMap<SemanticButton, Duration> {
        self.ticker.live_durations()
    }

    pub fn supported_buttons(&self) -> BTreeSet<SemanticButton> {
        self.session.supported_buttons()
    }

    pub fn thumbsticks(&self) -> Thumbsticks {
        self.thumbsticks
    }

    /// Completed presses, oldest first.
    pub fn history_records(&self) -> Vec<HistoryRecord> {
        self.history.to_vec()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
