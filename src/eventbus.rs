//! Change notifications for display listeners.
//!
//! The event loop publishes a [`Change`] (cause + fresh [`Snapshot`]) after every event that
//! altered engine state. Listeners are registered with a [`ChangeFilter`] and can be muted
//! without being removed.

use crate::snapshot::Snapshot;
use std::collections::HashMap;

/// Why a snapshot was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeCause {
    Connected,
    Disconnected,
    /// A press or release changed press state.
    Edge,
    Thumbstick,
    /// The live-duration ticker refreshed.
    Tick,
}

/// One published state change.
#[derive(Debug, Clone)]
pub struct Change {
    pub cause: ChangeCause,
    pub snapshot: Snapshot,
}

/// Trait for reacting to published engine state.
pub trait StateListener: Send {
    fn on_change(&mut self, change: &Change);
}

impl<F> StateListener for F
where
    F: FnMut(&Change) + Send,
{
    fn on_change(&mut self, change: &Change) {
        self(change)
    }
}

/// Determines which changes a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum ChangeFilter {
    All,
    /// Connect, disconnect and press/release changes; no ticks or stick motion.
    EdgesOnly,
    TicksOnly,
    Custom(fn(&Change) -> bool),
}

impl ChangeFilter {
    pub fn accepts(&self, change: &Change) -> bool {
        match self {
            ChangeFilter::All => true,
            ChangeFilter::EdgesOnly => matches!(
                change.cause,
                ChangeCause::Connected | ChangeCause::Disconnected | ChangeCause::Edge
            ),
            ChangeFilter::TicksOnly => change.cause == ChangeCause::Tick,
            ChangeFilter::Custom(f) => f(change),
        }
    }
}

struct ListenerEntry {
    listener: Box<dyn StateListener>,
    enabled: bool,
    filter: ChangeFilter,
}

#[derive(Default)]
pub struct ChangeBus {
    next_id: u64,
    listeners: HashMap<u64, ListenerEntry>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns its id.
    pub fn add_listener(
        &mut self,
        listener: impl StateListener + 'static,
        filter: ChangeFilter,
    ) -> u64 {
        let id = self.next_id;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
            },
        );
        self.next_id += 1;
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely.
    pub fn remove_listener(&mut self, id: u64) {
        self.listeners.remove(&id);
    }

    /// `true` if no enabled listener is registered.
    pub fn is_idle(&self) -> bool {
        !self.listeners.values().any(|e| e.enabled)
    }

    /// Delivers one change to all enabled, matching listeners.
    pub fn emit(&mut self, change: &Change) {
        for entry in self.listeners.values_mut() {
            if entry.enabled && entry.filter.accepts(change) {
                entry.listener.on_change(change);
            }
        }
    }
}
