//! Device session lifecycle.
//!
//! A [`DeviceSession`] is either unbound or bound to exactly one controller. Binding captures the
//! device's [`GamepadProfile`], builds the [`Resolver`] for it and computes the supported button
//! set once. Press state and history are not touched here; the [`Engine`](crate::engine::Engine)
//! clears press state around bind/unbind and leaves history alone.

use crate::button::SemanticButton;
use crate::profile::GamepadProfile;
use crate::resolver::Resolver;
use log::info;
use std::collections::BTreeSet;

/// The controller a session is bound to.
#[derive(Clone, Debug)]
pub struct BoundDevice {
    name: String,
    profile: GamepadProfile,
    resolver: Resolver,
    supported: BTreeSet<SemanticButton>,
}

impl BoundDevice {
    fn new(name: String, profile: GamepadProfile) -> Self {
        let resolver = Resolver::new(&profile);
        let supported = profile.supported_buttons();
        Self {
            name,
            profile,
            resolver,
            supported,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn supported_buttons(&self) -> &BTreeSet<SemanticButton> {
        &self.supported
    }
}

#[derive(Clone, Debug, Default)]
pub struct DeviceSession {
    bound: Option<BoundDevice>,
}

impl DeviceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `name`/`profile`, replacing any previously bound device.
    ///
    /// Returns the device that was replaced.
    pub fn bind(&mut self, name: impl Into<String>, profile: GamepadProfile) -> Option<BoundDevice> {
        let device = BoundDevice::new(name.into(), profile);
        info!(
            "bound controller \"{}\" ({}, {} supported buttons)",
            device.name,
            device.profile.id(),
            device.supported.len()
        );
        self.bound.replace(device)
    }

    /// Return to the unbound state. Returns the device that was bound.
    pub fn unbind(&mut self) -> Option<BoundDevice> {
        let prev = self.bound.take();
        if let Some(dev) = &prev {
            info!("unbound controller \"{}\"", dev.name);
        }
        prev
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    pub fn device_name(&self) -> Option<&str> {
        self.bound.as_ref().map(BoundDevice::name)
    }

    pub fn resolver(&self) -> Option<&Resolver> {
        self.bound.as_ref().map(BoundDevice::resolver)
    }

    /// Supported buttons of the bound device; empty when unbound.
    pub fn supported_buttons(&self) -> BTreeSet<SemanticButton> {
        self.bound
            .as_ref()
            .map(|d| d.supported_buttons().clone())
            .unwrap_or_default()
    }
}
