//! Input backends for `padtrace`.
//!
//! Backends turn platform input into [`EngineEvent`](crate::event::EngineEvent)s.
//!
//! # Feature flags
//! - *(always)* [`virtual_input`]: scripted gamepad implementing [`Device`](crate::device::Device).
//! - **`gilrs`**: real controllers through the `gilrs` crate (SDL mappings, evdev, XInput,
//!   Windows Gaming Input, ...).
//!
//! The engine tracks one controller at a time, so backends forward a single active device.

#[cfg(feature = "gilrs")]
#[cfg_attr(docsrs, doc(cfg(feature = "gilrs")))]
pub mod gilrs;
pub mod virtual_input;
