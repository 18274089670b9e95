// src/domain/device.rs

//! Device domain abstractions.
//!
//! A device is a constructed, ready-to-use transport endpoint bound to a
//! local address. The registry and selector treat devices as opaque shared
//! handles ([`DevicePtr`]); concrete implementations live under
//! `src/transport/` and are reachable only through their factory functions.

use std::any::Any;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use crate::{DeviceError, DeviceId, Result};

/// Where a device should be bound.
///
/// Every factory accepts an `(interface, hostname)` pair; at least one must be
/// non-empty and the interface wins when both are given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeviceAttr {
    /// Bind to the address of a local network interface (e.g. `"eth0"`).
    Interface(String),

    /// Bind to the address a hostname resolves to.
    Hostname(String),
}

impl DeviceAttr {
    /// Build the attribute record for a factory call.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidArgument`] if both `interface` and
    /// `hostname` are empty. `factory` names the caller in the message.
    pub fn from_locators(factory: &str, interface: &str, hostname: &str) -> Result<Self> {
        // ---
        if !interface.is_empty() {
            return Ok(DeviceAttr::Interface(interface.to_owned()));
        }
        if !hostname.is_empty() {
            return Ok(DeviceAttr::Hostname(hostname.to_owned()));
        }
        Err(DeviceError::InvalidArgument(format!(
            "{factory}: interface or hostname required"
        )))
    }

    /// The interface name or hostname this record carries.
    pub fn locator(&self) -> &str {
        match self {
            DeviceAttr::Interface(name) | DeviceAttr::Hostname(name) => name,
        }
    }
}

impl fmt::Display for DeviceAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceAttr::Interface(iface) => write!(f, "iface={iface}"),
            DeviceAttr::Hostname(host) => write!(f, "hostname={host}"),
        }
    }
}

/// State shared by every device implementation.
///
/// Each concrete device embeds this as a field named `base` and returns it
/// from [`Device::base`], so the default trait methods need no repetition.
#[derive(Debug)]
pub struct DeviceBase {
    /// Unique identifier of this device instance.
    pub id: DeviceId,
    /// Transport family name (`"TCP"`, `"TCP_TLS"`, `"UV"`).
    pub transport: &'static str,
    /// Attributes the device was constructed from.
    pub attr: DeviceAttr,
    /// Local address the device is bound to.
    pub address: IpAddr,
}

impl DeviceBase {
    /// Create a new base with a freshly generated [`DeviceId`].
    pub fn new(transport: &'static str, attr: DeviceAttr, address: IpAddr) -> Self {
        // ---
        Self {
            id: DeviceId::generate(),
            transport,
            attr,
            address,
        }
    }
}

/// Transport device abstraction.
///
/// The selection core never looks inside a device; these accessors exist for
/// callers and for diagnostics. Use [`Device::as_any`] to downcast to a
/// concrete device type when transport-specific state is needed.
pub trait Device: Send + Sync + fmt::Debug {
    // ---
    /// Returns a reference to the shared base state.
    fn base(&self) -> &DeviceBase;

    /// Upcast for downcasting to the concrete device type.
    fn as_any(&self) -> &dyn Any;

    /// Unique identifier of this device instance.
    fn id(&self) -> &DeviceId {
        &self.base().id
    }

    /// Transport family name.
    fn transport(&self) -> &'static str {
        self.base().transport
    }

    /// Local address the device is bound to.
    fn address(&self) -> IpAddr {
        self.base().address
    }

    /// Attributes the device was constructed from.
    fn attr(&self) -> &DeviceAttr {
        &self.base().attr
    }

    /// Human readable summary, e.g. `TCP[iface=eth0 10.0.0.4]`.
    fn describe(&self) -> String {
        let base = self.base();
        format!("{}[{} {}]", base.transport, base.attr, base.address)
    }
}

/// Shared device pointer.
///
/// This is an `Arc<dyn Device>`: clones share one device, and the device is
/// released when the last holder drops it.
pub type DevicePtr = Arc<dyn Device>;
