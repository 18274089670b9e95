//! Device selection.
//!
//! A [`DeviceSelector`] turns an interface name or hostname into a device by
//! picking a registry key:
//!
//! 1. the transport override, when one is configured;
//! 2. otherwise the default key of the platform family;
//! 3. otherwise fail with [`DeviceError::UnsupportedPlatform`].
//!
//! The registry's result (device or error) is returned verbatim.
//!
//! The free functions [`make_device_for_interface`] and
//! [`make_device_for_hostname`] use a process-wide selector built on first use
//! from [`DeviceConfig::from_env`], so the environment is read exactly once.

use std::sync::{Arc, OnceLock};

use crate::{
    log_debug, log_info, DeviceConfig, DeviceError, DevicePtr, DeviceRegistry, PlatformFamily,
    Result, SelectorBuilder,
};

/// Resolves a transport key and constructs devices through a registry.
#[derive(Debug, Clone)]
pub struct DeviceSelector {
    // ---
    registry: Arc<DeviceRegistry>,
    transport_override: Option<String>,
    platform: PlatformFamily,
}

impl DeviceSelector {
    /// Create a selector over `registry` using the override and platform
    /// from `config`.
    pub fn new(registry: Arc<DeviceRegistry>, config: &DeviceConfig) -> Self {
        // ---
        Self {
            registry,
            transport_override: config.transport_override.clone(),
            platform: config.platform,
        }
    }

    /// Construct a device bound to a local interface.
    pub fn make_device_for_interface(&self, interface: &str) -> Result<DevicePtr> {
        self.make_device("make_device_for_interface", interface, "")
    }

    /// Construct a device bound to the address `hostname` resolves to.
    pub fn make_device_for_hostname(&self, hostname: &str) -> Result<DevicePtr> {
        self.make_device("make_device_for_hostname", "", hostname)
    }

    /// The key the next device will be created under.
    ///
    /// # Errors
    ///
    /// [`DeviceError::UnsupportedPlatform`] if there is no override and the
    /// platform has no default key.
    pub fn resolve_key(&self) -> Result<&str> {
        self.resolve_key_for("resolve_key")
    }

    /// The registry devices are created from.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// The configured transport override, if any.
    pub fn transport_override(&self) -> Option<&str> {
        self.transport_override.as_deref()
    }

    /// The platform family used for the default key.
    pub fn platform(&self) -> PlatformFamily {
        self.platform
    }

    fn resolve_key_for(&self, op: &'static str) -> Result<&str> {
        // ---
        if let Some(key) = self.transport_override.as_deref() {
            return Ok(key);
        }
        self.platform
            .default_key()
            .ok_or(DeviceError::UnsupportedPlatform(op))
    }

    fn make_device(&self, op: &'static str, interface: &str, hostname: &str) -> Result<DevicePtr> {
        // ---
        let key = self.resolve_key_for(op)?;

        log_debug!("{op}: using transport key {key} (platform {})", self.platform);

        let device = self.registry.create(key, interface, hostname)?;

        log_info!("{op}: created {} ({})", device.describe(), device.id());

        Ok(device)
    }
}

static GLOBAL_SELECTOR: OnceLock<DeviceSelector> = OnceLock::new();

/// Install the process-wide selector.
///
/// Must run before the first call to [`global_selector`] or the free
/// `make_device_for_*` functions; afterwards the selector is fixed and the
/// rejected selector is handed back.
pub fn init_global_selector(selector: DeviceSelector) -> std::result::Result<(), DeviceSelector> {
    GLOBAL_SELECTOR.set(selector)
}

/// The process-wide selector.
///
/// Built on first use from the environment with all compiled-in transports
/// registered, unless [`init_global_selector`] ran earlier.
pub fn global_selector() -> &'static DeviceSelector {
    GLOBAL_SELECTOR.get_or_init(|| SelectorBuilder::from_env().build())
}

/// Construct a device bound to a local interface using the process-wide
/// selector.
pub fn make_device_for_interface(interface: &str) -> Result<DevicePtr> {
    global_selector().make_device_for_interface(interface)
}

/// Construct a device bound to `hostname` using the process-wide selector.
pub fn make_device_for_hostname(hostname: &str) -> Result<DevicePtr> {
    global_selector().make_device_for_hostname(hostname)
}
