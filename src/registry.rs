//! Device factory registry.
//!
//! Maps a transport key (`"LINUX"`, `"TCP"`, `"TCP_TLS"`, ...) to one or more
//! device constructors ordered by priority. The registry is filled during an
//! explicit startup sequence through `&mut self`, then shared immutably, so
//! lookups from any number of threads need no locking.
//!
//! # Priority
//!
//! Several constructors may register under the same key. The one with the
//! numerically highest [`Priority`] is used; among equal priorities the
//! **most recently registered** constructor wins. Built-in transports register
//! at [`Priority::DEFAULT`], so an application can replace the default for a
//! platform key by registering at [`Priority::PREFERRED`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{log_debug, DeviceError, DevicePtr, Result};

/// Registration priority of a device constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub i32);

impl Priority {
    /// Used only when nothing better is registered.
    pub const FALLBACK: Priority = Priority(1);
    /// Priority of the built-in transports.
    pub const DEFAULT: Priority = Priority(2);
    /// Overrides the built-in transports.
    pub const PREFERRED: Priority = Priority(3);
}

impl Default for Priority {
    fn default() -> Self {
        Priority::DEFAULT
    }
}

/// Device constructor: `(interface, hostname) -> device`.
pub type DeviceCreator = Arc<dyn Fn(&str, &str) -> Result<DevicePtr> + Send + Sync>;

#[derive(Clone)]
struct FactoryEntry {
    priority: Priority,
    creator: DeviceCreator,
}

/// Registry of device constructors keyed by transport key.
#[derive(Clone, Default)]
pub struct DeviceRegistry {
    // Each vector keeps the winning entry first.
    entries: HashMap<String, Vec<FactoryEntry>>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `key`.
    ///
    /// The new entry is placed ahead of every existing entry whose priority is
    /// lower than or equal to its own, so equal priorities resolve to the last
    /// registration.
    pub fn register<F>(&mut self, key: impl Into<String>, priority: Priority, creator: F)
    where
        F: Fn(&str, &str) -> Result<DevicePtr> + Send + Sync + 'static,
    {
        // ---
        let key = key.into();
        let slot = self.entries.entry(key.clone()).or_default();

        if !slot.is_empty() {
            log_debug!(
                "registry: key {key} already has {} constructor(s), adding priority {}",
                slot.len(),
                priority.0
            );
        }

        let pos = slot
            .iter()
            .position(|e| e.priority <= priority)
            .unwrap_or(slot.len());

        slot.insert(
            pos,
            FactoryEntry {
                priority,
                creator: Arc::new(creator),
            },
        );
    }

    /// Construct a device with the winning constructor for `key`.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::UnknownTransport`] if nothing is registered under `key`
    /// - whatever the constructor returns, unchanged
    pub fn create(&self, key: &str, interface: &str, hostname: &str) -> Result<DevicePtr> {
        // ---
        let entry = self
            .entries
            .get(key)
            .and_then(|slot| slot.first())
            .ok_or_else(|| DeviceError::UnknownTransport(key.to_owned()))?;

        (entry.creator)(interface, hostname)
    }

    /// Returns `true` if at least one constructor is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|slot| !slot.is_empty())
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::{Device, DeviceAttr, DeviceBase};
    use std::any::Any;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    #[derive(Debug)]
    struct TaggedDevice {
        base: DeviceBase,
        tag: &'static str,
    }

    impl Device for TaggedDevice {
        fn base(&self) -> &DeviceBase {
            &self.base
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn tagged(tag: &'static str) -> impl Fn(&str, &str) -> Result<DevicePtr> + Send + Sync {
        move |iface: &str, host: &str| {
            let attr = DeviceAttr::from_locators(tag, iface, host)?;
            let base = DeviceBase::new("MOCK", attr, IpAddr::V4(Ipv4Addr::LOCALHOST));
            Ok(Arc::new(TaggedDevice { base, tag }) as DevicePtr)
        }
    }

    fn tag_of(device: &DevicePtr) -> &'static str {
        device
            .as_any()
            .downcast_ref::<TaggedDevice>()
            .expect("not a TaggedDevice")
            .tag
    }

    #[test]
    fn test_unknown_key() {
        // ---
        let registry = DeviceRegistry::new();
        let err = registry.create("IB", "eth0", "").unwrap_err();
        assert!(matches!(err, DeviceError::UnknownTransport(ref k) if k == "IB"));
    }

    #[test]
    fn test_higher_priority_wins() {
        // ---
        let mut registry = DeviceRegistry::new();
        registry.register("LINUX", Priority::DEFAULT, tagged("default"));
        registry.register("LINUX", Priority::PREFERRED, tagged("preferred"));

        let device = registry.create("LINUX", "eth0", "").unwrap();
        assert_eq!(tag_of(&device), "preferred");

        // A later, lower-priority registration never changes the winner.
        registry.register("LINUX", Priority::FALLBACK, tagged("fallback"));
        let device = registry.create("LINUX", "eth0", "").unwrap();
        assert_eq!(tag_of(&device), "preferred");
    }

    #[test]
    fn test_higher_priority_wins_regardless_of_order() {
        // ---
        let mut registry = DeviceRegistry::new();
        registry.register("TCP", Priority::PREFERRED, tagged("preferred"));
        registry.register("TCP", Priority::DEFAULT, tagged("default"));

        let device = registry.create("TCP", "", "node-1").unwrap();
        assert_eq!(tag_of(&device), "preferred");
    }

    #[test]
    fn test_equal_priority_last_registration_wins() {
        // ---
        let mut registry = DeviceRegistry::new();
        registry.register("TCP", Priority::DEFAULT, tagged("first"));
        registry.register("TCP", Priority::DEFAULT, tagged("second"));

        let device = registry.create("TCP", "eth0", "").unwrap();
        assert_eq!(tag_of(&device), "second");
    }

    #[test]
    fn test_constructor_error_propagates() {
        // ---
        let mut registry = DeviceRegistry::new();
        registry.register("TCP", Priority::DEFAULT, tagged("tcp"));

        let err = registry.create("TCP", "", "").unwrap_err();
        assert!(matches!(err, DeviceError::InvalidArgument(_)));
    }

    #[test]
    fn test_keys_and_contains() {
        // ---
        let mut registry = DeviceRegistry::new();
        assert!(registry.is_empty());

        registry.register("TCP", Priority::DEFAULT, tagged("tcp"));
        registry.register("LINUX", Priority::DEFAULT, tagged("tcp"));

        assert_eq!(registry.keys(), vec!["LINUX", "TCP"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("TCP"));
        assert!(!registry.contains("UV"));
    }
}
