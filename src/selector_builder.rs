//! Selector builder.
//!
//! This is the explicit startup sequence: it takes the environment snapshot,
//! registers the compiled-in transports plus any application transports in a
//! fixed order, freezes the registry and hands back a [`DeviceSelector`].

use std::sync::Arc;

use crate::{
    register_builtin_transports, DeviceConfig, DevicePtr, DeviceRegistry, DeviceSelector,
    PlatformFamily, Priority, Result,
};

type PendingFactory = Box<dyn FnOnce(&mut DeviceRegistry)>;

/// Builder for [`DeviceSelector`].
///
/// # Examples
///
/// ## From the environment
/// ```no_run
/// use transport_select::SelectorBuilder;
///
/// # fn example() -> transport_select::Result<()> {
/// let selector = SelectorBuilder::from_env().build();
/// let device = selector.make_device_for_interface("eth0")?;
/// println!("{}", device.describe());
/// # Ok(())
/// # }
/// ```
///
/// ## Forcing a transport
/// ```no_run
/// use transport_select::SelectorBuilder;
///
/// # fn example() -> transport_select::Result<()> {
/// let selector = SelectorBuilder::new()
///     .transport_override("TCP")
///     .build();
/// let device = selector.make_device_for_hostname("node-1.cluster")?;
/// # Ok(())
/// # }
/// ```
///
/// ## Replacing the platform default
/// ```no_run
/// use transport_select::{make_tcp_device, Priority, SelectorBuilder};
///
/// let selector = SelectorBuilder::new()
///     .register("LINUX", Priority::PREFERRED, |iface: &str, host: &str| {
///         make_tcp_device(iface, host)
///     })
///     .build();
/// ```
pub struct SelectorBuilder {
    config: DeviceConfig,
    transport_override: Option<String>,
    platform: Option<PlatformFamily>,
    builtin_transports: bool,
    factories: Vec<PendingFactory>,
}

impl SelectorBuilder {
    /// Create a builder with an empty configuration (no override, no TLS
    /// credentials, current platform).
    pub fn new() -> Self {
        Self::with_config(DeviceConfig::default())
    }

    /// Create a builder from the process environment.
    ///
    /// The environment is read here, once; see [`DeviceConfig::from_env`].
    pub fn from_env() -> Self {
        Self::with_config(DeviceConfig::from_env())
    }

    /// Create a builder from an existing configuration.
    pub fn with_config(config: DeviceConfig) -> Self {
        // ---
        Self {
            config,
            transport_override: None,
            platform: None,
            builtin_transports: true,
            factories: Vec::new(),
        }
    }

    /// Force a transport key, taking precedence over the configuration.
    ///
    /// An empty key is ignored, as an empty `TRANSPORT_OVERRIDE` is.
    pub fn transport_override(mut self, key: impl Into<String>) -> Self {
        self.transport_override = Some(key.into()).filter(|k| !k.is_empty());
        self
    }

    /// Use a different platform family for the default key.
    pub fn platform(mut self, platform: PlatformFamily) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Do not register the compiled-in transports.
    ///
    /// Only factories added through [`register`](Self::register) will exist.
    pub fn without_builtin_transports(mut self) -> Self {
        self.builtin_transports = false;
        self
    }

    /// Register an application transport.
    ///
    /// Application factories are registered after the built-in ones, in the
    /// order given, so at equal priority they take over a built-in key.
    pub fn register<F>(mut self, key: impl Into<String>, priority: Priority, creator: F) -> Self
    where
        F: Fn(&str, &str) -> Result<DevicePtr> + Send + Sync + 'static,
    {
        // ---
        let key = key.into();
        self.factories
            .push(Box::new(move |registry: &mut DeviceRegistry| {
                registry.register(key, priority, creator)
            }));
        self
    }

    /// Build the selector (consumes self).
    pub fn build(self) -> DeviceSelector {
        // ---
        let mut config = self.config;
        if let Some(key) = self.transport_override {
            config.transport_override = Some(key);
        }
        if let Some(platform) = self.platform {
            config.platform = platform;
        }

        let mut registry = DeviceRegistry::new();
        if self.builtin_transports {
            register_builtin_transports(&mut registry, &config);
        }
        for factory in self.factories {
            factory(&mut registry);
        }

        DeviceSelector::new(Arc::new(registry), &config)
    }
}

impl Default for SelectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
