//! Transport implementations.
//!
//! Each transport lives behind its own feature flag and is exposed through a
//! constructor function with the `(interface, hostname)` factory signature.
//! [`register_builtin_transports`] wires the compiled-in transports into a
//! [`DeviceRegistry`] under their platform and family keys:
//!
//! | feature             | keys            |
//! |---------------------|-----------------|
//! | `transport_tcp`     | `LINUX`, `TCP`  |
//! | `transport_tcp_tls` | `TCP_TLS`       |
//! | `transport_uv`      | `APPLE`, `UV`   |
//!
//! Selection code must not depend on transport-specific types.

#[cfg(all(target_os = "linux", not(feature = "transport_tcp")))]
compile_error!("the tcp transport is required on Linux: enable feature `transport_tcp`");

#[cfg(all(target_os = "macos", not(feature = "transport_uv")))]
compile_error!("the uv transport is required on macOS: enable feature `transport_uv`");

#[cfg(any(
    feature = "transport_tcp",
    feature = "transport_tcp_tls",
    feature = "transport_uv"
))]
mod bind;

#[cfg(feature = "transport_tcp")]
mod tcp;

#[cfg(feature = "transport_tcp_tls")]
mod tls;

#[cfg(feature = "transport_uv")]
mod uv;

#[cfg(feature = "transport_tcp")]
pub use tcp::{make_tcp_device, TcpDevice};

#[cfg(feature = "transport_tcp_tls")]
pub use tls::{make_tcp_tls_device, TlsDevice};

#[cfg(feature = "transport_uv")]
pub use uv::{make_uv_device, UvDevice};

#[allow(unused_imports)]
use crate::{log_debug, DeviceConfig, DeviceRegistry, Priority};

/// Family key of the plain TCP transport.
pub const TCP_KEY: &str = "TCP";

/// Family key of the TLS transport.
pub const TCP_TLS_KEY: &str = "TCP_TLS";

/// Family key of the event-loop transport.
pub const UV_KEY: &str = "UV";

/// Register every compiled-in transport at [`Priority::DEFAULT`].
///
/// The TLS transport captures `config.tls` here; the environment is not read
/// again when devices are created.
#[allow(unused_variables)]
pub fn register_builtin_transports(registry: &mut DeviceRegistry, config: &DeviceConfig) {
    // ---
    #[cfg(feature = "transport_tcp")]
    {
        registry.register(crate::platform::LINUX_KEY, Priority::DEFAULT, make_tcp_device);
        registry.register(TCP_KEY, Priority::DEFAULT, make_tcp_device);
    }

    #[cfg(feature = "transport_tcp_tls")]
    {
        let credentials = config.tls.clone();
        registry.register(TCP_TLS_KEY, Priority::DEFAULT, move |interface, hostname| {
            make_tcp_tls_device(interface, hostname, &credentials)
        });
    }

    #[cfg(feature = "transport_uv")]
    {
        registry.register(crate::platform::APPLE_KEY, Priority::DEFAULT, make_uv_device);
        registry.register(UV_KEY, Priority::DEFAULT, make_uv_device);
    }

    log_debug!("registered builtin transports: {:?}", registry.keys());
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_builtin_keys() {
        // ---
        let mut registry = DeviceRegistry::new();
        register_builtin_transports(&mut registry, &DeviceConfig::default());

        assert_eq!(registry.contains("LINUX"), cfg!(feature = "transport_tcp"));
        assert_eq!(registry.contains("TCP"), cfg!(feature = "transport_tcp"));
        assert_eq!(registry.contains("TCP_TLS"), cfg!(feature = "transport_tcp_tls"));
        assert_eq!(registry.contains("APPLE"), cfg!(feature = "transport_uv"));
        assert_eq!(registry.contains("UV"), cfg!(feature = "transport_uv"));
    }

    #[cfg(feature = "transport_tcp_tls")]
    #[test]
    fn test_tls_uses_config_snapshot() {
        // ---
        let config = DeviceConfig::default()
            .with_tls(crate::TlsCredentials::new("/does/not/exist", "", "", ""));
        let mut registry = DeviceRegistry::new();
        register_builtin_transports(&mut registry, &config);

        let err = registry.create("TCP_TLS", "", "127.0.0.1").unwrap_err();
        assert!(err.to_string().contains("/does/not/exist"));
    }
}
