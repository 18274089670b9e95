//! Transport device selection
//!
//! This library picks a network transport (plain TCP, TLS-wrapped TCP, or an
//! event-loop transport) by platform default or environment override and
//! constructs a device bound to a local interface or a resolvable hostname.
//! Which transports exist is decided by cargo features; callers only ever see
//! a shared [`DevicePtr`].
//!
//! ```no_run
//! # fn example() -> transport_select::Result<()> {
//! let device = transport_select::make_device_for_interface("eth0")?;
//! println!("bound {}", device.describe());
//! # Ok(())
//! # }
//! ```
//!

// Import all sub modules once...
mod config;
mod device_id;
mod domain;
mod error;
mod macros;
mod platform;
mod registry;
mod selector;
mod selector_builder;
mod transport;

#[allow(unused_imports)]
pub(crate) use macros::{log_debug, log_error, log_info, log_warn};

// Re-export main types
pub use config::{
    //
    DeviceConfig,
    TlsCredentials,
    ENV_TLS_CA_FILE,
    ENV_TLS_CA_PATH,
    ENV_TLS_CERT,
    ENV_TLS_PKEY,
    ENV_TRANSPORT_OVERRIDE,
};
pub use device_id::DeviceId;
pub use error::{DeviceError, Result};
pub use platform::{PlatformFamily, APPLE_KEY, LINUX_KEY};
pub use registry::{DeviceCreator, DeviceRegistry, Priority};
pub use selector::{
    //
    global_selector,
    init_global_selector,
    make_device_for_hostname,
    make_device_for_interface,
    DeviceSelector,
};
pub use selector_builder::SelectorBuilder;

pub use transport::{register_builtin_transports, TCP_KEY, TCP_TLS_KEY, UV_KEY};

#[cfg(feature = "transport_tcp")]
pub use transport::{make_tcp_device, TcpDevice};

#[cfg(feature = "transport_tcp_tls")]
pub use transport::{make_tcp_tls_device, TlsDevice};

#[cfg(feature = "transport_uv")]
pub use transport::{make_uv_device, UvDevice};

// --- public re-exports
pub use domain::{
    //
    Device,
    DeviceAttr,
    DeviceBase,
    DevicePtr,
};
