//! Device selection configuration.
//!
//! A [`DeviceConfig`] is a snapshot of everything the selector and the
//! transport factories read from the process environment. It is taken once
//! during startup and then passed around by value, so no factory touches the
//! environment after initialisation.

use std::fmt;

use crate::PlatformFamily;

/// Forces a transport key, bypassing the platform default.
pub const ENV_TRANSPORT_OVERRIDE: &str = "TRANSPORT_OVERRIDE";
/// Private key path for the TLS transport.
pub const ENV_TLS_PKEY: &str = "TRANSPORT_TLS_PKEY";
/// Certificate path for the TLS transport.
pub const ENV_TLS_CERT: &str = "TRANSPORT_TLS_CERT";
/// CA bundle file for the TLS transport.
pub const ENV_TLS_CA_FILE: &str = "TRANSPORT_TLS_CA_FILE";
/// CA directory for the TLS transport.
pub const ENV_TLS_CA_PATH: &str = "TRANSPORT_TLS_CA_PATH";

/// TLS credential locations.
///
/// Unset values are empty strings, never absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TlsCredentials {
    /// Private key file.
    pub pkey: String,
    /// Certificate file.
    pub cert: String,
    /// CA bundle file.
    pub ca_file: String,
    /// Directory of CA certificates.
    pub ca_path: String,
}

impl TlsCredentials {
    /// Create a credential set from the four locations.
    pub fn new(
        pkey: impl Into<String>,
        cert: impl Into<String>,
        ca_file: impl Into<String>,
        ca_path: impl Into<String>,
    ) -> Self {
        Self {
            pkey: pkey.into(),
            cert: cert.into(),
            ca_file: ca_file.into(),
            ca_path: ca_path.into(),
        }
    }
}

impl fmt::Debug for TlsCredentials {
    // Private key location stays out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsCredentials")
            .field("pkey", &if self.pkey.is_empty() { "" } else { "<set>" })
            .field("cert", &self.cert)
            .field("ca_file", &self.ca_file)
            .field("ca_path", &self.ca_path)
            .finish()
    }
}

/// Selection configuration and TLS credential sourcing.
#[derive(Debug, Clone, Default)]
pub struct DeviceConfig {
    // ---
    /// Transport key forced by the environment, if any.
    ///
    /// When set, the platform default is ignored and this key is looked up
    /// in the registry directly.
    pub transport_override: Option<String>,

    /// Credentials handed to the TLS transport.
    pub tls: TlsCredentials,

    /// Platform family used to pick the default key.
    pub platform: PlatformFamily,
}

impl DeviceConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary key-value lookup.
    ///
    /// Missing variables become empty strings; an empty override counts as
    /// no override.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // ---
        let var = |name: &str| lookup(name).unwrap_or_default();

        let transport_override = Some(var(ENV_TRANSPORT_OVERRIDE)).filter(|v| !v.is_empty());

        Self {
            transport_override,
            tls: TlsCredentials {
                pkey: var(ENV_TLS_PKEY),
                cert: var(ENV_TLS_CERT),
                ca_file: var(ENV_TLS_CA_FILE),
                ca_path: var(ENV_TLS_CA_PATH),
            },
            platform: PlatformFamily::current(),
        }
    }

    /// Force a transport key. An empty key clears the override.
    pub fn with_transport_override(mut self, key: impl Into<String>) -> Self {
        self.transport_override = Some(key.into()).filter(|k| !k.is_empty());
        self
    }

    /// Replace the TLS credentials.
    pub fn with_tls(mut self, tls: TlsCredentials) -> Self {
        self.tls = tls;
        self
    }

    /// Pretend to run on a different platform family.
    pub fn with_platform(mut self, platform: PlatformFamily) -> Self {
        self.platform = platform;
        self
    }
}
