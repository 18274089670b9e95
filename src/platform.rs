//! Platform family detection.
//!
//! The selector picks a default transport key from the operating system
//! family the binary was built for. The family is an ordinary value so tests
//! and embedders can substitute it.

use std::fmt;

/// Transport key registered by the default Linux transport.
pub const LINUX_KEY: &str = "LINUX";

/// Transport key registered by the default macOS transport.
pub const APPLE_KEY: &str = "APPLE";

/// Operating system family of the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFamily {
    /// Linux; defaults to the plain TCP transport.
    Linux,

    /// macOS; defaults to the event-loop transport.
    MacOs,

    /// Anything else; no default, an override is required.
    Other,
}

impl PlatformFamily {
    /// The family this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "linux") {
            PlatformFamily::Linux
        } else if cfg!(target_os = "macos") {
            PlatformFamily::MacOs
        } else {
            PlatformFamily::Other
        }
    }

    /// The registry key holding this platform's default transport, if any.
    pub const fn default_key(self) -> Option<&'static str> {
        match self {
            PlatformFamily::Linux => Some(LINUX_KEY),
            PlatformFamily::MacOs => Some(APPLE_KEY),
            PlatformFamily::Other => None,
        }
    }
}

impl Default for PlatformFamily {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformFamily::Linux => "linux",
            PlatformFamily::MacOs => "macos",
            PlatformFamily::Other => "other",
        };
        f.write_str(name)
    }
}
