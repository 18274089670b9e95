use thiserror::Error;

/// Errors that can occur while selecting or constructing a transport device
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Factory precondition violated (e.g. both interface and hostname empty)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No factory is registered under the requested key
    #[error("unknown transport: {0}")]
    UnknownTransport(String),

    /// No override is set and the running platform has no default key
    #[error("{0}: unsupported platform, set TRANSPORT_OVERRIDE to choose a transport")]
    UnsupportedPlatform(&'static str),

    /// The underlying transport constructor failed
    #[error("{transport} device construction failed: {reason}")]
    ConstructionFailed {
        /// Family name of the transport that failed (`TCP`, `TCP_TLS`, `UV`)
        transport: &'static str,
        /// Failure reported by the transport, unchanged in content
        reason: String,
    },
}

impl DeviceError {
    /// Create a construction failure for the given transport family.
    pub fn construction(transport: &'static str, reason: impl Into<String>) -> Self {
        // ---
        Self::ConstructionFailed {
            transport,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by caller or user configuration.
    ///
    /// An unknown override key or missing locator is something the operator
    /// can fix; `UnsupportedPlatform` and construction failures point at the
    /// build or the host instead.
    pub fn is_configuration_error(&self) -> bool {
        // ---
        matches!(
            self,
            DeviceError::InvalidArgument(_) | DeviceError::UnknownTransport(_)
        )
    }
}

/// Result type alias for device operations
pub type Result<T> = std::result::Result<T, DeviceError>;

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_configuration_errors() {
        // ---
        assert!(DeviceError::UnknownTransport("IB".into()).is_configuration_error());
        assert!(DeviceError::InvalidArgument("x".into()).is_configuration_error());
        assert!(!DeviceError::UnsupportedPlatform("make").is_configuration_error());
        assert!(!DeviceError::construction("TCP", "refused").is_configuration_error());
    }

    #[test]
    fn test_construction_message_keeps_reason() {
        // ---
        let err = DeviceError::construction("TCP_TLS", "no such file: /k");
        assert_eq!(
            err.to_string(),
            "TCP_TLS device construction failed: no such file: /k"
        );
    }
}
