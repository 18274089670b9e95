// src/transport/tcp/device.rs

use std::any::Any;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use crate::transport::{bind::bind_listener, TCP_KEY};
use crate::{Device, DeviceAttr, DeviceBase, DevicePtr, Result};

/// Plain TCP device bound to a local address.
#[derive(Debug)]
pub struct TcpDevice {
    // ---
    base: DeviceBase,
    listener: TcpListener,
}

impl TcpDevice {
    /// Bind a TCP device for the given attributes.
    fn bind(attr: DeviceAttr) -> Result<Self> {
        // ---
        let (address, listener) = bind_listener(TCP_KEY, &attr)?;
        Ok(Self {
            base: DeviceBase::new(TCP_KEY, attr, address),
            listener,
        })
    }

    /// Address peers can connect to.
    pub fn listen_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Device for TcpDevice {
    fn base(&self) -> &DeviceBase {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Construct a plain TCP device.
///
/// # Errors
///
/// - [`DeviceError::InvalidArgument`](crate::DeviceError::InvalidArgument) if
///   both `interface` and `hostname` are empty
/// - [`DeviceError::ConstructionFailed`](crate::DeviceError::ConstructionFailed)
///   if the locator cannot be resolved or bound
pub fn make_tcp_device(interface: &str, hostname: &str) -> Result<DevicePtr> {
    // ---
    let attr = DeviceAttr::from_locators("make_tcp_device", interface, hostname)?;
    Ok(Arc::new(TcpDevice::bind(attr)?))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::DeviceError;

    #[test]
    fn test_requires_locator() {
        // ---
        let err = make_tcp_device("", "").unwrap_err();
        assert!(matches!(err, DeviceError::InvalidArgument(_)));
    }

    #[test]
    fn test_hostname_device() {
        // ---
        let device = make_tcp_device("", "127.0.0.1").unwrap();
        assert_eq!(device.transport(), "TCP");
        assert!(device.address().is_loopback());

        let tcp = device.as_any().downcast_ref::<TcpDevice>().unwrap();
        assert!(tcp.listen_addr().unwrap().port() > 0);
    }

    #[test]
    fn test_bad_interface_fails_construction() {
        // ---
        let err = make_tcp_device("no-such-if0", "127.0.0.1").unwrap_err();
        assert!(matches!(err, DeviceError::ConstructionFailed { .. }));
    }
}
