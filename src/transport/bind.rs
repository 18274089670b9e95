// src/transport/bind.rs

//! Address resolution and listener binding shared by all transports.
//!
//! Interfaces are resolved to their first IPv4 address, falling back to the
//! first IPv6 address. Hostnames go through the system resolver with the same
//! IPv4 preference. The device then binds a listener on that address with an
//! ephemeral port, which is the only socket work done at construction time.

use std::net::{IpAddr, SocketAddr, TcpListener, ToSocketAddrs};

use crate::{log_debug, DeviceAttr, DeviceError, Result};

/// Resolve `attr` and bind a listener on the resulting address.
pub(crate) fn bind_listener(
    transport: &'static str,
    attr: &DeviceAttr,
) -> Result<(IpAddr, TcpListener)> {
    // ---
    let address = resolve(transport, attr)?;

    let listener = TcpListener::bind(SocketAddr::new(address, 0))
        .map_err(|e| DeviceError::construction(transport, format!("bind {address}: {e}")))?;

    log_debug!(
        "{transport}: {attr} resolved to {address}, listening on {:?}",
        listener.local_addr().ok()
    );

    Ok((address, listener))
}

pub(crate) fn resolve(transport: &'static str, attr: &DeviceAttr) -> Result<IpAddr> {
    match attr {
        DeviceAttr::Interface(name) => interface_address(transport, name),
        DeviceAttr::Hostname(host) => hostname_address(transport, host),
    }
}

#[cfg(unix)]
fn interface_address(transport: &'static str, name: &str) -> Result<IpAddr> {
    // ---
    use nix::ifaddrs::getifaddrs;
    use std::net::{SocketAddrV4, SocketAddrV6};

    let addrs = getifaddrs()
        .map_err(|e| DeviceError::construction(transport, format!("getifaddrs: {e}")))?;

    let mut found = false;
    let mut ipv6 = None;

    for ifa in addrs.filter(|ifa| ifa.interface_name == name) {
        found = true;
        let Some(storage) = ifa.address else {
            continue;
        };

        if let Some(sin) = storage.as_sockaddr_in() {
            return Ok(IpAddr::V4(*SocketAddrV4::from(*sin).ip()));
        }
        if ipv6.is_none() {
            ipv6 = storage
                .as_sockaddr_in6()
                .map(|sin6| IpAddr::V6(*SocketAddrV6::from(*sin6).ip()));
        }
    }

    match (found, ipv6) {
        (_, Some(address)) => Ok(address),
        (true, None) => Err(DeviceError::construction(
            transport,
            format!("interface {name} has no IP address"),
        )),
        (false, None) => Err(DeviceError::construction(
            transport,
            format!("no such interface: {name}"),
        )),
    }
}

#[cfg(not(unix))]
fn interface_address(transport: &'static str, name: &str) -> Result<IpAddr> {
    Err(DeviceError::construction(
        transport,
        format!("interface lookup is not supported on this platform: {name}"),
    ))
}

fn hostname_address(transport: &'static str, host: &str) -> Result<IpAddr> {
    // ---
    let candidates: Vec<IpAddr> = (host, 0)
        .to_socket_addrs()
        .map_err(|e| DeviceError::construction(transport, format!("resolve {host}: {e}")))?
        .map(|sa| sa.ip())
        .collect();

    candidates
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| candidates.first())
        .copied()
        .ok_or_else(|| {
            DeviceError::construction(transport, format!("{host} did not resolve to any address"))
        })
}
