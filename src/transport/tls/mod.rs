//! TLS-wrapped TCP transport.
//!
//! Registered only under `TCP_TLS`: there is no platform default for TLS,
//! it has to be requested through `TRANSPORT_OVERRIDE`.
//!
//! Credentials come from the [`DeviceConfig`](crate::DeviceConfig) snapshot
//! taken at startup (`TRANSPORT_TLS_PKEY`, `TRANSPORT_TLS_CERT`,
//! `TRANSPORT_TLS_CA_FILE`, `TRANSPORT_TLS_CA_PATH`). The key and certificate
//! are parsed as PEM and turned into a `rustls` server configuration when the
//! device is built; the CA material becomes its client trust store. Accepting
//! connections and running handshakes is left to the caller.

mod device;
pub use device::{make_tcp_tls_device, TlsDevice};
