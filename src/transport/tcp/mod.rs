//! Plain TCP transport.
//!
//! Registered under the Linux platform key and under `TCP` so it can be
//! forced through `TRANSPORT_OVERRIDE`.
//!
//! # Usage
//!
//! Enable the `transport_tcp` feature in your Cargo.toml (on by default):
//!
//! ```toml
//! [dependencies]
//! transport-select = { version = "0.1", features = ["transport_tcp"] }
//! ```

mod device;
pub use device::{make_tcp_device, TcpDevice};
