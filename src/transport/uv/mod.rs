//! Event-loop transport.
//!
//! Each device owns a dedicated loop thread running a single-threaded tokio
//! runtime, in the style of a libuv loop. Work for the device is spawned onto
//! that loop through [`UvDevice::loop_handle`].
//!
//! ## Loop lifecycle
//!
//! - The runtime is built and the thread spawned during construction; either
//!   failing is reported as a construction failure.
//! - The loop parks on a shutdown channel and drives spawned tasks meanwhile.
//! - When the last [`DevicePtr`](crate::DevicePtr) is dropped the loop is
//!   signalled and its thread joined.
//!
//! Registered under the macOS platform key and under `UV`.

mod device;
pub use device::{make_uv_device, UvDevice};
