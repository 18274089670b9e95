//! Domain layer public interface.
//!
//! This module defines the device abstractions shared by the registry, the
//! selector and the transport implementations.
//!
//! All domain consumers must import symbols via this module, not by
//! referencing individual files directly.

mod device;

// --- Device domain re-exports ---

pub use device::{
    //
    Device,
    DeviceAttr,
    DeviceBase,
    DevicePtr,
};
