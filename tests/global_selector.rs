// tests/global_selector.rs

//! The process-wide selector behind the free functions.
//!
//! Kept in its own test binary: the selector is initialised once per process
//! and this file changes the environment around it.

#![cfg(feature = "transport_tcp")]

use transport_select::{make_device_for_hostname, make_device_for_interface, DeviceError};

#[test]
fn free_functions_read_override_once() {
    // ---
    // Arrange
    // ---
    std::env::set_var("TRANSPORT_OVERRIDE", "TCP");

    // ---
    // Act
    // ---
    let first = make_device_for_hostname("127.0.0.1").expect("first device");

    std::env::set_var("TRANSPORT_OVERRIDE", "NO_SUCH_TRANSPORT");
    let second = make_device_for_hostname("127.0.0.1").expect("second device");
    let by_interface = make_device_for_interface("no-such-if0").unwrap_err();

    // ---
    // Assert
    // ---
    assert_eq!(first.transport(), "TCP");
    assert_eq!(second.transport(), "TCP");
    assert_ne!(first.id(), second.id());
    assert_eq!(
        transport_select::global_selector().transport_override(),
        Some("TCP")
    );
    assert!(matches!(
        by_interface,
        DeviceError::ConstructionFailed { transport: "TCP", .. }
    ));
}
