// tests/devices.rs

//! Builtin transports constructed through the selector.

use transport_select::{DeviceConfig, DeviceError, PlatformFamily, SelectorBuilder, TlsCredentials};

#[cfg(feature = "transport_tcp")]
#[test]
fn tcp_override_binds_hostname() {
    // ---
    // Arrange
    // ---
    let selector = SelectorBuilder::new().transport_override("TCP").build();

    // ---
    // Act
    // ---
    let device = selector
        .make_device_for_hostname("127.0.0.1")
        .expect("tcp device");

    // ---
    // Assert
    // ---
    let tcp = device
        .as_any()
        .downcast_ref::<transport_select::TcpDevice>()
        .expect("not a TcpDevice");

    assert_eq!(device.transport(), "TCP");
    assert!(device.address().is_loopback());
    assert!(tcp.listen_addr().unwrap().port() > 0);
}

#[cfg(all(feature = "transport_tcp", target_os = "linux"))]
#[test]
fn linux_default_binds_loopback_interface() {
    // ---
    let selector = SelectorBuilder::new().platform(PlatformFamily::Linux).build();

    let device = selector.make_device_for_interface("lo").expect("lo device");

    assert_eq!(device.transport(), "TCP");
    assert!(device.address().is_loopback());
}

#[cfg(feature = "transport_tcp")]
#[test]
fn missing_interface_is_construction_failure() {
    // ---
    let selector = SelectorBuilder::new().platform(PlatformFamily::Linux).build();

    let err = selector
        .make_device_for_interface("no-such-if0")
        .unwrap_err();

    assert!(matches!(err, DeviceError::ConstructionFailed { transport: "TCP", .. }));
    assert!(!err.is_configuration_error());
}

#[cfg(feature = "transport_tcp_tls")]
#[test]
fn tls_is_not_a_platform_default() {
    // ---
    let selector = SelectorBuilder::new().build();
    let registry = selector.registry();

    assert!(registry.contains("TCP_TLS"));
    assert_ne!(selector.resolve_key().ok(), Some("TCP_TLS"));
}

#[cfg(feature = "transport_tcp_tls")]
fn tls_fixture(name: &str) -> String {
    format!("{}/tests/fixtures/tls/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[cfg(feature = "transport_tcp_tls")]
#[test]
fn tls_override_uses_environment_snapshot() {
    // ---
    // Arrange
    // ---
    let pkey = tls_fixture("key.pem");
    let cert = tls_fixture("cert.pem");
    let ca_file = tls_fixture("ca.pem");

    let config = DeviceConfig::from_lookup(|name| match name {
        "TRANSPORT_OVERRIDE" => Some("TCP_TLS".to_string()),
        "TRANSPORT_TLS_PKEY" => Some(pkey.clone()),
        "TRANSPORT_TLS_CERT" => Some(cert.clone()),
        "TRANSPORT_TLS_CA_FILE" => Some(ca_file.clone()),
        _ => None,
    });

    // ---
    // Act
    // ---
    let selector = SelectorBuilder::with_config(config).build();
    let device = selector
        .make_device_for_hostname("127.0.0.1")
        .expect("tls device");

    // ---
    // Assert
    // ---
    let tls = device
        .as_any()
        .downcast_ref::<transport_select::TlsDevice>()
        .expect("not a TlsDevice");

    assert_eq!(device.transport(), "TCP_TLS");
    assert_eq!(
        tls.credentials(),
        &TlsCredentials::new(pkey.as_str(), cert.as_str(), ca_file.as_str(), "")
    );
    assert!(tls.server_config().is_some());
    assert_eq!(tls.trust_anchors(), 1);
}

#[cfg(feature = "transport_tcp_tls")]
#[test]
fn tls_override_rejects_non_pem_key() {
    // ---
    let manifest = format!("{}/Cargo.toml", env!("CARGO_MANIFEST_DIR"));
    let config = DeviceConfig::default()
        .with_transport_override("TCP_TLS")
        .with_tls(TlsCredentials::new(
            manifest.as_str(),
            tls_fixture("cert.pem"),
            "",
            "",
        ));

    let selector = SelectorBuilder::with_config(config).build();
    let err = selector.make_device_for_hostname("127.0.0.1").unwrap_err();

    assert!(matches!(err, DeviceError::ConstructionFailed { transport: "TCP_TLS", .. }));
    assert!(err.to_string().contains("private key"), "{err}");
}

#[cfg(feature = "transport_uv")]
#[test]
fn apple_default_uses_event_loop_transport() {
    // ---
    let selector = SelectorBuilder::new().platform(PlatformFamily::MacOs).build();

    let device = selector.make_device_for_hostname("127.0.0.1").unwrap();

    assert_eq!(device.transport(), "UV");
    assert!(device
        .as_any()
        .downcast_ref::<transport_select::UvDevice>()
        .is_some());
}

#[test]
fn global_selector_is_initialised_once() {
    // ---
    let first = transport_select::global_selector();
    let second = transport_select::global_selector();

    assert!(std::ptr::eq(first, second));
    assert!(transport_select::init_global_selector(SelectorBuilder::new().build()).is_err());
}
