// src/transport/tls/device.rs

use std::any::Any;
use std::fmt;
use std::fs;
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::Arc;

use rustls::crypto::{ring, CryptoProvider};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use rustls_pki_types::pem::PemObject;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};

use crate::transport::{bind::bind_listener, TCP_TLS_KEY};
use crate::{
    log_debug, Device, DeviceAttr, DeviceBase, DeviceError, DevicePtr, Result, TlsCredentials,
};

/// TLS-wrapped TCP device bound to a local address.
pub struct TlsDevice {
    // ---
    base: DeviceBase,
    listener: TcpListener,
    credentials: TlsCredentials,
    server_config: Option<Arc<ServerConfig>>,
    trust_anchors: usize,
}

impl TlsDevice {
    fn bind(attr: DeviceAttr, credentials: TlsCredentials) -> Result<Self> {
        // ---
        let material = TlsMaterial::load(&credentials)?;
        let trust_anchors = material.roots.len();
        let server_config = material.into_server_config()?;

        let (address, listener) = bind_listener(TCP_TLS_KEY, &attr)?;
        Ok(Self {
            base: DeviceBase::new(TCP_TLS_KEY, attr, address),
            listener,
            credentials,
            server_config,
            trust_anchors,
        })
    }

    /// Credentials this device was constructed with.
    pub fn credentials(&self) -> &TlsCredentials {
        &self.credentials
    }

    /// Server configuration built from the key and certificate chain.
    ///
    /// `None` when neither a private key nor a certificate is configured.
    /// When CA material is present, client certificates are required and
    /// verified against it.
    pub fn server_config(&self) -> Option<&Arc<ServerConfig>> {
        self.server_config.as_ref()
    }

    /// Number of CA certificates loaded from the CA file and CA directory.
    pub fn trust_anchors(&self) -> usize {
        self.trust_anchors
    }

    /// Address peers can connect to.
    pub fn listen_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl fmt::Debug for TlsDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsDevice")
            .field("base", &self.base)
            .field("listener", &self.listener)
            .field("credentials", &self.credentials)
            .field("server_config", &self.server_config.is_some())
            .field("trust_anchors", &self.trust_anchors)
            .finish()
    }
}

impl Device for TlsDevice {
    fn base(&self) -> &DeviceBase {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Parsed credential files, before they become a [`ServerConfig`].
struct TlsMaterial {
    key: Option<PrivateKeyDer<'static>>,
    chain: Vec<CertificateDer<'static>>,
    roots: RootCertStore,
}

impl TlsMaterial {
    // Empty locations mean "not configured" and are skipped.
    fn load(credentials: &TlsCredentials) -> Result<Self> {
        // ---
        let key = match credentials.pkey.as_str() {
            "" => None,
            path => Some(
                PrivateKeyDer::from_pem_file(path)
                    .map_err(|e| failed(format!("private key {path}: {e}")))?,
            ),
        };

        let chain = match credentials.cert.as_str() {
            "" => Vec::new(),
            path => load_certs("certificate", path)?,
        };

        let mut roots = RootCertStore::empty();
        if !credentials.ca_file.is_empty() {
            add_roots(&mut roots, "CA file", &credentials.ca_file)?;
        }
        if !credentials.ca_path.is_empty() {
            add_root_dir(&mut roots, &credentials.ca_path)?;
        }

        Ok(Self { key, chain, roots })
    }

    fn into_server_config(self) -> Result<Option<Arc<ServerConfig>>> {
        // ---
        let (key, chain) = match (self.key, self.chain.is_empty()) {
            (None, true) => return Ok(None),
            (Some(key), false) => (key, self.chain),
            (Some(_), true) => return Err(failed("private key configured without a certificate")),
            (None, false) => return Err(failed("certificate configured without a private key")),
        };

        let provider: Arc<CryptoProvider> = Arc::new(ring::default_provider());
        let builder = ServerConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()
            .map_err(|e| failed(format!("protocol versions: {e}")))?;

        let builder = if self.roots.is_empty() {
            builder.with_no_client_auth()
        } else {
            let verifier =
                WebPkiClientVerifier::builder_with_provider(Arc::new(self.roots), provider)
                    .build()
                    .map_err(|e| failed(format!("client verifier: {e}")))?;
            builder.with_client_cert_verifier(verifier)
        };

        let config = builder
            .with_single_cert(chain, key)
            .map_err(|e| failed(format!("certificate/key pair: {e}")))?;

        Ok(Some(Arc::new(config)))
    }
}

fn failed(reason: impl Into<String>) -> DeviceError {
    DeviceError::construction(TCP_TLS_KEY, reason)
}

fn load_certs(what: &str, path: &str) -> Result<Vec<CertificateDer<'static>>> {
    // ---
    let certs = CertificateDer::pem_file_iter(path)
        .and_then(|iter| iter.collect::<std::result::Result<Vec<_>, _>>())
        .map_err(|e| failed(format!("{what} {path}: {e}")))?;

    if certs.is_empty() {
        return Err(failed(format!("{what} {path}: no certificates found")));
    }
    Ok(certs)
}

fn add_roots(roots: &mut RootCertStore, what: &str, path: &str) -> Result<()> {
    // ---
    for cert in load_certs(what, path)? {
        roots
            .add(cert)
            .map_err(|e| failed(format!("{what} {path}: {e}")))?;
    }
    Ok(())
}

// Every regular file in the directory must hold at least one certificate.
fn add_root_dir(roots: &mut RootCertStore, dir: &str) -> Result<()> {
    // ---
    if !Path::new(dir).is_dir() {
        return Err(failed(format!("CA path {dir}: not a directory")));
    }

    let entries = fs::read_dir(dir).map_err(|e| failed(format!("CA path {dir}: {e}")))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| failed(format!("CA path {dir}: {e}")))?
            .path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    for file in files {
        add_roots(roots, "CA path", &file.to_string_lossy())?;
    }
    Ok(())
}

/// Construct a TLS-wrapped TCP device.
///
/// All four credential locations are passed through as given; empty strings
/// mean "not configured". The private key and certificate are parsed as PEM
/// and turned into a server configuration; CA material from the file and the
/// directory becomes the client-certificate trust store.
///
/// # Errors
///
/// - [`DeviceError::InvalidArgument`] if both `interface` and `hostname` are
///   empty
/// - [`DeviceError::ConstructionFailed`] if a configured credential cannot be
///   read or parsed, only one of key and certificate is configured, the pair
///   is rejected, or the locator cannot be resolved or bound
pub fn make_tcp_tls_device(
    interface: &str,
    hostname: &str,
    credentials: &TlsCredentials,
) -> Result<DevicePtr> {
    // ---
    let attr = DeviceAttr::from_locators("make_tcp_tls_device", interface, hostname)?;

    log_debug!("TCP_TLS: {attr} with {credentials:?}");

    Ok(Arc::new(TlsDevice::bind(attr, credentials.clone())?))
}
