// src/transport/uv/device.rs

use std::any::Any;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

use tokio::runtime::{Builder, Handle};
use tokio::sync::oneshot;

use crate::transport::{bind::bind_listener, UV_KEY};
use crate::{
    log_debug, log_error, Device, DeviceAttr, DeviceBase, DeviceError, DeviceId, DevicePtr,
    Result,
};

/// Owns the loop thread; stopping it is tied to drop.
#[derive(Debug)]
struct EventLoop {
    handle: Handle,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
    thread_id: ThreadId,
}

impl EventLoop {
    fn start(id: &DeviceId) -> Result<Self> {
        // ---
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DeviceError::construction(UV_KEY, format!("event loop: {e}")))?;

        let handle = runtime.handle().clone();
        let (shutdown, stopped) = oneshot::channel::<()>();

        let thread = thread::Builder::new()
            .name(format!("uv-loop-{id}"))
            .spawn(move || {
                // Sender dropped without sending also ends the loop.
                let _ = runtime.block_on(stopped);
            })
            .map_err(|e| DeviceError::construction(UV_KEY, format!("loop thread: {e}")))?;

        Ok(Self {
            handle,
            shutdown: Some(shutdown),
            thread_id: thread.thread().id(),
            thread: Some(thread),
        })
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        // ---
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        // The last handle may be released by a task running on the loop
        // itself; that thread stops on its own once the task returns.
        if thread::current().id() == self.thread_id {
            log_debug!("UV: loop released from its own thread, not joining");
            return;
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log_error!("UV: event loop thread panicked");
            }
        }
    }
}

/// Event-loop transport device bound to a local address.
#[derive(Debug)]
pub struct UvDevice {
    // ---
    base: DeviceBase,
    listener: TcpListener,
    event_loop: EventLoop,
}

impl UvDevice {
    fn bind(attr: DeviceAttr) -> Result<Self> {
        // ---
        let (address, listener) = bind_listener(UV_KEY, &attr)?;
        let base = DeviceBase::new(UV_KEY, attr, address);
        let event_loop = EventLoop::start(&base.id)?;

        log_debug!("UV: loop started for device {}", base.id);

        Ok(Self {
            base,
            listener,
            event_loop,
        })
    }

    /// Handle to this device's event loop, for spawning device work.
    pub fn loop_handle(&self) -> &Handle {
        &self.event_loop.handle
    }

    /// Address peers can connect to.
    pub fn listen_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Device for UvDevice {
    fn base(&self) -> &DeviceBase {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Construct an event-loop transport device.
///
/// # Errors
///
/// - [`DeviceError::InvalidArgument`] if both `interface` and `hostname` are
///   empty
/// - [`DeviceError::ConstructionFailed`] if the locator cannot be resolved or
///   bound, or the loop cannot be started
pub fn make_uv_device(interface: &str, hostname: &str) -> Result<DevicePtr> {
    // ---
    let attr = DeviceAttr::from_locators("make_uv_device", interface, hostname)?;
    Ok(Arc::new(UvDevice::bind(attr)?))
}
