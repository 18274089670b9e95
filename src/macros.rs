// src/macros.rs

//
// Logging macros
//
// logging feature enabled  → tracing events under the `transport_select` target
// logging feature disabled → errors go to stderr, everything else is dropped
//

#![allow(unused_macros)]

#[cfg(feature = "logging")]
macro_rules! log_event {
    ($level:ident, $($arg:tt)*) => {
        tracing::event!(target: "transport_select", tracing::Level::$level, $($arg)*)
    };
}

#[cfg(feature = "logging")]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::macros::log_event!(ERROR, $($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_error {
    ($($arg:tt)*) => {
        eprintln!("transport-select: {}", format_args!($($arg)*))
    };
}

#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::macros::log_event!(WARN, $($arg)*) };
}

#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::macros::log_event!(INFO, $($arg)*) };
}

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::macros::log_event!(DEBUG, $($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
#[allow(unused_imports)]
pub(crate) use log_event;

#[allow(unused_imports)]
pub(crate) use {log_debug, log_error, log_info, log_warn};
