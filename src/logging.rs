//! Logging abstraction
//!
//! Provides the `log_info!`, `log_warn!`, `log_error!`, `log_debug!` and
//! `log_trace!` macros used throughout the crate. They forward to `tracing`
//! with the `racing_car` target; the host binary decides where the events go
//! by installing a subscriber.
//!
//! Event callbacks run on the GPIO notification thread at encoder rate, so
//! per-event logging stays at trace level.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "racing_car", $($arg)*)
    };
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "racing_car", $($arg)*)
    };
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: "racing_car", $($arg)*)
    };
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "racing_car", $($arg)*)
    };
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "racing_car", $($arg)*)
    };
}
