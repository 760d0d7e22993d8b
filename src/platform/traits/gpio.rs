//! GPIO service trait
//!
//! This module defines the interface of the GPIO daemon the car talks to. The
//! daemon owns the pins; the car subscribes callbacks for input edges and arms
//! watchdogs that report a timeout when a pin stays quiet for a window.

use std::sync::Arc;

use crate::platform::Result;

/// Raw GPIO event as delivered by the daemon
///
/// `level` follows the pigpio convention (0 falling, 1 rising, 2 watchdog
/// timeout). Decoding is left to the subscriber so noise can be discarded
/// where it is understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioEvent {
    pub pin: u8,
    pub level: u32,
    /// Daemon tick in microseconds (wraps at `u32::MAX`)
    pub tick_us: u32,
}

impl GpioEvent {
    pub const LEVEL_FALLING: u32 = 0;
    pub const LEVEL_RISING: u32 = 1;
    pub const LEVEL_TIMEOUT: u32 = 2;
}

/// Edge selection for a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTrigger {
    Rising,
    Falling,
    Either,
}

impl EdgeTrigger {
    /// Check whether an event level is delivered to this subscription
    ///
    /// Watchdog timeouts reach every subscriber of the pin.
    pub fn accepts(&self, level: u32) -> bool {
        match (self, level) {
            (_, GpioEvent::LEVEL_TIMEOUT) => true,
            (EdgeTrigger::Rising, GpioEvent::LEVEL_RISING) => true,
            (EdgeTrigger::Falling, GpioEvent::LEVEL_FALLING) => true,
            (EdgeTrigger::Either, GpioEvent::LEVEL_RISING | GpioEvent::LEVEL_FALLING) => true,
            _ => false,
        }
    }
}

/// Callback invoked from the daemon's notification thread
pub type EventCallback = Arc<dyn Fn(GpioEvent) + Send + Sync>;

/// GPIO service interface
///
/// The service is already running when handed to the car; the car never
/// starts or supervises the daemon.
///
/// # Safety Invariants
///
/// - Callbacks may run on any thread, concurrently with the caller
/// - No callback is invoked after [`stop`](GpioService::stop) returns
pub trait GpioService: Send {
    /// Report a timeout on `pin` whenever no edge occurs for `timeout_ms`
    ///
    /// A value of 0 disarms the watchdog.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio` if the pin is invalid or the daemon refuses.
    fn set_watchdog(&mut self, pin: u8, timeout_ms: u32) -> Result<()>;

    /// Register `callback` for edges on `pin`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::SubscribeFailed)` if the
    /// registration is refused.
    fn subscribe(&mut self, pin: u8, trigger: EdgeTrigger, callback: EventCallback) -> Result<()>;

    /// Cancel all subscriptions and watchdogs and release the connection
    fn stop(&mut self) -> Result<()>;
}
