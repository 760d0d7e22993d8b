//! Mock GPIO service for testing
//!
//! Stores subscriptions and watchdog settings, and lets tests inject edges and
//! timeouts from any thread.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::platform::{
    Result,
    error::{GpioError, PlatformError},
    traits::{EdgeTrigger, EventCallback, GpioEvent, GpioService},
};

#[derive(Default)]
struct MockGpioState {
    subscriptions: Vec<(u8, EdgeTrigger, EventCallback)>,
    watchdogs: HashMap<u8, u32>,
    stopped: bool,
    fail_subscribe: bool,
}

/// Mock GPIO service
///
/// Clones share the same pins, so a test keeps one clone to fire events after
/// moving the other into the environment.
#[derive(Clone, Default)]
pub struct MockGpio {
    state: Arc<Mutex<MockGpioState>>,
    tick_us: Arc<AtomicU32>,
}

impl MockGpio {
    /// Create a new running mock GPIO service
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockGpioState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make subsequent subscriptions fail
    pub fn set_fail_subscribe(&self, fail: bool) {
        self.lock().fail_subscribe = fail;
    }

    /// Deliver a raw event to every matching subscriber
    ///
    /// Callbacks run on the calling thread, outside the internal lock. Events
    /// after [`stop`](GpioService::stop) are dropped.
    pub fn fire(&self, pin: u8, level: u32, tick_us: u32) {
        let callbacks: Vec<EventCallback> = {
            let state = self.lock();
            if state.stopped {
                return;
            }
            state
                .subscriptions
                .iter()
                .filter(|(p, trigger, _)| *p == pin && trigger.accepts(level))
                .map(|(_, _, callback)| callback.clone())
                .collect()
        };

        let event = GpioEvent {
            pin,
            level,
            tick_us,
        };
        for callback in callbacks {
            callback(event);
        }
    }

    fn next_tick(&self) -> u32 {
        self.tick_us.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Simulate a rising edge on `pin`
    pub fn rising(&self, pin: u8) {
        self.fire(pin, GpioEvent::LEVEL_RISING, self.next_tick());
    }

    /// Simulate a falling edge on `pin`
    pub fn falling(&self, pin: u8) {
        self.fire(pin, GpioEvent::LEVEL_FALLING, self.next_tick());
    }

    /// Simulate a watchdog timeout on `pin`
    pub fn timeout(&self, pin: u8) {
        self.fire(pin, GpioEvent::LEVEL_TIMEOUT, self.next_tick());
    }

    /// Watchdog window armed on `pin`, if any
    pub fn watchdog_ms(&self, pin: u8) -> Option<u32> {
        self.lock().watchdogs.get(&pin).copied()
    }

    /// Number of subscriptions registered on `pin`
    pub fn subscription_count(&self, pin: u8) -> usize {
        self.lock()
            .subscriptions
            .iter()
            .filter(|(p, _, _)| *p == pin)
            .count()
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }
}

impl GpioService for MockGpio {
    fn set_watchdog(&mut self, pin: u8, timeout_ms: u32) -> Result<()> {
        let mut state = self.lock();
        if state.stopped {
            return Err(PlatformError::Gpio(GpioError::NotConnected));
        }
        if timeout_ms == 0 {
            state.watchdogs.remove(&pin);
        } else {
            state.watchdogs.insert(pin, timeout_ms);
        }
        Ok(())
    }

    fn subscribe(&mut self, pin: u8, trigger: EdgeTrigger, callback: EventCallback) -> Result<()> {
        let mut state = self.lock();
        if state.stopped {
            return Err(PlatformError::Gpio(GpioError::NotConnected));
        }
        if state.fail_subscribe {
            return Err(PlatformError::Gpio(GpioError::SubscribeFailed));
        }
        state.subscriptions.push((pin, trigger, callback));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let mut state = self.lock();
        state.subscriptions.clear();
        state.watchdogs.clear();
        state.stopped = true;
        Ok(())
    }
}
