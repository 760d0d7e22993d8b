//! racing_car_core - Pure no_std logic for the racing car environment
//!
//! This crate contains the platform-agnostic algorithms and types of the
//! racing car: signal scaling, servo pulse mapping, the telemetry state
//! machine driven by GPIO events, and action validation. Everything here can
//! be tested on host with synthetic events and no hardware.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies outside of tests
//! - **Pure dispatch**: Hardware events map to state transitions through plain functions
//!
//! # Modules
//!
//! - [`scaler`]: Linear range remapping
//! - [`servo`]: Normalized command to pulse width conversion
//! - [`telemetry`]: Telemetry state, GPIO event types and dispatch
//! - [`action`]: Agent action type and validation

#![cfg_attr(not(test), no_std)]

pub mod action;
pub mod scaler;
pub mod servo;
pub mod telemetry;
