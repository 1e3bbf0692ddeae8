//! Platform abstraction layer
//!
//! Translates browser events into simulation input. Everything here is plain
//! data so it can be tested without a DOM.

pub mod input;

pub use input::{AcceleratePulse, TouchSteer, control_for_key};
