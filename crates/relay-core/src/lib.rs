//! Hardware-independent core of the sensor-relay firmware
//!
//! Readings collected from inputs (sensors, the RTC, the I2C scanner) are
//! wrapped in [`control::ControlData`] records and routed to output
//! components such as the [`output::SerialConsole`].
//!
//! The crate is `#![no_std]` and never allocates, so it builds for the
//! microcontroller as well as for desktop hosts (the simulator and tests).

#![no_std]

pub mod config;
pub mod control;
pub mod input;
pub mod output;
