//! Reading types produced by the input components
//!
//! Each input (sensors, RTC, I2C scanner) yields a plain value type. The
//! `*Return` aliases pair a reading with the error code of the operation
//! that produced it.

mod i2c_scan;
mod rtc;
mod sensor;

pub use i2c_scan::*;
pub use rtc::*;
pub use sensor::*;
