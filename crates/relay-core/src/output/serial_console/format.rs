//! Fixed-capacity text rendering for readings
//!
//! Nothing here allocates: each helper returns a `heapless::String` sized for
//! the widest value its input type can produce.

use core::fmt::Write;

use embedded_hal::i2c::SevenBitAddress;
use heapless::String;

use crate::config::{
    FLOAT_BUFFER_SIZE, HEX_ADDR_BUFFER_SIZE, STATUS_BUFFER_SIZE, TIMESTAMP_BUFFER_SIZE,
};
use crate::input::{I2cScanReading, RtcReading};

/// Printed instead of a number that does not fit the float buffer
pub const OVERFLOW_TOKEN: &str = "ovf";

pub const INDICATION_ON: &str = "YES";
pub const INDICATION_OFF: &str = "NO";

/// Printed for a full scan that found no device
pub const NO_DEVICES_TOKEN: &str = "none";

/// Render `value` with `precision` decimals, or [`OVERFLOW_TOKEN`] when the
/// text would exceed [`FLOAT_BUFFER_SIZE`].
pub fn format_float(value: f32, precision: usize) -> String<FLOAT_BUFFER_SIZE> {
    let mut out = String::new();
    if write!(out, "{:.*}", precision, value).is_err() {
        out.clear();
        // Always fits.
        let _ = out.push_str(OVERFLOW_TOKEN);
    }
    out
}

pub const fn format_indication(indication: bool) -> &'static str {
    if indication {
        INDICATION_ON
    } else {
        INDICATION_OFF
    }
}

/// `YYYY-MM-DD HH:MM:SS`, zero padded
pub fn format_timestamp(rtc: &RtcReading) -> String<TIMESTAMP_BUFFER_SIZE> {
    let mut out = String::new();
    // The buffer is sized for the widest u16/u8 fields.
    let _ = write!(
        out,
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        rtc.year, rtc.month, rtc.day, rtc.hour, rtc.mins, rtc.secs
    );
    out
}

/// `0xNN`, two uppercase hex digits
pub fn format_hex_address(address: SevenBitAddress) -> String<HEX_ADDR_BUFFER_SIZE> {
    let mut out = String::new();
    let _ = write!(out, "0x{:02X}", address);
    out
}

/// Raw single-device status byte followed by its decoded label, e.g.
/// `0x02 NACKADR`
pub fn format_status(reading: &I2cScanReading) -> String<STATUS_BUFFER_SIZE> {
    let mut out = String::new();
    // Widest case is `0xNN UNKNOWN`.
    let _ = write!(
        out,
        "0x{:02X} {}",
        reading.single_device_status,
        reading.status().label()
    );
    out
}
