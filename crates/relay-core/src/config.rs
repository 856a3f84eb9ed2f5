//! Serial console configuration
//!
//! Compile-time limits for the text buffers plus a small runtime config that
//! can be persisted as a postcard blob.

use serde::{Deserialize, Serialize};

use crate::control::{ControlError, ControlResult};

/// Baud rate used when no stored configuration is available
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Decimal places printed for sensor values by default
pub const DEFAULT_FLOAT_PRECISION: u8 = 2;

/// Larger precisions would not fit in [`FLOAT_BUFFER_SIZE`]
pub const MAX_FLOAT_PRECISION: u8 = 6;

/// Capacity of the float-to-text buffer
pub const FLOAT_BUFFER_SIZE: usize = 20;

/// Capacity of a `0xNN` address token
pub const HEX_ADDR_BUFFER_SIZE: usize = 4;

/// Capacity of a `0xNN LABEL` status token
pub const STATUS_BUFFER_SIZE: usize = 12;

/// Capacity of a `YYYY-MM-DD HH:MM:SS` timestamp, wide enough for
/// out-of-range fields such as `65535-255-255 255:255:255`.
pub const TIMESTAMP_BUFFER_SIZE: usize = 25;

/// Capacity of one rendered line, excluding I2C address tokens which are
/// written one at a time
pub const LINE_BUFFER_SIZE: usize = 60;

/// Line terminator written after every record
pub const LINE_ENDING: &str = "\r\n";

/// Upper bound of an encoded [`SerialConsoleConfig`]
pub const CONFIG_BLOB_SIZE: usize = 16;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConsoleConfig {
    pub baud_rate: u32,
    pub float_precision: u8,
}

impl Default for SerialConsoleConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }
}

impl SerialConsoleConfig {
    pub const fn new(baud_rate: u32, float_precision: u8) -> Self {
        Self {
            baud_rate,
            float_precision,
        }
    }

    /// Precision actually used when formatting, capped at [`MAX_FLOAT_PRECISION`]
    pub fn precision(&self) -> usize {
        self.float_precision.min(MAX_FLOAT_PRECISION) as usize
    }

    /// Decode a stored configuration blob
    pub fn from_bytes(bytes: &[u8]) -> ControlResult<Self> {
        postcard::from_bytes(bytes).map_err(|e| {
            log::error!("Serial console config decode failed: {:?}", e);
            ControlError::ConfigDecode
        })
    }

    /// Encode into `buf`, returning the used prefix
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> ControlResult<&'a mut [u8]> {
        postcard::to_slice(self, buf).map_err(|e| {
            log::error!("Serial console config encode failed: {:?}", e);
            ControlError::ConfigEncode
        })
    }
}
