//! Error codes shared by every input and output component

use thiserror_no_std::Error;

/// Error codes reported by inputs, outputs and the control layer.
///
/// Each variant carries a stable numeric code (see [`ControlError::code`])
/// so it can be stored in an [`ErrorRecord`](super::ErrorRecord) or sent to
/// an error sink as a single byte.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    #[error("Serial console initialization failed")]
    SerialInitFailed,
    #[error("Invalid input type for this output")]
    InvalidInputType,
    #[error("Invalid I/O component id: {0:#04x}")]
    InvalidComponent(u8),
    #[error("Sensor read failed")]
    SensorReadFailed,
    #[error("RTC read failed")]
    RtcReadFailed,
    #[error("I2C scan failed")]
    I2cScanFailed,
    #[error("Configuration blob could not be decoded")]
    ConfigDecode,
    #[error("Configuration could not be encoded")]
    ConfigEncode,
}

impl ControlError {
    /// Numeric error code. Zero is reserved for "no error".
    pub const fn code(self) -> u8 {
        match self {
            Self::SerialInitFailed => 1,
            Self::InvalidInputType => 2,
            Self::InvalidComponent(_) => 3,
            Self::SensorReadFailed => 4,
            Self::RtcReadFailed => 5,
            Self::I2cScanFailed => 6,
            Self::ConfigDecode => 7,
            Self::ConfigEncode => 8,
        }
    }
}

/// Result type for control layer operations
pub type ControlResult<T> = Result<T, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique_and_nonzero() {
        let all = [
            ControlError::SerialInitFailed,
            ControlError::InvalidInputType,
            ControlError::InvalidComponent(0x42),
            ControlError::SensorReadFailed,
            ControlError::RtcReadFailed,
            ControlError::I2cScanFailed,
            ControlError::ConfigDecode,
            ControlError::ConfigEncode,
        ];

        for (i, a) in all.iter().enumerate() {
            assert_ne!(a.code(), 0);
            for b in &all[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}
