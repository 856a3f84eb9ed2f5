use crate::control::ControlError;

/// Calendar timestamp read from the real-time clock.
///
/// Fields are stored exactly as the RTC driver reported them. Range checking
/// is the driver's job, so a month of 13 is carried (and displayed) as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RtcReading {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub mins: u8,
    /// 0-59
    pub secs: u8,
}

impl RtcReading {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, mins: u8, secs: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            mins,
            secs,
        }
    }
}

/// Result of an RTC read operation
pub type RtcReturn = Result<RtcReading, ControlError>;
