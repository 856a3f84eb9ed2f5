//! Control layer types
//!
//! These types bind a reading to the device it came from so it can be routed
//! from an input component to any output component.

mod error;

pub use error::*;

use crate::input::{I2cScanReading, RtcReading, SensorReading};

/// Id marking an unused or invalid device slot
pub const CONTROL_ID_UNUSED: u8 = 0xFF;

/// Input and output roles known to the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DeviceComponent {
    Sensors = 0,
    Rtc = 1,
    I2cScan = 2,
    Error = 3,
    Display = 4,
    SerialConsole = 5,
    Unused = CONTROL_ID_UNUSED,
}

impl DeviceComponent {
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Short name used in text output
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sensors => "Sensor",
            Self::Rtc => "RTC",
            Self::I2cScan => "I2C",
            Self::Error => "Error",
            Self::Display => "Display",
            Self::SerialConsole => "Serial",
            Self::Unused => "Unused",
        }
    }
}

impl TryFrom<u8> for DeviceComponent {
    type Error = ControlError;

    fn try_from(value: u8) -> Result<DeviceComponent, ControlError> {
        Ok(match value {
            0 => DeviceComponent::Sensors,
            1 => DeviceComponent::Rtc,
            2 => DeviceComponent::I2cScan,
            3 => DeviceComponent::Error,
            4 => DeviceComponent::Display,
            5 => DeviceComponent::SerialConsole,
            CONTROL_ID_UNUSED => DeviceComponent::Unused,
            other => return Err(ControlError::InvalidComponent(other)),
        })
    }
}

/// A specific physical or logical unit, e.g. "sensor #2".
///
/// Uniqueness of `device_id` is up to whoever assigns the ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub component: DeviceComponent,
    pub device_id: u8,
}

impl DeviceDescriptor {
    pub const UNUSED: Self = Self::new(DeviceComponent::Unused, CONTROL_ID_UNUSED);

    pub const fn new(component: DeviceComponent, device_id: u8) -> Self {
        Self {
            component,
            device_id,
        }
    }
}

impl Default for DeviceDescriptor {
    fn default() -> Self {
        Self::UNUSED
    }
}

/// An error together with the component that raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorRecord {
    pub error: ControlError,
    pub component: DeviceDescriptor,
}

/// Payload of a [`ControlData`] record, one variant per reading kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlReading {
    Sensor(SensorReading),
    Rtc(RtcReading),
    I2cScan(I2cScanReading),
    Error(ErrorRecord),
}

impl ControlReading {
    /// Component tag that owns this kind of reading
    pub const fn expected_component(&self) -> DeviceComponent {
        match self {
            Self::Sensor(_) => DeviceComponent::Sensors,
            Self::Rtc(_) => DeviceComponent::Rtc,
            Self::I2cScan(_) => DeviceComponent::I2cScan,
            Self::Error(_) => DeviceComponent::Error,
        }
    }
}

/// A reading and the device it came from: the unit handed to outputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlData {
    pub device: DeviceDescriptor,
    pub reading: ControlReading,
}

impl ControlData {
    pub const fn new(device: DeviceDescriptor, reading: ControlReading) -> Self {
        Self { device, reading }
    }

    pub const fn sensor(device_id: u8, reading: SensorReading) -> Self {
        Self::new(
            DeviceDescriptor::new(DeviceComponent::Sensors, device_id),
            ControlReading::Sensor(reading),
        )
    }

    pub const fn rtc(device_id: u8, reading: RtcReading) -> Self {
        Self::new(
            DeviceDescriptor::new(DeviceComponent::Rtc, device_id),
            ControlReading::Rtc(reading),
        )
    }

    pub const fn i2c_scan(device_id: u8, reading: I2cScanReading) -> Self {
        Self::new(
            DeviceDescriptor::new(DeviceComponent::I2cScan, device_id),
            ControlReading::I2cScan(reading),
        )
    }

    /// Wrap an error record. The envelope is tagged with the error role and
    /// keeps the failing component's id.
    pub const fn error(record: ErrorRecord) -> Self {
        Self::new(
            DeviceDescriptor::new(DeviceComponent::Error, record.component.device_id),
            ControlReading::Error(record),
        )
    }

    /// Whether the descriptor tag matches the payload variant
    pub fn is_consistent(&self) -> bool {
        self.device.component == self.reading.expected_component()
    }
}

/// Output of a fetch operation: data to forward plus an error for the
/// error handler. `error` is `None` when the fetch succeeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlInputData {
    pub data: ControlData,
    pub error: Option<ControlError>,
}

impl ControlInputData {
    pub const fn new(data: ControlData, error: Option<ControlError>) -> Self {
        Self { data, error }
    }

    pub const fn ok(data: ControlData) -> Self {
        Self::new(data, None)
    }

    pub const fn with_error(data: ControlData, error: ControlError) -> Self {
        Self::new(data, Some(error))
    }

    /// Error record for the error handler, attributed to the data's device
    pub fn error_record(&self) -> Option<ErrorRecord> {
        self.error.map(|error| ErrorRecord {
            error,
            component: self.data.device,
        })
    }

    pub fn into_result(self) -> Result<ControlData, ControlError> {
        match self.error {
            None => Ok(self.data),
            Some(e) => Err(e),
        }
    }
}
