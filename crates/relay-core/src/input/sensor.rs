use crate::control::ControlError;

/// Which payload of a [`SensorReading`] is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementType {
    /// A floating point measurement (temperature, humidity, ...)
    Value,
    /// A boolean indication (raining / not raining, ...)
    Indication,
}

/// A single sensor reading.
///
/// The variant selects the authoritative payload, so a measured value and
/// an indication flag can never both be read from the same reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorReading {
    Value(f32),
    Indication(bool),
}

impl SensorReading {
    pub const fn measurement_type(&self) -> MeasurementType {
        match self {
            Self::Value(_) => MeasurementType::Value,
            Self::Indication(_) => MeasurementType::Indication,
        }
    }

    /// Measured value, if this reading is a measurement
    pub const fn value(&self) -> Option<f32> {
        match *self {
            Self::Value(v) => Some(v),
            Self::Indication(_) => None,
        }
    }

    /// Indication flag, if this reading is an indication
    pub const fn indication(&self) -> Option<bool> {
        match *self {
            Self::Value(_) => None,
            Self::Indication(i) => Some(i),
        }
    }
}

/// Result of a sensor read operation
pub type SensorReturn = Result<SensorReading, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_reading_exposes_only_value() {
        let reading = SensorReading::Value(21.5);
        assert_eq!(reading.measurement_type(), MeasurementType::Value);
        assert_eq!(reading.value(), Some(21.5));
        assert_eq!(reading.indication(), None);
    }

    #[test]
    fn test_indication_reading_exposes_only_indication() {
        let reading = SensorReading::Indication(true);
        assert_eq!(reading.measurement_type(), MeasurementType::Indication);
        assert_eq!(reading.value(), None);
        assert_eq!(reading.indication(), Some(true));
    }
}
