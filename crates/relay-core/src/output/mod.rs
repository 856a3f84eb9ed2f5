//! Output components
//!
//! An output takes a [`ControlData`] record and presents it somewhere: the
//! serial console today, a character display on boards that carry one.

pub mod serial_console;

pub use serial_console::{ChannelState, SerialConsole, SerialPort};

use log::warn;

use crate::control::{ControlData, ControlResult, DeviceComponent};

/// Trait for components that present control data
pub trait OutputComponent {
    /// Role this output is registered under
    fn component(&self) -> DeviceComponent;

    /// Bring the output up. Must not block waiting for a consumer.
    fn init(&mut self) -> ControlResult<()>;

    /// Present one record
    fn display_data(&mut self, data: &ControlData) -> ControlResult<()>;
}

/// Hand `data` to every output in order.
///
/// An output that rejects the record does not stop the others; the first
/// error is returned once all outputs have been visited.
pub fn forward_to_outputs(
    data: &ControlData,
    outputs: &mut [&mut dyn OutputComponent],
) -> ControlResult<()> {
    let mut result = Ok(());

    for output in outputs.iter_mut() {
        if let Err(e) = output.display_data(data) {
            warn!("{:?} rejected {:?}: {}", output.component(), data.device, e);
            if result.is_ok() {
                result = Err(e);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::control::{ControlError, DeviceDescriptor};
    use crate::input::SensorReading;

    /// Counts records and accepts only one component tag
    struct CountingOutput {
        accepts: DeviceComponent,
        seen: usize,
    }

    impl OutputComponent for CountingOutput {
        fn component(&self) -> DeviceComponent {
            DeviceComponent::Display
        }

        fn init(&mut self) -> ControlResult<()> {
            Ok(())
        }

        fn display_data(&mut self, data: &ControlData) -> ControlResult<()> {
            if data.device.component != self.accepts {
                return Err(ControlError::InvalidInputType);
            }
            self.seen += 1;
            Ok(())
        }
    }

    #[test]
    fn test_forward_reaches_every_output() {
        let mut a = CountingOutput {
            accepts: DeviceComponent::Sensors,
            seen: 0,
        };
        let mut b = CountingOutput {
            accepts: DeviceComponent::Sensors,
            seen: 0,
        };
        let data = ControlData::sensor(0, SensorReading::Value(1.0));

        assert_eq!(forward_to_outputs(&data, &mut [&mut a, &mut b]), Ok(()));
        assert_eq!((a.seen, b.seen), (1, 1));
    }

    #[test]
    fn test_forward_continues_past_rejection() {
        let mut rejecting = CountingOutput {
            accepts: DeviceComponent::Rtc,
            seen: 0,
        };
        let mut accepting = CountingOutput {
            accepts: DeviceComponent::Sensors,
            seen: 0,
        };
        let data = ControlData::new(
            DeviceDescriptor::new(DeviceComponent::Sensors, 1),
            crate::control::ControlReading::Sensor(SensorReading::Indication(true)),
        );

        assert_eq!(
            forward_to_outputs(&data, &mut [&mut rejecting, &mut accepting]),
            Err(ControlError::InvalidInputType)
        );
        assert_eq!(accepting.seen, 1);
    }
}
