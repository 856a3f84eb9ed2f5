//! Desktop simulator for the sensor-relay serial console.
//!
//! Feeds synthetic sensor, RTC and I2C scan records through
//! `relay_core::output::SerialConsole` with stdout standing in for the UART,
//! so the console output can be checked without hardware.
//!
//! Set `RUST_LOG=debug` to see the dispatch trace next to the output.

use std::io::{self, Write as _};
use std::thread;
use std::time::Duration;

use embedded_io::{ErrorKind, ErrorType};
use log::{debug, info, warn};

use relay_core::config::SerialConsoleConfig;
use relay_core::control::{
    ControlData, ControlError, ControlInputData, ControlReading, DeviceDescriptor,
};
use relay_core::input::{I2cAddressMap, I2cScanReading, I2cStatus, RtcReading, SensorReading};
use relay_core::output::{OutputComponent, SerialConsole, SerialPort, forward_to_outputs};

// ---------------------------------------------------------------------------
// Simulation constants
// ---------------------------------------------------------------------------

/// Number of poll cycles to run before exiting.
const POLL_CYCLES: u32 = 5;

/// Delay between poll cycles.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Devices answering on the simulated I2C bus (SSD1306, BME280, DS3231).
const BUS_DEVICES: [u8; 3] = [0x3C, 0x76, 0x68];

// ---------------------------------------------------------------------------
// Stdout serial port
// ---------------------------------------------------------------------------

/// Serial port backed by the process's stdout.
struct StdoutPort {
    stdout: io::Stdout,
}

impl StdoutPort {
    fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl ErrorType for StdoutPort {
    type Error = ErrorKind;
}

impl embedded_io::Write for StdoutPort {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stdout.write(buf).map_err(|_| ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stdout.flush().map_err(|_| ErrorKind::Other)
    }
}

impl SerialPort for StdoutPort {
    fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        info!("stdout standing in for a {} baud UART", baud_rate);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mock input collection
// ---------------------------------------------------------------------------

/// Produces one batch of records per poll cycle.
struct MockInputs {
    cycle: u32,
    clock: RtcReading,
}

impl MockInputs {
    fn new() -> Self {
        Self {
            cycle: 0,
            clock: RtcReading::new(2025, 1, 31, 23, 59, 58),
        }
    }

    fn tick_clock(&mut self) {
        let c = &mut self.clock;
        c.secs += 1;
        if c.secs == 60 {
            c.secs = 0;
            c.mins += 1;
        }
        if c.mins == 60 {
            c.mins = 0;
            c.hour += 1;
        }
        if c.hour == 24 {
            // Month rollover is not simulated.
            c.hour = 0;
            c.day += 1;
        }
    }

    fn poll(&mut self) -> [ControlInputData; 6] {
        self.cycle += 1;
        self.tick_clock();

        let t = self.cycle as f32;
        let temperature = 21.0 + 0.75 * t;
        let raining = self.cycle % 2 == 0;

        let bus: I2cAddressMap = BUS_DEVICES.iter().copied().collect();
        let display_status = if self.cycle % 3 == 0 {
            I2cStatus::NackAddress
        } else {
            I2cStatus::Success
        };
        let display_check = I2cScanReading::single_device(BUS_DEVICES[0], display_status)
            .unwrap_or_default();

        // Every fourth cycle the humidity sensor times out.
        let humidity = if self.cycle % 4 == 0 {
            ControlInputData::with_error(
                ControlData::sensor(1, SensorReading::Value(0.0)),
                ControlError::SensorReadFailed,
            )
        } else {
            ControlInputData::ok(ControlData::sensor(1, SensorReading::Value(48.0 - t)))
        };

        [
            ControlInputData::ok(ControlData::sensor(0, SensorReading::Value(temperature))),
            humidity,
            ControlInputData::ok(ControlData::sensor(2, SensorReading::Indication(raining))),
            ControlInputData::ok(ControlData::rtc(0, self.clock)),
            ControlInputData::ok(ControlData::i2c_scan(0, I2cScanReading::full_scan(bus))),
            ControlInputData::ok(ControlData::i2c_scan(0, display_check)),
        ]
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();

    let mut console = SerialConsole::new(StdoutPort::new(), SerialConsoleConfig::default());
    if let Err(e) = OutputComponent::init(&mut console) {
        // Keep running: output is dropped until the channel opens.
        warn!("Serial console unavailable: {}", e);
    }

    let mut inputs = MockInputs::new();

    for _ in 0..POLL_CYCLES {
        for input in inputs.poll() {
            if let Some(record) = input.error_record() {
                warn!("{:?}: {}", record.component, record.error);
                continue;
            }
            if let Err(e) = forward_to_outputs(&input.data, &mut [&mut console]) {
                warn!("Record dropped: {}", e);
            }
        }

        // An unused slot must be rejected without printing anything.
        let unused = ControlData::new(
            DeviceDescriptor::UNUSED,
            ControlReading::Sensor(SensorReading::Value(0.0)),
        );
        match console.display_data(&unused) {
            Err(e) => debug!("Unused slot rejected: {}", e),
            Ok(()) => warn!("Unused slot was displayed"),
        }

        if let Err(e) = embedded_io::Write::flush(console.port_mut()) {
            warn!("stdout flush failed: {:?}", e);
        }
        thread::sleep(POLL_INTERVAL);
    }

    info!("Simulation finished after {} cycles", POLL_CYCLES);
}
