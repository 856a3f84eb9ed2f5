//! Serial console output
//!
//! Renders [`ControlData`] records as one line of ASCII text each:
//!
//! ```text
//! Sensor 2: 21.50
//! Sensor 3: YES
//! RTC 0: 2024-03-07 09:05:02
//! I2C 0 scan: 0x05 0x40
//! I2C 0 0x3C: 0x02 NACKADR
//! ```
//!
//! Every call is independent. The only state kept between calls is whether
//! the underlying channel has been opened.

pub mod format;
mod port;

pub use port::SerialPort;

use core::fmt::{self, Write as _};

use embedded_hal::i2c::SevenBitAddress;
use heapless::String;
use log::{debug, error, info, trace, warn};

use crate::config::{LINE_BUFFER_SIZE, LINE_ENDING, SerialConsoleConfig};
use crate::control::{ControlData, ControlError, ControlReading, ControlResult, DeviceComponent};
use crate::input::{I2cScanReading, RtcReading, ScanMode, SensorReading};
use crate::output::OutputComponent;

use format::{
    NO_DEVICES_TOKEN, format_float, format_hex_address, format_indication, format_status,
    format_timestamp,
};

type Line = String<LINE_BUFFER_SIZE>;

/// Open/closed status of the serial channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// `init` has not been called yet
    Closed,
    Open,
    /// The last `init` attempt failed
    Failed,
}

pub struct SerialConsole<P> {
    port: P,
    config: SerialConsoleConfig,
    state: ChannelState,
}

impl<P: SerialPort> SerialConsole<P> {
    pub const fn new(port: P, config: SerialConsoleConfig) -> Self {
        Self {
            port,
            config,
            state: ChannelState::Closed,
        }
    }

    pub fn config(&self) -> &SerialConsoleConfig {
        &self.config
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ChannelState::Open
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }

    /// Open the serial channel at the configured baud rate.
    ///
    /// Safe to call again: each call re-opens the port and reports the
    /// port's answer, so repeated calls against the same hardware agree.
    pub fn init(&mut self) -> ControlResult<()> {
        match self.port.open(self.config.baud_rate) {
            Ok(()) => {
                info!("Serial console open at {} baud", self.config.baud_rate);
                self.state = ChannelState::Open;
                Ok(())
            }
            Err(e) => {
                error!("Serial console open failed: {:?}", e);
                self.state = ChannelState::Failed;
                Err(ControlError::SerialInitFailed)
            }
        }
    }

    /// Render one record on the console.
    ///
    /// Sensor, RTC and I2C scan records are displayable. Any other tag, a
    /// tag that does not match its payload, or a single-device scan of an
    /// address above 127 yields [`ControlError::InvalidInputType`] and
    /// nothing is written.
    pub fn display_data(&mut self, data: &ControlData) -> ControlResult<()> {
        let id = data.device.device_id;

        match (data.device.component, &data.reading) {
            (DeviceComponent::Sensors, ControlReading::Sensor(reading)) => {
                self.display_sensor(id, reading);
            }
            (DeviceComponent::Rtc, ControlReading::Rtc(reading)) => {
                self.display_rtc(id, reading);
            }
            (DeviceComponent::I2cScan, ControlReading::I2cScan(reading)) => {
                let Some(mode) = reading.mode() else {
                    warn!(
                        "Serial console: I2C device address {:#04x} out of range",
                        reading.device_address
                    );
                    return Err(ControlError::InvalidInputType);
                };
                self.display_i2c_scan(id, mode, reading);
            }
            (component, reading) => {
                warn!(
                    "Serial console: cannot display {} #{} carrying {} reading",
                    component.label(),
                    id,
                    reading.expected_component().label()
                );
                return Err(ControlError::InvalidInputType);
            }
        }

        Ok(())
    }

    fn display_sensor(&mut self, id: u8, reading: &SensorReading) {
        debug!("Serial console: sensor #{} {:?}", id, reading);

        let line = match *reading {
            SensorReading::Value(value) => render(format_args!(
                "Sensor {}: {}",
                id,
                format_float(value, self.config.precision())
            )),
            SensorReading::Indication(indication) => render(format_args!(
                "Sensor {}: {}",
                id,
                format_indication(indication)
            )),
        };
        self.write_line(&line);
    }

    fn display_rtc(&mut self, id: u8, reading: &RtcReading) {
        debug!("Serial console: RTC #{} {:?}", id, reading);

        let line = render(format_args!("RTC {}: {}", id, format_timestamp(reading)));
        self.write_line(&line);
    }

    fn display_i2c_scan(&mut self, id: u8, mode: ScanMode, reading: &I2cScanReading) {
        debug!("Serial console: I2C #{} {:?}", id, mode);

        match mode {
            ScanMode::AllDevices => self.display_address_list(id, reading),
            ScanMode::SingleDevice(address) => {
                let line = render(format_args!(
                    "I2C {} {}: {}",
                    id,
                    format_hex_address(address),
                    format_status(reading)
                ));
                self.write_line(&line);
            }
        }
    }

    /// Up to 127 tokens do not fit a line buffer, so they are streamed.
    fn display_address_list(&mut self, id: u8, reading: &I2cScanReading) {
        let header = render(format_args!("I2C {} scan:", id));
        if !self.write(header.as_bytes()) {
            return;
        }

        let mut found = false;
        for address in &reading.addresses {
            found = true;
            if !self.write_address_token(address) {
                return;
            }
        }
        if !found && !(self.write(b" ") && self.write(NO_DEVICES_TOKEN.as_bytes())) {
            return;
        }

        self.write(LINE_ENDING.as_bytes());
    }

    fn write_address_token(&mut self, address: SevenBitAddress) -> bool {
        self.write(b" ") && self.write(format_hex_address(address).as_bytes())
    }

    fn write_line(&mut self, line: &str) {
        if self.write(line.as_bytes()) {
            self.write(LINE_ENDING.as_bytes());
        }
    }

    /// Push `bytes` to the port. Failures are logged, never returned; the
    /// result tells the caller whether the rest of the record should follow.
    fn write(&mut self, bytes: &[u8]) -> bool {
        if !self.is_open() {
            trace!("Serial console closed, dropping {} bytes", bytes.len());
            return false;
        }

        match self.port.write_all(bytes) {
            Ok(()) => true,
            Err(e) => {
                error!("Serial console write failed, dropping rest of record: {:?}", e);
                false
            }
        }
    }
}

impl<P: SerialPort> OutputComponent for SerialConsole<P> {
    fn component(&self) -> DeviceComponent {
        DeviceComponent::SerialConsole
    }

    fn init(&mut self) -> ControlResult<()> {
        SerialConsole::init(self)
    }

    fn display_data(&mut self, data: &ControlData) -> ControlResult<()> {
        SerialConsole::display_data(self, data)
    }
}

fn render(args: fmt::Arguments<'_>) -> Line {
    let mut line = Line::new();
    if line.write_fmt(args).is_err() {
        warn!("Serial console line truncated to {} bytes", LINE_BUFFER_SIZE);
    }
    line
}
