use embedded_io::Write;

/// Byte sink behind the serial console.
///
/// Implementations wrap a UART, a USB CDC class or anything else that can
/// be opened at a baud rate and written to.
pub trait SerialPort: Write {
    /// Bring up the channel at `baud_rate`.
    ///
    /// Must not wait for a host terminal to attach. A port whose peripheral
    /// is up but has nobody listening reports `Ok`.
    fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error>;
}
