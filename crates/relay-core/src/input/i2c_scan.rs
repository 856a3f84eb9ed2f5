//! I2C bus scan results
//!
//! A scan either polls every 7-bit address and records the responders in a
//! bitmap, or polls one address and records its transmission status byte.

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource, SevenBitAddress};

use crate::control::ControlError;

/// Highest address reachable with 7-bit I2C addressing
pub const I2C_MAX_ADDRESS: SevenBitAddress = 127;

/// Bytes needed to hold one presence bit per 7-bit address
pub const I2C_SCAN_ARRAY_SIZE: usize = (I2C_MAX_ADDRESS as usize + 8 - 1) / 8;

/// `device_address` value requesting a scan of the whole bus.
/// Zero is the general call address, never a real device.
pub const SCAN_ALL_DEVICES: SevenBitAddress = 0;

/// Presence bitmap of devices found on the bus.
///
/// Address `a` lives in byte `a / 8`, bit `a % 8` (LSB first). Only
/// addresses `1..=127` are meaningful; bit 0 is never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I2cAddressMap {
    bits: [u8; I2C_SCAN_ARRAY_SIZE],
}

impl I2cAddressMap {
    pub const fn new() -> Self {
        Self {
            bits: [0; I2C_SCAN_ARRAY_SIZE],
        }
    }

    /// Build a map from raw bitmap bytes as filled in by a scanner.
    /// Bit 0 (general call) is masked off.
    pub const fn from_bytes(mut bits: [u8; I2C_SCAN_ARRAY_SIZE]) -> Self {
        bits[0] &= !1;
        Self { bits }
    }

    pub const fn as_bytes(&self) -> &[u8; I2C_SCAN_ARRAY_SIZE] {
        &self.bits
    }

    const fn is_valid(address: SevenBitAddress) -> bool {
        address != SCAN_ALL_DEVICES && address <= I2C_MAX_ADDRESS
    }

    /// Mark `address` as present. Returns `false` for addresses outside `1..=127`.
    pub fn set(&mut self, address: SevenBitAddress) -> bool {
        if !Self::is_valid(address) {
            return false;
        }
        self.bits[address as usize / 8] |= 1 << (address % 8);
        true
    }

    pub fn clear(&mut self, address: SevenBitAddress) {
        if Self::is_valid(address) {
            self.bits[address as usize / 8] &= !(1 << (address % 8));
        }
    }

    pub const fn contains(&self, address: SevenBitAddress) -> bool {
        Self::is_valid(address) && self.bits[address as usize / 8] & (1 << (address % 8)) != 0
    }

    /// Number of devices present
    pub fn count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// First present address strictly greater than `address`
    pub fn next_present_after(&self, address: SevenBitAddress) -> Option<SevenBitAddress> {
        (address.saturating_add(1)..=I2C_MAX_ADDRESS).find(|&a| self.contains(a))
    }

    /// Present addresses in ascending order
    pub fn iter(&self) -> PresentAddresses<'_> {
        PresentAddresses {
            map: self,
            cursor: SCAN_ALL_DEVICES,
        }
    }
}

impl<'a> IntoIterator for &'a I2cAddressMap {
    type Item = SevenBitAddress;
    type IntoIter = PresentAddresses<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<SevenBitAddress> for I2cAddressMap {
    fn from_iter<T: IntoIterator<Item = SevenBitAddress>>(iter: T) -> Self {
        let mut map = Self::new();
        for address in iter {
            map.set(address);
        }
        map
    }
}

/// Lazy ascending walk over the set bits of an [`I2cAddressMap`]
pub struct PresentAddresses<'a> {
    map: &'a I2cAddressMap,
    cursor: SevenBitAddress,
}

impl Iterator for PresentAddresses<'_> {
    type Item = SevenBitAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.map.next_present_after(self.cursor)?;
        self.cursor = next;
        Some(next)
    }
}

/// Transmission result byte of a single-device check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum I2cStatus {
    Success = 0,
    /// Data too long to fit in the transmit buffer
    DataTooLong = 1,
    /// NACK received while sending the address
    NackAddress = 2,
    /// NACK received while sending data
    NackData = 3,
    /// Anything else: arbitration lost, bus error, ...
    Unknown = 4,
}

impl I2cStatus {
    pub const fn from_byte(status: u8) -> Self {
        match status {
            0 => Self::Success,
            1 => Self::DataTooLong,
            2 => Self::NackAddress,
            3 => Self::NackData,
            _ => Self::Unknown,
        }
    }

    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Short token shown on text outputs
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::DataTooLong => "TOOLONG",
            Self::NackAddress => "NACKADR",
            Self::NackData => "NACKDAT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl From<ErrorKind> for I2cStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => Self::NackAddress,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => Self::NackData,
            _ => Self::Unknown,
        }
    }
}

/// Which kind of scan an [`I2cScanReading`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    AllDevices,
    SingleDevice(SevenBitAddress),
}

impl ScanMode {
    /// Decode a `device_address` field. `None` for addresses above 127.
    pub const fn from_device_address(device_address: SevenBitAddress) -> Option<Self> {
        match device_address {
            SCAN_ALL_DEVICES => Some(Self::AllDevices),
            a if a <= I2C_MAX_ADDRESS => Some(Self::SingleDevice(a)),
            _ => None,
        }
    }
}

/// Result of an I2C scan.
///
/// `device_address` selects the meaningful payload: `0` means `addresses`
/// holds a full bus scan, `1..=127` means `single_device_status` holds the
/// transmission result for that one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I2cScanReading {
    pub addresses: I2cAddressMap,
    pub single_device_status: u8,
    pub device_address: SevenBitAddress,
    /// Iteration cursor over `addresses`, `0` before the first device
    pub current_address: SevenBitAddress,
}

impl I2cScanReading {
    pub const fn full_scan(addresses: I2cAddressMap) -> Self {
        Self {
            addresses,
            single_device_status: I2cStatus::Success as u8,
            device_address: SCAN_ALL_DEVICES,
            current_address: SCAN_ALL_DEVICES,
        }
    }

    /// Result of probing one address. `None` for `0`, which selects a full
    /// scan, and for addresses above [`I2C_MAX_ADDRESS`].
    pub const fn single_device(address: SevenBitAddress, status: I2cStatus) -> Option<Self> {
        if address == SCAN_ALL_DEVICES || address > I2C_MAX_ADDRESS {
            return None;
        }
        Some(Self {
            addresses: I2cAddressMap::new(),
            single_device_status: status as u8,
            device_address: address,
            current_address: SCAN_ALL_DEVICES,
        })
    }

    pub const fn mode(&self) -> Option<ScanMode> {
        ScanMode::from_device_address(self.device_address)
    }

    pub const fn status(&self) -> I2cStatus {
        I2cStatus::from_byte(self.single_device_status)
    }

    /// Move `current_address` to the next present device.
    ///
    /// Returns `false` and leaves the cursor untouched once the last device
    /// has been visited.
    pub fn advance_to_next_address(&mut self) -> bool {
        match self.addresses.next_present_after(self.current_address) {
            Some(next) => {
                self.current_address = next;
                true
            }
            None => false,
        }
    }

    pub fn reset_cursor(&mut self) {
        self.current_address = SCAN_ALL_DEVICES;
    }
}

/// Result of an I2C scan operation
pub type I2cScanReturn = Result<I2cScanReading, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_size() {
        assert_eq!(I2C_SCAN_ARRAY_SIZE, 16);
    }

    #[test]
    fn test_bit_layout_is_lsb_first() {
        let mut map = I2cAddressMap::new();
        assert!(map.set(5));
        assert!(map.set(64));
        assert_eq!(map.as_bytes()[0], 0b0010_0000);
        assert_eq!(map.as_bytes()[8], 0b0000_0001);
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let mut map = I2cAddressMap::new();
        assert!(!map.set(0));
        assert!(!map.set(128));
        assert!(map.is_empty());
        assert!(!map.contains(200));
    }

    #[test]
    fn test_from_bytes_masks_general_call() {
        let map = I2cAddressMap::from_bytes([0xFF; I2C_SCAN_ARRAY_SIZE]);
        assert!(!map.contains(0));
        assert_eq!(map.count(), 127);
        assert_eq!(map.iter().next(), Some(1));
        assert_eq!(map.iter().last(), Some(127));
    }

    #[test]
    fn test_iter_ascending() {
        let map: I2cAddressMap = [0x68, 0x3C, 0x76, 0x01].into_iter().collect();
        let mut found = heapless::Vec::<u8, 8>::new();
        for a in &map {
            found.push(a).unwrap();
        }
        assert_eq!(found.as_slice(), &[0x01, 0x3C, 0x68, 0x76]);
    }

    #[test]
    fn test_clear() {
        let mut map: I2cAddressMap = [10, 20].into_iter().collect();
        map.clear(10);
        assert!(!map.contains(10));
        assert_eq!(map.count(), 1);
    }

    #[test]
    fn test_cursor_walks_present_devices() {
        let map: I2cAddressMap = [0x20, 0x48, 0x7F].into_iter().collect();
        let mut reading = I2cScanReading::full_scan(map);

        assert!(reading.advance_to_next_address());
        assert_eq!(reading.current_address, 0x20);
        assert!(reading.advance_to_next_address());
        assert_eq!(reading.current_address, 0x48);
        assert!(reading.advance_to_next_address());
        assert_eq!(reading.current_address, 0x7F);
        assert!(!reading.advance_to_next_address());
        assert_eq!(reading.current_address, 0x7F);

        reading.reset_cursor();
        assert!(reading.advance_to_next_address());
        assert_eq!(reading.current_address, 0x20);
    }

    #[test]
    fn test_cursor_on_empty_map() {
        let mut reading = I2cScanReading::full_scan(I2cAddressMap::new());
        assert!(!reading.advance_to_next_address());
        assert_eq!(reading.current_address, 0);
    }

    #[test]
    fn test_scan_mode() {
        assert_eq!(ScanMode::from_device_address(0), Some(ScanMode::AllDevices));
        assert_eq!(
            ScanMode::from_device_address(0x3C),
            Some(ScanMode::SingleDevice(0x3C))
        );
        assert_eq!(
            ScanMode::from_device_address(127),
            Some(ScanMode::SingleDevice(127))
        );
        assert_eq!(ScanMode::from_device_address(128), None);
    }

    #[test]
    fn test_single_device_address_range() {
        assert_eq!(I2cScanReading::single_device(0, I2cStatus::Success), None);
        assert_eq!(I2cScanReading::single_device(128, I2cStatus::Success), None);

        let reading = I2cScanReading::single_device(0x7F, I2cStatus::NackData).unwrap();
        assert_eq!(reading.mode(), Some(ScanMode::SingleDevice(0x7F)));
        assert_eq!(reading.status(), I2cStatus::NackData);
        assert!(reading.addresses.is_empty());
    }

    #[test]
    fn test_status_decoding() {
        assert_eq!(I2cStatus::from_byte(0), I2cStatus::Success);
        assert_eq!(I2cStatus::from_byte(2), I2cStatus::NackAddress);
        assert_eq!(I2cStatus::from_byte(99), I2cStatus::Unknown);
        assert_eq!(I2cStatus::NackData.as_byte(), 3);
    }

    #[test]
    fn test_status_from_hal_error() {
        assert_eq!(
            I2cStatus::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            I2cStatus::NackAddress
        );
        assert_eq!(
            I2cStatus::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
            I2cStatus::NackData
        );
        assert_eq!(I2cStatus::from(ErrorKind::ArbitrationLoss), I2cStatus::Unknown);
    }
}
