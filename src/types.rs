//! This module defines types used by various traits.
//! These types are meant to be agnostic of the trait implementation.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "-18 dBm"),
            PaLevel::Low => defmt::write!(fmt, "-12 dBm"),
            PaLevel::High => defmt::write!(fmt, "-6 dBm"),
            PaLevel::Max => defmt::write!(fmt, "0 dBm"),
        }
    }
}

impl PaLevel {
    pub(crate) const MASK: u8 = 6;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "-18 dBm"),
            PaLevel::Low => write!(f, "-12 dBm"),
            PaLevel::High => write!(f, "-6 dBm"),
            PaLevel::Max => write!(f, "0 dBm"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps
    Kbps250,
}

impl DataRate {
    /// RF_DR_LOW (bit 5) and RF_DR_HIGH (bit 3) of the RF_SETUP register.
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }

    /// Returns `None` for the reserved encoding (both bits set).
    pub(crate) const fn from_bits(value: u8) -> Option<Self> {
        match value & Self::MASK {
            0 => Some(DataRate::Mbps1),
            0x8 => Some(DataRate::Mbps2),
            0x20 => Some(DataRate::Kbps250),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// The length of a CRC checksum that is used (if any).
///
/// Cyclical Redundancy Checking (CRC) is commonly used to ensure data integrity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrcLength {
    /// represents no CRC checksum is used
    Disabled,
    /// represents CRC 8 bit checksum is used
    Bit8,
    /// represents CRC 16 bit checksum is used
    Bit16,
}

impl CrcLength {
    /// EN_CRC (bit 3) and CRCO (bit 2) of the CONFIG register.
    pub(crate) const MASK: u8 = 0b1100;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcLength::Disabled => 0,
            CrcLength::Bit8 => 8,
            CrcLength::Bit16 => 12,
        }
    }

    /// CRCO is meaningless while EN_CRC is clear.
    pub(crate) const fn from_bits(value: u8) -> Self {
        if value & 8 == 0 {
            CrcLength::Disabled
        } else if value & 4 == 0 {
            CrcLength::Bit8
        } else {
            CrcLength::Bit16
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for CrcLength {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcLength::Disabled => defmt::write!(fmt, "disabled"),
            CrcLength::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcLength::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

impl Display for CrcLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcLength::Disabled => write!(f, "disabled"),
            CrcLength::Bit8 => write!(f, "8 bit"),
            CrcLength::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The radio's operating mode as last confirmed by reading the CONFIG register back.
///
/// | state | PWR_UP | PRIM_RX | CE |
/// |-------|:------:|:-------:|:--:|
/// | [`PowerState::Down`] | 0 | - | 0 |
/// | [`PowerState::IdleReady`] | 0 | - | 0 |
/// | [`PowerState::ReceiveActive`] | 1 | 1 | 1 |
/// | [`PowerState::TransmitActive`] | 1 | 0 | 1 |
///
/// [`PowerState::Down`] differs from [`PowerState::IdleReady`] in that the chip
/// (and its optional supply switch) has not been brought up since the last
/// power down, so the one-time feature unlock must be repeated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerState {
    /// Radio unpowered; control lines held low.
    Down,
    /// Powered, oscillator stable, neither RX nor TX armed.
    IdleReady,
    /// Listening (PRIM_RX set, CE high).
    ReceiveActive,
    /// Transmitting (PRIM_RX clear, CE high).
    TransmitActive,
}

#[cfg(feature = "defmt")]
impl defmt::Format for PowerState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PowerState::Down => defmt::write!(fmt, "Down"),
            PowerState::IdleReady => defmt::write!(fmt, "IdleReady"),
            PowerState::ReceiveActive => defmt::write!(fmt, "ReceiveActive"),
            PowerState::TransmitActive => defmt::write!(fmt, "TransmitActive"),
        }
    }
}

impl Display for PowerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PowerState::Down => write!(f, "Down"),
            PowerState::IdleReady => write!(f, "IdleReady"),
            PowerState::ReceiveActive => write!(f, "ReceiveActive"),
            PowerState::TransmitActive => write!(f, "TransmitActive"),
        }
    }
}

/// A snapshot of the STATUS register.
///
/// Every SPI transaction clocks the STATUS byte out first, so this is refreshed
/// as a side effect of any bus access.
///
/// To instantiate an object with flags that have different values:
/// ```
/// use rf24link::StatusFlags;
///
/// let flags = StatusFlags::default() // all flags are false
///     .with_rx_dr(true); // assert only `rx_dr` flags
/// assert!(flags.rx_dr());
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all flags set to true.
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if the maximum number of retransmits was reached.
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// The pipe that received the payload at the top of the RX FIFO.
    ///
    /// `6` is unused and `7` means the RX FIFO is empty.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// Is the TX FIFO full?
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all fields are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(0x70)
    }

    fn with_flag(self, offset: usize, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << offset);
        Self::from_bits(new_val | ((flag as u8) << offset))
    }

    /// A flag to describe if RX Data Ready to read.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        self.with_flag(Self::RX_DR_OFFSET, flag)
    }

    /// A flag to describe if TX Data Sent.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        self.with_flag(Self::TX_DS_OFFSET, flag)
    }

    /// A flag to describe if the maximum number of retransmits was reached.
    pub fn with_max_rt(self, flag: bool) -> Self {
        self.with_flag(Self::MAX_RT_OFFSET, flag)
    }

    /// Is the 3-bit pipe field pointing at a real pipe (0 - 5)?
    pub fn has_valid_pipe(&self) -> bool {
        self.rx_pipe() < 6
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

#[cfg(test)]
mod test {
    use crate::{PowerState, StatusFlags};

    use super::{CrcLength, DataRate, FifoState, PaLevel};
    extern crate std;
    use std::{format, string::String};

    #[test]
    fn display_enums() {
        assert_eq!(format!("{}", CrcLength::Bit8), String::from("8 bit"));
        assert_eq!(format!("{}", CrcLength::Bit16), String::from("16 bit"));
        assert_eq!(format!("{}", CrcLength::Disabled), String::from("disabled"));
        assert_eq!(format!("{}", FifoState::Occupied), String::from("Occupied"));
        assert_eq!(format!("{}", DataRate::Kbps250), String::from("250 Kbps"));
        assert_eq!(format!("{}", PaLevel::Min), String::from("-18 dBm"));
        assert_eq!(format!("{}", PaLevel::Max), String::from("0 dBm"));
        assert_eq!(
            format!("{}", PowerState::ReceiveActive),
            String::from("ReceiveActive")
        );
    }

    #[test]
    fn crc_bits() {
        for crc in [CrcLength::Disabled, CrcLength::Bit8, CrcLength::Bit16] {
            assert_eq!(CrcLength::from_bits(crc.into_bits()), crc);
        }
        // CRCO without EN_CRC still means disabled
        assert_eq!(CrcLength::from_bits(4), CrcLength::Disabled);
    }

    #[test]
    fn data_rate_bits() {
        assert_eq!(DataRate::from_bits(0x27), Some(DataRate::Kbps250));
        assert_eq!(DataRate::from_bits(0x0F), Some(DataRate::Mbps2));
        assert_eq!(DataRate::from_bits(0x07), Some(DataRate::Mbps1));
        assert_eq!(DataRate::from_bits(0x28), None);
    }

    #[test]
    fn pa_level_bits() {
        assert_eq!(PaLevel::from_bits(0x0F), PaLevel::Max);
        assert_eq!(PaLevel::from_bits(0x23), PaLevel::Low);
        assert_eq!(PaLevel::from_bits(0x01), PaLevel::Min);
    }

    #[test]
    fn display_flags() {
        assert_eq!(
            format!("{}", StatusFlags::default()),
            String::from("StatusFlags rx_dr: false, tx_ds: false, max_rt: false")
        );
    }

    fn set_flags(rx_dr: bool, tx_ds: bool, max_rt: bool) {
        let flags = StatusFlags::default()
            .with_rx_dr(rx_dr)
            .with_tx_ds(tx_ds)
            .with_max_rt(max_rt);
        assert_eq!(flags.rx_dr(), rx_dr);
        assert_eq!(flags.tx_ds(), tx_ds);
        assert_eq!(flags.max_rt(), max_rt);
    }

    #[test]
    fn flags_0x50() {
        set_flags(true, false, true);
    }

    #[test]
    fn flags_0x20() {
        set_flags(false, true, false);
    }

    #[test]
    fn pipe_field() {
        let flags = StatusFlags::from_bits(0x0E);
        assert_eq!(flags.rx_pipe(), 7);
        assert!(!flags.has_valid_pipe());
        let flags = StatusFlags::from_bits(0x4A);
        assert!(flags.rx_dr());
        assert_eq!(flags.rx_pipe(), 5);
        assert!(flags.has_valid_pipe());
    }
}
