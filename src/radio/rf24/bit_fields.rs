use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, PaLevel, StatusFlags};

use super::mnemonics;

/// The CONFIG register.
///
/// The IRQ bits here are *masks*: a set bit keeps the event off the IRQ pin.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    #[bits(3, access = None)]
    irq_mask: u8,

    #[bits(2, access = None, default = 3)]
    crc_length: u8,

    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    pub const fn crc_length(&self) -> CrcLength {
        CrcLength::from_bits(self.into_bits())
    }

    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_val = self.into_bits() & !CrcLength::MASK | length.into_bits();
        Self::from_bits(new_val)
    }

    /// Events that are kept off the IRQ pin (`true` means masked).
    pub const fn irq_mask(&self) -> StatusFlags {
        StatusFlags::from_bits(self.into_bits() & StatusFlags::IRQ_MASK)
    }

    pub fn with_irq_mask(self, mask: StatusFlags) -> Self {
        let new_val = self.into_bits() & !StatusFlags::IRQ_MASK;
        Self::from_bits(new_val | (mask.into_bits() & StatusFlags::IRQ_MASK))
    }

    pub fn as_rx(self) -> Self {
        Self::from_bits(self.into_bits() | mnemonics::PWR_UP | mnemonics::PRIM_RX)
    }

    pub fn as_tx(self) -> Self {
        Self::from_bits((self.into_bits() | mnemonics::PWR_UP) & !mnemonics::PRIM_RX)
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay`.
    #[bits(4, default = 5)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4, default = 15)]
    pub arc: u8,
}

/// The RF_SETUP register.
///
/// Bits outside the data rate and PA level fields (LNA gain, test modes)
/// belong to the chip and are carried through untouched.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRf {
    /// CONT_WAVE and a reserved bit.
    #[bits(2)]
    _test_modes: u8,

    #[bits(1, access = None)]
    rf_dr_low: bool,

    /// PLL_LOCK
    #[bits(1)]
    _pll_lock: u8,

    #[bits(1, access = None)]
    rf_dr_high: bool,

    #[bits(2, access = None)]
    rf_pwr: u8,

    /// LNA_HCURR on the older non-plus chips.
    #[bits(1)]
    _lna: u8,
}

impl SetupRf {
    /// Returns `None` for the reserved rate encoding.
    pub const fn data_rate(&self) -> Option<DataRate> {
        DataRate::from_bits(self.into_bits())
    }

    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_val = self.into_bits() & !DataRate::MASK;
        Self::from_bits(new_val | data_rate.into_bits())
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.into_bits())
    }

    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let new_val = self.into_bits() & !PaLevel::MASK;
        Self::from_bits(new_val | level.into_bits())
    }
}
