/// A private module encapsulating register offsets for the nRF24L01.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const OBSERVE_TX: u8 = 0x08;
    pub const RPD: u8 = 0x09;
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const RX_ADDR_P1: u8 = 0x0B;
    pub const TX_ADDR: u8 = 0x10;
    pub const RX_PW_P0: u8 = 0x11;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// A private module encapsulating SPI commands for the nRF24L01.
pub mod commands {
    pub const R_REGISTER: u8 = 0x00;
    pub const W_REGISTER: u8 = 0x20;
    /// Register addresses are 5 bits wide.
    pub const REGISTER_MASK: u8 = 0x1F;
    pub const R_RX_PL_WID: u8 = 0x60;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const W_TX_PAYLOAD_NO_ACK: u8 = 0xB0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const NOP: u8 = 0xFF;
}

/// A private module to encapsulate bit mnemonics
pub mod mnemonics {
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;
    pub const EN_CRC: u8 = 1 << 3;
    pub const CRCO: u8 = 1 << 2;
    pub const PWR_UP: u8 = 1 << 1;
    pub const PRIM_RX: u8 = 1;
    /// FIFO_STATUS: the RX FIFO holds nothing.
    pub const RX_EMPTY: u8 = 1;
    /// FEATURE: allow dynamic payload lengths.
    pub const EN_DPL: u8 = 1 << 2;
    /// FEATURE: allow the W_TX_PAYLOAD_NO_ACK command.
    pub const EN_DYN_ACK: u8 = 1;
}

/// Timing figures from the nRF24L01+ datasheet, plus the driver's own bounds.
pub mod timing {
    /// Settling time for the optional supply switch.
    pub const POWER_SWITCH_SETTLE_MS: u32 = 300;
    /// Guard delay before the first register access after power is applied.
    pub const POWER_ON_GUARD_MS: u32 = 100;
    /// Standby to active RX/TX (t<sub>stby2a</sub>).
    pub const STANDBY_TO_ACTIVE_US: u32 = 130;
    /// Minimum RX dwell before RPD reflects the channel.
    pub const RPD_SETTLE_US: u32 = 200;
    /// Upper bound on one transmission including all auto-retries.
    pub const SEND_TIMEOUT_MS: u32 = 2000;
}

/// The largest payload the FIFOs can carry.
pub const MAX_PAYLOAD: usize = 32;
