use crate::{CrcLength, DataRate, PaLevel, StatusFlags};

/// Per-pipe settings applied by
/// [`EsbInit::with_config()`](fn@crate::radio::prelude::EsbInit::with_config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeConfig {
    enabled: bool,
    auto_ack: bool,
    payload_length: u8,
}

impl Default for PipeConfig {
    /// A closed pipe with auto-ack and dynamic payloads.
    fn default() -> Self {
        Self {
            enabled: false,
            auto_ack: true,
            payload_length: 0,
        }
    }
}

impl PipeConfig {
    /// Is the pipe accepting packets?
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn with_enabled(self, enable: bool) -> Self {
        Self {
            enabled: enable,
            ..self
        }
    }

    pub const fn auto_ack(&self) -> bool {
        self.auto_ack
    }

    pub fn with_auto_ack(self, enable: bool) -> Self {
        Self {
            auto_ack: enable,
            ..self
        }
    }

    /// The static payload length. `0` means dynamic payloads.
    pub const fn payload_length(&self) -> u8 {
        self.payload_length
    }

    /// Set the static payload length (clamped to 32). `0` selects dynamic payloads.
    pub fn with_payload_length(self, length: u8) -> Self {
        Self {
            payload_length: length.min(32),
            ..self
        }
    }
}

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then chain `with_*()` calls.
/// ```
/// use rf24link::radio::RadioConfig;
/// use rf24link::CrcLength;
///
/// let config = RadioConfig::default()
///     .with_channel(42)
///     .with_crc_length(CrcLength::Bit8);
/// assert_eq!(config.channel(), 42);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    channel: u8,
    crc_length: CrcLength,
    address_width: u8,
    auto_retry_delay: u8,
    auto_retry_count: u8,
    data_rate: DataRate,
    pa_level: PaLevel,
    irq_mask: StatusFlags,
    tx_address: [u8; 5],
    pipe0: [u8; 5],
    pipe1: [u8; 5],
    // LSByte of pipes 2 - 5
    pipe_lsb: [u8; 4],
    pipes: [PipeConfig; 6],
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `76` |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit16`] |
    /// | [`RadioConfig::address_width()`] | `5` |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] |
    /// | [`RadioConfig::auto_retry_delay()`] | `5` |
    /// | [`RadioConfig::auto_retry_count()`] | `15` |
    /// | [`RadioConfig::irq_mask()`] | nothing masked |
    /// | [`RadioConfig::tx_address()`] | `[0xE7; 5]` |
    ///
    /// ## Default RX pipes' configuration
    ///
    /// | pipe number | state  | address     |
    /// |-------------|--------|-------------|
    /// |      0      | open   | `[0xE7; 5]` |
    /// |      1      | open   | `[0xC2; 5]` |
    /// |      2[^1]  | closed | `0xC3`      |
    /// |      3[^1]  | closed | `0xC4`      |
    /// |      4[^1]  | closed | `0xC5`      |
    /// |      5[^1]  | closed | `0xC6`      |
    ///
    /// Every pipe uses auto-ack and dynamic payloads.
    ///
    /// [^1]: Pipes 2 - 5 share all but the last byte with the address on pipe 1.
    fn default() -> Self {
        let open = PipeConfig::default().with_enabled(true);
        Self {
            channel: 76,
            crc_length: CrcLength::Bit16,
            address_width: 5,
            auto_retry_delay: 5,
            auto_retry_count: 15,
            data_rate: DataRate::Mbps1,
            pa_level: PaLevel::Max,
            irq_mask: StatusFlags::from_bits(0),
            tx_address: [0xE7; 5],
            pipe0: [0xE7; 5],
            pipe1: [0xC2; 5],
            pipe_lsb: [0xC3, 0xC4, 0xC5, 0xC6],
            pipes: [
                open,
                open,
                PipeConfig::default(),
                PipeConfig::default(),
                PipeConfig::default(),
                PipeConfig::default(),
            ],
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// This value is clamped to range [0, 127].
    /// The radio's frequency can be determined by the following equation:
    /// ```text
    /// frequency (in MHz) = channel + 2400
    /// ```
    pub fn with_channel(self, value: u8) -> Self {
        Self {
            channel: value.min(127),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.crc_length
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    ///
    /// [`CrcLength::Disabled`] is only accepted when auto-ack is off on every pipe.
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        Self {
            crc_length: length,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_address_width()`].
    pub const fn address_width(&self) -> u8 {
        self.address_width
    }

    /// The address width shared by every pipe.
    ///
    /// This value is clamped to range [3, 5].
    pub fn with_address_width(self, value: u8) -> Self {
        Self {
            address_width: value.clamp(3, 5),
            ..self
        }
    }

    /// The auto-retry feature's `delay` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retry_delay
    }

    /// The auto-retry feature's `count` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retry_count
    }

    /// Set the auto-retry feature's `delay` and `count` parameters.
    ///
    /// See [`EsbAutoAck::set_auto_retries()`](crate::radio::prelude::EsbAutoAck::set_auto_retries).
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        Self {
            auto_retry_delay: delay.min(15),
            auto_retry_count: count.min(15),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// The Data Rate (over the air).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.pa_level
    }

    /// The Power Amplitude (PA) level.
    pub fn with_pa_level(self, pa_level: PaLevel) -> Self {
        Self { pa_level, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_irq_mask()`].
    pub const fn irq_mask(&self) -> StatusFlags {
        self.irq_mask
    }

    /// Choose which events are kept off the IRQ pin (a set flag means masked).
    pub fn with_irq_mask(self, mask: StatusFlags) -> Self {
        Self {
            irq_mask: StatusFlags::from_bits(mask.into_bits() & StatusFlags::IRQ_MASK),
            ..self
        }
    }

    /// Copy the TX address (MSByte first) into the given `address` buffer.
    pub fn tx_address(&self, address: &mut [u8]) {
        let len = address.len().min(5);
        address[..len].copy_from_slice(&self.tx_address[..len]);
    }

    /// Set the TX address (MSByte first). At most 5 bytes are used.
    pub fn with_tx_address(self, address: &[u8]) -> Self {
        let mut tx_address = self.tx_address;
        let len = address.len().min(5);
        tx_address[..len].copy_from_slice(&address[..len]);
        Self { tx_address, ..self }
    }

    /// Copy the address of the given `pipe` (MSByte first) into `address`.
    ///
    /// Addresses for pipes 2 - 5 are composed from pipe 1's address with the
    /// pipe's own byte in the last position of [`RadioConfig::address_width()`].
    /// Pipe numbers greater than 5 leave `address` untouched.
    pub fn rx_address(&self, pipe: u8, address: &mut [u8]) {
        let len = address.len().min(5);
        match pipe {
            0 => address[..len].copy_from_slice(&self.pipe0[..len]),
            1 => address[..len].copy_from_slice(&self.pipe1[..len]),
            2..=5 => {
                address[..len].copy_from_slice(&self.pipe1[..len]);
                let last = self.address_width as usize - 1;
                if last < len {
                    address[last] = self.pipe_lsb[pipe as usize - 2];
                }
            }
            _ => (),
        }
    }

    /// Set the address (MSByte first) of the given `pipe` and open it.
    ///
    /// Pipes 2 - 5 only keep the last byte of `address`. Empty addresses and
    /// pipe numbers greater than 5 are ignored.
    pub fn with_rx_address(self, pipe: u8, address: &[u8]) -> Self {
        let Some(&last) = address.last() else {
            return self;
        };
        if pipe > 5 {
            return self;
        }
        let mut copy = self;
        let len = address.len().min(5);
        match pipe {
            0 => copy.pipe0[..len].copy_from_slice(&address[..len]),
            1 => copy.pipe1[..len].copy_from_slice(&address[..len]),
            _ => copy.pipe_lsb[pipe as usize - 2] = last,
        }
        copy.pipes[pipe as usize] = copy.pipes[pipe as usize].with_enabled(true);
        copy
    }

    /// The settings of the given `pipe` (pipe numbers above 5 yield pipe 5).
    pub fn pipe(&self, pipe: u8) -> PipeConfig {
        self.pipes[pipe.min(5) as usize]
    }

    /// Replace the settings of the given `pipe`. Pipe numbers above 5 are ignored.
    pub fn with_pipe(self, pipe: u8, settings: PipeConfig) -> Self {
        let mut copy = self;
        if let Some(slot) = copy.pipes.get_mut(pipe as usize) {
            *slot = settings;
        }
        copy
    }

    /// Close the given `pipe`. Its address is kept.
    pub fn close_rx_pipe(self, pipe: u8) -> Self {
        let settings = self.pipe(pipe).with_enabled(false);
        self.with_pipe(pipe, settings)
    }

    /// Is auto-ack enabled on any open or closed pipe?
    pub fn any_auto_ack(&self) -> bool {
        self.pipes.iter().any(|p| p.auto_ack())
    }
}
