use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
mod auto_ack;
pub(crate) mod bit_fields;
mod channel;
mod init;
mod constants;
mod crc_length;
mod fifo;
mod payload_length;
mod pipe;
mod power;
mod radio;
mod rf_setup;
pub use constants::{commands, mnemonics, registers, timing, MAX_PAYLOAD};
mod details;
mod status;
use pipe::Pipe0Address;

use super::prelude::{EsbFifo, EsbPower};
use crate::{poll::Clock, PowerState, StatusFlags};

/// A collection of error types to describe hardware malfunctions and
/// rejected requests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RadioError<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO).
    ///
    /// Reported when a register reads back an encoding the chip never produces.
    BinaryCorruption,
    /// A register did not read back the value that was just written.
    ConfigurationRejected,
    /// A bounded wait ran out of time.
    Timeout,
    /// The chip exhausted its automatic retransmissions without an acknowledgement.
    MaxRetriesExceeded,
    /// The pipe number is not in range [0, 5] (or the chip reported no valid pipe).
    InvalidPipe(u8),
    /// A payload, address or width is outside what the chip supports.
    InvalidLength,
}

#[cfg(feature = "defmt")]
impl<SPI, DO> defmt::Format for RadioError<SPI, DO> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RadioError::Spi(_) => defmt::write!(fmt, "SPI error"),
            RadioError::Gpo(_) => defmt::write!(fmt, "GPIO error"),
            RadioError::BinaryCorruption => defmt::write!(fmt, "BinaryCorruption"),
            RadioError::ConfigurationRejected => defmt::write!(fmt, "ConfigurationRejected"),
            RadioError::Timeout => defmt::write!(fmt, "Timeout"),
            RadioError::MaxRetriesExceeded => defmt::write!(fmt, "MaxRetriesExceeded"),
            RadioError::InvalidPipe(pipe) => defmt::write!(fmt, "InvalidPipe({=u8})", pipe),
            RadioError::InvalidLength => defmt::write!(fmt, "InvalidLength"),
        }
    }
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// All driver state lives here: the bus handle, the control pins, the
/// last confirmed [`PowerState`], the configured address width and what
/// pipe 0 currently holds. Nothing is global, so several radios can be
/// driven from one program as long as each has its own [`SpiDevice`].
pub struct RadioDevice<SPI, DO, DELAY, CLK> {
    _spi: SPI,
    /// The CE pin for the radio.
    ///
    /// This is really only exposed for advanced manipulation of active TX mode.
    /// It is strongly recommended to change modes using
    /// [`EsbPower::enter_rx()`] and [`EsbPower::enter_tx()`] because those
    /// methods keep [`RadioDevice::power_state()`](fn@crate::radio::prelude::EsbPower::power_state)
    /// truthful.
    pub ce_pin: DO,
    _power_pin: Option<DO>,
    _delay_impl: DELAY,
    _clock: CLK,
    _buf: [u8; MAX_PAYLOAD + 1],
    _status: StatusFlags,
    _power_state: PowerState,
    _address_width: u8,
    _pipe0: Pipe0Address,
}

impl<SPI, DO, DELAY, CLK> RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    /// Instantiate a [`RadioDevice`] object for use on the specified
    /// `spi` bus with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    ///
    /// The `clock` bounds every busy-wait (see [`Clock`]). The radio is
    /// assumed to be in [`PowerState::Down`] with 5 byte addresses.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY, clock: CLK) -> Self {
        RadioDevice {
            _spi: spi,
            ce_pin,
            _power_pin: None,
            _delay_impl: delay_impl,
            _clock: clock,
            _buf: [0u8; MAX_PAYLOAD + 1],
            _status: StatusFlags::from_bits(0),
            _power_state: PowerState::Down,
            _address_width: 5,
            _pipe0: Pipe0Address::Unset,
        }
    }

    /// Attach an output pin that switches the radio's supply.
    ///
    /// When present, it is driven high (followed by a settling delay) each time
    /// the radio leaves [`PowerState::Down`], and driven low by
    /// [`EsbPower::power_down()`].
    pub fn with_power_pin(self, power_pin: DO) -> Self {
        RadioDevice {
            _power_pin: Some(power_pin),
            ..self
        }
    }

    /// Release the peripherals: `(spi, ce_pin, power_pin, delay, clock)`.
    ///
    /// After a [`EsbPower::power_down()`], the host may reconfigure the SPI
    /// clock and data lines as plain outputs held low to avoid back-powering
    /// the radio.
    ///
    /// Driver state (the saved pipe 0 address and the cached address width)
    /// is dropped here; see [`EsbPower::power_down()`] for restoring it.
    pub fn free(self) -> (SPI, DO, Option<DO>, DELAY, CLK) {
        (
            self._spi,
            self.ce_pin,
            self._power_pin,
            self._delay_impl,
            self._clock,
        )
    }

    fn spi_transfer(&mut self, len: usize) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len])
            .map_err(RadioError::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// Send a single byte command and return the STATUS byte clocked out with it.
    /// ```ignore
    /// let status = self.command(commands::NOP)?;
    /// ```
    pub(crate) fn command(
        &mut self,
        opcode: u8,
    ) -> Result<StatusFlags, RadioError<SPI::Error, DO::Error>> {
        self._buf[0] = opcode;
        trace!("spi command {=u8:#x}", opcode);
        self.spi_transfer(1)?;
        Ok(self._status)
    }

    /// Send `opcode` then clock `dest.len()` bytes out of the chip.
    ///
    /// The filler bytes sent on MOSI are always 0.
    pub(crate) fn burst_read(
        &mut self,
        opcode: u8,
        dest: &mut [u8],
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        let len = dest.len();
        if len > MAX_PAYLOAD {
            return Err(RadioError::InvalidLength);
        }
        self._buf[0] = opcode;
        self._buf[1..=len].fill(0);
        trace!("spi read {=u8:#x} ({=usize} bytes)", opcode, len);
        self.spi_transfer(len + 1)?;
        dest.copy_from_slice(&self._buf[1..=len]);
        Ok(())
    }

    /// Send `opcode` followed by `bytes` and return the STATUS byte.
    pub(crate) fn burst_write(
        &mut self,
        opcode: u8,
        bytes: &[u8],
    ) -> Result<StatusFlags, RadioError<SPI::Error, DO::Error>> {
        let len = bytes.len();
        if len > MAX_PAYLOAD {
            return Err(RadioError::InvalidLength);
        }
        self._buf[0] = opcode;
        self._buf[1..=len].copy_from_slice(bytes);
        trace!("spi write {=u8:#x} ({=usize} bytes)", opcode, len);
        self.spi_transfer(len + 1)?;
        Ok(self._status)
    }

    pub(crate) fn read_register(
        &mut self,
        register: u8,
    ) -> Result<u8, RadioError<SPI::Error, DO::Error>> {
        let mut value = [0u8];
        self.read_register_buf(register, &mut value)?;
        Ok(value[0])
    }

    pub(crate) fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<StatusFlags, RadioError<SPI::Error, DO::Error>> {
        self.write_register_buf(register, &[value])
    }

    /// Read a multi-byte register (an address) in the order the chip sends it (LSByte first).
    pub(crate) fn read_register_buf(
        &mut self,
        register: u8,
        dest: &mut [u8],
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.burst_read(
            commands::R_REGISTER | (register & commands::REGISTER_MASK),
            dest,
        )
    }

    /// Write a multi-byte register (an address) in the order the chip expects (LSByte first).
    pub(crate) fn write_register_buf(
        &mut self,
        register: u8,
        bytes: &[u8],
    ) -> Result<StatusFlags, RadioError<SPI::Error, DO::Error>> {
        self.burst_write(
            commands::W_REGISTER | (register & commands::REGISTER_MASK),
            bytes,
        )
    }

    /// Is a carrier above -64 dBm present on the current channel?
    ///
    /// This enters RX mode (if not already active) and listens for the minimum
    /// time the chip needs before the Received Power Detector is meaningful.
    pub fn rpd(&mut self) -> Result<bool, RadioError<SPI::Error, DO::Error>> {
        self.enter_rx()?;
        self._delay_impl.delay_us(timing::RPD_SETTLE_US);
        Ok(self.read_register(registers::RPD)? & 1 == 1)
    }

    /// A crude signal strength figure for the current channel.
    ///
    /// Takes 256 [`RadioDevice::rpd()`] samples (flushing anything received
    /// between samples) and returns how many of them detected a carrier.
    pub fn rssi(&mut self) -> Result<u16, RadioError<SPI::Error, DO::Error>> {
        let mut count = 0u16;
        for _ in 0..256 {
            if self.rpd()? {
                count += 1;
            }
            self.flush_rx()?;
        }
        debug!("rssi sampled {=u16}/256", count);
        Ok(count)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, RadioError};
    use crate::{
        radio::prelude::EsbPower,
        spi_test_expects,
        test::{mk_radio, sim_radio},
        PowerState,
    };
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::vec;

    #[test]
    fn framing() {
        let spi_expectations = spi_test_expects![
            (vec![commands::NOP], vec![0x2Eu8]),
            (vec![registers::RF_CH, 0u8], vec![0xEu8, 76u8]),
            (
                vec![registers::RF_CH | commands::W_REGISTER, 10u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::TX_ADDR, 0, 0, 0], vec![0xEu8, 1, 2, 3]),
            (vec![commands::R_RX_PAYLOAD, 0, 0], vec![0x4Eu8, 0xAA, 0x55]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let status = radio.command(commands::NOP).unwrap();
        assert!(status.tx_ds());
        assert_eq!(radio.read_register(registers::RF_CH), Ok(76));
        assert!(!radio._status.tx_ds());
        radio.write_register(registers::RF_CH, 10).unwrap();
        let mut address = [0xFFu8; 3];
        radio
            .read_register_buf(registers::TX_ADDR, &mut address)
            .unwrap();
        assert_eq!(address, [1, 2, 3]);
        let mut payload = [0u8; 2];
        radio
            .burst_read(commands::R_RX_PAYLOAD, &mut payload)
            .unwrap();
        assert_eq!(payload, [0xAA, 0x55]);
        assert!(radio._status.rx_dr());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn oversized_burst() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let buf = [0u8; 33];
        assert_eq!(
            radio.burst_write(commands::W_TX_PAYLOAD, &buf),
            Err(RadioError::InvalidLength)
        );
        let mut buf = [0u8; 33];
        assert_eq!(
            radio.burst_read(commands::R_RX_PAYLOAD, &mut buf),
            Err(RadioError::InvalidLength)
        );
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn rpd_while_listening() {
        let spi_expectations = spi_test_expects![
            // get the RPD register value
            (vec![registers::RPD, 0u8], vec![0xEu8, 0xFFu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio._power_state = PowerState::ReceiveActive;
        assert!(radio.rpd().unwrap());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn rssi_counts_detections() {
        let mut radio = sim_radio();
        radio.enter_rx().unwrap();
        radio._spi.regs[registers::RPD as usize] = 1;
        assert_eq!(radio.rssi(), Ok(256));
        radio._spi.regs[registers::RPD as usize] = 0;
        assert_eq!(radio.rssi(), Ok(0));
    }

    #[test]
    fn power_pin_follows_power_state() {
        let power_expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let ce_expectations = [
            // enter_idle()
            PinTransaction::set(PinState::Low),
            // power_down()
            PinTransaction::set(PinState::Low),
        ];
        let spi_expectations = spi_test_expects![
            // unlock FEATURE bits
            (
                vec![registers::FEATURE | commands::W_REGISTER, 5u8],
                vec![0xEu8, 0u8],
            ),
            // clear the status flags
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            // clear PWR_UP and verify
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0xCu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xCu8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0xCu8]),
            // power_down()
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0xCu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xCu8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let mut power_pin = embedded_hal_mock::eh1::digital::Mock::new(&power_expectations);
        let mut radio = radio.with_power_pin(power_pin.clone());
        radio.enter_idle().unwrap();
        assert_eq!(radio.power_state(), PowerState::IdleReady);
        radio.power_down().unwrap();
        assert_eq!(radio.power_state(), PowerState::Down);
        let (_, _, released, _, _) = radio.free();
        assert!(released.is_some());
        spi.done();
        ce_pin.done();
        power_pin.done();
    }
}
