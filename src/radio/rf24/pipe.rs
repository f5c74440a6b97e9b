use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    poll::Clock,
    radio::{prelude::EsbPipe, RadioDevice, RadioError},
};

use super::registers;

/// An address together with the width it was written at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SavedAddress {
    bytes: [u8; 5],
    width: u8,
}

impl SavedAddress {
    /// Keep the first `address.len()` bytes (at most 5).
    pub fn new(address: &[u8]) -> Self {
        let width = address.len().min(5);
        let mut bytes = [0u8; 5];
        bytes[..width].copy_from_slice(&address[..width]);
        Self {
            bytes,
            width: width as u8,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.width as usize]
    }
}

/// What pipe 0's address register currently holds.
///
/// Acknowledged transmissions need pipe 0 to listen on the TX address, which
/// clobbers whatever the application assigned to pipe 0. The application's
/// address is kept here so [`EsbPower::enter_rx()`](fn@crate::radio::prelude::EsbPower::enter_rx)
/// can put it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pipe0Address {
    /// Pipe 0 was never assigned through this driver.
    Unset,
    /// Pipe 0 holds the application's address.
    Application(SavedAddress),
    /// Pipe 0 holds the TX address, borrowed for receiving ACK packets.
    AckMirror {
        mirrored: SavedAddress,
        application: Option<SavedAddress>,
    },
}

impl Pipe0Address {
    /// The address the application wants on pipe 0, if any.
    pub fn application(&self) -> Option<SavedAddress> {
        match *self {
            Pipe0Address::Unset => None,
            Pipe0Address::Application(address) => Some(address),
            Pipe0Address::AckMirror { application, .. } => application,
        }
    }
}

impl<SPI, DO, DELAY, CLK> RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    fn address_width(&self) -> usize {
        self._address_width as usize
    }

    /// Write a full-width address (given MSByte first) to an address register.
    fn write_address(
        &mut self,
        register: u8,
        address: &[u8],
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        let width = self.address_width();
        if address.len() < width {
            return Err(RadioError::InvalidLength);
        }
        let mut wire = [0u8; 5];
        wire[..width].copy_from_slice(&address[..width]);
        // the chip takes the LSByte first
        wire[..width].reverse();
        self.write_register_buf(register, &wire[..width])?;
        Ok(())
    }

    /// Read a full-width address register into `address` (MSByte first).
    fn read_address(
        &mut self,
        register: u8,
        address: &mut [u8],
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        let width = self.address_width();
        if address.len() < width {
            return Err(RadioError::InvalidLength);
        }
        self.read_register_buf(register, &mut address[..width])?;
        address[..width].reverse();
        Ok(())
    }

    fn confirm_address(
        &self,
        actual: &[u8],
        expected: &[u8],
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        let width = self.address_width();
        if actual[..width] != expected[..width] {
            warn!("address read back does not match what was written");
            return Err(RadioError::ConfigurationRejected);
        }
        Ok(())
    }

    /// Point pipe 0 at the TX address so ACK packets can be received.
    ///
    /// The application's pipe 0 address (if any) is remembered for the next
    /// [`EsbPower::enter_rx()`](fn@crate::radio::prelude::EsbPower::enter_rx).
    pub(crate) fn mirror_tx_address_to_pipe0(
        &mut self,
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        let mut tx_address = [0u8; 5];
        self.get_tx_address(&mut tx_address)?;
        self._pipe0 = Pipe0Address::AckMirror {
            mirrored: SavedAddress::new(&tx_address[..self.address_width()]),
            application: self._pipe0.application(),
        };
        self.write_address(registers::RX_ADDR_P0, &tx_address)?;
        let mut check = [0u8; 5];
        self.read_address(registers::RX_ADDR_P0, &mut check)?;
        self.confirm_address(&check, &tx_address)
    }

    /// Set a single pipe's bit in a per-pipe register (EN_AA, EN_RXADDR, DYNPD)
    /// and confirm it stuck.
    pub(crate) fn set_pipe_bit(
        &mut self,
        register: u8,
        pipe: u8,
        enable: bool,
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        if pipe > 5 {
            return Err(RadioError::InvalidPipe(pipe));
        }
        let mask = 1u8 << pipe;
        let value = self.read_register(register)?;
        let value = if enable { value | mask } else { value & !mask };
        self.write_register(register, value)?;
        if self.get_pipe_bit(register, pipe)? != enable {
            warn!(
                "register {=u8:#x} refused pipe {=u8} = {=bool}",
                register, pipe, enable
            );
            return Err(RadioError::ConfigurationRejected);
        }
        Ok(())
    }

    pub(crate) fn get_pipe_bit(
        &mut self,
        register: u8,
        pipe: u8,
    ) -> Result<bool, RadioError<SPI::Error, DO::Error>> {
        if pipe > 5 {
            return Err(RadioError::InvalidPipe(pipe));
        }
        Ok(self.read_register(register)? & (1 << pipe) != 0)
    }
}

impl<SPI, DO, DELAY, CLK> EsbPipe for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type PipeErrorType = RadioError<SPI::Error, DO::Error>;

    fn set_pipe_address(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        if pipe > 5 {
            return Err(RadioError::InvalidPipe(pipe));
        }
        let width = self.address_width();
        if address.len() < width {
            return Err(RadioError::InvalidLength);
        }
        if pipe == 0 {
            self._pipe0 = Pipe0Address::Application(SavedAddress::new(&address[..width]));
        }
        let register = registers::RX_ADDR_P0 + pipe;
        if pipe < 2 {
            self.write_address(register, address)?;
        } else {
            // pipes 2-5 only hold the LSByte
            self.write_register(register, address[width - 1])?;
        }
        let mut check = [0u8; 5];
        self.get_pipe_address(pipe, &mut check)?;
        self.confirm_address(&check, address)
    }

    fn get_pipe_address(
        &mut self,
        pipe: u8,
        address: &mut [u8],
    ) -> Result<(), Self::PipeErrorType> {
        if pipe > 5 {
            return Err(RadioError::InvalidPipe(pipe));
        }
        if pipe < 2 {
            return self.read_address(registers::RX_ADDR_P0 + pipe, address);
        }
        self.read_address(registers::RX_ADDR_P1, address)?;
        let width = self.address_width();
        address[width - 1] = self.read_register(registers::RX_ADDR_P0 + pipe)?;
        Ok(())
    }

    fn set_tx_address(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        self.write_address(registers::TX_ADDR, address)?;
        let mut check = [0u8; 5];
        self.get_tx_address(&mut check)?;
        self.confirm_address(&check, address)
    }

    fn get_tx_address(&mut self, address: &mut [u8]) -> Result<(), Self::PipeErrorType> {
        self.read_address(registers::TX_ADDR, address)
    }

    fn set_pipe_enabled(&mut self, pipe: u8, enable: bool) -> Result<(), Self::PipeErrorType> {
        self.set_pipe_bit(registers::EN_RXADDR, pipe, enable)
    }

    fn is_pipe_enabled(&mut self, pipe: u8) -> Result<bool, Self::PipeErrorType> {
        self.get_pipe_bit(registers::EN_RXADDR, pipe)
    }

    fn set_address_width(&mut self, width: u8) -> Result<(), Self::PipeErrorType> {
        if !(3..=5).contains(&width) {
            return Err(RadioError::InvalidLength);
        }
        self.write_register(registers::SETUP_AW, width - 2)?;
        let actual = self.get_address_width()?;
        if actual != width {
            warn!("address width {=u8} read back as {=u8}", width, actual);
            return Err(RadioError::ConfigurationRejected);
        }
        Ok(())
    }

    /// Also refreshes the width this driver uses to size address transfers.
    fn get_address_width(&mut self) -> Result<u8, Self::PipeErrorType> {
        let encoded = self.read_register(registers::SETUP_AW)? & 3;
        if encoded == 0 {
            return Err(RadioError::BinaryCorruption);
        }
        self._address_width = encoded + 2;
        Ok(self._address_width)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbPipe, Pipe0Address, SavedAddress};
    use crate::{
        radio::{rf24::commands, RadioError},
        spi_test_expects,
        test::{mk_radio, sim_radio},
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn set_full_address() {
        let spi_expectations = spi_test_expects![
            // written LSByte first
            (
                vec![registers::RX_ADDR_P1 | commands::W_REGISTER, 5, 4, 3, 2, 1],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (vec![registers::RX_ADDR_P1, 0, 0, 0, 0, 0], vec![0xEu8, 5, 4, 3, 2, 1]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_pipe_address(1, &[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(radio._pipe0, Pipe0Address::Unset);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn set_partial_address() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::RX_ADDR_P0 + 3 | commands::W_REGISTER, 0x33],
                vec![0xEu8, 0],
            ),
            (vec![registers::RX_ADDR_P1, 0, 0, 0, 0, 0], vec![0xEu8, 5, 4, 3, 2, 1]),
            (vec![registers::RX_ADDR_P0 + 3, 0], vec![0xEu8, 0x33]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_pipe_address(3, &[1, 2, 3, 4, 0x33]).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn rejected_address() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::TX_ADDR | commands::W_REGISTER, 5, 4, 3, 2, 1],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            // one bit flipped on the way back
            (vec![registers::TX_ADDR, 0, 0, 0, 0, 0], vec![0xEu8, 5, 4, 3, 2, 0]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(
            radio.set_tx_address(&[1, 2, 3, 4, 5]),
            Err(RadioError::ConfigurationRejected)
        );
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn bad_arguments_touch_nothing() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(
            radio.set_pipe_address(6, &[0; 5]),
            Err(RadioError::InvalidPipe(6))
        );
        assert_eq!(
            radio.set_pipe_address(0, &[0; 4]),
            Err(RadioError::InvalidLength)
        );
        assert_eq!(radio._pipe0, Pipe0Address::Unset);
        assert_eq!(radio.set_tx_address(&[0; 2]), Err(RadioError::InvalidLength));
        let mut short = [0u8; 3];
        assert_eq!(
            radio.get_tx_address(&mut short),
            Err(RadioError::InvalidLength)
        );
        assert_eq!(radio.is_pipe_enabled(9), Err(RadioError::InvalidPipe(9)));
        assert_eq!(radio.set_address_width(2), Err(RadioError::InvalidLength));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn pipe0_is_remembered() {
        let mut radio = sim_radio();
        radio.set_pipe_address(0, b"Prime").unwrap();
        let prime = SavedAddress::new(b"Prime");
        assert_eq!(radio._pipe0, Pipe0Address::Application(prime));
        radio.set_tx_address(b"Other").unwrap();
        radio.mirror_tx_address_to_pipe0().unwrap();
        assert_eq!(
            radio._pipe0,
            Pipe0Address::AckMirror {
                mirrored: SavedAddress::new(b"Other"),
                application: Some(prime),
            }
        );
        assert_eq!(radio._pipe0.application().map(|a| a.width()), Some(5));
        let mut address = [0u8; 5];
        radio.get_pipe_address(0, &mut address).unwrap();
        assert_eq!(&address, b"Other");
    }

    #[test]
    fn derived_pipes_share_pipe1_prefix() {
        let mut radio = sim_radio();
        radio.set_pipe_address(1, b"Node1").unwrap();
        let mut base = [0u8; 5];
        radio.get_pipe_address(1, &mut base).unwrap();
        for pipe in 2..=5u8 {
            radio.set_pipe_address(pipe, &[b'N', b'o', b'd', b'e', b'0' + pipe]).unwrap();
            let mut address = [0u8; 5];
            radio.get_pipe_address(pipe, &mut address).unwrap();
            assert_eq!(address[..4], base[..4]);
            assert_eq!(address[4], b'0' + pipe);
        }
        // the chip keeps a single byte for pipes 2-5
        assert_eq!(radio._spi.regs[registers::RX_ADDR_P0 as usize + 2], b'2');
        // a pipe 2-5 address must extend pipe 1's address
        assert_eq!(
            radio.set_pipe_address(3, b"xxxx3"),
            Err(RadioError::ConfigurationRejected)
        );
    }

    #[test]
    fn narrow_tx_address() {
        let mut radio = sim_radio();
        radio.set_address_width(4).unwrap();
        assert_eq!(radio.get_address_width(), Ok(4));
        radio.set_tx_address(&[1, 2, 3, 4]).unwrap();
        let mut address = [0u8; 4];
        radio.get_tx_address(&mut address).unwrap();
        assert_eq!(address, [1, 2, 3, 4]);
        assert_eq!(radio._spi.tx_addr[..4], [4, 3, 2, 1]);
    }

    #[test]
    fn invalid_widths_leave_setup_aw() {
        let mut radio = sim_radio();
        for width in [0u8, 1, 2, 6, 7, 255] {
            assert_eq!(radio.set_address_width(width), Err(RadioError::InvalidLength));
            assert_eq!(radio._spi.regs[registers::SETUP_AW as usize], 3);
        }
        for width in 3..=5u8 {
            radio.set_address_width(width).unwrap();
            assert_eq!(radio._spi.regs[registers::SETUP_AW as usize], width - 2);
        }
    }

    #[test]
    fn illegal_width_encoding() {
        let mut radio = sim_radio();
        radio._spi.regs[registers::SETUP_AW as usize] = 0;
        assert_eq!(radio.get_address_width(), Err(RadioError::BinaryCorruption));
    }

    #[test]
    fn pipe_toggles() {
        let mut radio = sim_radio();
        radio.set_pipe_enabled(4, true).unwrap();
        assert_eq!(radio._spi.regs[registers::EN_RXADDR as usize], 0x13);
        assert_eq!(radio.is_pipe_enabled(4), Ok(true));
        radio.set_pipe_enabled(0, false).unwrap();
        assert_eq!(radio.is_pipe_enabled(0), Ok(false));
        assert_eq!(radio.is_pipe_enabled(1), Ok(true));

        radio._spi.stuck_bits[registers::EN_RXADDR as usize] = 1 << 5;
        assert_eq!(
            radio.set_pipe_enabled(5, true),
            Err(RadioError::ConfigurationRejected)
        );
    }
}
