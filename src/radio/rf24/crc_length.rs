use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::Config, registers};
use crate::radio::{prelude::EsbCrcLength, RadioDevice, RadioError};
use crate::{poll::Clock, CrcLength};

impl<SPI, DO, DELAY, CLK> EsbCrcLength for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type CrcLengthErrorType = RadioError<SPI::Error, DO::Error>;

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType> {
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        Ok(config.crc_length())
    }

    /// The chip forces CRC on while auto-ack is enabled on any pipe, so
    /// [`CrcLength::Disabled`] is rejected in that case.
    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType> {
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        self.write_register(
            registers::CONFIG,
            config.with_crc_length(crc_length).into_bits(),
        )?;
        let actual = self.get_crc_length()?;
        if actual != crc_length {
            warn!("CRC length did not stick");
            return Err(RadioError::ConfigurationRejected);
        }
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, CrcLength, EsbCrcLength};
    use crate::radio::rf24::commands;
    use crate::radio::RadioError;
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn get_crc_length() {
        let spi_expectations = spi_test_expects![
            // get the CRC length for each possible result
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0u8]),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 8u8]),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 12u8]),
            // CRCO alone is meaningless
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 4u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.get_crc_length(), Ok(CrcLength::Disabled));
        assert_eq!(radio.get_crc_length(), Ok(CrcLength::Bit8));
        assert_eq!(radio.get_crc_length(), Ok(CrcLength::Bit16));
        assert_eq!(radio.get_crc_length(), Ok(CrcLength::Disabled));
        spi.done();
        ce_pin.done();
    }

    fn set_crc_length_parametrized(crc_length: CrcLength, expected: u8, read_back: u8) {
        let spi_expectations = spi_test_expects![
            // read current CONFIG (powered up RX with IRQ masked)
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x73u8]),
            // set the CRC length without touching other bits
            (
                vec![registers::CONFIG | commands::W_REGISTER, expected],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, read_back]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let result = radio.set_crc_length(crc_length);
        if expected == read_back {
            assert!(result.is_ok());
        } else {
            assert_eq!(result, Err(RadioError::ConfigurationRejected));
        }
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn set_crc_disabled() {
        set_crc_length_parametrized(CrcLength::Disabled, 0x73u8, 0x73u8);
    }

    #[test]
    fn set_crc_8bit() {
        set_crc_length_parametrized(CrcLength::Bit8, 0x7Bu8, 0x7Bu8);
    }

    #[test]
    fn set_crc_16bit() {
        set_crc_length_parametrized(CrcLength::Bit16, 0x7Fu8, 0x7Fu8);
    }

    #[test]
    fn set_crc_forced_on() {
        // auto-ack keeps EN_CRC high
        set_crc_length_parametrized(CrcLength::Disabled, 0x73u8, 0x7Bu8);
    }
}
