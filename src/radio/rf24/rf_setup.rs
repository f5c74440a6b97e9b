use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::SetupRf, registers};
use crate::{
    poll::Clock,
    radio::{prelude::EsbRf, RadioDevice, RadioError},
    DataRate, PaLevel,
};

impl<SPI, DO, DELAY, CLK> RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    fn read_rf_setup(&mut self) -> Result<SetupRf, RadioError<SPI::Error, DO::Error>> {
        Ok(SetupRf::from_bits(self.read_register(registers::RF_SETUP)?))
    }
}

impl<SPI, DO, DELAY, CLK> EsbRf for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type RfErrorType = RadioError<SPI::Error, DO::Error>;

    fn set_rf(&mut self, data_rate: DataRate, pa_level: PaLevel) -> Result<(), Self::RfErrorType> {
        let rf_setup = self
            .read_rf_setup()?
            .with_data_rate(data_rate)
            .with_pa_level(pa_level);
        self.write_register(registers::RF_SETUP, rf_setup.into_bits())?;

        let actual = self.read_rf_setup()?;
        let actual_rate = actual.data_rate().ok_or(RadioError::BinaryCorruption)?;
        if actual_rate != data_rate || actual.pa_level() != pa_level {
            warn!("RF setup read back as {=u8:#x}", actual.into_bits());
            return Err(RadioError::ConfigurationRejected);
        }
        Ok(())
    }

    fn get_data_rate(&mut self) -> Result<DataRate, Self::RfErrorType> {
        self.read_rf_setup()?
            .data_rate()
            .ok_or(RadioError::BinaryCorruption)
    }

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::RfErrorType> {
        Ok(self.read_rf_setup()?.pa_level())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbRf};
    use crate::radio::rf24::commands;
    use crate::radio::RadioError;
    use crate::{spi_test_expects, test::mk_radio, test::sim_radio, DataRate, PaLevel};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn get_data_rate() {
        let spi_expectations = spi_test_expects![
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x07u8]),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x0Fu8]),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x27u8]),
            // reserved encoding
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x2Fu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.get_data_rate(), Ok(DataRate::Mbps1));
        assert_eq!(radio.get_data_rate(), Ok(DataRate::Mbps2));
        assert_eq!(radio.get_data_rate(), Ok(DataRate::Kbps250));
        assert_eq!(radio.get_data_rate(), Err(RadioError::BinaryCorruption));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn get_pa_level() {
        let spi_expectations = spi_test_expects![
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x01u8]),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x03u8]),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x05u8]),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x07u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.get_pa_level(), Ok(PaLevel::Min));
        assert_eq!(radio.get_pa_level(), Ok(PaLevel::Low));
        assert_eq!(radio.get_pa_level(), Ok(PaLevel::High));
        assert_eq!(radio.get_pa_level(), Ok(PaLevel::Max));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn set_rf() {
        let spi_expectations = spi_test_expects![
            // LNA bit is preserved
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x07u8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x23u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x23u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_rf(DataRate::Kbps250, PaLevel::Low).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn rf_round_trips() {
        let mut radio = sim_radio();
        for data_rate in [DataRate::Mbps1, DataRate::Mbps2, DataRate::Kbps250] {
            for pa_level in [PaLevel::Min, PaLevel::Low, PaLevel::High, PaLevel::Max] {
                radio.set_rf(data_rate, pa_level).unwrap();
                assert_eq!(radio.get_data_rate(), Ok(data_rate));
                assert_eq!(radio.get_pa_level(), Ok(pa_level));
            }
        }
        // the PA field refuses to change
        radio._spi.stuck_bits[registers::RF_SETUP as usize] = 0x06;
        assert_eq!(
            radio.set_rf(DataRate::Mbps1, PaLevel::Min),
            Err(RadioError::ConfigurationRejected)
        );
    }
}
