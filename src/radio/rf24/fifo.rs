use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbFifo, RadioDevice, RadioError};
use crate::{poll::Clock, FifoState};

use super::{commands, mnemonics, registers, MAX_PAYLOAD};

impl<SPI, DO, DELAY, CLK> EsbFifo for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type FifoErrorType = RadioError<SPI::Error, DO::Error>;

    fn available(&mut self) -> Result<bool, Self::FifoErrorType> {
        if self.read_register(registers::FIFO_STATUS)? & mnemonics::RX_EMPTY != 0 {
            return Ok(false);
        }
        let mut width = [0u8];
        self.burst_read(commands::R_RX_PL_WID, &mut width)?;
        if width[0] as usize > MAX_PAYLOAD {
            warn!("discarding RX FIFO with payload width {=u8}", width[0]);
            self.flush_rx()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_RX)?;
        Ok(())
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_TX)?;
        Ok(())
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let offset = about_tx as u8 * 4;
        let status = (self.read_register(registers::FIFO_STATUS)? >> offset) & 3;
        match status {
            1 => Ok(FifoState::Empty),
            2 => Ok(FifoState::Full),
            0 => Ok(FifoState::Occupied),
            _ => Err(RadioError::BinaryCorruption),
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, EsbFifo, FifoState};
    use crate::{
        radio::RadioError,
        spi_test_expects,
        test::{mk_radio, sim_radio},
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn available() {
        let spi_expectations = spi_test_expects![
            // empty RX FIFO
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0x11u8]),
            // occupied RX FIFO with a sane width
            (vec![registers::FIFO_STATUS, 0u8], vec![0x2u8, 0x10u8]),
            (vec![commands::R_RX_PL_WID, 0u8], vec![0x2u8, 5u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(!radio.available().unwrap());
        assert!(radio.available().unwrap());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn corrupt_width_flushes() {
        let spi_expectations = spi_test_expects![
            (vec![registers::FIFO_STATUS, 0u8], vec![0x2u8, 0x10u8]),
            (vec![commands::R_RX_PL_WID, 0u8], vec![0x2u8, 33u8]),
            (vec![commands::FLUSH_RX], vec![0x2u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(!radio.available().unwrap());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn get_fifo_state() {
        let spi_expectations = spi_test_expects![
            // read FIFO register value with empty TX FIFO_STATUS
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0x10u8]),
            // read FIFO register value with full TX FIFO_STATUS
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0x20u8]),
            // read FIFO register value with occupied TX FIFO_STATUS
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0u8]),
            // read FIFO register value with empty RX FIFO_STATUS
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 1u8]),
            // read FIFO register value with full RX FIFO_STATUS
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 2u8]),
            // read FIFO register value with occupied RX FIFO_STATUS
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0u8]),
            // both full and empty
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 3u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.get_fifo_state(true), Ok(FifoState::Empty));
        assert_eq!(radio.get_fifo_state(true), Ok(FifoState::Full));
        assert_eq!(radio.get_fifo_state(true), Ok(FifoState::Occupied));
        assert_eq!(radio.get_fifo_state(false), Ok(FifoState::Empty));
        assert_eq!(radio.get_fifo_state(false), Ok(FifoState::Full));
        assert_eq!(radio.get_fifo_state(false), Ok(FifoState::Occupied));
        assert_eq!(
            radio.get_fifo_state(false),
            Err(RadioError::BinaryCorruption)
        );
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn availability_follows_rx_fifo() {
        let mut radio = sim_radio();
        assert_eq!(radio.available(), Ok(false));
        radio._spi.rx_fifo.push_back((1, vec![1, 2, 3]));
        assert_eq!(radio.available(), Ok(true));
        assert_eq!(radio.get_fifo_state(false), Ok(FifoState::Occupied));
        radio._spi.rx_fifo.clear();
        radio._spi.rx_fifo.push_back((1, vec![0; 40]));
        assert_eq!(radio.available(), Ok(false));
        assert_eq!(radio._spi.flush_rx_count, 1);
        assert!(radio._spi.rx_fifo.is_empty());
    }
}
