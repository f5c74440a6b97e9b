use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    poll::Clock,
    radio::{prelude::EsbAutoAck, RadioDevice, RadioError},
};

use super::{bit_fields::SetupRetry, registers};

impl<SPI, DO, DELAY, CLK> EsbAutoAck for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type AutoAckErrorType = RadioError<SPI::Error, DO::Error>;

    fn set_auto_ack(&mut self, pipe: u8, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        self.set_pipe_bit(registers::EN_AA, pipe, enable)
    }

    fn get_auto_ack(&mut self, pipe: u8) -> Result<bool, Self::AutoAckErrorType> {
        self.get_pipe_bit(registers::EN_AA, pipe)
    }

    fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::AutoAckErrorType> {
        let retry = SetupRetry::new()
            .with_ard(delay.min(15))
            .with_arc(count.min(15));
        self.write_register(registers::SETUP_RETR, retry.into_bits())?;
        Ok(())
    }

    fn get_auto_retries(&mut self) -> Result<(u8, u8), Self::AutoAckErrorType> {
        let retry = SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?);
        Ok((retry.ard(), retry.arc()))
    }
}
