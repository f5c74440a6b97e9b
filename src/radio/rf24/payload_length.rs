use crate::{
    poll::Clock,
    radio::{prelude::EsbPayloadLength, RadioDevice, RadioError},
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, MAX_PAYLOAD};

impl<SPI, DO, DELAY, CLK> EsbPayloadLength for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type PayloadLengthErrorType = RadioError<SPI::Error, DO::Error>;

    fn set_payload_length(
        &mut self,
        pipe: u8,
        length: u8,
    ) -> Result<(), Self::PayloadLengthErrorType> {
        if pipe > 5 {
            return Err(RadioError::InvalidPipe(pipe));
        }
        if length as usize > MAX_PAYLOAD {
            return Err(RadioError::InvalidLength);
        }
        let mask = 1u8 << pipe;
        let dynpd = self.read_register(registers::DYNPD)?;
        if length == 0 {
            self.write_register(registers::DYNPD, dynpd | mask)?;
        } else {
            if dynpd & mask != 0 {
                self.write_register(registers::DYNPD, dynpd & !mask)?;
            }
            self.write_register(registers::RX_PW_P0 + pipe, length)?;
        }
        let actual = self.get_payload_length(pipe)?;
        if actual != length {
            warn!(
                "pipe {=u8} payload length {=u8} read back as {=u8}",
                pipe, length, actual
            );
            return Err(RadioError::ConfigurationRejected);
        }
        Ok(())
    }

    fn get_payload_length(&mut self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType> {
        if pipe > 5 {
            return Err(RadioError::InvalidPipe(pipe));
        }
        if self.read_register(registers::DYNPD)? & (1 << pipe) != 0 {
            return Ok(0);
        }
        Ok(self.read_register(registers::RX_PW_P0 + pipe)? & 0x3F)
    }
}
