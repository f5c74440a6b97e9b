use super::registers;
use crate::{
    poll::Clock,
    radio::{prelude::EsbChannel, RadioDevice, RadioError},
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY, CLK> EsbChannel for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type ChannelErrorType = RadioError<SPI::Error, DO::Error>;

    /// Only the low 7 bits of `channel` reach the chip, so any `channel`
    /// above 127 fails the read-back check.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        self.write_register(registers::RF_CH, channel & 0x7F)?;
        let actual = self.get_channel()?;
        if actual != channel {
            warn!("channel {=u8} read back as {=u8}", channel, actual);
            return Err(RadioError::ConfigurationRejected);
        }
        Ok(())
    }

    /// See also [`RadioDevice::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        Ok(self.read_register(registers::RF_CH)? & 0x7F)
    }
}
