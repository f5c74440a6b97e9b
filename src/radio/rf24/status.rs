use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    poll::Clock,
    radio::{prelude::EsbStatus, RadioDevice, RadioError},
    types::StatusFlags,
};

use super::{bit_fields::Config, commands, registers};

impl<SPI, DO, DELAY, CLK> EsbStatus for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type StatusErrorType = RadioError<SPI::Error, DO::Error>;

    fn set_irq_mask(&mut self, mask: StatusFlags) -> Result<(), Self::StatusErrorType> {
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        self.write_register(registers::CONFIG, config.with_irq_mask(mask).into_bits())?;
        let actual = self.get_irq_mask()?;
        if actual.rx_dr() != mask.rx_dr()
            || actual.tx_ds() != mask.tx_ds()
            || actual.max_rt() != mask.max_rt()
        {
            warn!("IRQ mask did not stick");
            return Err(RadioError::ConfigurationRejected);
        }
        Ok(())
    }

    fn get_irq_mask(&mut self) -> Result<StatusFlags, Self::StatusErrorType> {
        Ok(Config::from_bits(self.read_register(registers::CONFIG)?).irq_mask())
    }

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.write_register(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)?;
        Ok(())
    }

    fn update(&mut self) -> Result<(), Self::StatusErrorType> {
        self.command(commands::NOP)?;
        Ok(())
    }

    fn get_status_flags(&self, flags: &mut StatusFlags) {
        *flags = self._status;
    }
}
