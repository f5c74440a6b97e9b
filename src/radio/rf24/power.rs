use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    poll::Clock,
    radio::{
        prelude::{EsbFifo, EsbPipe, EsbPower},
        RadioDevice, RadioError,
    },
    PowerState, StatusFlags,
};

use super::{bit_fields::Config, mnemonics, registers, timing};

impl<SPI, DO, DELAY, CLK> RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    /// Shared tail of [`EsbPower::enter_rx()`] and [`EsbPower::enter_tx()`]:
    /// flush, raise CE, settle, then confirm the mode bits.
    fn activate(&mut self, target: PowerState) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.flush_tx()?;
        self.flush_rx()?;
        self.ce_pin.set_high().map_err(RadioError::Gpo)?;
        self._delay_impl.delay_us(timing::STANDBY_TO_ACTIVE_US);

        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        let want_rx = target == PowerState::ReceiveActive;
        if !config.power() || config.is_rx() != want_rx {
            warn!(
                "CONFIG {=u8:#x} does not confirm {}",
                config.into_bits(),
                target
            );
            return Err(RadioError::ConfigurationRejected);
        }
        debug!("power state {} -> {}", self._power_state, target);
        self._power_state = target;
        Ok(())
    }
}

impl<SPI, DO, DELAY, CLK> EsbPower for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type PowerErrorType = RadioError<SPI::Error, DO::Error>;

    fn enter_idle(&mut self) -> Result<(), Self::PowerErrorType> {
        if self._power_state == PowerState::IdleReady {
            return Ok(());
        }
        self.ce_pin.set_low().map_err(RadioError::Gpo)?;
        if self._power_state == PowerState::Down {
            if let Some(power_pin) = self._power_pin.as_mut() {
                power_pin.set_high().map_err(RadioError::Gpo)?;
                self._delay_impl.delay_ms(timing::POWER_SWITCH_SETTLE_MS);
            }
            self._delay_impl.delay_ms(timing::POWER_ON_GUARD_MS);
            self.write_register(
                registers::FEATURE,
                mnemonics::EN_DPL | mnemonics::EN_DYN_ACK,
            )?;
        }
        self.write_register(registers::STATUS, StatusFlags::IRQ_MASK)?;

        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        self.write_register(registers::CONFIG, config.with_power(false).into_bits())?;
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        if config.power() {
            warn!("PWR_UP still set after entering idle");
            return Err(RadioError::ConfigurationRejected);
        }
        debug!("power state {} -> IdleReady", self._power_state);
        self._power_state = PowerState::IdleReady;
        Ok(())
    }

    fn enter_rx(&mut self) -> Result<(), Self::PowerErrorType> {
        match self._power_state {
            PowerState::ReceiveActive => return Ok(()),
            PowerState::Down => self.enter_idle()?,
            _ => (),
        }
        let saved = self._pipe0.application();
        if let Some(saved) = saved.filter(|s| s.width() != self._address_width) {
            warn!(
                "pipe 0 address was set at width {=u8}, now {=u8}",
                saved.width(),
                self._address_width
            );
            return Err(RadioError::ConfigurationRejected);
        }
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        self.write_register(registers::CONFIG, config.as_rx().into_bits())?;
        if let Some(saved) = saved {
            self.set_pipe_address(0, saved.as_slice())?;
        }
        self.activate(PowerState::ReceiveActive)
    }

    fn enter_tx(&mut self) -> Result<(), Self::PowerErrorType> {
        match self._power_state {
            PowerState::TransmitActive => return Ok(()),
            PowerState::Down => self.enter_idle()?,
            _ => (),
        }
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        self.write_register(registers::CONFIG, config.as_tx().into_bits())?;
        self.activate(PowerState::TransmitActive)
    }

    /// In full power down mode (a sleep state), the radio will consume approximately
    /// 900nA (.0009mA). With a power pin attached, the supply is cut entirely.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        if self._power_state == PowerState::Down {
            return Ok(());
        }
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        self.write_register(registers::CONFIG, config.with_power(false).into_bits())?;
        self.ce_pin.set_low().map_err(RadioError::Gpo)?;
        if let Some(power_pin) = self._power_pin.as_mut() {
            power_pin.set_low().map_err(RadioError::Gpo)?;
        }
        debug!("power state {} -> Down", self._power_state);
        self._power_state = PowerState::Down;
        Ok(())
    }

    fn power_state(&self) -> PowerState {
        self._power_state
    }

    fn is_powered(&self) -> bool {
        self._power_state != PowerState::Down
    }
}
