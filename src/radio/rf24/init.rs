use super::{RadioDevice, RadioError};
use crate::{
    poll::Clock,
    radio::{
        prelude::{
            EsbAutoAck, EsbChannel, EsbCrcLength, EsbFifo, EsbInit, EsbPayloadLength, EsbPipe,
            EsbPower, EsbRf, EsbStatus,
        },
        RadioConfig,
    },
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

// pipe 1 holds the shared prefix of pipes 2 - 5, so it goes first
const PIPE_ORDER: [u8; 6] = [1, 0, 2, 3, 4, 5];

impl<SPI, DO, DELAY, CLK> EsbInit for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type ConfigErrorType = RadioError<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and [`OutputPin`] given
    /// to [`RadioDevice::new()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self.with_config(&RadioConfig::default())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        self.enter_idle()?;
        self.flush_rx()?;
        self.flush_tx()?;

        self.set_address_width(config.address_width())?;
        self.set_auto_retries(config.auto_retry_delay(), config.auto_retry_count())?;
        self.set_rf(config.data_rate(), config.pa_level())?;
        self.set_channel(config.channel())?;
        self.set_irq_mask(config.irq_mask())?;

        let width = config.address_width() as usize;
        let mut address = [0u8; 5];
        for pipe in PIPE_ORDER {
            config.rx_address(pipe, &mut address[..width]);
            self.set_pipe_address(pipe, &address[..width])?;
        }
        for pipe in 0..=5u8 {
            let settings = config.pipe(pipe);
            self.set_pipe_enabled(pipe, settings.enabled())?;
            self.set_auto_ack(pipe, settings.auto_ack())?;
            self.set_payload_length(pipe, settings.payload_length())?;
        }
        // EN_CRC is forced while any pipe uses auto-ack
        self.set_crc_length(config.crc_length())?;

        config.tx_address(&mut address[..width]);
        self.set_tx_address(&address[..width])?;
        debug!("radio configured on channel {=u8}", config.channel());
        Ok(())
    }
}
