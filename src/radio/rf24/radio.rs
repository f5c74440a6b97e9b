use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    poll::{Clock, Deadline},
    radio::{
        prelude::{EsbFifo, EsbPower, EsbRadio},
        RadioDevice, RadioError,
    },
    StatusFlags,
};

use super::{bit_fields::Config, commands, mnemonics, registers, timing, MAX_PAYLOAD};

impl<SPI, DO, DELAY, CLK> EsbRadio for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type RadioErrorType = RadioError<SPI::Error, DO::Error>;

    fn send(&mut self, buf: &[u8], ack_required: bool) -> Result<(), Self::RadioErrorType> {
        if buf.len() > MAX_PAYLOAD {
            return Err(RadioError::InvalidLength);
        }
        self.enter_tx()?;
        let opcode = if ack_required {
            self.mirror_tx_address_to_pipe0()?;
            commands::W_TX_PAYLOAD
        } else {
            commands::W_TX_PAYLOAD_NO_ACK
        };
        self.burst_write(opcode, buf)?;

        let deadline = Deadline::after(&mut self._clock, Some(timing::SEND_TIMEOUT_MS));
        loop {
            let status = self.command(commands::NOP)?;
            if status.tx_ds() || status.max_rt() || deadline.expired(&mut self._clock) {
                break;
            }
        }
        let outcome = self._status;
        self.write_register(
            registers::STATUS,
            mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT,
        )?;

        if outcome.max_rt() {
            warn!("no ACK after all retries");
            self.flush_tx()?;
            return Err(RadioError::MaxRetriesExceeded);
        }
        if !outcome.tx_ds() {
            warn!("transmission timed out");
            return Err(RadioError::Timeout);
        }
        Ok(())
    }

    fn wait_available(&mut self, timeout_ms: Option<u32>) -> Result<(), Self::RadioErrorType> {
        self.enter_rx()?;
        let deadline = Deadline::after(&mut self._clock, timeout_ms);
        loop {
            if self.available()? {
                return Ok(());
            }
            if deadline.expired(&mut self._clock) {
                return Err(RadioError::Timeout);
            }
        }
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(u8, usize), Self::RadioErrorType> {
        self.write_register(registers::STATUS, mnemonics::MASK_RX_DR)?;
        let mut width = [0u8];
        self.burst_read(commands::R_RX_PL_WID, &mut width)?;
        // the STATUS byte clocked out with the width carries the pipe number
        let pipe = self._status.rx_pipe();
        if !self._status.has_valid_pipe() {
            warn!("RX FIFO reports pipe {=u8}", pipe);
            return Err(RadioError::InvalidPipe(pipe));
        }
        let len = width[0] as usize;
        if len > buf.len() || len > MAX_PAYLOAD {
            return Err(RadioError::InvalidLength);
        }
        self.burst_read(commands::R_RX_PAYLOAD, &mut buf[..len])?;
        trace!("received {=usize} bytes on pipe {=u8}", len, pipe);
        Ok((pipe, len))
    }

    fn is_sending(&mut self) -> Result<bool, Self::RadioErrorType> {
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        let status: StatusFlags = self._status;
        Ok(!config.is_rx() && !status.tx_ds() && !status.max_rt())
    }

    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType> {
        Ok(self.read_register(registers::OBSERVE_TX)? & 0xF)
    }
}
