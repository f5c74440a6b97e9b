//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use rf24link::radio::prelude::*;
//! ```
//!
//! Every setter in these traits is self-checking: after writing, the
//! implementation reads the register back and reports
//! [`RadioError::ConfigurationRejected`](crate::radio::RadioError::ConfigurationRejected)
//! when the chip disagrees (unless the setter's documentation says otherwise).

use crate::types::{CrcLength, DataRate, FifoState, PaLevel, PowerState, StatusFlags};

use super::RadioConfig;

/// A trait to represent manipulation of data pipes
/// for an ESB capable transceiver.
///
/// ### About addresses
/// Addresses are given and returned most-significant byte first, which is
/// how they are usually written down. The width of every address is
/// governed by [`EsbPipe::set_address_width()`]; slices longer than that
/// width only contribute their first `width` bytes.
///
/// Pipes 0 and 1 store a full address. Pipes 2-5 store only their least
/// significant byte (the *last* byte of the given slice) and borrow the
/// remaining bytes from pipe 1, e.g. with 5 byte addresses
/// ```ignore
/// radio.set_pipe_address(1, b"Node1")?;
/// radio.set_pipe_address(2, b"Node2")?; // only b'2' is written
/// radio.set_pipe_address(3, b"xxxx3")?; // rejected: reads back as "Node3"
/// ```
pub trait EsbPipe {
    type PipeErrorType;

    /// Set the address a `pipe` listens on.
    ///
    /// Assigning pipe 0 also records the address so that it survives
    /// acknowledged transmissions, which borrow pipe 0 to receive ACK packets.
    /// See [`EsbPower::enter_rx()`].
    fn set_pipe_address(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Fetch the address a `pipe` listens on into `address` (MSByte first).
    ///
    /// For pipes 2-5, this is pipe 1's address with the last byte replaced.
    fn get_pipe_address(&mut self, pipe: u8, address: &mut [u8]) -> Result<(), Self::PipeErrorType>;

    /// Set the address used for outgoing payloads.
    fn set_tx_address(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Fetch the address used for outgoing payloads (MSByte first).
    fn get_tx_address(&mut self, address: &mut [u8]) -> Result<(), Self::PipeErrorType>;

    /// Enable or disable receiving on a `pipe`.
    fn set_pipe_enabled(&mut self, pipe: u8, enable: bool) -> Result<(), Self::PipeErrorType>;

    /// Is a `pipe` enabled for receiving?
    fn is_pipe_enabled(&mut self, pipe: u8) -> Result<bool, Self::PipeErrorType>;

    /// Set the address width (applies to all pipes).
    ///
    /// Only 3, 4 or 5 bytes are accepted; anything else is refused before
    /// the bus is touched.
    fn set_address_width(&mut self, width: u8) -> Result<(), Self::PipeErrorType>;

    /// Get the currently configured address width (applied to all pipes).
    fn get_address_width(&mut self) -> Result<u8, Self::PipeErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's currently selected channel.
    ///
    /// These channels translate to the RF frequency as an offset of MHz from 2400 MHz.
    /// The chip only has 7 bits for the channel, so values above 127 are
    /// truncated on the wire and then rejected by the read-back check.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's currently selected channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of [`StatusFlags`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Get the [`StatusFlags`] state that was cached from the latest SPI transaction.
    fn get_status_flags(&self, flags: &mut StatusFlags);

    /// Configure which events are kept off the radio's IRQ pin.
    ///
    /// Set any member of [`StatusFlags`] to `true` to mask the corresponding
    /// event. By default no event is masked.
    fn set_irq_mask(&mut self, mask: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Get the events currently masked from the IRQ pin.
    fn get_irq_mask(&mut self) -> Result<StatusFlags, Self::StatusErrorType>;

    /// Clear the radio's IRQ status flags
    ///
    /// Set any member of [`StatusFlags`] to `true` to clear the corresponding
    /// interrupt event. Setting any member of [`StatusFlags`] to `false` will leave
    /// the corresponding status flag untouched.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Refresh the internal cache of status byte
    /// (which is also saved from every SPI transaction).
    ///
    /// Use [`EsbStatus::get_status_flags()`] to get the updated status flags.
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Flush the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Flush the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the specified FIFO.
    ///
    /// - Pass `true` to `about_tx` parameter to get the state of the TX FIFO.
    /// - Pass `false` to `about_tx` parameter to get the state of the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;

    /// Is there a well-formed payload waiting in the RX FIFO?
    ///
    /// A payload whose reported width exceeds 32 bytes is corrupt; the RX FIFO
    /// is flushed and this returns `false`.
    fn available(&mut self) -> Result<bool, Self::FifoErrorType>;
}

/// A trait to represent manipulation of payload lengths (static or dynamic)
/// for an ESB capable transceiver.
pub trait EsbPayloadLength {
    type PayloadLengthErrorType;

    /// Set the payload length expected on a `pipe`.
    ///
    /// - `0` selects dynamic payload lengths for the pipe.
    /// - `1..=32` selects a static length.
    /// - anything larger is refused before the bus is touched.
    fn set_payload_length(
        &mut self,
        pipe: u8,
        length: u8,
    ) -> Result<(), Self::PayloadLengthErrorType>;

    /// Get the payload length expected on a `pipe` (`0` means dynamic).
    fn get_payload_length(&mut self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType>;
}

/// A trait to represent manipulation of the automatic acknowledgement feature
/// for an ESB capable transceiver.
pub trait EsbAutoAck {
    type AutoAckErrorType;

    /// Set the auto-ack feature for an individual `pipe`.
    ///
    /// Pipe 0 is used for TX operations, which include receiving ACK packets. If
    /// this feature is disabled on a transmitting radio's pipe 0, then the
    /// transmitting radio will always report that the payload was received
    /// (even if it was not).
    fn set_auto_ack(&mut self, pipe: u8, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Is the auto-ack feature enabled for a `pipe`?
    fn get_auto_ack(&mut self, pipe: u8) -> Result<bool, Self::AutoAckErrorType>;

    /// Set the number of retry attempts and delay between retry attempts when
    /// transmitting a payload.
    ///
    /// Both parameters are clamped to range [0, 15].
    /// - `delay`: How long to wait between each retry, in multiples of
    ///   250 us (microseconds). The minimum value of 0 means 250 us, and
    ///   the maximum value of 15 means 4000 us.
    /// - `count`: How many retries before giving up. Use 0 to disable the
    ///   auto-retry feature.
    ///
    /// This setting is not read back.
    fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Get the retry policy as `(delay, count)`.
    fn get_auto_retries(&mut self) -> Result<(u8, u8), Self::AutoAckErrorType>;
}

/// A trait to represent manipulation of the RF setup (data rate and
/// power amplitude level) for an ESB capable transceiver.
pub trait EsbRf {
    type RfErrorType;

    /// Set the air data rate and Power Amplitude Level (PA Level) together.
    ///
    /// Other bits of the RF setup register are left untouched.
    fn set_rf(&mut self, data_rate: DataRate, pa_level: PaLevel) -> Result<(), Self::RfErrorType>;

    /// Get the currently configured data rate.
    fn get_data_rate(&mut self) -> Result<DataRate, Self::RfErrorType>;

    /// Get the currently configured Power Amplitude Level (PA Level)
    fn get_pa_level(&mut self) -> Result<PaLevel, Self::RfErrorType>;
}

/// A trait to represent the power state machine
/// of an ESB capable transceiver.
///
/// | from \ call | `enter_idle()` | `enter_rx()` | `enter_tx()` | `power_down()` |
/// |-------------|:--------------:|:------------:|:------------:|:--------------:|
/// | Down | IdleReady | ReceiveActive | TransmitActive | no-op |
/// | IdleReady | no-op | ReceiveActive | TransmitActive | Down |
/// | ReceiveActive | IdleReady | no-op | TransmitActive | Down |
/// | TransmitActive | IdleReady | ReceiveActive | no-op | Down |
///
/// `enter_rx()` and `enter_tx()` pass through `enter_idle()` when starting
/// from [`PowerState::Down`]. Every transition is confirmed by reading the
/// CONFIG register back; a failed transition leaves
/// [`EsbPower::power_state()`] unchanged.
pub trait EsbPower {
    type PowerErrorType;

    /// Bring the radio to [`PowerState::IdleReady`].
    ///
    /// From [`PowerState::Down`] this also switches the supply on (when a power
    /// pin is attached), waits for the chip to settle and unlocks dynamic
    /// payloads and no-ack transmissions. All status flags are cleared.
    fn enter_idle(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Start listening ([`PowerState::ReceiveActive`]).
    ///
    /// Restores pipe 0's address when an acknowledged transmission borrowed it,
    /// then flushes both FIFOs.
    ///
    /// The restore fails with `ConfigurationRejected` when the address width
    /// changed since pipe 0's address was set; assign pipe 0 again at the new
    /// width first.
    fn enter_rx(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Arm the transmitter ([`PowerState::TransmitActive`]).
    ///
    /// Both FIFOs are flushed.
    fn enter_tx(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power down the radio.
    ///
    /// <div class="warning">
    ///
    /// The nRF24L01 cannot receive nor transmit data when powered down.
    ///
    /// </div>
    ///
    /// Holding the SPI clock and data lines low needs the peripherals back from
    /// [`RadioDevice::free()`](fn@crate::radio::RadioDevice::free). A device
    /// rebuilt with [`RadioDevice::new()`](fn@crate::radio::RadioDevice::new)
    /// forgets pipe 0's saved address and assumes 5 byte addresses, so call
    /// [`EsbInit::with_config()`] (or
    /// [`EsbPipe::get_address_width()`] and [`EsbPipe::set_pipe_address()`]
    /// for pipe 0) before listening again.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// The last confirmed power state.
    fn power_state(&self) -> PowerState;

    /// Is the radio anything but [`PowerState::Down`]?
    fn is_powered(&self) -> bool;
}

/// A trait to represent manipulation of Cyclical Redundancy Checksums
/// for an ESB capable transceiver.
pub trait EsbCrcLength {
    type CrcLengthErrorType;

    /// Get the currently configured CRC (Cyclical Redundancy Checksum) length
    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType>;

    /// Set the radio's CRC (Cyclical Redundancy Checksum) length
    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType>;
}

/// A trait to represent debug output
/// for an ESB capable transceiver.
pub trait EsbDetails {
    type DetailsErrorType;

    /// Print details about radio's current configuration.
    ///
    /// This should only be used for debugging development.
    /// Without the `defmt` or `std` feature this does nothing.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}

/// A trait to represent bulk configuration
/// of an ESB capable transceiver.
pub trait EsbInit {
    type ConfigErrorType;

    /// Bring the radio up with [`RadioConfig::default()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Reconfigure the radio using the given `config` object.
    ///
    /// The radio is brought to [`PowerState::IdleReady`] and every setting is
    /// applied through the self-checking setters, so the first rejected
    /// setting aborts the whole configuration.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent datagram exchange
/// for an ESB capable transceiver.
pub trait EsbRadio {
    type RadioErrorType;

    /// Blocking function to transmit a given payload (at most 32 bytes).
    ///
    /// The radio is switched to [`PowerState::TransmitActive`] as needed. When
    /// `ack_required` is set, the TX address is mirrored into pipe 0 so the
    /// acknowledgement can be received; otherwise the payload is sent without
    /// requesting one.
    ///
    /// Waits at most 2 seconds. The outcome is:
    /// - `Ok(())` when the chip reports the payload as sent.
    /// - [`MaxRetriesExceeded`](crate::radio::RadioError::MaxRetriesExceeded)
    ///   when every retry went unacknowledged (the TX FIFO is flushed).
    /// - [`Timeout`](crate::radio::RadioError::Timeout) when the chip reported
    ///   neither outcome in time.
    fn send(&mut self, buf: &[u8], ack_required: bool) -> Result<(), Self::RadioErrorType>;

    /// Enter [`PowerState::ReceiveActive`] and wait for
    /// [`EsbFifo::available()`].
    ///
    /// `timeout_ms` of `None` waits indefinitely; otherwise
    /// [`Timeout`](crate::radio::RadioError::Timeout) is returned when nothing
    /// arrived in time.
    fn wait_available(&mut self, timeout_ms: Option<u32>) -> Result<(), Self::RadioErrorType>;

    /// Read the payload at the top of the RX FIFO into `buf`.
    ///
    /// Returns `(pipe, length)`. Call only after [`EsbFifo::available()`]
    /// returned `true`.
    ///
    /// <div class="warning">
    ///
    /// The RX_DR flag is cleared and the payload width is fetched *before* the
    /// pipe number is validated. When the pipe turns out to be invalid
    /// ([`InvalidPipe`](crate::radio::RadioError::InvalidPipe)) or the payload
    /// does not fit `buf` ([`InvalidLength`](crate::radio::RadioError::InvalidLength)),
    /// the payload stays in the RX FIFO but RX_DR has already been cleared.
    ///
    /// </div>
    fn receive(&mut self, buf: &mut [u8]) -> Result<(u8, usize), Self::RadioErrorType>;

    /// Is a transmission in progress?
    ///
    /// True when the radio is in TX mode and neither the "data sent" nor
    /// "max retries" flag has been raised.
    fn is_sending(&mut self) -> Result<bool, Self::RadioErrorType>;

    /// Get the number of retransmissions used by the last transmission.
    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType>;
}
