#![doc = "A self-verifying driver and minimal link layer for the nRF24L01(+) transceiver."]
//!
//! Every configuration setter writes a register and then reads it back; the call only
//! succeeds when the chip reports the requested value. Sending and receiving drive the
//! radio's power state machine on demand, so a typical node configures once and then
//! simply calls [`send()`](fn@crate::radio::prelude::EsbRadio::send) or
//! [`wait_available()`](fn@crate::radio::prelude::EsbRadio::wait_available) and
//! [`receive()`](fn@crate::radio::prelude::EsbRadio::receive).
//!
//! ## Basic API
//!
//! - [`RadioDevice::new()`](fn@crate::radio::RadioDevice::new)
//! - [`RadioDevice::with_power_pin()`](fn@crate::radio::RadioDevice::with_power_pin)
//! - [`RadioDevice::with_config()`](radio/struct.RadioDevice.html#method.with_config)
//! - [`RadioDevice::send()`](radio/struct.RadioDevice.html#method.send)
//! - [`RadioDevice::available()`](radio/struct.RadioDevice.html#method.available)
//! - [`RadioDevice::wait_available()`](radio/struct.RadioDevice.html#method.wait_available)
//! - [`RadioDevice::receive()`](radio/struct.RadioDevice.html#method.receive)
//! - [`RadioDevice::power_down()`](radio/struct.RadioDevice.html#method.power_down)
//!
//! ## Power state machine
//!
//! - [`RadioDevice::enter_idle()`](radio/struct.RadioDevice.html#method.enter_idle)
//! - [`RadioDevice::enter_rx()`](radio/struct.RadioDevice.html#method.enter_rx)
//! - [`RadioDevice::enter_tx()`](radio/struct.RadioDevice.html#method.enter_tx)
//! - [`RadioDevice::power_state()`](radio/struct.RadioDevice.html#method.power_state)
//!
//! ## Configuration API
//!
//! - [`RadioDevice::set_channel()`](radio/struct.RadioDevice.html#method.set_channel)
//! - [`RadioDevice::set_crc_length()`](radio/struct.RadioDevice.html#method.set_crc_length)
//! - [`RadioDevice::set_address_width()`](radio/struct.RadioDevice.html#method.set_address_width)
//! - [`RadioDevice::set_auto_retries()`](radio/struct.RadioDevice.html#method.set_auto_retries)
//! - [`RadioDevice::set_rf()`](radio/struct.RadioDevice.html#method.set_rf)
//! - [`RadioDevice::set_payload_length()`](radio/struct.RadioDevice.html#method.set_payload_length)
//! - [`RadioDevice::set_irq_mask()`](radio/struct.RadioDevice.html#method.set_irq_mask)
//!
//! ## Addressing API
//!
//! - [`RadioDevice::set_pipe_address()`](radio/struct.RadioDevice.html#method.set_pipe_address)
//! - [`RadioDevice::get_pipe_address()`](radio/struct.RadioDevice.html#method.get_pipe_address)
//! - [`RadioDevice::set_tx_address()`](radio/struct.RadioDevice.html#method.set_tx_address)
//! - [`RadioDevice::get_tx_address()`](radio/struct.RadioDevice.html#method.get_tx_address)
//! - [`RadioDevice::set_pipe_enabled()`](radio/struct.RadioDevice.html#method.set_pipe_enabled)
//! - [`RadioDevice::set_auto_ack()`](radio/struct.RadioDevice.html#method.set_auto_ack)
//!
//! ## Diagnostics
//!
//! - [`RadioDevice::rpd()`](fn@crate::radio::RadioDevice::rpd)
//! - [`RadioDevice::rssi()`](fn@crate::radio::RadioDevice::rssi)
//! - [`RadioDevice::get_last_arc()`](radio/struct.RadioDevice.html#method.get_last_arc)
//! - [`RadioDevice::print_details()`](radio/struct.RadioDevice.html#method.print_details)
//!
#![no_std]

#[macro_use]
mod fmt;

pub mod poll;
pub use poll::{Clock, Deadline};
mod types;
pub use types::{CrcLength, DataRate, FifoState, PaLevel, PowerState, StatusFlags};
pub mod radio;
