use super::{RadioDevice, RadioError};
use crate::{poll::Clock, radio::prelude::EsbDetails};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

#[cfg(any(
    all(feature = "defmt", target_os = "none"),
    all(feature = "std", not(target_os = "none"))
))]
use super::{bit_fields::Config, registers};
#[cfg(any(
    all(feature = "defmt", target_os = "none"),
    all(feature = "std", not(target_os = "none"))
))]
use crate::radio::prelude::{
    EsbAutoAck, EsbChannel, EsbCrcLength, EsbFifo, EsbPipe, EsbPower, EsbRadio, EsbRf,
};

#[cfg(all(feature = "std", not(target_os = "none")))]
extern crate std;

impl<SPI, DO, DELAY, CLK> EsbDetails for RadioDevice<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    type DetailsErrorType = RadioError<SPI::Error, DO::Error>;

    #[cfg(feature = "defmt")]
    #[cfg(target_os = "none")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        defmt::println!("Power state_______________{}", self.power_state());

        let channel = self.get_channel()?;
        defmt::println!(
            "Channel___________________{=u8} ~ {=u16} MHz",
            channel,
            channel as u16 + 2400u16
        );

        defmt::println!("RF Data Rate______________{}", self.get_data_rate()?);
        defmt::println!("RF Power Amplifier________{}", self.get_pa_level()?);
        defmt::println!("CRC Length________________{}", self.get_crc_length()?);

        let width = self.get_address_width()?;
        defmt::println!("Address width_____________{=u8} bytes", width);

        let (delay, count) = self.get_auto_retries()?;
        defmt::println!(
            "Auto retry delay__________{=u16} microseconds",
            delay as u16 * 250 + 250
        );
        defmt::println!("Auto retry attempts_______{=u8} maximum", count);

        let observer = self.read_register(registers::OBSERVE_TX)?;
        defmt::println!(
            "Packets lost\n    on current channel____{=u8}",
            observer >> 4
        );
        defmt::println!(
            "Retry attempts made\n    for last transmission_{=u8}",
            observer & 0xF
        );

        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        let mask = config.irq_mask();
        defmt::println!("IRQ on Data Ready_________{=bool}", !mask.rx_dr());
        defmt::println!("    Data Ready triggered__{=bool}", self._status.rx_dr());
        defmt::println!("IRQ on Data Sent__________{=bool}", !mask.tx_ds());
        defmt::println!("    Data Sent triggered___{=bool}", self._status.tx_ds());
        defmt::println!("IRQ on Data Fail__________{=bool}", !mask.max_rt());
        defmt::println!("    Data Fail triggered___{=bool}", self._status.max_rt());
        defmt::println!("Transmitting______________{=bool}", self.is_sending()?);

        defmt::println!("TX FIFO___________________{}", self.get_fifo_state(true)?);
        defmt::println!("RX FIFO___________________{}", self.get_fifo_state(false)?);

        let features = self.read_register(registers::FEATURE)?;
        defmt::println!("Features__________________0b{=0..8}", features);
        let dynpd = self.read_register(registers::DYNPD)?;
        defmt::println!("Dynamic Payloads__________0b{=0..8}", dynpd);
        let en_aa = self.read_register(registers::EN_AA)?;
        defmt::println!("Auto Acknowledgment_______0b{=0..8}", en_aa);

        let width = width as usize;
        let mut address = [0u8; 5];
        self.get_tx_address(&mut address)?;
        defmt::println!("TX address________________{=[u8]:02X}", &address[..width]);
        let open_pipes = self.read_register(registers::EN_RXADDR)?;
        let opened = defmt::intern!(" open ");
        let closed = defmt::intern!("closed");
        for pipe in 0..=5u8 {
            self.get_pipe_address(pipe, &mut address)?;
            defmt::println!(
                "Pipe {=u8} ({=istr}) bound to {=[u8]:02X} auto-ack {=bool}",
                pipe,
                if (open_pipes & (1u8 << pipe)) > 0 {
                    opened
                } else {
                    closed
                },
                &address[..width],
                self.get_auto_ack(pipe)?,
            );
        }
        Ok(())
    }

    #[cfg(not(any(
        all(feature = "defmt", target_os = "none"),
        all(feature = "std", not(target_os = "none"))
    )))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        Ok(())
    }

    #[cfg(not(target_os = "none"))]
    #[cfg(feature = "std")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        std::println!("Power state_______________{}", self.power_state());

        let channel = self.get_channel()?;
        std::println!(
            "Channel___________________{channel} ~ {} MHz",
            channel as u16 + 2400u16
        );

        std::println!("RF Data Rate______________{}", self.get_data_rate()?);
        std::println!("RF Power Amplifier________{}", self.get_pa_level()?);
        std::println!("CRC Length________________{}", self.get_crc_length()?);

        let width = self.get_address_width()?;
        std::println!("Address width_____________{width} bytes");

        let (delay, count) = self.get_auto_retries()?;
        std::println!(
            "Auto retry delay__________{} microseconds",
            delay as u16 * 250 + 250
        );
        std::println!("Auto retry attempts_______{count} maximum");

        let observer = self.read_register(registers::OBSERVE_TX)?;
        std::println!("Packets lost\n    on current channel____{}", observer >> 4);
        std::println!(
            "Retry attempts made\n    for last transmission_{}",
            observer & 0xF
        );

        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        let mask = config.irq_mask();
        std::println!("IRQ on Data Ready_________{}", !mask.rx_dr());
        std::println!("    Data Ready triggered__{}", self._status.rx_dr());
        std::println!("IRQ on Data Sent__________{}", !mask.tx_ds());
        std::println!("    Data Sent triggered___{}", self._status.tx_ds());
        std::println!("IRQ on Data Fail__________{}", !mask.max_rt());
        std::println!("    Data Fail triggered___{}", self._status.max_rt());
        std::println!("Transmitting______________{}", self.is_sending()?);

        std::println!("TX FIFO___________________{}", self.get_fifo_state(true)?);
        std::println!("RX FIFO___________________{}", self.get_fifo_state(false)?);

        let features = self.read_register(registers::FEATURE)?;
        std::println!("Features__________________{features:#010b}");
        let dynpd = self.read_register(registers::DYNPD)?;
        std::println!("Dynamic Payloads__________{dynpd:#010b}");
        let en_aa = self.read_register(registers::EN_AA)?;
        std::println!("Auto Acknowledgment_______{en_aa:#010b}");

        let width = width as usize;
        let mut address = [0u8; 5];
        self.get_tx_address(&mut address)?;
        std::println!("TX address________________{:02X?}", &address[..width]);
        let open_pipes = self.read_register(registers::EN_RXADDR)?;
        for pipe in 0..=5u8 {
            self.get_pipe_address(pipe, &mut address)?;
            std::println!(
                "Pipe {pipe} ({}) bound to {:02X?} auto-ack {}",
                if (open_pipes & (1u8 << pipe)) > 0 {
                    " open "
                } else {
                    "closed"
                },
                &address[..width],
                self.get_auto_ack(pipe)?,
            );
        }
        Ok(())
    }
}
