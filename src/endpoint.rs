/// Data toggle state of one direction of an endpoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Toggle {
    Data0,
    Data1,
}

impl Toggle {
    fn flip(self) -> Self {
        match self {
            Toggle::Data0 => Toggle::Data1,
            Toggle::Data1 => Toggle::Data0,
        }
    }
}

/// The type of transfer to use when talking to USB devices.
///
/// cf §9.6.6 of USB 2.0
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferType {
    /// High priority, low-level (Configuration, etc.)
    /// Some devices use control transfers for application data
    Control = 0,
    /// Constant throughput, reserved but possibly lossy (Video or audio stream, etc.)
    Isochronous = 1,
    /// Low priority, high throughput (Mass storage, network, etc.)
    Bulk = 2,
    /// High priority, low throughput (Mouse, Keyboard, etc.)
    Interrupt = 3,
}

impl From<u8> for TransferType {
    fn from(byte: u8) -> Self {
        match byte & 0b11 {
            0 => TransferType::Control,
            1 => TransferType::Isochronous,
            2 => TransferType::Bulk,
            3 => TransferType::Interrupt,
            _ => unreachable!(),
        }
    }
}

/// The direction of the transfer with the USB device.
///
/// cf §9.6.6 of USB 2.0
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Out,
    In,
}

/// USB endpoint parameters and transfer state.
///
/// The transfer driver reads and flips the toggles between transactions;
/// everything else is copied from the endpoint descriptor by the
/// enumeration logic.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointRecord {
    /// Endpoint address from the descriptor.
    /// Bit 7 indicates direction (ignored for control endpoints)
    pub endpoint_address: u8,

    pub transfer_type: TransferType,

    /// The maximum packet size for this endpoint
    pub max_packet_size: u16,

    /// Polling interval in frames
    pub interval: u8,

    snd_toggle: Toggle,
    rcv_toggle: Toggle,
}

impl EndpointRecord {
    /// Record shared by endpoint 0 of every device that has not been
    /// addressed yet: control, max packet size 8, both toggles on DATA0.
    pub const fn control_default() -> Self {
        EndpointRecord {
            endpoint_address: 0,
            transfer_type: TransferType::Control,
            max_packet_size: 8,
            interval: 0,
            snd_toggle: Toggle::Data0,
            rcv_toggle: Toggle::Data0,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.endpoint_address & 0x80 == 0 {
            Direction::Out
        } else {
            Direction::In
        }
    }

    /// Endpoint number without the direction bit
    pub fn number(&self) -> u8 {
        self.endpoint_address & 0x0F
    }

    pub fn snd_toggle(&self) -> Toggle {
        self.snd_toggle
    }

    pub fn rcv_toggle(&self) -> Toggle {
        self.rcv_toggle
    }

    pub fn flip_snd_toggle(&mut self) -> Toggle {
        self.snd_toggle = self.snd_toggle.flip();
        self.snd_toggle
    }

    pub fn flip_rcv_toggle(&mut self) -> Toggle {
        self.rcv_toggle = self.rcv_toggle.flip();
        self.rcv_toggle
    }

    /// Both directions back to DATA0, as after a bus or endpoint reset
    pub fn reset_toggles(&mut self) {
        self.snd_toggle = Toggle::Data0;
        self.rcv_toggle = Toggle::Data0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_control_record() {
        let ep = EndpointRecord::control_default();
        assert_eq!(ep.endpoint_address, 0);
        assert_eq!(ep.transfer_type, TransferType::Control);
        assert_eq!(ep.max_packet_size, 8);
        assert_eq!(ep.snd_toggle(), Toggle::Data0);
        assert_eq!(ep.rcv_toggle(), Toggle::Data0);
    }

    #[test]
    fn toggles_alternate_independently() {
        let mut ep = EndpointRecord::control_default();
        assert_eq!(ep.flip_snd_toggle(), Toggle::Data1);
        assert_eq!(ep.flip_snd_toggle(), Toggle::Data0);
        assert_eq!(ep.flip_snd_toggle(), Toggle::Data1);
        assert_eq!(ep.rcv_toggle(), Toggle::Data0);

        ep.reset_toggles();
        assert_eq!(ep.snd_toggle(), Toggle::Data0);
        assert_eq!(ep.rcv_toggle(), Toggle::Data0);
    }

    #[test]
    fn direction_from_address_bit() {
        let mut ep = EndpointRecord::control_default();
        ep.endpoint_address = 0x81;
        assert_eq!(ep.direction(), Direction::In);
        assert_eq!(ep.number(), 1);

        ep.endpoint_address = 0x02;
        assert_eq!(ep.direction(), Direction::Out);
        assert_eq!(ep.number(), 2);
    }

    #[test]
    fn transfer_type_from_attributes() {
        assert_eq!(TransferType::from(0x02), TransferType::Bulk);
        assert_eq!(TransferType::from(0x03), TransferType::Interrupt);
        // upper attribute bits are ignored
        assert_eq!(TransferType::from(0x0D), TransferType::Isochronous);
    }
}
