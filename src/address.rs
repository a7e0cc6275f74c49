use hash32::Hasher;

//    7   6   5   4   3   2   1   0
//  ---------------------------------
//  |   | H | P | P | P | A | A | A |
//  ---------------------------------
//
// H - set if the address belongs to a hub
// P - parent hub local address
// A - device address / port number in case of a hub
const MASK_LOCAL: u8 = 0x07;
const MASK_PARENT: u8 = 0x38;
const MASK_HUB: u8 = 0x40;

const PARENT_SHIFT: u8 = 3;

/// Bit-packed device address of a single-root-port host controller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// Address of any device that has not been assigned one yet
    pub const DEFAULT: DeviceAddress = DeviceAddress(0);

    /// Reserved address of a hub plugged directly into the root port.
    /// Freeing it stands for "root hub disconnected" and resets the pool.
    pub const ROOT_HUB: DeviceAddress = DeviceAddress(0x41);

    /// Fixed address of a plain device plugged directly into the root port
    pub const ROOT_DEVICE: DeviceAddress = DeviceAddress(0x01);

    /// Pack address fields into their byte form.
    /// Out of range values are truncated by the field masks, not validated.
    pub const fn encode(parent_local: u8, is_hub: bool, local: u8) -> Self {
        let mut addr = (local & MASK_LOCAL) | ((parent_local << PARENT_SHIFT) & MASK_PARENT);
        if is_hub {
            addr |= MASK_HUB;
        }
        DeviceAddress(addr)
    }

    /// Port number under the parent hub, or 1 for the sole root port device
    pub const fn local_address(&self) -> u8 {
        self.0 & MASK_LOCAL
    }

    /// Local address of the owning hub, 0 when parented directly on the root
    pub const fn parent_hub(&self) -> u8 {
        (self.0 & MASK_PARENT) >> PARENT_SHIFT
    }

    pub const fn is_hub(&self) -> bool {
        self.0 & MASK_HUB != 0
    }

    /// True for the enumeration-time address 0
    pub const fn is_default(&self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for DeviceAddress {
    fn from(addr: u8) -> Self {
        DeviceAddress(addr)
    }
}

impl From<DeviceAddress> for u8 {
    fn from(addr: DeviceAddress) -> Self {
        addr.0
    }
}

impl hash32::Hash for DeviceAddress {
    fn hash<H>(&self, state: &mut H) where H: Hasher {
        state.write(&[self.0])
    }
}
