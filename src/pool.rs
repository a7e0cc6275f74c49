use core::array;

use crate::address::DeviceAddress;
use crate::device::DeviceEntry;
use crate::AddressError;

/// Highest local address a hub can be issued (3 bit field)
const MAX_HUB_LOCAL: u8 = 7;

/// Hub local addresses are unique, so a chain of parents cannot be longer
/// than this
const MAX_HUB_DEPTH: u8 = 7;

/// Fixed-capacity table of addressed devices on a single-root-port host.
///
/// Entry 0 is permanently reserved: it answers lookups for the
/// enumeration-time address 0 with a valid default control endpoint record.
/// Entries are identified by table index and never relocated; addresses are
/// resolved to indices by scanning on every call, so references must not be
/// cached across calls.
///
/// All operations are bounded scans, no allocation, no locking. If the pool
/// is shared with an interrupt context the caller provides the mutex.
pub struct AddressPool<const MAX_DEVICES: usize> {
    // highest local address issued to a hub, kept to avoid hub address duplication
    hub_counter: u8,
    devices: [DeviceEntry; MAX_DEVICES],
}

impl<const MAX_DEVICES: usize> AddressPool<MAX_DEVICES> {
    pub fn new() -> Self {
        AddressPool {
            hub_counter: 0,
            devices: array::from_fn(|_| DeviceEntry::new()),
        }
    }

    /// Allocates an address for a device attached to `parent` on `port`.
    ///
    /// Anything plugged directly into the root port gets one of the two
    /// fixed root addresses. A new hub is issued the next free hub local
    /// address instead of its port number. A returned address is never 0.
    pub fn alloc_address(
        &mut self,
        parent: DeviceAddress,
        is_hub: bool,
        port: u8,
    ) -> Result<DeviceAddress, AddressError> {
        if u8::from(parent) > 127 {
            return Err(AddressError::InvalidParent);
        }
        if port > MAX_HUB_LOCAL {
            return Err(AddressError::InvalidPort);
        }
        if !parent.is_default() && !parent.is_hub() {
            return Err(AddressError::NotAHub);
        }
        let index = self.find_free_index().ok_or(AddressError::TooManyDevices)?;

        let address = if parent.is_default() {
            if is_hub {
                DeviceAddress::ROOT_HUB
            } else {
                DeviceAddress::ROOT_DEVICE
            }
        } else if is_hub {
            if self.hub_counter == MAX_HUB_LOCAL {
                return Err(AddressError::TooManyHubs);
            }
            self.hub_counter += 1;
            DeviceAddress::encode(parent.local_address(), true, self.hub_counter)
        } else {
            DeviceAddress::encode(parent.local_address(), false, port)
        };

        let device = &mut self.devices[index];
        device.address = address;
        device.parent = parent;
        Ok(address)
    }

    /// Releases `address` and, for hubs, everything attached below it.
    ///
    /// Freeing the reserved root hub address invalidates the entire
    /// topology and resets the pool. Unknown or already freed addresses are
    /// ignored so that disconnect races stay harmless.
    pub fn free_address(&mut self, address: DeviceAddress) {
        if address == DeviceAddress::ROOT_HUB {
            self.init_all();
            return;
        }
        if address.is_default() {
            return;
        }
        if let Some(index) = self.find_index(address) {
            self.free_by_index(index, 0);
        }
    }

    /// Entry for `address`. Address 0 resolves to the reserved entry 0,
    /// valid even on an empty pool.
    pub fn get_device(&self, address: DeviceAddress) -> Option<&DeviceEntry> {
        if address.is_default() {
            return Some(&self.devices[0]);
        }
        self.find_index(address).map(|index| &self.devices[index])
    }

    pub fn get_device_mut(&mut self, address: DeviceAddress) -> Option<&mut DeviceEntry> {
        if address.is_default() {
            return Some(&mut self.devices[0]);
        }
        self.find_index(address).map(move |index| &mut self.devices[index])
    }

    /// Addressed devices in ascending table order
    pub fn devices(&self) -> impl Iterator<Item = &DeviceEntry> + '_ {
        self.devices[1..].iter().filter(|dev| !dev.address.is_default())
    }

    pub fn devices_mut(&mut self) -> impl Iterator<Item = &mut DeviceEntry> + '_ {
        self.devices[1..].iter_mut().filter(|dev| !dev.address.is_default())
    }

    /// Highest hub local address currently issued.
    /// An upper bound on attached hubs, not an exact live count: lower
    /// addresses freed out of order stay unavailable until the count drops.
    pub fn count_hubs(&self) -> u8 {
        self.hub_counter
    }

    pub fn count_devices(&self) -> u8 {
        self.devices().count() as u8
    }

    pub fn capacity(&self) -> usize {
        MAX_DEVICES
    }

    fn init_all(&mut self) {
        for device in &mut self.devices[1..] {
            device.init();
        }
        self.hub_counter = 0;
    }

    // Frees one entry; a hub takes its whole subtree with it, children
    // first. Past the depth bound the entry is still freed, just without
    // cascading, so the parent scan always makes progress.
    fn free_by_index(&mut self, index: usize, depth: u8) {
        // entry 0 is reserved and never freed
        if index == 0 {
            return;
        }
        let address = self.devices[index].address;
        if address.is_hub() && depth <= MAX_HUB_DEPTH {
            // rescan from the slot just freed, remaining children can only
            // be at equal or higher indices
            let mut start = 1;
            while let Some(child) = self.find_child_index(address, start) {
                self.free_by_index(child, depth + 1);
                start = child;
            }
            // the highest hub local address is reclaimed for reuse
            if self.hub_counter == address.local_address() {
                self.hub_counter -= 1;
            }
        }
        self.devices[index].init();
    }

    fn find_index(&self, address: DeviceAddress) -> Option<usize> {
        (1..MAX_DEVICES).find(|&i| self.devices[i].address == address)
    }

    fn find_free_index(&self) -> Option<usize> {
        (1..MAX_DEVICES).find(|&i| self.devices[i].address.is_default())
    }

    fn find_child_index(&self, parent: DeviceAddress, start: usize) -> Option<usize> {
        (start.max(1)..MAX_DEVICES).find(|&i| self.devices[i].parent == parent)
    }
}

impl<const MAX_DEVICES: usize> Default for AddressPool<MAX_DEVICES> {
    fn default() -> Self {
        Self::new()
    }
}
