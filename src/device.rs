use heapless::Vec;

use crate::address::DeviceAddress;
use crate::class::DeviceClass;
use crate::endpoint::EndpointRecord;
use crate::AddressError;

/// Endpoint records a single device entry can hold
pub const MAX_ENDPOINTS: usize = 8;

/// One slot of the device table.
///
/// A freshly initialized entry is unaddressed and holds only the default
/// control endpoint record; enumeration logic fills in the class and the
/// real endpoint records once the descriptors have been read.
#[derive(Clone, Debug)]
pub struct DeviceEntry {
    pub(crate) address: DeviceAddress,
    pub(crate) parent: DeviceAddress,
    device_class: u8,
    endpoints: Vec<EndpointRecord, MAX_ENDPOINTS>,
}

impl DeviceEntry {
    pub(crate) fn new() -> Self {
        let mut entry = DeviceEntry {
            address: DeviceAddress::DEFAULT,
            parent: DeviceAddress::DEFAULT,
            device_class: 0,
            endpoints: Vec::new(),
        };
        entry.init();
        entry
    }

    /// Back to the unaddressed state: no class, only the default control record
    pub(crate) fn init(&mut self) {
        self.address = DeviceAddress::DEFAULT;
        self.parent = DeviceAddress::DEFAULT;
        self.device_class = 0;
        self.endpoints.clear();
        // cannot fail, the vec was just cleared
        let _ = self.endpoints.push(EndpointRecord::control_default());
    }

    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Address of the hub this device hangs off, 0 when directly on the root port
    pub fn parent(&self) -> DeviceAddress {
        self.parent
    }

    /// Raw class code from the device descriptor, 0 until enumerated
    pub fn device_class(&self) -> u8 {
        self.device_class
    }

    pub fn set_device_class(&mut self, class: u8) {
        self.device_class = class;
    }

    /// Typed view of the class code
    pub fn class(&self) -> Option<DeviceClass> {
        DeviceClass::try_from(self.device_class).ok()
    }

    /// The control endpoint record, present in every state
    pub fn ep0(&self) -> &EndpointRecord {
        &self.endpoints[0]
    }

    pub fn ep0_mut(&mut self) -> &mut EndpointRecord {
        &mut self.endpoints[0]
    }

    pub fn endpoint(&self, endpoint_address: u8) -> Option<&EndpointRecord> {
        self.endpoints.iter().find(|ep| ep.endpoint_address == endpoint_address)
    }

    pub fn endpoint_mut(&mut self, endpoint_address: u8) -> Option<&mut EndpointRecord> {
        self.endpoints.iter_mut().find(|ep| ep.endpoint_address == endpoint_address)
    }

    pub fn endpoints(&self) -> &[EndpointRecord] {
        &self.endpoints
    }

    /// Install a record parsed from an endpoint descriptor
    pub fn push_endpoint(&mut self, record: EndpointRecord) -> Result<(), AddressError> {
        self.endpoints.push(record).map_err(|_| AddressError::TooManyEndpoints)
    }
}
