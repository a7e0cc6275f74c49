//! Device address bookkeeping for the host side of the USB.
//!
//! The `AddressPool` hands out the single-byte addresses used by
//! single-root-port host controllers, encoding hub topology (parent hub,
//! port, hub flag) into the byte itself. It also owns the per-device
//! `EndpointRecord` state (data toggles, max packet size) that the transfer
//! driver consults between transactions.
//!
//! The pool performs no transfers and parses no descriptors; the enumeration
//! state machine decides when to allocate and free, and installs endpoint
//! records once it has read the descriptors.

#![no_std]

pub mod address;
pub mod class;
pub mod device;
pub mod endpoint;
pub mod pool;

pub use address::*;
pub use class::*;
pub use device::*;
pub use endpoint::*;
pub use pool::*;

/// Errors that can be generated when allocating addresses or endpoint records.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// Parent address has the reserved bit set
    InvalidParent,

    /// Port number does not fit the 3 bit field
    InvalidPort,

    /// Parent address does not belong to a hub
    NotAHub,

    /// No free entry left in the device table
    TooManyDevices,

    /// All seven hub local addresses are in use
    TooManyHubs,

    /// No room left for another endpoint record
    TooManyEndpoints,
}
