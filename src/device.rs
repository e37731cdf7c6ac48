// SPDX-License-Identifier: MIT

//! The in-memory registry of discovered boot devices.
//!
//! A [`Device`] is one bootable source (typically a block device) holding an
//! ordered list of [`BootOption`]s, in manifest order. The [`DeviceRegistry`]
//! is pure data: parsers append into it during discovery, the navigator reads
//! it for layout and selection, and those two never overlap in time.
//!
//! Both the device list and each device's option list are growable but
//! capacity-bounded; an insertion past the bound is rejected with
//! [`RegistryError::CapacityExceeded`] and leaves the registry untouched.

use thiserror::Error;

use crate::{config::BootOption, system::icons::Icon};

/// The maximum number of devices the registry will hold.
pub const MAX_DEVICES: usize = 16;

/// The maximum number of boot options one device will hold.
pub const MAX_OPTIONS: usize = 16;

/// Errors indicating that the registry rejected a mutation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The device or option list was already at its capacity bound.
    #[error("Registry is full ({0} entries)")]
    CapacityExceeded(usize),

    /// The given device index does not name a registered device.
    #[error("No device at index {0}")]
    InvalidDevice(usize),

    /// A device with the same id is already registered.
    #[error("Device \"{0}\" is already registered")]
    DuplicateDevice(String),
}

/// One discovered bootable device and its options.
#[derive(Debug)]
pub struct Device {
    /// Stable identifier of the source, such as a block device name.
    pub id: String,

    /// Human label for the device, if the manifest provided one.
    pub description: Option<String>,

    /// Badge image handle, resolved by the device-type guesser.
    pub icon: Icon,

    /// The boot options, in manifest order.
    options: Vec<BootOption>,
}

impl Device {
    /// Creates a device with no options yet.
    pub fn new(id: impl Into<String>, icon: Icon) -> Self {
        Self {
            id: id.into(),
            description: None,
            icon,
            options: Vec::new(),
        }
    }

    /// The human label, falling back to the device id.
    #[must_use = "Has no effect if the result is unused"]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.id)
    }

    /// The boot options of this device, in manifest order.
    #[must_use = "Has no effect if the result is unused"]
    pub fn options(&self) -> &[BootOption] {
        &self.options
    }

    /// Returns one boot option by index, if it exists.
    #[must_use = "Has no effect if the result is unused"]
    pub fn option(&self, index: usize) -> Option<&BootOption> {
        self.options.get(index)
    }
}

/// The storage for discovered devices.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    /// The registered devices, in discovery order.
    devices: Vec<Device>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use = "Has no effect if the result is unused"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a device, returning its index.
    ///
    /// Indices are stable until the next [`Self::remove_device`].
    ///
    /// # Errors
    ///
    /// May return an `Error` if the registry already holds [`MAX_DEVICES`]
    /// devices, or a device with the same id is already registered.
    pub fn add_device(&mut self, device: Device) -> Result<usize, RegistryError> {
        if self.devices.len() >= MAX_DEVICES {
            return Err(RegistryError::CapacityExceeded(MAX_DEVICES));
        }
        if self.find_device(&device.id).is_some() {
            return Err(RegistryError::DuplicateDevice(device.id));
        }
        self.devices.push(device);
        Ok(self.devices.len() - 1)
    }

    /// Appends a boot option to the device at `device_index`, returning the
    /// option's index within that device.
    ///
    /// # Errors
    ///
    /// May return an `Error` if `device_index` is out of range, or the
    /// device already holds [`MAX_OPTIONS`] options.
    pub fn add_option(
        &mut self,
        device_index: usize,
        option: BootOption,
    ) -> Result<usize, RegistryError> {
        let device = self
            .devices
            .get_mut(device_index)
            .ok_or(RegistryError::InvalidDevice(device_index))?;
        if device.options.len() >= MAX_OPTIONS {
            return Err(RegistryError::CapacityExceeded(MAX_OPTIONS));
        }
        device.options.push(option);
        Ok(device.options.len() - 1)
    }

    /// Removes the device with the given id, compacting the list.
    ///
    /// Returns the index the device occupied, so the navigator can re-derive
    /// its selection, or [`None`] if no device matched. Indices of devices
    /// after the removed one shift down by one.
    pub fn remove_device(&mut self, id: &str) -> Option<usize> {
        let index = self.find_device(id)?;
        self.devices.remove(index);
        Some(index)
    }

    /// Linear search for a device by id.
    #[must_use = "Has no effect if the result is unused"]
    pub fn find_device(&self, id: &str) -> Option<usize> {
        self.devices.iter().position(|dev| dev.id == id)
    }

    /// Returns a device by index, if it exists.
    #[must_use = "Has no effect if the result is unused"]
    pub fn device(&self, index: usize) -> Option<&Device> {
        self.devices.get(index)
    }

    /// The registered devices, in discovery order.
    #[must_use = "Has no effect if the result is unused"]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// The number of registered devices.
    #[must_use = "Has no effect if the result is unused"]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no devices are registered.
    #[must_use = "Has no effect if the result is unused"]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// The number of options held by the device at `index`, 0 if out of range.
    #[must_use = "Has no effect if the result is unused"]
    pub fn option_count(&self, index: usize) -> usize {
        self.devices.get(index).map_or(0, |dev| dev.options.len())
    }
}
