// SPDX-License-Identifier: MIT

//! Device type guessing and badge icon lookup.
//!
//! The chooser badges each discovered device with a generic icon matching
//! its guessed type. The guess is a cheap substring heuristic over the
//! device id; the host's artwork loader turns the [`Icon`] handle into
//! pixels.

/// An opaque handle to a badge image, resolved by the host's artwork loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon(pub String);

/// The broad device categories the chooser can badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceType {
    /// A fixed disk.
    Disk,

    /// A removable USB device.
    Usb,

    /// An optical drive.
    Optical,

    /// A network boot source.
    Network,

    /// Anything else.
    Unknown,
}

/// Guesses the type of a device from its id.
#[must_use = "Has no effect if the result is unused"]
pub fn guess_device_type(id: &str) -> DeviceType {
    let id = id.trim_start_matches("/dev/");
    if id.starts_with("usb") {
        DeviceType::Usb
    } else if id.starts_with("sr") || id.starts_with("cd") || id.starts_with("dvd") {
        DeviceType::Optical
    } else if id.starts_with("eth") || id.starts_with("net") {
        DeviceType::Network
    } else if id.starts_with("sd") || id.starts_with("hd") || id.starts_with("ps3d") {
        DeviceType::Disk
    } else {
        DeviceType::Unknown
    }
}

/// The generic badge icon for a device type.
#[must_use = "Has no effect if the result is unused"]
pub fn generic_icon_file(device_type: DeviceType) -> Icon {
    let name = match device_type {
        DeviceType::Disk => "hdd.png",
        DeviceType::Usb => "usbpen.png",
        DeviceType::Optical => "cdrom.png",
        DeviceType::Network => "network.png",
        DeviceType::Unknown => "unknown.png",
    };
    Icon(format!("artwork/{name}"))
}
