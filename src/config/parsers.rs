// SPDX-License-Identifier: MIT

//! Parses device manifests of various dialects into registry entries.
//!
//! The currently supported dialects are as follows:
//! - yaboot-style labeled-stanza manifests (`/etc/yaboot.conf`)
//! - kboot-style single-file manifests (`/etc/kboot.conf`)
//!
//! Discovery invokes [`parse_device`] once per found device; the parsers are
//! tried in fixed priority order and the first one to register the device
//! wins. A manifest that is absent or yields no valid entries simply
//! contributes no device.

use log::debug;

use crate::{device::DeviceRegistry, system::fs::DeviceSource};

pub mod kboot;
pub mod yaboot;

/// A dialect parser turning one device's manifest into registry entries.
pub trait ManifestParser {
    /// A short name for logging.
    fn name(&self) -> &'static str;

    /// Fixed dispatch priority; higher runs first.
    fn priority(&self) -> u8;

    /// Parses the device's manifest, registering the device and its options
    /// on success. Returns whether a device was registered.
    fn parse(&self, source: &dyn DeviceSource, registry: &mut DeviceRegistry) -> bool;
}

/// Tries every dialect parser against a discovered device, in priority
/// order. Returns whether any parser registered the device.
pub fn parse_device(source: &dyn DeviceSource, registry: &mut DeviceRegistry) -> bool {
    // descending priority; yaboot (99) before kboot (98)
    let parsers: [&dyn ManifestParser; 2] = [&yaboot::YabootParser, &kboot::KbootParser];

    for parser in parsers {
        debug!("trying {} on device {}", parser.name(), source.id());
        if parser.parse(source, registry) {
            debug!("{} registered device {}", parser.name(), source.id());
            return true;
        }
    }
    false
}
