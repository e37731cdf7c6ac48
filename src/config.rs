// SPDX-License-Identifier: MIT

//! Provides [`BootOption`], one launchable kernel definition.
//!
//! A boot option is produced by a dialect parser while it scans one device's
//! manifest, and is immutable from then on. The navigator never inspects the
//! [`LaunchPayload`]; it only forwards it to the host's executor when the
//! operator confirms a selection.

pub mod builder;
pub mod parsers;

/// The data handed to the external executor at confirmation time.
///
/// Opaque to the navigator. The fields mirror what a kexec-style executor
/// needs: a kernel image, an optional initial ramdisk, and the assembled
/// command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchPayload {
    /// Absolute path of the kernel image.
    pub kernel: String,

    /// Absolute path of the initial ramdisk, if any.
    pub initrd: Option<String>,

    /// The kernel command line; may be empty.
    pub cmdline: String,
}

/// One launchable boot definition belonging to a device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootOption {
    /// The label shown to the operator.
    pub title: String,

    /// A secondary label, typically the image and command line.
    pub subtitle: Option<String>,

    /// Resolved, absolute path of the kernel image. Always set; an option
    /// that cannot resolve its image is discarded by the parser, never
    /// stored half-built.
    pub boot_image_path: String,

    /// Resolved, absolute path of the initial ramdisk, if any.
    pub initrd_path: Option<String>,

    /// The assembled kernel command line; may be empty.
    pub boot_args: String,

    /// The opaque launch data forwarded unexamined at confirmation.
    pub payload: LaunchPayload,
}
