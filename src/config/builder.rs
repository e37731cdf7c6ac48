// SPDX-License-Identifier: MIT

//! Boot option builder.

use crate::config::{BootOption, LaunchPayload};

/// A builder to configure a [`BootOption`].
///
/// The constructor takes the title and resolved image path up front, so a
/// half-built option without an image cannot exist.
///
/// # Example
///
/// ```
/// use bootpick::config::builder::BootOptionBuilder;
///
/// let option = BootOptionBuilder::new("linux", "/var/bootpick/mnt/sda1/vmlinux")
///     .boot_args("root=/dev/sda1 quiet")
///     .build();
/// assert_eq!(option.payload.cmdline, "root=/dev/sda1 quiet");
/// ```
#[must_use = "Has no effect if the result is unused"]
pub struct BootOptionBuilder {
    /// The inner [`BootOption`] that the builder operates on.
    option: BootOption,
}

impl BootOptionBuilder {
    /// Constructs a new [`BootOption`] with the required title and image.
    pub fn new(title: impl Into<String>, boot_image_path: impl Into<String>) -> Self {
        Self {
            option: BootOption {
                title: title.into(),
                subtitle: None,
                boot_image_path: boot_image_path.into(),
                initrd_path: None,
                boot_args: String::new(),
                payload: LaunchPayload::default(),
            },
        }
    }

    /// Sets the secondary label of a [`BootOption`].
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.option.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the resolved initrd path of a [`BootOption`].
    pub fn initrd_path(mut self, initrd_path: impl Into<String>) -> Self {
        self.option.initrd_path = Some(initrd_path.into());
        self
    }

    /// Sets the assembled command line of a [`BootOption`].
    pub fn boot_args(mut self, boot_args: impl Into<String>) -> Self {
        self.option.boot_args = boot_args.into();
        self
    }

    /// Assigns a value to a field in a [`BootOption`] if it is [`Some`].
    pub fn assign_if_some<F, T>(self, value: Option<T>, assign: F) -> Self
    where
        F: FnOnce(Self, T) -> Self,
    {
        if let Some(value) = value {
            assign(self, value)
        } else {
            self
        }
    }

    /// Builds a [`BootOption`], freezing the launch payload from the
    /// resolved fields.
    #[must_use = "Has no effect if the result is unused"]
    pub fn build(mut self) -> BootOption {
        self.option.payload = LaunchPayload {
            kernel: self.option.boot_image_path.clone(),
            initrd: self.option.initrd_path.clone(),
            cmdline: self.option.boot_args.clone(),
        };
        self.option
    }
}
