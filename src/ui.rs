// SPDX-License-Identifier: MIT

//! The two-pane selection state machine and its input plumbing.
//!
//! The left pane lists discovered devices, the right pane lists the boot
//! options of the committed device, and a focus highlight slides between
//! entries with an ease-out animation. No pixels are produced here; the
//! navigator emits damage rectangles and the host's renderer draws them.

pub mod animation;
pub mod geometry;
pub mod input;
pub mod navigator;

/// Which of the two panes something refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaneId {
    /// The left pane: discovered devices.
    Devices,

    /// The right pane: boot options of the committed device.
    Options,
}
