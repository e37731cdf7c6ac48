// SPDX-License-Identifier: MIT

//! Seams toward the host environment.
//!
//! Everything in here is either pure string computation ([`paths`],
//! [`icons`]) or a narrow trait the host's discovery layer implements
//! ([`fs::DeviceSource`]). Mounting, udev, and framebuffer concerns stay on
//! the host side of these seams.

pub mod fs;
pub mod icons;
pub mod paths;
