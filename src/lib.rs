// SPDX-License-Identifier: MIT

//! The `bootpick` library crate.
//!
//! This is the decision core of a boot-time device and option chooser: it
//! discovers bootable devices through pluggable manifest parsers, stores
//! their boot options in an in-memory registry, and drives a two-pane
//! selection UI (devices on the left, options of the selected device on the
//! right) with animated focus transitions and keyboard, pointer, or joystick
//! input.
//!
//! Rendering, the event loop, device mounting, and the final kernel handoff
//! all belong to the host environment. The crate communicates with them
//! through narrow seams: [`system::fs::DeviceSource`] for reading manifests,
//! drained [`ui::navigator::NavEvent`]s for damage hints, status lines, and
//! launch intents.
//!
//! A typical host loop:
//!
//! ```no_run
//! use bootpick::{
//!     config::parsers::parse_device,
//!     device::DeviceRegistry,
//!     system::fs::DirSource,
//!     ui::navigator::Navigator,
//! };
//!
//! let mut registry = DeviceRegistry::new();
//! let source = DirSource::new("sda1", "/var/bootpick/mnt/sda1");
//! if parse_device(&source, &mut registry) {
//!     let mut nav = Navigator::new(1024, 768);
//!     nav.device_added(0, &registry);
//!     // feed nav with routed input commands and periodic ticks,
//!     // then drain nav.take_events() for damage and launch intents.
//! }
//! ```

/// The primary result type that wraps around [`crate::error::BootError`].
pub type BootResult<T> = Result<T, crate::error::BootError>;

pub mod config;
pub mod device;
pub mod error;
pub mod system;
pub mod ui;
