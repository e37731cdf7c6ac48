// SPDX-License-Identifier: MIT

//! Reading manifest files from a discovered device.
//!
//! Parsers never touch the filesystem directly; they go through
//! [`DeviceSource`], which hands them whole-file text for a path relative to
//! one device. [`DirSource`] is the stock implementation for devices the
//! host has mounted under a directory. Tests substitute an in-memory source.

use std::{io, path::PathBuf};

use thiserror::Error;

/// An error that may result from reading a device-relative path.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file does not exist on this device.
    ///
    /// For manifest lookups this is not a failure, just "no device from
    /// this dialect".
    #[error("\"{0}\" does not exist on this device")]
    NotFound(String),

    /// The file exists but could not be read.
    #[error("Failed to read \"{0}\"")]
    Io(String, #[source] io::Error),
}

/// Read access to the contents of one discovered device.
pub trait DeviceSource {
    /// The stable device identifier, such as `sda1`.
    fn id(&self) -> &str;

    /// Reads the file at a device-relative path into a string.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the file is absent or unreadable.
    fn read_to_string(&self, path: &str) -> Result<String, SourceError>;
}

/// A [`DeviceSource`] for a device mounted under a host directory.
pub struct DirSource {
    /// The device identifier.
    id: String,

    /// The host directory holding the device's contents.
    root: PathBuf,
}

impl DirSource {
    /// Creates a source for the device `id` mounted at `root`.
    pub fn new(id: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
        }
    }
}

impl DeviceSource for DirSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn read_to_string(&self, path: &str) -> Result<String, SourceError> {
        let full = self.root.join(path.trim_start_matches('/'));
        std::fs::read_to_string(&full).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(path.to_owned())
            } else {
                SourceError::Io(path.to_owned(), e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_source() {
        let dir = tempfile::tempdir().expect("Failed to create a temp dir");
        std::fs::create_dir_all(dir.path().join("etc")).expect("Failed to create etc dir");
        std::fs::write(dir.path().join("etc/kboot.conf"), "linux='/vmlinux'\n")
            .expect("Failed to write manifest");

        let source = DirSource::new("sda1", dir.path());
        assert_eq!(source.id(), "sda1");
        assert_eq!(
            source
                .read_to_string("/etc/kboot.conf")
                .expect("Failed to read manifest back"),
            "linux='/vmlinux'\n"
        );
        assert!(matches!(
            source.read_to_string("/etc/yaboot.conf"),
            Err(SourceError::NotFound(_))
        ));
    }
}
