// SPDX-License-Identifier: MIT

//! Path resolution against a discovered device.
//!
//! Resolution is pure string computation. A manifest path is rewritten into
//! an absolute host path under the per-device mount directory; the
//! `device:path` form lets a manifest point at a file on a sibling device.

/// The directory under which the host mounts discovered devices.
pub const MOUNT_ROOT: &str = "/var/bootpick/mnt";

/// The mount directory of one device.
#[must_use = "Has no effect if the result is unused"]
pub fn mount_point(device: &str) -> String {
    format!("{MOUNT_ROOT}/{}", device.trim_start_matches("/dev/"))
}

/// Resolves a manifest path to an absolute host path.
///
/// A `device:path` prefix re-targets the resolution at that device instead
/// of `device`; otherwise the path is joined under [`mount_point`] of the
/// owning device. Paths already under [`MOUNT_ROOT`] pass through unchanged.
#[must_use = "Has no effect if the result is unused"]
pub fn resolve_path(path: &str, device: &str) -> String {
    if path.starts_with(MOUNT_ROOT) {
        return path.to_owned();
    }
    if let Some((dev, rest)) = path.split_once(':')
        && !dev.is_empty()
        && !dev.contains('/')
    {
        return format!("{}/{}", mount_point(dev), rest.trim_start_matches('/'));
    }
    format!(
        "{}/{}",
        mount_point(device),
        path.trim_start_matches('/')
    )
}

/// Rewrites the partition number of a device id.
///
/// Trailing digits are stripped and replaced by `partition`. Used by the
/// labeled-stanza dialect's global partition override.
#[must_use = "Has no effect if the result is unused"]
pub fn rewrite_partition(device: &str, partition: u32) -> String {
    let base = device.trim_end_matches(|c: char| c.is_ascii_digit());
    format!("{base}{partition}")
}
