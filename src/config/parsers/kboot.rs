// SPDX-License-Identifier: MIT

//! A parser for kboot-style single-file manifests.
//!
//! Example configuration:
//!
//! ```text
//! # a comment
//! root=/dev/sda1
//! default=linux
//! linux='/boot/vmlinux initrd=/boot/initrd.img quiet'
//! rescue=/boot/vmlinux-rescue
//! ```
//!
//! Each `name=value` record other than the global defaults (`root`,
//! `initrd`, `video`) defines one boot option. The value is an image path
//! followed by kernel parameters; `root=` and `initrd=` parameters are
//! lifted out of the command line, fall back to the global defaults, and are
//! re-prepended in canonical order. An entry carrying only an image path
//! boots with an empty command line; the defaults do not apply to it.

use log::warn;
use smallvec::SmallVec;

use crate::{
    config::{BootOption, builder::BootOptionBuilder},
    config::parsers::ManifestParser,
    device::{Device, DeviceRegistry},
    system::{
        fs::{DeviceSource, SourceError},
        icons::{generic_icon_file, guess_device_type},
        paths::resolve_path,
    },
};

/// The manifest location on a device.
const KBOOT_CONF: &str = "/etc/kboot.conf";

/// Directive names that are recognized but define no boot option.
const IGNORED_DIRECTIVES: [&str; 3] = ["message", "timeout", "default"];

/// The root device synthesized when an entry has an initrd but no root.
const RAMDISK_ROOT: &str = "/dev/ram0";

/// Inheritable defaults scoped to one manifest parse.
///
/// Populated by `root=`, `initrd=`, and `video=` records preceding the entry
/// definitions; consulted by entries that omit the corresponding parameter.
#[derive(Default)]
struct SessionDefaults {
    /// Default root device for entries without an inline `root=`.
    root: Option<String>,

    /// Default initrd for entries without an inline `initrd=`.
    initrd: Option<String>,

    /// Video mode hint; captured but not consumed by entries.
    video: Option<String>,
}

impl SessionDefaults {
    /// Stores a record if its name is one of the global defaults.
    /// Returns whether the record was consumed.
    fn store(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "root" => &mut self.root,
            "initrd" => &mut self.initrd,
            "video" => &mut self.video,
            _ => return false,
        };
        *slot = Some(value.to_owned());
        true
    }
}

/// The kboot manifest parser.
pub struct KbootParser;

impl ManifestParser for KbootParser {
    fn name(&self) -> &'static str {
        "kboot.conf parser"
    }

    fn priority(&self) -> u8 {
        98
    }

    fn parse(&self, source: &dyn DeviceSource, registry: &mut DeviceRegistry) -> bool {
        let content = match source.read_to_string(KBOOT_CONF) {
            Ok(content) => content,
            Err(SourceError::NotFound(_)) => return false,
            Err(e) => {
                warn!("[KBOOT PARSER]: {e}");
                return false;
            }
        };

        let mut device_index = None;
        for (name, option) in parse_manifest(&content, source.id()) {
            // register the device lazily, on the first valid entry
            let index = match device_index {
                Some(index) => index,
                None => {
                    let icon = generic_icon_file(guess_device_type(source.id()));
                    match registry.add_device(Device::new(source.id(), icon)) {
                        Ok(index) => *device_index.insert(index),
                        Err(e) => {
                            warn!("[KBOOT PARSER]: {e}");
                            return false;
                        }
                    }
                }
            };
            if let Err(e) = registry.add_option(index, option) {
                warn!("[KBOOT PARSER]: dropping entry \"{name}\": {e}");
            }
        }
        device_index.is_some()
    }
}

/// Parses whole-manifest text into named boot options, in file order.
///
/// Exposed within the crate so the entry grammar can be tested without a
/// [`DeviceSource`].
pub(crate) fn parse_manifest(content: &str, device: &str) -> Vec<(String, BootOption)> {
    let mut defaults = SessionDefaults::default();
    let mut options = Vec::new();

    for line in content.lines() {
        let Some((name, value)) = split_record(line) else {
            continue;
        };
        if name.starts_with('#') {
            continue;
        }
        if IGNORED_DIRECTIVES.contains(&name) {
            continue;
        }
        if defaults.store(name, value) {
            continue;
        }
        match parse_entry(name, value, device, &defaults) {
            Some(option) => options.push((name.to_owned(), option)),
            None => warn!("[KBOOT PARSER]: skipping malformed entry \"{name}\""),
        }
    }
    options
}

/// Splits one line into a trimmed `name=value` record.
///
/// Lines without `=` carry a bare value and define nothing; they are
/// reported as [`None`] along with empty lines.
fn split_record(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

/// Parses one entry value: an optionally quoted `image-path [param ...]`
/// expression. Returns [`None`] if the value is empty after unquoting.
fn parse_entry(
    name: &str,
    value: &str,
    device: &str,
    defaults: &SessionDefaults,
) -> Option<BootOption> {
    let value = value.trim_matches(|c| c == '"' || c == '\'');
    if value.is_empty() {
        return None;
    }

    let (image, params) = match value.split_once(' ') {
        Some((image, params)) => (image, params),
        None => (value, ""),
    };

    // an entry with no parameters at all takes none of the session defaults
    if params.trim().is_empty() {
        return Some(
            BootOptionBuilder::new(name, resolve_path(image, device))
                .subtitle(image)
                .build(),
        );
    }

    let mut root = None;
    let mut initrd = None;
    let mut tail: SmallVec<[&str; 8]> = SmallVec::new();

    for token in params.split_ascii_whitespace() {
        match token.split_once('=') {
            Some(("root", v)) => root = Some(v),
            Some(("initrd", v)) => initrd = Some(v),
            // bare words and unrecognized key=value pairs pass through
            _ => tail.push(token),
        }
    }

    let root = root.or(defaults.root.as_deref());
    let initrd = initrd.or(defaults.initrd.as_deref());

    let mut cmdline: SmallVec<[String; 8]> = SmallVec::new();
    match (root, initrd) {
        (Some(root), _) => cmdline.push(format!("root={root}")),
        // an initrd without a root gets a ramdisk root faked up
        (None, Some(_)) => cmdline.push(format!("root={RAMDISK_ROOT}")),
        (None, None) => (),
    }
    if let Some(initrd) = initrd {
        cmdline.push(format!("initrd={initrd}"));
    }
    cmdline.extend(tail.iter().map(|s| (*s).to_owned()));
    let cmdline = cmdline.join(" ");

    let subtitle = if cmdline.is_empty() {
        image.to_owned()
    } else {
        format!("{image} {cmdline}")
    };

    let builder = BootOptionBuilder::new(name, resolve_path(image, device))
        .subtitle(subtitle)
        .boot_args(cmdline)
        .assign_if_some(
            initrd.map(|i| resolve_path(i, device)),
            BootOptionBuilder::initrd_path,
        );
    Some(builder.build())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_global_root_inheritance() {
        let manifest = "root=/dev/sda1\nlinux=/boot/vmlinux quiet\n";
        let options = parse_manifest(manifest, "sda1");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].1.boot_args, "root=/dev/sda1 quiet");
    }

    #[test]
    fn test_inline_root_wins() {
        let manifest = "root=/dev/sda1\nlinux=/vmlinux root=/dev/sdb2\n";
        let options = parse_manifest(manifest, "sda1");
        assert_eq!(options[0].1.boot_args, "root=/dev/sdb2");
    }

    #[test]
    fn test_initrd_implies_ramdisk_root() {
        let manifest = "linux=/vmlinux initrd=/boot/initrd\n";
        let options = parse_manifest(manifest, "sda1");
        assert_eq!(options[0].1.boot_args, "root=/dev/ram0 initrd=/boot/initrd");
        assert_eq!(
            options[0].1.initrd_path.as_deref(),
            Some("/var/bootpick/mnt/sda1/boot/initrd")
        );
    }

    #[test]
    fn test_quoting() {
        let manifest = "linux=\"/boot/vmlinuz root=/dev/sda1\"\n";
        let options = parse_manifest(manifest, "sda1");
        assert_eq!(
            options[0].1.boot_image_path,
            "/var/bootpick/mnt/sda1/boot/vmlinuz"
        );
        assert_eq!(options[0].1.boot_args, "root=/dev/sda1");
    }

    #[test]
    fn test_bare_and_unknown_params_pass_through() {
        let manifest = "linux=/vmlinux quiet video=text splash\n";
        let options = parse_manifest(manifest, "sda1");
        assert_eq!(options[0].1.boot_args, "quiet video=text splash");
    }

    #[test]
    fn test_ignored_directives_and_comments() {
        let manifest = "\
            # default=ignored comment\n\
            message=/etc/motd\n\
            timeout=10\n\
            default=linux\n\
            linux=/vmlinux\n";
        let options = parse_manifest(manifest, "sda1");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].0, "linux");
    }

    #[test]
    fn test_globals_not_surfaced() {
        let manifest = "root=/dev/sda1\ninitrd=/initrd.img\nvideo=1024x768\n";
        assert!(parse_manifest(manifest, "sda1").is_empty());
    }

    #[test]
    fn test_image_only_entry() {
        let manifest = "rescue=/boot/vmlinux-rescue\n";
        let options = parse_manifest(manifest, "sda1");
        assert_eq!(options[0].1.boot_args, "");
        assert_eq!(options[0].1.subtitle.as_deref(), Some("/boot/vmlinux-rescue"));
    }

    #[test]
    fn test_image_only_entry_ignores_defaults() {
        let manifest = "root=/dev/sda1\ninitrd=/initrd.img\nrescue=/vmlinux-rescue\n";
        let options = parse_manifest(manifest, "sda1");
        assert_eq!(options.len(), 1);
        // the defaults only back entries that carry parameters of their own
        assert_eq!(options[0].1.boot_args, "");
        assert_eq!(options[0].1.initrd_path, None);
    }

    #[test]
    fn test_title_and_subtitle() {
        let manifest = "linux=/vmlinux root=/dev/sda1 quiet\n";
        let options = parse_manifest(manifest, "sda1");
        assert_eq!(options[0].1.title, "linux");
        assert_eq!(
            options[0].1.subtitle.as_deref(),
            Some("/vmlinux root=/dev/sda1 quiet")
        );
    }

    #[test]
    fn test_round_trip_order() {
        let manifest = "a=/vmlinux-a\nb=/vmlinux-b\nc=/vmlinux-c\n";
        let options = parse_manifest(manifest, "sda1");
        let names: Vec<&str> = options.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(options.iter().all(|(_, o)| !o.boot_image_path.is_empty()));
    }

    #[test]
    fn test_empty_quoted_value_skipped() {
        let manifest = "linux=''\n";
        assert!(parse_manifest(manifest, "sda1").is_empty());
    }

    proptest! {
        #[test]
        fn doesnt_panic(content in any::<String>()) {
            let _ = parse_manifest(&content, "sda1");
        }
    }
}
