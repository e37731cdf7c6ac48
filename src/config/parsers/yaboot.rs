// SPDX-License-Identifier: MIT

//! A parser for yaboot-style labeled-stanza manifests.
//!
//! Each labeled stanza becomes one boot option. The global stanza can carry
//! an introductory message (used as the device description), a partition
//! override that re-targets path resolution, and a default-label reference.
//! This dialect is stricter than the single-file form: a missing default
//! label or an empty stanza list aborts the whole manifest rather than
//! yielding a partial device.
//!
//! The command line is synthesized per stanza, either verbatim from a
//! `literal` attribute or composed from the `root` / `read-only` /
//! `read-write` / `ramdisk` / `initrd-size` / `novideo` / `append`
//! attributes in that fixed order.

use log::warn;

use crate::{
    BootResult,
    config::{BootOption, builder::BootOptionBuilder},
    config::parsers::ManifestParser,
    device::{Device, DeviceRegistry},
    system::{
        fs::{DeviceSource, SourceError},
        icons::{generic_icon_file, guess_device_type},
        paths::{resolve_path, rewrite_partition},
    },
};

pub mod cfg;

use cfg::{ConfFile, Stanza};

/// The manifest locations tried on a device, in order.
const YABOOT_CONF: [&str; 2] = ["/etc/yaboot.conf", "/yaboot.conf"];

/// The yaboot manifest parser.
pub struct YabootParser;

impl ManifestParser for YabootParser {
    fn name(&self) -> &'static str {
        "yaboot.conf parser"
    }

    fn priority(&self) -> u8 {
        99
    }

    fn parse(&self, source: &dyn DeviceSource, registry: &mut DeviceRegistry) -> bool {
        match try_parse(source, registry) {
            Ok(registered) => registered,
            Err(e) => {
                warn!("[YABOOT PARSER]: {e}");
                false
            }
        }
    }
}

/// The fallible core of the dialect: reads the manifest, validates the
/// stanza structure, and registers the device with its options.
///
/// Returns whether a device was registered; a missing manifest or one with
/// no resolvable stanza is quiet, structural problems propagate.
///
/// # Errors
///
/// May return an `Error` if the manifest is unreadable, fails stanza
/// validation, or the registry rejects the device.
fn try_parse(source: &dyn DeviceSource, registry: &mut DeviceRegistry) -> BootResult<bool> {
    let content = match read_manifest(source) {
        Ok(content) => content,
        Err(SourceError::NotFound(_)) => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    let conf = ConfFile::parse(&content);
    conf.validate()?;

    // the partition override re-targets resolution for every stanza
    let base = resolution_base(&conf, source.id());
    let options: Vec<BootOption> = conf
        .labels()
        .filter_map(|label| {
            let stanza = conf.stanza(label)?;
            process_image(label, stanza, &base)
        })
        .collect();
    if options.is_empty() {
        warn!("[YABOOT PARSER]: no stanza with a resolvable image");
        return Ok(false);
    }

    let mut device = Device::new(
        source.id(),
        generic_icon_file(guess_device_type(source.id())),
    );
    device.description = init_message(&conf);

    let index = registry.add_device(device)?;
    for option in options {
        if let Err(e) = registry.add_option(index, option) {
            warn!("[YABOOT PARSER]: dropping option: {e}");
        }
    }
    Ok(true)
}

/// Reads the manifest from its primary location, falling back to the
/// root-level one.
fn read_manifest(source: &dyn DeviceSource) -> Result<String, SourceError> {
    for path in YABOOT_CONF {
        match source.read_to_string(path) {
            Ok(content) => return Ok(content),
            Err(SourceError::NotFound(_)) => (),
            Err(e) => return Err(e),
        }
    }
    Err(SourceError::NotFound(YABOOT_CONF[0].to_owned()))
}

/// The first line of the global introductory message, if any.
fn init_message(conf: &ConfFile) -> Option<String> {
    let message = conf.globals().get("init-message")?;
    Some(message.lines().next().unwrap_or(message).to_owned())
}

/// The device id stanza paths resolve against, after applying a plain
/// integer `partition` override (trailing digits stripped and replaced).
fn resolution_base(conf: &ConfFile, device: &str) -> String {
    match conf.globals().get("partition").map(str::parse::<u32>) {
        Some(Ok(partition)) => rewrite_partition(device, partition),
        _ => device.to_owned(),
    }
}

/// Synthesizes one boot option from a labeled stanza, or [`None`] if the
/// stanza has no image attribute.
fn process_image(label: &str, stanza: &Stanza, base: &str) -> Option<BootOption> {
    let Some(image) = stanza.get("image") else {
        warn!("[YABOOT PARSER]: stanza \"{label}\" has no image");
        return None;
    };

    let builder = BootOptionBuilder::new(label, resolve_path(image, base))
        .boot_args(make_params(stanza, None))
        .assign_if_some(
            stanza.get("initrd").map(|i| resolve_path(i, base)),
            BootOptionBuilder::initrd_path,
        );
    Some(builder.build())
}

/// Assembles a stanza's kernel command line.
///
/// A `literal` attribute overrides everything else; otherwise the composed
/// fields are appended in fixed order, each non-empty piece followed by one
/// space. Externally supplied `params` always go last.
fn make_params(stanza: &Stanza, params: Option<&str>) -> String {
    let mut buffer = String::new();

    if let Some(literal) = stanza.get("literal") {
        buffer.push_str(literal);
        if let Some(params) = params {
            if !literal.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(params);
        }
        return buffer;
    }

    if let Some(root) = stanza.get("root") {
        buffer.push_str("root=");
        buffer.push_str(root);
        buffer.push(' ');
    }
    if stanza.flag("read-only") {
        buffer.push_str("ro ");
    }
    if stanza.flag("read-write") {
        buffer.push_str("rw ");
    }
    if let Some(ramdisk) = stanza.get("ramdisk") {
        buffer.push_str("ramdisk=");
        buffer.push_str(ramdisk);
        buffer.push(' ');
    }
    if let Some(size) = stanza.get("initrd-size") {
        buffer.push_str("ramdisk_size=");
        buffer.push_str(size);
        buffer.push(' ');
    }
    if stanza.flag("novideo") {
        buffer.push_str("video=ofonly ");
    }
    if let Some(append) = stanza.get("append") {
        buffer.push_str(append);
        buffer.push(' ');
    }
    if let Some(params) = params {
        buffer.push_str(params);
    }
    buffer
}
