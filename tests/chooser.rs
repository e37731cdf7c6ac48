// SPDX-License-Identifier: MIT

//! End-to-end chooser flow: discover manifests from mounted device trees,
//! drive the navigator with keyboard input, and observe the launch intent.

use bootpick::{
    config::parsers::parse_device,
    device::DeviceRegistry,
    system::fs::DirSource,
    ui::{
        input::{Command, InputRouter, Key, RawEvent},
        navigator::{NavEvent, Navigator},
    },
};

/// Lays out a device tree in a temp dir and registers it.
fn discover(
    registry: &mut DeviceRegistry,
    id: &str,
    manifest_path: &str,
    manifest: &str,
) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create a temp dir");
    let full = dir.path().join(manifest_path.trim_start_matches('/'));
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create manifest dir");
    }
    std::fs::write(&full, manifest).expect("Failed to write manifest");

    let source = DirSource::new(id, dir.path());
    assert!(parse_device(&source, registry), "no parser claimed {id}");
    dir
}

/// Feeds a key press through the router into the navigator.
fn press(nav: &mut Navigator, registry: &DeviceRegistry, key: Key) {
    if let Some(command) = InputRouter::route(RawEvent::KeyDown(key)) {
        nav.handle(command, registry);
    }
}

/// Ticks until both pane animations settle.
fn settle(nav: &mut Navigator, registry: &DeviceRegistry) {
    for _ in 0..1000 {
        nav.tick(registry);
        if nav.is_idle() {
            return;
        }
    }
    panic!("navigator failed to settle");
}

#[test]
fn test_discover_navigate_launch() {
    let mut registry = DeviceRegistry::new();

    let _kboot_dir = discover(
        &mut registry,
        "sda1",
        "/etc/kboot.conf",
        "root=/dev/sda1\nlinux='/boot/vmlinux quiet'\nrescue=/boot/vmlinux-rescue\n",
    );
    let _yaboot_dir = discover(
        &mut registry,
        "sdb2",
        "/etc/yaboot.conf",
        "init-message=\"Install disk\"\n\
         image=/vmlinux\n\
         label=install\n\
         root=/dev/sdb2\n\
         read-only\n\
         initrd=/initrd.img\n",
    );

    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.device(1).map(bootpick::device::Device::description),
        Some("Install disk")
    );

    let mut nav = Navigator::new(1024, 768);
    nav.device_added(0, &registry);
    nav.device_added(1, &registry);
    settle(&mut nav, &registry);

    // step to the second device; its options appear only after the slide
    press(&mut nav, &registry, Key::Down);
    settle(&mut nav, &registry);
    assert_eq!(nav.selected_device(), Some(1));

    // move to the option pane and confirm the first entry
    press(&mut nav, &registry, Key::Right);
    settle(&mut nav, &registry);
    press(&mut nav, &registry, Key::Enter);

    let launches: Vec<_> = nav
        .take_events()
        .into_iter()
        .filter_map(|event| match event {
            NavEvent::Launch(payload) => Some(payload),
            _ => None,
        })
        .collect();
    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].kernel, "/var/bootpick/mnt/sdb2/vmlinux");
    assert_eq!(
        launches[0].initrd.as_deref(),
        Some("/var/bootpick/mnt/sdb2/initrd.img")
    );
    assert_eq!(launches[0].cmdline, "root=/dev/sdb2 ro ");
}

#[test]
fn test_kboot_device_options_in_manifest_order() {
    let mut registry = DeviceRegistry::new();
    let _dir = discover(
        &mut registry,
        "sda1",
        "/etc/kboot.conf",
        "linux=/vmlinux\nrescue=/vmlinux-rescue\n",
    );

    let titles: Vec<&str> = registry
        .device(0)
        .expect("device missing")
        .options()
        .iter()
        .map(|o| o.title.as_str())
        .collect();
    assert_eq!(titles, ["linux", "rescue"]);
}

#[test]
fn test_device_without_manifest_contributes_nothing() {
    let dir = tempfile::tempdir().expect("Failed to create a temp dir");
    let source = DirSource::new("sdc1", dir.path());

    let mut registry = DeviceRegistry::new();
    assert!(!parse_device(&source, &mut registry));
    assert!(registry.is_empty());
}
