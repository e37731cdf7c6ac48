// SPDX-License-Identifier: MIT

//! Provides [`Navigator`], the two-pane selection state machine.
//!
//! The navigator owns both pane cursors and their focus animations, consumes
//! classified [`Command`]s and periodic ticks, reads the
//! [`DeviceRegistry`] for counts and payloads, and emits [`NavEvent`]s for
//! the host to render and act on.
//!
//! Selection commit is asymmetric between the panes. An option-pane target
//! commits the moment it is set. A device-pane target only commits once the
//! focus box has visually arrived; until then the option pane keeps showing
//! the previous device's entries. Device removal is the exception: the old
//! selection may no longer exist, so the commit is immediate and only the
//! focus box catches up.

use log::debug;

use crate::{
    config::LaunchPayload,
    device::DeviceRegistry,
    ui::{
        PaneId,
        animation::FocusAnimation,
        geometry::{PaneMetrics, Rect},
        input::{Command, OverrideRequest},
    },
};

/// Which pane currently has input focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaneFocus {
    /// The device pane consumes directional input.
    Devices,

    /// The option pane consumes directional input.
    Options,
}

/// An effect the host must render or act on, drained via
/// [`Navigator::take_events`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    /// The given screen region of a pane needs repainting.
    Damage(PaneId, Rect),

    /// A line for the status message sink.
    Status(String),

    /// The operator confirmed a boot option; hand this to the executor.
    Launch(LaunchPayload),

    /// A session-terminating override; hand control back to the host.
    Override(OverrideRequest),
}

/// One pane's cursor, hover memory, and focus animation.
struct Pane {
    /// The pane's fixed grid.
    metrics: PaneMetrics,

    /// The targeted entry index; `-1` means none.
    index: i32,

    /// The last pointer-hit candidate; `-1` means none.
    hover: i32,

    /// The sliding focus box.
    anim: FocusAnimation,
}

impl Pane {
    /// Creates a pane with no selection and the focus box parked off-screen.
    fn new(metrics: PaneMetrics) -> Self {
        Self {
            metrics,
            index: -1,
            hover: -1,
            anim: FocusAnimation::resting_at(metrics.offscreen()),
        }
    }

    /// Starts a slide toward the focus position of `index`.
    fn retarget(&mut self, index: i32) {
        self.index = index;
        self.anim.retarget(self.metrics.focus_pos(index));
    }

    /// Clears cursor and hover and parks the focus box off-screen.
    fn reset(&mut self) {
        self.index = -1;
        self.hover = -1;
        self.anim.jump(self.metrics.offscreen());
    }

    /// The focus box at the current rendered position.
    fn focus_rect(&self) -> Rect {
        self.metrics.focus_rect(self.anim.current())
    }
}

/// The two-pane selection state machine.
pub struct Navigator {
    /// The left pane, listing devices.
    devices: Pane,

    /// The right pane, listing the committed device's options.
    options: Pane,

    /// Which pane consumes directional input.
    focus: PaneFocus,

    /// The committed device selection; `-1` means none.
    selected: i32,

    /// Whether a device-pane commit is waiting for the animation to settle.
    pending_commit: bool,

    /// Effects not yet drained by the host.
    events: Vec<NavEvent>,
}

impl Navigator {
    /// Creates a navigator for a screen of the given size. The device pane
    /// gets initial input focus.
    #[must_use = "Has no effect if the result is unused"]
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        Self {
            devices: Pane::new(PaneMetrics::device_pane(screen_height)),
            options: Pane::new(PaneMetrics::option_pane(screen_width, screen_height)),
            focus: PaneFocus::Devices,
            selected: -1,
            pending_commit: false,
            events: Vec::new(),
        }
    }

    /// Applies one classified input command.
    pub fn handle(&mut self, command: Command, registry: &DeviceRegistry) {
        match command {
            Command::MoveUp => self.move_selection(-1, registry),
            Command::MoveDown => self.move_selection(1, registry),
            Command::FocusDevicePane => self.focus_devices(),
            Command::FocusOptionPane => self.focus_options(registry),
            Command::Hover { x, y } => self.pointer_moved(x, y, registry),
            Command::Confirm { at } => self.confirm(at, registry),
            Command::CancelHover => {
                self.devices.hover = -1;
                self.options.hover = -1;
            }
            Command::Override(request) => self.events.push(NavEvent::Override(request)),
        }
    }

    /// Advances both focus animations by one host timer period.
    ///
    /// When the device-pane box arrives, the deferred device commit fires
    /// here, so the option list only refreshes once the highlight has
    /// visually arrived.
    pub fn tick(&mut self, registry: &DeviceRegistry) {
        for pane_id in [PaneId::Devices, PaneId::Options] {
            let pane = match pane_id {
                PaneId::Devices => &mut self.devices,
                PaneId::Options => &mut self.options,
            };
            if pane.anim.is_settled() {
                continue;
            }
            let before = pane.focus_rect();
            pane.anim.tick();
            let after = pane.focus_rect();
            self.events
                .push(NavEvent::Damage(pane_id, before.union(after)));
        }
        if self.pending_commit && self.devices.anim.is_settled() {
            self.pending_commit = false;
            self.commit_device(registry, false);
        }
    }

    /// Drains the pending effects, oldest first.
    #[must_use = "Has no effect if the result is unused"]
    pub fn take_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pushes a line at the status message sink.
    pub fn post_status(&mut self, text: impl Into<String>) {
        self.events.push(NavEvent::Status(text.into()));
    }

    /// The committed device index, or [`None`].
    #[must_use = "Has no effect if the result is unused"]
    pub fn selected_device(&self) -> Option<usize> {
        usize::try_from(self.selected).ok()
    }

    /// The targeted option index, or [`None`].
    #[must_use = "Has no effect if the result is unused"]
    pub fn selected_option(&self) -> Option<usize> {
        usize::try_from(self.options.index).ok()
    }

    /// Which pane consumes directional input.
    #[must_use = "Has no effect if the result is unused"]
    pub fn focus(&self) -> PaneFocus {
        self.focus
    }

    /// The focus box of a pane at its current rendered position.
    #[must_use = "Has no effect if the result is unused"]
    pub fn focus_box(&self, pane: PaneId) -> Rect {
        match pane {
            PaneId::Devices => self.devices.focus_rect(),
            PaneId::Options => self.options.focus_rect(),
        }
    }

    /// Whether both panes' animations are settled.
    #[must_use = "Has no effect if the result is unused"]
    pub fn is_idle(&self) -> bool {
        self.devices.anim.is_settled() && self.options.anim.is_settled()
    }

    /// Reacts to a device having been appended at `index`.
    ///
    /// The first arrival also seeds the initial device focus.
    pub fn device_added(&mut self, index: usize, registry: &DeviceRegistry) {
        debug!("device added at index {index}");
        self.events
            .push(NavEvent::Damage(PaneId::Devices, self.devices.metrics.bounds()));
        if self.devices.index < 0 && !registry.is_empty() {
            self.set_device_target(0, false, registry);
        }
    }

    /// Reacts to the device at `removed` having been removed.
    ///
    /// The committed selection is re-derived (shifted down past the removal
    /// point, clamped to the shrunken list, or cleared), committed
    /// immediately because the underlying identity changed, and the focus
    /// box is re-targeted even if the numeric index is unchanged.
    pub fn device_removed(&mut self, removed: usize, registry: &DeviceRegistry) {
        let count = i32::try_from(registry.len()).unwrap_or(i32::MAX);
        let removed = i32::try_from(removed).unwrap_or(i32::MAX);

        let mut newsel = self.selected;
        if self.selected > removed {
            newsel = self.selected - 1;
        } else if self.selected == removed && removed >= count {
            newsel = count - 1;
        }
        debug!("device removed at {removed}: selection {} -> {newsel}", self.selected);

        self.set_device_target(newsel, true, registry);
        self.pending_commit = false;
        self.commit_device(registry, true);
    }

    /// Steps the focused pane's selection by `delta`.
    fn move_selection(&mut self, delta: i32, registry: &DeviceRegistry) {
        match self.focus {
            PaneFocus::Devices => {
                let next = self.devices.index + delta;
                if next >= 0 {
                    self.set_device_target(next, false, registry);
                }
            }
            PaneFocus::Options => {
                let next = self.options.index + delta;
                if next >= 0 {
                    self.set_option_target(next, registry);
                }
            }
        }
    }

    /// Targets a device index, starting the focus slide.
    ///
    /// Out-of-range indices are ignored; the commit is deferred until the
    /// animation settles. With `force` the transition is applied even if the
    /// numeric index is unchanged, and `-1` (no device) is allowed.
    fn set_device_target(&mut self, index: i32, force: bool, registry: &DeviceRegistry) {
        let count = i32::try_from(registry.len()).unwrap_or(i32::MAX);
        if index >= count {
            return;
        }
        if !force && (index < 0 || index == self.devices.index) {
            return;
        }
        self.devices.retarget(index);
        self.pending_commit = true;
        self.events
            .push(NavEvent::Damage(PaneId::Devices, self.devices.focus_rect()));
    }

    /// Targets an option index, starting the focus slide.
    ///
    /// Unlike the device pane, the option cursor commits at set time.
    /// Ignored without a committed device, out of range, or when re-setting
    /// the current index.
    fn set_option_target(&mut self, index: i32, registry: &DeviceRegistry) {
        let Some(device) = self.selected_device() else {
            return;
        };
        let count = i32::try_from(registry.option_count(device)).unwrap_or(i32::MAX);
        if index < 0 || index >= count || index == self.options.index {
            return;
        }
        self.options.retarget(index);
        self.events
            .push(NavEvent::Damage(PaneId::Options, self.options.focus_rect()));
    }

    /// Makes the device-pane target the committed selection and resets the
    /// option pane for the newly selected device.
    ///
    /// A move cancelled back to the already committed device is a no-op
    /// unless `force`d, so the option-pane cursor survives. Removal forces
    /// the commit because the identity behind the index changed.
    fn commit_device(&mut self, registry: &DeviceRegistry, force: bool) {
        let count = i32::try_from(registry.len()).unwrap_or(i32::MAX);
        if self.devices.index >= count {
            return;
        }
        if !force && self.devices.index == self.selected {
            return;
        }
        self.selected = self.devices.index;
        self.options.reset();
        self.events
            .push(NavEvent::Damage(PaneId::Options, self.options.metrics.bounds()));
    }

    /// Gives input focus to the device pane. Idempotent.
    fn focus_devices(&mut self) {
        if self.focus == PaneFocus::Devices {
            return;
        }
        self.focus = PaneFocus::Devices;
        self.damage_focus_boxes();
    }

    /// Gives input focus to the option pane. Idempotent. Entering with no
    /// prior option selection targets the first option.
    fn focus_options(&mut self, registry: &DeviceRegistry) {
        if self.focus == PaneFocus::Options {
            return;
        }
        self.focus = PaneFocus::Options;
        self.damage_focus_boxes();
        if self.options.index < 0 {
            self.set_option_target(0, registry);
        }
    }

    /// Damages both focus boxes, for focus-style repaints.
    fn damage_focus_boxes(&mut self) {
        self.events
            .push(NavEvent::Damage(PaneId::Devices, self.devices.focus_rect()));
        self.events
            .push(NavEvent::Damage(PaneId::Options, self.options.focus_rect()));
    }

    /// Routes pointer motion to the pane under the pointer, switching focus
    /// and updating that pane's hover candidate.
    fn pointer_moved(&mut self, x: i32, y: i32, registry: &DeviceRegistry) {
        if self.devices.metrics.contains_x(x) {
            self.focus_devices();
            self.track_devices(x, y, registry);
        } else if self.options.metrics.contains_x(x) {
            self.focus_options(registry);
            self.track_options(x, y, registry);
        }
    }

    /// Hover tracking over the device pane.
    ///
    /// A changed, in-bounds candidate triggers the same move transition as a
    /// keyboard step; a miss or unchanged candidate only updates the memory.
    fn track_devices(&mut self, x: i32, y: i32, registry: &DeviceRegistry) {
        let candidate = self
            .devices
            .metrics
            .hit(x, y, registry.len())
            .and_then(|idx| i32::try_from(idx).ok())
            .unwrap_or(-1);
        if candidate == self.devices.hover {
            return;
        }
        if candidate >= 0 {
            self.set_device_target(candidate, false, registry);
        }
        self.devices.hover = candidate;
    }

    /// Hover tracking over the option pane.
    fn track_options(&mut self, x: i32, y: i32, registry: &DeviceRegistry) {
        let count = self
            .selected_device()
            .map_or(0, |device| registry.option_count(device));
        let candidate = self
            .options
            .metrics
            .hit(x, y, count)
            .and_then(|idx| i32::try_from(idx).ok())
            .unwrap_or(-1);
        if candidate == self.options.hover {
            return;
        }
        if candidate >= 0 {
            self.set_option_target(candidate, registry);
        }
        self.options.hover = candidate;
    }

    /// Confirms the committed option, emitting the launch intent.
    ///
    /// A pointer confirm first routes to the pane under the click; clicks on
    /// the device pane do not confirm. A keyboard confirm requires option
    /// focus. Either way an option must be committed.
    fn confirm(&mut self, at: Option<(i32, i32)>, registry: &DeviceRegistry) {
        if let Some((x, y)) = at {
            if !self.options.metrics.contains_x(x) {
                return;
            }
            self.focus_options(registry);
            self.track_options(x, y, registry);
        } else if self.focus != PaneFocus::Options {
            return;
        }

        let Some(device) = self.selected_device() else {
            return;
        };
        let Some(option) = self
            .selected_option()
            .and_then(|idx| registry.device(device).and_then(|dev| dev.option(idx)))
        else {
            return;
        };
        debug!("selected option {}", option.title);
        self.events
            .push(NavEvent::Status(format!("booting {}...", option.title)));
        self.events.push(NavEvent::Launch(option.payload.clone()));
    }
}
