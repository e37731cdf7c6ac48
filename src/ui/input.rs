// SPDX-License-Identifier: MIT

//! Classifies raw input into navigation commands.
//!
//! Keyboard, pointer, and joystick events all funnel through
//! [`InputRouter::route`], which produces at most one [`Command`] per event.
//! Joystick buttons are first translated through a fixed control-to-key
//! table; unmapped controls produce nothing.
//!
//! Two commands bypass pane focus entirely: a video mode override and the
//! alternate fallback boot. Both are fire-and-exit for the host; the
//! navigator only surfaces them.

/// A logical key, after joystick translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Cursor up.
    Up,

    /// Cursor down.
    Down,

    /// Cursor left.
    Left,

    /// Cursor right.
    Right,

    /// Confirm the selection.
    Enter,

    /// Request the alternate fallback boot.
    Delete,

    /// Request the alternate fallback boot.
    Backspace,

    /// A digit key; `0` through `3` select video modes.
    Digit(u8),
}

/// A raw event as delivered by the host's event loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawEvent {
    /// A key was pressed.
    KeyDown(Key),

    /// A key was released.
    KeyUp(Key),

    /// The pointer moved to a screen coordinate.
    PointerMove {
        /// Screen x.
        x: i32,
        /// Screen y.
        y: i32,
    },

    /// The primary button was pressed at a screen coordinate.
    ButtonDown {
        /// Screen x.
        x: i32,
        /// Screen y.
        y: i32,
    },

    /// The primary button was released.
    ButtonUp,

    /// A joystick control changed state.
    JoyButton {
        /// Physical control number.
        control: u8,
        /// Press (true) or release (false).
        pressed: bool,
    },
}

/// A session-terminating request that bypasses pane focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverrideRequest {
    /// Switch the display to the given video mode and exit.
    SetVideoMode(u8),

    /// Boot the fixed alternate fallback target and exit.
    BootFallback,
}

/// The automatic video mode.
pub const VIDEO_MODE_AUTO: u8 = 0;

/// The 720p video mode.
pub const VIDEO_MODE_720P: u8 = 3;

/// The 1080i video mode.
pub const VIDEO_MODE_1080I: u8 = 4;

/// The 1080p video mode.
pub const VIDEO_MODE_1080P: u8 = 5;

/// One classified navigation command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Step the focused pane's selection up.
    MoveUp,

    /// Step the focused pane's selection down.
    MoveDown,

    /// Give focus to the device pane.
    FocusDevicePane,

    /// Give focus to the option pane.
    FocusOptionPane,

    /// Track the pointer at a screen coordinate.
    Hover {
        /// Screen x.
        x: i32,
        /// Screen y.
        y: i32,
    },

    /// Confirm the selection; pointer confirms carry their coordinate.
    Confirm {
        /// The click position, or [`None`] for a keyboard confirm.
        at: Option<(i32, i32)>,
    },

    /// Forget the pointer hover candidate.
    CancelHover,

    /// A session-terminating global override.
    Override(OverrideRequest),
}

/// Control-to-key mapping for a sixaxis-style game controller.
///
/// Index is the physical control number: d-pad up/right/down/left on 4-7,
/// circle on 13, square on 15. Everything else is unmapped.
const JOYSTICK_MAP: [Option<Key>; 19] = [
    None,               //  0  Select
    None,               //  1  L3
    None,               //  2  R3
    None,               //  3  Start
    Some(Key::Up),      //  4  Dpad Up
    Some(Key::Right),   //  5  Dpad Right
    Some(Key::Down),    //  6  Dpad Down
    Some(Key::Left),    //  7  Dpad Left
    None,               //  8  L2
    None,               //  9  R2
    None,               // 10  L1
    None,               // 11  R1
    None,               // 12  Triangle
    Some(Key::Enter),   // 13  Circle
    None,               // 14  Cross
    Some(Key::Delete),  // 15  Square
    None,               // 16  PS Button
    None,               // 17  nothing
    None,               // 18  nothing
];

/// The stateless input classifier.
pub struct InputRouter;

impl InputRouter {
    /// Classifies one raw event into at most one command.
    #[must_use = "Has no effect if the result is unused"]
    pub fn route(event: RawEvent) -> Option<Command> {
        match event {
            RawEvent::KeyDown(key) => Self::route_key(key),
            // keyboard takes over: drop the pointer hover candidate
            RawEvent::KeyUp(_) => Some(Command::CancelHover),
            RawEvent::PointerMove { x, y } => Some(Command::Hover { x, y }),
            RawEvent::ButtonDown { x, y } => Some(Command::Confirm { at: Some((x, y)) }),
            RawEvent::ButtonUp => None,
            RawEvent::JoyButton { control, pressed } => {
                let key = JOYSTICK_MAP.get(usize::from(control)).copied().flatten()?;
                if pressed {
                    Self::route(RawEvent::KeyDown(key))
                } else {
                    Self::route(RawEvent::KeyUp(key))
                }
            }
        }
    }

    /// Classifies a pressed logical key.
    fn route_key(key: Key) -> Option<Command> {
        match key {
            Key::Up => Some(Command::MoveUp),
            Key::Down => Some(Command::MoveDown),
            Key::Left => Some(Command::FocusDevicePane),
            Key::Right => Some(Command::FocusOptionPane),
            Key::Enter => Some(Command::Confirm { at: None }),
            Key::Delete | Key::Backspace => {
                Some(Command::Override(OverrideRequest::BootFallback))
            }
            Key::Digit(d) => {
                let mode = match d {
                    0 => VIDEO_MODE_AUTO,
                    1 => VIDEO_MODE_720P,
                    2 => VIDEO_MODE_1080I,
                    3 => VIDEO_MODE_1080P,
                    _ => return None,
                };
                Some(Command::Override(OverrideRequest::SetVideoMode(mode)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            InputRouter::route(RawEvent::KeyDown(Key::Up)),
            Some(Command::MoveUp)
        );
        assert_eq!(
            InputRouter::route(RawEvent::KeyDown(Key::Left)),
            Some(Command::FocusDevicePane)
        );
        assert_eq!(
            InputRouter::route(RawEvent::KeyDown(Key::Right)),
            Some(Command::FocusOptionPane)
        );
    }

    #[test]
    fn test_overrides_bypass_focus() {
        assert_eq!(
            InputRouter::route(RawEvent::KeyDown(Key::Digit(1))),
            Some(Command::Override(OverrideRequest::SetVideoMode(
                VIDEO_MODE_720P
            )))
        );
        assert_eq!(
            InputRouter::route(RawEvent::KeyDown(Key::Backspace)),
            Some(Command::Override(OverrideRequest::BootFallback))
        );
        assert_eq!(InputRouter::route(RawEvent::KeyDown(Key::Digit(9))), None);
    }

    #[test]
    fn test_joystick_mapping() {
        // d-pad down press becomes a key-down
        assert_eq!(
            InputRouter::route(RawEvent::JoyButton {
                control: 6,
                pressed: true
            }),
            Some(Command::MoveDown)
        );
        // circle confirms
        assert_eq!(
            InputRouter::route(RawEvent::JoyButton {
                control: 13,
                pressed: true
            }),
            Some(Command::Confirm { at: None })
        );
        // square requests the fallback boot
        assert_eq!(
            InputRouter::route(RawEvent::JoyButton {
                control: 15,
                pressed: true
            }),
            Some(Command::Override(OverrideRequest::BootFallback))
        );
    }

    #[test]
    fn test_unmapped_controls_are_silent() {
        for control in [0, 1, 12, 14, 16, 200] {
            assert_eq!(
                InputRouter::route(RawEvent::JoyButton {
                    control,
                    pressed: true
                }),
                None
            );
        }
    }

    #[test]
    fn test_release_becomes_key_up() {
        assert_eq!(
            InputRouter::route(RawEvent::JoyButton {
                control: 6,
                pressed: false
            }),
            Some(Command::CancelHover)
        );
    }

    #[test]
    fn test_button_down_is_single_action() {
        // one event, one command; release on its own does nothing
        assert_eq!(
            InputRouter::route(RawEvent::ButtonDown { x: 10, y: 20 }),
            Some(Command::Confirm { at: Some((10, 20)) })
        );
        assert_eq!(InputRouter::route(RawEvent::ButtonUp), None);
    }
}
