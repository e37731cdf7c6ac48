// SPDX-License-Identifier: MIT

//! Pane layout arithmetic and pointer hit-testing.
//!
//! The layout is a fixed grid: every list entry occupies one stride-tall
//! slot starting at a pane-specific offset, and the focus highlight slides
//! along the same axis. All values are screen pixels.

/// Width of the left (device) pane; the option pane starts here.
pub const LEFT_PANE_SIZE: i32 = 160;

/// Horizontal offset of a device icon within the left pane.
const LEFT_ICON_XOFF: i32 = 50;

/// Width and height of a device icon.
const LEFT_ICON_SIZE: i32 = 64;

/// Vertical offset of the first device icon.
const LEFT_ICON_YOFF: i32 = 50;

/// Vertical distance between device icons.
const LEFT_ICON_STRIDE: i32 = 100;

/// Vertical offset of the left focus box for index 0.
const LEFT_FOCUS_YOFF: i32 = 40;

/// Height of the left focus box.
const LEFT_FOCUS_HEIGHT: i32 = 80;

/// Horizontal offset of the left focus box.
const LEFT_FOCUS_XOFF: i32 = 40;

/// Width of the left focus box.
const LEFT_FOCUS_WIDTH: i32 = 80;

/// Left and right margin of an option row within the right pane.
const RIGHT_OPTION_MARGIN: i32 = 30;

/// Vertical offset of the first option row.
const RIGHT_OPTION_TMARGIN: i32 = 70;

/// Height of an option row.
const RIGHT_OPTION_HEIGHT: i32 = 64;

/// Vertical distance between option rows.
const RIGHT_OPTION_STRIDE: i32 = 100;

/// Vertical offset of the right focus box for index 0.
const RIGHT_FOCUS_YOFF: i32 = 60;

/// Height of the right focus box.
const RIGHT_FOCUS_HEIGHT: i32 = 80;

/// Horizontal offset of the right focus box.
const RIGHT_FOCUS_XOFF: i32 = 20;

/// An axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub left: i32,

    /// Top edge.
    pub top: i32,

    /// Right edge.
    pub right: i32,

    /// Bottom edge.
    pub bottom: i32,
}

impl Rect {
    /// The smallest rectangle covering both inputs.
    #[must_use = "Has no effect if the result is unused"]
    pub fn union(self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// The fixed grid of one pane.
#[derive(Clone, Copy, Debug)]
pub struct PaneMetrics {
    /// Screen x where the pane starts; pointer coordinates are made
    /// pane-local by subtracting this.
    pub origin_x: i32,

    /// Pane width in pixels.
    pub width: i32,

    /// Pane height in pixels.
    pub height: i32,

    /// Left edge of an entry's hit box, pane-local.
    item_left: i32,

    /// Right edge of an entry's hit box, pane-local.
    item_right: i32,

    /// Top of the first entry's hit box.
    item_top: i32,

    /// Height of an entry's hit box.
    item_height: i32,

    /// Vertical distance between entries.
    stride: i32,

    /// Top of the focus box when index 0 is focused.
    focus_yoff: i32,

    /// Height of the focus box.
    focus_height: i32,

    /// Left edge of the focus box, pane-local.
    focus_left: i32,

    /// Width of the focus box.
    focus_width: i32,
}

impl PaneMetrics {
    /// The device pane grid for a screen of the given height.
    #[must_use = "Has no effect if the result is unused"]
    pub fn device_pane(screen_height: i32) -> Self {
        Self {
            origin_x: 0,
            width: LEFT_PANE_SIZE,
            height: screen_height,
            item_left: LEFT_ICON_XOFF,
            item_right: LEFT_ICON_XOFF + LEFT_ICON_SIZE,
            item_top: LEFT_ICON_YOFF,
            item_height: LEFT_ICON_SIZE,
            stride: LEFT_ICON_STRIDE,
            focus_yoff: LEFT_FOCUS_YOFF,
            focus_height: LEFT_FOCUS_HEIGHT,
            focus_left: LEFT_FOCUS_XOFF,
            focus_width: LEFT_FOCUS_WIDTH,
        }
    }

    /// The option pane grid for a screen of the given size.
    #[must_use = "Has no effect if the result is unused"]
    pub fn option_pane(screen_width: i32, screen_height: i32) -> Self {
        let width = screen_width - LEFT_PANE_SIZE;
        Self {
            origin_x: LEFT_PANE_SIZE,
            width,
            height: screen_height,
            item_left: RIGHT_OPTION_MARGIN,
            item_right: width - RIGHT_OPTION_MARGIN,
            item_top: RIGHT_OPTION_TMARGIN,
            item_height: RIGHT_OPTION_HEIGHT,
            stride: RIGHT_OPTION_STRIDE,
            focus_yoff: RIGHT_FOCUS_YOFF,
            focus_height: RIGHT_FOCUS_HEIGHT,
            focus_left: RIGHT_FOCUS_XOFF,
            focus_width: width - 2 * RIGHT_FOCUS_XOFF,
        }
    }

    /// The focus-box top for an entry index; a negative index parks the box
    /// just above the pane.
    #[must_use = "Has no effect if the result is unused"]
    pub fn focus_pos(&self, index: i32) -> i32 {
        if index < 0 {
            -self.focus_height
        } else {
            self.focus_yoff + self.stride * index
        }
    }

    /// The focus-box resting position before anything was ever focused.
    #[must_use = "Has no effect if the result is unused"]
    pub fn offscreen(&self) -> i32 {
        -2 * self.focus_height
    }

    /// The focus box when its top edge sits at `top`, in screen coordinates.
    #[must_use = "Has no effect if the result is unused"]
    pub fn focus_rect(&self, top: i32) -> Rect {
        Rect {
            left: self.origin_x + self.focus_left,
            top,
            right: self.origin_x + self.focus_left + self.focus_width,
            bottom: top + self.focus_height,
        }
    }

    /// The whole pane, in screen coordinates.
    #[must_use = "Has no effect if the result is unused"]
    pub fn bounds(&self) -> Rect {
        Rect {
            left: self.origin_x,
            top: 0,
            right: self.origin_x + self.width,
            bottom: self.height,
        }
    }

    /// Whether a screen x coordinate falls inside this pane.
    #[must_use = "Has no effect if the result is unused"]
    pub fn contains_x(&self, x: i32) -> bool {
        x >= self.origin_x && x < self.origin_x + self.width
    }

    /// Hit-tests a screen coordinate against the entry grid.
    ///
    /// Returns the entry index, or [`None`] for the inter-entry gaps, the
    /// margins, and indices at or past `count`.
    #[must_use = "Has no effect if the result is unused"]
    pub fn hit(&self, x: i32, y: i32, count: usize) -> Option<usize> {
        let x = x - self.origin_x;
        if x < self.item_left || x > self.item_right {
            return None;
        }
        if y < self.item_top {
            return None;
        }
        let candidate = (y - self.item_top) / self.stride;
        let entry_top = self.item_top + candidate * self.stride;
        if y > entry_top + self.item_height {
            return None;
        }
        usize::try_from(candidate)
            .ok()
            .filter(|&idx| idx < count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_positions() {
        let pane = PaneMetrics::device_pane(768);
        assert_eq!(pane.focus_pos(0), 40);
        assert_eq!(pane.focus_pos(2), 240);
        assert_eq!(pane.focus_pos(-1), -80);
        assert_eq!(pane.offscreen(), -160);

        let pane = PaneMetrics::option_pane(1024, 768);
        assert_eq!(pane.focus_pos(0), 60);
        assert_eq!(pane.focus_pos(1), 160);
    }

    #[test]
    fn test_device_pane_hit() {
        let pane = PaneMetrics::device_pane(768);
        assert_eq!(pane.hit(60, 60, 3), Some(0));
        assert_eq!(pane.hit(60, 160, 3), Some(1));
        // inter-icon gap
        assert_eq!(pane.hit(60, 120, 3), None);
        // outside the icon column
        assert_eq!(pane.hit(10, 60, 3), None);
        // past the list
        assert_eq!(pane.hit(60, 360, 3), None);
    }

    #[test]
    fn test_option_pane_hit_is_pane_local() {
        let pane = PaneMetrics::option_pane(1024, 768);
        // x is in screen coordinates; the pane starts at LEFT_PANE_SIZE
        assert_eq!(pane.hit(LEFT_PANE_SIZE + 100, 80, 2), Some(0));
        assert_eq!(pane.hit(LEFT_PANE_SIZE + 100, 180, 2), Some(1));
        assert_eq!(pane.hit(100, 80, 2), None);
    }

    #[test]
    fn test_union() {
        let a = Rect { left: 0, top: 0, right: 10, bottom: 10 };
        let b = Rect { left: 5, top: -5, right: 20, bottom: 8 };
        assert_eq!(
            a.union(b),
            Rect { left: 0, top: -5, right: 20, bottom: 10 }
        );
    }
}
