// SPDX-License-Identifier: MIT

//! The sliding focus-box animation.
//!
//! One [`FocusAnimation`] describes a focus box travelling from a start
//! position toward a target. The host drives it with periodic
//! [`FocusAnimation::tick`] calls; each tick moves the box by a step looked
//! up from an 11-bucket deceleration curve keyed by the normalized remaining
//! distance, so the box eases out as it approaches the target.
//!
//! There is no explicit cancel: re-targeting mid-flight simply replaces
//! start and target, and the animation continues from the current position.

/// Step size per tick, indexed by `remaining * 10 / total` distance.
///
/// Bucket 0 is almost-arrived, bucket 10 is just-started; the step shrinks
/// as the box closes in, giving the ease-out feel.
const STEP_CURVE: [i32; 11] = [1, 1, 1, 1, 1, 2, 2, 3, 4, 5, 7];

/// The state of one pane's focus-box transition.
#[derive(Clone, Copy, Debug)]
pub struct FocusAnimation {
    /// Position the current transition started from.
    start: i32,

    /// Position the transition is headed to.
    target: i32,

    /// The rendered position right now.
    current: i32,
}

impl FocusAnimation {
    /// Creates a settled animation resting at `pos`.
    #[must_use = "Has no effect if the result is unused"]
    pub fn resting_at(pos: i32) -> Self {
        Self {
            start: pos,
            target: pos,
            current: pos,
        }
    }

    /// Starts (or re-targets) a transition toward `target` from the current
    /// rendered position. Supersedes any transition in flight.
    pub fn retarget(&mut self, target: i32) {
        self.start = self.current;
        self.target = target;
    }

    /// Moves instantly to `pos` with no transition.
    pub fn jump(&mut self, pos: i32) {
        self.start = pos;
        self.target = pos;
        self.current = pos;
    }

    /// The rendered position right now.
    #[must_use = "Has no effect if the result is unused"]
    pub fn current(&self) -> i32 {
        self.current
    }

    /// The position the transition is headed to.
    #[must_use = "Has no effect if the result is unused"]
    pub fn target(&self) -> i32 {
        self.target
    }

    /// Whether the box has arrived at its target.
    #[must_use = "Has no effect if the result is unused"]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Advances one tick. Returns whether the box is settled afterwards.
    pub fn tick(&mut self) -> bool {
        let remaining = self.target - self.current;
        if remaining == 0 {
            return true;
        }
        let total = (self.target - self.start).abs().max(1);
        let bucket = usize::try_from((remaining.abs() * 10) / total)
            .unwrap_or(10)
            .min(10);
        let step = STEP_CURVE[bucket].min(remaining.abs());
        self.current += step * remaining.signum();
        self.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settles_at_target() {
        let mut anim = FocusAnimation::resting_at(40);
        anim.retarget(240);
        let mut ticks = 0;
        while !anim.tick() {
            ticks += 1;
            assert!(ticks < 1000, "animation failed to settle");
        }
        assert_eq!(anim.current(), 240);
        assert!(anim.is_settled());
    }

    #[test]
    fn test_ease_out_steps_shrink() {
        let mut anim = FocusAnimation::resting_at(0);
        anim.retarget(200);
        let mut last = anim.current();
        let mut steps = Vec::new();
        while !anim.tick() {
            steps.push(anim.current() - last);
            last = anim.current();
        }
        // the curve never speeds back up on the way in
        assert!(steps.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(steps.first(), Some(&7));
    }

    #[test]
    fn test_downward_motion() {
        let mut anim = FocusAnimation::resting_at(240);
        anim.retarget(40);
        anim.tick();
        assert!(anim.current() < 240);
        while !anim.tick() {}
        assert_eq!(anim.current(), 40);
    }

    #[test]
    fn test_retarget_mid_flight_supersedes() {
        let mut anim = FocusAnimation::resting_at(0);
        anim.retarget(200);
        anim.tick();
        let mid = anim.current();
        anim.retarget(mid - 50);
        while !anim.tick() {}
        assert_eq!(anim.current(), mid - 50);
    }

    #[test]
    fn test_no_overshoot() {
        let mut anim = FocusAnimation::resting_at(0);
        anim.retarget(3);
        while !anim.tick() {
            assert!(anim.current() <= 3);
        }
        assert_eq!(anim.current(), 3);
    }

    #[test]
    fn test_settled_tick_is_noop() {
        let mut anim = FocusAnimation::resting_at(40);
        assert!(anim.tick());
        assert_eq!(anim.current(), 40);
    }
}
