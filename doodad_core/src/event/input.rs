// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw per-tick input and gesture thresholds.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use super::types::{Key, MouseButton};
use crate::time::{Duration, HostTime, Timebase};

/// Which pointer buttons are held this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerButtons {
    /// Primary (usually left) button.
    pub primary: bool,
    /// Secondary (usually right) button.
    pub secondary: bool,
    /// Tertiary (usually middle) button.
    pub tertiary: bool,
}

impl PointerButtons {
    /// No buttons held.
    pub const NONE: Self = Self {
        primary: false,
        secondary: false,
        tertiary: false,
    };

    /// Only `button` held.
    #[must_use]
    pub const fn only(button: MouseButton) -> Self {
        let mut buttons = Self::NONE;
        match button {
            MouseButton::Primary => buttons.primary = true,
            MouseButton::Secondary => buttons.secondary = true,
            MouseButton::Tertiary => buttons.tertiary = true,
        }
        buttons
    }

    /// The highest-priority held button: primary, then secondary, then
    /// tertiary.
    #[must_use]
    pub const fn first_pressed(self) -> Option<MouseButton> {
        if self.primary {
            Some(MouseButton::Primary)
        } else if self.secondary {
            Some(MouseButton::Secondary)
        } else if self.tertiary {
            Some(MouseButton::Tertiary)
        } else {
            None
        }
    }
}

/// Everything the platform reports for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// When the frame was sampled.
    pub now: HostTime,
    /// Pointer position.
    pub pointer: Point,
    /// Buttons held.
    pub buttons: PointerButtons,
    /// Keys that transitioned to pressed since the previous frame.
    pub pressed_keys: Vec<Key>,
    /// Wheel offset accumulated since the previous frame.
    pub wheel: Vec2,
}

impl InputFrame {
    /// A frame at `now` with the pointer at `pointer` and nothing else.
    #[must_use]
    pub fn at(now: HostTime, pointer: Point) -> Self {
        Self {
            now,
            pointer,
            ..Self::default()
        }
    }

    /// This frame with `button` held.
    #[must_use]
    pub fn pressing(mut self, button: MouseButton) -> Self {
        self.buttons = PointerButtons::only(button);
        self
    }

    /// This frame with `key` newly pressed.
    #[must_use]
    pub fn with_key(mut self, key: Key) -> Self {
        self.pressed_keys.push(key);
        self
    }

    /// This frame with a wheel offset.
    #[must_use]
    pub fn with_wheel(mut self, delta: Vec2) -> Self {
        self.wheel = delta;
        self
    }
}

/// Thresholds that separate clicks from drags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// A press held longer than this becomes a drag once the pointer moves;
    /// a release sooner than this is always a click.
    pub click_duration: Duration,
    /// Travel from the press start beyond this on either axis makes the
    /// press a drag.
    pub drag_distance: f64,
    /// A release counts as a click when travel on both axes stays below
    /// this.
    pub click_distance: f64,
}

impl GestureConfig {
    /// Default thresholds (100 ms, 25 units, 8 units) for the given clock.
    #[must_use]
    pub const fn for_timebase(timebase: Timebase) -> Self {
        Self {
            click_duration: Duration::from_millis(100, timebase),
            drag_distance: 25.0,
            click_distance: 8.0,
        }
    }
}

impl Default for GestureConfig {
    /// Default thresholds on a nanosecond clock.
    fn default() -> Self {
        Self::for_timebase(Timebase::NANOS)
    }
}

/// An in-progress pointer press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Press {
    /// Where the press started.
    pub start: Point,
    /// Last tracked pointer position.
    pub current: Point,
    /// When the press started.
    pub started_at: HostTime,
    /// Which button.
    pub button: MouseButton,
}

impl Press {
    /// Travel from the start to the last tracked point.
    #[must_use]
    pub fn travel(&self) -> Vec2 {
        self.current - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_priority() {
        let all = PointerButtons {
            primary: true,
            secondary: true,
            tertiary: true,
        };
        assert_eq!(all.first_pressed(), Some(MouseButton::Primary));
        let back = PointerButtons {
            secondary: true,
            tertiary: true,
            ..PointerButtons::NONE
        };
        assert_eq!(back.first_pressed(), Some(MouseButton::Secondary));
        assert_eq!(PointerButtons::NONE.first_pressed(), None);
    }

    #[test]
    fn default_thresholds() {
        let config = GestureConfig::default();
        assert_eq!(config.click_duration, Duration(100_000_000));
        assert_eq!(config.drag_distance, 25.0);
        assert_eq!(config.click_distance, 8.0);

        let micros = GestureConfig::for_timebase(Timebase::new(1000, 1));
        assert_eq!(micros.click_duration, Duration(100_000));
    }
}
