// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event kinds and their payloads.

use core::fmt;

use kurbo::{Point, Vec2};

use crate::time::HostTime;

/// Platform key code, passed through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(pub u32);

/// Pointer button, in press-tracking priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MouseButton {
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    /// Usually the middle button or wheel click.
    Tertiary,
}

/// Discriminant of every event the dispatcher routes.
///
/// Each reaction is bound to exactly one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// A key transitioned to pressed.
    KeyDown,
    /// The pointer moved.
    MouseMove,
    /// The wheel scrolled.
    MouseWheel,
    /// A button went down.
    MouseDown,
    /// A button was released quickly or without travel: a click.
    MouseUp,
    /// The pointer moved while a press was held long or far enough.
    MouseDrag,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::KeyDown,
        Self::MouseMove,
        Self::MouseWheel,
        Self::MouseDown,
        Self::MouseUp,
        Self::MouseDrag,
    ];

    /// Stable short name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::KeyDown => "key-down",
            Self::MouseMove => "mouse-move",
            Self::MouseWheel => "mouse-wheel",
            Self::MouseDown => "mouse-down",
            Self::MouseUp => "mouse-up",
            Self::MouseDrag => "mouse-drag",
        }
    }

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key went down this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyDown {
    /// The key.
    pub key: Key,
}

/// The pointer moved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseMove {
    /// New pointer position.
    pub position: Point,
}

/// The wheel scrolled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseWheel {
    /// Pointer position at the time of the scroll.
    pub position: Point,
    /// Scroll offset; `y` is the usual vertical wheel.
    pub delta: Vec2,
}

/// A button went down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseDown {
    /// Where the press started.
    pub position: Point,
    /// Which button.
    pub button: MouseButton,
}

/// A press ended as a click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseUp {
    /// Last tracked point of the press.
    pub position: Point,
    /// Which button.
    pub button: MouseButton,
}

/// The pointer moved during a press that qualified as a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseDrag {
    /// Where the press started.
    pub origin: Point,
    /// Pointer position at the previous sample.
    pub previous: Point,
    /// Current pointer position.
    pub position: Point,
    /// When the press started.
    pub started_at: HostTime,
    /// Which button.
    pub button: MouseButton,
}

impl MouseDrag {
    /// Movement since the previous sample.
    #[must_use]
    pub fn step(&self) -> Vec2 {
        self.position - self.previous
    }

    /// Movement since the press started.
    #[must_use]
    pub fn total(&self) -> Vec2 {
        self.position - self.origin
    }
}

/// One event occurrence of any kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventData {
    /// See [`KeyDown`].
    KeyDown(KeyDown),
    /// See [`MouseMove`].
    MouseMove(MouseMove),
    /// See [`MouseWheel`].
    MouseWheel(MouseWheel),
    /// See [`MouseDown`].
    MouseDown(MouseDown),
    /// See [`MouseUp`].
    MouseUp(MouseUp),
    /// See [`MouseDrag`].
    MouseDrag(MouseDrag),
}

impl EventData {
    /// Kind of this occurrence.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::MouseMove(_) => EventKind::MouseMove,
            Self::MouseWheel(_) => EventKind::MouseWheel,
            Self::MouseDown(_) => EventKind::MouseDown,
            Self::MouseUp(_) => EventKind::MouseUp,
            Self::MouseDrag(_) => EventKind::MouseDrag,
        }
    }

    /// Anchor point, for every kind except key-down.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::KeyDown(_) => None,
            Self::MouseMove(e) => Some(e.position()),
            Self::MouseWheel(e) => Some(e.position()),
            Self::MouseDown(e) => Some(e.position()),
            Self::MouseUp(e) => Some(e.position()),
            Self::MouseDrag(e) => Some(e.position()),
        }
    }
}

/// A typed event payload.
///
/// Implemented by each payload struct so reactions can be written against
/// the concrete type while the dispatcher stores them uniformly.
pub trait Event: Copy + Into<EventData> + 'static {
    /// The kind this payload belongs to.
    const KIND: EventKind;

    /// Borrows the payload back out of `data` if the kinds match.
    fn from_data(data: &EventData) -> Option<&Self>;
}

/// Events anchored at a pointer position.
pub trait Positioned {
    /// The anchor point.
    fn position(&self) -> Point;
}

macro_rules! event_payload {
    ($ty:ident) => {
        impl From<$ty> for EventData {
            fn from(e: $ty) -> Self {
                Self::$ty(e)
            }
        }

        impl Event for $ty {
            const KIND: EventKind = EventKind::$ty;

            fn from_data(data: &EventData) -> Option<&Self> {
                match data {
                    EventData::$ty(e) => Some(e),
                    _ => None,
                }
            }
        }
    };
    ($ty:ident, positioned) => {
        event_payload!($ty);

        impl Positioned for $ty {
            fn position(&self) -> Point {
                self.position
            }
        }
    };
}

event_payload!(KeyDown);
event_payload!(MouseMove, positioned);
event_payload!(MouseWheel, positioned);
event_payload!(MouseDown, positioned);
event_payload!(MouseUp, positioned);
event_payload!(MouseDrag, positioned);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trip() {
        let data: EventData = MouseUp {
            position: Point::new(1.0, 2.0),
            button: MouseButton::Primary,
        }
        .into();
        assert_eq!(data.kind(), EventKind::MouseUp);
        assert_eq!(data.kind(), MouseUp::KIND);
        assert!(MouseDown::from_data(&data).is_none());
        assert_eq!(
            MouseUp::from_data(&data).map(Positioned::position),
            Some(Point::new(1.0, 2.0))
        );
    }

    #[test]
    fn key_down_has_no_position() {
        let data = EventData::from(KeyDown { key: Key(13) });
        assert_eq!(data.position(), None);
    }

    #[test]
    fn kind_slots_are_dense() {
        for (i, kind) in EventKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.slot(), i);
        }
    }

    #[test]
    fn drag_deltas() {
        let drag = MouseDrag {
            origin: Point::new(0.0, 0.0),
            previous: Point::new(10.0, 5.0),
            position: Point::new(12.0, 9.0),
            started_at: HostTime(0),
            button: MouseButton::Primary,
        };
        assert_eq!(drag.step(), Vec2::new(2.0, 4.0));
        assert_eq!(drag.total(), Vec2::new(12.0, 9.0));
    }
}
