// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records. [`decode`] reads them back as an
//! iterator of [`RecordedEvent`].
//!
//! Layout node handles are recorded by slot index only, since a recording
//! outlives the graph that issued them.

use doodad_core::event::{EventKind, MouseButton, ReactionError};
use doodad_core::time::HostTime;
use doodad_core::trace::{
    DispatchEvent, GestureEvent, LayoutPushEvent, ReactionFailedEvent, SampleEvent, TraceSink,
};
use kurbo::Point;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SAMPLE: u8 = 1;
const TAG_GESTURE: u8 = 2;
const TAG_DISPATCH: u8 = 3;
const TAG_REACTION_FAILED: u8 = 4;
const TAG_LAYOUT_PUSH: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_point(&mut self, p: Point) {
        self.buf.extend_from_slice(&p.x.to_le_bytes());
        self.buf.extend_from_slice(&p.y.to_le_bytes());
    }

    fn write_kind(&mut self, kind: EventKind) {
        let code = EventKind::ALL
            .iter()
            .position(|&k| k == kind)
            .unwrap_or(EventKind::ALL.len());
        #[expect(
            clippy::cast_possible_truncation,
            reason = "there are fewer than 256 event kinds"
        )]
        self.write_u8(code as u8);
    }

    fn write_button(&mut self, button: Option<MouseButton>) {
        self.write_u8(match button {
            None => 0,
            Some(MouseButton::Primary) => 1,
            Some(MouseButton::Secondary) => 2,
            Some(MouseButton::Tertiary) => 3,
        });
    }

    fn write_str(&mut self, s: &str) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "message length capped at u32::MAX for recording"
        )]
        let len = s.len().min(u32::MAX as usize) as u32;
        self.write_u32(len);
        self.buf.extend_from_slice(&s.as_bytes()[..len as usize]);
    }
}

impl TraceSink for RecorderSink {
    fn on_sample(&mut self, e: &SampleEvent) {
        self.write_u8(TAG_SAMPLE);
        self.write_u64(e.now.ticks());
        self.write_point(e.pointer);
        self.write_button(e.button);
        self.write_u8(u8::from(e.press_active));
    }

    fn on_gesture(&mut self, e: &GestureEvent) {
        self.write_u8(TAG_GESTURE);
        self.write_u64(e.now.ticks());
        self.write_kind(e.kind);
        self.write_point(e.position);
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.write_u8(TAG_DISPATCH);
        self.write_kind(e.kind);
        self.write_u32(e.registered);
        self.write_u32(e.invoked);
        self.write_u8(u8::from(e.stopped));
    }

    fn on_reaction_failed(&mut self, e: &ReactionFailedEvent, error: &ReactionError) {
        self.write_u8(TAG_REACTION_FAILED);
        self.write_kind(e.kind);
        match e.owner {
            Some(owner) => {
                self.write_u8(1);
                self.write_u32(owner.index());
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
            }
        }
        self.write_str(error.message());
    }

    fn on_layout_push(&mut self, e: &LayoutPushEvent) {
        self.write_u8(TAG_LAYOUT_PUSH);
        self.write_u32(e.root.index());
        self.write_u32(e.visited);
        self.write_u32(e.recomputed);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`SampleEvent`].
    Sample(SampleEvent),
    /// A [`GestureEvent`].
    Gesture(GestureEvent),
    /// A [`DispatchEvent`].
    Dispatch(DispatchEvent),
    /// A failed reaction callback.
    ReactionFailed {
        /// Kind being routed.
        kind: EventKind,
        /// Slot index of the owning layout node, if any.
        owner: Option<u32>,
        /// The callback's error message.
        message: String,
    },
    /// An eager layout push.
    LayoutPush {
        /// Slot index of the node the push started from.
        root: u32,
        /// Nodes reached.
        visited: u32,
        /// Nodes recomputed.
        recomputed: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take(&mut self, n: usize) -> Option<&[u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.take(8)?.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        Some(f64::from_le_bytes(self.take(8)?.try_into().ok()?))
    }

    fn read_point(&mut self) -> Option<Point> {
        Some(Point::new(self.read_f64()?, self.read_f64()?))
    }

    fn read_kind(&mut self) -> Option<EventKind> {
        EventKind::ALL.get(usize::from(self.read_u8()?)).copied()
    }

    fn read_button(&mut self) -> Option<Option<MouseButton>> {
        Some(match self.read_u8()? {
            0 => None,
            1 => Some(MouseButton::Primary),
            2 => Some(MouseButton::Secondary),
            _ => Some(MouseButton::Tertiary),
        })
    }

    fn read_string(&mut self) -> Option<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    fn decode_sample(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Sample(SampleEvent {
            now: HostTime(self.read_u64()?),
            pointer: self.read_point()?,
            button: self.read_button()?,
            press_active: self.read_u8()? != 0,
        }))
    }

    fn decode_gesture(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Gesture(GestureEvent {
            now: HostTime(self.read_u64()?),
            kind: self.read_kind()?,
            position: self.read_point()?,
        }))
    }

    fn decode_dispatch(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Dispatch(DispatchEvent {
            kind: self.read_kind()?,
            registered: self.read_u32()?,
            invoked: self.read_u32()?,
            stopped: self.read_u8()? != 0,
        }))
    }

    fn decode_reaction_failed(&mut self) -> Option<RecordedEvent> {
        let kind = self.read_kind()?;
        let has_owner = self.read_u8()? != 0;
        let owner = self.read_u32()?;
        let message = self.read_string()?;
        Some(RecordedEvent::ReactionFailed {
            kind,
            owner: has_owner.then_some(owner),
            message,
        })
    }

    fn decode_layout_push(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayoutPush {
            root: self.read_u32()?,
            visited: self.read_u32()?,
            recomputed: self.read_u32()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_SAMPLE => self.decode_sample(),
            TAG_GESTURE => self.decode_gesture(),
            TAG_DISPATCH => self.decode_dispatch(),
            TAG_REACTION_FAILED => self.decode_reaction_failed(),
            TAG_LAYOUT_PUSH => self.decode_layout_push(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use doodad_core::layout::LayoutGraph;

    use super::*;

    #[test]
    fn records_a_session_in_order() {
        let mut graph = LayoutGraph::new();
        let _ = graph.create_node();
        let owner = graph.create_node();

        let mut rec = RecorderSink::new();
        rec.on_sample(&SampleEvent {
            now: HostTime(1_000),
            pointer: Point::new(4.5, -2.0),
            button: Some(MouseButton::Secondary),
            press_active: true,
        });
        rec.on_gesture(&GestureEvent {
            now: HostTime(1_000),
            kind: EventKind::MouseDrag,
            position: Point::new(4.5, -2.0),
        });
        rec.on_reaction_failed(
            &ReactionFailedEvent {
                kind: EventKind::MouseDrag,
                owner: Some(owner),
            },
            &ReactionError::new("drop target gone"),
        );
        rec.on_dispatch(&DispatchEvent {
            kind: EventKind::MouseDrag,
            registered: 2,
            invoked: 1,
            stopped: false,
        });
        rec.on_layout_push(&LayoutPushEvent {
            root: owner,
            visited: 5,
            recomputed: 4,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 5);
        match &events[0] {
            RecordedEvent::Sample(e) => {
                assert_eq!(e.now, HostTime(1_000));
                assert_eq!(e.pointer, Point::new(4.5, -2.0));
                assert_eq!(e.button, Some(MouseButton::Secondary));
                assert!(e.press_active);
            }
            other => panic!("expected Sample, got {other:?}"),
        }
        assert!(matches!(
            events[1],
            RecordedEvent::Gesture(GestureEvent {
                kind: EventKind::MouseDrag,
                ..
            })
        ));
        match &events[2] {
            RecordedEvent::ReactionFailed {
                kind,
                owner,
                message,
            } => {
                assert_eq!(*kind, EventKind::MouseDrag);
                assert_eq!(*owner, Some(1));
                assert_eq!(message, "drop target gone");
            }
            other => panic!("expected ReactionFailed, got {other:?}"),
        }
        match &events[3] {
            RecordedEvent::Dispatch(e) => {
                assert_eq!((e.registered, e.invoked, e.stopped), (2, 1, false));
            }
            other => panic!("expected Dispatch, got {other:?}"),
        }
        assert!(matches!(
            events[4],
            RecordedEvent::LayoutPush {
                root: 1,
                visited: 5,
                recomputed: 4,
            }
        ));
    }

    #[test]
    fn truncated_recording_stops_cleanly() {
        let mut rec = RecorderSink::new();
        rec.on_dispatch(&DispatchEvent {
            kind: EventKind::KeyDown,
            registered: 1,
            invoked: 1,
            stopped: false,
        });
        rec.on_dispatch(&DispatchEvent {
            kind: EventKind::KeyDown,
            registered: 1,
            invoked: 0,
            stopped: false,
        });
        let bytes = rec.into_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
