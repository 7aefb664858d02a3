// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the frame tick.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! dispatcher and the layout graph call as they work. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! The `*_traced` entry points
//! ([`EventDispatcher::sample_traced`](crate::event::EventDispatcher::sample_traced),
//! [`EventDispatcher::dispatch_traced`](crate::event::EventDispatcher::dispatch_traced),
//! [`LayoutGraph::force_recalculate_traced`](crate::layout::LayoutGraph::force_recalculate_traced))
//! take a `Tracer`; the plain entry points pass [`Tracer::none`].

use kurbo::Point;

use crate::event::{EventKind, MouseButton, ReactionError};
use crate::layout::NodeId;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per [`sample`](crate::event::EventDispatcher::sample) call,
/// before any gesture is synthesized.
#[derive(Clone, Copy, Debug)]
pub struct SampleEvent {
    /// Timestamp of the input frame.
    pub now: HostTime,
    /// Pointer position reported by the frame.
    pub pointer: Point,
    /// Button the press tracker selected, if any.
    pub button: Option<MouseButton>,
    /// Whether a press was already in progress before this sample.
    pub press_active: bool,
}

/// Emitted for every event the dispatcher synthesizes from raw input.
#[derive(Clone, Copy, Debug)]
pub struct GestureEvent {
    /// Timestamp of the input frame that produced the gesture.
    pub now: HostTime,
    /// Which kind of event was synthesized.
    pub kind: EventKind,
    /// Anchor point of the event.
    pub position: Point,
}

/// Emitted after an event occurrence has been routed.
#[derive(Clone, Copy, Debug)]
pub struct DispatchEvent {
    /// Which kind of event was routed.
    pub kind: EventKind,
    /// Number of reactions registered for the kind at dispatch time.
    pub registered: u32,
    /// Number of callbacks that ran.
    pub invoked: u32,
    /// Whether a reaction stopped propagation.
    pub stopped: bool,
}

/// Emitted when a reaction callback returns an error.
#[derive(Clone, Copy, Debug)]
pub struct ReactionFailedEvent {
    /// Which kind of event was being routed.
    pub kind: EventKind,
    /// Owning node of the failing reaction, if bound to one.
    pub owner: Option<NodeId>,
}

/// Emitted after an eager push through the dependency graph.
#[derive(Clone, Copy, Debug)]
pub struct LayoutPushEvent {
    /// Node the push started from.
    pub root: NodeId,
    /// Nodes reached (root included).
    pub visited: u32,
    /// Nodes whose computation steps actually ran during the push.
    pub recomputed: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the dispatcher and the layout graph.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of every input sample.
    fn on_sample(&mut self, e: &SampleEvent) {
        _ = e;
    }

    /// Called for every synthesized gesture.
    fn on_gesture(&mut self, e: &GestureEvent) {
        _ = e;
    }

    /// Called after an occurrence has been routed.
    fn on_dispatch(&mut self, e: &DispatchEvent) {
        _ = e;
    }

    /// Called when a reaction callback fails.
    fn on_reaction_failed(&mut self, e: &ReactionFailedEvent, error: &ReactionError) {
        _ = (e, error);
    }

    /// Called after an eager layout push.
    fn on_layout_push(&mut self, e: &LayoutPushEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SampleEvent`].
    #[inline]
    pub fn sample(&mut self, e: &SampleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sample(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GestureEvent`].
    #[inline]
    pub fn gesture(&mut self, e: &GestureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_gesture(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DispatchEvent`].
    #[inline]
    pub fn dispatch(&mut self, e: &DispatchEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_dispatch(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ReactionFailedEvent`] together with the callback's error.
    #[inline]
    pub fn reaction_failed(&mut self, e: &ReactionFailedEvent, error: &ReactionError) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reaction_failed(e, error);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (e, error);
        }
    }

    /// Emits a [`LayoutPushEvent`].
    #[inline]
    pub fn layout_push(&mut self, e: &LayoutPushEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout_push(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dispatch() -> DispatchEvent {
        DispatchEvent {
            kind: EventKind::MouseDown,
            registered: 3,
            invoked: 1,
            stopped: true,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_dispatch(&sample_dispatch());
        sink.on_gesture(&GestureEvent {
            now: HostTime(0),
            kind: EventKind::MouseMove,
            position: Point::ZERO,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.dispatch(&sample_dispatch());
        tracer.sample(&SampleEvent {
            now: HostTime(1),
            pointer: Point::new(1.0, 2.0),
            button: None,
            press_active: false,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            kinds: Vec<EventKind>,
        }
        impl TraceSink for RecordingSink {
            fn on_dispatch(&mut self, e: &DispatchEvent) {
                self.kinds.push(e.kind);
            }
        }

        let mut sink = RecordingSink { kinds: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.dispatch(&sample_dispatch());
        drop(tracer);
        assert_eq!(sink.kinds, &[EventKind::MouseDown]);
    }
}
