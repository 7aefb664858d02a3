// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use doodad_core::event::{MouseButton, ReactionError};
use doodad_core::time::{HostTime, Timebase};
use doodad_core::trace::{
    DispatchEvent, GestureEvent, LayoutPushEvent, ReactionFailedEvent, SampleEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

fn button_name(button: Option<MouseButton>) -> &'static str {
    match button {
        Some(MouseButton::Primary) => "primary",
        Some(MouseButton::Secondary) => "secondary",
        Some(MouseButton::Tertiary) => "tertiary",
        None => "none",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_sample(&mut self, e: &SampleEvent) {
        let _ = writeln!(
            self.writer,
            "[sample] now={:.1}µs pointer=({:.1}, {:.1}) button={} press={}",
            self.host_us(e.now),
            e.pointer.x,
            e.pointer.y,
            button_name(e.button),
            if e.press_active { "held" } else { "idle" },
        );
    }

    fn on_gesture(&mut self, e: &GestureEvent) {
        let _ = writeln!(
            self.writer,
            "[gesture] {} at ({:.1}, {:.1}) now={:.1}µs",
            e.kind,
            e.position.x,
            e.position.y,
            self.host_us(e.now),
        );
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        let stopped = if e.stopped { " stopped" } else { "" };
        let _ = writeln!(
            self.writer,
            "[dispatch] {} registered={} invoked={}{stopped}",
            e.kind, e.registered, e.invoked,
        );
    }

    fn on_reaction_failed(&mut self, e: &ReactionFailedEvent, error: &ReactionError) {
        let _ = match e.owner {
            Some(owner) => writeln!(
                self.writer,
                "[reaction:failed] {} owner={owner} error={error}",
                e.kind,
            ),
            None => writeln!(self.writer, "[reaction:failed] {} error={error}", e.kind),
        };
    }

    fn on_layout_push(&mut self, e: &LayoutPushEvent) {
        let _ = writeln!(
            self.writer,
            "[layout:push] root={} visited={} recomputed={}",
            e.root, e.visited, e.recomputed,
        );
    }
}

#[cfg(test)]
mod tests {
    use doodad_core::event::EventKind;
    use doodad_core::layout::LayoutGraph;
    use kurbo::Point;

    use super::*;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_sample() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_sample(&SampleEvent {
            now: HostTime(1_500_000),
            pointer: Point::new(10.0, 20.0),
            button: Some(MouseButton::Primary),
            press_active: false,
        });
        let output = output(sink);
        assert!(output.starts_with("[sample]"), "got: {output}");
        assert!(output.contains("now=1500.0µs"), "got: {output}");
        assert!(output.contains("button=primary"), "got: {output}");
    }

    #[test]
    fn pretty_print_dispatch_and_failure() {
        let mut graph = LayoutGraph::new();
        let owner = graph.create_node();

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_dispatch(&DispatchEvent {
            kind: EventKind::MouseUp,
            registered: 3,
            invoked: 2,
            stopped: true,
        });
        sink.on_reaction_failed(
            &ReactionFailedEvent {
                kind: EventKind::MouseUp,
                owner: Some(owner),
            },
            &ReactionError::new("no such item"),
        );
        let output = output(sink);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "[dispatch] mouse-up registered=3 invoked=2 stopped");
        assert_eq!(lines[1], "[reaction:failed] mouse-up owner=#0 error=no such item");
    }
}
