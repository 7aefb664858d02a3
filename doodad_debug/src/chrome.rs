// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use doodad_core::event::MouseButton;
use doodad_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of instant events, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
/// Dispatch, failure and layout events carry no clock reading of their own
/// and are placed at the most recent sample or gesture.
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut ts = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Sample(e) => {
                ts = ticks_to_us(e.now.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": "Sample",
                    "cat": "Input",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "pointer": [e.pointer.x, e.pointer.y],
                        "button": e.button.map(button_name),
                        "press_active": e.press_active,
                    }
                }));
            }
            RecordedEvent::Gesture(e) => {
                ts = ticks_to_us(e.now.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": e.kind.name(),
                    "cat": "Gesture",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "position": [e.position.x, e.position.y],
                    }
                }));
            }
            RecordedEvent::Dispatch(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Dispatch",
                    "cat": "Dispatch",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "kind": e.kind.name(),
                        "registered": e.registered,
                        "invoked": e.invoked,
                        "stopped": e.stopped,
                    }
                }));
            }
            RecordedEvent::ReactionFailed {
                kind,
                owner,
                message,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "ReactionFailed",
                    "cat": "Dispatch",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "kind": kind.name(),
                        "owner": owner,
                        "error": message,
                    }
                }));
            }
            RecordedEvent::LayoutPush {
                root,
                visited,
                recomputed,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "LayoutPush",
                    "cat": "Layout",
                    "ts": ts,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "root": root,
                        "visited": visited,
                        "recomputed": recomputed,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

fn button_name(button: MouseButton) -> &'static str {
    match button {
        MouseButton::Primary => "primary",
        MouseButton::Secondary => "secondary",
        MouseButton::Tertiary => "tertiary",
    }
}
