// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, Chrome trace export and state dumps for
//! doodad diagnostics.
//!
//! This crate provides [`TraceSink`](doodad_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//!
//! [`dump`] renders dispatcher registrations, the layout graph and the
//! doodad tree as plain text.

pub mod chrome;
pub mod dump;
pub mod pretty;
pub mod recorder;
