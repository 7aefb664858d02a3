// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout and event plumbing for retained-mode UI trees.
//!
//! `doodad_core` holds the engine half of a small UI toolkit: it decides
//! where things are and who hears about input, and leaves drawing to the
//! host. It is `no_std` compatible (with `alloc`) and single-threaded.
//!
//! # Architecture
//!
//! ```text
//!   Platform input ──► InputFrame ──► EventDispatcher::sample()
//!                                           │ synthesized gestures
//!                                           ▼
//!                           reactions, deepest DepthKey first
//!                                           │ mutate app state / layout
//!                                           ▼
//!   LayoutGraph (lazy pull on read, eager push on force_recalculate)
//!                                           │
//!                                           ▼
//!                        DoodadTree::paint() ──► Drawable
//! ```
//!
//! **[`layout`]** — Struct-of-arrays graph of layout nodes with generational
//! handles. Each node runs an ordered list of computation steps that may
//! read other nodes; dependency edges decide what goes stale together.
//!
//! **[`event`]** — Gesture synthesis (clicks, drags, keys, wheel) from raw
//! per-tick input, and routing to reactions ordered by tree depth with
//! stop-propagation.
//!
//! **[`tree`]** — Doodads: the parent/child tree that ties a layout node and
//! a reaction set to each on-screen element, with hide/show, setup and
//! teardown.
//!
//! **[`dirty`]** — The `understory_dirty` channel layout edges are mirrored
//! on for cycle detection.
//!
//! **[`time`]** — Tick-based timestamps for gesture thresholds.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for dispatch and layout instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod event;
pub mod layout;
pub mod time;
pub mod trace;
pub mod tree;
