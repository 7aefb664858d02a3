// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental layout graph.
//!
//! A *layout node* is a rectangle whose fields are produced by an ordered
//! list of computation steps. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed.
//! - Stored geometry (origin and size), written directly by callers or by
//!   the node's own steps through a [`Computation`] cursor.
//! - A dirty flag and a recompute counter.
//! - An ordered list of *dependents*: nodes whose geometry is derived from
//!   this one.
//!
//! # Recompute
//!
//! Reads are lazy. Reading a dirty node that has steps zeroes its fields,
//! runs every step in order and clears the flag; later reads return the
//! cached values until something invalidates the node again.
//!
//! Invalidation is either passive or eager:
//!
//! - [`mark_dirty`](LayoutGraph::mark_dirty) tags the node and everything
//!   downstream, leaving the work to the next reads.
//! - [`force_recalculate`](LayoutGraph::force_recalculate) tags the same set
//!   and then pushes fresh values through it depth-first.
//!
//! Direct setters on the graph write the stored fields and do neither.
//!
//! # Edges
//!
//! [`add_dependent`](LayoutGraph::add_dependent) rejects duplicate,
//! reciprocal and longer cyclic edges with a panic; see
//! [`dirty`](crate::dirty) for how cycles are detected.

mod computation;
mod config;
mod error;
mod flow;
mod graph;
mod id;

pub use computation::Computation;
pub use config::{Flow, FlowConfig, HorizontalAlignment, Padding, SizeRule, VerticalAlignment};
pub use error::LayoutError;
pub use flow::arrange_flow;
pub use graph::{LayoutGraph, Step};
pub use id::{INVALID, NodeId};
