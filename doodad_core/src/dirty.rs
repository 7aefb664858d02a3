// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency-tracking channel constants.
//!
//! The [`LayoutGraph`](crate::layout::LayoutGraph) mirrors every
//! owner→dependent edge into an [`understory_dirty`] tracker on the
//! [`LAYOUT`] channel. The tracker is configured to reject cycles, which
//! gives edge insertion a full reachability check: a dependency that would
//! close a loop of any length is refused before it is stored.
//!
//! Dirty flags themselves live next to the geometry in the graph, since a
//! layout node is recomputed on read rather than drained.

use understory_dirty::Channel;

/// Geometry of the owner feeds the geometry of the dependent.
pub const LAYOUT: Channel = Channel::new(0);
