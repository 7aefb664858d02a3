// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Doodad identity.

use core::fmt;

/// A handle to a doodad in a [`DoodadTree`](super::DoodadTree).
///
/// Like [`NodeId`](crate::layout::NodeId), it pairs a slot index with a
/// generation so a handle kept past [`teardown`](super::DoodadTree::teardown)
/// is caught instead of aliasing whatever reuses the slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DoodadId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl DoodadId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for DoodadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DoodadId({}@gen{})", self.idx, self.generation)
    }
}

impl fmt::Display for DoodadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.idx)
    }
}
