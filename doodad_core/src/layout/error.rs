// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use super::id::NodeId;

/// Recoverable errors from [`LayoutGraph`](super::LayoutGraph) edge
/// management.
///
/// Contract violations (self, duplicate, reciprocal, or cyclic edges; stale
/// handles) are not represented here: those panic at the call that
/// introduced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// `dependent` was never registered as a dependent of `owner`.
    DependentNotFound {
        /// Node whose dependent list was searched.
        owner: NodeId,
        /// Node that was expected in the list.
        dependent: NodeId,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DependentNotFound { owner, dependent } => {
                write!(f, "layout node {dependent} is not a dependent of {owner}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}
