// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree-path depth keys.

use alloc::vec::Vec;
use core::fmt;

/// Position of a node in the doodad tree, used to order reactions.
///
/// A key is the path of child ordinals from the root. Keys compare
/// element-wise; when one key is a strict prefix of the other, the shorter
/// key sorts first. Later siblings and deeper descendants sort later, and
/// the dispatcher visits later keys first.
///
/// Depth keys carry no identity: two registrations may share a key.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepthKey(Vec<u32>);

impl DepthKey {
    /// The root key, `[0]`.
    #[must_use]
    pub fn root() -> Self {
        Self(alloc::vec![0])
    }

    /// A key from an explicit path.
    #[must_use]
    pub fn from_path(path: &[u32]) -> Self {
        Self(path.to_vec())
    }

    /// This key with `ordinal` appended.
    #[must_use]
    pub fn child(&self, ordinal: u32) -> Self {
        let mut path = Vec::with_capacity(self.0.len() + 1);
        path.extend_from_slice(&self.0);
        path.push(ordinal);
        Self(path)
    }

    /// The path components.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `self` is `other` or one of its ancestors.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<&[u32]> for DepthKey {
    fn from(path: &[u32]) -> Self {
        Self::from_path(path)
    }
}

impl<const N: usize> From<[u32; N]> for DepthKey {
    fn from(path: [u32; N]) -> Self {
        Self(path.to_vec())
    }
}

impl fmt::Debug for DepthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepthKey{:?}", self.0)
    }
}

impl fmt::Display for DepthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}
