// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Doodads: the on-screen elements that tie layout and events together.
//!
//! A [`DoodadTree`] owns a [`LayoutGraph`](crate::layout::LayoutGraph) and
//! gives every doodad a layout node, a [`ReactionSet`](crate::event::ReactionSet)
//! and a [`DepthKey`](crate::event::DepthKey) that follows its path from the
//! root. Children default to covering their parent, and hiding a doodad
//! hides its subtree and silences its reactions.
//!
//! The usual lifecycle is: build the tree with [`add_child`] and
//! [`add_reaction`], call [`setup_subtree`] once, then rebuild parts with
//! [`re_setup`] or drop them with [`teardown`].
//!
//! [`add_child`]: DoodadTree::add_child
//! [`add_reaction`]: DoodadTree::add_reaction
//! [`setup_subtree`]: DoodadTree::setup_subtree
//! [`re_setup`]: DoodadTree::re_setup
//! [`teardown`]: DoodadTree::teardown

mod capability;
mod hit;
mod id;
mod store;

pub use capability::{Drawable, HasLayout, HasTree};
pub use hit::{
    pointer_outside, pointer_outside_doodad, pointer_within, pointer_within_doodad, rect_contains,
};
pub use id::DoodadId;
pub use store::DoodadTree;
