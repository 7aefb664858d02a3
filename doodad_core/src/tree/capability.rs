// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Narrow capabilities a doodad or its host can expose.

use kurbo::Rect;

use super::store::DoodadTree;
use crate::layout::LayoutGraph;

/// Access to the layout graph that positions a set of nodes.
///
/// Reaction conditions such as [`pointer_within`](super::pointer_within)
/// receive the application context, not the tree, so the context implements
/// this to let them resolve rectangles.
pub trait HasLayout {
    /// The graph.
    fn layout(&self) -> &LayoutGraph;

    /// The graph, mutably. Reads recompute dirty nodes.
    fn layout_mut(&mut self) -> &mut LayoutGraph;
}

impl HasLayout for LayoutGraph {
    fn layout(&self) -> &LayoutGraph {
        self
    }

    fn layout_mut(&mut self) -> &mut LayoutGraph {
        self
    }
}

impl<C> HasLayout for DoodadTree<C> {
    fn layout(&self) -> &LayoutGraph {
        DoodadTree::layout(self)
    }

    fn layout_mut(&mut self) -> &mut LayoutGraph {
        DoodadTree::layout_mut(self)
    }
}

/// Access to the doodad tree whose reactions receive this context.
///
/// Needed by conditions that care about a doodad rather than a bare layout
/// node, such as [`pointer_outside_doodad`](super::pointer_outside_doodad).
pub trait HasTree: Sized {
    /// The tree.
    fn tree(&self) -> &DoodadTree<Self>;

    /// The tree, mutably.
    fn tree_mut(&mut self) -> &mut DoodadTree<Self>;
}

/// Something that renders itself into a rectangle on a surface `S`.
///
/// The toolkit never looks inside `S`; see
/// [`DoodadTree::paint`](super::DoodadTree::paint).
pub trait Drawable<S: ?Sized> {
    /// Draws into `frame`.
    fn draw(&self, frame: Rect, surface: &mut S);
}
