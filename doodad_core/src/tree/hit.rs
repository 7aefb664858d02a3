// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer hit-test conditions for reactions.

use kurbo::{Point, Rect};

use super::capability::{HasLayout, HasTree};
use super::id::DoodadId;
use crate::event::Positioned;
use crate::layout::NodeId;

/// Whether `point` lies in `rect`, edges included.
#[must_use]
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// A condition accepting positioned events that land on `node`.
///
/// The rectangle is read when the condition runs, so a node that moved
/// since registration is tested where it is now. A destroyed node accepts
/// nothing. Hidden doodads need no extra check: hiding disables their
/// reactions.
///
/// ```
/// use doodad_core::event::{MouseButton, MouseDown, Reaction};
/// use doodad_core::layout::LayoutGraph;
/// use doodad_core::tree::pointer_within;
/// use kurbo::Rect;
///
/// let mut graph = LayoutGraph::new();
/// let button = graph.create_node_at(Rect::new(0.0, 0.0, 80.0, 20.0));
/// let _press = Reaction::<LayoutGraph>::new(pointer_within(button), |_: &MouseDown, _, _| Ok(()));
/// ```
pub fn pointer_within<E, C>(node: NodeId) -> impl Fn(&E, &mut C) -> bool + 'static
where
    E: Positioned,
    C: HasLayout,
{
    move |event: &E, cx: &mut C| {
        let layout = cx.layout_mut();
        layout.is_alive(node) && rect_contains(layout.rect(node), event.position())
    }
}

/// A condition accepting positioned events that miss `node`.
///
/// Useful for dismissing popups. A destroyed node accepts nothing. The
/// node's visibility is unknown here, so a reaction on one doodad that
/// watches another should use [`pointer_outside_doodad`] instead.
pub fn pointer_outside<E, C>(node: NodeId) -> impl Fn(&E, &mut C) -> bool + 'static
where
    E: Positioned,
    C: HasLayout,
{
    move |event: &E, cx: &mut C| {
        let layout = cx.layout_mut();
        layout.is_alive(node) && !rect_contains(layout.rect(node), event.position())
    }
}

/// Like [`pointer_within`], but for a doodad: a hidden or torn-down
/// doodad accepts nothing.
pub fn pointer_within_doodad<E, C>(id: DoodadId) -> impl Fn(&E, &mut C) -> bool + 'static
where
    E: Positioned,
    C: HasTree,
{
    move |event: &E, cx: &mut C| {
        let tree = cx.tree_mut();
        tree.is_alive(id) && tree.is_visible(id) && rect_contains(tree.frame(id), event.position())
    }
}

/// Like [`pointer_outside`], but for a doodad: a hidden or torn-down
/// doodad accepts nothing, whichever doodad the reaction belongs to.
pub fn pointer_outside_doodad<E, C>(id: DoodadId) -> impl Fn(&E, &mut C) -> bool + 'static
where
    E: Positioned,
    C: HasTree,
{
    move |event: &E, cx: &mut C| {
        let tree = cx.tree_mut();
        tree.is_alive(id) && tree.is_visible(id) && !rect_contains(tree.frame(id), event.position())
    }
}
