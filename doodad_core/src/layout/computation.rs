// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cursor handed to computation steps.

use kurbo::{Point, Rect, Size};

use super::config::Padding;
use super::graph::LayoutGraph;
use super::id::NodeId;

/// Mutable view of one node while its steps run.
///
/// Writes go straight to the node's stored fields, so later steps (and
/// reentrant reads of this node from other nodes' steps) observe them.
/// Reads of *other* nodes go through the graph and recompute those nodes
/// on demand.
///
/// Every mutator returns `&mut Self` for chaining:
///
/// ```
/// # use doodad_core::layout::LayoutGraph;
/// # use kurbo::{Rect, Size};
/// let mut graph = LayoutGraph::new();
/// let panel = graph.create_node_at(Rect::new(0.0, 0.0, 200.0, 100.0));
/// let badge = graph.computed(move |cx| {
///     cx.set_dimensions(Size::new(20.0, 20.0))
///         .align_right_within(panel)
///         .align_top_within(panel)
///         .move_left(4.0);
/// });
/// graph.add_dependent(panel, badge);
/// assert_eq!(graph.rect(badge), Rect::new(176.0, 0.0, 196.0, 20.0));
/// ```
pub struct Computation<'a> {
    graph: &'a mut LayoutGraph,
    node: NodeId,
}

impl core::fmt::Debug for Computation<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Computation")
            .field("node", &self.node)
            .field("rect", &self.rect())
            .finish_non_exhaustive()
    }
}

impl<'a> Computation<'a> {
    pub(crate) fn new(graph: &'a mut LayoutGraph, node: NodeId) -> Self {
        Self { graph, node }
    }

    /// The node being computed.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    fn slot(&self) -> usize {
        self.node.idx as usize
    }

    // -- Own fields --

    /// Current left edge of this node.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.graph.origin[self.slot()].x
    }

    /// Current top edge of this node.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.graph.origin[self.slot()].y
    }

    /// Current width of this node.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.graph.size[self.slot()].width
    }

    /// Current height of this node.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.graph.size[self.slot()].height
    }

    /// Current origin of this node.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.graph.origin[self.slot()]
    }

    /// Current size of this node.
    #[must_use]
    pub fn size(&self) -> Size {
        self.graph.size[self.slot()]
    }

    /// Current rectangle of this node.
    #[must_use]
    pub fn rect(&self) -> Rect {
        let (o, s) = (self.origin(), self.size());
        Rect::new(o.x, o.y, o.x + s.width, o.y + s.height)
    }

    // -- Other nodes (recompute on read) --

    /// Left edge of `other`.
    pub fn x_of(&mut self, other: NodeId) -> f64 {
        self.graph.x(other)
    }

    /// Top edge of `other`.
    pub fn y_of(&mut self, other: NodeId) -> f64 {
        self.graph.y(other)
    }

    /// Width of `other`.
    pub fn width_of(&mut self, other: NodeId) -> f64 {
        self.graph.width(other)
    }

    /// Height of `other`.
    pub fn height_of(&mut self, other: NodeId) -> f64 {
        self.graph.height(other)
    }

    /// Origin of `other`.
    pub fn origin_of(&mut self, other: NodeId) -> Point {
        self.graph.origin(other)
    }

    /// Size of `other`.
    pub fn size_of(&mut self, other: NodeId) -> Size {
        self.graph.size(other)
    }

    /// Rectangle of `other`.
    pub fn rect_of(&mut self, other: NodeId) -> Rect {
        self.graph.rect(other)
    }

    /// Smallest rectangle enclosing `others`.
    pub fn bounding_of(&mut self, others: &[NodeId]) -> Rect {
        self.graph.bounding(others)
    }

    // -- Setters --

    /// Sets the left edge.
    pub fn set_x(&mut self, x: f64) -> &mut Self {
        let slot = self.slot();
        self.graph.origin[slot].x = x;
        self
    }

    /// Sets the top edge.
    pub fn set_y(&mut self, y: f64) -> &mut Self {
        let slot = self.slot();
        self.graph.origin[slot].y = y;
        self
    }

    /// Sets the width.
    pub fn set_width(&mut self, width: f64) -> &mut Self {
        let slot = self.slot();
        self.graph.size[slot].width = width;
        self
    }

    /// Sets the height.
    pub fn set_height(&mut self, height: f64) -> &mut Self {
        let slot = self.slot();
        self.graph.size[slot].height = height;
        self
    }

    /// Sets both coordinates of the origin.
    pub fn set_origin(&mut self, origin: Point) -> &mut Self {
        let slot = self.slot();
        self.graph.origin[slot] = origin;
        self
    }

    /// Sets width and height.
    pub fn set_dimensions(&mut self, size: Size) -> &mut Self {
        let slot = self.slot();
        self.graph.size[slot] = size;
        self
    }

    // -- Copying --

    /// Takes position and size from `other`.
    pub fn copy(&mut self, other: NodeId) -> &mut Self {
        let r = self.rect_of(other);
        self.set_origin(r.origin())
            .set_dimensions(Size::new(r.x1 - r.x0, r.y1 - r.y0))
    }

    /// Takes the position of `other`.
    pub fn copy_position_of(&mut self, other: NodeId) -> &mut Self {
        let origin = self.origin_of(other);
        self.set_origin(origin)
    }

    /// Takes the size of `other`.
    pub fn copy_dimensions_of(&mut self, other: NodeId) -> &mut Self {
        let size = self.size_of(other);
        self.set_dimensions(size)
    }

    // -- Relative placement --

    /// Places the top edge at `other`'s bottom edge.
    pub fn move_below(&mut self, other: NodeId) -> &mut Self {
        let r = self.rect_of(other);
        self.set_y(r.y1)
    }

    /// Places the bottom edge at `other`'s top edge.
    pub fn move_above(&mut self, other: NodeId) -> &mut Self {
        let top = self.y_of(other);
        let h = self.height();
        self.set_y(top - h)
    }

    /// Places the right edge at `other`'s left edge.
    pub fn move_left_of(&mut self, other: NodeId) -> &mut Self {
        let left = self.x_of(other);
        let w = self.width();
        self.set_x(left - w)
    }

    /// Places the left edge at `other`'s right edge.
    pub fn move_right_of(&mut self, other: NodeId) -> &mut Self {
        let r = self.rect_of(other);
        self.set_x(r.x1)
    }

    // -- Alignment --

    /// Lines the left edge up with `other`'s.
    pub fn align_left_within(&mut self, other: NodeId) -> &mut Self {
        let left = self.x_of(other);
        self.set_x(left)
    }

    /// Lines the right edge up with `other`'s.
    pub fn align_right_within(&mut self, other: NodeId) -> &mut Self {
        let r = self.rect_of(other);
        let w = self.width();
        self.set_x(r.x1 - w)
    }

    /// Lines the top edge up with `other`'s.
    pub fn align_top_within(&mut self, other: NodeId) -> &mut Self {
        let top = self.y_of(other);
        self.set_y(top)
    }

    /// Lines the bottom edge up with `other`'s.
    pub fn align_bottom_within(&mut self, other: NodeId) -> &mut Self {
        let r = self.rect_of(other);
        let h = self.height();
        self.set_y(r.y1 - h)
    }

    /// Centers horizontally on `other`.
    pub fn center_horizontally_within(&mut self, other: NodeId) -> &mut Self {
        let r = self.rect_of(other);
        let w = self.width();
        self.set_x(r.x0 + (r.x1 - r.x0) / 2.0 - w / 2.0)
    }

    /// Centers vertically on `other`.
    pub fn center_vertically_within(&mut self, other: NodeId) -> &mut Self {
        let r = self.rect_of(other);
        let h = self.height();
        self.set_y(r.y0 + (r.y1 - r.y0) / 2.0 - h / 2.0)
    }

    /// Centers on `other` along both axes.
    pub fn center_within(&mut self, other: NodeId) -> &mut Self {
        self.center_horizontally_within(other)
            .center_vertically_within(other)
    }

    // -- Nudges --

    /// Moves up by `amount`.
    pub fn move_up(&mut self, amount: f64) -> &mut Self {
        let y = self.y();
        self.set_y(y - amount)
    }

    /// Moves down by `amount`.
    pub fn move_down(&mut self, amount: f64) -> &mut Self {
        let y = self.y();
        self.set_y(y + amount)
    }

    /// Moves left by `amount`.
    pub fn move_left(&mut self, amount: f64) -> &mut Self {
        let x = self.x();
        self.set_x(x - amount)
    }

    /// Moves right by `amount`.
    pub fn move_right(&mut self, amount: f64) -> &mut Self {
        let x = self.x();
        self.set_x(x + amount)
    }

    /// Grows the width by `amount`.
    pub fn increase_width(&mut self, amount: f64) -> &mut Self {
        let w = self.width();
        self.set_width(w + amount)
    }

    /// Shrinks the width by `amount`. The result may go negative.
    pub fn decrease_width(&mut self, amount: f64) -> &mut Self {
        let w = self.width();
        self.set_width(w - amount)
    }

    /// Grows the height by `amount`.
    pub fn increase_height(&mut self, amount: f64) -> &mut Self {
        let h = self.height();
        self.set_height(h + amount)
    }

    /// Shrinks the height by `amount`. The result may go negative.
    pub fn decrease_height(&mut self, amount: f64) -> &mut Self {
        let h = self.height();
        self.set_height(h - amount)
    }

    /// Pulls every edge inward by the matching padding.
    pub fn inset(&mut self, padding: Padding) -> &mut Self {
        self.move_right(padding.left)
            .move_down(padding.top)
            .decrease_width(padding.horizontal())
            .decrease_height(padding.vertical())
    }

    /// Pushes every edge outward by the matching padding.
    pub fn outset(&mut self, padding: Padding) -> &mut Self {
        self.move_left(padding.left)
            .move_up(padding.top)
            .increase_width(padding.horizontal())
            .increase_height(padding.vertical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_anchor() -> (LayoutGraph, NodeId) {
        let mut graph = LayoutGraph::new();
        let anchor = graph.create_node_at(Rect::new(100.0, 100.0, 200.0, 150.0));
        (graph, anchor)
    }

    fn place(
        graph: &mut LayoutGraph,
        anchor: NodeId,
        f: impl Fn(&mut Computation<'_>, NodeId) + 'static,
    ) -> Rect {
        let id = graph.computed(move |cx| {
            cx.set_dimensions(Size::new(20.0, 10.0));
            f(cx, anchor);
        });
        graph.add_dependent(anchor, id);
        graph.rect(id)
    }

    #[test]
    fn relative_placement() {
        let (mut graph, a) = with_anchor();
        assert_eq!(
            place(&mut graph, a, |cx, a| {
                cx.copy_position_of(a).move_below(a);
            }),
            Rect::new(100.0, 150.0, 120.0, 160.0)
        );
        assert_eq!(
            place(&mut graph, a, |cx, a| {
                cx.copy_position_of(a).move_above(a);
            }),
            Rect::new(100.0, 90.0, 120.0, 100.0)
        );
        assert_eq!(
            place(&mut graph, a, |cx, a| {
                cx.copy_position_of(a).move_left_of(a);
            }),
            Rect::new(80.0, 100.0, 100.0, 110.0)
        );
        assert_eq!(
            place(&mut graph, a, |cx, a| {
                cx.copy_position_of(a).move_right_of(a);
            }),
            Rect::new(200.0, 100.0, 220.0, 110.0)
        );
    }

    #[test]
    fn alignment_within() {
        let (mut graph, a) = with_anchor();
        assert_eq!(
            place(&mut graph, a, |cx, a| {
                cx.align_right_within(a).align_bottom_within(a);
            }),
            Rect::new(180.0, 140.0, 200.0, 150.0)
        );
        assert_eq!(
            place(&mut graph, a, |cx, a| {
                cx.align_left_within(a).align_top_within(a);
            }),
            Rect::new(100.0, 100.0, 120.0, 110.0)
        );
        assert_eq!(
            place(&mut graph, a, |cx, a| {
                cx.center_within(a);
            }),
            Rect::new(140.0, 120.0, 160.0, 130.0)
        );
    }

    #[test]
    fn copy_takes_whole_rect() {
        let (mut graph, a) = with_anchor();
        let r = place(&mut graph, a, |cx, a| {
            cx.copy(a);
        });
        assert_eq!(r, Rect::new(100.0, 100.0, 200.0, 150.0));
    }

    #[test]
    fn inset_then_outset_restores() {
        let (mut graph, a) = with_anchor();
        let pad = Padding {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 4.0,
        };
        let inner = place(&mut graph, a, move |cx, a| {
            cx.copy(a).inset(pad);
        });
        assert_eq!(inner, Rect::new(104.0, 101.0, 198.0, 147.0));
        let back = place(&mut graph, a, move |cx, a| {
            cx.copy(a).inset(pad).outset(pad);
        });
        assert_eq!(back, Rect::new(100.0, 100.0, 200.0, 150.0));
    }

    #[test]
    fn nudges_accumulate() {
        let mut graph = LayoutGraph::new();
        let id = graph.computed(|cx| {
            cx.move_right(5.0)
                .move_down(7.0)
                .move_left(2.0)
                .move_up(1.0)
                .increase_width(10.0)
                .decrease_width(3.0)
                .increase_height(4.0)
                .decrease_height(6.0);
        });
        assert_eq!(graph.origin(id), Point::new(3.0, 6.0));
        assert_eq!(graph.size(id), Size::new(7.0, -2.0));
    }
}
