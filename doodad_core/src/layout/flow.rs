// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flow arrangement of children inside a container.

use alloc::vec::Vec;

use super::computation::Computation;
use super::config::{Flow, FlowConfig, HorizontalAlignment, SizeRule, VerticalAlignment};
use super::graph::LayoutGraph;
use super::id::NodeId;

/// Lays `children` out one after another inside `container`.
///
/// Each child gets one extra computation step that positions it: the first
/// child starts at the container origin plus padding, each later child
/// follows the previous one plus [`space_between`](FlowConfig::space_between)
/// along the flow axis, and the cross axis is aligned within the container.
/// The steps are appended, so a child's existing sizing steps run first.
///
/// With [`SizeRule::FitContents`] the container also gets a step sizing it
/// to the children's bounding box plus padding. That step only sets the
/// size, so the container's origin must come from an earlier step (or from
/// direct setters if it has none).
///
/// Edges container→child and previous→child are declared where missing.
/// No edge runs from a child back to the container; refresh a fit-contents
/// container with [`LayoutGraph::force_recalculate`] after its children
/// change.
///
/// # Panics
///
/// Panics if any handle is stale or if a child already lists the container
/// (or its successor) as a dependent.
pub fn arrange_flow(
    graph: &mut LayoutGraph,
    container: NodeId,
    children: &[NodeId],
    config: &FlowConfig,
) {
    let config = *config;
    let mut previous: Option<NodeId> = None;
    for &child in children {
        if !graph.has_dependent(container, child) {
            graph.add_dependent(container, child);
        }
        if let Some(prev) = previous
            && !graph.has_dependent(prev, child)
        {
            graph.add_dependent(prev, child);
        }
        graph.set_computation(child, move |cx| place_child(cx, container, previous, &config));
        previous = Some(child);
    }

    if config.size_rule == SizeRule::FitContents {
        let children: Vec<NodeId> = children.to_vec();
        let padding = config.padding;
        graph.set_computation(container, move |cx| {
            let bounds = cx.bounding_of(&children);
            cx.set_width(bounds.width() + padding.horizontal())
                .set_height(bounds.height() + padding.vertical());
        });
    }
}

fn place_child(
    cx: &mut Computation<'_>,
    container: NodeId,
    previous: Option<NodeId>,
    config: &FlowConfig,
) {
    let frame = cx.rect_of(container);
    let padding = config.padding;
    match config.flow {
        Flow::TopToBottom => {
            let w = cx.width();
            let x = match config.horizontal {
                HorizontalAlignment::Left => frame.x0 + padding.left,
                HorizontalAlignment::Center => frame.x0 + frame.width() / 2.0 - w / 2.0,
                HorizontalAlignment::Right => frame.x1 - w - padding.right,
            };
            let y = match previous {
                None => frame.y0 + padding.top,
                Some(prev) => {
                    let p = cx.rect_of(prev);
                    p.y0 + p.height() + config.space_between
                }
            };
            cx.set_x(x).set_y(y);
        }
        Flow::LeftToRight => {
            let h = cx.height();
            let y = match config.vertical {
                VerticalAlignment::Top => frame.y0 + padding.top,
                VerticalAlignment::Center => frame.y0 + frame.height() / 2.0 - h / 2.0,
                VerticalAlignment::Bottom => frame.y1 - h - padding.bottom,
            };
            let x = match previous {
                None => frame.x0 + padding.left,
                Some(prev) => {
                    let p = cx.rect_of(prev);
                    p.x0 + p.width() + config.space_between
                }
            };
            cx.set_x(x).set_y(y);
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::*;
    use crate::layout::Padding;

    fn sized(graph: &mut LayoutGraph, w: f64, h: f64) -> NodeId {
        graph.computed(move |cx| {
            cx.set_dimensions(Size::new(w, h));
        })
    }

    #[test]
    fn column_fits_contents() {
        let mut graph = LayoutGraph::new();
        let container = graph.computed(|cx| {
            cx.set_origin(Point::new(10.0, 20.0));
        });
        let a = sized(&mut graph, 30.0, 20.0);
        let b = sized(&mut graph, 40.0, 10.0);
        let config = FlowConfig {
            padding: Padding::equal(2.0),
            ..FlowConfig::column(5.0)
        };
        arrange_flow(&mut graph, container, &[a, b], &config);
        graph.force_recalculate(container);

        assert_eq!(graph.rect(a), Rect::new(12.0, 22.0, 42.0, 42.0));
        assert_eq!(graph.rect(b), Rect::new(12.0, 47.0, 52.0, 57.0));
        assert_eq!(graph.size(container), Size::new(44.0, 39.0));
        assert!(graph.has_dependent(container, a));
        assert!(graph.has_dependent(a, b));
    }

    #[test]
    fn row_centers_on_cross_axis() {
        let mut graph = LayoutGraph::new();
        let container = graph.create_node_at(Rect::new(0.0, 0.0, 200.0, 50.0));
        let a = sized(&mut graph, 30.0, 20.0);
        let b = sized(&mut graph, 40.0, 10.0);
        let config = FlowConfig {
            padding: Padding {
                left: 5.0,
                ..Padding::ZERO
            },
            size_rule: SizeRule::Fill,
            vertical: VerticalAlignment::Center,
            ..FlowConfig::row(10.0)
        };
        arrange_flow(&mut graph, container, &[a, b], &config);

        assert_eq!(graph.origin(a), Point::new(5.0, 15.0));
        assert_eq!(graph.origin(b), Point::new(45.0, 20.0));
        assert_eq!(graph.size(container), Size::new(200.0, 50.0));
    }

    #[test]
    fn centered_column_settles_after_push() {
        let mut graph = LayoutGraph::new();
        let container = graph.computed(|cx| {
            cx.set_origin(Point::ZERO);
        });
        let a = sized(&mut graph, 30.0, 10.0);
        let b = sized(&mut graph, 40.0, 10.0);
        let config = FlowConfig {
            horizontal: HorizontalAlignment::Center,
            ..FlowConfig::column(0.0)
        };
        arrange_flow(&mut graph, container, &[a, b], &config);
        graph.force_recalculate(container);

        assert_eq!(graph.width(container), 40.0);
        assert_eq!(graph.x(a), 5.0);
        assert_eq!(graph.x(b), 0.0);
    }

    #[test]
    fn right_alignment_respects_padding() {
        let mut graph = LayoutGraph::new();
        let container = graph.create_node_at(Rect::new(0.0, 0.0, 100.0, 100.0));
        let a = sized(&mut graph, 30.0, 10.0);
        let config = FlowConfig {
            padding: Padding::symmetric(0.0, 4.0),
            size_rule: SizeRule::Fill,
            horizontal: HorizontalAlignment::Right,
            ..FlowConfig::default()
        };
        arrange_flow(&mut graph, container, &[a], &config);
        assert_eq!(graph.x(a), 66.0);
    }

    #[test]
    fn empty_flow_is_just_padding() {
        let mut graph = LayoutGraph::new();
        let container = graph.create_node();
        let config = FlowConfig {
            padding: Padding::equal(3.0),
            ..FlowConfig::default()
        };
        arrange_flow(&mut graph, container, &[], &config);
        assert_eq!(graph.size(container), Size::new(6.0, 6.0));
    }
}
