// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-text snapshots of dispatcher, layout and tree state.
//!
//! The dumps read cached geometry only, so taking one never triggers a
//! recompute. Nodes that are still dirty are flagged instead.

use std::collections::BTreeMap;
use std::fmt::Write;

use doodad_core::event::{EventDispatcher, EventKind, Reaction};
use doodad_core::layout::{LayoutGraph, NodeId};
use doodad_core::tree::{DoodadId, DoodadTree};
use kurbo::Rect;

/// Registered reactions per event kind, grouped by owning node.
///
/// Within a group reactions appear in dispatch order, topmost first.
#[must_use]
pub fn dispatcher<C>(dispatcher: &EventDispatcher<C>) -> String {
    let mut out = String::new();
    let p = dispatcher.pointer();
    let _ = writeln!(out, "pointer: ({}, {})", p.x, p.y);
    match dispatcher.press() {
        Some(press) => {
            let _ = writeln!(
                out,
                "press: {:?} from ({}, {}) to ({}, {}) since {}",
                press.button,
                press.start.x,
                press.start.y,
                press.current.x,
                press.current.y,
                press.started_at.ticks(),
            );
        }
        None => {
            let _ = writeln!(out, "press: none");
        }
    }

    for kind in EventKind::ALL {
        let count = dispatcher.reaction_count(kind);
        if count == 0 {
            continue;
        }
        let _ = writeln!(out, "{kind}: {count} reactions");

        let mut groups: BTreeMap<Option<NodeId>, Vec<(String, Reaction<C>)>> = BTreeMap::new();
        for (depth, reaction) in dispatcher.reactions(kind).into_iter().rev() {
            groups
                .entry(reaction.owner())
                .or_default()
                .push((depth.to_string(), reaction));
        }
        for (owner, group) in groups {
            match owner {
                Some(node) => {
                    let _ = writeln!(out, "  owner {node} ({} reactions)", group.len());
                }
                None => {
                    let _ = writeln!(out, "  unowned ({} reactions)", group.len());
                }
            }
            for (i, (depth, reaction)) in group.iter().enumerate() {
                let state = if reaction.is_enabled() {
                    "enabled"
                } else {
                    "disabled"
                };
                let _ = writeln!(out, "    {i}: depth={depth} {state}");
            }
        }
    }
    out
}

/// Every live layout node with its cached rectangle and outgoing edges.
#[must_use]
pub fn layout(graph: &LayoutGraph) -> String {
    let mut out = String::new();
    for node in graph.nodes() {
        let _ = write!(
            out,
            "{node} {} steps:{}",
            rect_summary(graph.cached_rect(node)),
            graph.step_count(node),
        );
        if graph.is_dirty(node) && graph.step_count(node) > 0 {
            out.push_str(" dirty");
        }
        let dependents: Vec<String> = graph.dependents(node).map(|d| d.to_string()).collect();
        if !dependents.is_empty() {
            let _ = write!(out, " -> {}", dependents.join(", "));
        }
        out.push('\n');
    }
    out
}

/// The doodad tree, one line per doodad, children indented under parents.
#[must_use]
pub fn tree<C>(tree: &DoodadTree<C>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "doodad tree ({} doodads)", tree.len());
    tree_line(tree, tree.root(), 0, &mut out);
    out
}

fn tree_line<C>(tree: &DoodadTree<C>, id: DoodadId, indent: usize, out: &mut String) {
    let graph = tree.layout();
    let node = tree.node(id);
    let prefix = if indent == 0 {
        String::new()
    } else {
        format!("{}├─ ", "│  ".repeat(indent - 1))
    };
    let _ = writeln!(
        out,
        "{prefix}{id} [{}] {} deps:{} steps:{} reactions:{} {}",
        tree.depth(id),
        rect_summary(graph.cached_rect(node)),
        graph.dependents(node).count(),
        graph.step_count(node),
        tree.reactions(id).len(),
        if tree.is_visible(id) { "visible" } else { "hidden" },
    );
    for child in tree.children(id) {
        tree_line(tree, child, indent + 1, out);
    }
}

fn rect_summary(r: Rect) -> String {
    format!("pos({},{}) size({}×{})", r.x0, r.y0, r.x1 - r.x0, r.y1 - r.y0)
}

#[cfg(test)]
mod tests {
    use doodad_core::event::{DepthKey, MouseDown, MouseUp, Reaction};
    use kurbo::Rect;

    use super::*;

    #[test]
    fn dispatcher_groups_by_owner() {
        let mut graph = LayoutGraph::new();
        let a = graph.create_node();
        let b = graph.create_node();

        let d = EventDispatcher::<()>::new();
        let first = Reaction::always(|_: &MouseDown, _: &mut (), _| Ok(()));
        first.set_owner(Some(a));
        let second = Reaction::always(|_: &MouseDown, _: &mut (), _| Ok(()));
        second.set_owner(Some(b));
        second.set_enabled(false);
        let third = Reaction::always(|_: &MouseDown, _: &mut (), _| Ok(()));
        third.set_owner(Some(a));
        let loose = Reaction::always(|_: &MouseUp, _: &mut (), _| Ok(()));

        d.register(first, DepthKey::from([0, 1]));
        d.register(second, DepthKey::from([0, 2]));
        d.register(third, DepthKey::from([0, 1, 1]));
        d.register(loose, DepthKey::root());

        let text = dispatcher(&d);
        assert!(text.contains("press: none"), "got: {text}");
        assert!(text.contains("mouse-down: 3 reactions"), "got: {text}");
        let owner_a = "  owner #0 (2 reactions)\n    0: depth=0.1.1 enabled\n    1: depth=0.1 enabled\n";
        assert!(text.contains(owner_a), "got: {text}");
        let owner_b = "  owner #1 (1 reactions)\n    0: depth=0.2 disabled\n";
        assert!(text.contains(owner_b), "got: {text}");
        assert!(text.contains("mouse-up: 1 reactions\n  unowned"), "got: {text}");
        assert!(!text.contains("key-down"), "empty kinds are skipped");
    }

    #[test]
    fn layout_lists_edges_and_dirty_nodes() {
        let mut graph = LayoutGraph::new();
        let a = graph.create_node_at(Rect::new(0.0, 0.0, 10.0, 5.0));
        let b = graph.computed(move |cx| {
            cx.copy(a);
        });
        graph.add_dependent(a, b);

        let text = layout(&graph);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "#0 pos(0,0) size(10×5) steps:0 -> #1");
        assert_eq!(lines[1], "#1 pos(0,0) size(0×0) steps:1 dirty");

        graph.force_recalculate(a);
        let text = layout(&graph);
        assert_eq!(text.lines().nth(1), Some("#1 pos(0,0) size(10×5) steps:1"));
    }

    #[test]
    fn tree_is_indented() {
        let mut t = DoodadTree::<()>::with_root_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        let root = t.root();
        let a = t.add_child(root, None);
        let _a1 = t.add_child(a, None);
        let b = t.add_child(root, None);
        t.hide(b);
        let d = EventDispatcher::new();
        t.setup_subtree(root, &d);

        let text = tree(&t);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "doodad tree (4 doodads)");
        assert!(lines[1].starts_with("d0 [0] pos(0,0) size(20×20) deps:2"), "got: {text}");
        assert!(lines[2].starts_with("├─ d1 [0.1]"), "got: {text}");
        assert!(lines[3].starts_with("│  ├─ d2 [0.1.1]"), "got: {text}");
        assert!(lines[4].starts_with("├─ d3 [0.2]") && lines[4].ends_with("hidden"), "got: {text}");
    }
}
