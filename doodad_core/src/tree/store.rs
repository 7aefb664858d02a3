// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays doodad storage with parent/child links.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Rect, Size};

use super::capability::Drawable;
use super::id::DoodadId;
use crate::event::{DepthKey, EventDispatcher, Reaction, ReactionSet};
use crate::layout::{INVALID, LayoutGraph, NodeId};
use crate::trace::Tracer;

/// A tree of doodads sharing one [`LayoutGraph`].
///
/// Every doodad owns a layout node, a [`ReactionSet`] bound to that node,
/// a [`DepthKey`] derived from its position under the root, and a hidden
/// flag. The tree always has a root, created with the tree and never torn
/// down.
///
/// Handles are generational, so using a [`DoodadId`] after its doodad was
/// torn down panics instead of reaching whatever reuses the slot.
pub struct DoodadTree<C> {
    layout: LayoutGraph,

    // -- Per-doodad --
    node: Vec<NodeId>,
    parent: Vec<u32>,
    children: Vec<Vec<u32>>,
    next_ordinal: Vec<u32>,
    depth: Vec<DepthKey>,
    hidden: Vec<bool>,
    reactions: Vec<ReactionSet<C>>,

    // -- Allocation --
    generation: Vec<u32>,
    alive: Vec<bool>,
    free_list: Vec<u32>,
    len: u32,

    root: DoodadId,
}

impl<C> fmt::Debug for DoodadTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoodadTree")
            .field("root", &self.root)
            .field("len", &self.len())
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl<C> Default for DoodadTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> DoodadTree<C> {
    /// Creates a tree whose root has a zeroed layout node.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root_rect(Rect::ZERO)
    }

    /// Creates a tree whose root layout node starts at `rect`.
    #[must_use]
    pub fn with_root_rect(rect: Rect) -> Self {
        let mut layout = LayoutGraph::new();
        let node = layout.create_node_at(rect);
        let mut tree = Self {
            layout,
            node: Vec::new(),
            parent: Vec::new(),
            children: Vec::new(),
            next_ordinal: Vec::new(),
            depth: Vec::new(),
            hidden: Vec::new(),
            reactions: Vec::new(),
            generation: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            root: DoodadId {
                idx: 0,
                generation: 0,
            },
        };
        tree.root = tree.alloc(node, INVALID, DepthKey::root(), false);
        tree
    }

    /// The root doodad.
    #[must_use]
    pub fn root(&self) -> DoodadId {
        self.root
    }

    /// The shared layout graph.
    #[must_use]
    pub fn layout(&self) -> &LayoutGraph {
        &self.layout
    }

    /// The shared layout graph, mutably.
    pub fn layout_mut(&mut self) -> &mut LayoutGraph {
        &mut self.layout
    }

    /// Returns whether the given handle refers to a live doodad.
    #[must_use]
    pub fn is_alive(&self, id: DoodadId) -> bool {
        (id.idx as usize) < self.alive.len()
            && self.generation[id.idx as usize] == id.generation
            && self.alive[id.idx as usize]
    }

    /// Number of live doodads, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Always `false`: the root is never torn down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    // -- Per-doodad accessors --

    /// The layout node of `id`.
    #[must_use]
    pub fn node(&self, id: DoodadId) -> NodeId {
        self.validate(id);
        self.node[id.idx as usize]
    }

    /// The parent of `id`, or `None` for the root.
    #[must_use]
    pub fn parent(&self, id: DoodadId) -> Option<DoodadId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// The children of `id`, in insertion order.
    pub fn children(&self, id: DoodadId) -> impl Iterator<Item = DoodadId> + '_ {
        self.validate(id);
        self.children[id.idx as usize]
            .iter()
            .map(|&idx| self.handle(idx))
    }

    /// `id` and all of its descendants, parents before children.
    #[must_use]
    pub fn descendants(&self, id: DoodadId) -> Vec<DoodadId> {
        self.validate(id);
        self.preorder(id.idx)
            .into_iter()
            .map(|idx| self.handle(idx))
            .collect()
    }

    /// The depth key reactions of `id` register at.
    #[must_use]
    pub fn depth(&self, id: DoodadId) -> &DepthKey {
        self.validate(id);
        &self.depth[id.idx as usize]
    }

    /// Whether `id` is shown.
    #[must_use]
    pub fn is_visible(&self, id: DoodadId) -> bool {
        self.validate(id);
        !self.hidden[id.idx as usize]
    }

    /// The reactions of `id`.
    #[must_use]
    pub fn reactions(&self, id: DoodadId) -> &ReactionSet<C> {
        self.validate(id);
        &self.reactions[id.idx as usize]
    }

    /// The rectangle of `id`, recomputing its layout node if dirty.
    pub fn frame(&mut self, id: DoodadId) -> Rect {
        self.validate(id);
        let node = self.node[id.idx as usize];
        self.layout.rect(node)
    }

    // -- Structure --

    /// Adds a child under `parent`.
    ///
    /// Without a `layout` node the child gets a fresh one that copies the
    /// parent's rectangle. A supplied node is taken over by the tree and
    /// destroyed when the child is torn down. Either way the parent's node
    /// gains the child's node as a dependent, unless the edge already
    /// exists.
    ///
    /// The child's depth key is the parent's key with the child's 1-based
    /// ordinal appended. Ordinals are never reused under one parent. The
    /// child starts hidden if the parent is hidden.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if the parent edge would close a
    /// dependency cycle.
    pub fn add_child(&mut self, parent: DoodadId, layout: Option<NodeId>) -> DoodadId {
        self.validate(parent);
        let p = parent.idx as usize;
        let parent_node = self.node[p];
        let node = match layout {
            Some(node) => {
                self.layout.validate(node);
                node
            }
            None => self.layout.computed(move |cx| {
                cx.copy(parent_node);
            }),
        };
        if !self.layout.has_dependent(parent_node, node) {
            self.layout.add_dependent(parent_node, node);
        }

        self.next_ordinal[p] += 1;
        let depth = self.depth[p].child(self.next_ordinal[p]);
        let hidden = self.hidden[p];
        let id = self.alloc(node, parent.idx, depth, hidden);
        self.children[p].push(id.idx);
        id
    }

    /// Adds a reaction to `id`, bound to its layout node.
    ///
    /// A reaction added to a hidden doodad starts disabled. It is registered
    /// on the next [`setup`](Self::setup).
    pub fn add_reaction(&mut self, id: DoodadId, reaction: Reaction<C>) {
        self.validate(id);
        let slot = id.idx as usize;
        if self.hidden[slot] {
            reaction.set_enabled(false);
        }
        self.reactions[slot].add(reaction);
    }

    /// Sizes `id` to the bounding box of its current children.
    ///
    /// Appends a step that copies the width and height of the box around
    /// the children `id` has now; the position is left to earlier steps. A
    /// doodad without children is left untouched.
    pub fn shrink_to_fit_contents(&mut self, id: DoodadId) {
        self.validate(id);
        let slot = id.idx as usize;
        if self.children[slot].is_empty() {
            return;
        }
        let nodes: Vec<NodeId> = self.children[slot]
            .iter()
            .map(|&c| self.node[c as usize])
            .collect();
        self.layout.set_computation(self.node[slot], move |cx| {
            let b = cx.bounding_of(&nodes);
            cx.set_dimensions(Size::new(b.x1 - b.x0, b.y1 - b.y0));
        });
    }

    // -- Visibility --

    /// Hides `id` and its whole subtree, disabling their reactions.
    pub fn hide(&mut self, id: DoodadId) {
        self.set_hidden(id, true);
    }

    /// Shows `id` and its whole subtree, enabling their reactions.
    pub fn show(&mut self, id: DoodadId) {
        self.set_hidden(id, false);
    }

    fn set_hidden(&mut self, id: DoodadId, hidden: bool) {
        self.validate(id);
        for idx in self.preorder(id.idx) {
            let slot = idx as usize;
            self.hidden[slot] = hidden;
            if hidden {
                self.reactions[slot].disable_all();
            } else {
                self.reactions[slot].enable_all();
            }
        }
    }

    // -- Lifecycle --

    /// Recomputes the layout of `id` and everything downstream of it, then
    /// registers its reactions at its depth key.
    pub fn setup(&mut self, id: DoodadId, dispatcher: &EventDispatcher<C>) {
        self.validate(id);
        let slot = id.idx as usize;
        self.layout.force_recalculate(self.node[slot]);
        self.reactions[slot].register_all(dispatcher, &self.depth[slot]);
    }

    /// [`setup`](Self::setup) for `id` and every descendant.
    ///
    /// Layout is pushed once from `id`; registration follows tree order.
    pub fn setup_subtree(&mut self, id: DoodadId, dispatcher: &EventDispatcher<C>) {
        self.setup_subtree_traced(id, dispatcher, &mut Tracer::none());
    }

    /// [`setup_subtree`](Self::setup_subtree), reporting the layout push to
    /// `tracer`.
    pub fn setup_subtree_traced(
        &mut self,
        id: DoodadId,
        dispatcher: &EventDispatcher<C>,
        tracer: &mut Tracer<'_>,
    ) {
        self.validate(id);
        self.layout
            .force_recalculate_traced(self.node[id.idx as usize], tracer);
        for idx in self.preorder(id.idx) {
            let slot = idx as usize;
            self.reactions[slot].register_all(dispatcher, &self.depth[slot]);
        }
    }

    /// Tears down `id` and its subtree.
    ///
    /// Descendants go first. Each doodad's reactions are unregistered, its
    /// layout node is destroyed (which detaches it from its parent's
    /// dependents) and its slot is freed.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or names the root.
    pub fn teardown(&mut self, id: DoodadId, dispatcher: &EventDispatcher<C>) {
        self.validate(id);
        assert!(id != self.root, "cannot tear down the root doodad");

        let parent = self.parent[id.idx as usize];
        self.children[parent as usize].retain(|&c| c != id.idx);

        let mut order = self.preorder(id.idx);
        log::debug!("tearing down {id} with {} descendants", order.len() - 1);
        order.reverse();
        for idx in order {
            self.release(idx, dispatcher);
        }
    }

    /// Tears down every child of `id`.
    pub fn clear_children(&mut self, id: DoodadId, dispatcher: &EventDispatcher<C>) {
        self.validate(id);
        let children: Vec<DoodadId> = self.children(id).collect();
        for child in children {
            self.teardown(child, dispatcher);
        }
    }

    /// Rebuilds `id` in place.
    ///
    /// The children of `id` are torn down, its own reactions unregistered
    /// and removed, and its layout node's dependent edges dropped. Its
    /// computation steps are kept. `build` then repopulates the doodad,
    /// its own reactions included, and the subtree is set up again.
    ///
    /// Safe to call from one of the doodad's own reactions while the
    /// dispatcher is routing an event.
    pub fn re_setup(
        &mut self,
        id: DoodadId,
        dispatcher: &EventDispatcher<C>,
        build: impl FnOnce(&mut Self, DoodadId),
    ) {
        self.clear_children(id, dispatcher);
        let slot = id.idx as usize;
        self.reactions[slot].unregister_all(dispatcher);
        self.layout.clear_dependents(self.node[slot]);
        build(self, id);
        self.setup_subtree(id, dispatcher);
    }

    // -- Drawing --

    /// Hands every visible doodad's rectangle to its drawables.
    ///
    /// Doodads are visited from the root in tree order, so parents draw
    /// beneath their children. Hidden subtrees are skipped. A doodad may
    /// appear in `drawables` more than once; its entries draw in slice
    /// order.
    pub fn paint<S: ?Sized>(&mut self, surface: &mut S, drawables: &[(DoodadId, &dyn Drawable<S>)]) {
        let mut stack = vec![self.root.idx];
        while let Some(idx) = stack.pop() {
            let slot = idx as usize;
            if self.hidden[slot] {
                continue;
            }
            let id = self.handle(idx);
            let mut frame = None;
            for (_, drawable) in drawables.iter().filter(|(d, _)| *d == id) {
                let rect = *frame.get_or_insert_with(|| self.layout.rect(self.node[slot]));
                drawable.draw(rect, surface);
            }
            stack.extend(self.children[slot].iter().rev());
        }
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: DoodadId) {
        assert!(
            self.is_alive(id),
            "stale DoodadId: {id:?} (current gen: {})",
            if (id.idx as usize) < self.generation.len() {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn handle(&self, idx: u32) -> DoodadId {
        DoodadId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn alloc(&mut self, node: NodeId, parent: u32, depth: DepthKey, hidden: bool) -> DoodadId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let slot = idx as usize;
            self.node[slot] = node;
            self.parent[slot] = parent;
            self.depth[slot] = depth;
            self.hidden[slot] = hidden;
            self.reactions[slot] = ReactionSet::owned_by(node);
            self.alive[slot] = true;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.node.push(node);
            self.parent.push(parent);
            self.children.push(Vec::new());
            self.next_ordinal.push(0);
            self.depth.push(depth);
            self.hidden.push(hidden);
            self.reactions.push(ReactionSet::owned_by(node));
            self.generation.push(0);
            self.alive.push(true);
            idx
        };
        self.handle(idx)
    }

    fn release(&mut self, idx: u32, dispatcher: &EventDispatcher<C>) {
        let slot = idx as usize;
        self.reactions[slot].unregister_all(dispatcher);
        self.reactions[slot] = ReactionSet::new();
        let node = self.node[slot];
        if self.layout.is_alive(node) {
            self.layout.destroy_node(node);
        } else {
            log::debug!("layout node {node} of doodad slot {idx} was already destroyed");
        }
        self.parent[slot] = INVALID;
        self.children[slot].clear();
        self.next_ordinal[slot] = 0;
        self.depth[slot] = DepthKey::default();
        self.hidden[slot] = false;
        self.generation[slot] += 1;
        self.alive[slot] = false;
        self.free_list.push(idx);
    }

    /// `idx` and its descendants, parents first, siblings in insertion
    /// order.
    fn preorder(&self, idx: u32) -> Vec<u32> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(i) = stack.pop() {
            out.push(i);
            stack.extend(self.children[i as usize].iter().rev());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};

    use super::*;
    use crate::event::{EventKind, MouseButton, MouseDown, MouseUp};
    use crate::layout::Padding;

    type Log = Vec<&'static str>;

    fn logging(name: &'static str) -> Reaction<Log> {
        Reaction::always(move |_: &MouseDown, log: &mut Log, _| {
            log.push(name);
            Ok(())
        })
    }

    fn down() -> MouseDown {
        MouseDown {
            position: Point::ZERO,
            button: MouseButton::Primary,
        }
    }

    #[test]
    fn depth_keys_follow_tree_paths() {
        let mut tree = DoodadTree::<()>::new();
        let root = tree.root();
        let a = tree.add_child(root, None);
        let b = tree.add_child(root, None);
        let a1 = tree.add_child(a, None);

        assert_eq!(tree.depth(root), &DepthKey::root());
        assert_eq!(tree.depth(a), &DepthKey::from([0, 1]));
        assert_eq!(tree.depth(b), &DepthKey::from([0, 2]));
        assert_eq!(tree.depth(a1), &DepthKey::from([0, 1, 1]));
        assert!(tree.depth(a1) < tree.depth(b), "a's subtree sorts before b");
        assert_eq!(tree.parent(a1), Some(a));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.descendants(root), [root, a, a1, b]);
    }

    #[test]
    fn default_child_layout_follows_parent() {
        let mut tree = DoodadTree::<()>::with_root_rect(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = tree.root();
        let child = tree.add_child(root, None);
        let d = EventDispatcher::new();
        tree.setup_subtree(root, &d);
        assert_eq!(tree.frame(child), Rect::new(0.0, 0.0, 200.0, 100.0));

        let root_node = tree.node(root);
        tree.layout_mut().set_rect(root_node, Rect::new(10.0, 10.0, 50.0, 50.0));
        tree.layout_mut().mark_dirty(root_node);
        assert_eq!(tree.frame(child), Rect::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn supplied_layout_is_attached_to_parent() {
        let mut tree = DoodadTree::<()>::with_root_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let root = tree.root();
        let root_node = tree.node(root);
        let inset = tree.layout_mut().computed(move |cx| {
            cx.copy(root_node).inset(Padding::equal(10.0));
        });
        let child = tree.add_child(root, Some(inset));
        assert_eq!(tree.node(child), inset);
        assert!(tree.layout().has_dependent(root_node, inset));
        assert_eq!(tree.frame(child), Rect::new(10.0, 10.0, 90.0, 90.0));

        // An edge declared up front is not added twice.
        let pre = tree.layout_mut().create_node();
        tree.layout_mut().add_dependent(root_node, pre);
        tree.add_child(root, Some(pre));
        assert_eq!(tree.layout().dependents(root_node).count(), 2);
    }

    #[test]
    fn hide_and_show_cascade() {
        let mut tree = DoodadTree::<Log>::new();
        let root = tree.root();
        let a = tree.add_child(root, None);
        let b = tree.add_child(a, None);
        let r = logging("b");
        tree.add_reaction(b, r.clone());

        tree.hide(a);
        assert!(!tree.is_visible(a));
        assert!(!tree.is_visible(b));
        assert!(tree.is_visible(root));
        assert!(!r.is_enabled());

        let late = tree.add_child(a, None);
        assert!(!tree.is_visible(late), "children of hidden doodads start hidden");
        let late_reaction = logging("late");
        tree.add_reaction(late, late_reaction.clone());
        assert!(!late_reaction.is_enabled());

        tree.show(a);
        assert!(tree.is_visible(b));
        assert!(r.is_enabled());
        assert!(late_reaction.is_enabled());
    }

    #[test]
    fn setup_routes_topmost_first() {
        let mut tree = DoodadTree::<Log>::new();
        let root = tree.root();
        let panel = tree.add_child(root, None);
        let button = tree.add_child(panel, None);
        tree.add_reaction(root, logging("root"));
        tree.add_reaction(panel, logging("panel"));
        tree.add_reaction(button, logging("button"));

        let d = EventDispatcher::new();
        tree.setup_subtree(root, &d);
        assert_eq!(tree.reactions(button).owner(), Some(tree.node(button)));

        let mut log = Log::new();
        d.dispatch(down(), &mut log);
        assert_eq!(log, ["button", "panel", "root"]);

        tree.hide(panel);
        log.clear();
        d.dispatch(down(), &mut log);
        assert_eq!(log, ["root"]);
    }

    #[test]
    fn teardown_releases_subtree() {
        let mut tree = DoodadTree::<Log>::new();
        let root = tree.root();
        let a = tree.add_child(root, None);
        let b = tree.add_child(a, None);
        tree.add_reaction(a, logging("a"));
        tree.add_reaction(b, logging("b"));
        let d = EventDispatcher::new();
        tree.setup_subtree(root, &d);
        assert_eq!(d.reaction_count(EventKind::MouseDown), 2);

        let root_node = tree.node(root);
        tree.teardown(a, &d);
        assert_eq!(d.reaction_count(EventKind::MouseDown), 0);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.layout().len(), 1);
        assert_eq!(tree.children(root).count(), 0);
        assert_eq!(tree.layout().dependents(root_node).count(), 0);

        let c = tree.add_child(root, None);
        assert_eq!(c.index(), a.index(), "slot is reused");
        assert_ne!(c.generation(), a.generation());
        assert_eq!(tree.depth(c), &DepthKey::from([0, 2]));
    }

    #[test]
    #[should_panic(expected = "cannot tear down the root doodad")]
    fn root_cannot_be_torn_down() {
        let mut tree = DoodadTree::<()>::new();
        let d = EventDispatcher::new();
        let root = tree.root();
        tree.teardown(root, &d);
    }

    #[test]
    #[should_panic(expected = "stale DoodadId")]
    fn stale_handle_panics() {
        let mut tree = DoodadTree::<()>::new();
        let d = EventDispatcher::new();
        let root = tree.root();
        let a = tree.add_child(root, None);
        tree.teardown(a, &d);
        let _ = tree.node(a);
    }

    #[test]
    fn re_setup_rebuilds_children() {
        let mut tree = DoodadTree::<Log>::new();
        let root = tree.root();
        let old = tree.add_child(root, None);
        tree.add_reaction(root, logging("root"));
        tree.add_reaction(old, logging("old"));
        let d = EventDispatcher::new();
        tree.setup_subtree(root, &d);

        let mut rebuilt = None;
        tree.re_setup(root, &d, |tree, id| {
            tree.add_reaction(id, logging("root again"));
            let fresh = tree.add_child(id, None);
            tree.add_reaction(fresh, logging("fresh"));
            rebuilt = Some(fresh);
        });

        assert!(!tree.is_alive(old));
        let fresh = rebuilt.unwrap();
        assert_eq!(tree.children(root).collect::<Vec<_>>(), [fresh]);
        assert_eq!(tree.depth(fresh), &DepthKey::from([0, 2]));
        assert_eq!(tree.reactions(root).len(), 1, "old root reactions are dropped");

        let mut log = Log::new();
        d.dispatch(down(), &mut log);
        assert_eq!(log, ["fresh", "root again"]);
    }

    /// An app whose reactions can restructure the tree they live in.
    struct Counter {
        tree: DoodadTree<Self>,
        dispatcher: Rc<EventDispatcher<Self>>,
        clicks: u32,
        builds: u32,
    }

    fn build_counter(tree: &mut DoodadTree<Counter>, id: DoodadId) {
        let label = tree.add_child(id, None);
        tree.add_reaction(
            label,
            Reaction::always(|_: &MouseUp, app: &mut Counter, _| {
                app.clicks += 100;
                Ok(())
            }),
        );
        tree.add_reaction(
            id,
            Reaction::always(move |_: &MouseUp, app: &mut Counter, prop| {
                app.clicks += 1;
                app.builds += 1;
                app.tree.re_setup(id, &app.dispatcher, build_counter);
                prop.stop();
                Ok(())
            }),
        );
    }

    #[test]
    fn reaction_can_rebuild_its_own_doodad() {
        let dispatcher = Rc::new(EventDispatcher::new());
        let mut app = Counter {
            tree: DoodadTree::new(),
            dispatcher: Rc::clone(&dispatcher),
            clicks: 0,
            builds: 0,
        };
        let root = app.tree.root();
        let button = app.tree.add_child(root, None);
        build_counter(&mut app.tree, button);
        app.tree.setup_subtree(root, &dispatcher);
        let first_label = app.tree.children(button).next();

        let up = MouseUp {
            position: Point::ZERO,
            button: MouseButton::Primary,
        };
        for _ in 0..3 {
            // The label sits above the button and runs first.
            dispatcher.dispatch(up, &mut app);
        }

        assert_eq!(app.builds, 3);
        assert_eq!(app.clicks, 303, "each click reaches one label and one button");
        assert_eq!(app.tree.reactions(button).len(), 1);
        assert_eq!(dispatcher.reaction_count(EventKind::MouseUp), 2);
        assert_eq!(app.tree.children(button).count(), 1);
        assert!(first_label.is_some_and(|l| !app.tree.is_alive(l)));
    }

    #[test]
    fn shrink_wraps_children() {
        let mut tree = DoodadTree::<()>::with_root_rect(Rect::new(5.0, 5.0, 500.0, 500.0));
        let root = tree.root();
        let container = tree.add_child(root, None);

        let steps = tree.layout().step_count(tree.node(container));
        tree.shrink_to_fit_contents(container);
        assert_eq!(tree.layout().step_count(tree.node(container)), steps);

        let first = tree.layout_mut().create_node_at(Rect::new(20.0, 20.0, 60.0, 40.0));
        let second = tree.layout_mut().create_node_at(Rect::new(30.0, 50.0, 100.0, 70.0));
        tree.add_child(container, Some(first));
        tree.add_child(container, Some(second));
        tree.shrink_to_fit_contents(container);

        assert_eq!(tree.frame(container), Rect::new(5.0, 5.0, 85.0, 55.0));
    }

    struct Label(&'static str);

    impl Drawable<Vec<String>> for Label {
        fn draw(&self, frame: Rect, surface: &mut Vec<String>) {
            surface.push(alloc::format!("{} {}x{}", self.0, frame.width(), frame.height()));
        }
    }

    #[test]
    fn paint_walks_visible_doodads_in_tree_order() {
        let mut tree = DoodadTree::<()>::with_root_rect(Rect::new(0.0, 0.0, 40.0, 30.0));
        let root = tree.root();
        let a = tree.add_child(root, None);
        let b = tree.add_child(root, None);
        let b1 = tree.add_child(b, None);

        let (bg, fg, side, inner) = (Label("bg"), Label("fg"), Label("side"), Label("inner"));
        let drawables: [(DoodadId, &dyn Drawable<Vec<String>>); 4] =
            [(b1, &inner), (a, &fg), (root, &bg), (b, &side)];

        let mut surface = Vec::new();
        tree.paint(&mut surface, &drawables);
        assert_eq!(surface, ["bg 40x30", "fg 40x30", "side 40x30", "inner 40x30"]);

        tree.hide(b);
        surface.clear();
        tree.paint(&mut surface, &drawables);
        assert_eq!(surface, ["bg 40x30", "fg 40x30"]);
    }
}
