// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layout node storage with lazy recompute and eager push.

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size};
use understory_dirty::{CycleHandling, DirtyTracker};

use super::computation::Computation;
use super::error::LayoutError;
use super::id::NodeId;
use crate::dirty;
use crate::trace::{LayoutPushEvent, Tracer};

/// A single computation step.
///
/// Steps run in registration order each time their node recomputes. They
/// mutate their own node through the [`Computation`] cursor and may read
/// other nodes through it.
pub type Step = Box<dyn Fn(&mut Computation<'_>)>;

/// Struct-of-arrays storage for every layout node.
///
/// Nodes are addressed by [`NodeId`] handles. Each node occupies a slot in
/// parallel arrays; destroyed nodes are recycled through a free list and a
/// per-slot generation counter makes stale handles fail validation.
///
/// Geometry is recomputed lazily: the accessors ([`x`](Self::x),
/// [`rect`](Self::rect), ...) take `&mut self` because a read of a dirty
/// node with a non-empty step list reruns its steps first.
pub struct LayoutGraph {
    // -- Geometry --
    pub(crate) origin: Vec<Point>,
    pub(crate) size: Vec<Size>,

    // -- Computation --
    steps: Vec<Vec<Step>>,
    dirty: Vec<bool>,
    recompute_count: Vec<u64>,

    // -- Dependency edges (owner -> dependent) --
    dependents: Vec<Vec<u32>>,
    owners: Vec<Vec<u32>>,
    edges: BTreeSet<(u32, u32)>,
    tracker: DirtyTracker<u32>,

    // -- Allocation --
    generation: Vec<u32>,
    alive: Vec<bool>,
    free_list: Vec<u32>,
    len: u32,

    // -- Traversal scratch --
    visit_stamp: Vec<u32>,
    stamp: u32,
}

impl fmt::Debug for LayoutGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutGraph")
            .field("len", &self.len)
            .field("live", &(self.len as usize - self.free_list.len()))
            .field("edges", &self.edges.len())
            .finish_non_exhaustive()
    }
}

impl Default for LayoutGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Vec::new(),
            size: Vec::new(),
            steps: Vec::new(),
            dirty: Vec::new(),
            recompute_count: Vec::new(),
            dependents: Vec::new(),
            owners: Vec::new(),
            edges: BTreeSet::new(),
            tracker: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            generation: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            visit_stamp: Vec::new(),
            stamp: 0,
        }
    }

    // -- Allocation API --

    /// Creates a zeroed node with no steps and no dependents.
    pub fn create_node(&mut self) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Slot fields were cleared on destroy; the generation already moved.
            self.alive[idx as usize] = true;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.origin.push(Point::ZERO);
            self.size.push(Size::ZERO);
            self.steps.push(Vec::new());
            self.dirty.push(false);
            self.recompute_count.push(0);
            self.dependents.push(Vec::new());
            self.owners.push(Vec::new());
            self.generation.push(0);
            self.alive.push(true);
            self.visit_stamp.push(0);
            idx
        };

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Creates a node whose stored fields start at `rect`.
    pub fn create_node_at(&mut self, rect: Rect) -> NodeId {
        let id = self.create_node();
        self.set_rect(id, rect);
        id
    }

    /// Creates a zeroed node with a single computation step.
    ///
    /// The node starts dirty, so the first read runs `step`.
    pub fn computed(&mut self, step: impl Fn(&mut Computation<'_>) + 'static) -> NodeId {
        let id = self.create_node();
        self.set_computation(id, step);
        id
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// The node is detached from every owner's dependent list and its own
    /// outgoing edges are dropped, so the graph never holds an edge to a
    /// freed slot.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;

        for owner in core::mem::take(&mut self.owners[idx as usize]) {
            self.dependents[owner as usize].retain(|&d| d != idx);
            self.edges.remove(&(owner, idx));
        }
        let orphaned = core::mem::take(&mut self.dependents[idx as usize]);
        if !orphaned.is_empty() {
            log::debug!(
                "destroying layout node {id} with {} dependents still attached",
                orphaned.len()
            );
        }
        for dependent in orphaned {
            self.owners[dependent as usize].retain(|&o| o != idx);
            self.edges.remove(&(idx, dependent));
        }
        self.tracker.remove_key(idx);

        self.clear_slot(idx);
        self.generation[idx as usize] += 1;
        self.alive[idx as usize] = false;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && self.alive[id.idx as usize]
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Whether there are no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every live node in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.len)
            .filter(|&idx| self.alive[idx as usize])
            .map(|idx| self.handle(idx))
    }

    // -- Computation API --

    /// Appends a computation step to `id` and marks it and every transitive
    /// dependent dirty.
    ///
    /// The step is not run here; it runs on the next read of a dirty node or
    /// on [`force_recalculate`](Self::force_recalculate).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_computation(&mut self, id: NodeId, step: impl Fn(&mut Computation<'_>) + 'static) {
        self.validate(id);
        self.steps[id.idx as usize].push(Box::new(step));
        self.mark_dirty(id);
    }

    /// Number of computation steps registered on `id`.
    #[must_use]
    pub fn step_count(&self, id: NodeId) -> usize {
        self.validate(id);
        self.steps[id.idx as usize].len()
    }

    /// Whether `id` is flagged for recompute.
    ///
    /// A node without steps may still report `true`; the flag has no effect
    /// on it.
    #[must_use]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.validate(id);
        self.dirty[id.idx as usize]
    }

    /// How many times the steps of `id` have run.
    #[must_use]
    pub fn recompute_count(&self, id: NodeId) -> u64 {
        self.validate(id);
        self.recompute_count[id.idx as usize]
    }

    /// Tags `id` and every node reachable through dependent edges dirty.
    ///
    /// No computation happens.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn mark_dirty(&mut self, id: NodeId) {
        self.validate(id);
        let stamp = self.begin_visit();
        let mut worklist = vec![id.idx];
        while let Some(idx) = worklist.pop() {
            let slot = idx as usize;
            if self.visit_stamp[slot] == stamp {
                continue;
            }
            self.visit_stamp[slot] = stamp;
            self.dirty[slot] = true;
            worklist.extend_from_slice(&self.dependents[slot]);
        }
    }

    /// Recomputes `id` now and pushes fresh geometry through every
    /// transitive dependent.
    ///
    /// See [`force_recalculate_traced`](Self::force_recalculate_traced).
    pub fn force_recalculate(&mut self, id: NodeId) {
        self.force_recalculate_traced(id, &mut Tracer::none());
    }

    /// Recomputes `id` now and pushes fresh geometry through every
    /// transitive dependent, reporting the push to `tracer`.
    ///
    /// The whole downstream subgraph is tagged dirty before anything runs.
    /// The push then walks it depth-first in preorder, following each
    /// node's dependents in registration order, and recomputes every
    /// reached node exactly once on visit. A dependent that reads a node
    /// the walk has not reached yet pulls it lazily, and since that node's
    /// owners were tagged too, the pull sees fresh upstream values.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn force_recalculate_traced(&mut self, id: NodeId, tracer: &mut Tracer<'_>) {
        self.mark_dirty(id);

        let stamp = self.begin_visit();
        let mut visited = 0_u32;
        let mut recomputed = 0_u32;
        let mut worklist = vec![id.idx];
        while let Some(idx) = worklist.pop() {
            let slot = idx as usize;
            if self.visit_stamp[slot] == stamp {
                continue;
            }
            self.visit_stamp[slot] = stamp;
            visited += 1;

            // A lazy pull earlier in this push may have cleaned the node
            // while one of its owners was still mid-recompute.
            self.dirty[slot] = true;
            if self.recompute_if_needed(idx) {
                recomputed += 1;
            }
            worklist.extend(self.dependents[slot].iter().rev().copied());
        }

        tracer.layout_push(&LayoutPushEvent {
            root: id,
            visited,
            recomputed,
        });
    }

    // -- Dependency API --

    /// Declares that `dependent`'s geometry is derived from `owner`'s.
    ///
    /// When `owner` is marked dirty or force-recalculated, `dependent` is
    /// reached as well. Dependents are kept in insertion order.
    ///
    /// A node naming itself is logged and ignored.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if the edge already exists, if the
    /// reverse edge exists, or if the edge would close a longer cycle.
    pub fn add_dependent(&mut self, owner: NodeId, dependent: NodeId) {
        self.validate(owner);
        self.validate(dependent);
        if owner == dependent {
            log::warn!("layout node {owner} cannot be its own dependent; ignoring");
            return;
        }
        let o = owner.idx;
        let d = dependent.idx;
        assert!(
            !self.edges.contains(&(o, d)),
            "duplicate dependency: {dependent:?} is already a dependent of {owner:?}"
        );
        assert!(
            !self.edges.contains(&(d, o)),
            "reciprocal dependency: {owner:?} is already a dependent of {dependent:?}"
        );
        // In the tracker the dependent depends on the owner.
        let added = self.tracker.add_dependency(d, o, dirty::LAYOUT);
        assert!(
            added.is_ok(),
            "dependency cycle: {dependent:?} already reaches {owner:?}"
        );

        self.dependents[o as usize].push(d);
        self.owners[d as usize].push(o);
        self.edges.insert((o, d));
    }

    /// Removes a previously declared edge.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DependentNotFound`] if `dependent` is not a
    /// dependent of `owner`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn remove_dependent(&mut self, owner: NodeId, dependent: NodeId) -> Result<(), LayoutError> {
        self.validate(owner);
        self.validate(dependent);
        let o = owner.idx;
        let d = dependent.idx;
        if !self.edges.remove(&(o, d)) {
            return Err(LayoutError::DependentNotFound { owner, dependent });
        }
        self.unlink(o, d);
        Ok(())
    }

    /// Whether `dependent` is a direct dependent of `owner`.
    #[must_use]
    pub fn has_dependent(&self, owner: NodeId, dependent: NodeId) -> bool {
        self.validate(owner);
        self.validate(dependent);
        self.edges.contains(&(owner.idx, dependent.idx))
    }

    /// Direct dependents of `owner`, in insertion order.
    pub fn dependents(&self, owner: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.validate(owner);
        self.dependents[owner.idx as usize]
            .iter()
            .map(|&idx| self.handle(idx))
    }

    /// Nodes that list `dependent` among their dependents, in the order the
    /// edges were added.
    pub fn owners(&self, dependent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.validate(dependent);
        self.owners[dependent.idx as usize]
            .iter()
            .map(|&idx| self.handle(idx))
    }

    /// Drops every outgoing edge of `owner`.
    pub fn clear_dependents(&mut self, owner: NodeId) {
        self.validate(owner);
        let o = owner.idx;
        for d in core::mem::take(&mut self.dependents[o as usize]) {
            self.edges.remove(&(o, d));
            self.owners[d as usize].retain(|&x| x != o);
            self.tracker.remove_dependency(d, o, dirty::LAYOUT);
        }
    }

    /// Zeroes the fields of `id` and drops its steps and dependents.
    ///
    /// Edges where `id` is the dependent are kept.
    pub fn reset(&mut self, id: NodeId) {
        self.clear_dependents(id);
        let slot = id.idx as usize;
        self.origin[slot] = Point::ZERO;
        self.size[slot] = Size::ZERO;
        self.steps[slot].clear();
        self.dirty[slot] = false;
    }

    // -- Geometry accessors (recompute on read) --

    /// Left edge of `id`.
    pub fn x(&mut self, id: NodeId) -> f64 {
        self.origin(id).x
    }

    /// Top edge of `id`.
    pub fn y(&mut self, id: NodeId) -> f64 {
        self.origin(id).y
    }

    /// Width of `id`.
    pub fn width(&mut self, id: NodeId) -> f64 {
        self.size(id).width
    }

    /// Height of `id`.
    pub fn height(&mut self, id: NodeId) -> f64 {
        self.size(id).height
    }

    /// Top-left corner of `id`.
    pub fn origin(&mut self, id: NodeId) -> Point {
        self.refresh(id);
        self.origin[id.idx as usize]
    }

    /// Left and top edges of `id` as a pair.
    pub fn xy(&mut self, id: NodeId) -> (f64, f64) {
        let p = self.origin(id);
        (p.x, p.y)
    }

    /// Size of `id`.
    pub fn size(&mut self, id: NodeId) -> Size {
        self.refresh(id);
        self.size[id.idx as usize]
    }

    /// Rectangle of `id`.
    ///
    /// Negative sizes are preserved rather than normalized.
    pub fn rect(&mut self, id: NodeId) -> Rect {
        self.refresh(id);
        self.stored_rect_at(id.idx)
    }

    /// Rectangle of `id` as currently stored, without recomputing.
    #[must_use]
    pub fn cached_rect(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.stored_rect_at(id.idx)
    }

    /// Whether `id` has zero width and zero height.
    pub fn is_degenerate(&mut self, id: NodeId) -> bool {
        let size = self.size(id);
        size.width == 0.0 && size.height == 0.0
    }

    /// Smallest rectangle enclosing every node in `ids`.
    ///
    /// Each node is recomputed on read. An empty slice yields
    /// [`Rect::ZERO`].
    pub fn bounding(&mut self, ids: &[NodeId]) -> Rect {
        let mut iter = ids.iter();
        let Some(&first) = iter.next() else {
            return Rect::ZERO;
        };
        let mut bounds = self.rect(first);
        for &id in iter {
            let r = self.rect(id);
            bounds.x0 = bounds.x0.min(r.x0);
            bounds.y0 = bounds.y0.min(r.y0);
            bounds.x1 = bounds.x1.max(r.x1);
            bounds.y1 = bounds.y1.max(r.y1);
        }
        bounds
    }

    /// Whether `inner` lies entirely within `outer` (edges may touch).
    pub fn contains(&mut self, outer: NodeId, inner: NodeId) -> bool {
        let o = self.rect(outer);
        let i = self.rect(inner);
        i.x0 >= o.x0 && i.y0 >= o.y0 && i.x1 <= o.x1 && i.y1 <= o.y1
    }

    // -- Direct mutators (no recompute, no propagation) --

    /// Sets the stored left edge.
    pub fn set_x(&mut self, id: NodeId, x: f64) {
        self.validate(id);
        self.origin[id.idx as usize].x = x;
    }

    /// Sets the stored top edge.
    pub fn set_y(&mut self, id: NodeId, y: f64) {
        self.validate(id);
        self.origin[id.idx as usize].y = y;
    }

    /// Sets the stored width.
    pub fn set_width(&mut self, id: NodeId, width: f64) {
        self.validate(id);
        self.size[id.idx as usize].width = width;
    }

    /// Sets the stored height.
    pub fn set_height(&mut self, id: NodeId, height: f64) {
        self.validate(id);
        self.size[id.idx as usize].height = height;
    }

    /// Sets the stored origin.
    pub fn set_origin(&mut self, id: NodeId, origin: Point) {
        self.validate(id);
        self.origin[id.idx as usize] = origin;
    }

    /// Sets the stored size.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        self.validate(id);
        self.size[id.idx as usize] = size;
    }

    /// Sets the stored origin and size from `rect`.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        self.validate(id);
        self.origin[id.idx as usize] = rect.origin();
        self.size[id.idx as usize] = Size::new(rect.x1 - rect.x0, rect.y1 - rect.y0);
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            self.is_alive(id),
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn stored_rect_at(&self, idx: u32) -> Rect {
        let origin = self.origin[idx as usize];
        let size = self.size[idx as usize];
        Rect::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    fn refresh(&mut self, id: NodeId) {
        self.validate(id);
        self.recompute_if_needed(id.idx);
    }

    /// Reruns the steps at `idx` if it is dirty and has any.
    ///
    /// The node is marked clean and zeroed before its steps run, so a read
    /// of itself from inside a step returns the fields written so far.
    /// Returns whether the steps ran.
    fn recompute_if_needed(&mut self, idx: u32) -> bool {
        let slot = idx as usize;
        if !self.dirty[slot] || self.steps[slot].is_empty() {
            return false;
        }
        self.dirty[slot] = false;
        self.recompute_count[slot] += 1;
        self.origin[slot] = Point::ZERO;
        self.size[slot] = Size::ZERO;

        let steps = core::mem::take(&mut self.steps[slot]);
        let node = self.handle(idx);
        {
            let mut cx = Computation::new(self, node);
            for step in &steps {
                step(&mut cx);
            }
        }
        self.steps[slot] = steps;
        true
    }

    fn unlink(&mut self, o: u32, d: u32) {
        self.dependents[o as usize].retain(|&x| x != d);
        self.owners[d as usize].retain(|&x| x != o);
        self.tracker.remove_dependency(d, o, dirty::LAYOUT);
    }

    fn clear_slot(&mut self, idx: u32) {
        let slot = idx as usize;
        self.origin[slot] = Point::ZERO;
        self.size[slot] = Size::ZERO;
        self.steps[slot].clear();
        self.dirty[slot] = false;
        self.recompute_count[slot] = 0;
    }

    fn begin_visit(&mut self) -> u32 {
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.visit_stamp.fill(0);
            self.stamp = 1;
        }
        self.stamp
    }
}
