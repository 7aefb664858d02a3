// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node batches of reactions.

use alloc::vec::Vec;

use super::depth::DepthKey;
use super::dispatcher::{EventDispatcher, Registration};
use super::reaction::Reaction;
use crate::layout::NodeId;

/// The reactions that belong to one node, managed together.
///
/// A set remembers the registrations it made so that
/// [`unregister_all`](Self::unregister_all) can undo exactly those.
/// Enabling and disabling act on the shared reaction state, so they take
/// effect in the dispatcher without re-registering.
///
/// Unregistering also empties the set: a doodad that is rebuilt adds its
/// reactions again.
pub struct ReactionSet<C> {
    reactions: Vec<Reaction<C>>,
    registrations: Vec<Registration>,
    owner: Option<NodeId>,
}

impl<C> core::fmt::Debug for ReactionSet<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReactionSet")
            .field("owner", &self.owner)
            .field("reactions", &self.reactions)
            .field("registrations", &self.registrations)
            .finish()
    }
}

impl<C> Default for ReactionSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ReactionSet<C> {
    /// An empty, unowned set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reactions: Vec::new(),
            registrations: Vec::new(),
            owner: None,
        }
    }

    /// An empty set whose reactions will be bound to `owner`.
    #[must_use]
    pub fn owned_by(owner: NodeId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::new()
        }
    }

    /// Adds a reaction and binds it to this set's owner.
    ///
    /// A set that is already registered does not register the newcomer;
    /// it joins on the next [`register_all`](Self::register_all).
    pub fn add(&mut self, reaction: Reaction<C>) -> &mut Self {
        reaction.set_owner(self.owner);
        self.reactions.push(reaction);
        self
    }

    /// Enables every reaction in the set.
    pub fn enable_all(&self) {
        for r in &self.reactions {
            r.set_enabled(true);
        }
    }

    /// Disables every reaction in the set.
    pub fn disable_all(&self) {
        for r in &self.reactions {
            r.set_enabled(false);
        }
    }

    /// Registers every reaction at `depth`.
    ///
    /// Registrations from a previous call are dropped first, so a set is
    /// never registered twice.
    pub fn register_all(&mut self, dispatcher: &EventDispatcher<C>, depth: &DepthKey) {
        self.release(dispatcher);
        self.registrations.reserve(self.reactions.len());
        for r in &self.reactions {
            let reg = dispatcher.register(r.clone(), depth.clone());
            self.registrations.push(reg);
        }
    }

    /// Removes every registration this set made and empties the set.
    /// Calling it again is a no-op.
    pub fn unregister_all(&mut self, dispatcher: &EventDispatcher<C>) {
        self.release(dispatcher);
        self.reactions.clear();
    }

    fn release(&mut self, dispatcher: &EventDispatcher<C>) {
        for reg in self.registrations.drain(..) {
            if let Err(err) = dispatcher.unregister(reg) {
                log::debug!("reaction set cleanup: {err}");
            }
        }
    }

    /// Whether the set currently holds registrations.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        !self.registrations.is_empty()
    }

    /// The owning node, if any.
    #[must_use]
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// Rebinds the set and every reaction in it.
    pub fn set_owner(&mut self, owner: Option<NodeId>) {
        self.owner = owner;
        for r in &self.reactions {
            r.set_owner(owner);
        }
    }

    /// Number of reactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    /// Whether the set has no reactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// The reactions, in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Reaction<C>> + '_ {
        self.reactions.iter()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;
    use crate::event::{EventKind, MouseButton, MouseDown, MouseUp};
    use crate::layout::LayoutGraph;

    fn counting() -> Reaction<u32> {
        Reaction::always(|_: &MouseDown, n: &mut u32, _| {
            *n += 1;
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
    fn register_and_unregister_all() {
        let d = EventDispatcher::new();
        let mut set = ReactionSet::new();
        set.add(counting()).add(counting());
        set.add(Reaction::always(|_: &MouseUp, _: &mut u32, _| Ok(())));

        set.register_all(&d, &DepthKey::root());
        assert!(set.is_registered());
        assert_eq!(d.reaction_count(EventKind::MouseDown), 2);
        assert_eq!(d.reaction_count(EventKind::MouseUp), 1);

        set.unregister_all(&d);
        set.unregister_all(&d);
        assert!(!set.is_registered());
        assert_eq!(d.reaction_count(EventKind::MouseDown), 0);
        assert!(set.is_empty(), "unregistering clears the set");

        set.register_all(&d, &DepthKey::root());
        assert_eq!(d.reaction_count(EventKind::MouseDown), 0);
    }

    #[test]
    fn re_registering_does_not_duplicate() {
        let d = EventDispatcher::new();
        let mut set = ReactionSet::new();
        set.add(counting());
        set.register_all(&d, &DepthKey::root());
        set.register_all(&d, &DepthKey::from([0, 4]));
        assert_eq!(d.reaction_count(EventKind::MouseDown), 1);
        let depths: Vec<_> = d.reactions(EventKind::MouseDown).into_iter().map(|(k, _)| k).collect();
        assert_eq!(depths, [DepthKey::from([0, 4])]);
    }

    #[test]
    fn disable_all_silences_registered_reactions() {
        let d = EventDispatcher::new();
        let mut set = ReactionSet::new();
        set.add(counting());
        set.register_all(&d, &DepthKey::root());

        let mut n = 0;
        d.dispatch(down(), &mut n);
        set.disable_all();
        d.dispatch(down(), &mut n);
        set.enable_all();
        d.dispatch(down(), &mut n);
        assert_eq!(n, 2);
    }

    #[test]
    fn owner_is_bound_to_members() {
        let mut graph = LayoutGraph::new();
        let a = graph.create_node();
        let b = graph.create_node();

        let mut set = ReactionSet::owned_by(a);
        let r = counting();
        set.add(r.clone());
        assert_eq!(r.owner(), Some(a));
        set.set_owner(Some(b));
        assert_eq!(r.owner(), Some(b));
        assert_eq!(set.owner(), Some(b));
    }
}
