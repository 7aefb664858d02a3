// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reactions: a condition and a callback bound to one event kind.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, RefCell};
use core::fmt;

use super::types::{Event, EventData, EventKind};
use crate::layout::NodeId;

/// The stop flag shared by every reaction that sees one occurrence.
///
/// Once stopped, no further reaction runs for the occurrence. There is no
/// way to clear the flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Propagation {
    stopped: bool,
}

impl Propagation {
    /// Halts delivery to reactions further down the list.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Whether a reaction has stopped propagation.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Failure reported by a reaction callback.
///
/// The dispatcher logs it, forwards it to the trace sink and carries on with
/// the next reaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionError {
    message: String,
}

impl ReactionError {
    /// Creates an error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ReactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl core::error::Error for ReactionError {}

/// Result type returned by reaction callbacks.
pub type ReactionResult = Result<(), ReactionError>;

type Condition<C> = Box<dyn Fn(&EventData, &mut C) -> bool>;
type Callback<C> = Box<dyn FnMut(&EventData, &mut C, &mut Propagation) -> ReactionResult>;

struct Inner<C> {
    kind: EventKind,
    enabled: Cell<bool>,
    owner: Cell<Option<NodeId>>,
    condition: Condition<C>,
    callback: RefCell<Callback<C>>,
}

/// A condition and a callback bound to one [`EventKind`].
///
/// `C` is the application context handed to both closures on every
/// dispatch. `Reaction` is a shared handle: clones refer to the same
/// reaction, so a [`ReactionSet`](super::ReactionSet) can enable or disable
/// a reaction that a dispatcher also holds.
///
/// New reactions start enabled and unowned.
pub struct Reaction<C> {
    inner: Rc<Inner<C>>,
}

impl<C> Clone for Reaction<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for Reaction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaction")
            .field("kind", &self.inner.kind)
            .field("enabled", &self.inner.enabled.get())
            .field("owner", &self.inner.owner.get())
            .finish_non_exhaustive()
    }
}

impl<C: 'static> Reaction<C> {
    /// Creates a reaction to events of type `E`.
    ///
    /// `callback` only runs when `condition` accepts the event.
    pub fn new<E: Event>(
        condition: impl Fn(&E, &mut C) -> bool + 'static,
        mut callback: impl FnMut(&E, &mut C, &mut Propagation) -> ReactionResult + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                kind: E::KIND,
                enabled: Cell::new(true),
                owner: Cell::new(None),
                condition: Box::new(move |data: &EventData, cx: &mut C| {
                    E::from_data(data).is_some_and(|e| condition(e, cx))
                }),
                callback: RefCell::new(Box::new(
                    move |data: &EventData, cx: &mut C, propagation: &mut Propagation| {
                        match E::from_data(data) {
                            Some(e) => callback(e, cx, propagation),
                            None => Ok(()),
                        }
                    },
                )),
            }),
        }
    }

    /// Creates a reaction with no condition.
    pub fn always<E: Event>(
        callback: impl FnMut(&E, &mut C, &mut Propagation) -> ReactionResult + 'static,
    ) -> Self {
        Self::new(|_: &E, _: &mut C| true, callback)
    }
}

impl<C> Reaction<C> {
    /// The kind this reaction is bound to.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.inner.kind
    }

    /// Whether the dispatcher will consider this reaction.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.get()
    }

    /// Enables or disables the reaction. Takes effect on every clone.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.set(enabled);
    }

    /// Layout node of the doodad this reaction belongs to, if any.
    #[must_use]
    pub fn owner(&self) -> Option<NodeId> {
        self.inner.owner.get()
    }

    /// Binds the reaction to an owning node.
    pub fn set_owner(&self, owner: Option<NodeId>) {
        self.inner.owner.set(owner);
    }

    /// Whether `self` and `other` are the same reaction.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Runs the condition and, if it accepts, the callback.
    ///
    /// Returns `Ok(false)` when the condition rejected the event or the
    /// callback is already running further up the stack.
    pub(crate) fn perform(
        &self,
        data: &EventData,
        cx: &mut C,
        propagation: &mut Propagation,
    ) -> Result<bool, ReactionError> {
        if !(self.inner.condition)(data, cx) {
            return Ok(false);
        }
        let Ok(mut callback) = self.inner.callback.try_borrow_mut() else {
            log::warn!("skipping reentrant {} reaction", self.inner.kind);
            return Ok(false);
        };
        (&mut **callback)(data, cx, propagation).map(|()| true)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;
    use crate::event::{MouseButton, MouseDown, MouseMove};

    fn down(x: f64) -> EventData {
        MouseDown {
            position: Point::new(x, 0.0),
            button: MouseButton::Primary,
        }
        .into()
    }

    #[test]
    fn condition_gates_callback() {
        let reaction = Reaction::<u32>::new(
            |e: &MouseDown, _| e.position.x > 10.0,
            |_, count, _| {
                *count += 1;
                Ok(())
            },
        );
        let mut count = 0;
        let mut prop = Propagation::default();
        assert_eq!(reaction.perform(&down(5.0), &mut count, &mut prop), Ok(false));
        assert_eq!(reaction.perform(&down(20.0), &mut count, &mut prop), Ok(true));
        assert_eq!(count, 1);
        assert_eq!(reaction.kind(), EventKind::MouseDown);
    }

    #[test]
    fn other_kinds_are_ignored() {
        let reaction = Reaction::<u32>::always(|_: &MouseMove, count, _| {
            *count += 1;
            Ok(())
        });
        let mut count = 0;
        let mut prop = Propagation::default();
        assert_eq!(reaction.perform(&down(0.0), &mut count, &mut prop), Ok(false));
        assert_eq!(count, 0);
    }

    #[test]
    fn clones_share_state() {
        let a = Reaction::<()>::always(|_: &MouseDown, _, _| Ok(()));
        let b = a.clone();
        b.set_enabled(false);
        assert!(!a.is_enabled());
        assert!(a.ptr_eq(&b));
        let c = Reaction::<()>::always(|_: &MouseDown, _, _| Ok(()));
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn stop_is_sticky() {
        let mut prop = Propagation::default();
        assert!(!prop.is_stopped());
        prop.stop();
        prop.stop();
        assert!(prop.is_stopped());
    }
}
