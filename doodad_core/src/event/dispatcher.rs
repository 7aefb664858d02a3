// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture synthesis and depth-ordered routing.

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::{Point, Vec2};

use super::depth::DepthKey;
use super::input::{GestureConfig, InputFrame, Press};
use super::reaction::{Propagation, Reaction};
use super::types::{
    EventData, EventKind, KeyDown, MouseDown, MouseDrag, MouseMove, MouseUp, MouseWheel,
};
use crate::time::HostTime;
use crate::trace::{DispatchEvent, GestureEvent, ReactionFailedEvent, SampleEvent, Tracer};

/// Handle returned by [`EventDispatcher::register`].
///
/// Pass it back to [`EventDispatcher::unregister`] to remove exactly the
/// registration it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Registration {
    kind: EventKind,
    id: u64,
}

impl Registration {
    /// Kind of the registered reaction.
    #[must_use]
    pub fn kind(self) -> EventKind {
        self.kind
    }
}

/// Errors from registration management.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// The registration was already removed or belongs to another
    /// dispatcher.
    ReactionNotFound(Registration),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReactionNotFound(reg) => {
                write!(f, "no {} reaction registered as #{}", reg.kind, reg.id)
            }
        }
    }
}

impl core::error::Error for DispatchError {}

struct Entry<C> {
    id: u64,
    depth: DepthKey,
    reaction: Reaction<C>,
}

/// Turns raw input into events and routes them to reactions.
///
/// Reactions are kept per [`EventKind`] in ascending [`DepthKey`] order
/// (stable for equal keys) and visited in *reverse*: the top-most,
/// most recently registered reaction sees an event first.
///
/// Every method takes `&self`, so reactions may register, unregister or
/// rebuild doodads while an event is being routed. Keep the dispatcher
/// behind an `Rc` in the context to reach it from a callback. Routing
/// walks the list as it stood when the occurrence arrived: reactions
/// registered meanwhile wait for the next occurrence, and reactions
/// unregistered meanwhile are skipped.
///
/// `C` is the application context every reaction receives.
pub struct EventDispatcher<C> {
    lists: RefCell<[Vec<Entry<C>>; EventKind::ALL.len()]>,
    next_id: Cell<u64>,
    pointer: Cell<Point>,
    press: Cell<Option<Press>>,
    config: Cell<GestureConfig>,
}

impl<C> fmt::Debug for EventDispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(EventKind, usize)> = EventKind::ALL
            .into_iter()
            .map(|k| (k, self.reaction_count(k)))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("pointer", &self.pointer.get())
            .field("press", &self.press.get())
            .field("config", &self.config.get())
            .field("reactions", &counts)
            .finish_non_exhaustive()
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventDispatcher<C> {
    /// Creates a dispatcher with default gesture thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    /// Creates a dispatcher with the given gesture thresholds.
    #[must_use]
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            lists: RefCell::new(core::array::from_fn(|_| Vec::new())),
            next_id: Cell::new(0),
            pointer: Cell::new(Point::ZERO),
            press: Cell::new(None),
            config: Cell::new(config),
        }
    }

    /// Gesture thresholds.
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config.get()
    }

    /// Replaces the gesture thresholds. An in-progress press keeps going
    /// under the new values.
    pub fn set_config(&self, config: GestureConfig) {
        self.config.set(config);
    }

    /// Pointer position as of the last sample.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer.get()
    }

    /// The in-progress press, if a button is held.
    #[must_use]
    pub fn press(&self) -> Option<Press> {
        self.press.get()
    }

    // -- Registration --

    /// Registers `reaction` at `depth` and returns the handle that removes it.
    ///
    /// The reaction is inserted after every existing reaction whose depth is
    /// less than or equal to `depth`, so among equal depths the newest
    /// registration is dispatched to first.
    pub fn register(&self, reaction: Reaction<C>, depth: DepthKey) -> Registration {
        let kind = reaction.kind();
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let mut lists = self.lists.borrow_mut();
        let list = &mut lists[kind.slot()];
        let at = list.partition_point(|e| e.depth <= depth);
        list.insert(
            at,
            Entry {
                id,
                depth,
                reaction,
            },
        );
        Registration { kind, id }
    }

    /// Removes the registration `reg` came from.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ReactionNotFound`] if it was already removed.
    pub fn unregister(&self, reg: Registration) -> Result<(), DispatchError> {
        let mut lists = self.lists.borrow_mut();
        let list = &mut lists[reg.kind.slot()];
        let at = list
            .iter()
            .position(|e| e.id == reg.id)
            .ok_or(DispatchError::ReactionNotFound(reg))?;
        list.remove(at);
        Ok(())
    }

    /// Whether `reg` is still registered.
    #[must_use]
    pub fn is_registered(&self, reg: Registration) -> bool {
        self.lists.borrow()[reg.kind.slot()]
            .iter()
            .any(|e| e.id == reg.id)
    }

    /// Registered reactions for `kind`, in ascending depth order.
    ///
    /// Dispatch visits them in reverse.
    #[must_use]
    pub fn reactions(&self, kind: EventKind) -> Vec<(DepthKey, Reaction<C>)> {
        self.lists.borrow()[kind.slot()]
            .iter()
            .map(|e| (e.depth.clone(), e.reaction.clone()))
            .collect()
    }

    /// Number of reactions registered for `kind`.
    #[must_use]
    pub fn reaction_count(&self, kind: EventKind) -> usize {
        self.lists.borrow()[kind.slot()].len()
    }

    // -- Routing --

    /// Routes one occurrence to the reactions registered for its kind.
    ///
    /// See [`dispatch_traced`](Self::dispatch_traced).
    pub fn dispatch(&self, event: impl Into<EventData>, cx: &mut C) -> Propagation {
        self.dispatch_traced(&event.into(), cx, &mut Tracer::none())
    }

    /// Routes one occurrence, reporting to `tracer`.
    ///
    /// Reactions are visited from the highest depth key down. Disabled
    /// reactions are skipped. Each enabled reaction whose condition accepts
    /// the event has its callback run, until one of them stops propagation.
    /// A callback error is logged and reported; routing continues unless
    /// the failing callback stopped propagation before it returned.
    ///
    /// Returns the occurrence's final propagation state.
    pub fn dispatch_traced(
        &self,
        event: &EventData,
        cx: &mut C,
        tracer: &mut Tracer<'_>,
    ) -> Propagation {
        let kind = event.kind();
        let snapshot: Vec<(Registration, DepthKey, Reaction<C>)> = self.lists.borrow()
            [kind.slot()]
            .iter()
            .rev()
            .map(|e| (Registration { kind, id: e.id }, e.depth.clone(), e.reaction.clone()))
            .collect();
        let mut propagation = Propagation::default();
        let mut invoked = 0_u32;

        for (reg, depth, reaction) in &snapshot {
            if !reaction.is_enabled() {
                continue;
            }
            if propagation.is_stopped() {
                break;
            }
            // An earlier callback may have torn this one's doodad down.
            if !self.is_registered(*reg) {
                continue;
            }
            match reaction.perform(event, cx, &mut propagation) {
                Ok(true) => invoked += 1,
                Ok(false) => {}
                Err(err) => {
                    invoked += 1;
                    log::error!("{kind} reaction at depth {depth} failed: {err}");
                    tracer.reaction_failed(
                        &ReactionFailedEvent {
                            kind,
                            owner: reaction.owner(),
                        },
                        &err,
                    );
                }
            }
        }

        tracer.dispatch(&DispatchEvent {
            kind,
            registered: u32::try_from(snapshot.len()).unwrap_or(u32::MAX),
            invoked,
            stopped: propagation.is_stopped(),
        });
        propagation
    }

    // -- Sampling --

    /// Processes one tick of raw input.
    ///
    /// See [`sample_traced`](Self::sample_traced).
    pub fn sample(&self, frame: &InputFrame, cx: &mut C) {
        self.sample_traced(frame, cx, &mut Tracer::none());
    }

    /// Processes one tick of raw input, reporting to `tracer`.
    ///
    /// Emits, in order: a key-down per newly pressed key; a mouse-move if
    /// the pointer moved; a wheel event if the wheel offset is non-zero;
    /// then press tracking for the highest-priority held button, which may
    /// yield mouse-down, drag, or (on release) mouse-up.
    ///
    /// A press becomes a drag once it has lasted longer than
    /// [`click_duration`](GestureConfig::click_duration) or travelled past
    /// [`drag_distance`](GestureConfig::drag_distance) on either axis; a
    /// drag event is only emitted on ticks where the pointer moved. A
    /// release is a click if the press was shorter than `click_duration` or
    /// its travel stayed under
    /// [`click_distance`](GestureConfig::click_distance) on both axes.
    pub fn sample_traced(&self, frame: &InputFrame, cx: &mut C, tracer: &mut Tracer<'_>) {
        let now = frame.now;
        let pointer = frame.pointer;
        let held = frame.buttons.first_pressed();
        let config = self.config.get();
        tracer.sample(&SampleEvent {
            now,
            pointer,
            button: held,
            press_active: self.press.get().is_some(),
        });

        for &key in &frame.pressed_keys {
            self.emit(KeyDown { key }.into(), now, cx, tracer);
        }

        if pointer != self.pointer.get() {
            self.pointer.set(pointer);
            self.emit(MouseMove { position: pointer }.into(), now, cx, tracer);
        }

        if frame.wheel != Vec2::ZERO {
            self.emit(
                MouseWheel {
                    position: pointer,
                    delta: frame.wheel,
                }
                .into(),
                now,
                cx,
                tracer,
            );
        }

        match (held, self.press.get()) {
            (Some(button), None) => {
                self.press.set(Some(Press {
                    start: pointer,
                    current: pointer,
                    started_at: now,
                    button,
                }));
                self.emit(MouseDown { position: pointer, button }.into(), now, cx, tracer);
            }
            (Some(_), Some(press)) => {
                let elapsed = now.saturating_duration_since(press.started_at);
                let is_drag = elapsed > config.click_duration
                    || exceeds(pointer - press.start, config.drag_distance);
                if is_drag && pointer != press.current {
                    let drag = MouseDrag {
                        origin: press.start,
                        previous: press.current,
                        position: pointer,
                        started_at: press.started_at,
                        button: press.button,
                    };
                    self.emit(drag.into(), now, cx, tracer);
                }
                if let Some(mut press) = self.press.get() {
                    press.current = pointer;
                    self.press.set(Some(press));
                }
            }
            (None, Some(press)) => {
                self.press.set(None);
                let elapsed = now.saturating_duration_since(press.started_at);
                let is_click = elapsed < config.click_duration
                    || within(press.travel(), config.click_distance);
                if is_click {
                    let up = MouseUp {
                        position: press.current,
                        button: press.button,
                    };
                    self.emit(up.into(), now, cx, tracer);
                }
            }
            (None, None) => {}
        }
    }

    fn emit(&self, event: EventData, now: HostTime, cx: &mut C, tracer: &mut Tracer<'_>) {
        tracer.gesture(&GestureEvent {
            now,
            kind: event.kind(),
            position: event.position().unwrap_or(self.pointer.get()),
        });
        self.dispatch_traced(&event, cx, tracer);
    }
}

/// Whether either axis of `v` is farther than `limit` from zero.
fn exceeds(v: Vec2, limit: f64) -> bool {
    v.x > limit || -v.x > limit || v.y > limit || -v.y > limit
}

/// Whether both axes of `v` are closer than `limit` to zero.
fn within(v: Vec2, limit: f64) -> bool {
    v.x < limit && -v.x < limit && v.y < limit && -v.y < limit
}
