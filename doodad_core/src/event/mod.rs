// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input sampling, gesture synthesis and depth-ordered event routing.
//!
//! The [`EventDispatcher`] is fed one [`InputFrame`] per tick through
//! [`sample`](EventDispatcher::sample). It compares the frame with what it
//! saw last and synthesizes typed events ([`KeyDown`], [`MouseMove`],
//! [`MouseWheel`], [`MouseDown`], [`MouseUp`] for clicks, [`MouseDrag`]).
//!
//! Each event is routed to the [`Reaction`]s registered for its
//! [`EventKind`]. Reactions are registered at a [`DepthKey`], the node's
//! path from the tree root, and visited deepest and latest first, so the
//! top-most node on screen reacts before the nodes beneath it. Any reaction
//! can [`stop`](Propagation::stop) the occurrence from travelling further.
//!
//! A [`ReactionSet`] groups the reactions of one node so they can be
//! enabled, disabled, registered and unregistered together.

mod depth;
mod dispatcher;
mod input;
mod reaction;
mod set;
mod types;

pub use depth::DepthKey;
pub use dispatcher::{DispatchError, EventDispatcher, Registration};
pub use input::{GestureConfig, InputFrame, PointerButtons, Press};
pub use reaction::{Propagation, Reaction, ReactionError, ReactionResult};
pub use set::ReactionSet;
pub use types::{
    Event, EventData, EventKind, Key, KeyDown, MouseButton, MouseDown, MouseDrag, MouseMove,
    MouseUp, MouseWheel, Positioned,
};
