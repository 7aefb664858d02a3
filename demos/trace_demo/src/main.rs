// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted input session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Builds a small window (a toolbar with two buttons and a draggable card),
//! feeds it a fixed sequence of input frames, and routes every trace event
//! to both a [`PrettyPrintSink`](doodad_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](doodad_debug::recorder::RecorderSink). Afterwards it
//! prints text dumps, paints the tree to a text surface and exports a
//! Chrome trace JSON file.

use std::cell::Cell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use doodad_core::event::{
    EventDispatcher, InputFrame, Key, KeyDown, MouseButton, MouseDrag, MouseUp, Reaction,
    ReactionError,
};
use doodad_core::layout::{Computation, FlowConfig, Padding, SizeRule, arrange_flow};
use doodad_core::time::{HostTime, Timebase};
use doodad_core::trace::{
    DispatchEvent, GestureEvent, LayoutPushEvent, ReactionFailedEvent, SampleEvent, TraceSink,
    Tracer,
};
use doodad_core::tree::{
    DoodadId, DoodadTree, Drawable, HasTree, pointer_within_doodad, rect_contains,
};
use kurbo::{Point, Rect, Size, Vec2};

use doodad_debug::dump;
use doodad_debug::pretty::PrettyPrintSink;
use doodad_debug::recorder::RecorderSink;

const MS: u64 = 1_000_000;

/// Application state handed to every reaction.
struct App {
    tree: DoodadTree<Self>,
    dispatcher: Rc<EventDispatcher<Self>>,
    clicks: u32,
    keys: Vec<Key>,
}

impl HasTree for App {
    fn tree(&self) -> &DoodadTree<Self> {
        &self.tree
    }

    fn tree_mut(&mut self) -> &mut DoodadTree<Self> {
        &mut self.tree
    }
}

/// Forwards every event to both sinks.
struct Sinks {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for Sinks {
    fn on_sample(&mut self, e: &SampleEvent) {
        self.pretty.on_sample(e);
        self.recorder.on_sample(e);
    }

    fn on_gesture(&mut self, e: &GestureEvent) {
        self.pretty.on_gesture(e);
        self.recorder.on_gesture(e);
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.pretty.on_dispatch(e);
        self.recorder.on_dispatch(e);
    }

    fn on_reaction_failed(&mut self, e: &ReactionFailedEvent, error: &ReactionError) {
        self.pretty.on_reaction_failed(e, error);
        self.recorder.on_reaction_failed(e, error);
    }

    fn on_layout_push(&mut self, e: &LayoutPushEvent) {
        self.pretty.on_layout_push(e);
        self.recorder.on_layout_push(e);
    }
}

/// Draws a named box as one line of text.
struct Outline(&'static str);

impl Drawable<Vec<String>> for Outline {
    fn draw(&self, frame: Rect, surface: &mut Vec<String>) {
        surface.push(format!(
            "{:<8} ({}, {}) {}×{}",
            self.0,
            frame.x0,
            frame.y0,
            frame.width(),
            frame.height()
        ));
    }
}

fn button_size(cx: &mut Computation<'_>) {
    cx.set_dimensions(Size::new(80.0, 24.0));
}

/// Fills the toolbar with its buttons. Clicking "ok" rebuilds the toolbar
/// from inside the click reaction.
fn build_toolbar(tree: &mut DoodadTree<App>, toolbar: DoodadId) {
    let toolbar_node = tree.node(toolbar);
    let ok_node = tree.layout_mut().computed(button_size);
    let cancel_node = tree.layout_mut().computed(button_size);
    let ok = tree.add_child(toolbar, Some(ok_node));
    let cancel = tree.add_child(toolbar, Some(cancel_node));
    let row = FlowConfig {
        padding: Padding::equal(8.0),
        size_rule: SizeRule::Fill,
        ..FlowConfig::row(8.0)
    };
    arrange_flow(tree.layout_mut(), toolbar_node, &[ok_node, cancel_node], &row);

    tree.add_reaction(
        ok,
        Reaction::new(pointer_within_doodad(ok), move |_: &MouseUp, app: &mut App, prop| {
            app.clicks += 1;
            app.tree.re_setup(toolbar, &app.dispatcher, build_toolbar);
            prop.stop();
            Ok(())
        }),
    );
    tree.add_reaction(
        cancel,
        Reaction::new(pointer_within_doodad(cancel), |_: &MouseUp, _: &mut App, _| {
            Err(ReactionError::new("cancel is not wired up"))
        }),
    );
}

fn main() {
    let timebase = Timebase::NANOS;
    let mut sinks = Sinks {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout()), timebase),
        recorder: RecorderSink::new(),
    };

    // -- tree --------------------------------------------------------------
    let dispatcher = Rc::new(EventDispatcher::new());
    let mut app = App {
        tree: DoodadTree::with_root_rect(Rect::new(0.0, 0.0, 320.0, 200.0)),
        dispatcher: Rc::clone(&dispatcher),
        clicks: 0,
        keys: Vec::new(),
    };
    let root = app.tree.root();
    let root_node = app.tree.node(root);

    let toolbar_node = app.tree.layout_mut().computed(move |cx| {
        cx.copy(root_node).set_height(40.0);
    });
    let toolbar = app.tree.add_child(root, Some(toolbar_node));
    build_toolbar(&mut app.tree, toolbar);

    let offset = Rc::new(Cell::new(Vec2::ZERO));
    let card_offset = Rc::clone(&offset);
    let card_node = app.tree.layout_mut().computed(move |cx| {
        let o = card_offset.get();
        cx.copy_position_of(root_node)
            .move_right(20.0 + o.x)
            .move_down(60.0 + o.y)
            .set_dimensions(Size::new(100.0, 60.0));
    });
    let card = app.tree.add_child(root, Some(card_node));

    // -- reactions ---------------------------------------------------------
    app.tree.add_reaction(
        card,
        Reaction::new(
            move |e: &MouseDrag, app: &mut App| rect_contains(app.tree.frame(card), e.previous),
            move |e: &MouseDrag, app: &mut App, prop| {
                offset.set(offset.get() + e.step());
                app.tree.layout_mut().mark_dirty(card_node);
                prop.stop();
                Ok(())
            },
        ),
    );
    app.tree.add_reaction(
        root,
        Reaction::always(|e: &KeyDown, app: &mut App, _| {
            app.keys.push(e.key);
            Ok(())
        }),
    );

    app.tree.setup_subtree_traced(root, &dispatcher, &mut Tracer::new(&mut sinks));

    // -- scripted input ----------------------------------------------------
    let at = |ms: u64, x: f64, y: f64| InputFrame::at(HostTime(ms * MS), Point::new(x, y));
    let script = [
        at(0, 40.0, 20.0),
        // Click "ok", which rebuilds the toolbar.
        at(10, 40.0, 20.0).pressing(MouseButton::Primary),
        at(40, 41.0, 20.0),
        // Click "cancel", whose reaction fails.
        at(100, 120.0, 20.0).pressing(MouseButton::Primary),
        at(130, 120.0, 20.0),
        // Drag the card right, then down and right.
        at(200, 50.0, 80.0).pressing(MouseButton::Primary),
        at(260, 90.0, 80.0).pressing(MouseButton::Primary),
        at(320, 130.0, 100.0).pressing(MouseButton::Primary),
        at(400, 130.0, 100.0),
        // Escape.
        at(450, 130.0, 100.0).with_key(Key(27)),
    ];
    for frame in &script {
        dispatcher.sample_traced(frame, &mut app, &mut Tracer::new(&mut sinks));
    }

    // -- dumps -------------------------------------------------------------
    println!();
    println!("clicks={} keys={:?}", app.clicks, app.keys);
    print!("{}", dump::dispatcher(&dispatcher));
    print!("{}", dump::tree(&app.tree));

    let outlines = [
        Outline("window"),
        Outline("toolbar"),
        Outline("card"),
        Outline("ok"),
        Outline("cancel"),
    ];
    let doodads = [root, toolbar, card].into_iter().chain(app.tree.children(toolbar));
    let mut drawables: Vec<(DoodadId, &dyn Drawable<Vec<String>>)> = Vec::new();
    for (id, outline) in doodads.zip(&outlines) {
        drawables.push((id, outline as &dyn Drawable<Vec<String>>));
    }
    let mut surface = Vec::new();
    app.tree.paint(&mut surface, &drawables);
    for line in &surface {
        println!("{line}");
    }

    app.tree.teardown(toolbar, &dispatcher);
    print!("{}", dump::layout(app.tree.layout()));

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    doodad_debug::chrome::export(sinks.recorder.as_bytes(), timebase, &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({} input frames)", script.len());
}
