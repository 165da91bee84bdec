// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated page scroll that exercises the controller and diagnostics.
//!
//! Lays out a small landing page as rectangles, scrolls a viewport down to the
//! footer and back up, and feeds every [`HeadlessTracker`] signal to a
//! [`RevealController`]. Events go to both a
//! [`PrettyPrintSink`](reveal_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](reveal_debug::recorder::RecorderSink); the recording is
//! exported as JSON at the end.

use std::fs::File;
use std::io::BufWriter;

use kurbo::Rect;

use reveal_core::config::{ReplayPolicy, RevealConfig};
use reveal_core::controller::{Candidate, Capabilities, RevealController};
use reveal_core::delay::{GroupRef, RevealDelay, StaggerStep};
use reveal_core::id::GroupKey;
use reveal_core::surface::RecordingSurface;
use reveal_core::trace::{
    InitEvent, RegisterEvent, TraceSink, Tracer, TransitionEvent, UnobserveEvent,
};
use reveal_core::visibility::HeadlessTracker;

use reveal_debug::pretty::PrettyPrintSink;
use reveal_debug::recorder::RecorderSink;

const VIEWPORT_W: f64 = 1280.0;
const VIEWPORT_H: u32 = 800;
const PAGE_H: u32 = 3600;
const SCROLL_STEP: usize = 200;

/// One element on the simulated page.
struct Block {
    name: &'static str,
    bounds: Rect,
    candidate: Candidate,
}

fn page() -> Vec<Block> {
    let cards = GroupRef {
        key: GroupKey(0),
        step: StaggerStep::from_millis(120),
    };
    let card = |i: u32| {
        let x = 80.0 + f64::from(i) * 290.0;
        Rect::new(x, 1100.0, x + 260.0, 1400.0)
    };

    vec![
        Block {
            name: "hero title",
            bounds: Rect::new(80.0, 120.0, 1200.0, 320.0),
            candidate: Candidate::plain(),
        },
        Block {
            name: "card 1",
            bounds: card(0),
            candidate: Candidate::plain().in_group(cards),
        },
        Block {
            name: "card 2",
            bounds: card(1),
            candidate: Candidate::plain().in_group(cards),
        },
        Block {
            name: "card 3",
            bounds: card(2),
            candidate: Candidate::plain().in_group(cards),
        },
        Block {
            name: "card 4",
            bounds: card(3),
            candidate: Candidate::plain().in_group(cards),
        },
        Block {
            name: "about copy",
            bounds: Rect::new(80.0, 2000.0, 640.0, 2400.0),
            candidate: Candidate::plain().with_delay(RevealDelay::Expr("0.3s".to_string())),
        },
        Block {
            name: "contact banner",
            bounds: Rect::new(80.0, 3100.0, 1200.0, 3400.0),
            candidate: Candidate::plain().one_shot(),
        },
    ]
}

/// Forwards every event to two sinks.
struct Tee<'a> {
    first: &'a mut dyn TraceSink,
    second: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_init(&mut self, e: &InitEvent) {
        self.first.on_init(e);
        self.second.on_init(e);
    }

    fn on_register(&mut self, e: &RegisterEvent<'_>) {
        self.first.on_register(e);
        self.second.on_register(e);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.first.on_transition(e);
        self.second.on_transition(e);
    }

    fn on_unobserve(&mut self, e: &UnobserveEvent) {
        self.first.on_unobserve(e);
        self.second.on_unobserve(e);
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout())).quiet(true);
    let mut recorder = RecorderSink::new();

    // -- page --------------------------------------------------------------
    let blocks = page();
    let config = RevealConfig::default()
        .with_policy(ReplayPolicy::Repeating)
        .with_threshold(0.18)
        .with_root_margin("0px 0px -10% 0px");

    let mut surface = RecordingSurface::new();
    let mut tracker = HeadlessTracker::for_config(&config);
    let mut controller = {
        let mut tee = Tee {
            first: &mut pretty,
            second: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);
        RevealController::init_traced(
            config,
            Capabilities::FULL,
            blocks.iter().map(|b| b.candidate.clone()),
            &mut surface,
            &mut tracker,
            &mut tracer,
        )
    };
    for (id, block) in controller.ids().zip(&blocks) {
        tracker.set_bounds(id, block.bounds);
    }

    // -- scroll down, then back up ----------------------------------------
    let max_top = PAGE_H - VIEWPORT_H;
    let down = (0..=max_top).step_by(SCROLL_STEP);
    let up = (0..=max_top).rev().step_by(SCROLL_STEP);

    for top in down.chain(up).map(f64::from) {
        let viewport = Rect::new(0.0, top, VIEWPORT_W, top + f64::from(VIEWPORT_H));
        let signals = tracker.update(viewport);
        if signals.is_empty() {
            continue;
        }
        println!("-- scrollY={top}");
        let mut tee = Tee {
            first: &mut pretty,
            second: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);
        controller.on_signals(signals, &mut surface, &mut tracker, &mut tracer);
    }

    // -- final state -------------------------------------------------------
    println!("-- final state at scrollY=0");
    for (id, block) in controller.ids().zip(&blocks) {
        let delay = controller
            .delay(id)
            .map_or_else(|| "-".to_string(), RevealDelay::to_css);
        println!(
            "{:>16}: presented={} observed={} delay={delay}",
            block.name,
            controller.is_presented(id),
            controller.is_observed(id),
        );
    }

    // -- export JSON -------------------------------------------------------
    let path = "reveal_trace.json";
    let file = File::create(path).expect("failed to create reveal_trace.json");
    let mut writer = BufWriter::new(file);
    reveal_debug::json::export(recorder.events(), &mut writer).expect("failed to write trace");

    println!(
        "Wrote {path} ({} events, {} surface calls)",
        recorder.events().len(),
        surface.calls().len()
    );
}
