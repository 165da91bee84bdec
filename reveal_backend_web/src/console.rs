// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace output.

use alloc::format;

use reveal_core::trace::{InitEvent, RegisterEvent, TraceSink, TransitionEvent, UnobserveEvent};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that writes one `console.debug` line per event.
///
/// `label` prefixes every line so several installed controllers can be told
/// apart.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleSink {
    label: &'static str,
}

impl ConsoleSink {
    /// Creates a sink with the given line prefix.
    #[must_use]
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }

    fn line(&self, text: &str) {
        web_sys::console::debug_1(&JsValue::from_str(&format!("[{}] {text}", self.label)));
    }
}

impl TraceSink for ConsoleSink {
    fn on_init(&mut self, e: &InitEvent) {
        self.line(&format!(
            "init candidates={} mode={:?} fallback={:?}",
            e.candidates, e.mode, e.fallback
        ));
    }

    fn on_register(&mut self, e: &RegisterEvent<'_>) {
        let delay = e.delay.map(|d| d.to_css());
        self.line(&format!(
            "register {} policy={:?} delay={}",
            e.id.index(),
            e.policy,
            delay.as_deref().unwrap_or("-")
        ));
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.line(&format!(
            "signal {} intersecting={} -> {:?}",
            e.id.index(),
            e.intersecting,
            e.transition
        ));
    }

    fn on_unobserve(&mut self, e: &UnobserveEvent) {
        self.line(&format!("unobserve {}", e.id.index()));
    }
}
