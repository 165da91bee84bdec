// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the reveal controller.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! controller calls at initialization, registration, and on every signal. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::config::ReplayPolicy;
use crate::controller::{FallbackReason, Mode, Transition};
use crate::delay::RevealDelay;
use crate::id::ElementId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once when a controller finishes initialization.
#[derive(Clone, Copy, Debug)]
pub struct InitEvent {
    /// Number of candidates handed to the controller.
    pub candidates: u32,
    /// Whether elements are observed or presented statically.
    pub mode: Mode,
    /// Why the static fallback was taken, if it was.
    pub fallback: Option<FallbackReason>,
}

/// Emitted when an element is registered.
#[derive(Clone, Copy, Debug)]
pub struct RegisterEvent<'a> {
    /// The new handle.
    pub id: ElementId,
    /// Effective replay policy.
    pub policy: ReplayPolicy,
    /// Effective entrance delay.
    pub delay: Option<&'a RevealDelay>,
}

/// Emitted for every intersection signal the controller handles.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEvent {
    /// Target element.
    pub id: ElementId,
    /// The signal value.
    pub intersecting: bool,
    /// What the controller did with it.
    pub transition: Transition,
}

/// Emitted when an element stops being observed.
#[derive(Clone, Copy, Debug)]
pub struct UnobserveEvent {
    /// Element no longer tracked.
    pub id: ElementId,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after initialization.
    fn on_init(&mut self, e: &InitEvent) {
        _ = e;
    }

    /// Called when an element is registered.
    fn on_register(&mut self, e: &RegisterEvent<'_>) {
        _ = e;
    }

    /// Called for each handled intersection signal.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called when an element is unobserved.
    fn on_unobserve(&mut self, e: &UnobserveEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`InitEvent`].
    #[inline]
    pub fn init(&mut self, e: &InitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_init(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RegisterEvent`].
    #[inline]
    pub fn register(&mut self, e: &RegisterEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_register(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UnobserveEvent`].
    #[inline]
    pub fn unobserve(&mut self, e: &UnobserveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_unobserve(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(all(test, feature = "trace"))]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        transitions: u32,
        unobserves: u32,
    }

    impl TraceSink for Counting {
        fn on_transition(&mut self, _e: &TransitionEvent) {
            self.transitions += 1;
        }

        fn on_unobserve(&mut self, _e: &UnobserveEvent) {
            self.unobserves += 1;
        }
    }

    #[test]
    fn tracer_dispatches_to_sink() {
        let mut sink = Counting::default();
        {
            let mut tracer = Tracer::new(&mut sink);
            tracer.transition(&TransitionEvent {
                id: ElementId(0),
                intersecting: true,
                transition: Transition::Presented,
            });
            tracer.unobserve(&UnobserveEvent { id: ElementId(0) });
            tracer.init(&InitEvent {
                candidates: 1,
                mode: Mode::Observing,
                fallback: None,
            });
        }
        assert_eq!(sink.transitions, 1, "one transition was emitted");
        assert_eq!(sink.unobserves, 1, "one unobserve was emitted");
    }

    #[test]
    fn none_tracer_is_silent() {
        let mut tracer = Tracer::none();
        tracer.unobserve(&UnobserveEvent { id: ElementId(1) });
    }
}
