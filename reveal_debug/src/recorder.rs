// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps an owned copy of every
//! event, so a recording can outlive the controller that produced it.

use reveal_core::config::ReplayPolicy;
use reveal_core::controller::{FallbackReason, Mode, Transition};
use reveal_core::id::ElementId;
use reveal_core::trace::{InitEvent, RegisterEvent, TraceSink, TransitionEvent, UnobserveEvent};

/// An owned trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// An [`InitEvent`].
    Init {
        /// Number of candidates.
        candidates: u32,
        /// Resulting mode.
        mode: Mode,
        /// Static fallback reason, if any.
        fallback: Option<FallbackReason>,
    },
    /// A [`RegisterEvent`].
    Register {
        /// The new handle.
        id: ElementId,
        /// Effective policy.
        policy: ReplayPolicy,
        /// Effective delay as written to the surface.
        delay: Option<String>,
    },
    /// A [`TransitionEvent`].
    Transition {
        /// Target element.
        id: ElementId,
        /// Signal value.
        intersecting: bool,
        /// Outcome.
        transition: Transition,
    },
    /// An [`UnobserveEvent`].
    Unobserve {
        /// Element no longer tracked.
        id: ElementId,
    },
}

/// A [`TraceSink`] that records owned copies of every event.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Returns the outcomes recorded for one element, in order.
    #[must_use]
    pub fn transitions_for(&self, id: ElementId) -> Vec<Transition> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Transition {
                    id: target,
                    transition,
                    ..
                } if *target == id => Some(*transition),
                _ => None,
            })
            .collect()
    }
}

impl TraceSink for RecorderSink {
    fn on_init(&mut self, e: &InitEvent) {
        self.events.push(RecordedEvent::Init {
            candidates: e.candidates,
            mode: e.mode,
            fallback: e.fallback,
        });
    }

    fn on_register(&mut self, e: &RegisterEvent<'_>) {
        self.events.push(RecordedEvent::Register {
            id: e.id,
            policy: e.policy,
            delay: e.delay.map(|d| d.to_css()),
        });
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.events.push(RecordedEvent::Transition {
            id: e.id,
            intersecting: e.intersecting,
            transition: e.transition,
        });
    }

    fn on_unobserve(&mut self, e: &UnobserveEvent) {
        self.events.push(RecordedEvent::Unobserve { id: e.id });
    }
}
