// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use reveal_core::controller::Transition;
use reveal_core::trace::{InitEvent, RegisterEvent, TraceSink, TransitionEvent, UnobserveEvent};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    quiet: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            quiet: false,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            quiet: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            quiet: false,
        }
    }

    /// Skips signals that did not change anything.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn transition_name(t: Transition) -> &'static str {
    match t {
        Transition::Presented => "presented",
        Transition::Hidden => "hidden",
        Transition::Unchanged => "unchanged",
        Transition::Ignored => "ignored",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_init(&mut self, e: &InitEvent) {
        let _ = match e.fallback {
            Some(reason) => writeln!(
                self.writer,
                "[init] candidates={} mode={:?} fallback={reason:?}",
                e.candidates, e.mode,
            ),
            None => writeln!(
                self.writer,
                "[init] candidates={} mode={:?}",
                e.candidates, e.mode,
            ),
        };
    }

    fn on_register(&mut self, e: &RegisterEvent<'_>) {
        let delay = e.delay.map(|d| d.to_css());
        let _ = writeln!(
            self.writer,
            "[register] #{} policy={:?} delay={}",
            e.id.index(),
            e.policy,
            delay.as_deref().unwrap_or("-"),
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        if self.quiet && matches!(e.transition, Transition::Unchanged | Transition::Ignored) {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[signal] #{} {} -> {}",
            e.id.index(),
            if e.intersecting { "in" } else { "out" },
            transition_name(e.transition),
        );
    }

    fn on_unobserve(&mut self, e: &UnobserveEvent) {
        let _ = writeln!(self.writer, "[unobserve] #{}", e.id.index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_core::config::ReplayPolicy;
    use reveal_core::controller::Mode;
    use reveal_core::delay::RevealDelay;
    use reveal_core::id::ElementId;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn writes_one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        let delay = RevealDelay::Millis(240);
        sink.on_register(&RegisterEvent {
            id: ElementId::from_index(2),
            policy: ReplayPolicy::Repeating,
            delay: Some(&delay),
        });
        sink.on_init(&InitEvent {
            candidates: 3,
            mode: Mode::Observing,
            fallback: None,
        });
        sink.on_transition(&TransitionEvent {
            id: ElementId::from_index(2),
            intersecting: true,
            transition: Transition::Presented,
        });
        sink.on_unobserve(&UnobserveEvent {
            id: ElementId::from_index(2),
        });

        let out = output(sink);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "[register] #2 policy=Repeating delay=240ms",
                "[init] candidates=3 mode=Observing",
                "[signal] #2 in -> presented",
                "[unobserve] #2",
            ]
        );
    }

    #[test]
    fn quiet_skips_no_op_signals() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new()).quiet(true);
        sink.on_transition(&TransitionEvent {
            id: ElementId::from_index(0),
            intersecting: false,
            transition: Transition::Unchanged,
        });
        sink.on_transition(&TransitionEvent {
            id: ElementId::from_index(0),
            intersecting: false,
            transition: Transition::Hidden,
        });
        assert_eq!(output(sink), "[signal] #0 out -> hidden\n");
    }
}
