// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter for recorded events.
//!
//! [`export`] writes events from a [`RecorderSink`](super::recorder::RecorderSink)
//! as a JSON array with one object per event. Each object carries a `seq`
//! index and an `event` name; the remaining keys depend on the event.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::RecordedEvent;

/// Converts one recorded event to a JSON object.
#[must_use]
pub fn to_value(seq: usize, event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Init {
            candidates,
            mode,
            fallback,
        } => json!({
            "seq": seq,
            "event": "init",
            "candidates": candidates,
            "mode": format!("{mode:?}"),
            "fallback": fallback.map(|f| format!("{f:?}")),
        }),
        RecordedEvent::Register { id, policy, delay } => json!({
            "seq": seq,
            "event": "register",
            "id": id.index(),
            "policy": format!("{policy:?}"),
            "delay": delay,
        }),
        RecordedEvent::Transition {
            id,
            intersecting,
            transition,
        } => json!({
            "seq": seq,
            "event": "transition",
            "id": id.index(),
            "intersecting": intersecting,
            "transition": format!("{transition:?}"),
        }),
        RecordedEvent::Unobserve { id } => json!({
            "seq": seq,
            "event": "unobserve",
            "id": id.index(),
        }),
    }
}

/// Writes `events` as a pretty-printed JSON array.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events
        .iter()
        .enumerate()
        .map(|(seq, e)| to_value(seq, e))
        .collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}
