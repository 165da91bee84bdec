// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entrance delays and group staggering.
//!
//! A delay comes from one of two places, resolved once at registration:
//!
//! 1. An explicit per-element value (`data-reveal-delay`). Digits-only text is
//!    milliseconds; anything else is passed through as a CSS time expression.
//! 2. The element's position in a reveal group multiplied by the group's
//!    stagger step.
//!
//! The explicit value wins when both are present.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString as _};

use crate::id::GroupKey;

/// A resolved entrance delay.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RevealDelay {
    /// Whole milliseconds.
    Millis(u32),
    /// A CSS time expression used verbatim (e.g. `0.3s`, `var(--d)`).
    Expr(String),
}

impl RevealDelay {
    /// Parses an explicit delay.
    ///
    /// Returns `None` for empty or whitespace-only text. Values too large for
    /// `u32` saturate.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text.bytes().all(|b| b.is_ascii_digit()) {
            let ms = text
                .bytes()
                .fold(0_u32, |acc, b| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')));
            return Some(Self::Millis(ms));
        }
        Some(Self::Expr(text.to_string()))
    }

    /// Returns the value to store in the delay custom property.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Millis(ms) => format!("{ms}ms"),
            Self::Expr(expr) => expr.clone(),
        }
    }
}

/// Delay increment between successive members of a reveal group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StaggerStep(u32);

impl StaggerStep {
    /// Step used when a group declares none, zero, or something unparsable.
    pub const DEFAULT: Self = Self(120);

    /// Creates a step of `ms` milliseconds; zero falls back to the default.
    #[must_use]
    pub const fn from_millis(ms: u32) -> Self {
        if ms == 0 { Self::DEFAULT } else { Self(ms) }
    }

    /// Parses a stagger attribute.
    ///
    /// Only the leading run of digits (after an optional `+`) counts, so
    /// `"150ms"` is 150. Missing digits and zero yield the default.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim_start();
        let text = text.strip_prefix('+').unwrap_or(text);
        let mut ms = 0_u32;
        let mut any = false;
        for b in text.bytes().take_while(u8::is_ascii_digit) {
            any = true;
            ms = ms.saturating_mul(10).saturating_add(u32::from(b - b'0'));
        }
        if any { Self::from_millis(ms) } else { Self::DEFAULT }
    }

    /// Returns the step in milliseconds.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u32 {
        self.0
    }

    /// Delay for the member at `index` (0-based) within its group.
    #[must_use]
    pub fn delay_for(self, index: u32) -> RevealDelay {
        RevealDelay::Millis(index.saturating_mul(self.0))
    }
}

impl Default for StaggerStep {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Group membership declared by a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupRef {
    /// Which group the element belongs to.
    pub key: GroupKey,
    /// The group's stagger step.
    pub step: StaggerStep,
}

/// Hands out group-relative member indices in registration order.
#[derive(Clone, Debug, Default)]
pub struct GroupCounter {
    next: BTreeMap<GroupKey, u32>,
}

impl GroupCounter {
    /// Creates an empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next index for `key` and advances it.
    pub fn next_index(&mut self, key: GroupKey) -> u32 {
        let slot = self.next.entry(key).or_insert(0);
        let idx = *slot;
        *slot += 1;
        idx
    }

    /// Returns how many members `key` has been handed out so far.
    #[must_use]
    pub fn members(&self, key: GroupKey) -> u32 {
        self.next.get(&key).copied().unwrap_or(0)
    }
}

/// Resolves the effective delay for a candidate.
///
/// Advances `counter` for grouped candidates even when an explicit delay
/// wins, so later members keep their document-order slot.
pub fn resolve_delay(
    explicit: Option<&RevealDelay>,
    group: Option<GroupRef>,
    counter: &mut GroupCounter,
) -> Option<RevealDelay> {
    let staggered = group.map(|g| g.step.delay_for(counter.next_index(g.key)));
    explicit.cloned().or(staggered)
}
