// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.
//!
//! Every field has a default, and every parser degrades malformed input to
//! that default instead of failing. A page with a typo in its markup still
//! reveals; it just uses the stock values.

use alloc::string::{String, ToString as _};
use core::fmt;

use kurbo::{Insets, Rect};

/// Whether an element hides again when it leaves the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReplayPolicy {
    /// The reveal fires at most once; exit signals are ignored.
    OneShot,
    /// The presented state tracks visibility, replaying on every entry.
    #[default]
    Repeating,
}

/// Fraction of an element that must be visible before it counts as
/// intersecting.
///
/// Always in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// The threshold used when none (or an invalid one) is configured.
    pub const DEFAULT: Self = Self(0.18);

    /// Creates a threshold, returning `None` unless `value` is in `(0, 1]`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value > 0.0 && value <= 1.0).then_some(Self(value))
    }

    /// Creates a threshold, falling back to [`DEFAULT`](Self::DEFAULT) when
    /// `value` is out of range or NaN.
    #[must_use]
    pub fn or_default(value: f64) -> Self {
        Self::new(value).unwrap_or(Self::DEFAULT)
    }

    /// Parses a decimal threshold such as `"0.15"`.
    ///
    /// Unparsable or out-of-range text yields [`DEFAULT`](Self::DEFAULT).
    #[must_use]
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::new)
            .unwrap_or(Self::DEFAULT)
    }

    /// Returns the threshold as a fraction.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One component of a [`RootMargin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginLength {
    /// Absolute length in CSS pixels.
    Px(f64),
    /// Percentage of the root's width (left/right) or height (top/bottom).
    Percent(f64),
}

impl MarginLength {
    fn parse(token: &str) -> Option<Self> {
        if token == "0" {
            return Some(Self::Px(0.0));
        }
        if let Some(num) = token.strip_suffix("px") {
            return num.parse::<f64>().ok().filter(|v| v.is_finite()).map(Self::Px);
        }
        if let Some(num) = token.strip_suffix('%') {
            return num
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Percent);
        }
        None
    }

    fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Grows (positive) or shrinks (negative) the viewport before intersection
/// is computed, using the CSS `margin` shorthand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    /// Top edge.
    pub top: MarginLength,
    /// Right edge.
    pub right: MarginLength,
    /// Bottom edge.
    pub bottom: MarginLength,
    /// Left edge.
    pub left: MarginLength,
}

impl RootMargin {
    /// No margin on any edge.
    pub const ZERO: Self = Self::uniform(MarginLength::Px(0.0));

    /// The same margin on all four edges.
    #[must_use]
    pub const fn uniform(len: MarginLength) -> Self {
        Self {
            top: len,
            right: len,
            bottom: len,
            left: len,
        }
    }

    /// Parses a margin shorthand of one to four components, each `Npx`,
    /// `N%` or a bare `0`.
    ///
    /// Components expand the way CSS `margin` does: one value for all edges,
    /// two for vertical/horizontal, three for top/horizontal/bottom, four for
    /// top/right/bottom/left. Anything else yields [`ZERO`](Self::ZERO).
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut parts = [None; 4];
        let mut count = 0;
        for token in text.split_ascii_whitespace() {
            if count == 4 {
                return Self::ZERO;
            }
            match MarginLength::parse(token) {
                Some(len) => parts[count] = Some(len),
                None => return Self::ZERO,
            }
            count += 1;
        }
        match parts {
            [Some(all), None, None, None] => Self::uniform(all),
            [Some(v), Some(h), None, None] => Self {
                top: v,
                right: h,
                bottom: v,
                left: h,
            },
            [Some(top), Some(h), Some(bottom), None] => Self {
                top,
                right: h,
                bottom,
                left: h,
            },
            [Some(top), Some(right), Some(bottom), Some(left)] => Self {
                top,
                right,
                bottom,
                left,
            },
            _ => Self::ZERO,
        }
    }

    /// Resolves the margin against a root rectangle.
    ///
    /// The returned insets are outward distances: `x0`/`y0` extend the left
    /// and top edges, `x1`/`y1` the right and bottom edges.
    #[must_use]
    pub fn resolve(&self, root: Rect) -> Insets {
        Insets::new(
            self.left.resolve(root.width()),
            self.top.resolve(root.height()),
            self.right.resolve(root.width()),
            self.bottom.resolve(root.height()),
        )
    }

    /// Applies the margin to `root`, returning the effective intersection
    /// root.
    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        let m = self.resolve(root);
        Rect::new(root.x0 - m.x0, root.y0 - m.y0, root.x1 + m.x1, root.y1 + m.y1)
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RootMargin {
    /// Writes the canonical four-component form accepted by
    /// `IntersectionObserver`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Per-instance controller configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Replay policy for elements that do not carry the one-shot marker.
    pub policy: ReplayPolicy,
    /// Visible fraction at which an element counts as intersecting.
    pub threshold: Threshold,
    /// Margin applied to the viewport.
    pub root_margin: RootMargin,
    /// Present everything statically when the user prefers reduced motion.
    pub reduced_motion_fallback: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            policy: ReplayPolicy::Repeating,
            threshold: Threshold::DEFAULT,
            root_margin: RootMargin::ZERO,
            reduced_motion_fallback: true,
        }
    }
}

impl RevealConfig {
    /// Sets the replay policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ReplayPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the threshold, falling back to the default when out of range.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Threshold::or_default(threshold);
        self
    }

    /// Sets the root margin from its shorthand text.
    #[must_use]
    pub fn with_root_margin(mut self, margin: &str) -> Self {
        self.root_margin = RootMargin::parse(margin);
        self
    }

    /// Enables or disables the reduced-motion static fallback.
    #[must_use]
    pub fn with_reduced_motion_fallback(mut self, enabled: bool) -> Self {
        self.reduced_motion_fallback = enabled;
        self
    }
}

/// Markup conventions a backend uses to find and mutate elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    /// Selector matching reveal candidates.
    pub selector: String,
    /// Class that marks a candidate as one-shot.
    pub once_class: String,
    /// Class added while an element is presented.
    pub presented_class: String,
    /// Selector matching staggering containers.
    pub group_selector: String,
    /// Attribute carrying a per-element delay.
    pub delay_attribute: String,
    /// Attribute on a group carrying its stagger step.
    pub stagger_attribute: String,
    /// CSS custom property that receives the computed delay.
    pub delay_property: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            selector: ".reveal-left, .reveal-right, .reveal-up, .reveal-down".to_string(),
            once_class: "reveal-once".to_string(),
            presented_class: "is-visible".to_string(),
            group_selector: ".reveal-group[data-reveal-stagger]".to_string(),
            delay_attribute: "data-reveal-delay".to_string(),
            stagger_attribute: "data-reveal-stagger".to_string(),
            delay_property: "--reveal-delay".to_string(),
        }
    }
}

impl Markers {
    /// Markers for a section that uses its own candidate selector and
    /// presented class, keeping the default attribute names.
    #[must_use]
    pub fn section(selector: &str, presented_class: &str) -> Self {
        Self {
            selector: selector.to_string(),
            presented_class: presented_class.to_string(),
            ..Self::default()
        }
    }

    /// Sets the one-shot marker class.
    #[must_use]
    pub fn with_once_class(mut self, class: &str) -> Self {
        self.once_class = class.to_string();
        self
    }

    /// Sets the group selector.
    #[must_use]
    pub fn with_group_selector(mut self, selector: &str) -> Self {
        self.group_selector = selector.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn threshold_rejects_out_of_range() {
        assert_eq!(Threshold::new(0.0), None);
        assert_eq!(Threshold::new(1.5), None);
        assert_eq!(Threshold::new(f64::NAN), None);
        assert_eq!(Threshold::new(1.0).map(Threshold::get), Some(1.0));
    }

    #[test]
    fn threshold_parse_degrades_to_default() {
        assert_eq!(Threshold::parse(" 0.15 ").get(), 0.15);
        assert_eq!(Threshold::parse("lots"), Threshold::DEFAULT);
        assert_eq!(Threshold::parse("-0.2"), Threshold::DEFAULT);
    }

    #[test]
    fn root_margin_expands_like_css() {
        let m = RootMargin::parse("0px 0px -10% 0px");
        assert_eq!(m.bottom, MarginLength::Percent(-10.0));
        assert_eq!(m.top, MarginLength::Px(0.0));

        let two = RootMargin::parse("5px 10%");
        assert_eq!(two.top, MarginLength::Px(5.0));
        assert_eq!(two.bottom, MarginLength::Px(5.0));
        assert_eq!(two.left, MarginLength::Percent(10.0));
        assert_eq!(two.right, MarginLength::Percent(10.0));

        let three = RootMargin::parse("1px 2px 3px");
        assert_eq!(three.left, MarginLength::Px(2.0));
        assert_eq!(three.bottom, MarginLength::Px(3.0));
    }

    #[test]
    fn root_margin_malformed_is_zero() {
        assert_eq!(RootMargin::parse("10em"), RootMargin::ZERO);
        assert_eq!(RootMargin::parse("1px 2px 3px 4px 5px"), RootMargin::ZERO);
        assert_eq!(RootMargin::parse(""), RootMargin::ZERO);
    }

    #[test]
    fn root_margin_display_is_canonical() {
        let m = RootMargin::parse("0 0 -10% 0");
        assert_eq!(format!("{m}"), "0px 0px -10% 0px");
    }

    #[test]
    fn root_margin_percent_resolves_against_root() {
        let root = Rect::new(0.0, 0.0, 400.0, 1000.0);
        let m = RootMargin::parse("0px 0px -10% 0px");
        let applied = m.apply(root);
        assert_eq!(applied, Rect::new(0.0, 0.0, 400.0, 900.0));

        let insets = RootMargin::parse("10%").resolve(root);
        assert_eq!(insets.x0, 40.0);
        assert_eq!(insets.y0, 100.0);
    }

    #[test]
    fn config_builders_validate() {
        let config = RevealConfig::default()
            .with_policy(ReplayPolicy::OneShot)
            .with_threshold(7.0)
            .with_root_margin("0px 0px -10% 0px");
        assert_eq!(config.policy, ReplayPolicy::OneShot);
        assert_eq!(config.threshold, Threshold::DEFAULT);
        assert_eq!(config.root_margin.bottom, MarginLength::Percent(-10.0));
        assert!(config.reduced_motion_fallback);
    }

    #[test]
    fn section_markers_keep_attribute_names() {
        let m = Markers::section(".reveal-up", "is-visible-mobility");
        assert_eq!(m.presented_class, "is-visible-mobility");
        assert_eq!(m.delay_attribute, "data-reveal-delay");
        assert_eq!(m.delay_property, "--reveal-delay");
    }
}
