// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless intersection tracking.
//!
//! [`HeadlessTracker`] computes intersection from element and viewport
//! rectangles, so the controller can be driven without a browser. It follows
//! the observable behavior of `IntersectionObserver` closely enough for
//! reveal purposes:
//!
//! - The first [`update`](HeadlessTracker::update) after
//!   [`observe`](Tracker::observe) always reports the element's state.
//! - Later updates report only elements whose state changed.
//! - An element counts as intersecting when its visible ratio is non-zero
//!   and at least the threshold.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::config::{RevealConfig, RootMargin, Threshold};
use crate::id::ElementId;
use crate::surface::Tracker;

/// Fraction of `target`'s area that lies inside `root`.
///
/// A zero-area target is fully visible (1.0) when it touches `root` and
/// invisible (0.0) otherwise.
#[must_use]
pub fn intersection_ratio(target: Rect, root: Rect) -> f64 {
    let target = target.abs();
    let root = root.abs();
    let dx = target.x1.min(root.x1) - target.x0.max(root.x0);
    let dy = target.y1.min(root.y1) - target.y0.max(root.y0);
    if dx < 0.0 || dy < 0.0 {
        return 0.0;
    }
    let area = target.area();
    if area <= 0.0 {
        return 1.0;
    }
    (dx * dy / area).min(1.0)
}

/// A [`Tracker`] that derives intersection signals from rectangles.
#[derive(Clone, Debug)]
pub struct HeadlessTracker {
    threshold: Threshold,
    margin: RootMargin,

    // -- Per-element state, indexed by ElementId --
    bounds: Vec<Option<Rect>>,
    tracked: Vec<bool>,
    last: Vec<Option<bool>>,
}

impl HeadlessTracker {
    /// Creates a tracker with an explicit threshold and root margin.
    #[must_use]
    pub fn new(threshold: Threshold, margin: RootMargin) -> Self {
        Self {
            threshold,
            margin,
            bounds: Vec::new(),
            tracked: Vec::new(),
            last: Vec::new(),
        }
    }

    /// Creates a tracker matching a controller's configuration.
    #[must_use]
    pub fn for_config(config: &RevealConfig) -> Self {
        Self::new(config.threshold, config.root_margin)
    }

    /// Sets the page-space bounds of an element.
    ///
    /// Elements without bounds are never reported.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        self.ensure(id);
        self.bounds[id.index() as usize] = Some(bounds);
    }

    /// Returns `true` if the element is currently tracked.
    #[must_use]
    pub fn is_tracking(&self, id: ElementId) -> bool {
        self.tracked.get(id.index() as usize).copied().unwrap_or(false)
    }

    /// Returns how many elements are currently tracked.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.tracked.iter().filter(|&&t| t).count()
    }

    /// Recomputes intersection against `viewport` and returns the signals
    /// to deliver, in handle order.
    pub fn update(&mut self, viewport: Rect) -> Vec<(ElementId, bool)> {
        let root = self.margin.apply(viewport);
        let mut signals = Vec::new();
        for (idx, bounds) in self.bounds.iter().enumerate() {
            let Some(bounds) = *bounds else { continue };
            if !self.tracked[idx] {
                continue;
            }
            let ratio = intersection_ratio(bounds, root);
            let now = ratio > 0.0 && ratio >= self.threshold.get();
            if self.last[idx] != Some(now) {
                self.last[idx] = Some(now);
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "slots are created from u32 handles"
                )]
                signals.push((ElementId::from_index(idx as u32), now));
            }
        }
        signals
    }

    fn ensure(&mut self, id: ElementId) {
        let len = id.index() as usize + 1;
        if self.bounds.len() < len {
            self.bounds.resize(len, None);
            self.tracked.resize(len, false);
            self.last.resize(len, None);
        }
    }
}

impl Tracker for HeadlessTracker {
    fn observe(&mut self, id: ElementId) {
        self.ensure(id);
        let idx = id.index() as usize;
        self.tracked[idx] = true;
        self.last[idx] = None;
    }

    fn unobserve(&mut self, id: ElementId) {
        if let Some(t) = self.tracked.get_mut(id.index() as usize) {
            *t = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReplayPolicy;
    use crate::controller::{Candidate, Capabilities, RevealController, Transition};
    use crate::surface::RecordingSurface;
    use crate::trace::Tracer;
    use alloc::vec;

    fn band(y: f64) -> Rect {
        Rect::new(0.0, y, 300.0, y + 100.0)
    }

    fn viewport(top: f64) -> Rect {
        Rect::new(0.0, top, 1280.0, top + 800.0)
    }

    #[test]
    fn ratio_of_partial_overlap() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(Rect::new(0.0, 80.0, 100.0, 180.0), root), 0.2);
        assert_eq!(intersection_ratio(Rect::new(0.0, 200.0, 100.0, 300.0), root), 0.0);
        assert_eq!(intersection_ratio(Rect::new(10.0, 10.0, 20.0, 20.0), root), 1.0);
    }

    #[test]
    fn ratio_of_degenerate_target() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(Rect::new(50.0, 50.0, 50.0, 50.0), root), 1.0);
        assert_eq!(intersection_ratio(Rect::new(150.0, 0.0, 150.0, 0.0), root), 0.0);
    }

    #[test]
    fn first_update_reports_every_tracked_element() {
        let mut tracker = HeadlessTracker::new(Threshold::DEFAULT, RootMargin::ZERO);
        for (i, y) in [(0, 0.0), (1, 2000.0)] {
            let id = ElementId::from_index(i);
            tracker.set_bounds(id, band(y));
            tracker.observe(id);
        }
        assert_eq!(
            tracker.update(viewport(0.0)),
            [
                (ElementId::from_index(0), true),
                (ElementId::from_index(1), false),
            ]
        );
        assert!(tracker.update(viewport(0.0)).is_empty(), "no change, no signal");
    }

    #[test]
    fn unobserved_elements_are_silent() {
        let mut tracker = HeadlessTracker::new(Threshold::DEFAULT, RootMargin::ZERO);
        let id = ElementId::from_index(0);
        tracker.set_bounds(id, band(0.0));
        tracker.observe(id);
        tracker.unobserve(id);
        assert!(!tracker.is_tracking(id));
        assert!(tracker.update(viewport(0.0)).is_empty());
    }

    #[test]
    fn negative_bottom_margin_delays_entry() {
        let config = RevealConfig::default().with_root_margin("0px 0px -10% 0px");
        let mut tracker = HeadlessTracker::for_config(&config);
        let id = ElementId::from_index(0);
        // Top 50px of the element are inside the viewport, but inside the
        // bottom 10% band that the margin cuts away.
        tracker.set_bounds(id, Rect::new(0.0, 750.0, 300.0, 850.0));
        tracker.observe(id);
        assert_eq!(tracker.update(viewport(0.0)), [(id, false)]);
        assert_eq!(tracker.update(viewport(100.0)), [(id, true)]);
    }

    #[test]
    fn only_the_scrolled_element_reveals_and_then_hides() {
        let config = RevealConfig::default()
            .with_policy(ReplayPolicy::Repeating)
            .with_threshold(0.15);
        let mut surface = RecordingSurface::new();
        let mut tracker = HeadlessTracker::for_config(&config);
        let mut controller = RevealController::init(
            config,
            Capabilities::FULL,
            vec![Candidate::plain(); 3],
            &mut surface,
            &mut tracker,
        );
        let ids: Vec<_> = controller.ids().collect();
        for (id, y) in ids.iter().zip([1000.0, 2000.0, 3000.0]) {
            tracker.set_bounds(*id, band(y));
        }

        let initial = tracker.update(viewport(0.0));
        controller.on_signals(initial, &mut surface, &mut tracker, &mut Tracer::none());
        assert_eq!(controller.presented_count(), 0);

        // Element #2 spans 2000..2100; the viewport ends at 2020 (20% visible).
        let signals = tracker.update(viewport(1220.0));
        assert_eq!(signals, [(ids[1], true)]);
        for (id, on) in signals {
            assert_eq!(
                controller.on_signal(id, on, &mut surface, &mut tracker),
                Transition::Presented
            );
        }
        assert!(!controller.is_presented(ids[0]));
        assert!(controller.is_presented(ids[1]));
        assert!(!controller.is_presented(ids[2]));

        let signals = tracker.update(viewport(3200.0));
        assert_eq!(signals, [(ids[1], false)]);
        controller.on_signals(signals, &mut surface, &mut tracker, &mut Tracer::none());
        assert!(!controller.is_presented(ids[1]));
        assert_eq!(controller.presented_count(), 0);
    }

    #[test]
    fn one_shot_scroll_retires_tracking() {
        let config = RevealConfig::default().with_policy(ReplayPolicy::OneShot);
        let mut surface = RecordingSurface::new();
        let mut tracker = HeadlessTracker::for_config(&config);
        let mut controller = RevealController::init(
            config,
            Capabilities::FULL,
            vec![Candidate::plain()],
            &mut surface,
            &mut tracker,
        );
        let id = ElementId::from_index(0);
        tracker.set_bounds(id, band(0.0));

        let signals = tracker.update(viewport(0.0));
        controller.on_signals(signals, &mut surface, &mut tracker, &mut Tracer::none());
        assert!(controller.is_presented(id));
        assert_eq!(tracker.tracked_count(), 0);

        assert!(tracker.update(viewport(5000.0)).is_empty());
        assert!(controller.is_presented(id));
    }
}
