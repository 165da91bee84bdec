// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visibility-driven reveal controller.
//!
//! [`RevealController`] owns per-element state in parallel arrays indexed by
//! [`ElementId`]. It is constructed once per selector group, registers every
//! candidate with a [`Tracker`], and turns intersection signals into
//! [`Surface`] calls according to each element's [`ReplayPolicy`].
//!
//! ```text
//!   candidates ──► init() ──► set_delay / observe      (Mode::Observing)
//!                        └──► set_delay / present      (Mode::Static)
//!
//!   signal(id, intersecting) ──► on_signal() ──► present / revert / unobserve
//! ```
//!
//! The presented state of an element is a function of the latest signal
//! only. Presenting is idempotent: a second "intersecting" signal never calls
//! [`Surface::present`] again. One-shot elements are unobserved right after
//! their first presentation, so they can never be reverted.

use alloc::vec::Vec;

use crate::config::{ReplayPolicy, RevealConfig};
use crate::delay::{GroupCounter, GroupRef, RevealDelay, resolve_delay};
use crate::id::ElementId;
use crate::surface::{Surface, Tracker};
use crate::trace::{InitEvent, RegisterEvent, Tracer, TransitionEvent, UnobserveEvent};

/// A reveal-eligible element as discovered by a backend scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Candidate {
    /// Explicit entrance delay, if the element declares one.
    pub delay: Option<RevealDelay>,
    /// Whether the element carries the one-shot marker.
    pub one_shot: bool,
    /// The reveal group the element belongs to, if any.
    pub group: Option<GroupRef>,
}

impl Candidate {
    /// A candidate with no delay, no marker and no group.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Sets the explicit delay.
    #[must_use]
    pub fn with_delay(mut self, delay: RevealDelay) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Marks the candidate as one-shot.
    #[must_use]
    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }

    /// Places the candidate in a group.
    #[must_use]
    pub fn in_group(mut self, group: GroupRef) -> Self {
        self.group = Some(group);
        self
    }
}

/// Platform capabilities, queried read-only by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// The platform can report viewport intersection.
    pub intersection_observer: bool,
    /// The user asked for reduced motion.
    pub prefers_reduced_motion: bool,
}

impl Capabilities {
    /// Intersection tracking available, no reduced-motion preference.
    pub const FULL: Self = Self {
        intersection_observer: true,
        prefers_reduced_motion: false,
    };

    /// No intersection tracking at all.
    pub const NONE: Self = Self {
        intersection_observer: false,
        prefers_reduced_motion: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::FULL
    }
}

/// How a controller drives its elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Everything was presented at registration; no signals are processed.
    Static,
    /// Elements are tracked and follow intersection signals.
    Observing,
}

/// Why a controller fell back to [`Mode::Static`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// The platform cannot report intersection.
    NoIntersectionObserver,
    /// The user prefers reduced motion and the fallback is enabled.
    ReducedMotion,
}

/// Returns the reason a controller with `config` must run statically on a
/// platform with `caps`, or `None` if it can observe.
#[must_use]
pub fn fallback_reason(config: &RevealConfig, caps: Capabilities) -> Option<FallbackReason> {
    if !caps.intersection_observer {
        Some(FallbackReason::NoIntersectionObserver)
    } else if caps.prefers_reduced_motion && config.reduced_motion_fallback {
        Some(FallbackReason::ReducedMotion)
    } else {
        None
    }
}

/// What [`RevealController::on_signal`] did with a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The element became presented.
    Presented,
    /// The element reverted to hidden.
    Hidden,
    /// The signal matched the current state (or a one-shot exit).
    Unchanged,
    /// The element is unknown, unobserved, or the controller is static.
    Ignored,
}

/// Owns the reveal state of one selector group.
#[derive(Debug)]
pub struct RevealController {
    config: RevealConfig,
    mode: Mode,

    // -- Per-element state, indexed by ElementId --
    policy: Vec<ReplayPolicy>,
    delay: Vec<Option<RevealDelay>>,
    presented: Vec<bool>,
    observed: Vec<bool>,

    groups: GroupCounter,
}

impl RevealController {
    /// Creates an empty controller.
    ///
    /// The mode is decided from `caps` up front so that elements registered
    /// later take the same path as those passed to [`init`](Self::init).
    #[must_use]
    pub fn new(config: RevealConfig, caps: Capabilities) -> Self {
        let mode = match fallback_reason(&config, caps) {
            Some(_) => Mode::Static,
            None => Mode::Observing,
        };
        Self {
            config,
            mode,
            policy: Vec::new(),
            delay: Vec::new(),
            presented: Vec::new(),
            observed: Vec::new(),
            groups: GroupCounter::new(),
        }
    }

    /// Creates a controller and registers every candidate in order.
    pub fn init(
        config: RevealConfig,
        caps: Capabilities,
        candidates: impl IntoIterator<Item = Candidate>,
        surface: &mut dyn Surface,
        tracker: &mut dyn Tracker,
    ) -> Self {
        Self::init_traced(config, caps, candidates, surface, tracker, &mut Tracer::none())
    }

    /// Like [`init`](Self::init), reporting to `tracer`.
    pub fn init_traced(
        config: RevealConfig,
        caps: Capabilities,
        candidates: impl IntoIterator<Item = Candidate>,
        surface: &mut dyn Surface,
        tracker: &mut dyn Tracker,
        tracer: &mut Tracer<'_>,
    ) -> Self {
        let fallback = fallback_reason(&config, caps);
        let mut controller = Self::new(config, caps);
        for candidate in candidates {
            controller.register_traced(candidate, surface, tracker, tracer);
        }
        tracer.init(&InitEvent {
            candidates: u32::try_from(controller.len()).unwrap_or(u32::MAX),
            mode: controller.mode,
            fallback,
        });
        controller
    }

    /// Registers one candidate and returns its handle.
    ///
    /// The delay is written once here. In [`Mode::Static`] the element is
    /// presented immediately and never observed.
    pub fn register(
        &mut self,
        candidate: Candidate,
        surface: &mut dyn Surface,
        tracker: &mut dyn Tracker,
    ) -> ElementId {
        self.register_traced(candidate, surface, tracker, &mut Tracer::none())
    }

    /// Like [`register`](Self::register), reporting to `tracer`.
    pub fn register_traced(
        &mut self,
        candidate: Candidate,
        surface: &mut dyn Surface,
        tracker: &mut dyn Tracker,
        tracer: &mut Tracer<'_>,
    ) -> ElementId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "more than u32::MAX elements on a page is not a real case"
        )]
        let id = ElementId(self.policy.len() as u32);

        let policy = if candidate.one_shot {
            ReplayPolicy::OneShot
        } else {
            self.config.policy
        };
        let delay = resolve_delay(candidate.delay.as_ref(), candidate.group, &mut self.groups);

        if let Some(d) = &delay {
            surface.set_delay(id, d);
        }
        tracer.register(&RegisterEvent {
            id,
            policy,
            delay: delay.as_ref(),
        });

        let observing = self.mode == Mode::Observing;
        self.policy.push(policy);
        self.delay.push(delay);
        self.presented.push(!observing);
        self.observed.push(observing);

        if observing {
            tracker.observe(id);
        } else {
            surface.present(id);
        }
        id
    }

    /// Handles one intersection signal.
    pub fn on_signal(
        &mut self,
        id: ElementId,
        intersecting: bool,
        surface: &mut dyn Surface,
        tracker: &mut dyn Tracker,
    ) -> Transition {
        self.on_signal_traced(id, intersecting, surface, tracker, &mut Tracer::none())
    }

    /// Like [`on_signal`](Self::on_signal), reporting to `tracer`.
    pub fn on_signal_traced(
        &mut self,
        id: ElementId,
        intersecting: bool,
        surface: &mut dyn Surface,
        tracker: &mut dyn Tracker,
        tracer: &mut Tracer<'_>,
    ) -> Transition {
        let transition = self.apply_signal(id, intersecting, surface, tracker, tracer);
        tracer.transition(&TransitionEvent {
            id,
            intersecting,
            transition,
        });
        transition
    }

    /// Handles a batch of signals in delivery order.
    pub fn on_signals(
        &mut self,
        signals: impl IntoIterator<Item = (ElementId, bool)>,
        surface: &mut dyn Surface,
        tracker: &mut dyn Tracker,
        tracer: &mut Tracer<'_>,
    ) {
        for (id, intersecting) in signals {
            self.on_signal_traced(id, intersecting, surface, tracker, tracer);
        }
    }

    fn apply_signal(
        &mut self,
        id: ElementId,
        intersecting: bool,
        surface: &mut dyn Surface,
        tracker: &mut dyn Tracker,
        tracer: &mut Tracer<'_>,
    ) -> Transition {
        let idx = id.0 as usize;
        if self.mode == Mode::Static || !self.observed.get(idx).copied().unwrap_or(false) {
            return Transition::Ignored;
        }

        if intersecting {
            if self.presented[idx] {
                return Transition::Unchanged;
            }
            self.presented[idx] = true;
            surface.present(id);
            if self.policy[idx] == ReplayPolicy::OneShot {
                self.observed[idx] = false;
                tracker.unobserve(id);
                tracer.unobserve(&UnobserveEvent { id });
            }
            return Transition::Presented;
        }

        match self.policy[idx] {
            ReplayPolicy::Repeating if self.presented[idx] => {
                self.presented[idx] = false;
                surface.revert(id);
                Transition::Hidden
            }
            _ => Transition::Unchanged,
        }
    }

    /// Returns the controller's configuration.
    #[must_use]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Returns the controller's mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policy.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policy.is_empty()
    }

    /// Returns `true` if the element is currently presented.
    #[must_use]
    pub fn is_presented(&self, id: ElementId) -> bool {
        self.presented.get(id.0 as usize).copied().unwrap_or(false)
    }

    /// Returns `true` if the element is still receiving signals.
    #[must_use]
    pub fn is_observed(&self, id: ElementId) -> bool {
        self.observed.get(id.0 as usize).copied().unwrap_or(false)
    }

    /// Returns the element's effective replay policy.
    #[must_use]
    pub fn policy(&self, id: ElementId) -> Option<ReplayPolicy> {
        self.policy.get(id.0 as usize).copied()
    }

    /// Returns the element's effective entrance delay.
    #[must_use]
    pub fn delay(&self, id: ElementId) -> Option<&RevealDelay> {
        self.delay.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Returns how many elements are currently presented.
    #[must_use]
    pub fn presented_count(&self) -> usize {
        self.presented.iter().filter(|&&p| p).count()
    }

    /// Iterates over all registered handles in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..u32::try_from(self.policy.len()).unwrap_or(u32::MAX)).map(ElementId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::StaggerStep;
    use crate::id::GroupKey;
    use crate::surface::{RecordingSurface, SurfaceCall};
    use alloc::collections::BTreeSet;
    use alloc::vec;

    #[derive(Default)]
    struct SetTracker {
        observed: BTreeSet<ElementId>,
        unobserved: Vec<ElementId>,
    }

    impl Tracker for SetTracker {
        fn observe(&mut self, id: ElementId) {
            self.observed.insert(id);
        }

        fn unobserve(&mut self, id: ElementId) {
            self.observed.remove(&id);
            self.unobserved.push(id);
        }
    }

    fn setup(
        config: RevealConfig,
        caps: Capabilities,
        candidates: Vec<Candidate>,
    ) -> (RevealController, RecordingSurface, SetTracker) {
        let mut surface = RecordingSurface::new();
        let mut tracker = SetTracker::default();
        let controller =
            RevealController::init(config, caps, candidates, &mut surface, &mut tracker);
        (controller, surface, tracker)
    }

    #[test]
    fn repeating_state_follows_latest_signal() {
        let (mut c, mut s, mut t) = setup(
            RevealConfig::default(),
            Capabilities::FULL,
            vec![Candidate::plain()],
        );
        let id = ElementId(0);
        assert!(!c.is_presented(id));

        assert_eq!(c.on_signal(id, true, &mut s, &mut t), Transition::Presented);
        assert!(c.is_presented(id));
        assert_eq!(c.on_signal(id, false, &mut s, &mut t), Transition::Hidden);
        assert!(!c.is_presented(id));
        assert_eq!(c.on_signal(id, true, &mut s, &mut t), Transition::Presented);
        assert!(c.is_presented(id));
        assert!(c.is_observed(id));
        assert_eq!(
            s.calls(),
            [
                SurfaceCall::Present(id),
                SurfaceCall::Revert(id),
                SurfaceCall::Present(id),
            ]
        );
    }

    #[test]
    fn presenting_twice_is_a_no_op() {
        let (mut c, mut s, mut t) = setup(
            RevealConfig::default(),
            Capabilities::FULL,
            vec![Candidate::plain()],
        );
        let id = ElementId(0);
        c.on_signal(id, true, &mut s, &mut t);
        assert_eq!(c.on_signal(id, true, &mut s, &mut t), Transition::Unchanged);
        assert_eq!(s.calls().len(), 1, "second present must not touch the surface");
    }

    #[test]
    fn hiding_a_hidden_element_is_a_no_op() {
        let (mut c, mut s, mut t) = setup(
            RevealConfig::default(),
            Capabilities::FULL,
            vec![Candidate::plain()],
        );
        assert_eq!(
            c.on_signal(ElementId(0), false, &mut s, &mut t),
            Transition::Unchanged
        );
        assert!(s.calls().is_empty(), "no revert for an element never shown");
    }

    #[test]
    fn one_shot_stays_presented_and_is_unobserved() {
        let (mut c, mut s, mut t) = setup(
            RevealConfig::default().with_policy(ReplayPolicy::OneShot),
            Capabilities::FULL,
            vec![Candidate::plain()],
        );
        let id = ElementId(0);

        // An initial "not intersecting" report must not retire the element.
        assert_eq!(c.on_signal(id, false, &mut s, &mut t), Transition::Unchanged);
        assert!(c.is_observed(id));

        assert_eq!(c.on_signal(id, true, &mut s, &mut t), Transition::Presented);
        assert!(!c.is_observed(id));
        assert_eq!(t.unobserved, [id]);
        assert!(!t.observed.contains(&id));

        assert_eq!(c.on_signal(id, false, &mut s, &mut t), Transition::Ignored);
        assert_eq!(c.on_signal(id, true, &mut s, &mut t), Transition::Ignored);
        assert!(c.is_presented(id));
        assert_eq!(s.calls(), [SurfaceCall::Present(id)]);
    }

    #[test]
    fn once_marker_overrides_repeating_config() {
        let (mut c, mut s, mut t) = setup(
            RevealConfig::default(),
            Capabilities::FULL,
            vec![Candidate::plain(), Candidate::plain().one_shot()],
        );
        assert_eq!(c.policy(ElementId(0)), Some(ReplayPolicy::Repeating));
        assert_eq!(c.policy(ElementId(1)), Some(ReplayPolicy::OneShot));

        for id in c.ids().collect::<Vec<_>>() {
            c.on_signal(id, true, &mut s, &mut t);
            c.on_signal(id, false, &mut s, &mut t);
        }
        assert!(!c.is_presented(ElementId(0)));
        assert!(c.is_presented(ElementId(1)));
    }

    #[test]
    fn missing_capability_presents_everything_statically() {
        let (mut c, mut s, mut t) = setup(
            RevealConfig::default(),
            Capabilities::NONE,
            vec![Candidate::plain(); 3],
        );
        assert_eq!(c.mode(), Mode::Static);
        assert_eq!(c.presented_count(), 3);
        assert!(t.observed.is_empty(), "static fallback observes nothing");

        let before = s.calls().len();
        assert_eq!(
            c.on_signal(ElementId(1), false, &mut s, &mut t),
            Transition::Ignored
        );
        assert!(c.is_presented(ElementId(1)));
        assert_eq!(s.calls().len(), before);
    }

    #[test]
    fn reduced_motion_respects_fallback_flag() {
        let caps = Capabilities {
            intersection_observer: true,
            prefers_reduced_motion: true,
        };
        let on = RevealConfig::default();
        let off = RevealConfig::default().with_reduced_motion_fallback(false);
        assert_eq!(
            fallback_reason(&on, caps),
            Some(FallbackReason::ReducedMotion)
        );
        assert_eq!(fallback_reason(&off, caps), None);

        let (c, _, t) = setup(off, caps, vec![Candidate::plain()]);
        assert_eq!(c.mode(), Mode::Observing);
        assert_eq!(t.observed.len(), 1);
    }

    #[test]
    fn no_candidates_is_fine() {
        let (c, s, t) = setup(RevealConfig::default(), Capabilities::FULL, Vec::new());
        assert!(c.is_empty());
        assert!(s.calls().is_empty());
        assert!(t.observed.is_empty());
    }

    #[test]
    fn group_delays_are_assigned_at_registration() {
        let group = GroupRef {
            key: GroupKey(0),
            step: StaggerStep::from_millis(120),
        };
        let candidates = vec![
            Candidate::plain().in_group(group),
            Candidate::plain()
                .in_group(group)
                .with_delay(RevealDelay::Millis(50)),
            Candidate::plain().in_group(group),
            Candidate::plain(),
        ];
        let (c, s, _) = setup(RevealConfig::default(), Capabilities::FULL, candidates);

        assert_eq!(c.delay(ElementId(0)), Some(&RevealDelay::Millis(0)));
        assert_eq!(c.delay(ElementId(1)), Some(&RevealDelay::Millis(50)));
        assert_eq!(c.delay(ElementId(2)), Some(&RevealDelay::Millis(240)));
        assert_eq!(c.delay(ElementId(3)), None);

        let delay_calls = s
            .calls()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::SetDelay(..)))
            .count();
        assert_eq!(delay_calls, 3, "ungrouped element without delay gets none");
    }

    #[test]
    fn unknown_handle_is_ignored() {
        let (mut c, mut s, mut t) = setup(
            RevealConfig::default(),
            Capabilities::FULL,
            vec![Candidate::plain()],
        );
        assert_eq!(
            c.on_signal(ElementId::from_index(9), true, &mut s, &mut t),
            Transition::Ignored
        );
        assert!(!c.is_presented(ElementId(9)));
        assert_eq!(c.policy(ElementId(9)), None);
    }

    #[test]
    fn batches_apply_in_order() {
        let (mut c, mut s, mut t) = setup(
            RevealConfig::default(),
            Capabilities::FULL,
            vec![Candidate::plain(); 2],
        );
        c.on_signals(
            [
                (ElementId(0), true),
                (ElementId(1), true),
                (ElementId(0), false),
            ],
            &mut s,
            &mut t,
            &mut Tracer::none(),
        );
        assert!(!c.is_presented(ElementId(0)));
        assert!(c.is_presented(ElementId(1)));
        assert_eq!(c.presented_count(), 1);
    }
}
