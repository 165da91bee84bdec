// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side-effect seams between the controller and its host.
//!
//! The controller never touches a rendering surface directly. It calls into
//! two small traits:
//!
//! - [`Surface`] applies or reverts the presented visual state and writes the
//!   computed entrance delay. The DOM backend toggles a class and sets a CSS
//!   custom property; tests record the calls.
//!
//! - [`Tracker`] starts and stops intersection tracking for an element. The
//!   DOM backend wraps `IntersectionObserver`;
//!   [`HeadlessTracker`](crate::visibility::HeadlessTracker) computes
//!   intersection from rectangles.

use alloc::vec::Vec;

use crate::delay::RevealDelay;
use crate::id::ElementId;

/// Applies presentation state to a host element.
pub trait Surface {
    /// Puts the element in its presented state.
    fn present(&mut self, id: ElementId);

    /// Reverts the element to its pre-presentation state.
    fn revert(&mut self, id: ElementId);

    /// Writes the element's entrance delay.
    fn set_delay(&mut self, id: ElementId, delay: &RevealDelay);
}

/// Starts and stops intersection tracking for host elements.
pub trait Tracker {
    /// Begins delivering intersection signals for the element.
    fn observe(&mut self, id: ElementId);

    /// Stops delivering intersection signals for the element.
    fn unobserve(&mut self, id: ElementId);
}

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCall {
    /// [`Surface::present`].
    Present(ElementId),
    /// [`Surface::revert`].
    Revert(ElementId),
    /// [`Surface::set_delay`].
    SetDelay(ElementId, RevealDelay),
}

/// A [`Surface`] that records every call, for tests and headless hosts.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Returns and clears the recorded calls.
    pub fn take(&mut self) -> Vec<SurfaceCall> {
        core::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn present(&mut self, id: ElementId) {
        self.calls.push(SurfaceCall::Present(id));
    }

    fn revert(&mut self, id: ElementId) {
        self.calls.push(SurfaceCall::Revert(id));
    }

    fn set_delay(&mut self, id: ElementId, delay: &RevealDelay) {
        self.calls.push(SurfaceCall::SetDelay(id, delay.clone()));
    }
}
