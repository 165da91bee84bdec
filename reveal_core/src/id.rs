// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element and group identity types.

use core::fmt;

/// A handle to a watched element in a [`RevealController`].
///
/// Handles are dense slot indices assigned in registration order, which is
/// document order for a selector scan. Elements are never removed, so a
/// handle stays valid for the controller's lifetime.
///
/// [`RevealController`]: crate::controller::RevealController
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Creates a handle from a raw slot index.
    ///
    /// Backends use this to map their own element tables back to the
    /// controller; a handle that was never registered is ignored by every
    /// controller operation.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: u32) -> Self {
        Self(idx)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// Identifies a reveal group (a staggering container).
///
/// Backends assign keys; core only compares them. Members of the same group
/// are numbered in the order they are registered.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey(pub u32);

impl fmt::Debug for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupKey({})", self.0)
    }
}
