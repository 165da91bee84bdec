// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for reveal.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`install`]: scan a document and drive a
//!   [`RevealController`](reveal_core::controller::RevealController) from an
//!   `IntersectionObserver`
//! - [`DomSurface`]: class toggling and delay custom property
//! - [`DomTracker`]: `IntersectionObserver` as a
//!   [`Tracker`](reveal_core::surface::Tracker)
//! - [`probe_capabilities`]: `IntersectionObserver` and reduced-motion probes
//! - [`ConsoleSink`]: trace events to `console.debug`

#![no_std]

extern crate alloc;

mod console;
mod observer;
mod platform;
mod scan;
mod surface;

pub use console::ConsoleSink;
pub use observer::{DomTracker, RevealHandle, install, install_traced};
pub use platform::{
    REDUCED_MOTION_QUERY, has_intersection_observer, prefers_reduced_motion, probe_capabilities,
};
pub use reveal_core::surface::{Surface, Tracker};
pub use scan::scan;
pub use surface::DomSurface;
