// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility-driven reveal state for scroll-triggered entrance effects.
//!
//! `reveal_core` decides *when* an element is presented; styling decides
//! *how*. It is `no_std` compatible (with `alloc`) and keeps per-element
//! state in parallel arrays addressed by dense [`ElementId`](id::ElementId)
//! handles.
//!
//! # Architecture
//!
//! ```text
//!   Backend scan ──► Candidate* ──► RevealController::init()
//!                                       │            │
//!                        Surface::set_delay     Tracker::observe
//!                                                    │
//!   Tracker (IntersectionObserver / HeadlessTracker) │
//!       │                                            │
//!       ▼                                            │
//!   (id, intersecting) ──► RevealController::on_signal()
//!                                │
//!                                ▼
//!                 Surface::present / Surface::revert / Tracker::unobserve
//! ```
//!
//! **[`config`]**: [`RevealConfig`](config::RevealConfig) (policy, threshold,
//! root margin, reduced-motion fallback) and [`Markers`](config::Markers)
//! (selectors, classes, attribute names). Malformed values fall back to
//! defaults.
//!
//! **[`delay`]**: Explicit delays and group staggering, resolved once per
//! element at registration.
//!
//! **[`controller`]**: The reveal state machine and the static fallback
//! used when intersection tracking is unavailable or motion is reduced.
//!
//! **[`surface`]**: The [`Surface`](surface::Surface) and
//! [`Tracker`](surface::Tracker) traits that backends implement.
//!
//! **[`visibility`]**: Rectangle-based intersection for headless hosts.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod delay;
pub mod id;
pub mod surface;
pub mod trace;
pub mod visibility;
