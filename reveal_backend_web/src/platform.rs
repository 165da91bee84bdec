// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only capability probes.

use reveal_core::controller::Capabilities;
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Media query matching a reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Queries what the browser can do for the reveal controller.
///
/// Neither probe can fail the caller: a throwing `matchMedia` counts as "no
/// preference" and a missing global counts as "no observer".
#[must_use]
pub fn probe_capabilities(window: &Window) -> Capabilities {
    Capabilities {
        intersection_observer: has_intersection_observer(window),
        prefers_reduced_motion: prefers_reduced_motion(window),
    }
}

/// Returns `true` if `IntersectionObserver` exists on the global object.
#[must_use]
pub fn has_intersection_observer(window: &Window) -> bool {
    let global: &js_sys::Object = window.as_ref();
    js_sys::Reflect::has(global, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Returns `true` if the user asked for reduced motion.
#[must_use]
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|mql| mql.matches())
}
