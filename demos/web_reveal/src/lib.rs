// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll reveals for the animated sections of the site.
//!
//! Each section keeps its own selector, presented class, threshold and replay
//! policy, so each one gets its own controller. Sections that have no
//! matching elements on the current page install an empty controller and
//! cost nothing.
//!
//! Build with: `wasm-pack build --target web demos/web_reveal`
//! Then load the generated module from the page's `<head>`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use reveal_backend_web::RevealHandle;
use reveal_core::config::{Markers, ReplayPolicy, RevealConfig};
use wasm_bindgen::prelude::*;
use web_sys::Window;

const LV_SERVICES: &str = ".reveal-left-lv-electrical-services, \
                           .reveal-right-lv-electrical-services, \
                           .reveal-up-lv-electrical-services";

/// One animated section of the site.
struct Section {
    label: &'static str,
    markers: Markers,
    config: RevealConfig,
}

fn sections() -> Vec<Section> {
    vec![
        // Shared directional reveals, with groups and per-element delays.
        Section {
            label: "reveal",
            markers: Markers::default(),
            config: RevealConfig::default(),
        },
        Section {
            label: "solar-system",
            markers: Markers::section(".reveal-solar-system", "in-view-solar-system"),
            config: RevealConfig::default().with_threshold(0.15),
        },
        Section {
            label: "generator-services",
            markers: Markers::section(
                ".section-generator-services [data-reveal]",
                "in-view-generator-services",
            ),
            config: RevealConfig::default()
                .with_policy(ReplayPolicy::OneShot)
                .with_threshold(0.15)
                .with_root_margin("0px 0px -10% 0px"),
        },
        Section {
            label: "mobility",
            markers: Markers::section(".reveal-up", "is-visible-mobility"),
            config: RevealConfig::default(),
        },
        Section {
            label: "neplan-cards",
            markers: Markers::section(
                "#grid-neplan-card-with-animation .card-neplan-card-with-animation",
                "show-neplan-card-with-animation",
            ),
            config: RevealConfig::default(),
        },
        Section {
            label: "lv-electrical-panel",
            markers: Markers::section(
                ".reveal-lv-electrical-panel-",
                "reveal-in-lv-electrical-panel-",
            ),
            config: RevealConfig::default()
                .with_policy(ReplayPolicy::OneShot)
                .with_threshold(0.2),
        },
        Section {
            label: "lv-electrical-about",
            markers: Markers::section(
                ".reveal-lv-electrical-about-",
                "reveal-in-lv-electrical-about-",
            ),
            config: RevealConfig::default().with_policy(ReplayPolicy::OneShot),
        },
        // The services cards have two observers on the same class: a
        // one-shot entrance and a bidirectional one that takes over after
        // the page has loaded. Re-entry replays, so the pair behaves as the
        // bidirectional preset once both are installed.
        Section {
            label: "lv-electrical-services-once",
            markers: Markers::section(LV_SERVICES, "reveal-in-lv-electrical-services"),
            config: RevealConfig::default().with_policy(ReplayPolicy::OneShot),
        },
        Section {
            label: "lv-electrical-services",
            markers: Markers::section(LV_SERVICES, "reveal-in-lv-electrical-services"),
            config: RevealConfig::default()
                .with_threshold(0.2)
                .with_root_margin("0px 0px -10% 0px"),
        },
        Section {
            label: "lv-electrical-process",
            markers: Markers::section(
                ".reveal-left-lv-electrical-process, .reveal-right-lv-electrical-process",
                "reveal-in-lv-electrical-process",
            ),
            config: RevealConfig::default().with_policy(ReplayPolicy::OneShot),
        },
        Section {
            label: "le-electrical-why-us",
            markers: Markers::section(
                ".reveal-left-le-electrical-why-us, .reveal-right-le-electrical-why-us, \
                 .reveal-top-le-electrical-why-us, .reveal-bottom-le-electrical-why-us",
                "reveal-in-le-electrical-why-us",
            ),
            config: RevealConfig::default().with_policy(ReplayPolicy::OneShot),
        },
    ]
}

#[cfg(feature = "trace")]
fn install(window: &Window, section: Section) -> Result<RevealHandle, JsValue> {
    use alloc::boxed::Box;

    reveal_backend_web::install_traced(
        window,
        section.config,
        &section.markers,
        Box::new(reveal_backend_web::ConsoleSink::new(section.label)),
    )
}

#[cfg(not(feature = "trace"))]
fn install(window: &Window, section: Section) -> Result<RevealHandle, JsValue> {
    let _ = section.label;
    reveal_backend_web::install(window, section.config, &section.markers)
}

/// Entry point for the web demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    for section in sections() {
        install(&window, section)?.forget();
    }

    Ok(())
}
