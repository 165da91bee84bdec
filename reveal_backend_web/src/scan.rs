// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate discovery.
//!
//! Reads the markup conventions in [`Markers`] once at startup and turns each
//! matching element into a [`Candidate`]. Malformed attributes degrade to
//! defaults and an invalid selector yields no candidates.

use alloc::vec::Vec;

use reveal_core::config::Markers;
use reveal_core::controller::Candidate;
use reveal_core::delay::{GroupRef, RevealDelay, StaggerStep};
use reveal_core::id::GroupKey;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, NodeList};

/// Returns every element matching `markers.selector`, in document order,
/// paired with its candidate description.
#[must_use]
pub fn scan(document: &Document, markers: &Markers) -> Vec<(Element, Candidate)> {
    let groups = elements(document.query_selector_all(&markers.group_selector).ok());
    elements(document.query_selector_all(&markers.selector).ok())
        .into_iter()
        .map(|el| {
            let candidate = describe(&el, &groups, markers);
            (el, candidate)
        })
        .collect()
}

fn describe(el: &Element, groups: &[Element], markers: &Markers) -> Candidate {
    let delay = el
        .get_attribute(&markers.delay_attribute)
        .and_then(|d| RevealDelay::parse(&d));
    let one_shot = el.class_list().contains(&markers.once_class);
    let group = enclosing_group(el, groups, markers);
    Candidate {
        delay,
        one_shot,
        group,
    }
}

/// Finds the innermost group container strictly above `el`.
fn enclosing_group(el: &Element, groups: &[Element], markers: &Markers) -> Option<GroupRef> {
    let container = el
        .parent_element()?
        .closest(&markers.group_selector)
        .ok()
        .flatten()?;
    let idx = groups
        .iter()
        .position(|g| js_sys::Object::is(g, &container))?;
    let step = container
        .get_attribute(&markers.stagger_attribute)
        .map(|s| StaggerStep::parse(&s))
        .unwrap_or_default();
    Some(GroupRef {
        key: GroupKey(u32::try_from(idx).ok()?),
        step,
    })
}

fn elements(list: Option<NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
