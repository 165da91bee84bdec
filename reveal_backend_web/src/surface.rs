// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! [`DomSurface`] maps [`ElementId`] slots to live DOM elements and applies
//! presentation state by toggling a class. The only other write is the
//! entrance delay, stored in a CSS custom property so the stylesheet can feed
//! it to `transition-delay`.

use alloc::string::String;
use alloc::vec::Vec;

use reveal_core::config::Markers;
use reveal_core::delay::RevealDelay;
use reveal_core::id::ElementId;
use reveal_core::surface::Surface;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Element, HtmlElement};

/// Applies reveal state to DOM elements.
///
/// Slots are filled in registration order, so slot `n` holds the element
/// registered as `ElementId(n)`. A JS `Map` keyed by element identity maps
/// observer entries back to their slot.
pub struct DomSurface {
    elements: Vec<Element>,
    slots: js_sys::Map,
    presented_class: String,
    delay_property: String,
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("elements_len", &self.elements.len())
            .field("presented_class", &self.presented_class)
            .field("delay_property", &self.delay_property)
            .finish()
    }
}

impl DomSurface {
    /// Creates a surface over `elements`, using the class and property names
    /// from `markers`.
    #[must_use]
    pub fn new(markers: &Markers, elements: Vec<Element>) -> Self {
        let slots = js_sys::Map::new();
        for (idx, el) in (0_u32..).zip(&elements) {
            slots.set(el.as_ref(), &JsValue::from(idx));
        }
        Self {
            elements,
            slots,
            presented_class: markers.presented_class.clone(),
            delay_property: markers.delay_property.clone(),
        }
    }

    /// Returns the DOM element for the given handle, if it exists.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index() as usize)
    }

    /// Finds the handle of a DOM element by identity.
    #[must_use]
    pub fn find(&self, target: &Element) -> Option<ElementId> {
        let slot = self.slots.get(target.as_ref()).as_f64()?;
        slot_id(slot, self.elements.len())
    }

    /// Returns the number of managed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no elements are managed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Validates a slot number read back from the JS side.
fn slot_id(slot: f64, len: usize) -> Option<ElementId> {
    if !(0.0..=f64::from(u32::MAX)).contains(&slot) {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "range checked above; fractions are rejected below"
    )]
    let idx = slot as u32;
    (f64::from(idx) == slot && (idx as usize) < len).then_some(ElementId::from_index(idx))
}

impl Surface for DomSurface {
    fn present(&mut self, id: ElementId) {
        if let Some(el) = self.element(id) {
            let _ = el.class_list().add_1(&self.presented_class);
        }
    }

    fn revert(&mut self, id: ElementId) {
        if let Some(el) = self.element(id) {
            let _ = el.class_list().remove_1(&self.presented_class);
        }
    }

    fn set_delay(&mut self, id: ElementId, delay: &RevealDelay) {
        if let Some(el) = self.element(id).and_then(|el| el.dyn_ref::<HtmlElement>()) {
            let _ = el
                .style()
                .set_property(&self.delay_property, &delay.to_css());
        }
    }
}
