// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` wiring.
//!
//! [`install`] scans the document, probes capabilities, and hands everything
//! to a [`RevealController`]. In observing mode one `IntersectionObserver`
//! is created per call; its callback borrows the shared state and forwards
//! each entry to [`RevealController::on_signal_traced`].
//!
//! The returned [`RevealHandle`] owns the observer and its JS closure.
//! Dropping it disconnects the observer. Pages that want reveals for their
//! whole lifetime call [`RevealHandle::forget`].

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::ToString as _;
use alloc::vec::Vec;
use core::cell::RefCell;

use reveal_core::config::{Markers, RevealConfig};
use reveal_core::controller::{Capabilities, Mode, RevealController, fallback_reason};
use reveal_core::id::ElementId;
use reveal_core::surface::Tracker;
use reveal_core::trace::{TraceSink, Tracer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::platform::probe_capabilities;
use crate::scan::scan;
use crate::surface::DomSurface;

/// A [`Tracker`] backed by an `IntersectionObserver`.
///
/// Holds no observer when the controller runs statically; every call is then
/// a no-op.
pub struct DomTracker {
    observer: Option<IntersectionObserver>,
    elements: Vec<Element>,
}

impl core::fmt::Debug for DomTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomTracker")
            .field("observer", &self.observer.is_some())
            .field("elements_len", &self.elements.len())
            .finish()
    }
}

impl DomTracker {
    /// Creates a tracker over `elements`, indexed like the matching
    /// [`DomSurface`].
    #[must_use]
    pub fn new(observer: Option<IntersectionObserver>, elements: Vec<Element>) -> Self {
        Self { observer, elements }
    }

    /// Stops all observation.
    pub fn disconnect(&self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

impl Tracker for DomTracker {
    fn observe(&mut self, id: ElementId) {
        if let (Some(observer), Some(el)) = (&self.observer, self.elements.get(id.index() as usize))
        {
            observer.observe(el);
        }
    }

    fn unobserve(&mut self, id: ElementId) {
        if let (Some(observer), Some(el)) = (&self.observer, self.elements.get(id.index() as usize))
        {
            observer.unobserve(el);
        }
    }
}

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct State {
    controller: RevealController,
    surface: DomSurface,
    tracker: DomTracker,
}

struct Inner {
    /// Filled once initialization has registered every element.
    state: RefCell<Option<State>>,

    /// The JS closure registered with the observer. Kept alive here; the
    /// closure itself only holds a [`Weak`] back-reference.
    closure: RefCell<Option<ObserverClosure>>,

    /// Optional diagnostics sink.
    sink: RefCell<Option<Box<dyn TraceSink>>>,
}

impl Inner {
    fn dispatch(&self, entries: &js_sys::Array) {
        let mut state = self.state.borrow_mut();
        let Some(State {
            controller,
            surface,
            tracker,
        }) = state.as_mut()
        else {
            return;
        };
        let mut sink = self.sink.borrow_mut();
        let mut tracer = tracer_for(&mut sink);
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if let Some(id) = surface.find(&entry.target()) {
                controller.on_signal_traced(
                    id,
                    entry.is_intersecting(),
                    surface,
                    tracker,
                    &mut tracer,
                );
            }
        }
    }
}

fn tracer_for(sink: &mut Option<Box<dyn TraceSink>>) -> Tracer<'_> {
    match sink.as_deref_mut() {
        Some(s) => Tracer::new(s),
        None => Tracer::none(),
    }
}

/// Keeps one installed controller alive.
pub struct RevealHandle {
    inner: Rc<Inner>,
}

impl RevealHandle {
    /// Returns the controller's mode.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.inner
            .state
            .borrow()
            .as_ref()
            .map(|s| s.controller.mode())
    }

    /// Returns the number of managed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .state
            .borrow()
            .as_ref()
            .map_or(0, |s| s.controller.len())
    }

    /// Returns `true` if no elements matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many elements are currently presented.
    #[must_use]
    pub fn presented_count(&self) -> usize {
        self.inner
            .state
            .borrow()
            .as_ref()
            .map_or(0, |s| s.controller.presented_count())
    }

    /// Keeps the controller running for the rest of the page's lifetime.
    pub fn forget(self) {
        core::mem::forget(self);
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        if let Some(state) = self.inner.state.borrow().as_ref() {
            state.tracker.disconnect();
        }
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RevealHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RevealHandle")
            .field("mode", &self.mode())
            .field("len", &self.len())
            .field("presented", &self.presented_count())
            .finish()
    }
}

/// Scans `window`'s document with `markers` and starts revealing.
///
/// Never fails for lack of elements or capabilities; those degrade to an
/// empty or static controller. Errors come only from the DOM itself (no
/// document, observer construction throwing).
pub fn install(
    window: &Window,
    config: RevealConfig,
    markers: &Markers,
) -> Result<RevealHandle, JsValue> {
    install_with(window, config, markers, None)
}

/// Like [`install`], reporting controller events to `sink`.
pub fn install_traced(
    window: &Window,
    config: RevealConfig,
    markers: &Markers,
    sink: Box<dyn TraceSink>,
) -> Result<RevealHandle, JsValue> {
    install_with(window, config, markers, Some(sink))
}

fn install_with(
    window: &Window,
    config: RevealConfig,
    markers: &Markers,
    sink: Option<Box<dyn TraceSink>>,
) -> Result<RevealHandle, JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let caps = probe_capabilities(window);
    let (elements, candidates): (Vec<_>, Vec<_>) = scan(&document, markers).into_iter().unzip();

    let inner = Rc::new(Inner {
        state: RefCell::new(None),
        closure: RefCell::new(None),
        sink: RefCell::new(sink),
    });

    let observer = if needs_observer(&config, caps, elements.len()) {
        Some(create_observer(&inner, &config)?)
    } else {
        None
    };

    let mut surface = DomSurface::new(markers, elements.clone());
    let mut tracker = DomTracker::new(observer, elements);
    let controller = {
        let mut sink = inner.sink.borrow_mut();
        let mut tracer = tracer_for(&mut sink);
        RevealController::init_traced(
            config,
            caps,
            candidates,
            &mut surface,
            &mut tracker,
            &mut tracer,
        )
    };
    *inner.state.borrow_mut() = Some(State {
        controller,
        surface,
        tracker,
    });

    Ok(RevealHandle { inner })
}

fn needs_observer(config: &RevealConfig, caps: Capabilities, len: usize) -> bool {
    len > 0 && fallback_reason(config, caps).is_none()
}

fn create_observer(
    inner: &Rc<Inner>,
    config: &RevealConfig,
) -> Result<IntersectionObserver, JsValue> {
    let weak: Weak<Inner> = Rc::downgrade(inner);
    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            if let Some(inner) = weak.upgrade() {
                inner.dispatch(&entries);
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold.get()));
    options.set_root_margin(&config.root_margin.to_string());
    let observer =
        IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)?;

    *inner.closure.borrow_mut() = Some(closure);
    Ok(observer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_only_when_observing_and_non_empty() {
        let config = RevealConfig::default();
        assert!(needs_observer(&config, Capabilities::FULL, 3));
        assert!(!needs_observer(&config, Capabilities::FULL, 0));
        assert!(!needs_observer(&config, Capabilities::NONE, 3));

        let reduced = Capabilities {
            intersection_observer: true,
            prefers_reduced_motion: true,
        };
        assert!(!needs_observer(&config, reduced, 3));
        assert!(needs_observer(
            &config.with_reduced_motion_fallback(false),
            reduced,
            3
        ));
    }
}
