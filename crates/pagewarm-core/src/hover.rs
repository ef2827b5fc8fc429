//! Hover-intent bridge.
//!
//! A pointer entering an element's bounds is taken as a predictor of
//! imminent action, so each interactive element registers a callback that
//! fires on every pointer-enter. The registry does no networking and applies
//! no dedup of its own: idempotence of the effect belongs to the callback
//! (the preloader's issued-URL set, in practice).

use std::collections::HashMap;

type PredictFn = Box<dyn FnMut()>;

struct Registration {
    epoch: u64,
    on_predict: PredictFn,
}

/// Subscription handle returned by [`HoverRegistry::register`]. Pass it back
/// to [`HoverRegistry::unregister`] when the owning element unmounts so
/// destroyed elements don't keep dangling listeners.
#[derive(Debug)]
#[must_use = "keep the handle and unregister it on unmount"]
pub struct HoverHandle {
    element_id: String,
    epoch: u64,
}

impl HoverHandle {
    pub fn element_id(&self) -> &str {
        &self.element_id
    }
}

/// Registry of element id → prediction callback. Exactly one registration is
/// active per element; registering again replaces the previous callback and
/// invalidates its handle.
#[derive(Default)]
pub struct HoverRegistry {
    handlers: HashMap<String, Registration>,
    next_epoch: u64,
}

impl HoverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `on_predict` to an element, replacing any existing
    /// registration for the same element.
    pub fn register(
        &mut self,
        element_id: impl Into<String>,
        on_predict: impl FnMut() + 'static,
    ) -> HoverHandle {
        let element_id = element_id.into();
        self.next_epoch += 1;
        let epoch = self.next_epoch;
        let previous = self.handlers.insert(
            element_id.clone(),
            Registration {
                epoch,
                on_predict: Box::new(on_predict),
            },
        );
        if previous.is_some() {
            tracing::trace!("hover handler replaced for {element_id}");
        }
        HoverHandle { element_id, epoch }
    }

    /// Remove the registration the handle refers to. A stale handle (its
    /// registration was already replaced) does nothing.
    pub fn unregister(&mut self, handle: HoverHandle) {
        match self.handlers.get(&handle.element_id) {
            Some(r) if r.epoch == handle.epoch => {
                self.handlers.remove(&handle.element_id);
            }
            _ => {}
        }
    }

    pub fn is_registered(&self, element_id: &str) -> bool {
        self.handlers.contains_key(element_id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Deliver a pointer-enter event. Fires the element's callback on first
    /// and every subsequent enter; returns whether a callback ran.
    pub fn pointer_enter(&mut self, element_id: &str) -> bool {
        match self.handlers.get_mut(element_id) {
            Some(registration) => {
                (registration.on_predict)();
                true
            }
            None => false,
        }
    }

    /// Drop all registrations (page unmount). Outstanding handles become
    /// stale.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
