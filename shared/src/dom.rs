//! Page abstraction
//!
//! Behaviors never query a document themselves. The composition root resolves
//! element handles once through [`Page`] and hands them over, so a behavior
//! runs the same against the browser DOM or the in-memory page.

use std::fmt;
use std::rc::Rc;

use crate::types::FormEvent;

/// Event callback. Pages are single-threaded, so handlers are `Rc`, not `Arc`.
pub type Handler = Rc<dyn Fn()>;

/// Live event subscription; unsubscribes when dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `release` on teardown
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Keep an arbitrary guard (e.g. a listener object) alive until teardown
    pub fn holding<T: 'static>(guard: T) -> Self {
        Self::new(move || drop(guard))
    }

    /// Unsubscribe now
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Something handlers can subscribe to
pub trait EventSource {
    fn subscribe(&self, event: FormEvent, handler: Handler) -> Subscription;
}

/// A form input (`<input>` of any type)
pub trait InputField: EventSource {
    fn id(&self) -> String;
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// A variety `<select>` whose options carry data attributes
pub trait VarietySelector: EventSource {
    /// Attribute `name` of the currently selected option, if any
    fn selected_option_attribute(&self, name: &str) -> Option<String>;
}

/// A transient notification banner
pub trait Alert {
    fn set_style(&self, property: &str, value: &str);
    /// Detach from the document
    fn remove(&self);
}

/// Element lookup, used once by the composition root
pub trait Page {
    fn input_by_id(&self, id: &str) -> Option<Rc<dyn InputField>>;
    fn select_by_id(&self, id: &str) -> Option<Rc<dyn VarietySelector>>;
    fn alerts(&self, selector: &str) -> Vec<Rc<dyn Alert>>;
    fn inputs_matching(&self, selector: &str) -> Vec<Rc<dyn InputField>>;
}
