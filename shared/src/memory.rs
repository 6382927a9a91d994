//! In-memory page
//!
//! A small stand-in for a document, used by tests and by hosts without a DOM.
//! Setting a value through [`InputField::set_value`] does not fire events,
//! matching a script assigning `input.value`; [`MemoryInput::type_value`] and
//! [`MemorySelect::select`] simulate the user and do fire them.
//!
//! Selector support is limited to what the farm templates use: `.class` for
//! alerts and `input[type="..."]` (or plain `input`) for inputs.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::dom::{Alert, EventSource, Handler, InputField, Page, Subscription, VarietySelector};
use crate::enhancer::TotalSink;
use crate::types::FormEvent;

// ============================================================================
// Listeners
// ============================================================================

#[derive(Default)]
struct Listeners {
    next_key: Cell<u64>,
    entries: RefCell<Vec<(u64, FormEvent, Handler)>>,
}

impl Listeners {
    fn subscribe(this: &Rc<Self>, event: FormEvent, handler: Handler) -> Subscription {
        let key = this.next_key.get();
        this.next_key.set(key + 1);
        this.entries.borrow_mut().push((key, event, handler));

        let listeners: Weak<Self> = Rc::downgrade(this);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.entries.borrow_mut().retain(|(k, _, _)| *k != key);
            }
        })
    }

    fn dispatch(&self, event: FormEvent) {
        let handlers: Vec<Handler> = self
            .entries
            .borrow()
            .iter()
            .filter(|(_, e, _)| *e == event)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }

    fn count(&self) -> usize {
        self.entries.borrow().len()
    }
}

// ============================================================================
// Elements
// ============================================================================

/// An `<input>` element
pub struct MemoryInput {
    id: String,
    input_type: String,
    value: RefCell<String>,
    listeners: Rc<Listeners>,
}

impl MemoryInput {
    pub fn new(id: impl Into<String>, input_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            input_type: input_type.into(),
            value: RefCell::new(value.into()),
            listeners: Rc::new(Listeners::default()),
        }
    }

    pub fn input_type(&self) -> &str {
        &self.input_type
    }

    /// Set the value and fire `input`, like a user typing
    pub fn type_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
        self.listeners.dispatch(FormEvent::Input);
    }

    /// Fire `event` without changing the value
    pub fn dispatch(&self, event: FormEvent) {
        self.listeners.dispatch(event);
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.listeners.count()
    }
}

impl EventSource for MemoryInput {
    fn subscribe(&self, event: FormEvent, handler: Handler) -> Subscription {
        Listeners::subscribe(&self.listeners, event, handler)
    }
}

impl InputField for MemoryInput {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }
}

/// A `<select>` element; the first option starts selected
pub struct MemorySelect {
    id: String,
    options: RefCell<Vec<BTreeMap<String, String>>>,
    selected: Cell<usize>,
    listeners: Rc<Listeners>,
}

impl MemorySelect {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: RefCell::new(Vec::new()),
            selected: Cell::new(0),
            listeners: Rc::new(Listeners::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append an option with the given attributes, returns its index
    pub fn add_option(&self, attributes: &[(&str, &str)]) -> usize {
        let option = attributes
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let mut options = self.options.borrow_mut();
        options.push(option);
        options.len() - 1
    }

    /// Select option `index` and fire `change`, like a user picking it
    pub fn select(&self, index: usize) {
        self.selected.set(index);
        self.listeners.dispatch(FormEvent::Change);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.count()
    }
}

impl EventSource for MemorySelect {
    fn subscribe(&self, event: FormEvent, handler: Handler) -> Subscription {
        Listeners::subscribe(&self.listeners, event, handler)
    }
}

impl VarietySelector for MemorySelect {
    fn selected_option_attribute(&self, name: &str) -> Option<String> {
        self.options
            .borrow()
            .get(self.selected.get())
            .and_then(|option| option.get(name).cloned())
    }
}

/// A notification banner
pub struct MemoryAlert {
    class: String,
    styles: RefCell<BTreeMap<String, String>>,
    attached: Cell<bool>,
}

impl MemoryAlert {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            styles: RefCell::new(BTreeMap::new()),
            attached: Cell::new(true),
        }
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

impl Alert for MemoryAlert {
    fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn remove(&self) {
        self.attached.set(false);
    }
}

// ============================================================================
// Page
// ============================================================================

/// A document holding inputs, selects and alerts
#[derive(Default)]
pub struct MemoryPage {
    inputs: RefCell<Vec<Rc<MemoryInput>>>,
    selects: RefCell<Vec<Rc<MemorySelect>>>,
    alerts: RefCell<Vec<Rc<MemoryAlert>>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(&self, id: &str, input_type: &str, value: &str) -> Rc<MemoryInput> {
        let input = Rc::new(MemoryInput::new(id, input_type, value));
        self.inputs.borrow_mut().push(input.clone());
        input
    }

    pub fn add_select(&self, id: &str) -> Rc<MemorySelect> {
        let select = Rc::new(MemorySelect::new(id));
        self.selects.borrow_mut().push(select.clone());
        select
    }

    pub fn add_alert(&self, class: &str) -> Rc<MemoryAlert> {
        let alert = Rc::new(MemoryAlert::new(class));
        self.alerts.borrow_mut().push(alert.clone());
        alert
    }

    /// Alerts still attached to the page
    pub fn attached_alerts(&self) -> usize {
        self.alerts
            .borrow()
            .iter()
            .filter(|alert| alert.is_attached())
            .count()
    }
}

impl Page for MemoryPage {
    fn input_by_id(&self, id: &str) -> Option<Rc<dyn InputField>> {
        self.inputs
            .borrow()
            .iter()
            .find(|input| input.id == id)
            .map(|input| input.clone() as Rc<dyn InputField>)
    }

    fn select_by_id(&self, id: &str) -> Option<Rc<dyn VarietySelector>> {
        self.selects
            .borrow()
            .iter()
            .find(|select| select.id == id)
            .map(|select| select.clone() as Rc<dyn VarietySelector>)
    }

    fn alerts(&self, selector: &str) -> Vec<Rc<dyn Alert>> {
        let Some(class) = selector.strip_prefix('.') else {
            return Vec::new();
        };
        self.alerts
            .borrow()
            .iter()
            .filter(|alert| alert.is_attached() && alert.class == class)
            .map(|alert| alert.clone() as Rc<dyn Alert>)
            .collect()
    }

    fn inputs_matching(&self, selector: &str) -> Vec<Rc<dyn InputField>> {
        let wanted_type = match selector.trim() {
            "input" => None,
            other => match input_type_selector(other) {
                Some(input_type) => Some(input_type),
                None => return Vec::new(),
            },
        };
        self.inputs
            .borrow()
            .iter()
            .filter(|input| wanted_type.map_or(true, |t| input.input_type == t))
            .map(|input| input.clone() as Rc<dyn InputField>)
            .collect()
    }
}

/// Extract `date` from `input[type="date"]`
fn input_type_selector(selector: &str) -> Option<&str> {
    let inner = selector.strip_prefix("input[type=")?.strip_suffix(']')?;
    Some(inner.trim_matches(|c| c == '"' || c == '\''))
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Total sink that keeps every total it receives
#[derive(Debug, Default)]
pub struct RecordingTotalSink {
    totals: RefCell<Vec<f64>>,
}

impl RecordingTotalSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self) -> Vec<f64> {
        self.totals.borrow().clone()
    }

    pub fn last(&self) -> Option<f64> {
        self.totals.borrow().last().copied()
    }
}

impl TotalSink for RecordingTotalSink {
    fn record_total(&self, total: f64) {
        self.totals.borrow_mut().push(total);
    }
}
