//! Browser implementations of the page traits

use std::rc::Rc;

use gloo::events::EventListener;
use shared::dom::{Alert, EventSource, Handler, InputField, Page, Subscription, VarietySelector};
use shared::FormEvent;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement, Node};

/// The live document
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn query_all(&self, selector: &str) -> Vec<Node> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length()).filter_map(|i| list.item(i)).collect(),
            Err(e) => {
                tracing::debug!("Selector {:?} rejected: {:?}", selector, e);
                Vec::new()
            }
        }
    }
}

impl Page for DomPage {
    fn input_by_id(&self, id: &str) -> Option<Rc<dyn InputField>> {
        let input = self
            .document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        Some(Rc::new(DomInput(input)))
    }

    fn select_by_id(&self, id: &str) -> Option<Rc<dyn VarietySelector>> {
        let select = self
            .document
            .get_element_by_id(id)?
            .dyn_into::<HtmlSelectElement>()
            .ok()?;
        Some(Rc::new(DomSelect(select)))
    }

    fn alerts(&self, selector: &str) -> Vec<Rc<dyn Alert>> {
        self.query_all(selector)
            .into_iter()
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(|element| Rc::new(DomAlert(element)) as Rc<dyn Alert>)
            .collect()
    }

    fn inputs_matching(&self, selector: &str) -> Vec<Rc<dyn InputField>> {
        self.query_all(selector)
            .into_iter()
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .map(|input| Rc::new(DomInput(input)) as Rc<dyn InputField>)
            .collect()
    }
}

fn listen(target: &web_sys::EventTarget, event: FormEvent, handler: Handler) -> Subscription {
    let listener = EventListener::new(target, event.as_str(), move |_| handler());
    Subscription::holding(listener)
}

/// `<input>` element
pub struct DomInput(HtmlInputElement);

impl EventSource for DomInput {
    fn subscribe(&self, event: FormEvent, handler: Handler) -> Subscription {
        listen(&self.0, event, handler)
    }
}

impl InputField for DomInput {
    fn id(&self) -> String {
        self.0.id()
    }

    fn value(&self) -> String {
        self.0.value()
    }

    fn set_value(&self, value: &str) {
        self.0.set_value(value);
    }
}

/// `<select>` element
pub struct DomSelect(HtmlSelectElement);

impl EventSource for DomSelect {
    fn subscribe(&self, event: FormEvent, handler: Handler) -> Subscription {
        listen(&self.0, event, handler)
    }
}

impl VarietySelector for DomSelect {
    fn selected_option_attribute(&self, name: &str) -> Option<String> {
        let index = u32::try_from(self.0.selected_index()).ok()?;
        self.0.item(index)?.get_attribute(name)
    }
}

/// Any element used as a notification banner
pub struct DomAlert(HtmlElement);

impl Alert for DomAlert {
    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.0.style().set_property(property, value) {
            tracing::debug!("Could not set {} on alert: {:?}", property, e);
        }
    }

    fn remove(&self) {
        self.0.remove();
    }
}
