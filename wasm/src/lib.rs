//! WebAssembly module for the Tomato Farm Management pages
//!
//! Provides client-side form behavior for:
//! - Expected harvest date projection on the planting form
//! - Auto-dismissal of flash alerts
//! - Defaulting empty date inputs to today
//! - Sale total calculation

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use shared::parsing::format_form_date;
use shared::{EnhancerConfig, EnhancerHandle, Environment, FormEnhancer};
use wasm_bindgen::prelude::*;
use web_sys::Document;

pub mod dom;
pub mod logging;
pub mod runtime;

use dom::DomPage;
use runtime::{ConsoleTotalSink, JsClock, TimeoutScheduler};

thread_local! {
    static ACTIVE: RefCell<Option<EnhancerHandle>> = const { RefCell::new(None) };
    static PENDING: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

/// Initialize the WASM module and enhance the page with the default setup
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let config = EnhancerConfig::default();
    logging::init(&config.log_level);

    match FormEnhancer::new(config) {
        Ok(enhancer) => attach_when_ready(enhancer),
        Err(e) => tracing::error!("Default configuration rejected: {}", e),
    }
}

/// Detach the current enhancer and attach again with a JSON configuration
#[wasm_bindgen]
pub fn reattach_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = EnhancerConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid enhancer config: {}", e)))?;
    logging::set_level(&config.log_level);

    let enhancer = FormEnhancer::new(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid enhancer config: {}", e)))?;
    dispose();
    attach_when_ready(enhancer);
    Ok(())
}

/// Remove all listeners and cancel pending alert timers
#[wasm_bindgen]
pub fn dispose() {
    let pending = PENDING.with(|slot| slot.borrow_mut().take());
    drop(pending);
    let active = ACTIVE.with(|slot| slot.borrow_mut().take());
    drop(active);
}

/// Project the expected harvest date, `YYYY-MM-DD`
#[wasm_bindgen]
pub fn project_harvest_date(planting_date: &str, days_to_harvest: &str) -> Option<String> {
    shared::models::project_harvest_date(planting_date, Some(days_to_harvest))
        .ok()
        .map(format_form_date)
}

/// Calculate a sale total from raw quantity and unit price
#[wasm_bindgen]
pub fn calculate_sale_total(quantity: &str, price_per_unit: &str) -> f64 {
    shared::models::sale_total(quantity, price_per_unit)
}

/// Format a sale total with two decimals
#[wasm_bindgen]
pub fn format_sale_total(total: f64) -> Option<String> {
    shared::models::format_sale_total(total)
}

fn attach_when_ready(enhancer: FormEnhancer) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        tracing::warn!("No document available, form enhancer not attached");
        return;
    };

    if document.ready_state() == "loading" {
        let target = document.clone();
        let listener = EventListener::once(&target, "DOMContentLoaded", move |_| {
            attach_now(&enhancer, document);
        });
        PENDING.with(|slot| *slot.borrow_mut() = Some(listener));
    } else {
        attach_now(&enhancer, document);
    }
}

fn attach_now(enhancer: &FormEnhancer, document: Document) {
    let env = Environment {
        scheduler: Rc::new(TimeoutScheduler),
        clock: Rc::new(JsClock::new(enhancer.config().today_basis)),
        totals: Rc::new(ConsoleTotalSink),
    };
    let handle = enhancer.attach(&DomPage::new(document), &env);
    let previous = ACTIVE.with(|slot| slot.borrow_mut().replace(handle));
    drop(previous);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_harvest_date() {
        assert_eq!(
            project_harvest_date("2024-01-20", "14").as_deref(),
            Some("2024-02-03")
        );
        assert_eq!(
            project_harvest_date("2024-12-25", "10").as_deref(),
            Some("2025-01-04")
        );
    }

    #[test]
    fn test_project_harvest_date_missing_values() {
        assert_eq!(project_harvest_date("", "75"), None);
        assert_eq!(project_harvest_date("2024-01-20", ""), None);
        assert_eq!(project_harvest_date("2024-01-20", "0"), None);
    }

    #[test]
    fn test_calculate_sale_total() {
        let total = calculate_sale_total("3", "2.5");
        assert!((total - 7.5).abs() < 0.001);
        assert_eq!(calculate_sale_total("", "4"), 0.0);
    }

    #[test]
    fn test_format_sale_total() {
        assert_eq!(format_sale_total(7.5).as_deref(), Some("7.50"));
        assert_eq!(format_sale_total(f64::NAN), None);
    }
}
