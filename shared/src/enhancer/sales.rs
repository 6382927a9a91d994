//! Sale total calculation

use std::rc::Rc;

use crate::dom::{Handler, InputField, Subscription};
use crate::models::{format_sale_total, sale_total};
use crate::types::FormEvent;

/// Diagnostic channel receiving computed totals
pub trait TotalSink {
    fn record_total(&self, total: f64);
}

/// Recomputes quantity x unit price whenever either input changes
pub struct SaleTotalCalculator {
    quantity: Rc<dyn InputField>,
    price_per_unit: Rc<dyn InputField>,
    total_field: Option<Rc<dyn InputField>>,
    sink: Rc<dyn TotalSink>,
}

impl SaleTotalCalculator {
    pub fn new(
        quantity: Rc<dyn InputField>,
        price_per_unit: Rc<dyn InputField>,
        sink: Rc<dyn TotalSink>,
    ) -> Self {
        Self {
            quantity,
            price_per_unit,
            total_field: None,
            sink,
        }
    }

    /// Also display the rounded total in `field`
    pub fn with_total_field(mut self, field: Rc<dyn InputField>) -> Self {
        self.total_field = Some(field);
        self
    }

    /// Compute the total and send it to the sink
    pub fn calculate(&self) -> f64 {
        let total = sale_total(&self.quantity.value(), &self.price_per_unit.value());
        tracing::debug!(total, "Sale total recomputed");
        self.sink.record_total(total);

        if let Some(field) = &self.total_field {
            if let Some(formatted) = format_sale_total(total) {
                field.set_value(&formatted);
            }
        }
        total
    }

    /// Recompute on input to either field
    pub fn wire(self: Rc<Self>) -> Vec<Subscription> {
        let calculator = self.clone();
        let handler: Handler = Rc::new(move || {
            calculator.calculate();
        });
        vec![
            self.quantity.subscribe(FormEvent::Input, handler.clone()),
            self.price_per_unit.subscribe(FormEvent::Input, handler),
        ]
    }
}
