//! Form enhancer composition root
//!
//! Resolves the elements each behavior needs from a [`Page`] once, wires the
//! behaviors, and hands back an [`EnhancerHandle`] owning every subscription
//! and the cancellation token of pending alert timers.

mod alerts;
mod dates;
mod harvest;
mod sales;

pub use alerts::*;
pub use dates::*;
pub use harvest::*;
pub use sales::*;

use std::rc::Rc;

use crate::config::EnhancerConfig;
use crate::dom::{Page, Subscription};
use crate::error::FormResult;
use crate::schedule::{CancellationToken, Clock, Scheduler};
use crate::types::AttachReport;

/// Host services the behaviors run on
#[derive(Clone)]
pub struct Environment {
    pub scheduler: Rc<dyn Scheduler>,
    pub clock: Rc<dyn Clock>,
    pub totals: Rc<dyn TotalSink>,
}

/// Wires the four form behaviors onto a page
#[derive(Debug, Clone)]
pub struct FormEnhancer {
    config: EnhancerConfig,
}

impl FormEnhancer {
    /// Create an enhancer from a validated configuration
    pub fn new(config: EnhancerConfig) -> FormResult<Self> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    /// Attach all behaviors to `page`.
    ///
    /// Missing elements disable only the behavior that needs them.
    pub fn attach(&self, page: &dyn Page, env: &Environment) -> EnhancerHandle {
        let config = &self.config;
        let cancel = CancellationToken::new();
        let mut subscriptions = Vec::new();
        let mut report = AttachReport::default();

        let dismisser = AlertDismisser::new(
            env.scheduler.clone(),
            DismissTimings {
                fade_delay: config.fade_delay(),
                fade_duration: config.fade_duration(),
            },
            cancel.clone(),
        );
        report.alerts_scheduled = dismisser.dismiss_all(page.alerts(&config.alert_selector));

        let today = env.clock.today();
        report.dates_filled = fill_empty_dates(
            &page.inputs_matching(&config.date_input_selector),
            &config.fields.expected_harvest,
            today,
        );

        if let Some(calculator) = self.resolve_calculator(page, env) {
            subscriptions.extend(Rc::new(calculator).wire());
            report.sale_calculator_wired = true;
        }

        if let Some(projector) = self.resolve_projector(page) {
            subscriptions.extend(Rc::new(projector).wire());
            report.harvest_projector_wired = true;
        }

        tracing::info!(
            alerts = report.alerts_scheduled,
            dates = report.dates_filled,
            harvest = report.harvest_projector_wired,
            sales = report.sale_calculator_wired,
            "Form enhancer attached"
        );

        EnhancerHandle {
            subscriptions,
            cancel,
            report,
        }
    }

    fn resolve_projector(&self, page: &dyn Page) -> Option<HarvestProjector> {
        let fields = &self.config.fields;
        let variety = page.select_by_id(&fields.variety)?;
        let planting_date = page.input_by_id(&fields.planting_date)?;
        let expected_harvest = page.input_by_id(&fields.expected_harvest)?;
        Some(HarvestProjector::new(
            variety,
            planting_date,
            expected_harvest,
            self.config.days_attribute.clone(),
        ))
    }

    fn resolve_calculator(&self, page: &dyn Page, env: &Environment) -> Option<SaleTotalCalculator> {
        let fields = &self.config.fields;
        let quantity = page.input_by_id(&fields.quantity)?;
        let price_per_unit = page.input_by_id(&fields.price_per_unit)?;
        let calculator = SaleTotalCalculator::new(quantity, price_per_unit, env.totals.clone());

        let total_field = self
            .config
            .total_field
            .as_deref()
            .and_then(|id| page.input_by_id(id));
        Some(match total_field {
            Some(field) => calculator.with_total_field(field),
            None => calculator,
        })
    }
}

/// Attached enhancer. Dropping it unsubscribes every listener and cancels
/// alert phases that have not run yet.
#[must_use = "dropping the handle detaches the enhancer"]
#[derive(Debug)]
pub struct EnhancerHandle {
    subscriptions: Vec<Subscription>,
    cancel: CancellationToken,
    report: AttachReport,
}

impl EnhancerHandle {
    pub fn report(&self) -> &AttachReport {
        &self.report
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Detach now
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for EnhancerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.subscriptions.clear();
        tracing::debug!("Form enhancer detached");
    }
}
