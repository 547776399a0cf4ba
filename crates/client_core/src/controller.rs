use shared::{
    domain::{DisplayField, Panel, ProgressBar},
    protocol::{DisplayValue, FootprintResult, Submission},
};
use tracing::{debug, error};

use crate::{
    error::{CalculationError, ViewError},
    transport::CalculationBackend,
    view::CalculatorView,
};

pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// User intents the page listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    CallToAction,
    Submit,
    Recalculate,
    StartOver,
}

#[derive(Debug)]
pub enum CalculationOutcome {
    Success(FootprintResult),
    Failure(CalculationError),
}

impl CalculationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationOutcome::Success(_))
    }
}

impl From<Result<FootprintResult, CalculationError>> for CalculationOutcome {
    fn from(value: Result<FootprintResult, CalculationError>) -> Self {
        match value {
            Ok(result) => CalculationOutcome::Success(result),
            Err(err) => CalculationOutcome::Failure(err),
        }
    }
}

/// Drives a [`CalculatorView`] through the form/results cycle.
pub struct ViewController<V> {
    view: V,
    panel: Panel,
}

impl<V: CalculatorView> ViewController<V> {
    /// Fails if the view lacks any element the controller binds to.
    pub fn initialize(mut view: V) -> Result<Self, ViewError> {
        let missing: Vec<&'static str> = shared::domain::BindPoint::all()
            .filter(|point| !view.has_bind_point(*point))
            .map(|point| point.element_id())
            .collect();
        if !missing.is_empty() {
            return Err(ViewError::MissingBindPoints(missing));
        }

        view.show_panel(Panel::Form);
        Ok(Self {
            view,
            panel: Panel::Form,
        })
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Runs the handler wired to `action`. Only `Submit` produces an outcome.
    pub async fn handle<B>(&mut self, action: UiAction, backend: &B) -> Option<CalculationOutcome>
    where
        B: CalculationBackend + ?Sized,
    {
        debug!(?action, panel = ?self.panel, "ui action");
        match action {
            UiAction::CallToAction => {
                self.scroll_to_calculator();
                None
            }
            UiAction::Submit => Some(self.submit(backend).await),
            UiAction::Recalculate => {
                self.show_form();
                None
            }
            UiAction::StartOver => {
                self.reset_form();
                None
            }
        }
    }

    pub fn scroll_to_calculator(&mut self) {
        self.view.scroll_into_view(Panel::Form);
    }

    pub fn read_submission(&self) -> Submission {
        self.view.read_form()
    }

    pub async fn submit<B>(&mut self, backend: &B) -> CalculationOutcome
    where
        B: CalculationBackend + ?Sized,
    {
        let submission = self.read_submission();
        self.calculate(backend, submission).await
    }

    pub async fn calculate<B>(&mut self, backend: &B, submission: Submission) -> CalculationOutcome
    where
        B: CalculationBackend + ?Sized,
    {
        let outcome = CalculationOutcome::from(backend.calculate(&submission).await);
        self.apply_outcome(&outcome);
        outcome
    }

    /// Renders a result and switches to it, or alerts and stays put.
    pub fn apply_outcome(&mut self, outcome: &CalculationOutcome) {
        match outcome {
            CalculationOutcome::Success(result) => {
                self.render(result);
                self.show_results();
            }
            CalculationOutcome::Failure(err) => {
                error!(error = %err, "error calculating footprint");
                self.view.alert(GENERIC_FAILURE_MESSAGE);
            }
        }
    }

    pub fn render(&mut self, result: &FootprintResult) {
        let transport = &result.transportation;
        let energy = &result.household_energy;

        let texts: [(DisplayField, &DisplayValue); 11] = [
            (DisplayField::TotalFootprint, &result.total_annual_footprint),
            (DisplayField::TreesOffset, &result.trees_to_offset),
            (DisplayField::TransportTotal, &transport.total),
            (DisplayField::TransportPercentage, &transport.percentage),
            (DisplayField::CarEmissions, &transport.car),
            (DisplayField::TransitEmissions, &transport.transit),
            (DisplayField::FlightEmissions, &transport.flights),
            (DisplayField::EnergyTotal, &energy.total),
            (DisplayField::EnergyPercentage, &energy.percentage),
            (DisplayField::ElectricityEmissions, &energy.electricity),
            (DisplayField::NaturalGasEmissions, &energy.natural_gas),
        ];
        for (field, value) in texts {
            self.view.set_text(field, &value.text());
        }

        for (bar, percentage) in [
            (ProgressBar::Transport, &transport.percentage),
            (ProgressBar::Energy, &energy.percentage),
        ] {
            let width = format!("{}%", percentage.text());
            self.view.set_progress_width(bar, &width);
            self.view.set_text(bar.label(), &width);
        }
    }

    pub fn show_results(&mut self) {
        self.set_panel(Panel::Results);
    }

    pub fn show_form(&mut self) {
        self.set_panel(Panel::Form);
    }

    pub fn reset_form(&mut self) {
        self.view.reset_form();
        self.show_form();
    }

    fn set_panel(&mut self, panel: Panel) {
        self.panel = panel;
        self.view.show_panel(panel);
        self.view.scroll_into_view(panel);
    }
}
