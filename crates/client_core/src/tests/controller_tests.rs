use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use shared::{
    domain::{BindPoint, DisplayField, Panel, ProgressBar},
    protocol::{FootprintResult, Submission},
};

use crate::{
    CalculationBackend, CalculationError, CalculationOutcome, CalculatorView, UiAction,
    ViewController, ViewError, ViewModel, GENERIC_FAILURE_MESSAGE,
};

struct StubBackend {
    response: serde_json::Value,
    fail: bool,
    seen: Mutex<Vec<Submission>>,
}

impl StubBackend {
    fn ok(response: serde_json::Value) -> Self {
        Self {
            response,
            fail: false,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            response: serde_json::Value::Null,
            fail: true,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.seen.lock().expect("lock").len()
    }
}

#[async_trait]
impl CalculationBackend for StubBackend {
    async fn calculate(
        &self,
        submission: &Submission,
    ) -> Result<FootprintResult, CalculationError> {
        self.seen.lock().expect("lock").push(submission.clone());
        if self.fail {
            return Err(CalculationError::Unavailable("stub offline".to_string()));
        }
        Ok(serde_json::from_value(self.response.clone())?)
    }
}

/// A view that is missing some of its elements.
struct PartialView {
    inner: ViewModel,
    missing: Vec<BindPoint>,
}

impl CalculatorView for PartialView {
    fn has_bind_point(&self, point: BindPoint) -> bool {
        !self.missing.contains(&point)
    }

    fn read_form(&self) -> Submission {
        self.inner.read_form()
    }

    fn reset_form(&mut self) {
        self.inner.reset_form()
    }

    fn set_text(&mut self, field: DisplayField, text: &str) {
        self.inner.set_text(field, text)
    }

    fn set_progress_width(&mut self, bar: ProgressBar, width: &str) {
        self.inner.set_progress_width(bar, width)
    }

    fn show_panel(&mut self, panel: Panel) {
        self.inner.show_panel(panel)
    }

    fn scroll_into_view(&mut self, panel: Panel) {
        self.inner.scroll_into_view(panel)
    }

    fn alert(&mut self, message: &str) {
        self.inner.alert(message)
    }
}

fn filled_controller() -> ViewController<ViewModel> {
    let mut view = ViewModel::new();
    view.set_field("personal_car", "250");
    view.set_field("electricity", "600");
    ViewController::initialize(view).expect("initialize")
}

fn numeric_response() -> serde_json::Value {
    json!({
        "total_annual_footprint": 7.5,
        "trees_to_offset": 313,
        "transportation": { "total": 1.34, "percentage": 18, "car": 1.34, "transit": 0.0, "flights": 0.0 },
        "household_energy": { "total": 6.16, "percentage": 82, "electricity": 3.77, "natural_gas": 2.39 },
    })
}

#[test]
fn initialize_reports_every_missing_bind_point() {
    let view = PartialView {
        inner: ViewModel::new(),
        missing: vec![
            BindPoint::Display(DisplayField::TreesOffset),
            BindPoint::Progress(ProgressBar::Energy),
        ],
    };
    let err = ViewController::initialize(view).err().expect("startup error");
    assert_eq!(
        err,
        ViewError::MissingBindPoints(vec!["trees-offset", "energy-progress"])
    );
}

#[test]
fn initialize_starts_on_the_form() {
    let controller = ViewController::initialize(ViewModel::new()).expect("initialize");
    assert_eq!(controller.panel(), Panel::Form);
    assert!(controller.view().is_visible(Panel::Form));
}

#[tokio::test]
async fn call_to_action_scrolls_to_form_without_state_change() {
    let backend = StubBackend::failing();
    let mut controller = filled_controller();

    let outcome = controller.handle(UiAction::CallToAction, &backend).await;

    assert!(outcome.is_none());
    assert_eq!(backend.calls(), 0);
    assert_eq!(controller.panel(), Panel::Form);
    assert_eq!(controller.view_mut().take_scroll_target(), Some(Panel::Form));
}

#[tokio::test]
async fn numeric_results_render_in_json_form() {
    let backend = StubBackend::ok(numeric_response());
    let mut controller = filled_controller();

    controller.handle(UiAction::Submit, &backend).await;

    let view = controller.view();
    assert_eq!(view.text(DisplayField::TotalFootprint), Some("7.5"));
    assert_eq!(view.text(DisplayField::TransitEmissions), Some("0.0"));
    assert_eq!(view.text(DisplayField::EnergyProgressLabel), Some("82%"));
    assert_eq!(view.progress_fraction(ProgressBar::Transport), Some(0.18));
    assert_eq!(controller.panel(), Panel::Results);
}

#[tokio::test]
async fn percentages_pass_through_without_clamping() {
    let backend = StubBackend::ok(json!({
        "transportation": { "percentage": 140 },
        "household_energy": { "percentage": "n/a" },
    }));
    let mut controller = filled_controller();

    controller.submit(&backend).await;

    let view = controller.view();
    assert_eq!(view.progress_width(ProgressBar::Transport), Some("140%"));
    assert_eq!(view.progress_width(ProgressBar::Energy), Some("n/a%"));
    assert_eq!(view.progress_fraction(ProgressBar::Energy), None);
    assert_eq!(view.text(DisplayField::TotalFootprint), Some(""));
}

#[tokio::test]
async fn show_results_and_show_form_are_idempotent() {
    let mut controller = filled_controller();

    controller.show_form();
    controller.show_form();
    assert_eq!(controller.panel(), Panel::Form);
    assert!(controller.view().is_visible(Panel::Form));

    controller.show_results();
    controller.show_results();
    assert_eq!(controller.panel(), Panel::Results);
    assert!(controller.view().is_visible(Panel::Results));
    assert!(!controller.view().is_visible(Panel::Form));
}

#[tokio::test]
async fn start_over_clears_fields_and_returns_to_form() {
    let backend = StubBackend::ok(numeric_response());
    let mut controller = filled_controller();
    controller.handle(UiAction::Submit, &backend).await;
    assert_eq!(controller.panel(), Panel::Results);

    controller.handle(UiAction::StartOver, &backend).await;

    assert_eq!(controller.panel(), Panel::Form);
    assert!(controller.view().is_visible(Panel::Form));
    assert_eq!(controller.view().field("personal_car"), Some(""));
    assert_eq!(controller.view().field("electricity"), Some(""));
    assert_eq!(controller.view_mut().take_scroll_target(), Some(Panel::Form));
}

#[test]
fn reset_from_form_state_still_clears_fields() {
    let mut controller = filled_controller();
    controller.reset_form();
    assert_eq!(controller.panel(), Panel::Form);
    assert_eq!(controller.view().field("personal_car"), Some(""));
}

#[tokio::test]
async fn recalculate_keeps_previous_field_values() {
    let backend = StubBackend::ok(numeric_response());
    let mut controller = filled_controller();
    controller.handle(UiAction::Submit, &backend).await;

    controller.handle(UiAction::Recalculate, &backend).await;

    assert_eq!(controller.panel(), Panel::Form);
    assert_eq!(controller.view().field("personal_car"), Some("250"));
    assert_eq!(controller.view().field("electricity"), Some("600"));
}

#[tokio::test]
async fn failure_alerts_without_touching_results() {
    let backend = StubBackend::failing();
    let mut controller = filled_controller();

    let outcome = controller.handle(UiAction::Submit, &backend).await;

    assert!(matches!(outcome, Some(CalculationOutcome::Failure(_))));
    assert_eq!(backend.calls(), 1);
    assert_eq!(controller.panel(), Panel::Form);
    assert_eq!(controller.view().pending_alert(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(controller.view().progress_width(ProgressBar::Transport), None);
}

#[tokio::test]
async fn failure_after_results_leaves_previous_results_in_place() {
    let mut controller = filled_controller();
    controller
        .submit(&StubBackend::ok(numeric_response()))
        .await;
    controller.show_form();

    controller.submit(&StubBackend::failing()).await;

    assert_eq!(controller.panel(), Panel::Form);
    assert_eq!(
        controller.view().text(DisplayField::TotalFootprint),
        Some("7.5")
    );
    assert_eq!(controller.view().alerts_shown(), 1);
}

#[tokio::test]
async fn each_submit_sends_exactly_one_request_with_current_fields() {
    let backend = StubBackend::ok(numeric_response());
    let mut controller = filled_controller();

    controller.submit(&backend).await;
    controller.show_form();
    controller.view_mut().set_field("personal_car", "10");
    controller.submit(&backend).await;

    let seen = backend.seen.lock().expect("lock");
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].get("personal_car"), Some("250"));
    assert_eq!(seen[1].get("personal_car"), Some("10"));
}
