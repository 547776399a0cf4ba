//! The surface a host UI exposes to the controller.

use std::collections::BTreeMap;

use shared::{
    domain::{BindPoint, DisplayField, FormField, Panel, ProgressBar},
    protocol::Submission,
};

/// Named bind points of a calculator page.
///
/// Hosts implement this instead of being looked up by element id. Panel
/// visibility has a single setter so exactly one panel is ever shown.
pub trait CalculatorView {
    fn has_bind_point(&self, _point: BindPoint) -> bool {
        true
    }

    fn read_form(&self) -> Submission;

    fn reset_form(&mut self);

    fn set_text(&mut self, field: DisplayField, text: &str);

    /// `width` is a CSS-style length such as `"50%"`, passed through
    /// uninterpreted. Hosts ignore widths they cannot parse.
    fn set_progress_width(&mut self, bar: ProgressBar, width: &str);

    fn show_panel(&mut self, panel: Panel);

    fn scroll_into_view(&mut self, panel: Panel);

    /// Blocking, user-facing notification.
    fn alert(&mut self, message: &str);
}

/// In-memory view state that hosts render from.
#[derive(Debug, Clone)]
pub struct ViewModel {
    fields: Vec<(String, String)>,
    defaults: BTreeMap<String, String>,
    texts: BTreeMap<DisplayField, String>,
    progress: BTreeMap<ProgressBar, String>,
    visible: Panel,
    scroll_target: Option<Panel>,
    pending_alert: Option<String>,
    alerts_shown: usize,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    /// A form with every standard field, all empty by default.
    pub fn new() -> Self {
        Self {
            fields: FormField::ALL
                .iter()
                .map(|field| (field.key().to_string(), String::new()))
                .collect(),
            defaults: BTreeMap::new(),
            texts: BTreeMap::new(),
            progress: BTreeMap::new(),
            visible: Panel::Form,
            scroll_target: None,
            pending_alert: None,
            alerts_shown: 0,
        }
    }

    /// Sets the value the field takes on reset, and its current value.
    pub fn with_default(mut self, name: &str, value: &str) -> Self {
        self.defaults.insert(name.to_string(), value.to_string());
        self.set_field(name, value);
        self
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        self.fields
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn text(&self, field: DisplayField) -> Option<&str> {
        self.texts.get(&field).map(String::as_str)
    }

    pub fn progress_width(&self, bar: ProgressBar) -> Option<&str> {
        self.progress.get(&bar).map(String::as_str)
    }

    /// Width as a 0..=1 fraction, or `None` when no valid percentage is set.
    /// Out-of-range values are not clamped.
    pub fn progress_fraction(&self, bar: ProgressBar) -> Option<f32> {
        let width = self.progress_width(bar)?;
        let percent = width.trim().strip_suffix('%')?.trim().parse::<f32>().ok()?;
        percent.is_finite().then_some(percent / 100.0)
    }

    pub fn visible_panel(&self) -> Panel {
        self.visible
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible == panel
    }

    pub fn take_scroll_target(&mut self) -> Option<Panel> {
        self.scroll_target.take()
    }

    pub fn pending_alert(&self) -> Option<&str> {
        self.pending_alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.pending_alert.take()
    }

    pub fn alerts_shown(&self) -> usize {
        self.alerts_shown
    }
}

impl CalculatorView for ViewModel {
    fn read_form(&self) -> Submission {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    fn reset_form(&mut self) {
        for (key, value) in &mut self.fields {
            *value = self.defaults.get(key).cloned().unwrap_or_default();
        }
    }

    fn set_text(&mut self, field: DisplayField, text: &str) {
        self.texts.insert(field, text.to_string());
    }

    fn set_progress_width(&mut self, bar: ProgressBar, width: &str) {
        self.progress.insert(bar, width.to_string());
    }

    fn show_panel(&mut self, panel: Panel) {
        self.visible = panel;
    }

    fn scroll_into_view(&mut self, panel: Panel) {
        self.scroll_target = Some(panel);
    }

    fn alert(&mut self, message: &str) {
        self.alerts_shown += 1;
        self.pending_alert = Some(message.to_string());
    }
}
