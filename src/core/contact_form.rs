use crate::core::Controller;
use crate::dom::{Document, ElementId, Event, EventOutcome};
use crate::utils::validation::{is_blank, is_valid_email};
use std::time::Duration;

pub const SENDING_DELAY: Duration = Duration::from_millis(1500);
pub const SENT_DISPLAY: Duration = Duration::from_millis(3000);

const SENDING_LABEL: &str = "Sending...";
const SENT_LABEL: &str = "Message Sent!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Sending { until: Duration },
    Sent { until: Duration },
}

/// Client-side validation followed by a simulated submission; nothing is
/// sent over the network.
#[derive(Debug, Clone)]
pub struct ContactFormController {
    form: ElementId,
    fields: Vec<ElementId>,
    submit: Option<ElementId>,
    label: String,
    state: FormState,
}

fn is_field(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select")
}

impl ContactFormController {
    pub fn new(doc: &Document, form: ElementId) -> Self {
        let descendants = doc.descendants(form);
        let fields = descendants
            .iter()
            .copied()
            .filter(|id| is_field(doc.tag(*id)))
            .collect();
        let submit = descendants
            .iter()
            .copied()
            .find(|id| doc.tag(*id) == "button" && doc.attr(*id, "type") == Some("submit"))
            .or_else(|| descendants.iter().copied().find(|id| doc.tag(*id) == "button"));
        let label = submit.map(|b| doc.text(b).to_string()).unwrap_or_default();
        Self {
            form,
            fields,
            submit,
            label,
            state: FormState::Idle,
        }
    }

    pub fn attach(doc: &mut Document) -> Option<Self> {
        let form = doc.get_element_by_id("contact-form")?;
        Some(Self::new(doc, form))
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn field_is_valid(doc: &Document, field: ElementId) -> bool {
        let value = doc.value(field);
        if doc.attr(field, "required").is_some() && is_blank(value) {
            return false;
        }
        if doc.attr(field, "type") == Some("email") && !is_blank(value) {
            return is_valid_email(value.trim());
        }
        true
    }

    /// Marks every field and returns the invalid ones in document order.
    pub fn validate(&self, doc: &mut Document) -> Vec<ElementId> {
        let mut invalid = Vec::new();
        for field in &self.fields {
            let valid = Self::field_is_valid(doc, *field);
            doc.toggle_class(*field, "error", !valid);
            if !valid {
                invalid.push(*field);
            }
        }
        invalid
    }

    fn submit(&mut self, doc: &mut Document, now: Duration) -> EventOutcome {
        if self.state != FormState::Idle {
            return EventOutcome::DefaultPrevented;
        }
        let invalid = self.validate(doc);
        if let Some(first) = invalid.first() {
            tracing::debug!("Contact form has {} invalid field(s)", invalid.len());
            doc.focus(*first);
            return EventOutcome::DefaultPrevented;
        }

        self.state = FormState::Sending {
            until: now + SENDING_DELAY,
        };
        if let Some(button) = self.submit {
            doc.set_disabled(button, true);
            doc.set_text(button, SENDING_LABEL);
        }
        EventOutcome::DefaultPrevented
    }
}

impl Controller for ContactFormController {
    fn name(&self) -> &'static str {
        "contact-form"
    }

    fn handle(&mut self, doc: &mut Document, event: &Event, now: Duration) -> EventOutcome {
        match event {
            Event::Submit(target) if *target == self.form => self.submit(doc, now),
            Event::Click(target)
                if self.submit.is_some_and(|b| doc.contains(b, *target) && !doc.is_disabled(b)) =>
            {
                self.submit(doc, now)
            }
            Event::Input(field) if self.fields.contains(field) => {
                if doc.has_class(*field, "error") && Self::field_is_valid(doc, *field) {
                    doc.remove_class(*field, "error");
                }
                EventOutcome::Handled
            }
            _ => EventOutcome::Ignored,
        }
    }

    fn tick(&mut self, doc: &mut Document, now: Duration) {
        match self.state {
            FormState::Sending { until } if now >= until => {
                self.state = FormState::Sent {
                    until: until + SENT_DISPLAY,
                };
                if let Some(button) = self.submit {
                    doc.set_text(button, SENT_LABEL);
                    doc.add_class(button, "success");
                }
                for field in &self.fields {
                    doc.set_value(*field, "");
                }
                tracing::info!("Contact form submission simulated");
            }
            FormState::Sent { until } if now >= until => {
                self.state = FormState::Idle;
                if let Some(button) = self.submit {
                    doc.set_text(button, self.label.clone());
                    doc.remove_class(button, "success");
                    doc.set_disabled(button, false);
                }
            }
            _ => {}
        }
    }
}
