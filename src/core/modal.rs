use crate::core::Controller;
use crate::dom::{Document, ElementId, Event, EventOutcome, Key};
use std::time::Duration;

/// Matches the CSS fade-out; `aria-hidden` flips once it has run.
pub const MODAL_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveModal {
    pub modal: ElementId,
    pub opener: Option<ElementId>,
}

/// Declarative dialogs: `[data-modal-target]` opens, `[data-modal-close]`,
/// the backdrop or Escape closes. At most one dialog is active.
#[derive(Debug, Clone, Default)]
pub struct ModalController {
    active: Option<ActiveModal>,
    closing: Vec<(ElementId, Duration)>,
}

impl ModalController {
    pub fn attach(doc: &mut Document) -> Option<Self> {
        let modals = doc.query_class("modal");
        if modals.is_empty() && doc.query_attr("data-modal-target").is_empty() {
            return None;
        }
        for modal in modals {
            doc.set_attr(modal, "aria-hidden", "true");
        }
        Some(Self::default())
    }

    pub fn active(&self) -> Option<ActiveModal> {
        self.active
    }

    /// Opens the dialog with DOM id `modal_id`; false when it does not exist.
    pub fn open_by_id(
        &mut self,
        doc: &mut Document,
        modal_id: &str,
        opener: Option<ElementId>,
        now: Duration,
    ) -> bool {
        match doc.get_element_by_id(modal_id) {
            Some(modal) => {
                self.open(doc, modal, opener, now);
                true
            }
            None => {
                tracing::debug!("No modal with id '{}'", modal_id);
                false
            }
        }
    }

    pub fn open(&mut self, doc: &mut Document, modal: ElementId, opener: Option<ElementId>, now: Duration) {
        match self.active {
            Some(active) if active.modal == modal => return,
            Some(_) => self.close(doc, now),
            None => {}
        }

        self.closing.retain(|(m, _)| *m != modal);
        doc.add_class(modal, "active");
        doc.set_attr(modal, "aria-hidden", "false");
        let body = doc.body();
        doc.add_class(body, "modal-open");

        match doc.focusable_descendants(modal).first() {
            Some(first) => doc.focus(*first),
            None => {
                doc.set_attr(modal, "tabindex", "-1");
                doc.focus(modal);
            }
        }
        self.active = Some(ActiveModal { modal, opener });
        tracing::debug!("Modal opened: {:?}", doc.attr(modal, "id"));
    }

    pub fn close(&mut self, doc: &mut Document, now: Duration) {
        let Some(ActiveModal { modal, opener }) = self.active.take() else {
            return;
        };
        doc.remove_class(modal, "active");
        let body = doc.body();
        doc.remove_class(body, "modal-open");
        self.closing.push((modal, now + MODAL_TRANSITION));
        match opener {
            Some(opener) => doc.focus(opener),
            None => doc.blur(),
        }
    }

    fn trap_focus(&self, doc: &mut Document, modal: ElementId, forward: bool) -> EventOutcome {
        let focusable = doc.focusable_descendants(modal);
        let (Some(first), Some(last)) = (focusable.first().copied(), focusable.last().copied()) else {
            return EventOutcome::DefaultPrevented;
        };
        let inside = doc.focused().is_some_and(|f| doc.contains(modal, f));

        if !inside {
            doc.focus(if forward { first } else { last });
            EventOutcome::DefaultPrevented
        } else if forward && doc.focused() == Some(last) {
            doc.focus(first);
            EventOutcome::DefaultPrevented
        } else if !forward && doc.focused() == Some(first) {
            doc.focus(last);
            EventOutcome::DefaultPrevented
        } else {
            EventOutcome::Ignored
        }
    }
}

impl Controller for ModalController {
    fn name(&self) -> &'static str {
        "modal"
    }

    fn handle(&mut self, doc: &mut Document, event: &Event, now: Duration) -> EventOutcome {
        match event {
            Event::Click(target) => {
                if let Some(trigger) = doc.closest(*target, |e| e.attrs.contains_key("data-modal-target")) {
                    let modal_id = doc
                        .attr(trigger, "data-modal-target")
                        .unwrap_or_default()
                        .trim_start_matches('#')
                        .to_string();
                    return if self.open_by_id(doc, &modal_id, Some(trigger), now) {
                        EventOutcome::DefaultPrevented
                    } else {
                        EventOutcome::Ignored
                    };
                }

                let Some(ActiveModal { modal, .. }) = self.active else {
                    return EventOutcome::Ignored;
                };
                let close_control = doc
                    .closest(*target, |e| e.attrs.contains_key("data-modal-close"))
                    .is_some_and(|c| doc.contains(modal, c));
                let backdrop = *target == modal
                    || (doc.has_class(*target, "modal-backdrop") && doc.contains(modal, *target));
                if close_control || backdrop {
                    self.close(doc, now);
                    EventOutcome::Handled
                } else {
                    EventOutcome::Ignored
                }
            }
            Event::KeyDown(Key::Escape) if self.active.is_some() => {
                self.close(doc, now);
                EventOutcome::Handled
            }
            Event::KeyDown(key @ (Key::Tab | Key::ShiftTab)) => match self.active {
                Some(ActiveModal { modal, .. }) => self.trap_focus(doc, modal, *key == Key::Tab),
                None => EventOutcome::Ignored,
            },
            _ => EventOutcome::Ignored,
        }
    }

    fn tick(&mut self, doc: &mut Document, now: Duration) {
        self.closing.retain(|(modal, at)| {
            if now >= *at {
                doc.set_attr(*modal, "aria-hidden", "true");
                false
            } else {
                true
            }
        });
    }
}
