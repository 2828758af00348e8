use crate::core::{Controller, SCROLL_THROTTLE};
use crate::dom::{Document, ElementId, Event, EventOutcome, Key};
use crate::domain::model::Disclosure;
use crate::utils::throttle::Throttle;
use std::time::Duration;

const SCROLLED_OFFSET: f64 = 50.0;

#[derive(Debug, Clone, Copy)]
struct MobileMenu {
    toggle: ElementId,
    menu: ElementId,
}

/// Mobile menu open/close plus the header's `scrolled` shadow class.
#[derive(Debug, Clone)]
pub struct NavigationController {
    header: Option<ElementId>,
    menu: Option<MobileMenu>,
    state: Disclosure,
    throttle: Throttle,
}

impl NavigationController {
    pub fn new(header: Option<ElementId>, toggle: Option<ElementId>, menu: Option<ElementId>) -> Self {
        Self {
            header,
            menu: toggle.zip(menu).map(|(toggle, menu)| MobileMenu { toggle, menu }),
            state: Disclosure::Collapsed,
            throttle: Throttle::new(SCROLL_THROTTLE),
        }
    }

    pub fn attach(doc: &mut Document) -> Option<Self> {
        let controller = Self::new(
            doc.get_element_by_id("site-header"),
            doc.get_element_by_id("nav-toggle"),
            doc.get_element_by_id("nav-menu"),
        );
        if controller.header.is_none() && controller.menu.is_none() {
            return None;
        }
        controller.render(doc);
        Some(controller)
    }

    pub fn state(&self) -> Disclosure {
        self.state
    }

    fn set_state(&mut self, doc: &mut Document, state: Disclosure) {
        if self.state != state {
            tracing::debug!("Navigation menu -> {:?}", state);
            self.state = state;
            self.render(doc);
        }
    }

    fn render(&self, doc: &mut Document) {
        let Some(MobileMenu { toggle, menu }) = self.menu else {
            return;
        };
        let open = self.state.is_expanded();
        doc.toggle_class(menu, "active", open);
        doc.toggle_class(toggle, "active", open);
        doc.set_attr(toggle, "aria-expanded", self.state.aria());
        let body = doc.body();
        doc.toggle_class(body, "menu-open", open);
    }
}

impl Controller for NavigationController {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn handle(&mut self, doc: &mut Document, event: &Event, _now: Duration) -> EventOutcome {
        let Some(MobileMenu { toggle, menu }) = self.menu else {
            return EventOutcome::Ignored;
        };
        match event {
            Event::Click(target) if doc.contains(toggle, *target) => {
                let next = if self.state.is_expanded() {
                    Disclosure::Collapsed
                } else {
                    Disclosure::Expanded
                };
                self.set_state(doc, next);
                EventOutcome::Handled
            }
            Event::Click(target) if self.state.is_expanded() => {
                let on_link = doc
                    .closest(*target, |e| e.classes.contains("nav-link"))
                    .is_some();
                if on_link || !doc.contains(menu, *target) {
                    self.set_state(doc, Disclosure::Collapsed);
                    EventOutcome::Handled
                } else {
                    EventOutcome::Ignored
                }
            }
            Event::KeyDown(Key::Escape) if self.state.is_expanded() => {
                self.set_state(doc, Disclosure::Collapsed);
                doc.focus(toggle);
                EventOutcome::Handled
            }
            _ => EventOutcome::Ignored,
        }
    }

    fn on_scroll(&mut self, doc: &mut Document, now: Duration) {
        if let Some(header) = self.header {
            if self.throttle.ready(now) {
                let scrolled = doc.scroll_y() > SCROLLED_OFFSET;
                doc.toggle_class(header, "scrolled", scrolled);
            }
        }
    }
}
