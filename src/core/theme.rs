use crate::core::Controller;
use crate::dom::{Document, ElementId, Event, EventOutcome};
use crate::domain::model::{ColorScheme, Theme, THEME_STORAGE_KEY};
use crate::domain::ports::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;

/// Light/dark theme on the root element's `data-theme`. An explicit choice is
/// persisted; without one the OS preference is followed live.
pub struct ThemeController {
    root: ElementId,
    toggle: Option<ElementId>,
    store: Arc<dyn KeyValueStore>,
    theme: Theme,
}

impl ThemeController {
    pub fn attach(doc: &mut Document, store: Arc<dyn KeyValueStore>, system: ColorScheme) -> Self {
        let root = doc.root();
        let toggle = doc.get_element_by_id("theme-toggle");
        let mut controller = Self {
            root,
            toggle,
            store,
            theme: Theme::from(system),
        };
        if let Some(stored) = controller.stored_theme() {
            controller.theme = stored;
        }
        controller.apply(doc);
        controller
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn stored_theme(&self) -> Option<Theme> {
        match self.store.get(THEME_STORAGE_KEY) {
            Ok(Some(raw)) => match raw.parse() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!("Ignoring stored theme: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Could not read theme preference: {}", e);
                None
            }
        }
    }

    pub fn toggle(&mut self, doc: &mut Document) -> Theme {
        self.theme = self.theme.toggled();
        self.apply(doc);
        if let Err(e) = self.store.set(THEME_STORAGE_KEY, self.theme.as_str()) {
            tracing::warn!("Could not persist theme preference: {}", e);
        }
        tracing::debug!("Theme switched to {}", self.theme);
        self.theme
    }

    fn apply(&self, doc: &mut Document) {
        doc.set_attr(self.root, "data-theme", self.theme.as_str());
        if let Some(toggle) = self.toggle {
            let dark = self.theme == Theme::Dark;
            doc.set_attr(toggle, "aria-pressed", if dark { "true" } else { "false" });
            doc.set_attr(
                toggle,
                "aria-label",
                format!("Switch to {} theme", self.theme.toggled()),
            );
        }
    }
}

impl Controller for ThemeController {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn handle(&mut self, doc: &mut Document, event: &Event, _now: Duration) -> EventOutcome {
        match event {
            Event::Click(target) if self.toggle.is_some_and(|t| doc.contains(t, *target)) => {
                self.toggle(doc);
                EventOutcome::Handled
            }
            Event::ColorSchemeChanged(scheme) if self.stored_theme().is_none() => {
                self.theme = Theme::from(*scheme);
                self.apply(doc);
                EventOutcome::Handled
            }
            _ => EventOutcome::Ignored,
        }
    }
}
