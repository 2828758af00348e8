use crate::dom::document::ElementId;
use crate::domain::model::ColorScheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    ShiftTab,
    Enter,
    Other(char),
}

/// User and environment events the page reacts to. Scroll, timer and
/// animation-frame signals are driven through `Homepage` directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click(ElementId),
    KeyDown(Key),
    Submit(ElementId),
    Input(ElementId),
    ColorSchemeChanged(ColorScheme),
}

/// Mirrors `preventDefault`: whether a controller consumed the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Handled,
    DefaultPrevented,
}

impl EventOutcome {
    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        use EventOutcome::*;
        match (self, other) {
            (DefaultPrevented, _) | (_, DefaultPrevented) => DefaultPrevented,
            (Handled, _) | (_, Handled) => Handled,
            _ => Ignored,
        }
    }

    pub fn default_prevented(self) -> bool {
        self == EventOutcome::DefaultPrevented
    }
}
