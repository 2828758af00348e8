use crate::core::Controller;
use crate::dom::{Document, ElementId, Event, EventOutcome, ScrollBehavior};
use std::time::Duration;

/// Same-page `#id` anchors: scroll below the fixed header and move focus.
#[derive(Debug, Clone)]
pub struct SmoothScrollController {
    header: Option<ElementId>,
    behavior: ScrollBehavior,
}

impl SmoothScrollController {
    pub fn new(header: Option<ElementId>, reduced_motion: bool) -> Self {
        Self {
            header,
            behavior: if reduced_motion {
                ScrollBehavior::Instant
            } else {
                ScrollBehavior::Smooth
            },
        }
    }

    pub fn attach(doc: &mut Document, reduced_motion: bool) -> Option<Self> {
        let has_anchors = doc
            .query_attr("href")
            .into_iter()
            .any(|id| doc.tag(id) == "a" && doc.attr(id, "href").is_some_and(|h| h.starts_with('#')));
        has_anchors.then(|| Self::new(doc.get_element_by_id("site-header"), reduced_motion))
    }

    /// Scroll offset that puts `target` just below the header.
    pub fn offset_for(&self, doc: &Document, target: ElementId) -> f64 {
        let header_height = self.header.map(|h| doc.height(h)).unwrap_or(0.0);
        (doc.top(target) - header_height).max(0.0)
    }
}

impl Controller for SmoothScrollController {
    fn name(&self) -> &'static str {
        "smooth-scroll"
    }

    fn handle(&mut self, doc: &mut Document, event: &Event, _now: Duration) -> EventOutcome {
        let Event::Click(clicked) = event else {
            return EventOutcome::Ignored;
        };
        let Some(anchor) = doc.closest(*clicked, |e| {
            e.tag == "a" && e.attrs.get("href").is_some_and(|h| h.starts_with('#'))
        }) else {
            return EventOutcome::Ignored;
        };
        let fragment = doc.attr(anchor, "href").unwrap_or("#")[1..].to_string();
        if fragment.is_empty() {
            return EventOutcome::Ignored;
        }
        let Some(target) = doc.get_element_by_id(&fragment) else {
            tracing::debug!("Anchor #{} has no target, leaving default behaviour", fragment);
            return EventOutcome::Ignored;
        };

        let y = self.offset_for(doc, target);
        doc.scroll_to(y, self.behavior);
        if !doc.is_focusable(target) {
            doc.set_attr(target, "tabindex", "-1");
        }
        doc.focus(target);
        EventOutcome::DefaultPrevented
    }
}
