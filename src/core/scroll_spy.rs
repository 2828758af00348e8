use crate::core::{Controller, SCROLL_THROTTLE};
use crate::dom::{Document, ElementId};
use crate::utils::throttle::Throttle;
use std::time::Duration;

const PROBE_OFFSET: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct ScrollSpyController {
    links: Vec<(ElementId, ElementId)>,
    active: Option<usize>,
    throttle: Throttle,
}

impl ScrollSpyController {
    /// `links` pairs each nav link with the section it points at.
    pub fn new(links: Vec<(ElementId, ElementId)>) -> Self {
        Self {
            links,
            active: None,
            throttle: Throttle::new(SCROLL_THROTTLE),
        }
    }

    pub fn attach(doc: &mut Document) -> Option<Self> {
        let links: Vec<(ElementId, ElementId)> = doc
            .query_class("nav-link")
            .into_iter()
            .filter_map(|link| {
                let fragment = doc.attr(link, "href")?.strip_prefix('#')?;
                let section = doc.get_element_by_id(fragment)?;
                Some((link, section))
            })
            .collect();
        (!links.is_empty()).then(|| Self::new(links))
    }

    pub fn active_link(&self) -> Option<ElementId> {
        self.active.map(|i| self.links[i].0)
    }

    pub fn refresh(&mut self, doc: &mut Document) {
        let probe = doc.scroll_y() + PROBE_OFFSET;
        let active = self.links.iter().position(|(_, section)| {
            let top = doc.top(*section);
            probe >= top && probe < top + doc.height(*section)
        });
        if active != self.active {
            tracing::debug!("Scroll spy active link -> {:?}", active);
        }
        self.active = active;

        for (i, (link, _)) in self.links.iter().enumerate() {
            let is_active = Some(i) == active;
            doc.toggle_class(*link, "active", is_active);
            if is_active {
                doc.set_attr(*link, "aria-current", "true");
            } else {
                doc.remove_attr(*link, "aria-current");
            }
        }
    }
}

impl Controller for ScrollSpyController {
    fn name(&self) -> &'static str {
        "scroll-spy"
    }

    fn on_scroll(&mut self, doc: &mut Document, now: Duration) {
        if self.throttle.ready(now) {
            self.refresh(doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ScrollBehavior;

    #[test]
    fn test_highlights_section_under_offset_line() {
        let mut doc = Document::new(800.0);
        let body = doc.body();
        let nav = doc.create_element(body, "nav");
        let mut links = Vec::new();
        for (i, id) in ["home", "features", "contact"].iter().enumerate() {
            let link = doc.create_element(nav, "a");
            doc.add_class(link, "nav-link");
            doc.set_attr(link, "href", format!("#{}", id));
            let section = doc.create_element(body, "section");
            doc.set_attr(section, "id", *id);
            doc.set_layout(section, i as f64 * 1000.0, 1000.0);
            links.push(link);
        }
        // external link is not tracked
        let external = doc.create_element(nav, "a");
        doc.add_class(external, "nav-link");
        doc.set_attr(external, "href", "https://example.com");

        let mut spy = ScrollSpyController::attach(&mut doc).unwrap();
        spy.on_scroll(&mut doc, Duration::from_millis(0));
        assert_eq!(spy.active_link(), Some(links[0]));
        assert_eq!(doc.attr(links[0], "aria-current"), Some("true"));

        doc.scroll_to(950.0, ScrollBehavior::Instant);
        spy.on_scroll(&mut doc, Duration::from_millis(30));
        assert_eq!(spy.active_link(), Some(links[0]), "throttled");

        spy.on_scroll(&mut doc, Duration::from_millis(100));
        assert_eq!(spy.active_link(), Some(links[1]));
        assert!(doc.has_class(links[1], "active"));
        assert!(!doc.has_class(links[0], "active"));
        assert_eq!(doc.attr(links[0], "aria-current"), None);

        doc.scroll_to(5000.0, ScrollBehavior::Instant);
        spy.on_scroll(&mut doc, Duration::from_millis(300));
        assert_eq!(spy.active_link(), None);
    }
}
