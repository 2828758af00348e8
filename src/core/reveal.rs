use crate::core::Controller;
use crate::dom::{Document, ElementId, IntersectionObserver, ViewportBand};
use std::time::Duration;

const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_BOTTOM_INSET: f64 = 50.0;

/// Adds `visible` to `.reveal` elements the first time they scroll into view.
#[derive(Debug, Clone)]
pub struct RevealOnScrollController {
    observer: IntersectionObserver,
}

impl RevealOnScrollController {
    pub fn new(doc: &mut Document, targets: Vec<ElementId>, reduced_motion: bool) -> Self {
        let mut observer = IntersectionObserver::new(
            ViewportBand::inset_bottom(REVEAL_BOTTOM_INSET),
            REVEAL_THRESHOLD,
        );
        for target in targets {
            if reduced_motion {
                doc.add_class(target, "visible");
            } else {
                observer.observe(target);
            }
        }
        Self { observer }
    }

    pub fn attach(doc: &mut Document, reduced_motion: bool) -> Option<Self> {
        let targets = doc.query_class("reveal");
        if targets.is_empty() {
            return None;
        }
        Some(Self::new(doc, targets, reduced_motion))
    }

    pub fn pending(&self) -> bool {
        !self.observer.is_empty()
    }
}

impl Controller for RevealOnScrollController {
    fn name(&self) -> &'static str {
        "reveal-on-scroll"
    }

    fn on_scroll(&mut self, doc: &mut Document, _now: Duration) {
        for change in self.observer.poll(doc) {
            if change.is_intersecting {
                doc.add_class(change.target, "visible");
                self.observer.unobserve(change.target);
            }
        }
    }
}
