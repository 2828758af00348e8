//! Tutorial accordion with a progress indicator.
//!
//! Two indices are tracked: `open` is the single expanded step, `active` is
//! the step the reader is looking at (set by opening a step or by scrolling
//! one into the 20%..60% viewport band) and drives the progress bar.

use crate::core::Controller;
use crate::dom::{Document, ElementId, Event, EventOutcome, IntersectionObserver, ScrollBehavior, ViewportBand};
use crate::domain::model::Disclosure;
use std::time::Duration;

const ACTIVE_BAND_TOP: f64 = 0.2;
const ACTIVE_BAND_BOTTOM: f64 = 0.6;

/// round(100 × (active + 1) / total)
pub fn progress_percent(active: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((active as f64 + 1.0) * 100.0 / total as f64).round() as u32
}

#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub root: ElementId,
    pub header: ElementId,
    pub content: Option<ElementId>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressElements {
    pub fill: Option<ElementId>,
    pub bar: Option<ElementId>,
    pub text: Option<ElementId>,
}

#[derive(Debug, Clone)]
pub struct TutorialFlowController {
    steps: Vec<Step>,
    prev: Option<ElementId>,
    next: Option<ElementId>,
    progress: ProgressElements,
    header: Option<ElementId>,
    open: usize,
    active: usize,
    observer: IntersectionObserver,
}

impl TutorialFlowController {
    pub fn new(
        doc: &mut Document,
        steps: Vec<Step>,
        prev: Option<ElementId>,
        next: Option<ElementId>,
        progress: ProgressElements,
        header: Option<ElementId>,
    ) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        let mut observer = IntersectionObserver::new(
            ViewportBand::fractions(ACTIVE_BAND_TOP, ACTIVE_BAND_BOTTOM),
            0.0,
        );
        for step in &steps {
            observer.observe(step.root);
        }
        let controller = Self {
            steps,
            prev,
            next,
            progress,
            header,
            open: 0,
            active: 0,
            observer,
        };
        controller.render(doc);
        Some(controller)
    }

    pub fn attach(doc: &mut Document) -> Option<Self> {
        let steps: Vec<Step> = doc
            .query_class("tutorial-step")
            .into_iter()
            .filter_map(|root| {
                let header = doc.find_descendant(root, |e| e.classes.contains("step-header"))?;
                let content = doc.find_descendant(root, |e| e.classes.contains("step-content"));
                Some(Step {
                    root,
                    header,
                    content,
                })
            })
            .collect();
        let progress = ProgressElements {
            fill: doc.get_element_by_id("progress-fill"),
            bar: doc.get_element_by_id("progress-bar"),
            text: doc.get_element_by_id("progress-text"),
        };
        let prev = doc.get_element_by_id("step-prev");
        let next = doc.get_element_by_id("step-next");
        let header = doc.get_element_by_id("site-header");
        Self::new(doc, steps, prev, next, progress, header)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn open_index(&self) -> usize {
        self.open
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn disclosure(&self, index: usize) -> Disclosure {
        if index == self.open {
            Disclosure::Expanded
        } else {
            Disclosure::Collapsed
        }
    }

    pub fn progress(&self) -> u32 {
        progress_percent(self.active, self.steps.len())
    }

    /// Expands `index` (clamped) and collapses every other step.
    pub fn open_step(&mut self, doc: &mut Document, index: usize) {
        let index = index.min(self.steps.len() - 1);
        self.open = index;
        self.active = index;
        tracing::debug!("Tutorial step {} of {} opened", index + 1, self.steps.len());
        self.render(doc);
    }

    pub fn previous(&mut self, doc: &mut Document) -> bool {
        if self.open == 0 {
            return false;
        }
        self.open_step(doc, self.open - 1);
        self.scroll_to_open(doc);
        true
    }

    pub fn next(&mut self, doc: &mut Document) -> bool {
        if self.open + 1 >= self.steps.len() {
            return false;
        }
        self.open_step(doc, self.open + 1);
        self.scroll_to_open(doc);
        true
    }

    fn scroll_to_open(&self, doc: &mut Document) {
        let header_height = self.header.map(|h| doc.height(h)).unwrap_or(0.0);
        let y = doc.top(self.steps[self.open].root) - header_height;
        doc.scroll_to(y, ScrollBehavior::Smooth);
    }

    fn render(&self, doc: &mut Document) {
        for (i, step) in self.steps.iter().enumerate() {
            let state = self.disclosure(i);
            doc.set_attr(step.header, "aria-expanded", state.aria());
            doc.toggle_class(step.root, "open", state.is_expanded());
            doc.toggle_class(step.root, "active", i == self.active);
            if let Some(content) = step.content {
                doc.set_hidden(content, !state.is_expanded());
            }
        }
        if let Some(prev) = self.prev {
            doc.set_disabled(prev, self.open == 0);
        }
        if let Some(next) = self.next {
            doc.set_disabled(next, self.open + 1 >= self.steps.len());
        }
        self.render_progress(doc);
    }

    fn render_progress(&self, doc: &mut Document) {
        let percent = self.progress();
        if let Some(fill) = self.progress.fill {
            doc.set_attr(fill, "style", format!("width: {}%", percent));
        }
        if let Some(bar) = self.progress.bar {
            doc.set_attr(bar, "aria-valuenow", percent.to_string());
        }
        if let Some(text) = self.progress.text {
            doc.set_text(text, format!("Step {} of {}", self.active + 1, self.steps.len()));
        }
    }
}

impl Controller for TutorialFlowController {
    fn name(&self) -> &'static str {
        "tutorial-flow"
    }

    fn handle(&mut self, doc: &mut Document, event: &Event, _now: Duration) -> EventOutcome {
        let Event::Click(target) = event else {
            return EventOutcome::Ignored;
        };
        if self.prev.is_some_and(|p| doc.contains(p, *target)) {
            return if self.previous(doc) {
                EventOutcome::Handled
            } else {
                EventOutcome::Ignored
            };
        }
        if self.next.is_some_and(|n| doc.contains(n, *target)) {
            return if self.next(doc) {
                EventOutcome::Handled
            } else {
                EventOutcome::Ignored
            };
        }
        match self.steps.iter().position(|s| doc.contains(s.header, *target)) {
            Some(index) => {
                self.open_step(doc, index);
                EventOutcome::Handled
            }
            None => EventOutcome::Ignored,
        }
    }

    fn on_scroll(&mut self, doc: &mut Document, _now: Duration) {
        let entered = self
            .observer
            .poll(doc)
            .into_iter()
            .filter(|c| c.is_intersecting)
            .filter_map(|c| self.steps.iter().position(|s| s.root == c.target))
            .last();
        if let Some(index) = entered {
            if index != self.active {
                self.active = index;
                self.render(doc);
            }
        }
    }
}
