use crate::core::Controller;
use crate::dom::{Document, ElementId, IntersectionObserver, ViewportBand};
use std::time::Duration;

pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);
const COUNTER_THRESHOLD: f64 = 0.5;

pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Value shown `elapsed` into the animation: truncated while running,
/// exactly `target` once the window is over.
pub fn counter_value(target: u64, elapsed: Duration) -> u64 {
    let progress = (elapsed.as_secs_f64() / COUNTER_DURATION.as_secs_f64()).min(1.0);
    if progress >= 1.0 {
        return target;
    }
    ((target as f64) * ease_out_cubic(progress)).floor() as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    Waiting,
    /// Became visible; starts on the next animation frame.
    Armed,
    Running { started: Duration },
    Done,
}

#[derive(Debug, Clone)]
struct Counter {
    element: ElementId,
    target: u64,
    suffix: String,
    state: CounterState,
}

impl Counter {
    fn show(&self, doc: &mut Document, value: u64) {
        doc.set_text(self.element, format!("{}{}", value, self.suffix));
    }
}

#[derive(Debug, Clone)]
pub struct CounterAnimationController {
    counters: Vec<Counter>,
    observer: IntersectionObserver,
}

impl CounterAnimationController {
    pub fn attach(doc: &mut Document, reduced_motion: bool) -> Option<Self> {
        let mut counters = Vec::new();
        let mut observer = IntersectionObserver::new(ViewportBand::FULL, COUNTER_THRESHOLD);

        for element in doc.query_class("counter") {
            let Some(raw) = doc.attr(element, "data-target") else {
                continue;
            };
            let target = match raw.trim().parse::<u64>() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!("Skipping counter with data-target '{}': {}", raw, e);
                    continue;
                }
            };
            let suffix = doc.attr(element, "data-suffix").unwrap_or_default().to_string();
            let mut counter = Counter {
                element,
                target,
                suffix,
                state: CounterState::Waiting,
            };
            if reduced_motion {
                counter.show(doc, target);
                counter.state = CounterState::Done;
            } else {
                observer.observe(element);
            }
            counters.push(counter);
        }

        (!counters.is_empty()).then_some(Self { counters, observer })
    }

    pub fn state_of(&self, element: ElementId) -> Option<CounterState> {
        self.counters
            .iter()
            .find(|c| c.element == element)
            .map(|c| c.state)
    }
}

impl Controller for CounterAnimationController {
    fn name(&self) -> &'static str {
        "counter-animation"
    }

    fn on_scroll(&mut self, doc: &mut Document, _now: Duration) {
        for change in self.observer.poll(doc) {
            if !change.is_intersecting {
                continue;
            }
            self.observer.unobserve(change.target);
            if let Some(counter) = self.counters.iter_mut().find(|c| c.element == change.target) {
                if counter.state == CounterState::Waiting {
                    counter.state = CounterState::Armed;
                }
            }
        }
    }

    /// Animation frame.
    fn tick(&mut self, doc: &mut Document, now: Duration) {
        for counter in self.counters.iter_mut() {
            match counter.state {
                CounterState::Armed => {
                    counter.state = CounterState::Running { started: now };
                    counter.show(doc, 0);
                }
                CounterState::Running { started } => {
                    let elapsed = now.saturating_sub(started);
                    counter.show(doc, counter_value(counter.target, elapsed));
                    if elapsed >= COUNTER_DURATION {
                        counter.state = CounterState::Done;
                    }
                }
                CounterState::Waiting | CounterState::Done => {}
            }
        }
    }
}
