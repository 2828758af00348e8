use crate::dom::document::{Document, ElementId};
use std::collections::HashSet;

/// The slice of the viewport an observer treats as its root, as fractions of
/// the viewport height plus a pixel inset on the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBand {
    pub top: f64,
    pub bottom: f64,
    pub bottom_inset: f64,
}

impl ViewportBand {
    pub const FULL: ViewportBand = ViewportBand {
        top: 0.0,
        bottom: 1.0,
        bottom_inset: 0.0,
    };

    pub fn inset_bottom(px: f64) -> Self {
        Self {
            bottom_inset: px,
            ..Self::FULL
        }
    }

    pub fn fractions(top: f64, bottom: f64) -> Self {
        Self {
            top,
            bottom,
            bottom_inset: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Polled counterpart of the browser's IntersectionObserver: `poll` reports
/// the targets whose intersecting state changed since the previous poll.
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    band: ViewportBand,
    threshold: f64,
    targets: Vec<ElementId>,
    intersecting: HashSet<ElementId>,
}

impl IntersectionObserver {
    pub fn new(band: ViewportBand, threshold: f64) -> Self {
        Self {
            band,
            threshold,
            targets: Vec::new(),
            intersecting: HashSet::new(),
        }
    }

    pub fn observe(&mut self, target: ElementId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    pub fn unobserve(&mut self, target: ElementId) {
        self.targets.retain(|t| *t != target);
        self.intersecting.remove(&target);
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn ratio(&self, doc: &Document, target: ElementId) -> f64 {
        let vh = doc.viewport_height();
        let band_top = doc.scroll_y() + vh * self.band.top;
        let band_bottom = doc.scroll_y() + vh * self.band.bottom - self.band.bottom_inset;
        let top = doc.top(target);
        let height = doc.height(target);

        if height <= 0.0 {
            return if top >= band_top && top <= band_bottom { 1.0 } else { 0.0 };
        }
        let overlap = (top + height).min(band_bottom) - top.max(band_top);
        (overlap / height).clamp(0.0, 1.0)
    }

    pub fn poll(&mut self, doc: &Document) -> Vec<Intersection> {
        let mut changes = Vec::new();
        for target in self.targets.clone() {
            let ratio = self.ratio(doc, target);
            let is_intersecting = ratio > 0.0 && ratio >= self.threshold;
            let was_intersecting = self.intersecting.contains(&target);
            if is_intersecting != was_intersecting {
                if is_intersecting {
                    self.intersecting.insert(target);
                } else {
                    self.intersecting.remove(&target);
                }
                changes.push(Intersection {
                    target,
                    is_intersecting,
                    ratio,
                });
            }
        }
        changes
    }
}
