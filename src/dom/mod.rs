pub mod document;
pub mod event;
pub mod observer;

pub use document::{Document, Element, ElementId, ScrollBehavior};
pub use event::{Event, EventOutcome, Key};
pub use observer::{Intersection, IntersectionObserver, ViewportBand};
