pub mod chat;
pub mod contact_form;
pub mod copy_button;
pub mod counter;
pub mod homepage;
pub mod modal;
pub mod navigation;
pub mod quiz;
pub mod reveal;
pub mod scroll_spy;
pub mod smooth_scroll;
pub mod theme;
pub mod tutorial;

use crate::dom::{Document, Event, EventOutcome};
use std::time::Duration;

pub use chat::ChatWidgetController;
pub use contact_form::ContactFormController;
pub use copy_button::CopyButtonController;
pub use counter::CounterAnimationController;
pub use homepage::{Environment, Homepage};
pub use modal::ModalController;
pub use navigation::NavigationController;
pub use quiz::QuizController;
pub use reveal::RevealOnScrollController;
pub use scroll_spy::ScrollSpyController;
pub use smooth_scroll::SmoothScrollController;
pub use theme::ThemeController;
pub use tutorial::TutorialFlowController;

/// Scroll-driven work runs at most once per this interval.
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(100);

/// A page behaviour bound to the elements it drives.
///
/// `now` is the time since page load. Controllers never call each other;
/// [`Homepage`] fans every signal out to all of them.
pub trait Controller: Send {
    fn name(&self) -> &'static str;

    fn handle(&mut self, _doc: &mut Document, _event: &Event, _now: Duration) -> EventOutcome {
        EventOutcome::Ignored
    }

    /// Called after the scroll position changed.
    fn on_scroll(&mut self, _doc: &mut Document, _now: Duration) {}

    /// Called once per animation frame and for due timers.
    fn tick(&mut self, _doc: &mut Document, _now: Duration) {}
}
