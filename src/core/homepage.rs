use crate::adapters::{MemoryClipboard, MemoryStore};
use crate::core::chat::{ChatWidgetController, CONTEXT_CHAR_LIMIT};
use crate::core::{
    ContactFormController, Controller, CopyButtonController, CounterAnimationController,
    ModalController, NavigationController, QuizController, RevealOnScrollController,
    ScrollSpyController, SmoothScrollController, ThemeController, TutorialFlowController,
};
use crate::dom::{Document, Event, EventOutcome, Key, ScrollBehavior};
use crate::domain::model::ColorScheme;
use crate::domain::ports::{Clipboard, GenerativeClient, KeyValueStore};
use crate::utils::error::{Result, WidgetError};
use crate::utils::validation::validate_non_empty_string;
use std::sync::Arc;
use std::time::Duration;

/// One animation frame at 60 Hz.
pub const FRAME: Duration = Duration::from_millis(16);

/// What the page gets from the browser around it.
#[derive(Clone)]
pub struct Environment {
    pub store: Arc<dyn KeyValueStore>,
    pub clipboard: Arc<dyn Clipboard>,
    pub color_scheme: ColorScheme,
    pub reduced_motion: bool,
    pub context_limit: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            clipboard: Arc::new(MemoryClipboard::new()),
            color_scheme: ColorScheme::Light,
            reduced_motion: false,
            context_limit: CONTEXT_CHAR_LIMIT,
        }
    }
}

struct Controllers {
    navigation: Option<NavigationController>,
    smooth_scroll: Option<SmoothScrollController>,
    scroll_spy: Option<ScrollSpyController>,
    reveal: Option<RevealOnScrollController>,
    counters: Option<CounterAnimationController>,
    contact_form: Option<ContactFormController>,
    quiz: Option<QuizController>,
    modal: Option<ModalController>,
    tutorial: Option<TutorialFlowController>,
    copy: Option<CopyButtonController>,
    theme: Option<ThemeController>,
    chat: Option<ChatWidgetController>,
}

impl Controllers {
    /// Attached controllers in dispatch order. The quiz fills its dialog
    /// before the modal controller opens it.
    fn table(&mut self) -> Vec<&mut dyn Controller> {
        let mut table: Vec<&mut dyn Controller> = Vec::with_capacity(12);
        if let Some(c) = self.navigation.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.smooth_scroll.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.scroll_spy.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.reveal.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.counters.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.contact_form.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.quiz.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.modal.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.tutorial.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.copy.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.theme.as_mut() {
            table.push(c);
        }
        if let Some(c) = self.chat.as_mut() {
            table.push(c);
        }
        table
    }
}

/// The page plus every controller attached to it.
///
/// Events go through [`Homepage::dispatch`], scrolling through
/// [`Homepage::scroll_to`] and the clock through [`Homepage::advance`].
pub struct Homepage {
    doc: Document,
    now: Duration,
    controllers: Controllers,
}

impl Homepage {
    pub fn init(mut doc: Document, env: Environment) -> Self {
        let reduced_motion = env.reduced_motion;
        let controllers = Controllers {
            navigation: NavigationController::attach(&mut doc),
            smooth_scroll: SmoothScrollController::attach(&mut doc, reduced_motion),
            scroll_spy: ScrollSpyController::attach(&mut doc),
            reveal: RevealOnScrollController::attach(&mut doc, reduced_motion),
            counters: CounterAnimationController::attach(&mut doc, reduced_motion),
            contact_form: ContactFormController::attach(&mut doc),
            quiz: QuizController::attach(&mut doc),
            modal: ModalController::attach(&mut doc),
            tutorial: TutorialFlowController::attach(&mut doc),
            copy: CopyButtonController::attach(&mut doc, env.clipboard.clone()),
            theme: Some(ThemeController::attach(
                &mut doc,
                env.store.clone(),
                env.color_scheme,
            )),
            chat: ChatWidgetController::attach(&mut doc, env.store.clone(), env.context_limit),
        };

        let mut page = Self {
            doc,
            now: Duration::ZERO,
            controllers,
        };
        let attached: Vec<&'static str> = page.controllers.table().iter().map(|c| c.name()).collect();
        tracing::info!("Homepage initialized with {} controllers", attached.len());
        tracing::debug!("Attached controllers: {}", attached.join(", "));

        page.after_scroll();
        page
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Names of the attached controllers in dispatch order.
    pub fn attached(&mut self) -> Vec<&'static str> {
        self.controllers.table().iter().map(|c| c.name()).collect()
    }

    pub fn dispatch(&mut self, event: Event) -> EventOutcome {
        let scroll_before = self.doc.scroll_y();
        let now = self.now;
        let mut outcome = EventOutcome::Ignored;
        for controller in self.controllers.table() {
            outcome = outcome.merge(controller.handle(&mut self.doc, &event, now));
        }

        if let Event::KeyDown(key @ (Key::Tab | Key::ShiftTab)) = event {
            if !outcome.default_prevented() {
                self.doc.move_focus(key == Key::Tab);
            }
        }
        if self.doc.scroll_y() != scroll_before {
            self.after_scroll();
        }
        outcome
    }

    pub fn click(&mut self, dom_id: &str) -> EventOutcome {
        match self.doc.get_element_by_id(dom_id) {
            Some(target) => self.dispatch(Event::Click(target)),
            None => {
                tracing::debug!("Nothing to click: no element '{}'", dom_id);
                EventOutcome::Ignored
            }
        }
    }

    /// User scroll to `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.doc.scroll_to(y, ScrollBehavior::Instant);
        self.after_scroll();
    }

    /// Moves the clock forward frame by frame, firing due timers.
    pub fn advance(&mut self, by: Duration) {
        let until = self.now + by;
        while self.now < until {
            self.now = (self.now + FRAME).min(until);
            let now = self.now;
            for controller in self.controllers.table() {
                controller.tick(&mut self.doc, now);
            }
        }
    }

    fn after_scroll(&mut self) {
        let now = self.now;
        for controller in self.controllers.table() {
            controller.on_scroll(&mut self.doc, now);
        }
    }

    /// Runs the chat request queued by the last send, if any.
    pub async fn send_chat<C>(&mut self, client: &C) -> Option<Result<String>>
    where
        C: GenerativeClient + ?Sized,
    {
        let chat = self.controllers.chat.as_mut()?;
        let request = chat.take_request()?;
        let outcome = client.generate(&request.api_key, &request.prompt).await;
        Some(chat.finish(&mut self.doc, outcome))
    }

    /// Types `question` into the chat input, sends it and waits for the reply.
    pub async fn ask<C>(&mut self, question: &str, client: &C) -> Result<String>
    where
        C: GenerativeClient + ?Sized,
    {
        validate_non_empty_string("question", question)?;
        let chat = self
            .controllers
            .chat
            .as_mut()
            .ok_or_else(|| WidgetError::ConfigError {
                message: "page has no chat widget".to_string(),
            })?;
        if chat.api_key().is_none() {
            return Err(WidgetError::MissingApiKey);
        }
        self.doc.set_value(chat.input(), question);
        let request = chat.begin_send(&mut self.doc).ok_or_else(|| WidgetError::ConfigError {
            message: "a chat request is already in flight".to_string(),
        })?;
        let outcome = client.generate(&request.api_key, &request.prompt).await;
        chat.finish(&mut self.doc, outcome)
    }

    pub fn navigation(&self) -> Option<&NavigationController> {
        self.controllers.navigation.as_ref()
    }

    pub fn scroll_spy(&self) -> Option<&ScrollSpyController> {
        self.controllers.scroll_spy.as_ref()
    }

    pub fn reveal(&self) -> Option<&RevealOnScrollController> {
        self.controllers.reveal.as_ref()
    }

    pub fn counters(&self) -> Option<&CounterAnimationController> {
        self.controllers.counters.as_ref()
    }

    pub fn contact_form(&self) -> Option<&ContactFormController> {
        self.controllers.contact_form.as_ref()
    }

    pub fn quiz(&self) -> Option<&QuizController> {
        self.controllers.quiz.as_ref()
    }

    pub fn modal(&self) -> Option<&ModalController> {
        self.controllers.modal.as_ref()
    }

    pub fn tutorial(&self) -> Option<&TutorialFlowController> {
        self.controllers.tutorial.as_ref()
    }

    pub fn theme(&self) -> Option<&ThemeController> {
        self.controllers.theme.as_ref()
    }

    pub fn theme_mut(&mut self) -> Option<(&mut ThemeController, &mut Document)> {
        let theme = self.controllers.theme.as_mut()?;
        Some((theme, &mut self.doc))
    }

    pub fn chat(&self) -> Option<&ChatWidgetController> {
        self.controllers.chat.as_ref()
    }
}
