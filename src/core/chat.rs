//! Floating chat panel backed by a generative-language endpoint.
//!
//! Sending is split in two so the request itself can run as an async task:
//! [`ChatWidgetController::begin_send`] validates, records the question and
//! locks the send control; [`ChatWidgetController::finish`] renders the
//! outcome and unlocks it. While a request is in flight no second one can
//! be started.

use crate::core::Controller;
use crate::dom::{Document, ElementId, Event, EventOutcome, Key};
use crate::domain::model::{ChatMessage, ChatRequest, ChatRole, API_KEY_STORAGE_KEY};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use crate::utils::markdown::render_markdown;
use std::sync::Arc;
use std::time::Duration;

pub const CONTEXT_CHAR_LIMIT: usize = 6000;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant for this tutorial page. \
Answer the user's question using only the context provided below. \
If the answer is not in the context, say that you don't know.";

pub const FAILURE_MESSAGE: &str = "Sorry, I couldn't get a response. Please try again.";

const NEEDS_KEY_STATUS: &str = "Add your Gemini API key to start chatting.";
const THINKING_STATUS: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    InFlight,
}

/// Elements the widget drives. The first five are required.
#[derive(Debug, Clone, Copy)]
pub struct ChatElements {
    pub launcher: ElementId,
    pub panel: ElementId,
    pub input: ElementId,
    pub send: ElementId,
    pub transcript: ElementId,
    pub close: Option<ElementId>,
    pub status: Option<ElementId>,
    pub key_input: Option<ElementId>,
    pub key_save: Option<ElementId>,
    pub context: Option<ElementId>,
}

impl ChatElements {
    pub fn locate(doc: &Document) -> Option<Self> {
        Some(Self {
            launcher: doc.get_element_by_id("chat-launcher")?,
            panel: doc.get_element_by_id("chat-panel")?,
            input: doc.get_element_by_id("chat-input")?,
            send: doc.get_element_by_id("chat-send")?,
            transcript: doc.get_element_by_id("chat-messages")?,
            close: doc.get_element_by_id("chat-close"),
            status: doc.get_element_by_id("chat-status"),
            key_input: doc.get_element_by_id("chat-api-key"),
            key_save: doc.get_element_by_id("chat-save-key"),
            context: doc.get_element_by_id("tutorial"),
        })
    }
}

/// Prompt sent as the single user turn.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "{}\n\nContext:\n{}\n\nQuestion: {}",
        SYSTEM_INSTRUCTION, context, question
    )
}

/// Visible text under `source`, whitespace collapsed, cut to `limit` chars.
pub fn scrape_context(doc: &Document, source: ElementId, limit: usize) -> String {
    let mut words: Vec<&str> = Vec::new();
    let mut stack = vec![source];
    while let Some(id) = stack.pop() {
        if doc.is_hidden(id) || matches!(doc.tag(id), "script" | "style" | "noscript") {
            continue;
        }
        words.extend(doc.text(id).split_whitespace());
        stack.extend(doc.children(id).iter().rev());
    }
    words.join(" ").chars().take(limit).collect()
}

pub struct ChatWidgetController {
    elements: ChatElements,
    store: Arc<dyn KeyValueStore>,
    context_limit: usize,
    panel: PanelState,
    request: RequestState,
    messages: Vec<ChatMessage>,
    outbox: Option<ChatRequest>,
}

impl ChatWidgetController {
    pub fn new(
        doc: &mut Document,
        elements: ChatElements,
        store: Arc<dyn KeyValueStore>,
        context_limit: usize,
    ) -> Self {
        let controller = Self {
            elements,
            store,
            context_limit,
            panel: PanelState::Closed,
            request: RequestState::Idle,
            messages: Vec::new(),
            outbox: None,
        };
        controller.render_panel(doc);
        controller.render_controls(doc);
        if controller.api_key().is_none() {
            controller.set_status(doc, NEEDS_KEY_STATUS);
        }
        controller
    }

    pub fn attach(
        doc: &mut Document,
        store: Arc<dyn KeyValueStore>,
        context_limit: usize,
    ) -> Option<Self> {
        let elements = ChatElements::locate(doc)?;
        Some(Self::new(doc, elements, store, context_limit))
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn api_key(&self) -> Option<String> {
        match self.store.get(API_KEY_STORAGE_KEY) {
            Ok(key) => key.filter(|k| !k.trim().is_empty()),
            Err(e) => {
                tracing::warn!("Could not read API key: {}", e);
                None
            }
        }
    }

    pub fn open(&mut self, doc: &mut Document) {
        self.panel = PanelState::Open;
        self.render_panel(doc);
        let input = self.elements.input;
        if !doc.is_disabled(input) {
            doc.focus(input);
        } else if let Some(key_input) = self.elements.key_input {
            doc.focus(key_input);
        }
    }

    pub fn close(&mut self, doc: &mut Document) {
        self.panel = PanelState::Closed;
        self.render_panel(doc);
        doc.focus(self.elements.launcher);
    }

    /// Stores the key typed into the key field; blank input is rejected.
    pub fn save_key(&mut self, doc: &mut Document) -> bool {
        let Some(key_input) = self.elements.key_input else {
            return false;
        };
        let key = doc.value(key_input).trim().to_string();
        if key.is_empty() {
            self.set_status(doc, "Please enter an API key.");
            return false;
        }
        if let Err(e) = self.store.set(API_KEY_STORAGE_KEY, &key) {
            tracing::warn!("Could not store API key: {}", e);
            self.set_status(doc, "Could not save the API key.");
            return false;
        }
        doc.set_value(key_input, "");
        self.render_controls(doc);
        self.set_status(doc, "API key saved. Ask away!");
        true
    }

    /// Starts a request for the question in the input, or `None` when one is
    /// already running, no key is stored or the question is blank.
    pub fn begin_send(&mut self, doc: &mut Document) -> Option<ChatRequest> {
        if self.request == RequestState::InFlight {
            tracing::debug!("Chat request already in flight, ignoring send");
            return None;
        }
        let Some(api_key) = self.api_key() else {
            self.set_status(doc, NEEDS_KEY_STATUS);
            return None;
        };
        let question = doc.value(self.elements.input).trim().to_string();
        if question.is_empty() {
            return None;
        }

        self.append(doc, ChatMessage::new(ChatRole::User, question.clone()));
        doc.set_value(self.elements.input, "");
        self.request = RequestState::InFlight;
        self.render_controls(doc);
        self.set_status(doc, THINKING_STATUS);

        let context = self
            .elements
            .context
            .map(|source| scrape_context(doc, source, self.context_limit))
            .unwrap_or_default();
        tracing::debug!(
            "Chat request prepared ({} context chars)",
            context.chars().count()
        );
        Some(ChatRequest {
            api_key,
            prompt: build_prompt(&context, &question),
        })
    }

    /// Renders the outcome of the request started by `begin_send` and hands
    /// it back to the caller.
    pub fn finish(&mut self, doc: &mut Document, outcome: Result<String>) -> Result<String> {
        if self.request != RequestState::InFlight {
            tracing::warn!("Chat response arrived with no request in flight");
            return outcome;
        }
        match &outcome {
            Ok(reply) => {
                self.append(doc, ChatMessage::new(ChatRole::Assistant, reply.clone()));
                self.set_status(doc, "");
            }
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                self.append(doc, ChatMessage::new(ChatRole::Assistant, FAILURE_MESSAGE));
                self.set_status(doc, &format!("Error: {}", e));
            }
        }
        self.request = RequestState::Idle;
        self.render_controls(doc);
        if self.panel == PanelState::Open {
            doc.focus(self.elements.input);
        }
        outcome
    }

    pub fn input(&self) -> ElementId {
        self.elements.input
    }

    /// Request queued by a send event, for the caller to execute.
    pub fn take_request(&mut self) -> Option<ChatRequest> {
        self.outbox.take()
    }

    fn queue_send(&mut self, doc: &mut Document) -> EventOutcome {
        match self.begin_send(doc) {
            Some(request) => {
                self.outbox = Some(request);
                EventOutcome::DefaultPrevented
            }
            None => EventOutcome::Handled,
        }
    }

    fn append(&mut self, doc: &mut Document, message: ChatMessage) {
        let bubble = doc.create_element(self.elements.transcript, "div");
        doc.add_class(bubble, "chat-message");
        match message.role {
            ChatRole::User => {
                doc.add_class(bubble, "user");
                doc.set_text(bubble, message.content.clone());
            }
            ChatRole::Assistant => {
                doc.add_class(bubble, "assistant");
                doc.set_text(bubble, message.content.clone());
                doc.set_html(bubble, render_markdown(&message.content));
            }
        }
        self.messages.push(message);
    }

    fn set_status(&self, doc: &mut Document, status: &str) {
        if let Some(line) = self.elements.status {
            doc.set_text(line, status);
        }
    }

    fn render_panel(&self, doc: &mut Document) {
        let open = self.panel == PanelState::Open;
        doc.toggle_class(self.elements.panel, "open", open);
        doc.set_attr(self.elements.panel, "aria-hidden", if open { "false" } else { "true" });
        doc.set_attr(self.elements.launcher, "aria-expanded", if open { "true" } else { "false" });
    }

    fn render_controls(&self, doc: &mut Document) {
        let has_key = self.api_key().is_some();
        doc.set_disabled(self.elements.input, !has_key);
        doc.set_disabled(
            self.elements.send,
            !has_key || self.request == RequestState::InFlight,
        );
    }
}

impl Controller for ChatWidgetController {
    fn name(&self) -> &'static str {
        "chat-widget"
    }

    fn handle(&mut self, doc: &mut Document, event: &Event, _now: Duration) -> EventOutcome {
        let els = self.elements;
        match event {
            Event::Click(target) if doc.contains(els.launcher, *target) => {
                match self.panel {
                    PanelState::Open => self.close(doc),
                    PanelState::Closed => self.open(doc),
                }
                EventOutcome::Handled
            }
            Event::Click(target) if els.close.is_some_and(|c| doc.contains(c, *target)) => {
                self.close(doc);
                EventOutcome::Handled
            }
            Event::Click(target) if els.key_save.is_some_and(|s| doc.contains(s, *target)) => {
                self.save_key(doc);
                EventOutcome::DefaultPrevented
            }
            Event::Click(target) if doc.contains(els.send, *target) => {
                if doc.is_disabled(els.send) {
                    return EventOutcome::Ignored;
                }
                self.queue_send(doc)
            }
            Event::KeyDown(Key::Enter) if doc.focused() == Some(els.input) => self.queue_send(doc),
            Event::KeyDown(Key::Escape) if self.panel == PanelState::Open => {
                self.close(doc);
                EventOutcome::Handled
            }
            _ => EventOutcome::Ignored,
        }
    }
}
