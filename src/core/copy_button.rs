use crate::core::Controller;
use crate::dom::{Document, ElementId, Event, EventOutcome};
use crate::domain::ports::Clipboard;
use std::sync::Arc;
use std::time::Duration;

pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);
const COPIED_LABEL: &str = "Copied!";

#[derive(Debug, Clone)]
struct CopyButton {
    button: ElementId,
    label: String,
    revert_at: Option<Duration>,
}

pub struct CopyButtonController {
    buttons: Vec<CopyButton>,
    clipboard: Arc<dyn Clipboard>,
}

impl CopyButtonController {
    pub fn attach(doc: &mut Document, clipboard: Arc<dyn Clipboard>) -> Option<Self> {
        let buttons: Vec<CopyButton> = doc
            .query_class("copy-btn")
            .into_iter()
            .map(|button| CopyButton {
                button,
                label: doc.text(button).to_string(),
                revert_at: None,
            })
            .collect();
        (!buttons.is_empty()).then_some(Self { buttons, clipboard })
    }

    /// Text a copy button points at: `data-copy-text`, the element named by
    /// `data-copy-target`, or the `<code>` of the enclosing `.code-block`.
    pub fn source_text(doc: &Document, button: ElementId) -> Option<String> {
        if let Some(text) = doc.attr(button, "data-copy-text") {
            return Some(text.to_string());
        }
        if let Some(target) = doc.attr(button, "data-copy-target") {
            let target = doc.get_element_by_id(target.trim_start_matches('#'))?;
            return Some(doc.text_content(target));
        }
        let block = doc.closest(button, |e| e.classes.contains("code-block"))?;
        let code = doc.find_descendant(block, |e| e.tag == "code")?;
        Some(doc.text_content(code))
    }
}

impl Controller for CopyButtonController {
    fn name(&self) -> &'static str {
        "copy-button"
    }

    fn handle(&mut self, doc: &mut Document, event: &Event, now: Duration) -> EventOutcome {
        let Event::Click(target) = event else {
            return EventOutcome::Ignored;
        };
        let Some(entry) = self.buttons.iter_mut().find(|b| doc.contains(b.button, *target)) else {
            return EventOutcome::Ignored;
        };
        let Some(text) = Self::source_text(doc, entry.button) else {
            tracing::debug!("Copy button has nothing to copy");
            return EventOutcome::Ignored;
        };

        match self.clipboard.write_text(&text) {
            Ok(()) => {
                doc.set_text(entry.button, COPIED_LABEL);
                doc.add_class(entry.button, "copied");
                entry.revert_at = Some(now + COPY_FEEDBACK);
            }
            Err(e) => tracing::warn!("Copy to clipboard failed: {}", e),
        }
        EventOutcome::Handled
    }

    fn tick(&mut self, doc: &mut Document, now: Duration) {
        for entry in self.buttons.iter_mut() {
            if entry.revert_at.is_some_and(|at| now >= at) {
                entry.revert_at = None;
                doc.set_text(entry.button, entry.label.clone());
                doc.remove_class(entry.button, "copied");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clipboard::MemoryClipboard;

    fn page() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::default();
        let body = doc.body();
        let block = doc.create_element(body, "div");
        doc.add_class(block, "code-block");
        let pre = doc.create_element(block, "pre");
        let code = doc.create_element(pre, "code");
        doc.set_text(code, "cargo add serde");
        let in_block = doc.create_element(block, "button");
        doc.add_class(in_block, "copy-btn");
        doc.set_text(in_block, "Copy");

        let literal = doc.create_element(body, "button");
        doc.add_class(literal, "copy-btn");
        doc.set_attr(literal, "data-copy-text", "npm i");
        doc.set_text(literal, "Copy");

        let orphan = doc.create_element(body, "button");
        doc.add_class(orphan, "copy-btn");
        doc.set_attr(orphan, "data-copy-target", "#nothing");
        (doc, in_block, literal, orphan)
    }

    #[test]
    fn test_copies_and_reverts_after_two_seconds() {
        let (mut doc, in_block, literal, _) = page();
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut copy = CopyButtonController::attach(&mut doc, clipboard.clone()).unwrap();

        let t0 = Duration::from_millis(500);
        copy.handle(&mut doc, &Event::Click(in_block), t0);
        assert_eq!(clipboard.contents().as_deref(), Some("cargo add serde"));
        assert_eq!(doc.text(in_block), "Copied!");
        assert!(doc.has_class(in_block, "copied"));

        copy.handle(&mut doc, &Event::Click(literal), t0);
        assert_eq!(clipboard.contents().as_deref(), Some("npm i"));

        copy.tick(&mut doc, t0 + Duration::from_millis(1999));
        assert_eq!(doc.text(in_block), "Copied!");
        copy.tick(&mut doc, t0 + COPY_FEEDBACK);
        assert_eq!(doc.text(in_block), "Copy");
        assert!(!doc.has_class(in_block, "copied"));
    }

    #[test]
    fn test_clipboard_failure_is_silent() {
        let (mut doc, in_block, _, orphan) = page();
        let mut copy =
            CopyButtonController::attach(&mut doc, Arc::new(MemoryClipboard::denied())).unwrap();

        let outcome = copy.handle(&mut doc, &Event::Click(in_block), Duration::ZERO);
        assert_eq!(outcome, EventOutcome::Handled);
        assert_eq!(doc.text(in_block), "Copy");

        let outcome = copy.handle(&mut doc, &Event::Click(orphan), Duration::ZERO);
        assert_eq!(outcome, EventOutcome::Ignored);
    }

    #[test]
    fn test_highlighted_code_copies_without_separators() {
        let mut doc = Document::default();
        let body = doc.body();
        let block = doc.create_element(body, "div");
        doc.add_class(block, "code-block");
        let code = doc.create_element(block, "code");
        for token in ["let", " x", " = ", "foo", ".bar()"] {
            let span = doc.create_element(code, "span");
            doc.set_text(span, token);
        }
        let button = doc.create_element(block, "button");
        doc.add_class(button, "copy-btn");

        assert_eq!(
            CopyButtonController::source_text(&doc, button).as_deref(),
            Some("let x = foo.bar()")
        );
    }
}
