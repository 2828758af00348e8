//! In-memory element tree standing in for the browser DOM.
//!
//! Elements live in an arena and are addressed by [`ElementId`]. Layout is
//! reduced to a vertical box (`top`, `height`) in document coordinates,
//! which is all the scroll and intersection logic needs.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub html: Option<String>,
    pub value: String,
    pub top: f64,
    pub height: f64,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
    body: ElementId,
    focused: Option<ElementId>,
    scroll_y: f64,
    last_scroll_behavior: Option<ScrollBehavior>,
    viewport_height: f64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl Document {
    /// Creates an `<html>` root with a `<body>` child.
    pub fn new(viewport_height: f64) -> Self {
        let mut doc = Self {
            elements: vec![Element {
                tag: "html".to_string(),
                ..Element::default()
            }],
            root: ElementId(0),
            body: ElementId(0),
            focused: None,
            scroll_y: 0.0,
            last_scroll_behavior: None,
            viewport_height,
        };
        let root = doc.root;
        doc.body = doc.create_element(root, "body");
        doc
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn create_element(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent),
            ..Element::default()
        });
        self.elements[parent.0].children.push(id);
        id
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn tag(&self, id: ElementId) -> &str {
        &self.elements[id.0].tag
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements[id.0].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id.0].children
    }

    /// Descendants of `id` in document (pre-)order, excluding `id`.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// All elements in document order.
    pub fn all(&self) -> Vec<ElementId> {
        let mut out = vec![self.root];
        out.extend(self.descendants(self.root));
        out
    }

    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Nearest inclusive ancestor satisfying `pred`.
    pub fn closest(&self, from: ElementId, pred: impl Fn(&Element) -> bool) -> Option<ElementId> {
        let mut current = Some(from);
        while let Some(id) = current {
            if pred(self.element(id)) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    pub fn get_element_by_id(&self, dom_id: &str) -> Option<ElementId> {
        self.all()
            .into_iter()
            .find(|id| self.attr(*id, "id") == Some(dom_id))
    }

    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.all()
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    pub fn query_attr(&self, name: &str) -> Vec<ElementId> {
        self.all()
            .into_iter()
            .filter(|id| self.attr(*id, name).is_some())
            .collect()
    }

    pub fn find_descendant(
        &self,
        within: ElementId,
        pred: impl Fn(&Element) -> bool,
    ) -> Option<ElementId> {
        self.descendants(within)
            .into_iter()
            .find(|id| pred(self.element(*id)))
    }

    // attributes and classes

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements[id.0].attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        self.elements[id.0].attrs.insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        self.elements[id.0].attrs.remove(name);
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements[id.0].classes.contains(class)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        self.elements[id.0].classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.elements[id.0].classes.remove(class);
    }

    pub fn toggle_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if disabled {
            self.set_attr(id, "disabled", "");
        } else {
            self.remove_attr(id, "disabled");
        }
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.attr(id, "disabled").is_some()
    }

    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        if hidden {
            self.set_attr(id, "hidden", "");
        } else {
            self.remove_attr(id, "hidden");
        }
    }

    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.attr(id, "hidden").is_some() || self.attr(id, "aria-hidden") == Some("true")
    }

    // content

    pub fn text(&self, id: ElementId) -> &str {
        &self.elements[id.0].text
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        let el = &mut self.elements[id.0];
        el.text = text.into();
        el.html = None;
    }

    pub fn html(&self, id: ElementId) -> Option<&str> {
        self.elements[id.0].html.as_deref()
    }

    pub fn set_html(&mut self, id: ElementId, html: impl Into<String>) {
        self.elements[id.0].html = Some(html.into());
    }

    /// Own text followed by the text of every descendant, concatenated.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = self.text(id).to_string();
        for d in self.descendants(id) {
            out.push_str(self.text(d));
        }
        out
    }

    pub fn value(&self, id: ElementId) -> &str {
        &self.elements[id.0].value
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        self.elements[id.0].value = value.into();
    }

    // layout and scrolling

    pub fn set_layout(&mut self, id: ElementId, top: f64, height: f64) {
        let el = &mut self.elements[id.0];
        el.top = top;
        el.height = height;
    }

    pub fn top(&self, id: ElementId) -> f64 {
        self.elements[id.0].top
    }

    pub fn height(&self, id: ElementId) -> f64 {
        self.elements[id.0].height
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        self.scroll_y = y.max(0.0);
        self.last_scroll_behavior = Some(behavior);
    }

    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.last_scroll_behavior
    }

    // focus

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn focus(&mut self, id: ElementId) {
        self.focused = Some(id);
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn is_focusable(&self, id: ElementId) -> bool {
        if self.is_disabled(id) || self.attr(id, "hidden").is_some() {
            return false;
        }
        if let Some(index) = self.attr(id, "tabindex") {
            return index.trim().parse::<i32>().map(|i| i >= 0).unwrap_or(false);
        }
        match self.tag(id) {
            "a" => self.attr(id, "href").is_some(),
            "button" | "input" | "select" | "textarea" => true,
            _ => false,
        }
    }

    pub fn focusable_descendants(&self, within: ElementId) -> Vec<ElementId> {
        self.descendants(within)
            .into_iter()
            .filter(|id| self.is_focusable(*id))
            .collect()
    }

    /// Default Tab behaviour: next (or previous) focusable element in
    /// document order, wrapping at the ends.
    pub fn move_focus(&mut self, forward: bool) {
        let order: Vec<ElementId> = self
            .all()
            .into_iter()
            .filter(|id| self.is_focusable(*id))
            .collect();
        if order.is_empty() {
            return;
        }
        let position = self.focused.and_then(|f| order.iter().position(|id| *id == f));
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => order.len() - 1,
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
        };
        self.focused = Some(order[next]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_queries() {
        let mut doc = Document::new(600.0);
        let body = doc.body();
        let section = doc.create_element(body, "section");
        doc.set_attr(section, "id", "intro");
        let button = doc.create_element(section, "button");
        doc.add_class(button, "copy-btn");
        let span = doc.create_element(button, "span");

        assert_eq!(doc.get_element_by_id("intro"), Some(section));
        assert_eq!(doc.query_class("copy-btn"), vec![button]);
        assert!(doc.contains(section, span));
        assert!(!doc.contains(span, section));
        assert_eq!(doc.closest(span, |e| e.tag == "section"), Some(section));
        assert_eq!(doc.descendants(section), vec![button, span]);
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let mut doc = Document::default();
        let body = doc.body();
        let code = doc.create_element(body, "code");
        let ident = doc.create_element(code, "span");
        doc.set_text(ident, "foo");
        let call = doc.create_element(code, "span");
        doc.set_text(call, ".bar()");
        assert_eq!(doc.text_content(code), "foo.bar()");
    }

    #[test]
    fn test_focusability() {
        let mut doc = Document::default();
        let body = doc.body();
        let link = doc.create_element(body, "a");
        let anchor_without_href = doc.create_element(body, "a");
        let button = doc.create_element(body, "button");
        let div = doc.create_element(body, "div");
        doc.set_attr(link, "href", "#x");

        assert!(doc.is_focusable(link));
        assert!(!doc.is_focusable(anchor_without_href));
        assert!(doc.is_focusable(button));
        assert!(!doc.is_focusable(div));

        doc.set_attr(div, "tabindex", "-1");
        assert!(!doc.is_focusable(div));
        doc.set_attr(div, "tabindex", "0");
        assert!(doc.is_focusable(div));

        doc.set_disabled(button, true);
        assert!(!doc.is_focusable(button));
    }

    #[test]
    fn test_move_focus_wraps() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = doc.create_element(body, "button");
        let b = doc.create_element(body, "button");
        doc.move_focus(true);
        assert_eq!(doc.focused(), Some(a));
        doc.move_focus(true);
        assert_eq!(doc.focused(), Some(b));
        doc.move_focus(true);
        assert_eq!(doc.focused(), Some(a));
        doc.move_focus(false);
        assert_eq!(doc.focused(), Some(b));
    }

    #[test]
    fn test_scroll_never_negative() {
        let mut doc = Document::default();
        doc.scroll_to(-20.0, ScrollBehavior::Smooth);
        assert_eq!(doc.scroll_y(), 0.0);
        assert_eq!(doc.last_scroll_behavior(), Some(ScrollBehavior::Smooth));
    }
}
