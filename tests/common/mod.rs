#![allow(dead_code)]

use homepage_widgets::{Document, ElementId};

/// Element handles of the fixture homepage.
pub struct Fixture {
    pub doc: Document,
    pub header: ElementId,
    pub nav_toggle: ElementId,
    pub nav_menu: ElementId,
    pub link_home: ElementId,
    pub link_features: ElementId,
    pub link_tutorial: ElementId,
    pub features: ElementId,
    pub counter: ElementId,
    pub card: ElementId,
    pub step_headers: Vec<ElementId>,
    pub step_contents: Vec<ElementId>,
    pub step_prev: ElementId,
    pub step_next: ElementId,
    pub progress_fill: ElementId,
    pub progress_text: ElementId,
    pub copy_btn: ElementId,
    pub quiz_trigger: ElementId,
    pub quiz_modal: ElementId,
    pub quiz_question: ElementId,
    pub quiz_options: Vec<ElementId>,
    pub quiz_feedback: ElementId,
    pub quiz_close: ElementId,
    pub form: ElementId,
    pub name: ElementId,
    pub email: ElementId,
    pub message: ElementId,
    pub submit: ElementId,
    pub theme_toggle: ElementId,
    pub chat_launcher: ElementId,
    pub chat_panel: ElementId,
    pub chat_input: ElementId,
    pub chat_send: ElementId,
    pub chat_messages: ElementId,
    pub chat_status: ElementId,
    pub chat_key: ElementId,
    pub chat_save_key: ElementId,
}

fn with_id(doc: &mut Document, parent: ElementId, tag: &str, id: &str) -> ElementId {
    let el = doc.create_element(parent, tag);
    doc.set_attr(el, "id", id);
    el
}

fn with_class(doc: &mut Document, parent: ElementId, tag: &str, class: &str) -> ElementId {
    let el = doc.create_element(parent, tag);
    doc.add_class(el, class);
    el
}

/// A tutorial homepage laid out in an 800px viewport: a 70px fixed header,
/// then #home, #features, #tutorial and #contact, 800px each except the
/// 1600px tutorial.
pub fn homepage() -> Fixture {
    let mut doc = Document::new(800.0);
    let body = doc.body();

    let header = with_id(&mut doc, body, "header", "site-header");
    doc.set_layout(header, 0.0, 70.0);
    let theme_toggle = with_id(&mut doc, header, "button", "theme-toggle");
    let nav_toggle = with_id(&mut doc, header, "button", "nav-toggle");
    let nav_menu = with_id(&mut doc, header, "ul", "nav-menu");
    let link = |doc: &mut Document, href: &str| {
        let item = doc.create_element(nav_menu, "li");
        let a = with_class(doc, item, "a", "nav-link");
        doc.set_attr(a, "href", href);
        a
    };
    let link_home = link(&mut doc, "#home");
    let link_features = link(&mut doc, "#features");
    let link_tutorial = link(&mut doc, "#tutorial");
    link(&mut doc, "#contact");

    let home = with_id(&mut doc, body, "section", "home");
    doc.set_layout(home, 0.0, 800.0);
    let counter = with_class(&mut doc, home, "span", "counter");
    doc.set_attr(counter, "data-target", "1500");
    doc.set_attr(counter, "data-suffix", "+");
    doc.set_text(counter, "0");
    doc.set_layout(counter, 300.0, 50.0);

    let features = with_id(&mut doc, body, "section", "features");
    doc.set_layout(features, 800.0, 800.0);
    let card = with_class(&mut doc, features, "div", "reveal");
    doc.set_layout(card, 1000.0, 200.0);

    let tutorial = with_id(&mut doc, body, "section", "tutorial");
    doc.set_layout(tutorial, 1600.0, 1600.0);
    let mut step_headers = Vec::new();
    let mut step_contents = Vec::new();
    let titles = ["Install Rust", "Create a project", "Build and run"];
    for (i, title) in titles.iter().enumerate() {
        let step = with_class(&mut doc, tutorial, "div", "tutorial-step");
        doc.set_layout(step, 1650.0 + 500.0 * i as f64, 500.0);
        let header = with_class(&mut doc, step, "button", "step-header");
        doc.set_text(header, *title);
        let content = with_class(&mut doc, step, "div", "step-content");
        let para = doc.create_element(content, "p");
        doc.set_text(para, format!("Instructions for {}.", title.to_lowercase()));
        step_headers.push(header);
        step_contents.push(content);
    }
    let block = with_class(&mut doc, step_contents[0], "div", "code-block");
    let pre = doc.create_element(block, "pre");
    let code = doc.create_element(pre, "code");
    doc.set_text(code, "curl https://sh.rustup.rs -sSf | sh");
    let copy_btn = with_class(&mut doc, block, "button", "copy-btn");
    doc.set_text(copy_btn, "Copy");

    let step_prev = with_id(&mut doc, tutorial, "button", "step-prev");
    let step_next = with_id(&mut doc, tutorial, "button", "step-next");
    let progress_bar = with_id(&mut doc, tutorial, "div", "progress-bar");
    let progress_fill = with_id(&mut doc, progress_bar, "div", "progress-fill");
    let progress_text = with_id(&mut doc, tutorial, "p", "progress-text");

    let quiz_trigger = doc.create_element(tutorial, "button");
    doc.set_attr(quiz_trigger, "data-modal-target", "quiz-modal");
    doc.set_attr(quiz_trigger, "data-quiz-question", "Which tool installs Rust?");
    doc.set_attr(quiz_trigger, "data-quiz-options", "cargo|rustup|rustc");
    doc.set_attr(quiz_trigger, "data-quiz-answer", "1");

    let contact = with_id(&mut doc, body, "section", "contact");
    doc.set_layout(contact, 3200.0, 800.0);
    let form = with_id(&mut doc, contact, "form", "contact-form");
    let name = doc.create_element(form, "input");
    doc.set_attr(name, "required", "");
    let email = doc.create_element(form, "input");
    doc.set_attr(email, "type", "email");
    doc.set_attr(email, "required", "");
    let message = doc.create_element(form, "textarea");
    doc.set_attr(message, "required", "");
    let submit = doc.create_element(form, "button");
    doc.set_attr(submit, "type", "submit");
    doc.set_text(submit, "Send Message");

    let quiz_modal = with_id(&mut doc, body, "div", "quiz-modal");
    doc.add_class(quiz_modal, "modal");
    let quiz_question = with_id(&mut doc, quiz_modal, "h3", "quiz-question");
    let quiz_options = (0..4)
        .map(|_| with_class(&mut doc, quiz_modal, "button", "quiz-option"))
        .collect();
    let quiz_feedback = with_id(&mut doc, quiz_modal, "p", "quiz-feedback");
    let quiz_close = doc.create_element(quiz_modal, "button");
    doc.set_attr(quiz_close, "data-modal-close", "");

    let chat_launcher = with_id(&mut doc, body, "button", "chat-launcher");
    let chat_panel = with_id(&mut doc, body, "div", "chat-panel");
    with_id(&mut doc, chat_panel, "button", "chat-close");
    let chat_key = with_id(&mut doc, chat_panel, "input", "chat-api-key");
    let chat_save_key = with_id(&mut doc, chat_panel, "button", "chat-save-key");
    let chat_messages = with_id(&mut doc, chat_panel, "div", "chat-messages");
    let chat_status = with_id(&mut doc, chat_panel, "p", "chat-status");
    let chat_input = with_id(&mut doc, chat_panel, "input", "chat-input");
    let chat_send = with_id(&mut doc, chat_panel, "button", "chat-send");

    Fixture {
        doc,
        header,
        nav_toggle,
        nav_menu,
        link_home,
        link_features,
        link_tutorial,
        features,
        counter,
        card,
        step_headers,
        step_contents,
        step_prev,
        step_next,
        progress_fill,
        progress_text,
        copy_btn,
        quiz_trigger,
        quiz_modal,
        quiz_question,
        quiz_options,
        quiz_feedback,
        quiz_close,
        form,
        name,
        email,
        message,
        submit,
        theme_toggle,
        chat_launcher,
        chat_panel,
        chat_input,
        chat_send,
        chat_messages,
        chat_status,
        chat_key,
        chat_save_key,
    }
}
