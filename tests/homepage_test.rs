mod common;

use homepage_widgets::core::contact_form::FormState;
use homepage_widgets::core::counter::CounterState;
use homepage_widgets::core::quiz::QuizState;
use homepage_widgets::dom::ScrollBehavior;
use homepage_widgets::domain::model::{Disclosure, THEME_STORAGE_KEY};
use homepage_widgets::domain::ports::KeyValueStore;
use homepage_widgets::{
    ColorScheme, Environment, Event, EventOutcome, Homepage, Key, MemoryClipboard, MemoryStore,
    Theme,
};
use std::sync::Arc;
use std::time::Duration;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_every_controller_attaches_to_full_page() {
    let f = common::homepage();
    let mut page = Homepage::init(f.doc, Environment::default());
    assert_eq!(
        page.attached(),
        vec![
            "navigation",
            "smooth-scroll",
            "scroll-spy",
            "reveal-on-scroll",
            "counter-animation",
            "contact-form",
            "quiz",
            "modal",
            "tutorial-flow",
            "copy-button",
            "theme",
            "chat-widget",
        ]
    );
    assert_eq!(page.scroll_spy().unwrap().active_link(), Some(f.link_home));
    assert_eq!(page.document().attr(f.quiz_modal, "aria-hidden"), Some("true"));
}

#[test]
fn test_menu_and_anchor_navigation() {
    let f = common::homepage();
    let mut page = Homepage::init(f.doc, Environment::default());

    page.dispatch(Event::Click(f.nav_toggle));
    assert_eq!(page.navigation().unwrap().state(), Disclosure::Expanded);
    assert!(page.document().has_class(f.nav_menu, "active"));
    assert!(page.document().has_class(page.document().body(), "menu-open"));
    assert_eq!(page.document().attr(f.nav_toggle, "aria-expanded"), Some("true"));

    page.advance(ms(200));
    let outcome = page.dispatch(Event::Click(f.link_features));
    assert_eq!(outcome, EventOutcome::DefaultPrevented);

    let doc = page.document();
    assert_eq!(doc.scroll_y(), 730.0);
    assert_eq!(doc.last_scroll_behavior(), Some(ScrollBehavior::Smooth));
    assert_eq!(doc.focused(), Some(f.features));
    assert_eq!(doc.attr(f.features, "tabindex"), Some("-1"));
    assert!(!doc.has_class(f.nav_menu, "active"));
    assert!(!doc.has_class(doc.body(), "menu-open"));
    assert!(doc.has_class(f.header, "scrolled"));
    assert!(doc.has_class(f.link_features, "active"));
    assert_eq!(doc.attr(f.link_features, "aria-current"), Some("true"));
    assert!(!doc.has_class(f.link_home, "active"));
    assert_eq!(doc.attr(f.link_home, "aria-current"), None);
}

#[test]
fn test_escape_closes_menu_and_returns_focus() {
    let f = common::homepage();
    let mut page = Homepage::init(f.doc, Environment::default());

    page.dispatch(Event::Click(f.nav_toggle));
    page.dispatch(Event::KeyDown(Key::Escape));
    assert_eq!(page.navigation().unwrap().state(), Disclosure::Collapsed);
    assert_eq!(page.document().focused(), Some(f.nav_toggle));
}

#[test]
fn test_scroll_spy_and_header_are_throttled() {
    let f = common::homepage();
    let mut page = Homepage::init(f.doc, Environment::default());

    page.advance(ms(150));
    page.scroll_to(1700.0);
    assert_eq!(page.scroll_spy().unwrap().active_link(), Some(f.link_tutorial));

    // within 100 ms of the last run: nothing recomputed
    page.advance(ms(50));
    page.scroll_to(0.0);
    assert_eq!(page.scroll_spy().unwrap().active_link(), Some(f.link_tutorial));
    assert!(page.document().has_class(f.header, "scrolled"));

    page.advance(ms(100));
    page.scroll_to(10.0);
    assert_eq!(page.scroll_spy().unwrap().active_link(), Some(f.link_home));
    assert!(!page.document().has_class(f.header, "scrolled"));
}

#[test]
fn test_counter_animates_and_card_reveals() {
    let f = common::homepage();
    let mut page = Homepage::init(f.doc, Environment::default());

    assert_eq!(page.counters().unwrap().state_of(f.counter), Some(CounterState::Armed));
    page.advance(ms(16));
    assert_eq!(page.document().text(f.counter), "0+");

    page.advance(ms(1000));
    let halfway: u64 = page
        .document()
        .text(f.counter)
        .trim_end_matches('+')
        .parse()
        .unwrap();
    assert!(halfway > 0 && halfway < 1500, "halfway value {}", halfway);

    page.advance(ms(2000));
    assert_eq!(page.document().text(f.counter), "1500+");
    assert_eq!(page.counters().unwrap().state_of(f.counter), Some(CounterState::Done));

    assert!(!page.document().has_class(f.card, "visible"));
    page.scroll_to(900.0);
    assert!(page.document().has_class(f.card, "visible"));
    assert!(!page.reveal().unwrap().pending());

    page.scroll_to(0.0);
    assert!(page.document().has_class(f.card, "visible"));
}

#[test]
fn test_reduced_motion_skips_animation() {
    let f = common::homepage();
    let env = Environment {
        reduced_motion: true,
        ..Environment::default()
    };
    let mut page = Homepage::init(f.doc, env);
    assert_eq!(page.document().text(f.counter), "1500+");
    assert!(page.document().has_class(f.card, "visible"));

    page.dispatch(Event::Click(f.link_features));
    assert_eq!(
        page.document().last_scroll_behavior(),
        Some(ScrollBehavior::Instant)
    );
}

#[test]
fn test_contact_form_validation_and_simulated_send() {
    let f = common::homepage();
    let mut page = Homepage::init(f.doc, Environment::default());

    let outcome = page.dispatch(Event::Submit(f.form));
    assert_eq!(outcome, EventOutcome::DefaultPrevented);
    assert!(page.document().has_class(f.name, "error"));
    assert!(page.document().has_class(f.email, "error"));
    assert_eq!(page.document().focused(), Some(f.name));

    let doc = page.document_mut();
    doc.set_value(f.name, "Ada");
    doc.set_value(f.email, "ada@");
    doc.set_value(f.message, "Hello there");
    page.dispatch(Event::Input(f.name));
    assert!(!page.document().has_class(f.name, "error"));

    page.dispatch(Event::Click(f.submit));
    assert!(page.document().has_class(f.email, "error"));
    assert_eq!(page.document().focused(), Some(f.email));
    assert_eq!(page.contact_form().unwrap().state(), FormState::Idle);

    page.document_mut().set_value(f.email, "ada@example.com");
    page.dispatch(Event::Input(f.email));
    page.dispatch(Event::Submit(f.form));
    assert_eq!(page.document().text(f.submit), "Sending...");
    assert!(page.document().is_disabled(f.submit));

    page.advance(ms(1500));
    assert_eq!(page.document().text(f.submit), "Message Sent!");
    assert!(page.document().has_class(f.submit, "success"));
    assert_eq!(page.document().value(f.name), "");
    assert_eq!(page.document().value(f.message), "");

    page.advance(ms(3000));
    assert_eq!(page.document().text(f.submit), "Send Message");
    assert!(!page.document().has_class(f.submit, "success"));
    assert!(!page.document().is_disabled(f.submit));
    assert_eq!(page.contact_form().unwrap().state(), FormState::Idle);
}

#[test]
fn test_quiz_modal_flow_with_focus_trap() {
    let f = common::homepage();
    let mut page = Homepage::init(f.doc, Environment::default());

    let outcome = page.dispatch(Event::Click(f.quiz_trigger));
    assert_eq!(outcome, EventOutcome::DefaultPrevented);
    let doc = page.document();
    assert!(doc.has_class(f.quiz_modal, "active"));
    assert_eq!(doc.attr(f.quiz_modal, "aria-hidden"), Some("false"));
    assert_eq!(doc.text(f.quiz_question), "Which tool installs Rust?");
    assert_eq!(doc.text(f.quiz_options[1]), "rustup");
    assert!(doc.is_hidden(f.quiz_options[3]));
    assert_eq!(doc.focused(), Some(f.quiz_options[0]));

    // Shift+Tab on the first control wraps to the last one and back
    page.dispatch(Event::KeyDown(Key::ShiftTab));
    assert_eq!(page.document().focused(), Some(f.quiz_close));
    page.dispatch(Event::KeyDown(Key::Tab));
    assert_eq!(page.document().focused(), Some(f.quiz_options[0]));
    page.dispatch(Event::KeyDown(Key::Tab));
    assert_eq!(page.document().focused(), Some(f.quiz_options[1]));

    page.dispatch(Event::Click(f.quiz_options[0]));
    assert_eq!(
        page.quiz().unwrap().state(),
        &QuizState::Answered {
            chosen: 0,
            correct: false
        }
    );
    let doc = page.document();
    assert!(doc.has_class(f.quiz_options[0], "incorrect"));
    assert!(doc.has_class(f.quiz_options[1], "correct"));
    assert!(doc.is_disabled(f.quiz_options[2]));
    assert!(doc.text(f.quiz_feedback).starts_with("Not quite"));

    page.dispatch(Event::KeyDown(Key::Escape));
    assert!(page.modal().unwrap().active().is_none());
    assert_eq!(page.document().focused(), Some(f.quiz_trigger));
    assert_eq!(page.document().attr(f.quiz_modal, "aria-hidden"), Some("false"));
    page.advance(ms(300));
    assert_eq!(page.document().attr(f.quiz_modal, "aria-hidden"), Some("true"));
}

#[test]
fn test_tutorial_steps_and_progress() {
    let f = common::homepage();
    let mut page = Homepage::init(f.doc, Environment::default());

    let doc = page.document();
    assert_eq!(doc.text(f.progress_text), "Step 1 of 3");
    assert!(doc.is_disabled(f.step_prev));
    assert!(!doc.is_hidden(f.step_contents[0]));
    assert!(doc.is_hidden(f.step_contents[1]));

    page.dispatch(Event::Click(f.step_next));
    let doc = page.document();
    assert_eq!(doc.scroll_y(), 2080.0);
    assert_eq!(doc.text(f.progress_text), "Step 2 of 3");
    assert_eq!(doc.attr(f.progress_fill, "style"), Some("width: 67%"));
    assert_eq!(doc.attr(f.step_headers[1], "aria-expanded"), Some("true"));
    assert_eq!(doc.attr(f.step_headers[0], "aria-expanded"), Some("false"));
    assert!(!doc.is_disabled(f.step_prev));

    page.dispatch(Event::Click(f.step_headers[2]));
    assert_eq!(page.tutorial().unwrap().open_index(), 2);
    assert!(page.document().is_disabled(f.step_next));
    assert_eq!(page.dispatch(Event::Click(f.step_next)), EventOutcome::Ignored);

    // scrolling moves the active step but leaves the open one alone
    page.dispatch(Event::Click(f.step_headers[0]));
    page.scroll_to(2700.0);
    let tutorial = page.tutorial().unwrap();
    assert_eq!(tutorial.open_index(), 0);
    assert_eq!(tutorial.active_index(), 2);
    assert_eq!(tutorial.progress(), 100);
    assert_eq!(page.document().text(f.progress_text), "Step 3 of 3");
}

#[test]
fn test_copy_button_feedback() {
    let f = common::homepage();
    let clipboard = Arc::new(MemoryClipboard::new());
    let env = Environment {
        clipboard: clipboard.clone(),
        ..Environment::default()
    };
    let mut page = Homepage::init(f.doc, env);

    page.dispatch(Event::Click(f.copy_btn));
    assert_eq!(
        clipboard.contents().as_deref(),
        Some("curl https://sh.rustup.rs -sSf | sh")
    );
    assert_eq!(page.document().text(f.copy_btn), "Copied!");
    page.advance(ms(2000));
    assert_eq!(page.document().text(f.copy_btn), "Copy");
}

#[test]
fn test_theme_follows_os_until_toggled() {
    let f = common::homepage();
    let store = Arc::new(MemoryStore::new());
    let env = Environment {
        store: store.clone(),
        color_scheme: ColorScheme::Dark,
        ..Environment::default()
    };
    let mut page = Homepage::init(f.doc, env);
    let root = page.document().root();
    assert_eq!(page.document().attr(root, "data-theme"), Some("dark"));

    page.dispatch(Event::ColorSchemeChanged(ColorScheme::Light));
    assert_eq!(page.document().attr(root, "data-theme"), Some("light"));

    page.dispatch(Event::Click(f.theme_toggle));
    assert_eq!(page.theme().unwrap().theme(), Theme::Dark);
    assert_eq!(store.get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("dark"));
    assert_eq!(page.document().attr(f.theme_toggle, "aria-pressed"), Some("true"));

    let outcome = page.dispatch(Event::ColorSchemeChanged(ColorScheme::Light));
    assert_eq!(outcome, EventOutcome::Ignored);
    assert_eq!(page.document().attr(root, "data-theme"), Some("dark"));
}
