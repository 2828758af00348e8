use crate::core::Controller;
use crate::dom::{Document, ElementId, Event, EventOutcome};
use std::time::Duration;

const CORRECT_FEEDBACK: &str = "Correct! Nice work.";
const INCORRECT_FEEDBACK: &str = "Not quite. The correct answer is highlighted.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    Idle,
    Unanswered,
    Answered { chosen: usize, correct: bool },
}

/// Question carried on a `[data-quiz-question]` trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: Option<usize>,
}

impl QuizQuestion {
    pub fn from_trigger(doc: &Document, trigger: ElementId) -> Option<Self> {
        let question = doc.attr(trigger, "data-quiz-question")?.trim().to_string();
        let options: Vec<String> = doc
            .attr(trigger, "data-quiz-options")
            .unwrap_or_default()
            .split('|')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if options.is_empty() {
            return None;
        }
        let answer = doc
            .attr(trigger, "data-quiz-answer")
            .and_then(|a| a.trim().parse::<usize>().ok())
            .filter(|a| *a < options.len());
        Some(Self {
            question,
            options,
            answer,
        })
    }
}

pub struct QuizController {
    question: ElementId,
    options: Vec<ElementId>,
    feedback: Option<ElementId>,
    state: QuizState,
}

impl QuizController {
    pub fn attach(doc: &mut Document) -> Option<Self> {
        let modal = doc.get_element_by_id("quiz-modal")?;
        let question = doc.get_element_by_id("quiz-question")?;
        let options: Vec<ElementId> = doc
            .descendants(modal)
            .into_iter()
            .filter(|id| doc.has_class(*id, "quiz-option"))
            .collect();
        if options.is_empty() {
            return None;
        }
        Some(Self {
            question,
            options,
            feedback: doc.get_element_by_id("quiz-feedback"),
            state: QuizState::Idle,
        })
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn load(&mut self, doc: &mut Document, quiz: &QuizQuestion) {
        if quiz.answer.is_none() {
            tracing::warn!("Quiz '{}' has no valid answer index", quiz.question);
        }
        if quiz.options.len() > self.options.len() {
            tracing::warn!(
                "Quiz offers {} options but only {} slots exist",
                quiz.options.len(),
                self.options.len()
            );
        }
        doc.set_text(self.question, quiz.question.clone());
        for (i, slot) in self.options.iter().enumerate() {
            doc.remove_class(*slot, "correct");
            doc.remove_class(*slot, "incorrect");
            doc.set_disabled(*slot, false);
            match quiz.options.get(i) {
                Some(text) => {
                    doc.set_text(*slot, text.clone());
                    doc.set_hidden(*slot, false);
                }
                None => doc.set_hidden(*slot, true),
            }
            if quiz.answer == Some(i) {
                doc.set_attr(*slot, "data-correct", "true");
            } else {
                doc.remove_attr(*slot, "data-correct");
            }
        }
        if let Some(feedback) = self.feedback {
            doc.set_text(feedback, "");
            doc.remove_class(feedback, "correct");
            doc.remove_class(feedback, "incorrect");
        }
        self.state = QuizState::Unanswered;
    }

    pub fn answer(&mut self, doc: &mut Document, chosen: usize) -> Option<bool> {
        if self.state != QuizState::Unanswered {
            return None;
        }
        let slot = *self.options.get(chosen)?;
        let correct = doc.attr(slot, "data-correct") == Some("true");

        doc.add_class(slot, if correct { "correct" } else { "incorrect" });
        for option in &self.options {
            if doc.attr(*option, "data-correct") == Some("true") {
                doc.add_class(*option, "correct");
            }
            doc.set_disabled(*option, true);
        }
        if let Some(feedback) = self.feedback {
            let (text, class) = if correct {
                (CORRECT_FEEDBACK, "correct")
            } else {
                (INCORRECT_FEEDBACK, "incorrect")
            };
            doc.set_text(feedback, text);
            doc.add_class(feedback, class);
        }
        self.state = QuizState::Answered { chosen, correct };
        Some(correct)
    }
}

impl Controller for QuizController {
    fn name(&self) -> &'static str {
        "quiz"
    }

    fn handle(&mut self, doc: &mut Document, event: &Event, _now: Duration) -> EventOutcome {
        let Event::Click(target) = event else {
            return EventOutcome::Ignored;
        };
        if let Some(trigger) = doc.closest(*target, |e| e.attrs.contains_key("data-quiz-question")) {
            return match QuizQuestion::from_trigger(doc, trigger) {
                Some(quiz) => {
                    self.load(doc, &quiz);
                    EventOutcome::Handled
                }
                None => {
                    tracing::warn!("Quiz trigger without options");
                    EventOutcome::Ignored
                }
            };
        }
        match self.options.iter().position(|o| doc.contains(*o, *target)) {
            Some(index) if self.answer(doc, index).is_some() => EventOutcome::Handled,
            _ => EventOutcome::Ignored,
        }
    }
}
