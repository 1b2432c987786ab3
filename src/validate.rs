//! Structural checks for flashcard set documents.
//!
//! A set is an object with a string `name` and a `cards` array. Each card
//! carries an `answer` (any value) and a `questions` array whose entries are
//! objects with a string `text`. Checks never stop at the first defect; every
//! problem in the document is reported in document order, with 1-based card
//! and question positions.

use serde_json::Value;

/// Outcome of validating one set document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetValidation {
    errors: Vec<String>,
}

impl SetValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Defects in the order they were found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Validate an arbitrary decoded JSON value as a set document.
pub fn validate_set(document: &Value) -> SetValidation {
    let mut errors = Vec::new();

    let Some(set) = document.as_object() else {
        errors.push("Set is not a JSON object".to_string());
        return SetValidation { errors };
    };

    match set.get("name") {
        None => errors.push("Missing 'name' field".to_string()),
        Some(Value::String(_)) => {}
        Some(_) => errors.push("'name' must be a string".to_string()),
    }

    match set.get("cards") {
        None => errors.push("Missing 'cards' field".to_string()),
        Some(Value::Array(cards)) => {
            for (idx, card) in cards.iter().enumerate() {
                check_card(idx + 1, card, &mut errors);
            }
        }
        Some(_) => errors.push("'cards' must be an array".to_string()),
    }

    SetValidation { errors }
}

fn check_card(position: usize, card: &Value, errors: &mut Vec<String>) {
    let Some(card) = card.as_object() else {
        errors.push(format!("Card {position} is not an object"));
        return;
    };

    if !card.contains_key("answer") {
        errors.push(format!("Card {position} missing 'answer' field"));
    }

    match card.get("questions") {
        None => errors.push(format!("Card {position} missing 'questions' field")),
        Some(Value::Array(questions)) => {
            for (idx, question) in questions.iter().enumerate() {
                if let Some(problem) = question_problem(question) {
                    errors.push(format!("Card {position}, Question {} {problem}", idx + 1));
                }
            }
        }
        Some(_) => errors.push(format!("Card {position} 'questions' must be an array")),
    }
}

fn question_problem(question: &Value) -> Option<&'static str> {
    let Some(question) = question.as_object() else {
        return Some("is not an object");
    };
    match question.get("text") {
        None => Some("missing 'text' field"),
        Some(Value::String(_)) => None,
        Some(_) => Some("'text' must be a string"),
    }
}
