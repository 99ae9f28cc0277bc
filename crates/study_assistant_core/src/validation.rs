//! crates/study_assistant_core/src/validation.rs
//!
//! Structural validation of schema-constrained replies. The generation service is
//! asked to honour a schema but nothing guarantees it did, so every batch is
//! checked before it reaches a screen.

use crate::domain::{DayPlan, QuizQuestion};
use serde_json::Value;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Reply is not a JSON array")]
    NotAnArray,
    #[error("Reply contained no entries")]
    Empty,
    #[error("Entry {index} is invalid: {reason}")]
    Invalid { index: usize, reason: String },
}

fn parse_array(text: &str) -> Result<Vec<Value>, ValidationError> {
    match serde_json::from_str::<Value>(text.trim())? {
        Value::Array(items) if items.is_empty() => Err(ValidationError::Empty),
        Value::Array(items) => Ok(items),
        _ => Err(ValidationError::NotAnArray),
    }
}

fn check_question(index: usize, q: &QuizQuestion) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::Invalid { index, reason };

    if q.question.trim().is_empty() {
        return Err(invalid("question text is empty".to_string()));
    }
    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&q.options.len()) {
        return Err(invalid(format!("has {} options", q.options.len())));
    }
    if q.correct_answer >= q.options.len() {
        return Err(invalid(format!(
            "correct answer {} out of range for {} options",
            q.correct_answer,
            q.options.len()
        )));
    }
    Ok(())
}

/// Parses a quiz batch, keeping at most `count` questions.
///
/// A single invalid question rejects the whole batch.
pub fn parse_quiz(text: &str, count: usize) -> Result<Vec<QuizQuestion>, ValidationError> {
    let items = parse_array(text)?;
    let mut questions = Vec::with_capacity(items.len().min(count));

    for (index, item) in items.into_iter().take(count).enumerate() {
        let question: QuizQuestion =
            serde_json::from_value(item).map_err(|e| ValidationError::Invalid {
                index,
                reason: e.to_string(),
            })?;
        check_question(index, &question)?;
        questions.push(question);
    }

    if questions.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(questions)
}

/// Parses a weekly plan. Slots must carry time, subject and topic.
pub fn parse_plan(text: &str) -> Result<Vec<DayPlan>, ValidationError> {
    parse_array(text)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let day: DayPlan =
                serde_json::from_value(item).map_err(|e| ValidationError::Invalid {
                    index,
                    reason: e.to_string(),
                })?;
            if day.day.trim().is_empty() {
                return Err(ValidationError::Invalid {
                    index,
                    reason: "day name is empty".to_string(),
                });
            }
            Ok(day)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_json(options: &str, correct: i64) -> String {
        format!(
            r#"{{"question":"Q?","options":{options},"correctAnswer":{correct},"explanation":"E"}}"#
        )
    }

    #[test]
    fn accepts_well_formed_quiz() {
        let text = format!("[{}]", question_json(r#"["a","b","c","d"]"#, 3));
        let quiz = parse_quiz(&text, 5).unwrap();
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].correct_answer, 3);
    }

    #[test]
    fn truncates_to_requested_count() {
        let one = question_json(r#"["a","b"]"#, 0);
        let text = format!("[{one},{one},{one}]");
        assert_eq!(parse_quiz(&text, 2).unwrap().len(), 2);
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let text = format!("[{}]", question_json(r#"["a","b"]"#, 2));
        assert!(matches!(
            parse_quiz(&text, 5),
            Err(ValidationError::Invalid { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_negative_answer() {
        let text = format!("[{}]", question_json(r#"["a","b"]"#, -1));
        assert!(parse_quiz(&text, 5).is_err());
    }

    #[test]
    fn rejects_wrong_option_count() {
        let text = format!("[{}]", question_json(r#"["a"]"#, 0));
        assert!(parse_quiz(&text, 5).is_err());
        let text = format!("[{}]", question_json(r#"["a","b","c","d","e"]"#, 0));
        assert!(parse_quiz(&text, 5).is_err());
    }

    #[test]
    fn rejects_non_arrays_and_garbage() {
        assert!(matches!(parse_quiz("{}", 5), Err(ValidationError::NotAnArray)));
        assert!(matches!(parse_quiz("[]", 5), Err(ValidationError::Empty)));
        assert!(matches!(parse_quiz("nope", 5), Err(ValidationError::Json(_))));
        assert!(matches!(parse_quiz("[1]", 5), Err(ValidationError::Invalid { .. })));
    }

    #[test]
    fn parses_plan() {
        let text = r#"[{"day":"Monday","sessions":[{"time":"4-5 PM","subject":"Math","topic":"Algebra"}]}]"#;
        let plan = parse_plan(text).unwrap();
        assert_eq!(plan[0].day, "Monday");
        assert_eq!(plan[0].sessions[0].subject, "Math");
    }

    #[test]
    fn rejects_plan_with_missing_fields() {
        let text = r#"[{"day":"Monday","sessions":[{"time":"4-5 PM","subject":"Math"}]}]"#;
        assert!(parse_plan(text).is_err());
        assert!(parse_plan(r#"[{"day":"","sessions":[]}]"#).is_err());
        assert!(matches!(parse_plan("[]"), Err(ValidationError::Empty)));
    }
}
