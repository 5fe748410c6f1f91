//! Domain models: bank questions, per-question answer slots, and the flat session record.

use serde::{Deserialize, Serialize};

/// One entry of the question bank. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub id: String,
  #[serde(rename = "question")]
  pub text: String,
  #[serde(rename = "answer")]
  pub canonical_answer: String,
}

impl Question {
  pub fn new(id: impl Into<String>, text: impl Into<String>, canonical_answer: impl Into<String>) -> Self {
    Self { id: id.into(), text: text.into(), canonical_answer: canonical_answer.into() }
  }
}

/// Student input captured for one question, before and after a hint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionSlot {
  pub reasoning_pre_hint: Option<String>,
  pub answer_pre_hint: Option<String>,
  pub reasoning_post_hint: Option<String>,
  pub answer_post_hint: Option<String>,
}

/// Exported/persisted shape of a session. Kept flat; one file per session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
  pub student_id: String,
  pub reasoning_1_pre_hint: Option<String>,
  pub answer_1_pre_hint: Option<String>,
  pub reasoning_1_post_hint: Option<String>,
  pub answer_1_post_hint: Option<String>,
  pub reasoning_2_pre_hint: Option<String>,
  pub answer_2_pre_hint: Option<String>,
  pub reasoning_2_post_hint: Option<String>,
  pub answer_2_post_hint: Option<String>,
}

impl SessionRecord {
  /// Flatten two slots into the record.
  pub fn from_slots(student_id: String, first: &QuestionSlot, second: &QuestionSlot) -> Self {
    Self {
      student_id,
      reasoning_1_pre_hint: first.reasoning_pre_hint.clone(),
      answer_1_pre_hint: first.answer_pre_hint.clone(),
      reasoning_1_post_hint: first.reasoning_post_hint.clone(),
      answer_1_post_hint: first.answer_post_hint.clone(),
      reasoning_2_pre_hint: second.reasoning_pre_hint.clone(),
      answer_2_pre_hint: second.answer_pre_hint.clone(),
      reasoning_2_post_hint: second.reasoning_post_hint.clone(),
      answer_2_post_hint: second.answer_post_hint.clone(),
    }
  }
}
