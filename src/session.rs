//! One student's pass through the two-question flow.
//!
//! A session owns a lazily generated student id and two answer slots. Slots are
//! filled by `record_pre_hint`/`record_post_hint`; hints are requested in between
//! and returned to the caller without being stored. `export` yields the flat record
//! the session store persists.

use rand::{distributions::Alphanumeric, Rng};
use tracing::{debug, instrument};

use crate::domain::{QuestionSlot, SessionRecord};
use crate::error::TutorError;
use crate::gateway::{complete_one, CompletionGateway, ModelProfile};
use crate::prompts::build_hint_prompt;
use crate::questions::QuestionBank;

pub const SESSION_ID_LEN: usize = 16;

/// 16 characters drawn uniformly from `[A-Za-z0-9]`.
pub fn generate_session_id() -> String {
  rand::thread_rng()
    .sample_iter(&Alphanumeric)
    .take(SESSION_ID_LEN)
    .map(char::from)
    .collect()
}

#[derive(Clone, Copy, Debug)]
enum Phase {
  PreHint,
  PostHint,
}

#[derive(Clone, Debug)]
pub struct TutorSession {
  session_id: Option<String>,
  question_ids: [String; 2],
  slots: [QuestionSlot; 2],
}

impl TutorSession {
  /// Session over bank questions "1" and "2".
  pub fn new() -> Self {
    Self::with_questions(["1", "2"])
  }

  /// Session whose slots 1 and 2 hold the given question ids.
  pub fn with_questions<S: Into<String>>(question_ids: [S; 2]) -> Self {
    let [a, b] = question_ids;
    Self {
      session_id: None,
      question_ids: [a.into(), b.into()],
      slots: Default::default(),
    }
  }

  /// Generated on first call, stable afterwards.
  pub fn get_session_id(&mut self) -> &str {
    self.session_id.get_or_insert_with(generate_session_id)
  }

  /// The id, if one has been generated yet.
  pub fn session_id(&self) -> Option<&str> {
    self.session_id.as_deref()
  }

  pub fn question_ids(&self) -> &[String; 2] {
    &self.question_ids
  }

  pub fn question_id(&self, index: usize) -> Result<&str, TutorError> {
    Ok(&self.question_ids[slot_pos(index)?])
  }

  pub fn record_pre_hint(&mut self, index: usize, reasoning: impl Into<String>, answer: impl Into<String>) -> Result<(), TutorError> {
    self.record(index, Phase::PreHint, Some(reasoning.into()), answer.into())
  }

  /// Pre-hint answer without any reasoning; the reasoning field stays null.
  pub fn record_pre_hint_answer(&mut self, index: usize, answer: impl Into<String>) -> Result<(), TutorError> {
    self.record(index, Phase::PreHint, None, answer.into())
  }

  pub fn record_post_hint(&mut self, index: usize, reasoning: impl Into<String>, answer: impl Into<String>) -> Result<(), TutorError> {
    self.record(index, Phase::PostHint, Some(reasoning.into()), answer.into())
  }

  /// Post-hint answer without any reasoning; the reasoning field stays null.
  pub fn record_post_hint_answer(&mut self, index: usize, answer: impl Into<String>) -> Result<(), TutorError> {
    self.record(index, Phase::PostHint, None, answer.into())
  }

  #[instrument(level = "debug", skip(self, reasoning, answer), fields(session = ?self.session_id))]
  fn record(&mut self, index: usize, phase: Phase, reasoning: Option<String>, answer: String) -> Result<(), TutorError> {
    let slot = &mut self.slots[slot_pos(index)?];
    let (r, a) = match phase {
      Phase::PreHint => (&mut slot.reasoning_pre_hint, &mut slot.answer_pre_hint),
      Phase::PostHint => (&mut slot.reasoning_post_hint, &mut slot.answer_post_hint),
    };
    *r = reasoning;
    *a = Some(answer);
    Ok(())
  }

  /// Build a hint prompt from the bank entry and the recorded pre-hint input,
  /// send it, and return the model's text. The session is not modified.
  #[instrument(level = "info", skip(self, gateway, bank, profile), fields(session = ?self.session_id, %question_id, model = %profile.model))]
  pub async fn request_hint(
    &self,
    gateway: &dyn CompletionGateway,
    bank: &QuestionBank,
    profile: &ModelProfile,
    question_id: &str,
  ) -> Result<String, TutorError> {
    let pos = self.question_ids.iter().position(|id| id == question_id)
      .ok_or_else(|| TutorError::QuestionNotInSession(question_id.to_string()))?;
    let question = bank.get(question_id)?;
    let slot = &self.slots[pos];
    let answer = slot.answer_pre_hint.as_deref()
      .ok_or_else(|| TutorError::MissingPreHint(question_id.to_string()))?;
    let reasoning = slot.reasoning_pre_hint.as_deref().unwrap_or_default();

    let prompt = build_hint_prompt(&question.text, &question.canonical_answer, reasoning, answer);
    let hint = complete_one(gateway, prompt, profile).await?;
    debug!(target: "tutor", hint_len = hint.len(), "Hint generated");
    Ok(hint)
  }

  /// Snapshot of the id and all eight captured fields.
  pub fn export(&mut self) -> SessionRecord {
    let id = self.get_session_id().to_string();
    SessionRecord::from_slots(id, &self.slots[0], &self.slots[1])
  }
}

impl Default for TutorSession {
  fn default() -> Self {
    Self::new()
  }
}

fn slot_pos(index: usize) -> Result<usize, TutorError> {
  match index {
    1 | 2 => Ok(index - 1),
    _ => Err(TutorError::InvalidQuestionIndex(index)),
  }
}
