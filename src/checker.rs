//! Answer checking: a local literal comparison and a model-assisted classifier.

use tracing::{instrument, warn};

use crate::error::TutorError;
use crate::gateway::{complete_one, CompletionGateway, ModelProfile};
use crate::prompts::build_check_prompt;
use crate::questions::QuestionBank;

/// Strip newline and tab characters. No other whitespace or case folding.
pub fn normalize(text: &str) -> String {
  text.chars().filter(|c| *c != '\n' && *c != '\t').collect()
}

/// Local check against the canonical answer. Never calls the completion service.
pub fn is_correct(bank: &QuestionBank, question_id: &str, student_answer: &str) -> Result<bool, TutorError> {
  let canonical = bank.get_answer(question_id)?;
  Ok(normalize(student_answer) == normalize(canonical))
}

/// Ask the model to classify the answer. True only when the trimmed output is
/// exactly `correct`; anything else, including malformed output, is `false`.
#[instrument(level = "info", skip(gateway, bank, profile, student_answer), fields(%question_id, model = %profile.model, answer_len = student_answer.len()))]
pub async fn check_answer_via_model(
  gateway: &dyn CompletionGateway,
  bank: &QuestionBank,
  profile: &ModelProfile,
  question_id: &str,
  student_answer: &str,
) -> Result<bool, TutorError> {
  let question = bank.get(question_id)?;
  let prompt = build_check_prompt(&question.text, &question.canonical_answer, student_answer);
  let out = complete_one(gateway, prompt, profile).await?;
  let verdict = out.trim();
  if verdict != "correct" && verdict != "incorrect" {
    warn!(target: "tutor", %question_id, output_len = verdict.len(), "Classifier returned an out-of-vocabulary verdict");
  }
  Ok(verdict == "correct")
}
