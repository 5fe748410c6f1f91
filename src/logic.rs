//! Core behaviors shared by the HTTP handlers and the console flow.
//!
//! This includes:
//!   - Checking answers (local literal check, optional model classifier)
//!   - Session lifecycle: create, record pre/post-hint input, export, finish
//!   - Hint requests routed to the strong model profile

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::checker::{check_answer_via_model, is_correct};
use crate::domain::SessionRecord;
use crate::error::{AppError, StoreError, TutorError};
use crate::gateway::CompletionGateway;
use crate::session::TutorSession;
use crate::state::AppState;

fn gateway(state: &AppState) -> Result<&dyn CompletionGateway, TutorError> {
  state.gateway.as_deref().ok_or(TutorError::GatewayDisabled)
}

#[instrument(level = "info", skip(state, answer), fields(%question_id, answer_len = answer.len()))]
pub async fn check_answer(state: &AppState, question_id: &str, answer: &str, use_model: bool) -> Result<bool, TutorError> {
  // Unknown ids are a local error, whether or not a gateway is configured.
  state.bank.get(question_id)?;
  if use_model {
    check_answer_via_model(gateway(state)?, &state.bank, &state.profiles.fast, question_id, answer).await
  } else {
    is_correct(&state.bank, question_id, answer)
  }
}

/// Start a session over two bank questions (default "1" and "2").
/// Returns the new session id and its question ids.
#[instrument(level = "info", skip(state))]
pub async fn create_session(state: &AppState, question_ids: Option<[String; 2]>) -> Result<(String, [String; 2]), AppError> {
  let session = match question_ids {
    Some(ids) => TutorSession::with_questions(ids),
    None => TutorSession::new(),
  };
  for id in session.question_ids() {
    state.bank.get(id)?;
  }
  let questions = session.question_ids().clone();
  let id = state
    .insert_session(session)
    .await
    .ok_or(AppError::TooManySessions(state.max_sessions))?;
  info!(target: "tutor", session = %id, ?questions, "Session created");
  Ok((id, questions))
}

/// Record pre-hint input for a slot and return the local verdict on the answer.
#[instrument(level = "info", skip(state, reasoning, answer), fields(%session_id, answer_len = answer.len()))]
pub async fn record_pre_hint(
  state: &AppState,
  session_id: &str,
  question_index: usize,
  reasoning: Option<&str>,
  answer: &str,
) -> Result<bool, AppError> {
  let question_id = state
    .with_session(session_id, |s| -> Result<String, TutorError> {
      match reasoning {
        Some(r) => s.record_pre_hint(question_index, r, answer)?,
        None => s.record_pre_hint_answer(question_index, answer)?,
      }
      Ok(s.question_id(question_index)?.to_string())
    })
    .await
    .ok_or_else(|| AppError::UnknownSession(session_id.to_string()))??;
  let correct = is_correct(&state.bank, &question_id, answer)?;
  info!(target: "tutor", %session_id, %question_id, %correct, "Pre-hint answer recorded");
  Ok(correct)
}

/// Record post-hint input for a slot and return the local verdict on the answer.
#[instrument(level = "info", skip(state, reasoning, answer), fields(%session_id, answer_len = answer.len()))]
pub async fn record_post_hint(
  state: &AppState,
  session_id: &str,
  question_index: usize,
  reasoning: Option<&str>,
  answer: &str,
) -> Result<bool, AppError> {
  let question_id = state
    .with_session(session_id, |s| -> Result<String, TutorError> {
      match reasoning {
        Some(r) => s.record_post_hint(question_index, r, answer)?,
        None => s.record_post_hint_answer(question_index, answer)?,
      }
      Ok(s.question_id(question_index)?.to_string())
    })
    .await
    .ok_or_else(|| AppError::UnknownSession(session_id.to_string()))??;
  let correct = is_correct(&state.bank, &question_id, answer)?;
  info!(target: "tutor", %session_id, %question_id, %correct, "Post-hint answer recorded");
  Ok(correct)
}

/// Generate a hint from the session's pre-hint input. The session map is not
/// locked during the completion call and the session is left unchanged.
#[instrument(level = "info", skip(state), fields(%session_id, %question_id))]
pub async fn request_hint(state: &AppState, session_id: &str, question_id: &str) -> Result<String, AppError> {
  let session = state
    .get_session(session_id)
    .await
    .ok_or_else(|| AppError::UnknownSession(session_id.to_string()))?;
  let hint = session
    .request_hint(gateway(state)?, &state.bank, &state.profiles.strong, question_id)
    .await?;
  Ok(hint)
}

/// Snapshot of a live session.
#[instrument(level = "debug", skip(state), fields(%session_id))]
pub async fn export_session(state: &AppState, session_id: &str) -> Result<SessionRecord, AppError> {
  state
    .with_session(session_id, |s| s.export())
    .await
    .ok_or_else(|| AppError::UnknownSession(session_id.to_string()))
}

/// Record of a live session, or of a finished one read back from the store.
#[instrument(level = "debug", skip(state), fields(%session_id))]
pub async fn lookup_session(state: &AppState, session_id: &str) -> Result<SessionRecord, AppError> {
  match export_session(state, session_id).await {
    Err(AppError::UnknownSession(_)) => {}
    live => return live,
  }
  match state.store.load(session_id).await {
    Ok(record) => Ok(record),
    Err(StoreError::InvalidId(_)) => Err(AppError::UnknownSession(session_id.to_string())),
    Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
      Err(AppError::UnknownSession(session_id.to_string()))
    }
    Err(e) => Err(e.into()),
  }
}

/// Persist the session and drop it from memory. On a store failure the session stays live.
#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn finish_session(state: &AppState, session_id: &str) -> Result<(SessionRecord, PathBuf), AppError> {
  let record = export_session(state, session_id).await?;
  let path = state.store.save(&record).await?;
  state.remove_session(session_id).await;
  info!(target: "tutor", %session_id, path = %path.display(), "Session finished");
  Ok((record, path))
}
