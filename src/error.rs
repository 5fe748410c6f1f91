//! Error types shared by the tutoring core and its outer surfaces.

use thiserror::Error;

/// Failures surfaced by a completion gateway. Never retried here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
  #[error("completion request timed out after {0}s")]
  Timeout(u64),
  #[error("completion service failed: {0}")]
  Service(String),
  #[error("completion service returned an invalid response: {0}")]
  InvalidResponse(String),
}

/// Errors emitted by the question bank, checker and tutor session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TutorError {
  #[error("unknown question id: {0}")]
  NotFound(String),
  #[error("question index must be 1 or 2, got {0}")]
  InvalidQuestionIndex(usize),
  #[error("question {0} is not part of this session")]
  QuestionNotInSession(String),
  #[error("no pre-hint answer recorded for question {0}")]
  MissingPreHint(String),
  #[error("completion gateway is not configured")]
  GatewayDisabled,
  #[error(transparent)]
  Gateway(#[from] GatewayError),
}

/// Errors emitted by the on-disk session store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
  #[error("invalid session id: {0:?}")]
  InvalidId(String),
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

/// Errors surfaced by the application layer (HTTP handlers and console flow).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
  #[error("unknown session: {0}")]
  UnknownSession(String),
  #[error("invalid request body: {0}")]
  BadRequest(String),
  #[error("too many live sessions (limit {0})")]
  TooManySessions(usize),
  #[error(transparent)]
  Tutor(#[from] TutorError),
  #[error(transparent)]
  Store(#[from] StoreError),
}
