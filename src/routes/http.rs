//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs ids and basic result info, never student text.

use std::sync::Arc;
use axum::{body::Bytes, extract::{Path, State}, http::StatusCode, Json, response::{IntoResponse, Response}};
use tracing::{info, instrument, warn};

use crate::error::{AppError, GatewayError, StoreError, TutorError};
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = match &self {
      AppError::UnknownSession(_) => StatusCode::NOT_FOUND,
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::TooManySessions(_) => StatusCode::SERVICE_UNAVAILABLE,
      AppError::Tutor(e) => tutor_status(e),
      AppError::Store(StoreError::InvalidId(_)) => StatusCode::BAD_REQUEST,
      AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      warn!(target: "hintgen", %status, error = %self, "Request failed");
    }
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

fn tutor_status(e: &TutorError) -> StatusCode {
  match e {
    TutorError::NotFound(_) => StatusCode::NOT_FOUND,
    TutorError::InvalidQuestionIndex(_)
    | TutorError::QuestionNotInSession(_)
    | TutorError::MissingPreHint(_) => StatusCode::BAD_REQUEST,
    TutorError::GatewayDisabled => StatusCode::SERVICE_UNAVAILABLE,
    TutorError::Gateway(GatewayError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
    TutorError::Gateway(_) => StatusCode::BAD_GATEWAY,
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_list_questions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let out: Vec<QuestionOut> = state.bank.ids().into_iter()
    .filter_map(|id| state.bank.get(id).ok())
    .map(to_out)
    .collect();
  Json(out)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<QuestionOut>, AppError> {
  let q = state.bank.get(&id)?;
  Ok(Json(to_out(q)))
}

#[instrument(level = "info", skip(state, body), fields(%body.question_id, use_model = body.use_model, answer_len = body.answer.len()))]
pub async fn http_post_check(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CheckIn>,
) -> Result<Json<CheckOut>, AppError> {
  let correct = logic::check_answer(&state, &body.question_id, &body.answer, body.use_model).await?;
  info!(target: "tutor", id = %body.question_id, %correct, "HTTP check evaluated");
  Ok(Json(CheckOut { correct }))
}

/// An empty body starts a session over the default questions; anything else must parse.
#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_create_session(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<Json<CreateSessionOut>, AppError> {
  let body: CreateSessionIn = if body.iter().all(u8::is_ascii_whitespace) {
    CreateSessionIn::default()
  } else {
    serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?
  };
  let (session_id, ids) = logic::create_session(&state, body.question_ids).await?;
  let questions = ids.iter()
    .map(|id| state.bank.get(id).map(to_out))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(Json(CreateSessionOut { session_id, questions }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
  Ok(Json(logic::lookup_session(&state, &id).await?))
}

#[instrument(level = "info", skip(state, body), fields(question_index = body.question_index))]
pub async fn http_post_pre_hint(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<AttemptIn>,
) -> Result<Json<CheckOut>, AppError> {
  let correct = logic::record_pre_hint(&state, &id, body.question_index, body.reasoning.as_deref(), &body.answer).await?;
  Ok(Json(CheckOut { correct }))
}

#[instrument(level = "info", skip(state, body), fields(%body.question_id))]
pub async fn http_post_hint(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<HintIn>,
) -> Result<Json<HintOut>, AppError> {
  let text = logic::request_hint(&state, &id, &body.question_id).await?;
  info!(target: "tutor", session = %id, question = %body.question_id, "HTTP hint served");
  Ok(Json(HintOut { text }))
}

#[instrument(level = "info", skip(state, body), fields(question_index = body.question_index))]
pub async fn http_post_post_hint(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<AttemptIn>,
) -> Result<Json<CheckOut>, AppError> {
  let correct = logic::record_post_hint(&state, &id, body.question_index, body.reasoning.as_deref(), &body.answer).await?;
  Ok(Json(CheckOut { correct }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_finish(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<FinishOut>, AppError> {
  let (record, path) = logic::finish_session(&state, &id).await?;
  Ok(Json(FinishOut { path: path.display().to_string(), record }))
}
