//! Minimal OpenAI client implementing `CompletionGateway`.
//!
//! We only call chat.completions. Every prompt is sent as a system/user pair and
//! prompts are completed one after another, in input order.
//! Calls are instrumented and log model names, latencies, and token usage (not contents).
//!
//! NOTE: We never log the API key and we keep error-body truncations short to avoid PII leaks.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::error::GatewayError;
use crate::gateway::{CompletionGateway, DecodingParams};
use crate::prompts::SYSTEM_ROLE;
use crate::util::trunc_for_log;

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
}

impl OpenAI {
  pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
    Self { client: reqwest::Client::new(), api_key: api_key.into(), base_url: base_url.into() }
  }

  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    if api_key.trim().is_empty() { return None; }
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    Some(Self::new(api_key, base_url))
  }

  /// One chat completion for one prompt.
  #[instrument(level = "info", skip(self, prompt, params), fields(model = %model, prompt_len = prompt.len()))]
  async fn chat(&self, model: &str, prompt: &str, params: &DecodingParams) -> Result<String, GatewayError> {
    let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system", content: SYSTEM_ROLE.into() },
        ChatMessageReq { role: "user", content: prompt.into() },
      ],
      temperature: params.temperature,
      max_tokens: params.max_tokens,
      top_p: params.top_p,
      frequency_penalty: params.frequency_penalty,
      presence_penalty: params.presence_penalty,
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "hintgen-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .timeout(params.timeout())
      .json(&req).send().await
      .map_err(|e| transport_error(e, params))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| trunc_for_log(&body, 200));
      error!(%status, elapsed = ?start.elapsed(), "OpenAI request rejected");
      return Err(GatewayError::Service(format!("OpenAI HTTP {}: {}", status, msg)));
    }

    // Reading the body is still transport; only decoding it can be an invalid response.
    let bytes = res.bytes().await.map_err(|e| transport_error(e, params))?;
    let body: ChatCompletionResponse = serde_json::from_slice(&bytes)
      .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    info!(elapsed = ?start.elapsed(), "Model response received");

    extract_content(body)
  }
}

#[async_trait]
impl CompletionGateway for OpenAI {
  #[instrument(level = "info", skip(self, prompts, params), fields(model = %model, prompts = prompts.len()))]
  async fn complete(
    &self,
    prompts: &[String],
    model: &str,
    params: &DecodingParams,
  ) -> Result<Vec<String>, GatewayError> {
    let mut results = Vec::with_capacity(prompts.len());
    for prompt in prompts {
      results.push(self.chat(model, prompt, params).await?);
    }
    Ok(results)
  }
}

fn transport_error(e: reqwest::Error, params: &DecodingParams) -> GatewayError {
  if e.is_timeout() {
    GatewayError::Timeout(params.request_timeout)
  } else {
    GatewayError::Service(e.to_string())
  }
}

/// First choice's message content. Missing, empty, or whitespace-only content is an
/// invalid response: nothing usable came back.
fn extract_content(body: ChatCompletionResponse) -> Result<String, GatewayError> {
  let text = body.choices.into_iter().next()
    .ok_or_else(|| GatewayError::InvalidResponse("no choices in response".into()))?
    .message.content
    .ok_or_else(|| GatewayError::InvalidResponse("choice has no content".into()))?;
  if text.trim().is_empty() {
    return Err(GatewayError::InvalidResponse("empty completion".into()));
  }
  Ok(text)
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  max_tokens: u32,
  top_p: f32,
  frequency_penalty: f32,
  presence_penalty: f32,
}
#[derive(Serialize)]
struct ChatMessageReq { role: &'static str, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
