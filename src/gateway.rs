//! Completion gateway contract and decoding parameters.
//!
//! A gateway turns each prompt into one completion. Implementations must keep
//! the output 1:1 with the input and in the same order, and must not retry.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::GatewayError;

/// Generation-time settings passed with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodingParams {
  pub temperature: f32,
  pub max_tokens: u32,
  pub top_p: f32,
  pub frequency_penalty: f32,
  pub presence_penalty: f32,
  /// Seconds before the call fails with `GatewayError::Timeout`.
  pub request_timeout: u64,
}

impl Default for DecodingParams {
  fn default() -> Self {
    Self {
      temperature: 1.0,
      max_tokens: 400,
      top_p: 1.0,
      frequency_penalty: 0.0,
      presence_penalty: 0.0,
      request_timeout: 45,
    }
  }
}

impl DecodingParams {
  /// Field-level override: only the fields set in `o` change.
  pub fn with_overrides(&self, o: &DecodingOverrides) -> Self {
    Self {
      temperature: o.temperature.unwrap_or(self.temperature),
      max_tokens: o.max_tokens.unwrap_or(self.max_tokens),
      top_p: o.top_p.unwrap_or(self.top_p),
      frequency_penalty: o.frequency_penalty.unwrap_or(self.frequency_penalty),
      presence_penalty: o.presence_penalty.unwrap_or(self.presence_penalty),
      request_timeout: o.request_timeout.unwrap_or(self.request_timeout),
    }
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout)
  }
}

/// Partial `DecodingParams`, as read from TOML or supplied per call.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DecodingOverrides {
  #[serde(default)] pub temperature: Option<f32>,
  #[serde(default)] pub max_tokens: Option<u32>,
  #[serde(default)] pub top_p: Option<f32>,
  #[serde(default)] pub frequency_penalty: Option<f32>,
  #[serde(default)] pub presence_penalty: Option<f32>,
  #[serde(default)] pub request_timeout: Option<u64>,
}

/// A model identifier bundled with the decoding parameters to use with it.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelProfile {
  pub model: String,
  pub params: DecodingParams,
}

impl ModelProfile {
  /// Cheaper profile used for answer classification.
  pub fn fast(model: impl Into<String>) -> Self {
    Self { model: model.into(), params: DecodingParams::default() }
  }

  /// Higher-capability profile used for hint generation.
  pub fn strong(model: impl Into<String>) -> Self {
    Self {
      model: model.into(),
      params: DecodingParams { top_p: 0.95, ..DecodingParams::default() },
    }
  }
}

/// The fast/strong pair used by the application.
#[derive(Clone, Debug, PartialEq)]
pub struct Profiles {
  pub fast: ModelProfile,
  pub strong: ModelProfile,
}

impl Default for Profiles {
  fn default() -> Self {
    Self { fast: ModelProfile::fast("gpt-3.5-turbo"), strong: ModelProfile::strong("gpt-4") }
  }
}

#[async_trait]
pub trait CompletionGateway: Send + Sync {
  /// Complete every prompt in order; one output per prompt.
  async fn complete(
    &self,
    prompts: &[String],
    model: &str,
    params: &DecodingParams,
  ) -> Result<Vec<String>, GatewayError>;
}

/// Single-prompt convenience over `complete`.
pub async fn complete_one(
  gateway: &dyn CompletionGateway,
  prompt: String,
  profile: &ModelProfile,
) -> Result<String, GatewayError> {
  gateway
    .complete(std::slice::from_ref(&prompt), &profile.model, &profile.params)
    .await?
    .into_iter()
    .next()
    .ok_or_else(|| GatewayError::InvalidResponse("no completion returned".into()))
}
