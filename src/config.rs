//! Loading tutor configuration (question bank + decoding overrides) from TOML.
//!
//! Example:
//!
//! ```toml
//! [[questions]]
//! id = "1"
//! question = "What is 2 + 2?"
//! answer = "4"
//!
//! [decoding.strong]
//! temperature = 0.7
//! request_timeout = 30
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Question;
use crate::gateway::{DecodingOverrides, ModelProfile, Profiles};
use crate::questions::QuestionBank;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TutorConfig {
  /// Replaces the built-in bank when non-empty.
  #[serde(default)]
  pub questions: Vec<Question>,
  #[serde(default)]
  pub decoding: DecodingCfg,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct DecodingCfg {
  #[serde(default)] pub fast: DecodingOverrides,
  #[serde(default)] pub strong: DecodingOverrides,
}

impl TutorConfig {
  pub fn question_bank(&self) -> QuestionBank {
    if self.questions.is_empty() {
      QuestionBank::builtin()
    } else {
      QuestionBank::new(self.questions.iter().cloned())
    }
  }

  /// Model names come from the environment; decoding overrides from the file.
  pub fn profiles(&self) -> Profiles {
    let fast_model =
      std::env::var("OPENAI_FAST_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".into());
    let strong_model =
      std::env::var("OPENAI_STRONG_MODEL").unwrap_or_else(|_| "gpt-4".into());
    self.profiles_for(fast_model, strong_model)
  }

  pub fn profiles_for(&self, fast_model: String, strong_model: String) -> Profiles {
    let mut fast = ModelProfile::fast(fast_model);
    fast.params = fast.params.with_overrides(&self.decoding.fast);
    let mut strong = ModelProfile::strong(strong_model);
    strong.params = strong.params.with_overrides(&self.decoding.strong);
    Profiles { fast, strong }
  }
}

pub fn parse_config(s: &str) -> Result<TutorConfig, toml::de::Error> {
  toml::from_str::<TutorConfig>(s)
}

/// Attempt to load `TutorConfig` from AGENT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<TutorConfig> {
  let path = std::env::var("AGENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "hintgen", %path, questions = cfg.questions.len(), "Loaded tutor config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "hintgen", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "hintgen", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
