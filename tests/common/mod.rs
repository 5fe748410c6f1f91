#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hintgen_backend::error::GatewayError;
use hintgen_backend::gateway::{CompletionGateway, DecodingParams, Profiles};
use hintgen_backend::questions::QuestionBank;
use hintgen_backend::state::AppState;
use hintgen_backend::store::SessionStore;

/// One recorded `complete` call.
#[derive(Clone, Debug)]
pub struct Call {
    pub prompts: Vec<String>,
    pub model: String,
    pub params: DecodingParams,
}

/// What the stub answers with.
#[derive(Clone, Debug)]
pub enum Reply {
    /// `echo:<prompt>` per prompt.
    Echo,
    /// The same fixed text for every prompt.
    Fixed(String),
    Timeout,
    Service,
}

pub struct StubGateway {
    reply: Reply,
    pub calls: Mutex<Vec<Call>>,
}

impl StubGateway {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self { reply, calls: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionGateway for StubGateway {
    async fn complete(
        &self,
        prompts: &[String],
        model: &str,
        params: &DecodingParams,
    ) -> Result<Vec<String>, GatewayError> {
        self.calls.lock().unwrap().push(Call {
            prompts: prompts.to_vec(),
            model: model.to_string(),
            params: params.clone(),
        });
        match &self.reply {
            Reply::Echo => Ok(prompts.iter().map(|p| format!("echo:{p}")).collect()),
            Reply::Fixed(text) => Ok(prompts.iter().map(|_| text.clone()).collect()),
            Reply::Timeout => Err(GatewayError::Timeout(params.request_timeout)),
            Reply::Service => Err(GatewayError::Service("OpenAI HTTP 500: boom".into())),
        }
    }
}

pub fn test_state(gateway: Option<Arc<StubGateway>>, sessions_dir: &std::path::Path) -> AppState {
    AppState::new(
        QuestionBank::default(),
        Profiles::default(),
        gateway.map(|g| g as Arc<dyn CompletionGateway>),
        SessionStore::new(sessions_dir),
    )
}
