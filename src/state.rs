//! Application state: question bank, model profiles, completion gateway, live sessions, and the store.
//!
//! Live sessions sit in an in-memory map keyed by student id. A session leaves the
//! map when it is finished and persisted; the map is capped at `max_sessions`.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::load_config_from_env;
use crate::gateway::{CompletionGateway, Profiles};
use crate::openai::OpenAI;
use crate::questions::QuestionBank;
use crate::session::TutorSession;
use crate::store::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub bank: QuestionBank,
    pub profiles: Profiles,
    pub gateway: Option<Arc<dyn CompletionGateway>>,
    pub sessions: Arc<RwLock<HashMap<String, TutorSession>>>,
    pub store: SessionStore,
    /// Upper bound on live (unfinished) sessions.
    pub max_sessions: usize,
}

pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

impl AppState {
    /// Build state from env: load config, question bank, profiles, store, init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Self {
        let cfg = load_config_from_env().unwrap_or_default();
        let bank = cfg.question_bank();
        let profiles = cfg.profiles();
        info!(target: "hintgen", questions = bank.len(), ids = ?bank.ids(), "Question bank ready");

        let gateway: Option<Arc<dyn CompletionGateway>> = match OpenAI::from_env() {
            Some(oa) => {
                info!(target: "hintgen", base_url = %oa.base_url, fast_model = %profiles.fast.model, strong_model = %profiles.strong.model, "OpenAI enabled.");
                Some(Arc::new(oa))
            }
            None => {
                info!(target: "hintgen", "OpenAI disabled (no OPENAI_API_KEY). Hints and model checks unavailable.");
                None
            }
        };

        let max_sessions = std::env::var("MAX_LIVE_SESSIONS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_SESSIONS);

        Self::new(bank, profiles, gateway, SessionStore::from_env()).with_max_sessions(max_sessions)
    }

    pub fn new(
        bank: QuestionBank,
        profiles: Profiles,
        gateway: Option<Arc<dyn CompletionGateway>>,
        store: SessionStore,
    ) -> Self {
        Self {
            bank,
            profiles,
            gateway,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            store,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Register a session and return its id, or `None` when the live-session cap is reached.
    #[instrument(level = "debug", skip(self, session))]
    pub async fn insert_session(&self, mut session: TutorSession) -> Option<String> {
        let id = session.get_session_id().to_string();
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            warn!(target: "tutor", live = sessions.len(), limit = self.max_sessions, "Live-session cap reached");
            return None;
        }
        sessions.insert(id.clone(), session);
        Some(id)
    }

    /// Copy of a live session.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_session(&self, id: &str) -> Option<TutorSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Run `f` against a live session under the write lock.
    pub async fn with_session<T>(&self, id: &str, f: impl FnOnce(&mut TutorSession) -> T) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(id).map(f)
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn remove_session(&self, id: &str) -> Option<TutorSession> {
        self.sessions.write().await.remove(id)
    }
}
