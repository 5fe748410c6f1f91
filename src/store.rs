//! On-disk session store: one pretty-printed JSON file per session, named by its id.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::domain::SessionRecord;
use crate::error::StoreError;
use crate::util::is_alnum_id;

#[derive(Clone, Debug)]
pub struct SessionStore {
  dir: PathBuf,
}

impl SessionStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  /// SESSIONS_DIR, or `./sessions`.
  pub fn from_env() -> Self {
    Self::new(std::env::var("SESSIONS_DIR").unwrap_or_else(|_| "./sessions".into()))
  }

  fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
    if !is_alnum_id(id) {
      return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(self.dir.join(format!("{id}.json")))
  }

  #[instrument(level = "info", skip(self, record), fields(student_id = %record.student_id))]
  pub async fn save(&self, record: &SessionRecord) -> Result<PathBuf, StoreError> {
    let path = self.path_for(&record.student_id)?;
    tokio::fs::create_dir_all(&self.dir).await?;
    let json = serde_json::to_vec_pretty(record)?;
    tokio::fs::write(&path, json).await?;
    info!(target: "tutor", path = %path.display(), "Session saved");
    Ok(path)
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn load(&self, id: &str) -> Result<SessionRecord, StoreError> {
    let path = self.path_for(id)?;
    let bytes = tokio::fs::read(&path).await?;
    Ok(serde_json::from_slice(&bytes)?)
  }
}
