//! Interactive console flow over stdin/stdout.
//!
//! Walks both session questions: ask for reasoning and answer, check locally,
//! offer one hint on a wrong answer, capture the retry, then persist the record.
//! Input and output are generic so the flow can be driven from tests.

use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{instrument, warn};

use crate::checker::is_correct;
use crate::error::AppError;
use crate::session::TutorSession;
use crate::state::AppState;

/// Run one session to completion and return where it was saved.
#[instrument(level = "info", skip_all)]
pub async fn run<R, W>(state: &AppState, input: R, mut output: W) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  let mut lines = input.lines();
  let mut session = TutorSession::new();
  let student_id = session.get_session_id().to_string();
  output.write_all(format!("Session {student_id}\n").as_bytes()).await?;

  for index in 1..=2 {
    let question_id = session.question_id(index)?.to_string();
    let question = state.bank.get(&question_id)?;
    output.write_all(format!("\nQuestion {index}: {}\n", question.text).as_bytes()).await?;

    let reasoning = ask(&mut lines, &mut output, "Explain your reasoning.\n").await?;
    let answer = ask(&mut lines, &mut output, "Enter your answer.\n").await?;
    session.record_pre_hint(index, reasoning, answer.clone())?;

    if is_correct(&state.bank, &question_id, &answer)? {
      output.write_all(b"Correct!\n").await?;
      continue;
    }

    let Some(gateway) = state.gateway.as_deref() else {
      output.write_all(b"Not quite. Hints are unavailable right now.\n").await?;
      continue;
    };
    match session.request_hint(gateway, &state.bank, &state.profiles.strong, &question_id).await {
      Ok(hint) => output.write_all(format!("Not quite. Hint: {}\n", hint.trim()).as_bytes()).await?,
      Err(e) => {
        warn!(target: "tutor", session = %student_id, error = %e, "Hint request failed");
        output.write_all(b"Not quite. No hint could be generated.\n").await?;
      }
    }

    let reasoning = ask(&mut lines, &mut output, "Explain your reasoning again.\n").await?;
    let answer = ask(&mut lines, &mut output, "Enter your answer.\n").await?;
    session.record_post_hint(index, reasoning, answer.clone())?;
    let verdict = if is_correct(&state.bank, &question_id, &answer)? { "Correct!\n" } else { "Still not right.\n" };
    output.write_all(verdict.as_bytes()).await?;
  }

  let path = state.store.save(&session.export()).await.map_err(AppError::from)?;
  output.write_all(format!("\nSaved to {}\n", path.display()).as_bytes()).await?;
  output.flush().await?;
  Ok(path)
}

/// Print a prompt and read one line. End of input reads as an empty line.
async fn ask<R, W>(lines: &mut tokio::io::Lines<R>, output: &mut W, prompt: &str) -> std::io::Result<String>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  output.write_all(prompt.as_bytes()).await?;
  output.flush().await?;
  Ok(lines.next_line().await?.unwrap_or_default())
}
