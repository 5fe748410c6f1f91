//! Read-only question bank. The table is injected at construction time.

use std::collections::HashMap;

use crate::domain::Question;
use crate::error::TutorError;
use crate::seeds::seed_questions;

#[derive(Clone, Debug)]
pub struct QuestionBank {
  by_id: HashMap<String, Question>,
}

impl QuestionBank {
  /// Build a bank from an explicit table. Later duplicates replace earlier ones.
  pub fn new(table: impl IntoIterator<Item = Question>) -> Self {
    let by_id = table.into_iter().map(|q| (q.id.clone(), q)).collect();
    Self { by_id }
  }

  pub fn builtin() -> Self {
    Self::new(seed_questions())
  }

  pub fn get(&self, id: &str) -> Result<&Question, TutorError> {
    self.by_id.get(id).ok_or_else(|| TutorError::NotFound(id.to_string()))
  }

  pub fn get_question(&self, id: &str) -> Result<&str, TutorError> {
    self.get(id).map(|q| q.text.as_str())
  }

  pub fn get_answer(&self, id: &str) -> Result<&str, TutorError> {
    self.get(id).map(|q| q.canonical_answer.as_str())
  }

  /// Question ids, sorted.
  pub fn ids(&self) -> Vec<&str> {
    let mut ids: Vec<&str> = self.by_id.keys().map(String::as_str).collect();
    ids.sort_unstable();
    ids
  }

  pub fn len(&self) -> usize {
    self.by_id.len()
  }

  pub fn is_empty(&self) -> bool {
    self.by_id.is_empty()
  }
}

impl Default for QuestionBank {
  fn default() -> Self {
    Self::builtin()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_lookups_return_stored_strings() {
    let bank = QuestionBank::default();
    assert_eq!(bank.len(), 3);
    assert_eq!(bank.ids(), vec!["1", "2", "3"]);
    for q in seed_questions() {
      assert_eq!(bank.get_question(&q.id).unwrap(), q.text);
      assert_eq!(bank.get_answer(&q.id).unwrap(), q.canonical_answer);
    }
    assert_eq!(bank.get_answer("2").unwrap(), "40320");
  }

  #[test]
  fn unknown_id_is_not_found() {
    let bank = QuestionBank::default();
    assert!(matches!(bank.get_question("9"), Err(TutorError::NotFound(id)) if id == "9"));
    assert!(matches!(bank.get_answer(""), Err(TutorError::NotFound(_))));
  }

  #[test]
  fn injected_table_replaces_builtin() {
    let bank = QuestionBank::new([Question::new("a", "What is 2 + 2?", "4")]);
    assert_eq!(bank.get_answer("a").unwrap(), "4");
    assert!(bank.get("1").is_err());
  }
}
