//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::Question;

/// Question as shown to students. The canonical answer is never exposed.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct QuestionOut {
    pub id: String,
    pub question: String,
}

pub fn to_out(q: &Question) -> QuestionOut {
    QuestionOut { id: q.id.clone(), question: q.text.clone() }
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct CheckIn {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub answer: String,
    #[serde(default, rename = "useModel")]
    pub use_model: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckOut {
    pub correct: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionIn {
    #[serde(default, rename = "questionIds")]
    pub question_ids: Option<[String; 2]>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub questions: Vec<QuestionOut>,
}

#[derive(Debug, Deserialize)]
pub struct AttemptIn {
    #[serde(rename = "questionIndex")]
    pub question_index: usize,
    /// Omitted reasoning is recorded as null, not as an empty string.
    #[serde(default)]
    pub reasoning: Option<String>,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct HintIn {
    #[serde(rename = "questionId")]
    pub question_id: String,
}

#[derive(Debug, Serialize)]
pub struct HintOut {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FinishOut {
    pub path: String,
    pub record: crate::domain::SessionRecord,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}
