//! Prompt templates sent to the completion service.
//!
//! These are plain string builders: the same inputs always produce the same bytes,
//! so the rubric text stays auditable and testable against golden strings.

/// Persona framing every completion request.
pub const SYSTEM_ROLE: &str = "You're a math education expert.";

pub const HINT_INSTRUCTION: &str = "Given a math question, the correct answer, and the incorrect answer provided by the student, generate a hint meeting the requirements in the rubric. The hint should be up to two sentences long.";

pub const HINT_RUBRIC: &str = "1. The hint should not make any incorrect statements and should be relevant to the current question and student answer.\n\
2. The hint should not directly reveal the correct answer to the student.\n\
3. The hint provides suggestions to the student that, when followed, will guide them towards the correct answer.\n\
4. The hint correctly points out the error the student made or the misconception underlying their answer.\n\
5. The hint is positive and has an encouraging tone.";

pub const CHECK_INSTRUCTION: &str = "Given a math question, the correct answer, and a student's answer, determine if the student's answer is correct. Answer only with a 'correct' or 'incorrect'.";

pub fn build_hint_prompt(
  question: &str,
  correct_answer: &str,
  student_reasoning: &str,
  student_answer: &str,
) -> String {
  format!(
    "{SYSTEM_ROLE}\n\n{HINT_INSTRUCTION}\n\n{HINT_RUBRIC}\n\n\
     Math question: {question}\n\n\
     Correct answer: {correct_answer}\n\n\
     Student's reasoning: {student_reasoning}\n\n\
     Student's answer: {student_answer}\n\n\
     Hint: "
  )
}

pub fn build_check_prompt(question: &str, correct_answer: &str, student_answer: &str) -> String {
  format!(
    "{CHECK_INSTRUCTION}\n\n\
     Math question: {question}\n\n\
     Correct answer: {correct_answer}\n\n\
     Student's answer: {student_answer}\n\n\
     Is the student's answer correct or incorrect? "
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hint_prompt_golden() {
    let p = build_hint_prompt("What is 2 + 2?", "4", "I added 2 and 3", "5");
    let expected = "You're a math education expert.\n\n\
Given a math question, the correct answer, and the incorrect answer provided by the student, generate a hint meeting the requirements in the rubric. The hint should be up to two sentences long.\n\n\
1. The hint should not make any incorrect statements and should be relevant to the current question and student answer.\n\
2. The hint should not directly reveal the correct answer to the student.\n\
3. The hint provides suggestions to the student that, when followed, will guide them towards the correct answer.\n\
4. The hint correctly points out the error the student made or the misconception underlying their answer.\n\
5. The hint is positive and has an encouraging tone.\n\n\
Math question: What is 2 + 2?\n\n\
Correct answer: 4\n\n\
Student's reasoning: I added 2 and 3\n\n\
Student's answer: 5\n\n\
Hint: ";
    assert_eq!(p, expected);
  }

  #[test]
  fn check_prompt_golden() {
    let p = build_check_prompt("What is 2 + 2?", "4", "four");
    assert_eq!(
      p,
      "Given a math question, the correct answer, and a student's answer, determine if the student's answer is correct. Answer only with a 'correct' or 'incorrect'.\n\n\
Math question: What is 2 + 2?\n\n\
Correct answer: 4\n\n\
Student's answer: four\n\n\
Is the student's answer correct or incorrect? "
    );
  }

  #[test]
  fn builders_are_deterministic() {
    let a = build_hint_prompt("q", "a", "r", "s");
    let b = build_hint_prompt("q", "a", "r", "s");
    assert_eq!(a, b);
    assert_eq!(build_check_prompt("q", "a", "s"), build_check_prompt("q", "a", "s"));
    assert!(build_hint_prompt("x", "y", "z", "w").contains(HINT_RUBRIC));
  }
}
