//! Built-in question set used when no bank is configured.

use crate::domain::Question;

/// Three probability questions with known numeric answers.
pub fn seed_questions() -> Vec<Question> {
  vec![
    Question::new(
      "1",
      "A fair coin is flipped 4 times. What is the expected number of heads?",
      "2",
    ),
    Question::new(
      "2",
      "In how many different orders can 8 distinct books be arranged on a shelf?",
      "40320",
    ),
    Question::new(
      "3",
      "Two fair six-sided dice are rolled. In how many of the 36 equally likely outcomes do the dice sum to 7?",
      "6",
    ),
  ]
}
