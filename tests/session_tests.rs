mod common;

use common::{Reply, StubGateway};
use hintgen_backend::error::{GatewayError, TutorError};
use hintgen_backend::gateway::Profiles;
use hintgen_backend::prompts::build_hint_prompt;
use hintgen_backend::questions::QuestionBank;
use hintgen_backend::checker::is_correct;
use hintgen_backend::session::TutorSession;

#[tokio::test]
async fn hint_uses_recorded_pre_hint_input_and_strong_profile() {
    let bank = QuestionBank::default();
    let profiles = Profiles::default();
    let gw = StubGateway::new(Reply::Fixed("Think about how many choices the first slot has.".into()));

    let mut session = TutorSession::new();
    session.record_pre_hint(2, "8 + 7 + ... + 1", "36").unwrap();
    let before = session.export();

    let hint = session.request_hint(gw.as_ref(), &bank, &profiles.strong, "2").await.unwrap();
    assert_eq!(hint, "Think about how many choices the first slot has.");
    assert_eq!(session.export(), before);

    let calls = gw.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "gpt-4");
    assert_eq!(calls[0].params.top_p, 0.95);
    let q = bank.get("2").unwrap();
    assert_eq!(calls[0].prompts, vec![build_hint_prompt(&q.text, "40320", "8 + 7 + ... + 1", "36")]);
}

#[tokio::test]
async fn hint_requires_pre_hint_answer() {
    let bank = QuestionBank::default();
    let gw = StubGateway::new(Reply::Echo);
    let session = TutorSession::new();
    let err = session.request_hint(gw.as_ref(), &bank, &Profiles::default().strong, "1").await.unwrap_err();
    assert!(matches!(err, TutorError::MissingPreHint(id) if id == "1"));
    assert!(gw.calls().is_empty());
}

#[tokio::test]
async fn hint_for_question_outside_session_is_rejected() {
    let bank = QuestionBank::default();
    let gw = StubGateway::new(Reply::Echo);
    let session = TutorSession::new();
    let err = session.request_hint(gw.as_ref(), &bank, &Profiles::default().strong, "3").await.unwrap_err();
    assert!(matches!(err, TutorError::QuestionNotInSession(_)));
}

#[tokio::test]
async fn failed_hint_leaves_session_untouched() {
    let bank = QuestionBank::default();
    let gw = StubGateway::new(Reply::Service);
    let mut session = TutorSession::new();
    session.record_pre_hint(1, "half of four", "3").unwrap();
    let before = session.export();

    let err = session.request_hint(gw.as_ref(), &bank, &Profiles::default().strong, "1").await.unwrap_err();
    assert!(matches!(err, TutorError::Gateway(GatewayError::Service(_))));
    assert_eq!(session.export(), before);
}

#[tokio::test]
async fn full_two_question_pass() {
    let bank = QuestionBank::default();
    let gw = StubGateway::new(Reply::Fixed("Count orderings, not sums.".into()));
    let mut session = TutorSession::new();

    session.record_pre_hint(1, "four flips, half heads", "2").unwrap();
    assert!(is_correct(&bank, "1", "2").unwrap());

    session.record_pre_hint(2, "added 1 to 8", "36").unwrap();
    assert!(!is_correct(&bank, "2", "36").unwrap());
    let hint = session.request_hint(gw.as_ref(), &bank, &Profiles::default().strong, "2").await.unwrap();
    assert!(!hint.contains("40320"));
    session.record_post_hint(2, "8 factorial", "40320").unwrap();
    assert!(is_correct(&bank, "2", "40320").unwrap());
    assert!(!is_correct(&bank, "2", " 40320").unwrap());

    let rec = session.export();
    assert_eq!(rec.answer_1_pre_hint.as_deref(), Some("2"));
    assert!(rec.answer_1_post_hint.is_none());
    assert_eq!(rec.answer_2_pre_hint.as_deref(), Some("36"));
    assert_eq!(rec.answer_2_post_hint.as_deref(), Some("40320"));
    assert_eq!(rec.reasoning_2_post_hint.as_deref(), Some("8 factorial"));
}
