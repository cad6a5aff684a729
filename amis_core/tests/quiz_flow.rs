use std::collections::HashSet;
use std::sync::Arc;

use amis_core::{
    FallbackChain, FnProvider, AudioProvider, QuestionGenerator, QuizConfig, QuizError,
    QuizSession, Silent, VocabularyItem, VocabularyStore,
};

fn body_parts() -> Arc<VocabularyStore> {
    let store = VocabularyStore::new(
        vec![
            VocabularyItem::new("Fongoh", "頭"),
            VocabularyItem::new("Mata", "眼睛"),
            VocabularyItem::new("Ngoso'", "鼻子"),
        ],
        vec![],
    )
    .unwrap();
    Arc::new(store)
}

#[test]
fn answering_every_question_correctly_completes_with_full_score() {
    let config = QuizConfig::default();
    let mut session = QuizSession::new(body_parts(), &config).unwrap();
    assert_eq!(session.len(), 3);

    for i in 0..3 {
        let question = session.current_question().unwrap().clone();
        assert!(question.is_well_formed());

        let feedback = session.submit_answer(&question.correct_answer).unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.correct_answer, question.correct_answer);
        assert_eq!(session.score(), (i as u32 + 1) * config.reward);
    }

    assert!(session.is_complete());
    assert_eq!(session.score(), 3 * config.reward);
    assert_eq!(session.stats().accuracy_percent, 100.0);
}

#[test]
fn wrong_answer_reports_the_right_one_and_advances() {
    let mut session = QuizSession::new(body_parts(), &QuizConfig::default()).unwrap();
    let question = session.current_question().unwrap().clone();
    let wrong = question
        .options
        .iter()
        .find(|o| **o != question.correct_answer)
        .unwrap()
        .clone();

    let feedback = session.submit_answer(&wrong).unwrap();
    assert!(!feedback.correct);
    assert_eq!(feedback.correct_answer, question.correct_answer);
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.score(), 0);
}

#[test]
fn minimum_store_generates_five_well_formed_questions() {
    let mut generator = QuestionGenerator::new(body_parts(), "(other)");
    let questions = generator.generate(5);
    assert_eq!(questions.len(), 5);
    for q in &questions {
        let distinct: HashSet<&String> = q.options.iter().collect();
        assert_eq!(distinct.len(), 3);
        assert!(q.options.contains(&q.correct_answer));
    }
}

#[test]
fn completed_session_recovers_through_reset() {
    let config = QuizConfig {
        question_count: 2,
        reward: 50,
        ..QuizConfig::default()
    };
    let mut session = QuizSession::new(Arc::new(VocabularyStore::builtin().unwrap()), &config).unwrap();
    session.submit_answer("?").unwrap();
    session.submit_answer("?").unwrap();

    assert!(matches!(session.submit_answer("?"), Err(QuizError::InvalidState(_))));
    assert!(matches!(session.current_question(), Err(QuizError::OutOfRange { .. })));

    session.reset();
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.score(), 0);
    assert!(session.questions().iter().all(|q| q.is_well_formed()));

    let answer = session.current_question().unwrap().correct_answer.clone();
    assert_eq!(session.submit_answer(&answer).unwrap().score, 50);
}

#[test]
fn audio_failure_leaves_questions_untouched() {
    let audio = FallbackChain::new()
        .with(FnProvider::new("tts", |_: &str| None))
        .with(Silent);
    let session = QuizSession::new(Arc::new(VocabularyStore::builtin().unwrap()), &QuizConfig::default()).unwrap();

    for q in session.questions() {
        if let Some(text) = &q.prompt_audio_text {
            assert!(audio.synthesize(text).is_none());
        }
    }
    assert!(session.current_question().is_ok());
}

#[test]
fn store_with_two_items_refuses_to_start() {
    let err = VocabularyStore::new(
        vec![VocabularyItem::new("Fongoh", "頭"), VocabularyItem::new("Mata", "眼睛")],
        vec![],
    )
    .unwrap_err();
    assert!(matches!(err, QuizError::Configuration(_)));
}
