use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quiz_core::model::{Batch, Difficulty, ScoreTier};
use quiz_core::time::fixed_now;
use services::content::parse_batch;
use services::{
    AnswerOutcome, AudioClip, AudioOutput, Clock, ContentProvider, FeedbackEffects,
    GenerationError, NarrationError, Narrator, PlaybackError, PostAnswerAction, QuizLoopService,
    QuizPhase, SpeechSynthesizer,
};

/// Serves a canned JSON payload the way a generative backend would.
struct CannedProvider {
    payload: String,
}

#[async_trait]
impl ContentProvider for CannedProvider {
    async fn generate_batch(
        &self,
        _level: Difficulty,
        _uniqueness_token: &str,
    ) -> Result<Batch, GenerationError> {
        parse_batch(&self.payload)
    }
}

fn payload(count: u32) -> String {
    let items: Vec<String> = (1..=count)
        .map(|id| {
            format!(
                r#"{{"id":{id},"text":"Find $\\frac{{d}}{{dx}} x^{id}$","options":[{{"id":"A","text":"${id}x^{{{prev}}}$"}},{{"id":"B","text":"$x^{id}$"}},{{"id":"C","text":"$0$"}},{{"id":"D","text":"$1$"}}],"correctOptionId":"A","explanation":"Power rule."}}"#,
                prev = id.saturating_sub(1)
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

#[derive(Default)]
struct Transcript {
    lines: Mutex<Vec<String>>,
}

#[async_trait]
impl SpeechSynthesizer for Transcript {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, NarrationError> {
        self.lines.lock().unwrap().push(text.to_string());
        Ok(AudioClip::new(vec![0.0; 4], 24_000))
    }
}

struct Speaker;

#[async_trait(?Send)]
impl AudioOutput for Speaker {
    async fn play(&self, _clip: &AudioClip) -> Result<(), PlaybackError> {
        Ok(())
    }
}

fn service(payload: String) -> QuizLoopService {
    QuizLoopService::new(Arc::new(CannedProvider { payload })).with_clock(Clock::fixed(fixed_now()))
}

#[tokio::test]
async fn full_quiz_with_one_mistake_per_question() {
    let quiz = service(payload(10));
    let transcript = Arc::new(Transcript::default());
    let output: Arc<dyn AudioOutput> = Arc::new(Speaker);
    let effects = FeedbackEffects::narration_only(
        Narrator::new(transcript.clone(), output.clone()),
        output,
    );

    let mut session = quiz.new_session();
    assert_eq!(
        quiz.start(&mut session, Difficulty::Standard).await.unwrap(),
        QuizPhase::Active
    );

    while session.phase() == QuizPhase::Active {
        let question = session.current_question().unwrap();
        let correct = question.correct_option_id().clone();
        let mistake = question
            .options()
            .iter()
            .map(|option| option.id().clone())
            .find(|id| *id != correct)
            .unwrap();

        let outcome = session.select_option(&mistake).unwrap();
        assert_eq!(outcome, AnswerOutcome::Incorrect);
        effects.on_answer(outcome).await;
        assert_eq!(session.post_answer_action(), Some(PostAnswerAction::Retry));
        session.retry().unwrap();

        let outcome = session.select_option(&correct).unwrap();
        effects.on_answer(outcome).await;
        session.advance().unwrap();
    }

    assert_eq!(session.phase(), QuizPhase::Finished);
    let summary = session.summary().unwrap();
    assert_eq!(summary.score(), 10);
    assert_eq!(summary.tier(), ScoreTier::Top);
    assert_eq!(transcript.lines.lock().unwrap().len(), 20);

    session.restart().unwrap();
    assert_eq!(session.phase(), QuizPhase::Idle);
}

#[tokio::test]
async fn short_batch_leaves_session_idle() {
    let quiz = service(payload(9));
    let mut session = quiz.new_session();
    let phase = quiz.start(&mut session, Difficulty::Basic).await.unwrap();
    assert_eq!(phase, QuizPhase::Idle);
    assert!(session.current_question().is_none());
}

#[tokio::test]
async fn malformed_payload_leaves_session_idle() {
    let quiz = service("```json\nnot a batch\n```".into());
    let mut session = quiz.new_session();
    let phase = quiz.start(&mut session, Difficulty::Advanced).await.unwrap();
    assert_eq!(phase, QuizPhase::Idle);

    // The user can simply try again.
    session.start(Difficulty::Advanced).unwrap();
    assert_eq!(session.phase(), QuizPhase::Loading);
}
