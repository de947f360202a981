use std::time::Duration;

use quiz_core::model::{Difficulty, OptionId};
use services::{QuizPhase, QuizSession};

use super::test_harness::{
    question_text, setup_launch_harness, setup_narrated_harness, setup_quiz_harness,
};
use crate::vm::QuizIntent;

fn option(label: &str) -> OptionId {
    OptionId::parse(label).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn start_screen_offers_three_levels() {
    let mut harness = setup_quiz_harness(false);
    harness.rebuild();
    let html = harness.render();
    for label in ["Basic", "Standard", "Advanced"] {
        assert!(html.contains(label), "missing {label} in {html}");
    }
    assert!(!html.contains("Question 1/10"));
}

#[tokio::test(flavor = "current_thread")]
async fn starting_shows_loading_then_first_question() {
    let mut harness = setup_quiz_harness(false);
    harness.rebuild();

    harness.dispatch(QuizIntent::Start(Difficulty::Advanced));
    assert_eq!(harness.with_session(QuizSession::phase), QuizPhase::Loading);
    let html = harness.render();
    assert!(html.contains("Building your questions"), "missing loader in {html}");

    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 1/10"), "missing position in {html}");
    assert!(html.contains("Advanced"), "missing level in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
    assert!(!html.contains("Explanation"), "explanation shown early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_answer_reveals_explanation_and_retry() {
    let mut harness = setup_quiz_harness(false);
    harness.rebuild();
    harness.dispatch(QuizIntent::Start(Difficulty::Basic));
    harness.drive_async().await;

    harness.dispatch(QuizIntent::Select(option("B")));
    let html = harness.render();
    assert!(html.contains("Explanation"), "missing explanation in {html}");
    assert!(html.contains("quiz-option--wrong"), "missing wrong mark in {html}");
    assert!(html.contains("quiz-option--correct"), "missing correct mark in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");

    harness.dispatch(QuizIntent::Retry);
    let html = harness.render();
    assert!(!html.contains("Explanation"), "explanation kept after retry in {html}");

    harness.dispatch(QuizIntent::Select(option("A")));
    let html = harness.render();
    assert!(html.contains("Next"), "missing next in {html}");
    assert!(html.contains("Score: 1"), "missing score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_generation_returns_to_start() {
    let mut harness = setup_quiz_harness(true);
    harness.rebuild();
    harness.dispatch(QuizIntent::Start(Difficulty::Standard));
    harness.drive_async().await;

    assert_eq!(harness.with_session(QuizSession::phase), QuizPhase::Idle);
    let html = harness.render();
    assert!(html.contains("Basic"), "missing start screen in {html}");
    assert!(!html.contains("Building your questions"));
}

#[tokio::test(flavor = "current_thread")]
async fn perfect_run_reaches_top_summary_and_restarts() {
    let mut harness = setup_quiz_harness(false);
    harness.rebuild();
    harness.dispatch(QuizIntent::Start(Difficulty::Standard));
    harness.drive_async().await;

    for _ in 0..10 {
        harness.dispatch(QuizIntent::Select(option("A")));
        harness.dispatch(QuizIntent::Advance);
    }
    let html = harness.render();
    assert!(html.contains("Mathematical Brilliance!"), "missing tier in {html}");
    assert!(html.contains("10/10"), "missing score in {html}");
    assert!(html.contains("100%"), "missing percentage in {html}");

    harness.dispatch(QuizIntent::Restart);
    assert_eq!(harness.with_session(QuizSession::phase), QuizPhase::Idle);
}

#[tokio::test(flavor = "current_thread")]
async fn launch_level_skips_the_start_screen() {
    let mut harness = setup_launch_harness(Difficulty::Advanced);
    harness.rebuild();
    harness.drive_for(Duration::from_millis(200)).await;

    assert_eq!(harness.with_session(QuizSession::phase), QuizPhase::Active);
    assert_eq!(harness.with_session(QuizSession::level), Some(Difficulty::Advanced));
    let html = harness.render();
    assert!(html.contains("Question 1/10"), "missing first question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn first_question_is_read_out_after_the_delay() {
    let (mut harness, spoken) = setup_narrated_harness(Duration::from_millis(150));
    harness.rebuild();
    harness.dispatch(QuizIntent::Start(Difficulty::Basic));

    harness.drive_for(Duration::from_millis(20)).await;
    assert_eq!(harness.with_session(QuizSession::phase), QuizPhase::Active);
    assert!(spoken.lines().is_empty(), "narrated too early: {:?}", spoken.lines());

    harness.drive_for(Duration::from_millis(400)).await;
    assert_eq!(spoken.lines(), vec![question_text(1)]);
}

#[tokio::test(flavor = "current_thread")]
async fn moving_on_drops_the_pending_narration() {
    let (mut harness, spoken) = setup_narrated_harness(Duration::from_millis(150));
    harness.rebuild();
    harness.dispatch(QuizIntent::Start(Difficulty::Basic));
    harness.drive_for(Duration::from_millis(20)).await;

    harness.dispatch(QuizIntent::Select(option("A")));
    harness.dispatch(QuizIntent::Advance);
    harness.drive_for(Duration::from_millis(400)).await;

    let questions: Vec<String> = spoken
        .lines()
        .into_iter()
        .filter(|line| line.starts_with("Evaluate"))
        .collect();
    assert_eq!(questions, vec![question_text(2)]);
}
