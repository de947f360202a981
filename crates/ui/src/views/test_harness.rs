use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{AnswerOptionDraft, Batch, Difficulty, OptionId, QuestionDraft, QuestionId};
use quiz_core::time::fixed_now;
use services::{
    AUTO_NARRATION_DELAY, AudioClip, AudioOutput, Clock, ContentProvider, FeedbackEffects,
    GenerationError, NarrationError, Narrator, QuizLoopService, QuizSession, SilentOutput,
    SpeechSynthesizer,
};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;
use crate::vm::QuizIntent;

/// Serves the same ten questions every time, or fails on demand.
pub struct FixedProvider {
    fail: bool,
}

#[async_trait]
impl ContentProvider for FixedProvider {
    async fn generate_batch(
        &self,
        _level: Difficulty,
        _uniqueness_token: &str,
    ) -> Result<Batch, GenerationError> {
        if self.fail {
            return Err(GenerationError::Disabled);
        }
        let drafts = (1..=10)
            .map(|n| QuestionDraft {
                id: QuestionId::new(n),
                text: question_text(n),
                options: [("A", n * n), ("B", n), ("C", 2 * n), ("D", 0)]
                    .into_iter()
                    .map(|(label, value)| AnswerOptionDraft {
                        id: OptionId::parse(label).expect("valid label"),
                        text: format!("${value}$"),
                    })
                    .collect(),
                correct_option_id: OptionId::parse("A").expect("valid label"),
                explanation: format!("The antiderivative is $x^2$, so the value is {}.", n * n),
            })
            .collect();
        Ok(Batch::from_drafts(drafts)?)
    }
}

/// Prompt of the `n`th (1-based) question served by `FixedProvider`.
pub fn question_text(n: u32) -> String {
    format!("Evaluate $\\int_0^{n} 2x\\,dx$")
}

/// Everything handed to the speech synthesizer, in order.
#[derive(Clone, Default)]
pub struct SpokenLog(Arc<Mutex<Vec<String>>>);

impl SpokenLog {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

struct RecordingSynth {
    log: SpokenLog,
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynth {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, NarrationError> {
        self.log.0.lock().unwrap().push(text.to_string());
        Ok(AudioClip::new(vec![0.0; 240], 24_000))
    }
}

struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
    effects: FeedbackEffects,
    start_level: Option<Difficulty>,
    narration_delay: Duration,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn effects(&self) -> FeedbackEffects {
        self.effects.clone()
    }

    fn typeset_math(&self) -> bool {
        false
    }

    fn start_level(&self) -> Option<Difficulty> {
        self.start_level
    }

    fn narration_delay(&self) -> Duration {
        self.narration_delay
    }
}

#[derive(Props, Clone)]
struct QuizHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for QuizHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarness(props: QuizHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    /// Keep polling spawned work, timers included, for `total` wall time.
    pub async fn drive_for(&mut self, total: Duration) {
        let deadline = tokio::time::Instant::now() + total;
        while tokio::time::Instant::now() < deadline {
            let _ = tokio::time::timeout_at(deadline, self.dom.wait_for_work()).await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    /// Run an intent the way a click would.
    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn with_session<T>(&self, f: impl FnOnce(&QuizSession) -> T) -> T {
        let session = self.handles.session();
        self.dom.in_runtime(|| f(&session.peek()))
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn build_harness(
    fail_generation: bool,
    narrator: Option<Arc<dyn SpeechSynthesizer>>,
    start_level: Option<Difficulty>,
    narration_delay: Duration,
) -> ViewHarness {
    let provider = Arc::new(FixedProvider {
        fail: fail_generation,
    });
    let quiz_loop =
        Arc::new(QuizLoopService::new(provider).with_clock(Clock::fixed(fixed_now())));
    let output: Arc<dyn AudioOutput> = Arc::new(SilentOutput);
    let narrator = match narrator {
        Some(synth) => Narrator::new(synth, Arc::clone(&output)),
        None => Narrator::disabled(Arc::clone(&output)),
    };
    let effects = FeedbackEffects::narration_only(narrator, output);

    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizHarness,
        QuizHarnessProps {
            app: Arc::new(TestApp {
                quiz_loop,
                effects,
                start_level,
                narration_delay,
            }),
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, handles }
}

pub fn setup_quiz_harness(fail_generation: bool) -> ViewHarness {
    build_harness(fail_generation, None, None, AUTO_NARRATION_DELAY)
}

/// Harness that skips the start screen and begins at `level`.
pub fn setup_launch_harness(level: Difficulty) -> ViewHarness {
    build_harness(false, None, Some(level), AUTO_NARRATION_DELAY)
}

/// Harness whose narrator records what it is asked to say.
pub fn setup_narrated_harness(narration_delay: Duration) -> (ViewHarness, SpokenLog) {
    let log = SpokenLog::default();
    let synth: Arc<dyn SpeechSynthesizer> = Arc::new(RecordingSynth { log: log.clone() });
    let harness = build_harness(false, Some(synth), None, narration_delay);
    (harness, log)
}
