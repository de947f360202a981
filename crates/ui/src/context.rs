use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use quiz_core::model::Difficulty;
use services::{AUTO_NARRATION_DELAY, FeedbackEffects, NarrationSchedule, Narrator, QuizLoopService};

pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn effects(&self) -> FeedbackEffects;

    /// Whether math should be typeset after each render.
    fn typeset_math(&self) -> bool {
        true
    }

    /// Level to start right away instead of showing the start screen.
    fn start_level(&self) -> Option<Difficulty> {
        None
    }

    fn narration_delay(&self) -> Duration {
        AUTO_NARRATION_DELAY
    }
}

#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    effects: FeedbackEffects,
    narration: NarrationSchedule,
    typeset_math: bool,
    start_level: Option<Difficulty>,
    start_level_once: Arc<AtomicBool>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let start_level = app.start_level();
        Self {
            quiz_loop: app.quiz_loop(),
            effects: app.effects(),
            narration: NarrationSchedule::new(app.narration_delay()),
            typeset_math: app.typeset_math(),
            start_level,
            start_level_once: Arc::new(AtomicBool::new(start_level.is_some())),
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn effects(&self) -> FeedbackEffects {
        self.effects.clone()
    }

    #[must_use]
    pub fn narrator(&self) -> Narrator {
        self.effects.narrator().clone()
    }

    /// Pending auto-narration shared by every view of this window.
    #[must_use]
    pub fn narration(&self) -> NarrationSchedule {
        self.narration.clone()
    }

    #[must_use]
    pub fn typeset_math(&self) -> bool {
        self.typeset_math
    }

    /// The launch level, handed out once per window.
    #[must_use]
    pub fn take_start_level(&self) -> Option<Difficulty> {
        if self.start_level_once.swap(false, Ordering::AcqRel) {
            self.start_level
        } else {
            None
        }
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
