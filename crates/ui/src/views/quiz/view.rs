use std::time::Duration;

use dioxus::prelude::*;
use quiz_core::time::format_elapsed;
use tracing::debug;

use services::{NarrationSchedule, Narrator, QuizLoopService, QuizPhase, QuizSession};

use super::question::QuestionScreen;
use super::screens::{LoadingScreen, StartScreen, SummaryScreen};
use crate::context::AppContext;
use crate::platform::{focus_element, typeset_math};
use crate::vm::{QuestionVm, QuizIntent, SummaryVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const ROOT_ID: &str = "quiz-root";

/// Arm auto-narration for whatever question is now current, superseding any
/// earlier pending one.
fn schedule_narration(
    schedule: &NarrationSchedule,
    narrator: &Narrator,
    session: &QuizSession,
    mut refresh: Signal<u64>,
) {
    let Some(question) = session.current_question() else {
        schedule.cancel();
        return;
    };
    let text = question.text().to_string();
    let pending = schedule.schedule(session.current_index());
    debug!(index = pending.index(), "auto narration armed");
    let narrator = narrator.clone();
    spawn(async move {
        if pending.ready().await.is_some() {
            narrator.speak(&text).await;
            refresh += 1;
        }
    });
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let launch = ctx.clone();
    let quiz_loop = ctx.quiz_loop();
    let effects = ctx.effects();
    let narrator = ctx.narrator();
    let schedule = ctx.narration();
    let typeset = ctx.typeset_math();

    let session = use_signal({
        let quiz_loop = quiz_loop.clone();
        move || quiz_loop.new_session()
    });
    // Bumped once a second for the header timer and after narration ends.
    let tick = use_signal(|| 0_u64);

    use_future(move || async move {
        let mut tick = tick;
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if session.peek().phase() == QuizPhase::Active {
                tick += 1;
            }
        }
    });

    use_effect(move || {
        let (phase, _index, _answered) = {
            let guard = session.read();
            (guard.phase(), guard.current_index(), guard.answer().is_answered())
        };
        if phase != QuizPhase::Active {
            return;
        }
        focus_element(ROOT_ID);
        if typeset {
            spawn(async move {
                typeset_math().await;
            });
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut session = session;
        let mut tick = tick;
        match intent {
            QuizIntent::Start(level) => {
                if let Err(err) = session.write().start(level) {
                    debug!(error = %err, "start ignored");
                    return;
                }
                let quiz_loop = quiz_loop.clone();
                let narrator = narrator.clone();
                let schedule = schedule.clone();
                spawn(async move {
                    let result = quiz_loop.fetch_batch(level).await;
                    let applied = QuizLoopService::apply_batch(&mut session.write(), result);
                    match applied {
                        Ok(QuizPhase::Active) => {
                            schedule_narration(&schedule, &narrator, &session.read(), tick);
                        }
                        Ok(_) => {}
                        Err(err) => debug!(error = %err, "stale batch discarded"),
                    }
                });
            }
            QuizIntent::Select(option) => {
                let outcome = session.write().select_option(&option);
                match outcome {
                    Ok(outcome) => {
                        let effects = effects.clone();
                        spawn(async move {
                            effects.on_answer(outcome).await;
                            tick += 1;
                        });
                    }
                    Err(err) => debug!(error = %err, "selection ignored"),
                }
            }
            QuizIntent::Retry => {
                if let Err(err) = session.write().retry() {
                    debug!(error = %err, "retry ignored");
                }
            }
            QuizIntent::Advance => {
                let result = session.write().advance();
                match result {
                    Ok(QuizPhase::Active) => {
                        schedule_narration(&schedule, &narrator, &session.read(), tick);
                    }
                    Ok(_) => schedule.cancel(),
                    Err(err) => debug!(error = %err, "advance ignored"),
                }
            }
            QuizIntent::Replay => {
                let text = session
                    .read()
                    .current_question()
                    .map(|question| question.text().to_string());
                if let Some(text) = text {
                    let narrator = narrator.clone();
                    spawn(async move {
                        narrator.speak(&text).await;
                        tick += 1;
                    });
                }
            }
            QuizIntent::Restart => {
                schedule.cancel();
                if let Err(err) = session.write().restart() {
                    debug!(error = %err, "restart ignored");
                }
            }
        }
    });

    use_effect(move || {
        if let Some(level) = launch.take_start_level() {
            dispatch.call(QuizIntent::Start(level));
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, session);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let vm = QuestionVm::from_session(&session.read());
        let Some(vm) = vm else {
            return;
        };
        match evt.data.key() {
            Key::Enter => {
                if let Some(feedback) = vm.feedback.as_ref() {
                    evt.prevent_default();
                    dispatch.call(QuizIntent::from_action(feedback.action));
                }
            }
            Key::Character(value) => {
                if value.eq_ignore_ascii_case("r") {
                    evt.prevent_default();
                    dispatch.call(QuizIntent::Replay);
                    return;
                }
                if vm.feedback.is_some() {
                    return;
                }
                if let Some(option) = vm.option_for_key(&value) {
                    evt.prevent_default();
                    dispatch.call(QuizIntent::Select(option));
                }
            }
            _ => {}
        }
    });

    let phase = session.read().phase();
    if phase == QuizPhase::Active {
        // Subscribe so the timer label refreshes.
        let _ = tick();
    }
    let speaking = ctx.narrator().is_speaking();
    let question = QuestionVm::from_session(&session.read());
    let summary = {
        let session = session.read();
        session.summary().map(|summary| {
            SummaryVm::from(&summary).with_elapsed(session.elapsed().map(format_elapsed))
        })
    };

    rsx! {
        main { class: "quiz", id: ROOT_ID, tabindex: "0", onkeydown: on_key,
            match phase {
                QuizPhase::Idle => rsx! {
                    StartScreen { on_intent: dispatch }
                },
                QuizPhase::Loading => rsx! {
                    LoadingScreen {}
                },
                QuizPhase::Active => rsx! {
                    if let Some(vm) = question {
                        QuestionScreen { vm, speaking, on_intent: dispatch }
                    }
                },
                QuizPhase::Finished => rsx! {
                    if let Some(vm) = summary {
                        SummaryScreen { vm, on_intent: dispatch }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    session: Rc<RefCell<Option<Signal<QuizSession>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, session: Signal<QuizSession>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<QuizSession> {
        (*self.session.borrow()).expect("quiz session registered")
    }
}
