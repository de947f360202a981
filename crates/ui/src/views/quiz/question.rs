use dioxus::prelude::*;

use crate::vm::{FeedbackVm, OptionVm, QuestionVm, QuizIntent};

#[component]
pub(super) fn QuestionScreen(
    vm: QuestionVm,
    speaking: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let replay_class = if speaking {
        "quiz-replay quiz-replay--speaking"
    } else {
        "quiz-replay"
    };

    rsx! {
        section { class: "card quiz-card",
            header { class: "quiz-header",
                span { class: "quiz-header__level", "{vm.level_label}" }
                span { class: "quiz-header__timer", id: "quiz-timer", "{vm.timer_label}" }
                span { class: "quiz-header__score", "Score: {vm.score}" }
                span { class: "quiz-header__position", "{vm.position_label}" }
            }
            div { class: "quiz-body",
                div { class: "quiz-prompt",
                    h3 { class: "quiz-prompt__text math", "{vm.text}" }
                    button {
                        class: "{replay_class}",
                        id: "quiz-replay",
                        r#type: "button",
                        title: "Read the question aloud",
                        disabled: speaking,
                        onclick: move |_| on_intent.call(QuizIntent::Replay),
                        "🔊"
                    }
                }
                div { class: "quiz-options",
                    for option in vm.options.iter().cloned() {
                        OptionButton { key: "{option.id}", option, on_intent }
                    }
                }
                if let Some(feedback) = vm.feedback.clone() {
                    Feedback { feedback, on_intent }
                }
            }
            div { class: "quiz-progress",
                div { class: "quiz-progress__bar", style: "width: {vm.progress_percent}%" }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let id = option.id.clone();
    rsx! {
        button {
            class: "{option.class}",
            id: "quiz-option-{option.id}",
            r#type: "button",
            disabled: option.disabled,
            onclick: move |_| on_intent.call(QuizIntent::Select(id.clone())),
            span { class: "quiz-option__label", "{option.id}" }
            span { class: "quiz-option__text math", "{option.text}" }
        }
    }
}

#[component]
fn Feedback(feedback: FeedbackVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let panel_class = if feedback.correct {
        "quiz-feedback quiz-feedback--correct"
    } else {
        "quiz-feedback quiz-feedback--wrong"
    };
    let action = feedback.action;
    rsx! {
        div { class: "{panel_class}",
            h4 { class: "quiz-feedback__title", "Explanation" }
            div { class: "quiz-feedback__text math", "{feedback.explanation}" }
        }
        button {
            class: "btn btn-primary quiz-action",
            id: "quiz-action",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::from_action(action)),
            "{feedback.action_label}"
        }
    }
}
