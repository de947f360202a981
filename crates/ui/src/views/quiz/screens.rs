use dioxus::prelude::*;

use crate::vm::{QuizIntent, SummaryVm, start_choices};

#[component]
pub(super) fn StartScreen(on_intent: EventHandler<QuizIntent>) -> Element {
    let choices = start_choices();
    rsx! {
        section { class: "card start",
            h1 { class: "start__title", "Calculus Quiz" }
            p { class: "start__subtitle", "Ten fresh questions on antiderivatives and integrals." }
            div { class: "start__levels",
                for choice in choices {
                    button {
                        key: "{choice.level}",
                        class: "{choice.class}",
                        id: "level-{choice.level.level()}",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Start(choice.level)),
                        span { class: "level-choice__label", "{choice.label}" }
                        span { class: "level-choice__tagline", "{choice.tagline}" }
                    }
                }
            }
        }
    }
}

#[component]
pub(super) fn LoadingScreen() -> Element {
    rsx! {
        section { class: "card loading", role: "status",
            div { class: "loading__spinner" }
            h2 { class: "loading__title", "Building your questions..." }
        }
    }
}

#[component]
pub(super) fn SummaryScreen(vm: SummaryVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "card {vm.tier_class}",
            h2 { class: "summary__message", "{vm.message}" }
            div { class: "summary__stats",
                div { class: "summary__stat",
                    span { class: "summary__value", "{vm.score}/{vm.total}" }
                    span { class: "summary__caption", "Correct" }
                }
                div { class: "summary__stat",
                    span { class: "summary__value", "{vm.percentage}%" }
                    span { class: "summary__caption", "Score" }
                }
            }
            if let Some(elapsed) = vm.elapsed.clone() {
                p { class: "summary__time", "Finished in {elapsed}" }
            }
            button {
                class: "btn btn-primary",
                id: "quiz-restart",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Restart),
                "Play again"
            }
        }
    }
}
