use dioxus::prelude::*;

use crate::views::QuizView;

const MATHJAX_CONFIG: &str = r"window.MathJax = {
    tex: { inlineMath: [['$', '$'], ['\\(', '\\)']] },
    svg: { fontCache: 'global' },
    startup: { typeset: false }
};";
const MATHJAX_SRC: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js";
const CONFETTI_SRC: &str = "https://cdn.jsdelivr.net/npm/canvas-confetti@1.9.3/dist/confetti.browser.min.js";

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Calculus Quiz" }

        // Both engines are optional; every call into them is guarded.
        document::Script { "{MATHJAX_CONFIG}" }
        document::Script { src: MATHJAX_SRC }
        document::Script { src: CONFETTI_SRC }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizView {}
            }
        }
    }
}
