use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::Difficulty;
use services::{
    AudioOutput, FeedbackEffects, GeminiClient, GeminiContentProvider, GeminiSpeechSynthesizer,
    Narrator, QuizLoopService,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use ui::{App, UiApp, WebAudioOutput, WebParticles, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLevel { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLevel { raw } => write!(f, "invalid --level value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
    effects: FeedbackEffects,
    start_level: Option<Difficulty>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn effects(&self) -> FeedbackEffects {
        self.effects.clone()
    }

    fn start_level(&self) -> Option<Difficulty> {
        self.start_level
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Args {
    narration: bool,
    effects: bool,
    level: Option<Difficulty>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            narration: !env_flag_off("QUIZ_NARRATION"),
            effects: true,
            level: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--no-narration" => parsed.narration = false,
                "--no-effects" => parsed.effects = false,
                "--level" => {
                    let value = require_value(&mut args, "--level")?;
                    let level = value
                        .parse::<Difficulty>()
                        .map_err(|_| ArgsError::InvalidLevel { raw: value.clone() })?;
                    parsed.level = Some(level);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn env_flag_off(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "0" | "off" | "false" | "no"
        )
    })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--level <1|2|3|basic|standard|advanced>]");
    eprintln!("                      [--no-narration] [--no-effects]");
    eprintln!();
    eprintln!("  --level starts a quiz at that level instead of showing the start screen.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_AI_API_KEY (or GEMINI_API_KEY)  required for question generation and speech");
    eprintln!("  QUIZ_AI_BASE_URL, QUIZ_AI_MODEL, QUIZ_TTS_MODEL, QUIZ_TTS_VOICE");
    eprintln!("  QUIZ_NARRATION=off                   same as --no-narration");
    eprintln!("  QUIZ_LOG (or RUST_LOG)               tracing filter, default \"info\"");
}

fn init_tracing() {
    let filter = std::env::var("QUIZ_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let client = GeminiClient::from_env();
    if !client.enabled() {
        warn!("no API key configured; question generation and narration are disabled");
    }

    let quiz_loop = Arc::new(QuizLoopService::new(Arc::new(GeminiContentProvider::new(
        client.clone(),
    ))));

    let output: Arc<dyn AudioOutput> = Arc::new(WebAudioOutput);
    let narrator = if args.narration && client.enabled() {
        Narrator::new(
            Arc::new(GeminiSpeechSynthesizer::new(client)),
            Arc::clone(&output),
        )
    } else {
        Narrator::disabled(Arc::clone(&output))
    };
    let effects = if args.effects {
        FeedbackEffects::new(narrator, output, Some(Arc::new(WebParticles)))
    } else {
        FeedbackEffects::narration_only(narrator, output)
    };

    info!(
        narration = effects.narrator().enabled(),
        effects = args.effects,
        level = ?args.level,
        "starting calculus quiz"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_loop,
        effects,
        start_level: args.level,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Calculus Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
