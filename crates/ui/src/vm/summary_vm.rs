use quiz_core::model::{QuizSummary, ScoreTier};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub message: &'static str,
    pub tier_class: &'static str,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    /// Whole-quiz time as `m:ss`, when known.
    pub elapsed: Option<String>,
}

#[must_use]
pub fn tier_message(tier: ScoreTier) -> &'static str {
    match tier {
        ScoreTier::Top => "Mathematical Brilliance!",
        ScoreTier::Mid => "Very Well Done!",
        ScoreTier::Base => "Keep Practising!",
    }
}

impl From<&QuizSummary> for SummaryVm {
    fn from(summary: &QuizSummary) -> Self {
        let tier = summary.tier();
        Self {
            message: tier_message(tier),
            tier_class: match tier {
                ScoreTier::Top => "summary summary--top",
                ScoreTier::Mid => "summary summary--mid",
                ScoreTier::Base => "summary summary--base",
            },
            score: summary.score(),
            total: summary.total(),
            percentage: summary.percentage(),
            elapsed: None,
        }
    }
}

impl SummaryVm {
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Option<String>) -> Self {
        self.elapsed = elapsed;
        self
    }
}
