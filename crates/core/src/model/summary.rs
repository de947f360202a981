use serde::{Deserialize, Serialize};

/// Coarse grade shown on the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreTier {
    /// 90% and above.
    Top,
    /// 70% up to 90%.
    Mid,
    /// Below 70%.
    Base,
}

impl ScoreTier {
    #[must_use]
    pub const fn from_percentage(percentage: u32) -> Self {
        if percentage >= 90 {
            Self::Top
        } else if percentage >= 70 {
            Self::Mid
        } else {
            Self::Base
        }
    }
}

/// Final result of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    score: u32,
    total: u32,
    percentage: u32,
    tier: ScoreTier,
}

impl QuizSummary {
    /// Build a summary from a raw score.
    ///
    /// Percentage is `round(100 * score / total)`, rounding halves up; an
    /// empty quiz reports 0%.
    #[must_use]
    pub fn new(score: u32, total: u32) -> Self {
        let percentage = percentage(score, total);
        Self {
            score,
            total,
            percentage,
            tier: ScoreTier::from_percentage(percentage),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn tier(&self) -> ScoreTier {
        self.tier
    }
}

fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score);
    let total = u64::from(total);
    let rounded = (score * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        let top = QuizSummary::new(9, 10);
        assert_eq!(top.percentage(), 90);
        assert_eq!(top.tier(), ScoreTier::Top);

        let mid = QuizSummary::new(7, 10);
        assert_eq!(mid.percentage(), 70);
        assert_eq!(mid.tier(), ScoreTier::Mid);

        let base = QuizSummary::new(6, 10);
        assert_eq!(base.percentage(), 60);
        assert_eq!(base.tier(), ScoreTier::Base);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(QuizSummary::new(1, 3).percentage(), 33);
        assert_eq!(QuizSummary::new(2, 3).percentage(), 67);
        assert_eq!(QuizSummary::new(1, 8).percentage(), 13);
        assert_eq!(QuizSummary::new(10, 10).percentage(), 100);
    }

    #[test]
    fn empty_quiz_reports_zero() {
        let summary = QuizSummary::new(0, 0);
        assert_eq!(summary.percentage(), 0);
        assert_eq!(summary.tier(), ScoreTier::Base);
    }
}
