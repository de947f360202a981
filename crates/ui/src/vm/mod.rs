mod quiz_vm;
mod summary_vm;

pub use quiz_vm::{
    FeedbackVm, OptionVm, QuestionVm, QuizIntent, StartChoiceVm, option_class, start_choices,
};
pub use summary_vm::{SummaryVm, tier_message};
