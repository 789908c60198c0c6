//! The three user actions, in priority order.

use serde::Serialize;

use crate::evaluation::prompts::{ATS_MATCH_PROMPT, HR_REVIEW_PROMPT, SKILL_IMPROVEMENT_PROMPT};

/// Declaration order is priority order: when several actions are signaled
/// in one submission, the smallest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Action {
    #[serde(rename = "evaluate")]
    EvaluateResume,
    #[serde(rename = "match")]
    PercentageMatch,
    #[serde(rename = "improve")]
    ImproveSkills,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::EvaluateResume,
        Action::PercentageMatch,
        Action::ImproveSkills,
    ];

    /// Value carried by the submit button in the form.
    pub fn form_value(self) -> &'static str {
        match self {
            Action::EvaluateResume => "evaluate",
            Action::PercentageMatch => "match",
            Action::ImproveSkills => "improve",
        }
    }

    pub fn from_form_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.form_value() == value.trim())
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::EvaluateResume => "1. Evaluate Resume (HR Review)",
            Action::PercentageMatch => "2. Percentage Match (ATS Score)",
            Action::ImproveSkills => "3. How can I improve my skills?",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Action::EvaluateResume => HR_REVIEW_PROMPT,
            Action::PercentageMatch => ATS_MATCH_PROMPT,
            Action::ImproveSkills => SKILL_IMPROVEMENT_PROMPT,
        }
    }

    /// Heading the model output is displayed under.
    pub fn heading(self) -> &'static str {
        match self {
            Action::EvaluateResume => "The HR Review is:",
            Action::PercentageMatch => "ATS Percentage Match:",
            Action::ImproveSkills => "Skill Improvement Recommendations:",
        }
    }

    /// Picks the highest-priority recognized action out of the raw signals.
    /// Unknown values are ignored.
    pub fn select<'a>(signals: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        signals.into_iter().filter_map(Self::from_form_value).min()
    }
}
