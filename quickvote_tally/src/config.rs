// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A single vote, as stored by the backend for one question.
///
/// `value` is the label of the chosen option. For agree/disagree questions
/// this is one of the lowercase values `agree`, `sometimes` or `disagree`.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Vote {
    pub value: String,
    pub team_id: Option<String>,
    pub participant_id: String,
}

impl Vote {
    /// A vote that does not belong to any team.
    pub fn new(value: &str, participant_id: &str) -> Vote {
        Vote {
            value: value.to_string(),
            team_id: None,
            participant_id: participant_id.to_string(),
        }
    }

    pub fn with_team(value: &str, team_id: &str, participant_id: &str) -> Vote {
        Vote {
            value: value.to_string(),
            team_id: Some(team_id.to_string()),
            participant_id: participant_id.to_string(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum QuestionType {
    AgreeDisagree,
    MultipleChoice,
}

impl QuestionType {
    /// Parses the name used by the backend (`agree_disagree`, `multiple_choice`).
    pub fn from_name(name: &str) -> Option<QuestionType> {
        match name {
            "agree_disagree" => Some(QuestionType::AgreeDisagree),
            "multiple_choice" => Some(QuestionType::MultipleChoice),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuestionType::AgreeDisagree => "agree_disagree",
            QuestionType::MultipleChoice => "multiple_choice",
        }
    }
}

/// The parts of a question that matter for displaying its results.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    pub question_type: QuestionType,
    /// The options as authored, in authoring order. Only meaningful for
    /// multiple choice questions.
    pub options: Option<Vec<String>>,
}

impl Question {
    pub fn agree_disagree() -> Question {
        Question {
            question_type: QuestionType::AgreeDisagree,
            options: None,
        }
    }

    pub fn multiple_choice(options: Option<Vec<String>>) -> Question {
        Question {
            question_type: QuestionType::MultipleChoice,
            options,
        }
    }
}

// ******** Output data structures *********

/// One row of aggregated results.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct VoteCount {
    pub value: String,
    pub count: u64,
    /// Rounded share of the total, between 0 and 100.
    pub percentage: u32,
}

/// Which text color stays readable on top of a given background.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TextColor {
    Light,
    Dark,
}

impl TextColor {
    pub fn name(&self) -> &'static str {
        match self {
            TextColor::Light => "light",
            TextColor::Dark => "dark",
        }
    }
}

/// Errors from the color utilities.
///
/// Aggregation and ordering never fail, so this is the only error type of the
/// library.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ColorError {
    /// The string is not a `#rrggbb` (or `rrggbb`) color.
    InvalidColorFormat(String),
}

impl Error for ColorError {}

impl Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::InvalidColorFormat(s) => write!(f, "Invalid color format: {:?}", s),
        }
    }
}
