use serde::{Deserialize, Serialize};

/// One answer choice of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

/// A quiz extracted from a `[QUIZ]` block.
///
/// Always has a non-empty question and at least one option. Nothing checks
/// that exactly one option is correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub question: String,
    pub options: Vec<QuizOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Markdown with quiz blocks replaced by placeholders, plus the extracted quizzes.
///
/// Placeholder `N` in `markdown` refers to `quizzes[N]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub markdown: String,
    pub quizzes: Vec<QuizRecord>,
}

impl ParsedDocument {
    pub fn quiz(&self, index: usize) -> Option<&QuizRecord> {
        self.quizzes.get(index)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AttemptError {
    #[error("Quiz already answered with option {0}")]
    AlreadyAnswered(char),
    #[error("Option {index} out of range, quiz has {len} options")]
    OptionOutOfRange { index: usize, len: usize },
}

/// Display state of one option while a quiz is being answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    /// Not answered yet.
    Idle,
    Correct,
    /// The selected option, when it is wrong.
    Incorrect,
    Disabled,
}

impl OptionState {
    /// CSS modifier class for the option, if any.
    pub fn class(self) -> Option<&'static str> {
        match self {
            OptionState::Idle => None,
            OptionState::Correct => Some("correct"),
            OptionState::Incorrect => Some("incorrect"),
            OptionState::Disabled => Some("disabled"),
        }
    }
}

/// The reader's answer to a single quiz. The first selection is final until
/// [`QuizAttempt::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizAttempt {
    selected: Option<usize>,
}

impl QuizAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `index` as the answer and returns whether it is correct.
    pub fn select(&mut self, quiz: &QuizRecord, index: usize) -> Result<bool, AttemptError> {
        if let Some(previous) = self.selected {
            return Err(AttemptError::AlreadyAnswered(label_char(previous)));
        }
        let option = quiz
            .options
            .get(index)
            .ok_or(AttemptError::OptionOutOfRange {
                index,
                len: quiz.options.len(),
            })?;
        self.selected = Some(index);
        Ok(option.is_correct)
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// `None` until answered.
    pub fn is_correct(&self, quiz: &QuizRecord) -> Option<bool> {
        self.selected
            .map(|i| quiz.options.get(i).is_some_and(|option| option.is_correct))
    }

    pub fn option_state(&self, quiz: &QuizRecord, index: usize) -> OptionState {
        let Some(selected) = self.selected else {
            return OptionState::Idle;
        };
        match quiz.options.get(index) {
            Some(option) if option.is_correct => OptionState::Correct,
            _ if index == selected => OptionState::Incorrect,
            _ => OptionState::Disabled,
        }
    }
}

/// Display label of the option at `index`: `A`, `B`, ... by position, not by
/// the letter written in the source. `None` past `Z`.
pub fn option_label(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
}

/// Parses a label such as `b` or `B)` back to an option index.
pub fn option_index(label: &str) -> Option<usize> {
    let label = label.trim();
    let label = label.strip_suffix(')').unwrap_or(label);
    match label.as_bytes() {
        [c] if c.is_ascii_alphabetic() => Some(usize::from(c.to_ascii_uppercase() - b'A')),
        _ => None,
    }
}

fn label_char(index: usize) -> char {
    option_label(index).unwrap_or('?')
}
