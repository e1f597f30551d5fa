//! Delimiter constants for the content micro-syntaxes.
//!
//! Parsers and renderers reference these instead of hardcoding `[QUIZ]` or `[?-`.

/// A quiz block:
///
/// ```text
/// [QUIZ]
/// Q: Question text?
/// A) Option 1 *
/// B) Option 2
/// Explanation: Optional explanation text
/// [/QUIZ]
/// ```
pub struct QuizBlock;

impl QuizBlock {
    pub const OPEN: &'static str = "[QUIZ]";
    pub const CLOSE: &'static str = "[/QUIZ]";
    pub const QUESTION: &'static str = "Q:";
    pub const EXPLANATION: &'static str = "Explanation:";
    /// Option label terminator, as in `A)`.
    pub const LABEL_END: u8 = b')';
    /// Trailing marker flagging the correct option.
    pub const CORRECT: char = '*';
}

/// Inline tooltip: `[?-display text-]{tooltip content}`.
pub struct Tooltip;

impl Tooltip {
    pub const OPEN: &'static str = "[?-";
    pub const SEPARATOR: &'static str = "-]{";
    pub const CLOSE: &'static str = "}";
    pub const CLASS: &'static str = "term-tooltip";
}

/// Marker left in markdown where a quiz block was extracted: `---QUIZ-3---`.
pub struct Placeholder;

impl Placeholder {
    pub const PREFIX: &'static str = "---QUIZ-";
    pub const SUFFIX: &'static str = "---";
}
