pub mod glossary;
pub mod language;
pub mod quiz;

pub use glossary::{Difficulty, GlossaryData, GlossaryFilter, GlossaryTerm, LetterGroup};
pub use language::{Language, LanguageError};
pub use quiz::{AttemptError, OptionState, ParsedDocument, QuizAttempt, QuizOption, QuizRecord};
