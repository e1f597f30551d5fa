pub mod io;
pub mod models;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use io::*;
pub use models::{glossary::*, language::*, quiz::*};
pub use parsing::{
    Segment, TooltipSpan, find_tooltips, parse_quizzes, render_tooltips, split_placeholders,
    strip_tooltips,
};
pub use render::{QuizLabels, render_article, render_definition, render_markdown, render_quiz};
