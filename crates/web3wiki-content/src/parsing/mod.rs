//! # Content Preprocessing
//!
//! Pure text transforms applied to article and glossary content before it is
//! handed to the markdown renderer.
//!
//! ## Modules
//!
//! - **`kinds`**: Delimiter constants for quiz blocks, tooltips and placeholders
//! - **`quiz`**: `parse_quizzes()` extracts `[QUIZ]...[/QUIZ]` blocks into records
//! - **`placeholder`**: Placeholder tokens left behind by the quiz parser, and
//!   `split_placeholders()` for renderers that substitute them back
//! - **`tooltip`**: `render_tooltips()` / `strip_tooltips()` for `[?-term-]{text}`
//!
//! Nothing here fails: malformed syntax is left in place as ordinary text.

pub mod kinds;
pub mod placeholder;
pub mod quiz;
pub mod tooltip;

pub use placeholder::{Segment, split_placeholders};
pub use quiz::{parse_quiz_block, parse_quizzes};
pub use tooltip::{TooltipSpan, escape_markup, find_tooltips, render_tooltips, strip_tooltips};
