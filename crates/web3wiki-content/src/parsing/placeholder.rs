use std::sync::LazyLock;

use regex::Regex;

use super::kinds::Placeholder;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"{}(\d+){}",
        regex::escape(Placeholder::PREFIX),
        regex::escape(Placeholder::SUFFIX)
    );
    Regex::new(&pattern).expect("placeholder pattern is valid")
});

/// The text substituted for the quiz at `index`, blank lines included.
pub fn token(index: usize) -> String {
    format!(
        "\n\n{}{index}{}\n\n",
        Placeholder::PREFIX,
        Placeholder::SUFFIX
    )
}

/// A run of markdown or a quiz placeholder, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Markdown(&'a str),
    /// Index into the `quizzes` of the parsed document. May be dangling if the
    /// markdown was edited by hand.
    Quiz(usize),
}

/// Splits preprocessed markdown at quiz placeholders.
///
/// Empty markdown runs between adjacent placeholders are omitted. A placeholder
/// whose index does not fit in `usize` can never name a quiz and is dropped.
pub fn split_placeholders(markdown: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in TOKEN.captures_iter(markdown) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Markdown(&markdown[last..whole.start()]));
        }
        match digits.as_str().parse() {
            Ok(index) => segments.push(Segment::Quiz(index)),
            Err(e) => log::warn!("ignoring quiz placeholder {}: {e}", whole.as_str()),
        }
        last = whole.end();
    }

    if last < markdown.len() {
        segments.push(Segment::Markdown(&markdown[last..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_format() {
        assert_eq!(token(0), "\n\n---QUIZ-0---\n\n");
        assert_eq!(token(42), "\n\n---QUIZ-42---\n\n");
    }

    #[test]
    fn test_split_interleaved() {
        let md = "intro\n\n---QUIZ-0---\n\nmiddle---QUIZ-1------QUIZ-7---";
        assert_eq!(
            split_placeholders(md),
            vec![
                Segment::Markdown("intro\n\n"),
                Segment::Quiz(0),
                Segment::Markdown("\n\nmiddle"),
                Segment::Quiz(1),
                Segment::Quiz(7),
            ]
        );
    }

    #[test]
    fn test_split_without_placeholders() {
        assert_eq!(
            split_placeholders("just text"),
            vec![Segment::Markdown("just text")]
        );
        assert!(split_placeholders("").is_empty());
    }

    #[test]
    fn test_malformed_placeholders_stay_markdown() {
        let md = "---QUIZ---  ---QUIZ-x---  --QUIZ-1--";
        assert_eq!(split_placeholders(md), vec![Segment::Markdown(md)]);
    }

    #[test]
    fn test_overflowing_index_is_dropped() {
        let md = "a---QUIZ-99999999999999999999999999---b";
        assert_eq!(
            split_placeholders(md),
            vec![Segment::Markdown("a"), Segment::Markdown("b")]
        );
    }
}
