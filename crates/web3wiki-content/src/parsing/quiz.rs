use std::sync::LazyLock;

use regex::Regex;

use super::{kinds::QuizBlock, placeholder};
use crate::models::quiz::{ParsedDocument, QuizOption, QuizRecord};

static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?s){}(.*?){}",
        regex::escape(QuizBlock::OPEN),
        regex::escape(QuizBlock::CLOSE)
    );
    Regex::new(&pattern).expect("quiz block pattern is valid")
});

/// Extracts every well-formed quiz block from `markdown`.
///
/// Each block that yields a [`QuizRecord`] is replaced by the placeholder for
/// its index in the returned `quizzes`. Blocks without a question or without
/// options are left in the markdown untouched and get no index.
pub fn parse_quizzes(markdown: &str) -> ParsedDocument {
    let mut quizzes = Vec::new();
    let mut out = String::with_capacity(markdown.len());
    let mut copied_to = 0;

    for caps in BLOCK.captures_iter(markdown) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        match parse_quiz_block(inner.as_str()) {
            Some(quiz) => {
                out.push_str(&markdown[copied_to..whole.start()]);
                out.push_str(&placeholder::token(quizzes.len()));
                copied_to = whole.end();
                quizzes.push(quiz);
            }
            None => log::debug!(
                "leaving malformed quiz block at byte {} in place",
                whole.start()
            ),
        }
    }

    out.push_str(&markdown[copied_to..]);
    ParsedDocument {
        markdown: out,
        quizzes,
    }
}

/// Parses the interior of one quiz block (the text between the delimiters).
///
/// Returns `None` unless a non-empty question and at least one option are found.
pub fn parse_quiz_block(content: &str) -> Option<QuizRecord> {
    let mut question = "";
    let mut options = Vec::new();
    let mut explanation = "";

    let lines = content
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty());

    for line in lines {
        if let Some(rest) = line.strip_prefix(QuizBlock::QUESTION) {
            question = rest.trim();
        } else if let Some(rest) = option_body(line) {
            options.push(parse_option(rest));
        } else if let Some(rest) = line.strip_prefix(QuizBlock::EXPLANATION) {
            explanation = rest.trim();
        }
    }

    if question.is_empty() || options.is_empty() {
        return None;
    }

    Some(QuizRecord {
        question: question.to_string(),
        options,
        explanation: (!explanation.is_empty()).then(|| explanation.to_string()),
    })
}

/// Returns the text after an `X)` label, where `X` is one uppercase ASCII letter.
fn option_body(line: &str) -> Option<&str> {
    match line.as_bytes() {
        [label, QuizBlock::LABEL_END, ..] if label.is_ascii_uppercase() => Some(&line[2..]),
        _ => None,
    }
}

fn parse_option(body: &str) -> QuizOption {
    let body = body.trim();
    match body.strip_suffix(QuizBlock::CORRECT) {
        Some(text) => QuizOption {
            text: text.trim().to_string(),
            is_correct: true,
        },
        None => QuizOption {
            text: body.to_string(),
            is_correct: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const CAPITAL_QUIZ: &str = "[QUIZ]\nQ: Capital of France?\nA) Paris *\nB) London\nExplanation: Paris has been the capital since 987.\n[/QUIZ]";

    fn option(text: &str, is_correct: bool) -> QuizOption {
        QuizOption {
            text: text.to_string(),
            is_correct,
        }
    }

    #[test]
    fn test_single_block_becomes_placeholder() {
        let markdown = format!("# Intro\n\n{CAPITAL_QUIZ}\n\nOutro");
        let parsed = parse_quizzes(&markdown);

        assert_eq!(parsed.markdown, "# Intro\n\n\n\n---QUIZ-0---\n\n\n\nOutro");
        assert_eq!(parsed.quizzes.len(), 1);
        assert_eq!(parsed.quizzes[0].question, "Capital of France?");
        assert_eq!(
            parsed.quizzes[0].options,
            vec![option("Paris", true), option("London", false)]
        );
        assert_eq!(
            parsed.quizzes[0].explanation.as_deref(),
            Some("Paris has been the capital since 987.")
        );
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_quizzes("");
        assert_eq!(parsed.markdown, "");
        assert!(parsed.quizzes.is_empty());
    }

    #[rstest]
    #[case("Plain paragraph with no quiz.")]
    #[case("Mentions [QUIZ] without ever closing it")]
    #[case("A stray [/QUIZ] closing tag")]
    #[case("```\ncode\n```\n\n- list")]
    fn test_documents_without_blocks_are_unchanged(#[case] markdown: &str) {
        let parsed = parse_quizzes(markdown);
        assert_eq!(parsed.markdown, markdown);
        assert!(parsed.quizzes.is_empty());
    }

    #[test]
    fn test_block_without_options_stays_verbatim() {
        let markdown = "Before\n[QUIZ]\nQ: Lonely question?\n[/QUIZ]\nAfter";
        let parsed = parse_quizzes(markdown);

        assert_eq!(parsed.markdown, markdown);
        assert!(parsed.quizzes.is_empty());
    }

    #[test]
    fn test_block_without_question_stays_verbatim() {
        let markdown = "[QUIZ]\nA) Orphan option *\n[/QUIZ]";
        let parsed = parse_quizzes(markdown);

        assert_eq!(parsed.markdown, markdown);
        assert!(parsed.quizzes.is_empty());
    }

    #[test]
    fn test_indices_skip_dropped_blocks() {
        let markdown = "[QUIZ]\nQ: One?\nA) yes *\n[/QUIZ]\n\
                        [QUIZ]\nQ: Broken?\n[/QUIZ]\n\
                        [QUIZ]\nQ: Two?\nA) yes *\n[/QUIZ]\n\
                        [QUIZ]\nQ: Three?\nA) yes *\n[/QUIZ]";
        let parsed = parse_quizzes(markdown);

        let questions: Vec<_> = parsed.quizzes.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(questions, vec!["One?", "Two?", "Three?"]);
        assert_eq!(
            parsed.markdown,
            "\n\n---QUIZ-0---\n\n\n\
             [QUIZ]\nQ: Broken?\n[/QUIZ]\n\
             \n\n---QUIZ-1---\n\n\n\
             \n\n---QUIZ-2---\n\n"
        );
    }

    #[test]
    fn test_identical_blocks_get_distinct_indices() {
        let markdown = format!("{CAPITAL_QUIZ}\n{CAPITAL_QUIZ}");
        let parsed = parse_quizzes(&markdown);

        assert_eq!(parsed.quizzes.len(), 2);
        assert_eq!(parsed.quizzes[0], parsed.quizzes[1]);
        assert_eq!(
            parsed.markdown,
            "\n\n---QUIZ-0---\n\n\n\n\n---QUIZ-1---\n\n"
        );
    }

    #[test]
    fn test_block_on_one_line() {
        let parsed = parse_quizzes("[QUIZ]Q: Inline? [/QUIZ]");
        assert!(parsed.quizzes.is_empty());
    }

    #[rstest]
    #[case("A) Paris *", option("Paris", true))]
    #[case("B) London", option("London", false))]
    #[case("C)Berlin*", option("Berlin", true))]
    #[case("D)   Madrid   ", option("Madrid", false))]
    #[case("E) 2 * 3", option("2 * 3", false))]
    #[case("F) *", option("", true))]
    fn test_option_lines(#[case] line: &str, #[case] expected: QuizOption) {
        let quiz = parse_quiz_block(&format!("Q: question\n{line}")).unwrap();
        assert_eq!(quiz.options, vec![expected]);
    }

    #[rstest]
    #[case("a) lowercase label")]
    #[case("AB) two letters")]
    #[case("1) numbered")]
    #[case("A. dotted")]
    #[case("- bullet")]
    fn test_non_option_lines_are_ignored(#[case] line: &str) {
        assert_eq!(parse_quiz_block(&format!("Q: question\n{line}")), None);
    }

    #[test]
    fn test_last_question_and_explanation_win() {
        let block = "Q: first\nExplanation: old\nA) x\nQ: second\nExplanation: new";
        let quiz = parse_quiz_block(block).unwrap();

        assert_eq!(quiz.question, "second");
        assert_eq!(quiz.explanation.as_deref(), Some("new"));
    }

    #[test]
    fn test_empty_explanation_is_absent() {
        let quiz = parse_quiz_block("Q: q\nA) a\nExplanation:   ").unwrap();
        assert_eq!(quiz.explanation, None);
    }

    #[test]
    fn test_blank_question_drops_block() {
        assert_eq!(parse_quiz_block("Q:    \nA) a *"), None);
    }

    #[test]
    fn test_labels_are_not_validated() {
        let quiz = parse_quiz_block("Q: q\nA) first *\nC) skipped B\nC) repeated *").unwrap();

        assert_eq!(
            quiz.options,
            vec![
                option("first", true),
                option("skipped B", false),
                option("repeated", true)
            ]
        );
    }

    #[test]
    fn test_indented_lines_and_crlf() {
        let block = "\r\n   Q: Indented?\r\n    A) yes *\r\n\r\n    B) no\r\n";
        let quiz = parse_quiz_block(block).unwrap();

        assert_eq!(quiz.question, "Indented?");
        assert_eq!(quiz.options, vec![option("yes", true), option("no", false)]);
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let quiz = parse_quiz_block("Some chatter\nQ: q\nHint: none\nA) a").unwrap();
        assert_eq!(quiz.options.len(), 1);
    }

    #[test]
    fn test_multibyte_text() {
        let block = "Q: 以太坊的原生代币是什么？\nA) 以太币 *\nB) 比特币";
        let quiz = parse_quiz_block(block).unwrap();

        assert_eq!(quiz.question, "以太坊的原生代币是什么？");
        assert_eq!(quiz.options, vec![option("以太币", true), option("比特币", false)]);
    }
}
