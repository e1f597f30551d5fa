use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::language::Language;
use crate::models::quiz::{QuizAttempt, QuizRecord, option_label};

/// Fixed strings shown around a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizLabels {
    pub title: String,
    pub correct: String,
    pub incorrect: String,
    pub explanation: String,
    pub retry: String,
}

impl QuizLabels {
    pub fn for_language(lang: Language) -> Self {
        let (title, correct, incorrect, explanation, retry) = match lang {
            Language::En => ("Quiz", "Correct!", "Incorrect", "Explanation", "Try again"),
            Language::Zh => ("小测验", "回答正确！", "回答错误", "解析", "重试"),
        };
        Self {
            title: title.to_string(),
            correct: correct.to_string(),
            incorrect: incorrect.to_string(),
            explanation: explanation.to_string(),
            retry: retry.to_string(),
        }
    }
}

impl Default for QuizLabels {
    fn default() -> Self {
        Self::for_language(Language::En)
    }
}

/// Renders the widget for quiz number `index`.
///
/// Options are labelled by position. The verdict, explanation and retry button
/// are only rendered once `attempt` has an answer.
pub fn render_quiz(
    index: usize,
    quiz: &QuizRecord,
    attempt: &QuizAttempt,
    labels: &QuizLabels,
) -> String {
    let mut out = format!(
        "<div class=\"quiz-container\" data-quiz=\"{index}\">\n\
         <div class=\"quiz-header\"><h3>{}</h3></div>\n\
         <p class=\"quiz-question\">{}</p>\n\
         <div class=\"quiz-options\">\n",
        encode_text(&labels.title),
        encode_text(&quiz.question)
    );

    for (i, option) in quiz.options.iter().enumerate() {
        let label = option_label(i).map_or_else(|| (i + 1).to_string(), String::from);
        let class = match attempt.option_state(quiz, i).class() {
            Some(modifier) => format!("quiz-option {modifier}"),
            None => "quiz-option".to_string(),
        };
        out.push_str(&format!(
            "<div class=\"{class}\" data-option=\"{i}\"><span class=\"option-label\">{})</span><span class=\"option-text\">{}</span></div>\n",
            encode_double_quoted_attribute(&label),
            encode_text(&option.text)
        ));
    }
    out.push_str("</div>\n");

    if let Some(correct) = attempt.is_correct(quiz) {
        let (verdict_class, verdict) = if correct {
            ("correct", &labels.correct)
        } else {
            ("incorrect", &labels.incorrect)
        };
        out.push_str(&format!(
            "<div class=\"quiz-result {verdict_class}\">\n<p class=\"result-text\">{}</p>\n",
            encode_text(verdict)
        ));
        if let Some(explanation) = &quiz.explanation {
            out.push_str(&format!(
                "<div class=\"quiz-explanation\"><strong>{}:</strong> {}</div>\n",
                encode_text(&labels.explanation),
                encode_text(explanation)
            ));
        }
        out.push_str(&format!(
            "<button class=\"retry-button\" data-quiz=\"{index}\">{}</button>\n</div>\n",
            encode_text(&labels.retry)
        ));
    }

    out.push_str("</div>\n");
    out
}
