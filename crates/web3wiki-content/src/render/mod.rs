//! # Rendering
//!
//! Turns preprocessed content into HTML. Article markdown goes through
//! pulldown-cmark segment by segment, with each quiz placeholder replaced by a
//! quiz widget ([`quiz::render_quiz`]).

pub mod quiz;

use pulldown_cmark::{Event, Options, Parser, html};

use crate::models::quiz::{ParsedDocument, QuizAttempt};
use crate::parsing::{Segment, render_tooltips, split_placeholders};
pub use quiz::{QuizLabels, render_quiz};

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

fn push_markdown(out: &mut String, markdown: &str, allow_raw_html: bool) {
    let parser = Parser::new_ext(markdown, markdown_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) if !allow_raw_html => Event::Text(raw),
        other => other,
    });
    html::push_html(out, parser);
}

/// Renders article markdown. Raw HTML in the source is shown as text.
pub fn render_markdown(markdown: &str) -> String {
    let mut out = String::new();
    push_markdown(&mut out, markdown, false);
    out
}

/// Renders a glossary definition: tooltips become spans, the rest is markdown.
pub fn render_definition(definition: &str) -> String {
    let mut out = String::new();
    push_markdown(&mut out, &render_tooltips(definition), true);
    out
}

/// Renders a parsed article, substituting a quiz widget for each placeholder.
///
/// Whitespace-only markdown between placeholders produces nothing. A
/// placeholder naming a quiz that does not exist renders as nothing.
pub fn render_article(doc: &ParsedDocument, labels: &QuizLabels) -> String {
    let mut out = String::new();
    for segment in split_placeholders(&doc.markdown) {
        match segment {
            Segment::Markdown(text) if text.trim().is_empty() => {}
            Segment::Markdown(text) => push_markdown(&mut out, text, false),
            Segment::Quiz(index) => match doc.quiz(index) {
                Some(quiz) => {
                    out.push_str(&render_quiz(index, quiz, &QuizAttempt::new(), labels));
                }
                None => log::warn!("no quiz #{index} for placeholder, skipping"),
            },
        }
    }
    out
}
