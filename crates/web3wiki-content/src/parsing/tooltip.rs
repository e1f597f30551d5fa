use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::kinds::Tooltip;

/// Captures never cross a line terminator, so an unclosed tooltip cannot
/// swallow the rest of a multi-line definition.
static TOOLTIP: LazyLock<Regex> = LazyLock::new(|| {
    const LINE: &str = r"[^\n\r\x{2028}\x{2029}]*?";
    let pattern = format!(
        "{}({LINE}){}({LINE}){}",
        regex::escape(Tooltip::OPEN),
        regex::escape(Tooltip::SEPARATOR),
        regex::escape(Tooltip::CLOSE)
    );
    Regex::new(&pattern).expect("tooltip pattern is valid")
});

/// One `[?-display-]{tooltip}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipSpan<'a> {
    /// Byte range of the whole occurrence in the scanned text.
    pub range: Range<usize>,
    pub display: &'a str,
    pub tooltip: &'a str,
}

impl<'a> TooltipSpan<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        Some(Self {
            range: caps.get(0)?.range(),
            display: caps.get(1)?.as_str(),
            tooltip: caps.get(2)?.as_str(),
        })
    }
}

/// Finds tooltip occurrences left to right, without overlap.
pub fn find_tooltips(text: &str) -> impl Iterator<Item = TooltipSpan<'_>> {
    TOOLTIP
        .captures_iter(text)
        .filter_map(|caps| TooltipSpan::from_captures(&caps))
}

/// Rewrites every tooltip into an inline `<span>` carrying the tooltip text in
/// a `data-tooltip` attribute. Both parts are escaped with [`escape_markup`].
pub fn render_tooltips(text: &str) -> String {
    TOOLTIP
        .replace_all(text, |caps: &Captures<'_>| {
            format!(
                r#"<span class="{}" data-tooltip="{}">{}</span>"#,
                Tooltip::CLASS,
                escape_markup(&caps[2]),
                escape_markup(&caps[1])
            )
        })
        .into_owned()
}

/// Replaces every tooltip with its raw display text, for plain-text previews.
pub fn strip_tooltips(text: &str) -> String {
    TOOLTIP.replace_all(text, "${1}").into_owned()
}

/// Escapes `&`, `<`, `>`, `"` and `'`.
///
/// Ampersands in the input are escaped exactly once, so entities produced for
/// the other characters are never double-escaped.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
