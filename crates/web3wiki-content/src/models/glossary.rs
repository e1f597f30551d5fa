use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use super::language::Language;
use crate::parsing::strip_tooltips;

/// Preview length, in characters, of a term definition in listings.
pub const PREVIEW_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown difficulty '{0}', expected beginner, intermediate or advanced")]
pub struct DifficultyError(String);

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DifficultyError(s.to_string()))
    }
}

/// A glossary entry. `definition` may contain `[?-term-]{tooltip}` markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub id: String,
    pub term: String,
    pub definition: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub related_terms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl GlossaryTerm {
    /// Definition without tooltip markup, cut to [`PREVIEW_CHARS`] characters
    /// with a trailing `...` when longer.
    pub fn preview(&self) -> String {
        let clean = strip_tooltips(&self.definition);
        match clean.char_indices().nth(PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &clean[..cut]),
            None => clean,
        }
    }

    /// Related terms that exist in `terms`, in the order they are listed.
    pub fn related<'a>(&self, terms: &'a [GlossaryTerm]) -> Vec<&'a GlossaryTerm> {
        self.related_terms
            .iter()
            .filter_map(|id| find_term(terms, id))
            .collect()
    }

    /// Upper-cased first character, used as the listing group key.
    pub fn letter(&self) -> String {
        self.term
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Contents of `glossary.json`: one term list per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryData {
    #[serde(default)]
    pub en: Vec<GlossaryTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zh: Option<Vec<GlossaryTerm>>,
}

impl GlossaryData {
    /// Terms for `lang`, falling back to English when that language has no list.
    pub fn terms(&self, lang: Language) -> &[GlossaryTerm] {
        match lang {
            Language::En => &self.en,
            Language::Zh => self.zh.as_deref().unwrap_or(&self.en),
        }
    }
}

pub fn find_term<'a>(terms: &'a [GlossaryTerm], id: &str) -> Option<&'a GlossaryTerm> {
    terms.iter().find(|term| term.id == id)
}

/// Search and filter criteria for the glossary listing. Criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryFilter {
    /// Case-insensitive substring of the term, its raw definition or a tag.
    pub query: String,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tag: Option<String>,
}

impl GlossaryFilter {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || self.category.is_some()
            || self.difficulty.is_some()
            || self.tag.is_some()
    }

    pub fn matches(&self, term: &GlossaryTerm) -> bool {
        let query = self.query.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&query);
        let in_text = contains(&term.term) || contains(&term.definition);
        let matches_query = query.is_empty() || in_text || term.tags.iter().any(|t| contains(t));

        let matches_category = self.category.as_ref().is_none_or(|c| *c == term.category);
        let matches_difficulty = self.difficulty.is_none_or(|d| term.difficulty == Some(d));
        let matches_tag = self.tag.as_ref().is_none_or(|t| term.tags.contains(t));
        matches_query && matches_category && matches_difficulty && matches_tag
    }

    pub fn apply<'a>(&self, terms: &'a [GlossaryTerm]) -> Vec<&'a GlossaryTerm> {
        terms.iter().filter(|term| self.matches(term)).collect()
    }
}

/// Terms sharing a first letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGroup<'a> {
    pub letter: String,
    pub terms: Vec<&'a GlossaryTerm>,
}

/// Groups terms by [`GlossaryTerm::letter`]. Groups are ordered by letter and
/// terms within a group case-insensitively by name.
pub fn group_by_letter<'a>(terms: &[&'a GlossaryTerm]) -> Vec<LetterGroup<'a>> {
    let mut groups: BTreeMap<String, Vec<&'a GlossaryTerm>> = BTreeMap::new();
    for term in terms {
        groups.entry(term.letter()).or_default().push(*term);
    }

    groups
        .into_iter()
        .map(|(letter, mut terms)| {
            terms.sort_by(|a, b| compare_names(&a.term, &b.term));
            LetterGroup { letter, terms }
        })
        .collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Distinct categories in first-seen order.
pub fn categories(terms: &[GlossaryTerm]) -> Vec<&str> {
    unique(terms.iter().map(|term| term.category.as_str()))
}

/// Distinct tags in first-seen order.
pub fn tags(terms: &[GlossaryTerm]) -> Vec<&str> {
    unique(terms.iter().flat_map(|term| term.tags.iter().map(String::as_str)))
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
