use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("Unknown language '{0}', expected 'en' or 'zh'")]
pub struct LanguageError(String);

/// Content language. Articles and glossary terms exist in English and Chinese.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// Maps a UI language tag (`zh`, `zh-CN`, `en-US`, ...) to a content language.
    /// Anything that is not Chinese falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("zh") {
            Language::Zh
        } else {
            Language::En
        }
    }

    /// File stem of an article translation, as in `ethereum/zh_cn.md`.
    pub fn content_code(self) -> &'static str {
        match self {
            Language::En => "en_us",
            Language::Zh => "zh_cn",
        }
    }

    /// Key of this language's term list in `glossary.json`.
    pub fn glossary_key(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glossary_key())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.glossary_key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LanguageError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("zh", Language::Zh)]
    #[case("zh-CN", Language::Zh)]
    #[case("zh_cn", Language::Zh)]
    #[case("ZH", Language::Zh)]
    #[case("en", Language::En)]
    #[case("en-US", Language::En)]
    #[case("fr", Language::En)]
    #[case("", Language::En)]
    fn test_from_tag(#[case] tag: &str, #[case] expected: Language) {
        assert_eq!(Language::from_tag(tag), expected);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Language::En.content_code(), "en_us");
        assert_eq!(Language::Zh.content_code(), "zh_cn");
        assert_eq!(Language::Zh.glossary_key(), "zh");
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" Zh ".parse::<Language>().unwrap(), Language::Zh);

        let err = "zh-CN".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("zh-CN"));
    }

    #[test]
    fn test_display_roundtrips() {
        for lang in Language::ALL {
            assert_eq!(lang.to_string().parse::<Language>().unwrap(), lang);
        }
    }
}
