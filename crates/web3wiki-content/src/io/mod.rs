use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{glossary::GlossaryData, language::Language, quiz::ParsedDocument};
use crate::parsing::parse_quizzes;

pub const GLOSSARY_FILE: &str = "glossary.json";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content directory: {0}")]
    InvalidContentDir(String),
    #[error("Unknown article: {0}")]
    UnknownArticle(String),
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read a content file and return its text
pub fn read_file(relative_path: &RelativePath, content_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(content_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

pub fn validate_content_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidContentDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Articles and glossary on disk:
///
/// ```text
/// <root>/glossary.json
/// <root>/<article-id>/en_us.md
/// <root>/<article-id>/zh_cn.md
/// ```
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    articles: Vec<String>,
}

impl ContentStore {
    /// `articles` lists the ids that may be served; others are rejected.
    pub fn new(root: impl Into<PathBuf>, articles: Vec<String>) -> Self {
        Self {
            root: root.into(),
            articles,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn articles(&self) -> &[String] {
        &self.articles
    }

    pub fn is_known_article(&self, id: &str) -> bool {
        self.articles.iter().any(|known| known == id)
    }

    pub fn article_path(id: &str, lang: Language) -> RelativePathBuf {
        RelativePathBuf::from(id).join(format!("{}.md", lang.content_code()))
    }

    pub fn read_article(&self, id: &str, lang: Language) -> Result<String, IoError> {
        if !self.is_known_article(id) {
            return Err(IoError::UnknownArticle(id.to_string()));
        }
        let path = Self::article_path(id, lang);
        log::info!("loading article {path}");
        read_file(&path, &self.root)
    }

    /// Reads an article and extracts its quizzes.
    pub fn load_article(&self, id: &str, lang: Language) -> Result<ParsedDocument, IoError> {
        let markdown = self.read_article(id, lang)?;
        let parsed = parse_quizzes(&markdown);
        log::debug!("article {id} ({lang}) has {} quizzes", parsed.quizzes.len());
        Ok(parsed)
    }

    /// Languages with a translation on disk for a known article.
    pub fn available_languages(&self, id: &str) -> Vec<Language> {
        if !self.is_known_article(id) {
            return vec![];
        }
        Language::ALL
            .into_iter()
            .filter(|lang| Self::article_path(id, *lang).to_path(&self.root).is_file())
            .collect()
    }

    pub fn read_glossary(&self) -> Result<GlossaryData, IoError> {
        let path = RelativePath::new(GLOSSARY_FILE);
        let text = read_file(path, &self.root)?;
        serde_json::from_str(&text).map_err(|source| IoError::Json {
            path: path.to_path(&self.root),
            source,
        })
    }
}
