use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use web3wiki_config::{Config, DEFAULT_ARTICLES};
use web3wiki_content::{
    ContentStore, Difficulty, GlossaryFilter, Language, QuizAttempt, QuizLabels, find_term,
    find_tooltips, group_by_letter, io, option_index, option_label, parse_quizzes, render_article,
    render_definition,
};

#[derive(Debug, Parser)]
#[command(
    name = "web3wiki",
    version,
    about = "Render web3wiki articles, quizzes and glossary terms"
)]
struct Cli {
    /// Content directory holding glossary.json and article folders (overrides the config file)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Content language, `en` or `zh` (overrides the config file)
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render an article with its quizzes
    Article {
        id: String,
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },
    /// Render a local markdown file as HTML, as the editor preview does
    Preview { file: PathBuf },
    /// Print the quizzes of a local markdown file as JSON
    Quizzes { file: PathBuf },
    /// Answer quiz number QUIZ of an article with an option letter
    Check {
        id: String,
        quiz: usize,
        answer: String,
    },
    /// List glossary terms grouped by first letter
    Glossary {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show one glossary term with tooltips rendered
    Term { id: String },
    /// List known articles and the languages available on disk
    Articles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    /// Markdown with quiz placeholders
    Markdown,
    /// Placeholder markdown and quiz records
    Json,
}

struct Settings {
    store: ContentStore,
    lang: Language,
}

impl Settings {
    /// CLI flags win over the config file.
    fn resolve(
        content: Option<PathBuf>,
        lang: Option<Language>,
        config: Option<Config>,
    ) -> Result<Self> {
        let (content_path, config_lang, articles) = match (content, config) {
            (Some(path), config) => (
                path,
                config.as_ref().map(|c| c.language),
                config.map(|c| c.articles),
            ),
            (None, Some(config)) => (
                config.content_path,
                Some(config.language),
                Some(config.articles),
            ),
            (None, None) => bail!(
                "No content path provided and no config file found at {}",
                Config::config_path().display()
            ),
        };

        io::validate_content_dir(&content_path)
            .with_context(|| format!("Content path '{}' is invalid", content_path.display()))?;

        let articles = articles
            .unwrap_or_else(|| DEFAULT_ARTICLES.iter().map(|id| id.to_string()).collect());
        Ok(Self {
            store: ContentStore::new(content_path, articles),
            lang: lang.or(config_lang).unwrap_or_default(),
        })
    }

    fn load(cli: &Cli) -> Result<Self> {
        let config = match Config::load() {
            Ok(config) => config,
            Err(e) if cli.content.is_some() => {
                log::warn!("Ignoring config file: {e}");
                None
            }
            Err(e) => return Err(e).context("Failed to load config file"),
        };
        Self::resolve(cli.content.clone(), cli.lang, config)
    }
}

/// Language for commands that work on local files: the flag, else the config
/// file's language. The config file is only read when no flag was given.
fn local_language(flag: Option<Language>, config: impl FnOnce() -> Option<Config>) -> Language {
    match flag {
        Some(lang) => lang,
        None => config().map(|c| c.language).unwrap_or_default(),
    }
}

fn config_or_warn() -> Option<Config> {
    Config::load().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {e}");
        None
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    run(&cli, &mut stdout().lock())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::Preview { file } => {
            let markdown = read_local(file)?;
            let labels = QuizLabels::for_language(local_language(cli.lang, config_or_warn));
            write!(out, "{}", render_article(&parse_quizzes(&markdown), &labels))?;
        }
        Command::Quizzes { file } => {
            let parsed = parse_quizzes(&read_local(file)?);
            writeln!(out, "{}", serde_json::to_string_pretty(&parsed.quizzes)?)?;
        }
        command => {
            let settings = Settings::load(cli)?;
            run_with_content(command, &settings, out)?;
        }
    }
    Ok(())
}

fn read_local(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn run_with_content(command: &Command, settings: &Settings, out: &mut impl Write) -> Result<()> {
    let Settings { store, lang } = settings;
    let labels = QuizLabels::for_language(*lang);

    match command {
        Command::Article { id, format } => {
            let parsed = store.load_article(id, *lang)?;
            match format {
                Format::Html => write!(out, "{}", render_article(&parsed, &labels))?,
                Format::Markdown => write!(out, "{}", parsed.markdown)?,
                Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&parsed)?)?,
            }
        }
        Command::Check { id, quiz, answer } => {
            let parsed = store.load_article(id, *lang)?;
            let record = parsed
                .quiz(*quiz)
                .ok_or_else(|| anyhow!("Article '{id}' has no quiz #{quiz}"))?;
            let choice = option_index(answer)
                .ok_or_else(|| anyhow!("'{answer}' is not an option letter"))?;

            let mut attempt = QuizAttempt::new();
            let correct = attempt.select(record, choice)?;

            writeln!(out, "{}", record.question)?;
            writeln!(
                out,
                "{}",
                if correct {
                    &labels.correct
                } else {
                    &labels.incorrect
                }
            )?;
            let answers: Vec<String> = record
                .options
                .iter()
                .enumerate()
                .filter(|(_, option)| option.is_correct)
                .map(|(i, option)| {
                    let label = option_label(i).map_or_else(|| (i + 1).to_string(), String::from);
                    format!("{label}) {}", option.text)
                })
                .collect();
            if !correct && !answers.is_empty() {
                writeln!(out, "-> {}", answers.join(", "))?;
            }
            if let Some(explanation) = &record.explanation {
                writeln!(out, "{}: {explanation}", labels.explanation)?;
            }
        }
        Command::Glossary {
            query,
            category,
            difficulty,
            tag,
        } => {
            let glossary = store.read_glossary()?;
            let filter = GlossaryFilter {
                query: query.clone(),
                category: category.clone(),
                difficulty: *difficulty,
                tag: tag.clone(),
            };
            let found = filter.apply(glossary.terms(*lang));

            writeln!(out, "{} terms", found.len())?;
            for group in group_by_letter(&found) {
                writeln!(out, "\n{}", group.letter)?;
                for term in group.terms {
                    let difficulty = term
                        .difficulty
                        .map(|d| format!(" [{d}]"))
                        .unwrap_or_default();
                    writeln!(out, "  {}{difficulty} ({})", term.term, term.category)?;
                    writeln!(out, "    {}", term.preview())?;
                }
            }
        }
        Command::Term { id } => {
            let glossary = store.read_glossary()?;
            let terms = glossary.terms(*lang);
            let term = find_term(terms, id).ok_or_else(|| anyhow!("No glossary term '{id}'"))?;

            writeln!(out, "{}", term.term)?;
            write!(out, "{}", render_definition(&term.definition))?;
            for tooltip in find_tooltips(&term.definition) {
                writeln!(out, "  {}: {}", tooltip.display, tooltip.tooltip)?;
            }
            let related: Vec<&str> = term
                .related(terms)
                .into_iter()
                .map(|t| t.term.as_str())
                .collect();
            if !related.is_empty() {
                writeln!(out, "Related: {}", related.join(", "))?;
            }
        }
        Command::Articles => {
            for id in store.articles() {
                let langs: Vec<String> = store
                    .available_languages(id)
                    .iter()
                    .map(Language::to_string)
                    .collect();
                if langs.is_empty() {
                    writeln!(out, "{id}: (missing)")?;
                } else {
                    writeln!(out, "{id}: {}", langs.join(", "))?;
                }
            }
        }
        Command::Preview { .. } | Command::Quizzes { .. } => {
            bail!("preview and quizzes read local files, not the content directory")
        }
    }
    Ok(())
}
