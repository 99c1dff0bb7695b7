//! Stopword resources: sources, the on-disk corpus cache and the per-language provider

use crate::error::{NewsClassifierError, Result};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Languages with a stopword list compiled into the binary
pub const BUNDLED_LANGUAGES: &[&str] = &["english", "french", "german", "spanish"];

/// Raw bundled list for a language, one word per line
pub fn bundled_list(language: &str) -> Option<&'static str> {
    match language {
        "english" => Some(include_str!("../../resources/stopwords/english")),
        "french" => Some(include_str!("../../resources/stopwords/french")),
        "german" => Some(include_str!("../../resources/stopwords/german")),
        "spanish" => Some(include_str!("../../resources/stopwords/spanish")),
        _ => None,
    }
}

/// Parse a one-word-per-line list, skipping blank lines
pub fn parse_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Somewhere stopword sets can be loaded from.
///
/// `refresh` repairs or repopulates whatever backs the source; the provider
/// calls it once when a `load` fails and then tries again.
pub trait StopwordSource: Send + Sync {
    fn load(&self, language: &str) -> Result<HashSet<String>>;
    fn refresh(&self, language: &str) -> Result<()>;
}

/// Lists compiled into the binary. Never needs refreshing.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledStopwords;

impl StopwordSource for BundledStopwords {
    fn load(&self, language: &str) -> Result<HashSet<String>> {
        bundled_list(language).map(parse_list).ok_or_else(|| {
            NewsClassifierError::resource_unavailable(language, "no bundled stopword list")
        })
    }

    fn refresh(&self, _language: &str) -> Result<()> {
        Ok(())
    }
}

/// Stopword corpus stored on disk as `<root>/<language>`.
///
/// Refreshing a language writes the bundled list into the directory, which
/// is how the cache gets populated on first use.
#[derive(Debug, Clone)]
pub struct CorpusDirectory {
    root: PathBuf,
}

impl CorpusDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, language: &str) -> Result<PathBuf> {
        validate_language(language)?;
        Ok(self.root.join(language))
    }

    pub fn is_cached(&self, language: &str) -> bool {
        self.path_for(language).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Write the bundled list for `language` into the corpus directory.
    /// Existing files are kept unless `force` is set.
    pub fn download(&self, language: &str, force: bool) -> Result<PathBuf> {
        let path = self.path_for(language)?;
        if path.is_file() && !force {
            debug!("Stopwords for {} already present at {}", language, path.display());
            return Ok(path);
        }

        let content = bundled_list(language).ok_or_else(|| {
            NewsClassifierError::resource_unavailable(language, "no stopword list to download")
        })?;

        std::fs::create_dir_all(&self.root)?;
        std::fs::write(&path, content)?;
        info!("Stored stopwords for {} at {}", language, path.display());
        Ok(path)
    }
}

impl StopwordSource for CorpusDirectory {
    fn load(&self, language: &str) -> Result<HashSet<String>> {
        let path = self.path_for(language)?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            NewsClassifierError::resource_unavailable(
                language,
                format!("cannot read {}: {}", path.display(), e),
            )
        })?;
        Ok(parse_list(&content))
    }

    fn refresh(&self, language: &str) -> Result<()> {
        self.download(language, true).map(|_| ())
    }
}

/// Language tags double as file names, so only plain lowercase names are accepted
fn validate_language(language: &str) -> Result<()> {
    if !language.is_empty() && language.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
        Ok(())
    } else {
        Err(NewsClassifierError::resource_unavailable(
            language,
            "invalid language tag",
        ))
    }
}

/// Per-language stopword cache in front of a [`StopwordSource`].
///
/// A language is fetched at most once after its first successful load. The
/// whole get-or-fetch runs under the cache lock so concurrent callers never
/// fetch the same language twice.
pub struct StopwordProvider {
    source: Box<dyn StopwordSource>,
    cache: Mutex<HashMap<String, Arc<HashSet<String>>>>,
}

impl StopwordProvider {
    pub fn new(source: impl StopwordSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn bundled() -> Self {
        Self::new(BundledStopwords)
    }

    pub fn from_directory(root: impl Into<PathBuf>) -> Self {
        Self::new(CorpusDirectory::new(root))
    }

    /// Stopword set for `language`, fetching it on first use.
    ///
    /// A failed fetch is retried once after refreshing the source. If the
    /// retry fails too the error is returned and nothing is cached.
    pub fn get(&self, language: &str) -> Result<Arc<HashSet<String>>> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(words) = cache.get(language) {
            return Ok(Arc::clone(words));
        }

        let words = match self.source.load(language) {
            Ok(words) => words,
            Err(first) => {
                warn!("Stopwords for {} unavailable ({}), refreshing", language, first);
                self.source
                    .refresh(language)
                    .and_then(|_| self.source.load(language))
                    .map_err(|e| match e {
                        NewsClassifierError::ResourceUnavailable { .. } => e,
                        other => NewsClassifierError::resource_unavailable(language, other.to_string()),
                    })?
            }
        };

        debug!("Cached {} stopwords for {}", words.len(), language);
        let words = Arc::new(words);
        cache.insert(language.to_string(), Arc::clone(&words));
        Ok(words)
    }

    pub fn is_cached(&self, language: &str) -> bool {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(language)
    }

    pub fn cached_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        languages.sort();
        languages
    }
}

impl Default for StopwordProvider {
    fn default() -> Self {
        Self::bundled()
    }
}

impl std::fmt::Debug for StopwordProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordProvider")
            .field("cached_languages", &self.cached_languages())
            .finish()
    }
}
