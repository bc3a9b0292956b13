use log::{debug, info, warn};
use std::collections::HashSet;

use crate::complete::request::CompletionRequest;
use crate::complete::tokenizer::{DEFAULT_STRIP, Vocabulary};
use crate::ports::{CacheStore, VocabularySource};

/// Word that keeps completion on subcommands even after one was typed
pub const DEFAULT_HELP_WORD: &str = "help";

/// Completion session: owns the memoized vocabulary for its whole lifetime
pub struct CompletionEngine<V, C> {
    source: V,
    cache: C,
    strip: Vec<String>,
    help_word: String,
    vocabulary: Option<Vocabulary>,
}

impl<V: VocabularySource, C: CacheStore> CompletionEngine<V, C> {
    pub fn new(source: V, cache: C) -> Self {
        Self {
            source,
            cache,
            strip: DEFAULT_STRIP.iter().map(|s| s.to_string()).collect(),
            help_word: DEFAULT_HELP_WORD.to_string(),
            vocabulary: None,
        }
    }

    pub fn with_strip(mut self, strip: Vec<String>) -> Self {
        self.strip = strip;
        self
    }

    pub fn with_help_word(mut self, help_word: impl Into<String>) -> Self {
        self.help_word = help_word.into();
        self
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    /// Memoized vocabulary, fetching it if no non-empty result is held yet
    pub async fn vocabulary(&mut self) -> Option<&Vocabulary> {
        memoized(&self.source, &self.strip, &mut self.vocabulary).await
    }

    /// Candidates for the word under the cursor
    pub async fn complete(&mut self, request: &CompletionRequest) -> Vec<String> {
        if request.words.is_empty() {
            return Vec::new();
        }

        let Some(vocabulary) = memoized(&self.source, &self.strip, &mut self.vocabulary).await else {
            return Vec::new();
        };

        let subcommand_selected = request.typed_words().any(|w| vocabulary.is_option(w));
        let candidates = if subcommand_selected && request.previous() != self.help_word {
            with_cached_values(vocabulary.flags.clone(), self.cache.read_tokens())
        } else {
            vocabulary.options.clone()
        };

        let result = filter_prefix(candidates, request.current());
        debug!(
            "complete cword={} cur={:?} prev={:?} -> {} candidate(s)",
            request.cword,
            request.current(),
            request.previous(),
            result.len()
        );
        result
    }
}

/// Keep candidates that start with `prefix`; an empty prefix keeps all
pub fn filter_prefix(candidates: Vec<String>, prefix: &str) -> Vec<String> {
    candidates.into_iter().filter(|c| c.starts_with(prefix)).collect()
}

/// Get-or-compute over the session slot; only a non-empty vocabulary is kept
async fn memoized<'a, V: VocabularySource>(
    source: &V,
    strip: &[String],
    slot: &'a mut Option<Vocabulary>,
) -> Option<&'a Vocabulary> {
    if slot.is_none() {
        match source.fetch_vocabulary().await {
            Ok(line) => {
                let vocabulary = Vocabulary::parse(&line, strip);
                if vocabulary.is_empty() {
                    debug!("Client reported an empty vocabulary; will retry");
                } else {
                    info!(
                        "Loaded vocabulary: {} options, {} flags",
                        vocabulary.options.len(),
                        vocabulary.flags.len()
                    );
                    *slot = Some(vocabulary);
                }
            }
            Err(e) => warn!("Vocabulary query failed: {e:#}"),
        }
    }
    slot.as_ref()
}

/// Flags exactly as reported, then cached values not already offered
fn with_cached_values(flags: Vec<String>, cached: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = flags.iter().cloned().collect();
    let mut candidates = flags;
    candidates.extend(cached.into_iter().filter(|value| seen.insert(value.clone())));
    candidates
}
