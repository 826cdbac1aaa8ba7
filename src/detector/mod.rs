use crate::{
    error::DetectionError, language::Language, ngram, source::ProfileSource,
    vocabulary::Vocabulary,
};
use ahash::AHashMap;
use compact_str::CompactString;
use itertools::Itertools;
use parking_lot::RwLock;
use regex::Regex;
use std::{
    borrow::Cow,
    sync::{Arc, LazyLock},
};
use tracing::{debug, error};

mod config;
mod engine;

pub use config::{DetectorConfig, NoFeaturesPolicy, DEFAULT_LANGUAGES};
pub use engine::{estimate, EstimatorParams};

/// Code returned by [`Detector::detect`] when no language clears the
/// probability threshold.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Coarse pre-filter: every non-word character becomes a space before
/// gram extraction.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").unwrap());

/// Profile-set and vocabulary state, swapped atomically on switches so
/// in-flight detections keep their own consistent snapshot.
#[derive(Debug)]
struct State {
    profile_set: Option<CompactString>,
    vocabulary: Arc<Vocabulary>,
}

/// Language detection service.
///
/// Detection is synchronous pure-CPU work; parallel [`detect_all`] calls
/// are safe because the vocabulary snapshot is immutable and all per-call
/// state (probability vectors, RNG stream) lives on the call stack.
/// Profile-set switches are configuration-time operations serialized
/// through a single writer lock.
///
/// [`detect_all`]: Detector::detect_all
#[derive(Debug)]
pub struct Detector<S> {
    source: S,
    config: DetectorConfig,
    state: RwLock<State>,
}

impl<S: ProfileSource> Detector<S> {
    /// Loads one profile per configured language from `source` and builds
    /// the vocabulary. Fails on the first unresolvable or duplicate
    /// profile rather than running with a partial vocabulary.
    pub fn new(source: S, config: DetectorConfig) -> Result<Self, DetectionError> {
        let vocabulary =
            build_vocabulary(&source, config.profile_set.as_deref(), &config.languages)?;
        let state = State {
            profile_set: config.profile_set.clone(),
            vocabulary: Arc::new(vocabulary),
        };
        Ok(Self {
            source,
            config,
            state: RwLock::new(state),
        })
    }

    /// Rebuilds the vocabulary from another profile set and swaps it in.
    /// On failure the previous vocabulary stays installed.
    pub fn switch_profile_set(&self, profile_set: Option<&str>) -> Result<(), DetectionError> {
        let vocabulary = build_vocabulary(&self.source, profile_set, &self.config.languages)?;
        let mut state = self.state.write();
        state.profile_set = profile_set.map(CompactString::from);
        state.vocabulary = Arc::new(vocabulary);
        Ok(())
    }

    /// The active profile set, `None` for the default set.
    pub fn profile_set(&self) -> Option<CompactString> {
        self.state.read().profile_set.clone()
    }

    /// Snapshot of the active vocabulary.
    pub fn vocabulary(&self) -> Arc<Vocabulary> {
        self.state.read().vocabulary.clone()
    }

    /// Sets prior language probabilities keyed by language code; languages
    /// absent from the map get zero. An invalid prior is rejected without
    /// touching the current estimator state.
    pub fn set_prior(
        &mut self,
        prior: &AHashMap<CompactString, f64>,
    ) -> Result<(), DetectionError> {
        let vocabulary = self.vocabulary();
        let aligned: Vec<f64> = vocabulary
            .languages()
            .iter()
            .map(|code| prior.get(code.as_str()).copied().unwrap_or(0.0))
            .collect();
        self.config.params.set_prior(aligned)
    }

    /// Detects all languages above the probability threshold, in
    /// descending probability order.
    pub fn detect_all(&self, text: &str) -> Result<Vec<Language>, DetectionError> {
        if let Some(pattern) = &self.config.acceptance {
            if !pattern.is_match(text) {
                return Ok(Vec::new());
            }
        }

        let vocabulary = self.vocabulary();

        let cleaned = NON_WORD.replace_all(text, " ");
        let cleaned = if self.config.strip_latin {
            match ngram::strip_minor_latin(&cleaned) {
                Some(stripped) => Cow::Owned(stripped),
                None => cleaned,
            }
        } else {
            cleaned
        };

        let grams = ngram::extract_grams(&cleaned, &vocabulary);
        if grams.is_empty() {
            return match self.config.no_features {
                NoFeaturesPolicy::Lenient => Ok(Vec::new()),
                NoFeaturesPolicy::Strict => Err(DetectionError::NoFeatures),
            };
        }

        let prob = engine::estimate(&grams, &vocabulary, &self.config.params)?;
        let mut languages = self.rank(&prob, &vocabulary);
        if let Some(max) = self.config.params.max_results {
            languages.truncate(max);
        }
        Ok(languages)
    }

    /// The most probable language code, or [`UNKNOWN_LANGUAGE`] when
    /// nothing clears the threshold.
    pub fn detect(&self, text: &str) -> Result<CompactString, DetectionError> {
        let mut languages = self.detect_all(text)?;
        if languages.is_empty() {
            return Ok(CompactString::const_new(UNKNOWN_LANGUAGE));
        }
        Ok(languages.swap_remove(0).language)
    }

    /// Descending insertion; on an exact tie the earlier-discovered
    /// language stays ahead of the later one. Codes are remapped at
    /// insertion time.
    fn rank(&self, prob: &[f64], vocabulary: &Vocabulary) -> Vec<Language> {
        let mut ranked: Vec<Language> = Vec::new();
        for (code, &p) in vocabulary.languages().iter().zip(prob) {
            if p <= self.config.params.prob_threshold {
                continue;
            }
            let position = ranked
                .iter()
                .position(|l| l.probability < p)
                .unwrap_or(ranked.len());
            let code = self.config.remap.get(code.as_str()).unwrap_or(code).clone();
            ranked.insert(
                position,
                Language {
                    language: code,
                    probability: p,
                },
            );
        }
        ranked
    }
}

fn build_vocabulary<S: ProfileSource>(
    source: &S,
    profile_set: Option<&str>,
    languages: &[CompactString],
) -> Result<Vocabulary, DetectionError> {
    let total = languages.len();
    let mut vocabulary = Vocabulary::default();
    for (index, code) in languages.iter().enumerate() {
        let profile = source.read_profile(profile_set, code).inspect_err(|e| {
            error!(%code, ?profile_set, "failed to load language profile: {e}");
        })?;
        vocabulary.add_profile(&profile, index, total)?;
    }
    debug!(
        ?profile_set,
        "language detection installed for [{}]",
        vocabulary.languages().iter().join(", ")
    );
    Ok(vocabulary)
}
