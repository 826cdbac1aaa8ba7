use super::engine::EstimatorParams;
use ahash::AHashMap;
use compact_str::CompactString;
use regex::Regex;

/// Languages the stock profile sets ship with.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "ar", "bg", "bn", "cs", "da", "de", "el", "en", "es", "et", "fa", "fi", "fr", "gu", "he",
    "hi", "hr", "hu", "id", "it", "ja", "ko", "lt", "lv", "mk", "ml", "nl", "no", "pa", "pl",
    "pt", "ro", "ru", "sq", "sv", "ta", "te", "th", "tl", "tr", "uk", "ur", "vi", "zh-cn",
    "zh-tw",
];

/// What `detect_all` does when the tokenizer yields zero known grams.
/// The choice is a per-deployment policy, so it is explicit configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoFeaturesPolicy {
    /// Return an empty result.
    #[default]
    Lenient,
    /// Surface [`DetectionError::NoFeatures`](crate::DetectionError::NoFeatures).
    Strict,
}

/// Detector configuration: language list, profile set, estimator
/// parameters, output-code remap, input-acceptance gate and policies.
#[derive(Clone, Debug)]
pub struct DetectorConfig {
    pub languages: Vec<CompactString>,
    /// `None` selects the default profile set.
    pub profile_set: Option<CompactString>,
    pub params: EstimatorParams,
    /// Applied to result codes at insertion time.
    pub remap: AHashMap<CompactString, CompactString>,
    /// When set, input that does not fully match is rejected before
    /// estimation with an empty result.
    pub acceptance: Option<Regex>,
    pub no_features: NoFeaturesPolicy,
    /// Off by default: strip Latin characters from mostly-non-Latin text
    /// before tokenization.
    pub strip_latin: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().copied().map(Into::into).collect(),
            profile_set: None,
            params: EstimatorParams::default(),
            remap: AHashMap::new(),
            acceptance: None,
            no_features: NoFeaturesPolicy::default(),
            strip_latin: false,
        }
    }
}

impl DetectorConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn languages<I, T>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CompactString>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn profile_set(mut self, profile_set: impl Into<CompactString>) -> Self {
        self.profile_set = Some(profile_set.into());
        self
    }

    pub fn params(mut self, params: EstimatorParams) -> Self {
        self.params = params;
        self
    }

    pub fn remap<I, T>(mut self, remap: I) -> Self
    where
        I: IntoIterator<Item = (T, T)>,
        T: Into<CompactString>,
    {
        self.remap = remap
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .collect();
        self
    }

    /// Compiles `pattern` anchored to the whole input.
    pub fn acceptance_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.acceptance = Some(Regex::new(&format!("^(?:{pattern})$"))?);
        Ok(self)
    }

    pub fn no_features(mut self, policy: NoFeaturesPolicy) -> Self {
        self.no_features = policy;
        self
    }

    pub fn strip_latin(mut self, strip_latin: bool) -> Self {
        self.strip_latin = strip_latin;
        self
    }
}
