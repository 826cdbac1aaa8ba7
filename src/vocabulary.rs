use crate::{error::DetectionError, gram_size::GramSize, profile::LangProfile};
use compact_str::CompactString;
use rustc_hash::FxHashMap;

/// Profiles merged into one read-only structure: an ordered language list
/// (index = column) and a map from gram to a dense per-language
/// probability vector.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    languages: Vec<CompactString>,
    prob_by_gram: FxHashMap<CompactString, Vec<f64>>,
}

impl Vocabulary {
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = LangProfile>,
    ) -> Result<Self, DetectionError> {
        let profiles: Vec<_> = profiles.into_iter().collect();
        let total = profiles.len();
        let mut vocabulary = Self::default();
        for (index, profile) in profiles.iter().enumerate() {
            vocabulary.add_profile(profile, index, total)?;
        }
        Ok(vocabulary)
    }

    /// Merges `profile` at column `index` of `total`. Every gram's vector
    /// is allocated zero-filled on first sight, so vectors always hold
    /// exactly `total` entries.
    pub fn add_profile(
        &mut self,
        profile: &LangProfile,
        index: usize,
        total: usize,
    ) -> Result<(), DetectionError> {
        let name = profile.name.clone().ok_or(DetectionError::UnnamedProfile)?;
        if self.languages.contains(&name) {
            return Err(DetectionError::DuplicateLanguage(name));
        }
        debug_assert_eq!(index, self.languages.len());
        debug_assert!(index < total);
        self.languages.push(name);

        for (gram, &count) in &profile.freq {
            let Some(size) = GramSize::of_chars(gram.chars().count()) else {
                continue;
            };
            let bucket = profile.n_words[size as usize];
            if bucket == 0 {
                continue;
            }
            let row = self
                .prob_by_gram
                .entry(gram.clone())
                .or_insert_with(|| vec![0.0; total]);
            row[index] = count as f64 / bucket as f64;
        }
        Ok(())
    }

    /// Language codes in merge order; the estimator's probability vector
    /// uses the same indexing.
    #[inline]
    pub fn languages(&self) -> &[CompactString] {
        &self.languages
    }

    #[inline]
    pub fn contains_gram(&self, gram: &str) -> bool {
        self.prob_by_gram.contains_key(gram)
    }

    /// Per-language probability vector for `gram`.
    #[inline]
    pub fn prob(&self, gram: &str) -> Option<&[f64]> {
        self.prob_by_gram.get(gram).map(Vec::as_slice)
    }

    #[inline]
    pub fn grams(&self) -> impl Iterator<Item = &CompactString> {
        self.prob_by_gram.keys()
    }
}
