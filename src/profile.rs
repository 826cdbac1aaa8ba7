use crate::gram_size::{GramSize, GRAM_MAX_LEN};
use ahash::AHashMap;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

const MINIMUM_FREQ: u32 = 2;
const LESS_FREQ_RATIO: u64 = 100_000;

/// Per-language gram frequency statistics.
///
/// The serialized form is the profile JSON record:
/// `{"name":"en","n_words":[...],"freq":{"a":25,...}}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LangProfile {
    #[serde(default)]
    pub name: Option<CompactString>,
    #[serde(default)]
    pub freq: AHashMap<CompactString, u32>,
    /// Total gram occurrences per gram length (index = length - 1).
    #[serde(default)]
    pub n_words: [u64; GRAM_MAX_LEN],
}

impl LangProfile {
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Counts one gram occurrence. No-op for an unnamed profile or a gram
    /// whose length is outside 1..=3.
    pub fn add(&mut self, gram: &str) {
        if self.name.is_none() {
            return;
        }
        let Some(size) = GramSize::of_chars(gram.chars().count()) else {
            return;
        };
        self.n_words[size as usize] += 1;
        *self.freq.entry(CompactString::from(gram)).or_insert(0) += 1;
    }

    /// Trains the profile on raw text: every 1..=3 gram of every word is
    /// counted, using the same normalization as detection.
    pub fn train(&mut self, text: &str) {
        use strum::IntoEnumIterator;

        let text = crate::ngram::compose_vietnamese(text);
        let mut window = crate::ngram::GramWindow::new();
        for ch in text.chars() {
            window.push(ch);
            for size in GramSize::iter() {
                if let Some(gram) = window.gram(size.len()) {
                    self.add(&gram);
                }
            }
        }
    }

    /// Offline pruning pass, run at most once before the profile is merged:
    /// drops rare grams, then drops all Latin grams when retained
    /// single-Latin-letter mass is a small minority.
    pub fn omit_less_freq(&mut self) {
        if self.name.is_none() {
            return;
        }
        let threshold =
            (self.n_words[GramSize::Uni as usize] / LESS_FREQ_RATIO).max(MINIMUM_FREQ as u64);

        let mut roman: u64 = 0;
        let n_words = &mut self.n_words;
        self.freq.retain(|gram, count| {
            if (*count as u64) <= threshold {
                if let Some(size) = GramSize::of_chars(gram.chars().count()) {
                    n_words[size as usize] -= *count as u64;
                }
                return false;
            }
            let mut chars = gram.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                if ch.is_ascii_alphabetic() {
                    roman += *count as u64;
                }
            }
            true
        });

        if roman < self.n_words[GramSize::Uni as usize] / 3 {
            let n_words = &mut self.n_words;
            self.freq.retain(|gram, count| {
                if gram.chars().any(|ch| ch.is_ascii_alphabetic()) {
                    if let Some(size) = GramSize::of_chars(gram.chars().count()) {
                        n_words[size as usize] -= *count as u64;
                    }
                    return false;
                }
                true
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LangProfile;

    #[test]
    fn test_unnamed_profile() {
        let profile = LangProfile::default();
        assert_eq!(profile.name, None);
    }

    #[test]
    fn test_named_profile() {
        let profile = LangProfile::new("en");
        assert_eq!(profile.name.as_deref(), Some("en"));
    }

    #[test]
    fn test_add() {
        let mut profile = LangProfile::new("en");
        profile.add("a");
        assert_eq!(profile.freq.get("a"), Some(&1));
        profile.add("a");
        assert_eq!(profile.freq.get("a"), Some(&2));
        profile.omit_less_freq();
    }

    #[test]
    fn test_add_unnamed_is_noop() {
        let mut profile = LangProfile::default();
        profile.add("a");
        assert_eq!(profile.freq.get("a"), None);
    }

    #[test]
    fn test_add_out_of_range_is_noop() {
        let mut profile = LangProfile::new("en");
        profile.add("a");
        profile.add("");
        profile.add("abcd");
        assert_eq!(profile.freq.get("a"), Some(&1));
        assert_eq!(profile.freq.get(""), None);
        assert_eq!(profile.freq.get("abcd"), None);
        assert_eq!(profile.n_words, [1, 0, 0]);
    }

    #[test]
    fn test_omit_less_freq() {
        let mut profile = LangProfile::new("en");
        let grams = "a b c \u{3042} \u{3044} \u{3046} \u{3048} \u{304A} \u{304B} \u{304C} \u{304D} \u{304E} \u{304F}";
        for _ in 0..5 {
            for gram in grams.split(' ') {
                profile.add(gram);
            }
        }
        profile.add("\u{3050}");

        assert_eq!(profile.freq.get("a"), Some(&5));
        assert_eq!(profile.freq.get("\u{3042}"), Some(&5));
        assert_eq!(profile.freq.get("\u{3050}"), Some(&1));
        profile.omit_less_freq();
        // rare gram dropped, then the Latin minority dropped entirely
        assert_eq!(profile.freq.get("a"), None);
        assert_eq!(profile.freq.get("\u{3042}"), Some(&5));
        assert_eq!(profile.freq.get("\u{3050}"), None);
    }

    #[test]
    fn test_omit_less_freq_unnamed_is_noop() {
        let mut profile = LangProfile::default();
        profile.omit_less_freq();
    }

    #[test]
    fn test_json_round_trip() {
        let mut profile = LangProfile::new("en");
        for gram in "a a a b b c".split(' ') {
            profile.add(gram);
        }
        let json = serde_json::to_string(&profile).unwrap();
        let restored: LangProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.name, profile.name);
        assert_eq!(restored.n_words, profile.n_words);
        assert_eq!(restored.freq, profile.freq);
    }
}
