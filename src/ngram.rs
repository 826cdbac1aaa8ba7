use crate::{
    gram_size::{GramSize, GRAM_MAX_LEN},
    vocabulary::Vocabulary,
};
use compact_str::CompactString;
use std::borrow::Cow;
use strum::IntoEnumIterator;

/// Per-character normalization applied before grams are buffered.
///
/// Control characters, digits and most punctuation become a space; ASCII
/// letters pass through; kana, bopomofo and hangul collapse to one
/// representative per script; Romanian comma-below letters canonicalize to
/// their cedilla forms; near-duplicate CJK ideographs fold to a canonical
/// form.
pub fn normalize(ch: char) -> char {
    match ch {
        // Basic Latin: letters only
        '\u{0000}'..='\u{007F}' => {
            if ch.is_ascii_alphabetic() {
                ch
            } else {
                ' '
            }
        }
        // Latin-1 Supplement, with a small excluded set
        '\u{0080}'..='\u{00FF}' => {
            if LATIN1_EXCLUDED.contains(&ch) {
                ' '
            } else {
                ch
            }
        }
        // Romanian comma-below => cedilla
        '\u{0219}' => '\u{015F}',
        '\u{021B}' => '\u{0163}',
        // Farsi yeh => Arabic yeh
        '\u{06CC}' => '\u{064A}',
        // Latin Extended Additional, upper part (Vietnamese)
        '\u{1EA0}'..='\u{1EFF}' => '\u{1EC3}',
        // General Punctuation
        '\u{2000}'..='\u{206F}' => ' ',
        // Hiragana
        '\u{3040}'..='\u{309F}' => '\u{3042}',
        // Katakana
        '\u{30A0}'..='\u{30FF}' => '\u{30A2}',
        // Bopomofo, Bopomofo Extended
        '\u{3100}'..='\u{312F}' | '\u{31A0}'..='\u{31BF}' => '\u{3105}',
        // CJK Unified Ideographs
        '\u{4E00}'..='\u{9FFF}' => fold_cjk(ch),
        // Hangul Syllables
        '\u{AC00}'..='\u{D7AF}' => '\u{AC00}',
        _ => ch,
    }
}

const LATIN1_EXCLUDED: &[char] = &['\u{00A0}', '\u{00AB}', '\u{00B0}', '\u{00BB}'];

/// Near-duplicate CJK ideographs folded to one canonical form. Sorted by
/// the first component.
const CJK_FOLD: &[(char, char)] = &[
    ('\u{4E03}', '\u{4E01}'),
    ('\u{4E24}', '\u{4E13}'),
    ('\u{4E25}', '\u{4E13}'),
];

#[inline]
fn fold_cjk(ch: char) -> char {
    match CJK_FOLD.binary_search_by_key(&ch, |&(from, _)| from) {
        Ok(i) => CJK_FOLD[i].1,
        Err(_) => ch,
    }
}

/// Rewrites (base letter, combining mark) pairs into the precomposed
/// Vietnamese codepoint. Profiles are trained on precomposed text, so
/// decomposed input would otherwise produce zero known grams.
pub fn compose_vietnamese(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| VI_MARKS.contains(&ch)) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        let composed = VI_BASES.iter().position(|&b| b == ch).and_then(|base| {
            let mark = VI_MARKS.iter().position(|m| Some(m) == chars.peek())?;
            Some(VI_COMPOSED[mark][base])
        });
        match composed {
            Some(composed) => {
                chars.next();
                out.push(composed);
            }
            None => out.push(ch),
        }
    }
    Cow::Owned(out)
}

const VI_MARKS: [char; 5] = ['\u{0300}', '\u{0301}', '\u{0303}', '\u{0309}', '\u{0323}'];

const VI_BASES: [char; 24] = [
    'A', 'E', 'I', 'O', 'U', 'Y', 'a', 'e', 'i', 'o', 'u', 'y', '\u{00C2}', '\u{00CA}',
    '\u{00D4}', '\u{00E2}', '\u{00EA}', '\u{00F4}', '\u{0102}', '\u{0103}', '\u{01A0}',
    '\u{01A1}', '\u{01AF}', '\u{01B0}',
];

/// Rows follow `VI_MARKS` (grave, acute, tilde, hook above, dot below),
/// columns follow `VI_BASES`.
const VI_COMPOSED: [[char; 24]; 5] = [
    [
        '\u{00C0}', '\u{00C8}', '\u{00CC}', '\u{00D2}', '\u{00D9}', '\u{1EF2}', '\u{00E0}',
        '\u{00E8}', '\u{00EC}', '\u{00F2}', '\u{00F9}', '\u{1EF3}', '\u{1EA6}', '\u{1EC0}',
        '\u{1ED2}', '\u{1EA7}', '\u{1EC1}', '\u{1ED3}', '\u{1EB0}', '\u{1EB1}', '\u{1EDC}',
        '\u{1EDD}', '\u{1EEA}', '\u{1EEB}',
    ],
    [
        '\u{00C1}', '\u{00C9}', '\u{00CD}', '\u{00D3}', '\u{00DA}', '\u{00DD}', '\u{00E1}',
        '\u{00E9}', '\u{00ED}', '\u{00F3}', '\u{00FA}', '\u{00FD}', '\u{1EA4}', '\u{1EBE}',
        '\u{1ED0}', '\u{1EA5}', '\u{1EBF}', '\u{1ED1}', '\u{1EAE}', '\u{1EAF}', '\u{1EDA}',
        '\u{1EDB}', '\u{1EE8}', '\u{1EE9}',
    ],
    [
        '\u{00C3}', '\u{1EBC}', '\u{0128}', '\u{00D5}', '\u{0168}', '\u{1EF8}', '\u{00E3}',
        '\u{1EBD}', '\u{0129}', '\u{00F5}', '\u{0169}', '\u{1EF9}', '\u{1EAA}', '\u{1EC4}',
        '\u{1ED6}', '\u{1EAB}', '\u{1EC5}', '\u{1ED7}', '\u{1EB4}', '\u{1EB5}', '\u{1EE0}',
        '\u{1EE1}', '\u{1EEE}', '\u{1EEF}',
    ],
    [
        '\u{1EA2}', '\u{1EBA}', '\u{1EC8}', '\u{1ECE}', '\u{1EE6}', '\u{1EF6}', '\u{1EA3}',
        '\u{1EBB}', '\u{1EC9}', '\u{1ECF}', '\u{1EE7}', '\u{1EF7}', '\u{1EA8}', '\u{1EC2}',
        '\u{1ED4}', '\u{1EA9}', '\u{1EC3}', '\u{1ED5}', '\u{1EB2}', '\u{1EB3}', '\u{1EDE}',
        '\u{1EDF}', '\u{1EEC}', '\u{1EED}',
    ],
    [
        '\u{1EA0}', '\u{1EB8}', '\u{1ECA}', '\u{1ECC}', '\u{1EE4}', '\u{1EF4}', '\u{1EA1}',
        '\u{1EB9}', '\u{1ECB}', '\u{1ECD}', '\u{1EE5}', '\u{1EF5}', '\u{1EAC}', '\u{1EC6}',
        '\u{1ED8}', '\u{1EAD}', '\u{1EC7}', '\u{1ED9}', '\u{1EB6}', '\u{1EB7}', '\u{1EE2}',
        '\u{1EE3}', '\u{1EF0}', '\u{1EF1}',
    ],
];

/// A 3-character sliding window over normalized text.
///
/// The window starts as a single space; a normalized space resets it, so two
/// consecutive spaces never buffer twice. A run of two or more uppercase
/// characters suppresses gram emission until the word ends.
pub(crate) struct GramWindow {
    buf: Vec<char>,
    capital_word: bool,
}

impl GramWindow {
    pub(crate) fn new() -> Self {
        Self {
            buf: vec![' '],
            capital_word: false,
        }
    }

    pub(crate) fn push(&mut self, ch: char) {
        let ch = normalize(ch);
        let last = self.buf[self.buf.len() - 1];
        if last == ' ' {
            self.buf.clear();
            self.buf.push(' ');
            self.capital_word = false;
            if ch == ' ' {
                return;
            }
        } else if self.buf.len() >= GRAM_MAX_LEN {
            self.buf.remove(0);
        }
        self.buf.push(ch);

        if ch.is_uppercase() {
            if last.is_uppercase() {
                self.capital_word = true;
            }
        } else {
            self.capital_word = false;
        }
    }

    /// The `n`-char suffix of the window, or [`None`] when the window is too
    /// short, a capitalized run is active, or a unigram would be a space.
    pub(crate) fn gram(&self, n: usize) -> Option<CompactString> {
        if self.capital_word {
            return None;
        }
        let len = self.buf.len();
        if n < 1 || n > GRAM_MAX_LEN || len < n {
            return None;
        }
        if n == 1 && self.buf[len - 1] == ' ' {
            return None;
        }
        Some(self.buf[len - n..].iter().collect())
    }
}

/// Extracts every vocabulary-known gram from `text` in discovery order,
/// duplicates included. Unknown grams carry zero information and are
/// dropped. Empty input or input with no known grams yields an empty vec.
pub fn extract_grams(text: &str, vocabulary: &Vocabulary) -> Vec<CompactString> {
    let text = compose_vietnamese(text);
    let mut grams = Vec::new();
    let mut window = GramWindow::new();
    for ch in text.chars() {
        window.push(ch);
        for size in GramSize::iter() {
            let Some(gram) = window.gram(size.len()) else {
                continue;
            };
            if vocabulary.contains_gram(&gram) {
                grams.push(gram);
            }
        }
    }
    grams
}

/// When Latin characters are a small minority of the text, strips them
/// before extraction. Returns [`None`] when the text is left untouched.
pub(crate) fn strip_minor_latin(text: &str) -> Option<String> {
    let is_latin = |ch: char| ('A'..='z').contains(&ch);
    let mut latin = 0usize;
    let mut non_latin = 0usize;
    for ch in text.chars() {
        if is_latin(ch) {
            latin += 1;
        } else if ch >= '\u{0300}' && !('\u{1E00}'..='\u{1EFF}').contains(&ch) {
            non_latin += 1;
        }
    }
    if latin * 2 >= non_latin {
        return None;
    }
    Some(text.chars().filter(|&ch| !is_latin(ch)).collect())
}
