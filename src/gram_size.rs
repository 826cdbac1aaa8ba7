use strum_macros::{EnumCount, EnumIter};

pub(crate) const GRAM_MAX_LEN: usize = <GramSize as strum::EnumCount>::COUNT;

/// Classification features are character grams of length 1 to 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumCount, EnumIter)]
#[repr(usize)]
pub enum GramSize {
    Uni = 0,
    Bi = 1,
    Tri = 2,
}

impl GramSize {
    /// Gram length in chars.
    #[inline]
    pub const fn len(self) -> usize {
        self as usize + 1
    }

    #[inline]
    pub fn of_chars(chars: usize) -> Option<Self> {
        match chars {
            1 => Some(Self::Uni),
            2 => Some(Self::Bi),
            3 => Some(Self::Tri),
            _ => None,
        }
    }
}
