//! Keyboard-layout transliteration.
//!
//! Every layout is a table of the characters produced by the same physical
//! keys, in the same order. Remapping a character means finding its position
//! in the source table and emitting the character at that position in the
//! destination table. Characters outside the source table pass through.

use crate::catalog::types::Locale;

const LATIN: &str = "qwertyuiop[]\\asdfghjkl;'zxcvbnm,./`QWERTYUIOP{}|ASDFGHJKL:\"ZXCVBNM<>?~!@#$%^&*()_+";
const RUSSIAN: &str = "йцукенгшщзхъ\\фывапролджэячсмитьбю.ёЙЦУКЕНГШЩЗХЪ/ФЫВАПРОЛДЖЭЯЧСМИТЬБЮ,Ё!\"№;%:?*()_+";
const UKRAINIAN: &str = "йцукенгшщзхї\\фівапролджєячсмитьбю.'ЙЦУКЕНГШЩЗХЇ/ФІВАПРОЛДЖЄЯЧСМИТЬБЮ,₴!\"№;%:?*()_+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Latin,
    Russian,
    Ukrainian,
}

impl Layout {
    fn table(self) -> &'static str {
        match self {
            Layout::Latin => LATIN,
            Layout::Russian => RUSSIAN,
            Layout::Ukrainian => UKRAINIAN,
        }
    }

    /// `en`, `ru` and `uk` (also `ua`) are recognized.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Layout::Latin),
            "ru" => Some(Layout::Russian),
            "uk" | "ua" => Some(Layout::Ukrainian),
            _ => None,
        }
    }

    pub fn chars(self) -> impl Iterator<Item = char> {
        self.table().chars()
    }
}

pub fn translit(text: &str, from: Layout, to: Layout) -> String {
    if from == to {
        return text.to_string();
    }

    let source: Vec<char> = from.chars().collect();
    let target: Vec<char> = to.chars().collect();

    text.chars()
        .map(|c| match source.iter().position(|&s| s == c) {
            Some(i) => target.get(i).copied().unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Tag-addressed variant of [`translit`]; unknown layouts leave `text` as is.
pub fn translit_tagged(text: &str, from: &str, to: &str) -> String {
    match (Layout::from_tag(from), Layout::from_tag(to)) {
        (Some(from), Some(to)) => translit(text, from, to),
        _ => text.to_string(),
    }
}

/// Re-reads text typed on a Latin keyboard as if it had been typed in the
/// locale's native layout.
///
/// A locale tag doubles as the tag of its native layout.
pub fn from_latin(text: &str, locale: Locale) -> String {
    translit_tagged(text, "en", locale.tag())
}
