use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

fn whitespace_regex() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex is valid"))
}

/// Счётчики под полем ввода
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    /// Длина в символах Unicode (scalar values), а не в байтах и не в
    /// UTF-16 единицах: эмодзи считается за один символ.
    pub char_count: usize,
    pub word_count: usize,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        TextStats {
            char_count: text.chars().count(),
            word_count: count_words(text),
        }
    }
}

/// Количество непустых фрагментов между пробельными символами
pub fn count_words(text: &str) -> usize {
    whitespace_regex()
        .split(text.trim())
        .filter(|word| !word.is_empty())
        .count()
}
