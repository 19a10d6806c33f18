use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

use crate::application::ports::TextNormalizer;
use crate::domain::{Language, NormalizedContext};

const SPANISH_STOPWORDS: &str = include_str!("stopwords/spanish.txt");
const ENGLISH_STOPWORDS: &str = include_str!("stopwords/english.txt");

/// Tokenize, keep purely alphabetic words, lowercase, drop stopwords, stem
/// with the Snowball algorithm of the configured language, join with single
/// spaces.
pub struct SnowballNormalizer {
    language: Language,
    stemmer: Stemmer,
    stopwords: HashSet<&'static str>,
}

impl SnowballNormalizer {
    pub fn new(language: Language) -> Self {
        let (algorithm, stopword_list) = match language {
            Language::Spanish => (Algorithm::Spanish, SPANISH_STOPWORDS),
            Language::English => (Algorithm::English, ENGLISH_STOPWORDS),
        };

        let stopwords = stopword_list
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            language,
            stemmer: Stemmer::create(algorithm),
            stopwords,
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

impl TextNormalizer for SnowballNormalizer {
    fn language(&self) -> Language {
        self.language
    }

    fn normalize(&self, text: &str) -> NormalizedContext {
        let stems: Vec<String> = text
            .unicode_words()
            .filter(|token| token.chars().all(is_letter))
            .map(str::to_lowercase)
            .filter(|token| !self.is_stopword(token))
            .map(|token| self.stemmer.stem(&token).into_owned())
            // A stem may collapse onto a stopword ("cuáles" -> "cual").
            .filter(|stem| !stem.is_empty() && !self.is_stopword(stem))
            .collect();

        NormalizedContext::new(stems.join(" "))
    }
}

/// Letter numbers such as roman numerals carry the Alphabetic property but
/// are numerals, not words.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}
