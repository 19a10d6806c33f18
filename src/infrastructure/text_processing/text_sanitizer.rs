use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<prefix>\p{Alphabetic})[-\x{00AD}][ \t]*\r?\n[ \t]*(?P<suffix>\p{Alphabetic})")
        .unwrap()
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Cleans the raw text of one PDF page: compatibility forms are folded
/// (ligatures, full-width letters), words hyphenated across a line break
/// are rejoined, soft hyphens vanish and all whitespace collapses to single
/// spaces.
pub fn sanitize_page_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");
    let without_soft_hyphens = de_hyphenated.replace('\u{00AD}', "");

    WHITESPACE_RUN
        .replace_all(&without_soft_hyphens, " ")
        .trim()
        .to_string()
}
