use crate::domain::{Language, NormalizedContext};

/// Reduces extracted text to a compact, language-specific token stream.
/// Implementations must be pure: the same text always yields the same
/// context.
pub trait TextNormalizer: Send + Sync {
    fn language(&self) -> Language;

    fn normalize(&self, text: &str) -> NormalizedContext;
}
