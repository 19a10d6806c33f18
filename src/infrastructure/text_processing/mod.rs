mod pdf_adapter;
mod snowball_normalizer;
mod text_sanitizer;

pub use pdf_adapter::PdfAdapter;
pub use snowball_normalizer::SnowballNormalizer;
pub use text_sanitizer::sanitize_page_text;
