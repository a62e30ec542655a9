pub mod aggregator;
pub mod docx;
pub mod errors;
pub mod extractor;
pub mod layout;
pub mod pos;
pub mod reader;
pub mod tagger;
pub mod writer;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn get_version() -> &'static str {
    VERSION
}
