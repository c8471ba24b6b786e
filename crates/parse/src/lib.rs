pub mod classify;
pub mod config;
pub mod extract;
pub(crate) mod keyword;
pub mod normalize;
pub mod parser;

pub use classify::{LineClass, LineClassifier, ParseState};
pub use config::{ConfigError, ParserConfig};
pub use extract::{ExtractedOffer, Extractor};
pub use normalize::normalize_lines;
pub use parser::{default_parser, parse_offers_from_text, OfferParser, ParseStats};
