use std::sync::OnceLock;

use promoscan_core::{DayOfWeek, OfferRecord};
use serde::Serialize;

use crate::classify::{LineClass, LineClassifier, ParseState};
use crate::config::{ConfigError, ParserConfig};
use crate::extract::{ExtractedOffer, Extractor};
use crate::normalize::normalize_lines;

/// Line counters for one parse run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub lines: usize,
    pub headers: usize,
    pub day_markers: usize,
    pub candidates: usize,
    /// Candidates that produced no record (no day yet, or no percentage).
    pub dropped: usize,
    pub emitted: usize,
}

/// A compiled [`ParserConfig`]. Holds no per-run state, so one instance can
/// serve any number of concurrent callers.
pub struct OfferParser {
    classifier: LineClassifier,
    extractor: Extractor,
}

impl OfferParser {
    pub fn new(config: ParserConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: LineClassifier::new(&config)?,
            extractor: Extractor::new(&config)?,
        })
    }

    pub fn parse(&self, raw_text: &str) -> Vec<OfferRecord> {
        self.parse_with_stats(raw_text).0
    }

    /// Single pass over the normalized lines, threading the day state.
    pub fn parse_with_stats(&self, raw_text: &str) -> (Vec<OfferRecord>, ParseStats) {
        let mut stats = ParseStats::default();
        let mut records = Vec::new();

        normalize_lines(raw_text).fold(ParseState::default(), |state, line| {
            stats.lines += 1;
            let class = self.classifier.classify(line);
            match class {
                LineClass::Header => {
                    stats.headers += 1;
                    tracing::trace!(line, "header skipped");
                }
                LineClass::DayMarker(day) => {
                    stats.day_markers += 1;
                    tracing::trace!(line, %day, "day marker");
                }
                LineClass::Candidate => {
                    stats.candidates += 1;
                    match self.emit(state, line) {
                        Some(record) => records.push(record),
                        None => {
                            stats.dropped += 1;
                            tracing::trace!(line, "candidate dropped");
                        }
                    }
                }
            }
            state.observe(class)
        });

        stats.emitted = records.len();
        tracing::debug!(
            lines = stats.lines,
            emitted = stats.emitted,
            dropped = stats.dropped,
            "parsed flyer text"
        );
        (records, stats)
    }

    /// A record needs both a known day and a percentage on the line.
    fn emit(&self, state: ParseState, line: &str) -> Option<OfferRecord> {
        let day = state.current_day()?;
        let offer = self.extractor.extract(line)?;
        Some(self.record(day, offer))
    }

    fn record(&self, day: DayOfWeek, offer: ExtractedOffer) -> OfferRecord {
        OfferRecord {
            day: self.classifier.day_label(day).to_string(),
            weekday: day,
            merchant: offer.merchant,
            discount_percent: offer.percentage,
            card: offer.card,
        }
    }
}

/// Parser for the built-in vocabulary, compiled on first use.
pub fn default_parser() -> &'static OfferParser {
    static PARSER: OnceLock<OfferParser> = OnceLock::new();
    PARSER.get_or_init(|| {
        OfferParser::new(ParserConfig::default()).expect("default vocabulary must compile")
    })
}

/// Parse OCR text with the default vocabulary. Total: never fails, returns
/// fewer records for text it cannot use.
pub fn parse_offers_from_text(raw_text: &str) -> Vec<OfferRecord> {
    default_parser().parse(raw_text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
