use std::sync::OnceLock;

use regex::Regex;

use crate::config::{ConfigError, ParserConfig};
use crate::keyword::{cut, KeywordSet};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_percentage, r"[0-9]{1,3}%");
re!(re_whitespace, r"\s+");

// ── Extraction ───────────────────────────────────────────────────────────────

/// Fields pulled out of one offer line, sentinels already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedOffer {
    pub percentage: String,
    pub merchant: String,
    pub card: String,
}

pub struct Extractor {
    cards: KeywordSet,
    banks: KeywordSet,
    noise: Regex,
    unknown_label: String,
}

impl Extractor {
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            cards: KeywordSet::new(config.card_keywords.as_slice())?,
            banks: KeywordSet::new(config.bank_keywords.as_slice())?,
            noise: Regex::new(&config.noise_pattern)?,
            unknown_label: config.unknown_label.clone(),
        })
    }

    /// `None` only when the line carries no percentage; every other gap
    /// degrades to the unknown label.
    pub fn extract(&self, line: &str) -> Option<ExtractedOffer> {
        let (percentage, remaining) = take_percentage(line)?;
        let (card, remaining) = self.take_card(&remaining);
        let merchant = self.take_bank(&remaining);
        let merchant = self.clean_merchant(&merchant);

        Some(ExtractedOffer {
            percentage,
            merchant: self.or_unknown(merchant),
            card: self.or_unknown(card.unwrap_or_default()),
        })
    }

    /// First card keyword in declaration order; the keyword is dropped from
    /// the remainder and does not contribute to the merchant.
    pub fn take_card(&self, remaining: &str) -> (Option<String>, String) {
        match self.cards.first_match(remaining) {
            Some((keyword, range)) => (Some(keyword.label().to_string()), cut(remaining, range)),
            None => (None, remaining.to_string()),
        }
    }

    /// First bank keyword in declaration order. Unlike cards, the bank is
    /// moved to the front of the merchant text.
    pub fn take_bank(&self, remaining: &str) -> String {
        match self.banks.first_match(remaining) {
            Some((keyword, range)) => {
                format!("{} {}", keyword.label(), cut(remaining, range))
                    .trim()
                    .to_string()
            }
            None => remaining.to_string(),
        }
    }

    /// Strip noise words and leftover percentages, then squeeze whitespace.
    pub fn clean_merchant(&self, merchant: &str) -> String {
        let stripped = self.noise.replace_all(merchant, " ");
        re_whitespace().replace_all(&stripped, " ").trim().to_string()
    }

    fn or_unknown(&self, value: String) -> String {
        if value.is_empty() {
            self.unknown_label.clone()
        } else {
            value
        }
    }
}

/// First `NN%` on the line and the line with that occurrence removed.
pub fn take_percentage(line: &str) -> Option<(String, String)> {
    let m = re_percentage().find(line)?;
    Some((m.as_str().to_string(), cut(line, m.range())))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
