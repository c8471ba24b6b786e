use promoscan_core::UNKNOWN;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Empty entry in {0}")]
    EmptyEntry(&'static str),
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Vocabulary driving the flyer parser.
///
/// `Default` carries the Spanish-language flyer vocabulary the parser was
/// built for; every list can be replaced from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    /// Case-sensitive fragments marking title and column-header lines.
    pub header_fragments: Vec<String>,
    /// Monday-first day tokens, matched case-insensitively.
    pub day_names: [String; 7],
    /// Payment cards, scanned in declaration order.
    pub card_keywords: Vec<String>,
    /// Banks, scanned in declaration order. A matched bank becomes the
    /// leading part of the merchant text.
    pub bank_keywords: Vec<String>,
    /// Regex whose matches are stripped from the merchant text.
    pub noise_pattern: String,
    /// Written into merchant/card when nothing was extracted.
    pub unknown_label: String,
}

pub const DEFAULT_NOISE_PATTERN: &str =
    r"(?i)\b(?:d[eé]bito|cr[eé]dito|dcto|dto|descuentos?|desc)\b\.?|[0-9]{1,3}\s*%";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_fragments: strings(&["DESCUENTOS", "COMERCIO", "MEDIO DE PAGO", "DÍA"]),
            day_names: [
                "LUNES".to_string(),
                "MARTES".to_string(),
                "MIÉRCOLES".to_string(),
                "JUEVES".to_string(),
                "VIERNES".to_string(),
                "SÁBADO".to_string(),
                "DOMINGO".to_string(),
            ],
            card_keywords: strings(&[
                "VISA",
                "MASTERCARD",
                "AMEX",
                "DINERS",
                "MAGNA",
                "CMR",
                "RIPLEY",
                "CENCOSUD",
            ]),
            bank_keywords: strings(&[
                "Banco de Chile",
                "Banco Chile",
                "BancoEstado",
                "Banco Estado",
                "Santander",
                "Scotiabank",
                "Itaú",
                "BCI",
                "Falabella",
                "Security",
                "BICE",
                "Consorcio",
            ]),
            noise_pattern: DEFAULT_NOISE_PATTERN.to_string(),
            unknown_label: UNKNOWN.to_string(),
        }
    }
}

impl ParserConfig {
    /// Parse a vocabulary from TOML. Missing keys fall back to the defaults.
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject entries that would match every line or never compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lists: [(&'static str, &[String]); 4] = [
            ("header_fragments", self.header_fragments.as_slice()),
            ("day_names", self.day_names.as_slice()),
            ("card_keywords", self.card_keywords.as_slice()),
            ("bank_keywords", self.bank_keywords.as_slice()),
        ];
        for (name, entries) in lists {
            if entries.iter().any(|e| e.trim().is_empty()) {
                return Err(ConfigError::EmptyEntry(name));
            }
        }
        if self.unknown_label.trim().is_empty() {
            return Err(ConfigError::EmptyEntry("unknown_label"));
        }
        regex::Regex::new(&self.noise_pattern)?;
        Ok(())
    }
}
