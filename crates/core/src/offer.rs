use serde::{Deserialize, Serialize};

use crate::day::DayOfWeek;

/// Placeholder written into `merchant` / `card` when nothing was extracted.
pub const UNKNOWN: &str = "Unknown";

/// One promotion row recovered from a flyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRecord {
    /// The configured day token the row was listed under (e.g. `MARTES`).
    pub day: String,
    pub weekday: DayOfWeek,
    pub merchant: String,
    /// Always `\d{1,3}%`.
    pub discount_percent: String,
    pub card: String,
}

impl OfferRecord {
    /// Numeric value of `discount_percent`, e.g. `30` for `"30%"`.
    pub fn percent_value(&self) -> Option<u16> {
        self.discount_percent.strip_suffix('%')?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(percent: &str) -> OfferRecord {
        OfferRecord {
            day: "MARTES".to_string(),
            weekday: DayOfWeek::Tuesday,
            merchant: "Restobar".to_string(),
            discount_percent: percent.to_string(),
            card: UNKNOWN.to_string(),
        }
    }

    #[test]
    fn percent_value_parses_digits() {
        assert_eq!(record("30%").percent_value(), Some(30));
        assert_eq!(record("5%").percent_value(), Some(5));
        assert_eq!(record("100%").percent_value(), Some(100));
    }

    #[test]
    fn percent_value_none_for_malformed() {
        assert_eq!(record("30").percent_value(), None);
        assert_eq!(record("%").percent_value(), None);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = serde_json::to_value(record("30%")).unwrap();
        assert_eq!(json["discountPercent"], "30%");
        assert_eq!(json["weekday"], "tuesday");
        assert_eq!(json["day"], "MARTES");
        assert_eq!(json["card"], "Unknown");
    }
}
