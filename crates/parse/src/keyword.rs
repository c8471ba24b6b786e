use std::ops::Range;

use regex::{Regex, RegexBuilder};

/// A literal keyword matched case-insensitively (Unicode case folding).
#[derive(Debug, Clone)]
pub struct Keyword {
    label: String,
    pattern: Regex,
}

impl Keyword {
    pub fn new(label: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&regex::escape(label))
            .case_insensitive(true)
            .build()?;
        Ok(Self { label: label.to_string(), pattern })
    }

    /// The keyword as declared in the configuration.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        self.pattern.find(text).map(|m| m.range())
    }
}

/// Ordered keyword list. Declaration order decides ties, not line position.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Result<Self, regex::Error> {
        let keywords = labels
            .iter()
            .map(|l| Keyword::new(l.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keywords })
    }

    /// First keyword (in declaration order) that occurs anywhere in `text`.
    pub fn first_match(&self, text: &str) -> Option<(&Keyword, Range<usize>)> {
        self.keywords
            .iter()
            .find_map(|k| k.find(text).map(|range| (k, range)))
    }

    pub fn first_index(&self, text: &str) -> Option<usize> {
        self.keywords.iter().position(|k| k.find(text).is_some())
    }
}

/// `text` with the bytes in `range` cut out.
pub fn cut(text: &str, range: Range<usize>) -> String {
    let mut out = String::with_capacity(text.len() - range.len());
    out.push_str(&text[..range.start]);
    out.push_str(&text[range.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_matches_any_case() {
        let k = Keyword::new("VISA").unwrap();
        assert_eq!(k.find("Restobar Visa 30%"), Some(9..13));
        assert_eq!(k.find("pago con visa"), Some(9..13));
        assert_eq!(k.find("MASTERCARD"), None);
    }

    #[test]
    fn keyword_folds_accented_letters() {
        let k = Keyword::new("MIÉRCOLES").unwrap();
        assert!(k.find("miércoles 12").is_some());
    }

    #[test]
    fn keyword_escapes_metacharacters() {
        let k = Keyword::new("A.B").unwrap();
        assert!(k.find("axb").is_none());
        assert!(k.find("a.b").is_some());
    }

    #[test]
    fn first_match_uses_declaration_order() {
        let set = KeywordSet::new(&["MASTERCARD", "VISA"]).unwrap();
        // VISA appears first in the line, but MASTERCARD is declared first.
        let (k, range) = set.first_match("Visa o Mastercard").unwrap();
        assert_eq!(k.label(), "MASTERCARD");
        assert_eq!(range, 7..17);
        assert_eq!(set.first_index("Visa o Mastercard"), Some(0));
    }

    #[test]
    fn first_match_none_on_empty_set() {
        let set = KeywordSet::new::<&str>(&[]).unwrap();
        assert!(set.first_match("anything").is_none());
    }

    #[test]
    fn cut_removes_range() {
        assert_eq!(cut("Restobar Visa Dcto", 9..13), "Restobar  Dcto");
        assert_eq!(cut("abc", 0..3), "");
    }
}
