use promoscan_core::DayOfWeek;

use crate::config::{ConfigError, ParserConfig};
use crate::keyword::KeywordSet;

/// Running scan state: the most recent day-marker seen, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    NoDay,
    Day(DayOfWeek),
}

impl ParseState {
    pub fn current_day(self) -> Option<DayOfWeek> {
        match self {
            ParseState::NoDay => None,
            ParseState::Day(day) => Some(day),
        }
    }

    /// Only a day-marker changes the state; the last one wins.
    pub fn observe(self, class: LineClass) -> Self {
        match class {
            LineClass::DayMarker(day) => ParseState::Day(day),
            LineClass::Header | LineClass::Candidate => self,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Header,
    DayMarker(DayOfWeek),
    Candidate,
}

pub struct LineClassifier {
    header_fragments: Vec<String>,
    day_names: [String; 7],
    days: KeywordSet,
}

impl LineClassifier {
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            header_fragments: config.header_fragments.clone(),
            day_names: config.day_names.clone(),
            days: KeywordSet::new(config.day_names.as_slice())?,
        })
    }

    /// Header fragments are checked first and case-sensitively, so a title
    /// line that happens to contain a day name never moves the state.
    pub fn classify(&self, line: &str) -> LineClass {
        if self.is_header(line) {
            return LineClass::Header;
        }
        match self.detect_day(line) {
            Some(day) => LineClass::DayMarker(day),
            None => LineClass::Candidate,
        }
    }

    /// The configured token for `day`, e.g. `MARTES` for Tuesday.
    pub fn day_label(&self, day: DayOfWeek) -> &str {
        &self.day_names[day.index()]
    }

    fn is_header(&self, line: &str) -> bool {
        self.header_fragments.iter().any(|f| line.contains(f.as_str()))
    }

    fn detect_day(&self, line: &str) -> Option<DayOfWeek> {
        self.days.first_index(line).and_then(DayOfWeek::from_index)
    }
}
