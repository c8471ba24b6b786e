pub mod day;
pub mod offer;

pub use day::DayOfWeek;
pub use offer::{OfferRecord, UNKNOWN};
