//! Data model for assignment rules and their derived occurrences.

pub mod format;
mod occurrence;
mod rule;
mod shift_type;
mod weekday;
mod window;

pub use occurrence::Occurrence;
pub use rule::{AssignmentKind, AssignmentRule, Pattern};
pub use shift_type::{ShiftTime, ShiftType};
pub use weekday::WeekdaySet;
pub use window::DateWindow;
