//! Grade data and averaging rules.
//!
//! This module contains the types for a learner's grades:
//! - `Period` - the five grading periods (S1..S5)
//! - `SubjectRecord` - one subject's scores across the periods
//! - averaging helpers shared by every export format

mod average;
mod period;
mod record;

pub use average::*;
pub use period::*;
pub use record::*;
