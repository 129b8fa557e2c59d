//! Local key-value storage and the grade repository seam.

mod local_store;
mod repository;

pub use local_store::LocalStore;
pub use repository::{GradeRepository, MemoryRepository, StoreRepository};

/// Key the grade-entry feature stores the learner's grade set under.
pub const GRADES_KEY: &str = "bananasedu:grades";
