pub mod constraints;
pub mod types;

pub use constraints::{check_dimension, validate_bounds, validate_school_size, MIN_STUDENTS};
pub use types::*;
