pub mod lenient;
pub mod workout;

pub use workout::{MediaKind, MediaSource, PyramidSet, WorkoutRecord};
