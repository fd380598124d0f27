pub mod content;
pub mod grading;
pub mod stats;
