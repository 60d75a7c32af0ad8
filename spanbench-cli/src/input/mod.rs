//! Input handling module

pub mod scores;

pub use scores::find_score_files;
