#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod quiz;
pub mod session;

pub use quiz::{QuestionDef, Quiz};
pub use session::{QuestionLayout, Snapshot, Summary, TopicStats};
