#![forbid(unsafe_code)]

pub mod answer;
pub mod model;
pub mod stats;
pub mod time;

pub use time::{Clock, QuestionTimer};
