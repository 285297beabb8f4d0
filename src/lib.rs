pub mod calculator;
pub mod config;
pub mod error;
pub mod harness;

pub use calculator::{Number, TOLERANCE, add};
