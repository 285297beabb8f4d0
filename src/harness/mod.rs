pub mod logger;
pub mod properties;
pub mod reports;
pub mod runner;
pub mod scenarios;
pub mod types;
