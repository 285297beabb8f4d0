use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculator::Number;

/// What a scenario is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expectation {
    Exact(Number),
    Approx { value: Number, tolerance: f64 },
}

impl Expectation {
    /// `tolerance` overrides the scenario's own tolerance for approximate
    /// expectations; exact expectations ignore it.
    pub fn matches(&self, actual: Number, tolerance: Option<f64>) -> bool {
        match *self {
            Expectation::Exact(expected) => expected == actual,
            Expectation::Approx { value, tolerance: own } => {
                value.approx_eq(actual, tolerance.unwrap_or(own))
            }
        }
    }

    pub fn value(&self) -> Number {
        match *self {
            Expectation::Exact(value) | Expectation::Approx { value, .. } => value,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A fixed verification case for `add`.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub summary: &'static str,
    pub expected: Expectation,
    pub compute: fn() -> Vec<Number>,
}

impl Scenario {
    pub fn evaluate(&self) -> Vec<Number> {
        (self.compute)()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseOutcome {
    Passed,
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub name: String,
    pub summary: String,
    pub actual: Vec<Number>,
    pub outcome: CaseOutcome,
    pub execution_time_us: u64,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.outcome == CaseOutcome::Passed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyResult {
    pub property: String,
    pub samples: usize,
    pub seed: u64,
    pub holds: bool,
    pub counterexample: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Csv,
    Markdown,
    #[default]
    Console,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub total_cases: usize,
    pub passed_cases: usize,
    pub failed_cases: usize,
    pub execution_time_seconds: f64,
    pub results: Vec<CaseResult>,
    pub properties: Vec<PropertyResult>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total_cases: 0,
            passed_cases: 0,
            failed_cases: 0,
            execution_time_seconds: 0.0,
            results: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: CaseResult) {
        self.total_cases += 1;
        self.execution_time_seconds += result.execution_time_us as f64 / 1_000_000.0;

        match result.outcome {
            CaseOutcome::Passed => self.passed_cases += 1,
            CaseOutcome::Failed { .. } => self.failed_cases += 1,
        }

        self.results.push(result);
    }

    pub fn add_property(&mut self, property: PropertyResult) {
        self.properties.push(property);
    }

    pub fn all_passed(&self) -> bool {
        self.failed_cases == 0 && self.violated_properties() == 0
    }

    pub fn violated_properties(&self) -> usize {
        self.properties.iter().filter(|p| !p.holds).count()
    }

    /// Why the run failed, or `None` when it passed.
    pub fn failure_summary(&self) -> Option<String> {
        let cases = format!("{} of {} cases failed", self.failed_cases, self.total_cases);
        let properties = format!(
            "{} of {} properties violated",
            self.violated_properties(),
            self.properties.len()
        );
        match (self.failed_cases, self.violated_properties()) {
            (0, 0) => None,
            (_, 0) => Some(cases),
            (0, _) => Some(properties),
            _ => Some(format!("{}, {}", cases, properties)),
        }
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::TOLERANCE;

    fn case(name: &str, outcome: CaseOutcome) -> CaseResult {
        CaseResult {
            name: name.to_string(),
            summary: "2 + 2 = 4".to_string(),
            actual: vec![Number::Int(4)],
            outcome,
            execution_time_us: 500,
        }
    }

    #[test]
    fn test_exact_expectation_rejects_float_noise() {
        let expected = Expectation::Exact(Number::Int(4));
        assert!(expected.matches(Number::Int(4), None));
        assert!(!expected.matches(Number::Int(5), Some(10.0)));
    }

    #[test]
    fn test_approx_expectation_uses_override() {
        let expected = Expectation::Approx {
            value: Number::Float(6.2),
            tolerance: TOLERANCE,
        };
        assert!(expected.matches(Number::Float(6.20001), None));
        assert!(!expected.matches(Number::Float(6.25), None));
        assert!(expected.matches(Number::Float(6.25), Some(0.1)));
        assert_eq!(expected.to_string(), "6.2");
    }

    #[test]
    fn test_report_counts() {
        let mut report = RunReport::new();
        report.add_result(case("addition", CaseOutcome::Passed));
        report.add_result(case(
            "addition_zero",
            CaseOutcome::Failed {
                message: "Expected 5, but got 6".to_string(),
            },
        ));

        assert_eq!(report.total_cases, 2);
        assert_eq!(report.passed_cases, 1);
        assert_eq!(report.failed_cases, 1);
        assert!((report.execution_time_seconds - 0.001).abs() < 1e-12);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_failed_property_fails_report() {
        let mut report = RunReport::new();
        report.add_result(case("addition", CaseOutcome::Passed));
        assert!(report.all_passed());

        report.add_property(PropertyResult {
            property: "commutativity".to_string(),
            samples: 10,
            seed: 1,
            holds: false,
            counterexample: Some("1 + 2".to_string()),
        });
        assert!(!report.all_passed());
        assert_eq!(
            report.failure_summary().as_deref(),
            Some("1 of 1 properties violated")
        );
    }

    #[test]
    fn test_failure_summary() {
        let mut report = RunReport::new();
        report.add_result(case("addition", CaseOutcome::Passed));
        assert_eq!(report.failure_summary(), None);

        report.add_result(case(
            "addition_zero",
            CaseOutcome::Failed {
                message: "Expected 5, but got 6".to_string(),
            },
        ));
        assert_eq!(report.failure_summary().as_deref(), Some("1 of 2 cases failed"));

        report.add_property(PropertyResult {
            property: "associativity".to_string(),
            samples: 4,
            seed: 2,
            holds: false,
            counterexample: Some("(1 + 2) + 3".to_string()),
        });
        assert_eq!(
            report.failure_summary().as_deref(),
            Some("1 of 2 cases failed, 1 of 1 properties violated")
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&CaseOutcome::Passed).unwrap();
        assert_eq!(json, r#"{"status":"passed"}"#);
    }
}
