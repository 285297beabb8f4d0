use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::calculator::Number;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::harness::logger::HarnessLogger;
use crate::harness::properties::{check_associative, check_commutative};
use crate::harness::types::{CaseOutcome, CaseResult, RunReport, Scenario};

pub struct HarnessRunner {
    config: HarnessConfig,
}

impl HarnessRunner {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Evaluates a scenario and records the outcome without logging it.
    #[instrument(skip(self, scenario), fields(case = scenario.name))]
    pub fn evaluate(&self, scenario: &Scenario) -> CaseResult {
        let start = Instant::now();
        let actual = scenario.evaluate();
        let matched = actual
            .iter()
            .all(|value| scenario.expected.matches(*value, Some(self.config.tolerance)));

        let outcome = if matched {
            CaseOutcome::Passed
        } else {
            let (expected, got) = describe_mismatch(scenario, &actual);
            CaseOutcome::Failed {
                message: format!("Expected {}, but got {}", expected, got),
            }
        };
        let elapsed = start.elapsed();
        debug!(?actual, ?outcome, ?elapsed, "Case evaluated");

        CaseResult {
            name: scenario.name.to_string(),
            summary: scenario.summary.to_string(),
            actual,
            outcome,
            execution_time_us: elapsed.as_micros() as u64,
        }
    }

    /// Runs one case on its own. A mismatch is returned as an error.
    pub fn run_case(&self, scenario: &Scenario) -> HarnessResult<CaseResult> {
        let result = self.evaluate(scenario);
        match &result.outcome {
            CaseOutcome::Passed => {
                HarnessLogger::pass_case(scenario.name, scenario.summary);
                Ok(result)
            }
            CaseOutcome::Failed { message } => {
                HarnessLogger::error_case(scenario.name, message);
                Err(mismatch(scenario, &result.actual))
            }
        }
    }

    /// Runs the cases strictly in order.
    ///
    /// With `fail_fast` the first mismatch ends the run and is returned as the
    /// error. Otherwise every case runs and failures are left in the report.
    pub fn run_all(&self, scenarios: &[Scenario]) -> HarnessResult<RunReport> {
        info!(cases = scenarios.len(), fail_fast = self.config.fail_fast, "Starting run");
        HarnessLogger::step(&format!("Running {} cases", scenarios.len()));

        let mut report = RunReport::new();
        for scenario in scenarios {
            let result = self.evaluate(scenario);
            match &result.outcome {
                CaseOutcome::Passed => HarnessLogger::pass_case(scenario.name, scenario.summary),
                CaseOutcome::Failed { message } => {
                    HarnessLogger::error_case(scenario.name, message);
                    if self.config.fail_fast {
                        return Err(mismatch(scenario, &result.actual));
                    }
                }
            }
            report.add_result(result);
        }

        self.check_properties(&mut report)?;

        match report.failure_summary() {
            None => HarnessLogger::info("✅ All tests passed!"),
            Some(summary) => {
                warn!(
                    failed = report.failed_cases,
                    violated = report.violated_properties(),
                    "Run finished with failures"
                );
                HarnessLogger::warn(&summary);
            }
        }
        Ok(report)
    }

    /// Samples the quantified properties when `property_samples` is non-zero.
    pub fn check_properties(&self, report: &mut RunReport) -> HarnessResult<()> {
        let samples = self.config.property_samples;
        if samples == 0 {
            return Ok(());
        }

        let seed = self.config.property_seed;
        HarnessLogger::step(&format!(
            "Checking properties over {} samples (seed {})",
            samples, seed
        ));
        for result in [
            check_commutative(samples, seed, self.config.tolerance),
            check_associative(samples, seed, self.config.tolerance),
        ] {
            match &result.counterexample {
                None => HarnessLogger::pass_case(
                    &result.property,
                    &format!("{} held for {} samples", result.property, samples),
                ),
                Some(counterexample) => {
                    HarnessLogger::error_case(&result.property, counterexample);
                    if self.config.fail_fast {
                        return Err(HarnessError::PropertyViolated {
                            property: result.property.clone(),
                            counterexample: counterexample.clone(),
                        });
                    }
                }
            }
            report.add_property(result);
        }
        Ok(())
    }
}

fn describe_mismatch(scenario: &Scenario, actual: &[Number]) -> (String, String) {
    let expected = match actual.len() {
        0 | 1 => scenario.expected.to_string(),
        2 => format!("both to equal {}", scenario.expected),
        _ => format!("all to equal {}", scenario.expected),
    };
    let got = if actual.is_empty() {
        "nothing".to_string()
    } else {
        actual
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" and ")
    };
    (expected, got)
}

fn mismatch(scenario: &Scenario, actual: &[Number]) -> HarnessError {
    let (expected, actual) = describe_mismatch(scenario, actual);
    HarnessError::Mismatch {
        case: scenario.name.to_string(),
        expected,
        actual,
    }
}
