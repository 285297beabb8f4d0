use std::fs;
use tracing::info;

use crate::error::HarnessResult;
use crate::harness::types::{CaseOutcome, ReportFormat, RunReport};

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Renders `report` and writes it to `output_path` when one is given.
    pub fn generate_report(
        &self,
        report: &RunReport,
        format: ReportFormat,
        output_path: Option<&str>,
    ) -> HarnessResult<String> {
        let rendered = match format {
            ReportFormat::Json => serde_json::to_string_pretty(report)?,
            ReportFormat::Csv => self.render_csv(report),
            ReportFormat::Markdown => self.render_markdown(report),
            ReportFormat::Console => self.render_console(report),
        };

        if let Some(path) = output_path {
            fs::write(path, &rendered)?;
            info!("{:?} report written to {}", format, path);
        }

        Ok(rendered)
    }

    fn render_csv(&self, report: &RunReport) -> String {
        let mut csv = String::from("name,summary,status,actual,execution_time_us\n");
        for result in &report.results {
            let actual = result
                .actual
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                csv_field(&result.name),
                csv_field(&result.summary),
                status(&result.outcome),
                csv_field(&actual),
                result.execution_time_us
            ));
        }
        csv
    }

    fn render_markdown(&self, report: &RunReport) -> String {
        let mut md = String::from("# Addition Test Report\n\n");
        md.push_str("## Summary\n\n");
        md.push_str(&format!(
            "- **Started:** {}\n",
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!("- **Total Cases:** {}\n", report.total_cases));
        md.push_str(&format!("- **Passed:** {}\n", report.passed_cases));
        md.push_str(&format!("- **Failed:** {}\n", report.failed_cases));
        md.push_str(&format!(
            "- **Execution Time:** {:.6}s\n\n",
            report.execution_time_seconds
        ));

        md.push_str("## Cases\n\n");
        md.push_str("| Case | Summary | Status | Detail |\n");
        md.push_str("|------|---------|--------|--------|\n");
        for result in &report.results {
            let detail = match &result.outcome {
                CaseOutcome::Passed => String::new(),
                CaseOutcome::Failed { message } => message.replace('|', "\\|"),
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                result.name,
                result.summary.replace('|', "\\|"),
                status(&result.outcome),
                detail
            ));
        }

        if !report.properties.is_empty() {
            md.push_str("\n## Properties\n\n");
            md.push_str("| Property | Samples | Seed | Holds | Counterexample |\n");
            md.push_str("|----------|---------|------|-------|----------------|\n");
            for property in &report.properties {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    property.property,
                    property.samples,
                    property.seed,
                    if property.holds { "yes" } else { "no" },
                    property.counterexample.as_deref().unwrap_or("")
                ));
            }
        }

        md
    }

    fn render_console(&self, report: &RunReport) -> String {
        let mut out = format!(
            "Cases: {} | Passed: {} | Failed: {} | Time: {:.6}s\n",
            report.total_cases,
            report.passed_cases,
            report.failed_cases,
            report.execution_time_seconds
        );
        for result in &report.results {
            if let CaseOutcome::Failed { message } = &result.outcome {
                out.push_str(&format!("  {}: {}\n", result.name, message));
            }
        }
        for property in &report.properties {
            out.push_str(&format!(
                "Property {}: {} ({} samples, seed {})\n",
                property.property,
                if property.holds { "held" } else { "violated" },
                property.samples,
                property.seed
            ));
        }
        out
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn status(outcome: &CaseOutcome) -> &'static str {
    match outcome {
        CaseOutcome::Passed => "passed",
        CaseOutcome::Failed { .. } => "failed",
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
