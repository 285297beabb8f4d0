use calculator::config::HarnessConfig;
use calculator::error::HarnessError;
use calculator::harness::reports::ReportGenerator;
use calculator::harness::runner::HarnessRunner;
use calculator::harness::scenarios;
use calculator::harness::types::{CaseOutcome, ReportFormat};
use tempfile::tempdir;

#[test]
fn test_full_run_passes_in_order() {
    let runner = HarnessRunner::new(HarnessConfig::default());
    let report = runner.run_all(&scenarios::all()).unwrap();

    let names: Vec<_> = report.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "addition",
            "addition_negative",
            "addition_zero",
            "addition_large_numbers",
            "addition_negative_both",
            "addition_floats",
            "addition_mixed_signs",
            "addition_zero_both",
            "addition_commutative",
            "addition_multiple",
        ]
    );
    assert!(report.results.iter().all(|r| r.outcome == CaseOutcome::Passed));
    assert!(report.all_passed());
}

#[test]
fn test_each_case_runs_independently() {
    let runner = HarnessRunner::new(HarnessConfig::default());
    for scenario in scenarios::all() {
        let result = runner.run_case(&scenario).unwrap();
        assert_eq!(result.name, scenario.name);
        assert!(result.passed());
    }
}

#[test]
fn test_selected_cases_only() {
    let names = vec!["addition_floats".to_string()];
    let selected = scenarios::select(scenarios::all(), &names).unwrap();

    let runner = HarnessRunner::new(HarnessConfig::default());
    let report = runner.run_all(&selected).unwrap();
    assert_eq!(report.total_cases, 1);
    assert_eq!(report.results[0].summary, "2.5 + 3.7 = 6.2");
}

#[test]
fn test_unknown_case_is_rejected() {
    let names = vec!["addition".to_string(), "multiply".to_string()];
    let err = scenarios::select(scenarios::all(), &names).err().unwrap();
    assert_eq!(err.to_string(), "Unknown case: multiply");
    assert!(matches!(err, HarnessError::UnknownCase(_)));
}

#[test]
fn test_run_with_properties_and_json_report() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("run.json");
    let path = path.to_str().unwrap();

    let config = HarnessConfig {
        property_samples: 200,
        property_seed: 11,
        report_format: ReportFormat::Json,
        report_output_path: Some(path.to_string()),
        ..Default::default()
    };
    let runner = HarnessRunner::new(config.clone());
    let report = runner.run_all(&scenarios::all()).unwrap();
    assert_eq!(report.properties.len(), 2);
    assert!(report.all_passed());

    ReportGenerator::new()
        .generate_report(&report, config.report_format, config.report_output_path.as_deref())
        .unwrap();

    let written = std::fs::read_to_string(path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["total_cases"], 10);
    assert_eq!(parsed["passed_cases"], 10);
    assert_eq!(parsed["results"][5]["actual"][0], 6.2);
    assert_eq!(parsed["properties"][0]["property"], "commutativity");
    assert_eq!(parsed["properties"][1]["seed"], 11);
}
