use test_suite::{SuiteReport, TestRunner};

fn run_cases() -> SuiteReport {
    TestRunner::new(concat!(env!("CARGO_MANIFEST_DIR"), "/cases"))
        .run_all()
        .expect("Failed to discover test cases")
}

#[test]
fn test_all_cases_pass() {
    let report = run_cases();

    let failures: Vec<String> = report
        .failures()
        .map(|case| {
            format!(
                "[FAIL] {} ({})\n  {}",
                case.name,
                case.description,
                case.failure.as_deref().unwrap_or_default()
            )
        })
        .collect();
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}

#[test]
fn test_every_group_has_cases() {
    let report = run_cases();
    for group in ["alternates", "basic", "context"] {
        assert!(
            report.cases.iter().any(|case| case.group() == group),
            "no cases under cases/{group}"
        );
    }
}

#[test]
fn test_cases_are_described() {
    let report = run_cases();
    let undescribed: Vec<&str> = report
        .cases
        .iter()
        .filter(|case| case.description.is_empty())
        .map(|case| case.name.as_str())
        .collect();
    assert!(undescribed.is_empty(), "cases without a description: {undescribed:?}");
}
