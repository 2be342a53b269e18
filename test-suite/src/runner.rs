use anyhow::{Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{CaseReport, SuiteReport, TestCase};

pub struct TestRunner {
    cases_dir: PathBuf,
}

impl TestRunner {
    pub fn new(cases_dir: impl Into<PathBuf>) -> Self {
        Self {
            cases_dir: cases_dir.into(),
        }
    }

    /// Discover and run all test cases
    pub fn run_all(&self) -> Result<SuiteReport> {
        self.run_matching(None)
    }

    /// Run the cases whose name contains `filter`, or all of them.
    pub fn run_matching(&self, filter: Option<&str>) -> Result<SuiteReport> {
        let mut report = SuiteReport::default();

        for test_file in self.discover_test_files()? {
            let name = self.case_name(&test_file);
            if filter.is_some_and(|f| !name.contains(f)) {
                continue;
            }

            let case_report = match TestCase::load(&test_file, name.clone()) {
                Ok(test_case) => CaseReport {
                    failure: self.run_test_case(&test_case).err().map(|e| format!("{e:#}")),
                    name,
                    description: test_case.description,
                    warnings_checked: test_case.expect.warnings.is_some(),
                },
                Err(e) => CaseReport {
                    name,
                    description: String::new(),
                    warnings_checked: false,
                    failure: Some(format!("{e:#}")),
                },
            };
            report.cases.push(case_report);
        }

        Ok(report)
    }

    /// Discover all .json test files
    fn discover_test_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk_directory(&self.cases_dir, &mut files)?;
        files.sort();
        Ok(files)
    }

    fn walk_directory(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                self.walk_directory(&path, files)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(path);
            }
        }

        Ok(())
    }

    fn case_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.cases_dir)
            .unwrap_or(path)
            .with_extension("")
            .display()
            .to_string()
    }

    /// Run a single test case
    fn run_test_case(&self, test_case: &TestCase) -> Result<()> {
        let rules = test_case.rules()?;
        let output = unicity::validate(&test_case.document, test_case.reference(), &rules);

        let errors: Vec<String> = output.errors.iter().map(ToString::to_string).collect();
        if errors != test_case.expect.errors {
            bail!(
                "Error mismatch.\nExpected: {:#?}\nActual: {:#?}",
                test_case.expect.errors,
                errors
            );
        }
        if output.is_valid != errors.is_empty() {
            bail!("is_valid = {} but {} error(s) reported", output.is_valid, errors.len());
        }

        if let Some(expected) = &test_case.expect.warnings {
            let warnings: Vec<String> = output.warnings.iter().map(ToString::to_string).collect();
            if &warnings != expected {
                bail!(
                    "Warning mismatch.\nExpected: {:#?}\nActual: {:#?}",
                    expected,
                    warnings
                );
            }
        }

        Ok(())
    }
}
