//! Data-driven cases for the uniqueness engine.
//!
//! Every `.json` file under `cases/` is one [`TestCase`]: a document, the
//! rules to run over it, and the rendered errors (and optionally warnings)
//! the run must produce.

pub mod runner;
pub mod test_case;

pub use runner::TestRunner;
pub use test_case::{Expectation, TestCase};

/// Outcome of one case file.
#[derive(Debug, Clone)]
pub struct CaseReport {
    /// Path under `cases/` without the extension, e.g. `context/missing`
    pub name: String,
    pub description: String,
    /// The case pinned its warnings as well as its errors
    pub warnings_checked: bool,
    /// `None` when the case passed
    pub failure: Option<String>,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Directory the case lives in, e.g. `context`.
    pub fn group(&self) -> &str {
        self.name
            .rsplit_once(['/', '\\'])
            .map_or("", |(group, _)| group)
    }
}

/// Reports for a whole run, in case-name order.
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.passed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|case| !case.passed())
    }

    pub fn is_success(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }
}
