use crate::error::{GradingError, Result};
use crate::points::resolve_points;
use crate::test_case::{TestCase, TestCaseResult};
use log::{debug, warn};

/// Where a suite is in its run. It is never stored, only inferred from how many results
/// were recorded.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SuiteState {
    Unrun,
    Running,
    Complete,
}

/// The test cases of one test file and the results gathered while running them.
///
/// Results can only be appended, one per case and in case order, through
/// [`TestSuite::record`]. They are never reset.
#[derive(Debug, PartialEq, Clone)]
pub struct TestSuite<B> {
    name: String,
    path: String,
    test_cases: Vec<TestCase<B>>,
    all_or_nothing: bool,
    test_case_results: Vec<TestCaseResult>,
}

impl<B> TestSuite<B> {
    /// Creates a suite from cases whose points were already resolved.
    pub fn new(
        name: String,
        path: String,
        test_cases: Vec<TestCase<B>>,
        all_or_nothing: bool,
    ) -> Self {
        Self {
            name,
            path,
            test_cases,
            all_or_nothing,
            test_case_results: vec![],
        }
    }

    /// Resolves the points of `test_cases` against `total_points` and creates the suite.
    ///
    /// A resolution error aborts the construction, so a misconfigured suite never runs.
    pub fn build(
        name: String,
        path: String,
        test_cases: Vec<TestCase<B>>,
        total_points: Option<f64>,
        all_or_nothing: bool,
    ) -> Result<Self> {
        let test_cases = resolve_points(total_points, test_cases)?;
        Ok(Self::new(name, path, test_cases, all_or_nothing))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn test_cases(&self) -> &[TestCase<B>] {
        &self.test_cases
    }

    pub fn test_case_results(&self) -> &[TestCaseResult] {
        &self.test_case_results
    }

    pub fn all_or_nothing(&self) -> bool {
        self.all_or_nothing
    }

    pub fn state(&self) -> SuiteState {
        match self.test_case_results.len() {
            0 if !self.test_cases.is_empty() => SuiteState::Unrun,
            n if n >= self.test_cases.len() => SuiteState::Complete,
            _ => SuiteState::Running,
        }
    }

    /// Cases that do not have a result yet, in order.
    pub fn pending(&self) -> &[TestCase<B>] {
        &self.test_cases[self.test_case_results.len()..]
    }

    /// Appends the result of the next pending case.
    ///
    /// # Errors
    /// - [`GradingError::SuiteComplete`] when every case already has a result.
    /// - [`GradingError::UnexpectedResult`] when `result` does not belong to the next
    ///   pending case.
    pub fn record(&mut self, result: TestCaseResult) -> Result<()> {
        let Some(expected) = self.pending().first() else {
            return Err(GradingError::SuiteComplete(self.name.clone()));
        };
        if expected.name() != result.test_case() {
            return Err(GradingError::UnexpectedResult {
                expected: expected.name().to_string(),
                obtained: result.test_case().to_string(),
            });
        }
        debug!(
            "Recording result of '{}' in '{}': passed = {}",
            result.test_case(),
            self.name,
            result.is_passed()
        );
        self.test_case_results.push(result);
        Ok(())
    }

    /// Ordered `(test case, result)` pairs for the cases that already ran.
    pub fn results(&self) -> impl Iterator<Item = (&TestCase<B>, &TestCaseResult)> {
        self.test_cases.iter().zip(self.test_case_results.iter())
    }

    /// Whether every recorded result passed. An unrun suite passed all.
    pub fn passed_all(&self) -> bool {
        self.test_case_results.iter().all(TestCaseResult::is_passed)
    }

    /// Sum of the weights of every case.
    pub fn possible_points(&self) -> f64 {
        self.test_cases.iter().map(TestCase::weight).sum()
    }

    /// Sum of the weights of the cases that passed. Cases without a result count as
    /// failed.
    pub fn passed_points(&self) -> f64 {
        self.results()
            .filter(|(_, r)| r.is_passed())
            .map(|(tc, _)| tc.weight())
            .sum()
    }

    /// Like [`TestSuite::grade`], but reports a zero weighted denominator as an error
    /// instead of degrading to `0.0`.
    pub fn try_grade(&self) -> Result<f64> {
        if self.all_or_nothing {
            return Ok(if self.passed_all() { 1.0 } else { 0.0 });
        }
        let possible = self.possible_points();
        if possible == 0.0 {
            return Err(GradingError::DivisionGuard("weighted grade"));
        }
        Ok(self.passed_points() / possible)
    }

    /// Fraction of the suite earned, in `[0, 1]`.
    ///
    /// All-or-nothing suites get `1.0` only when every result passed. Weighted suites get
    /// the weight of the passed cases over the weight of every case. When the cases weigh
    /// nothing at all the grade is `0.0`.
    pub fn grade(&self) -> f64 {
        match self.try_grade() {
            Ok(grade) => grade,
            Err(err) => {
                warn!("grading '{}' with 0.0: {err}", self.name);
                0.0
            }
        }
    }

    /// Points earned out of [`TestSuite::possible_points`].
    pub fn earned_points(&self) -> f64 {
        self.grade() * self.possible_points()
    }
}
