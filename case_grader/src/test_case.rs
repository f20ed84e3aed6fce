/// One gradable unit of a test file.
///
/// `body` is whatever the executing backend needs to evaluate the case; the grading core
/// never looks inside it. `points` is `None` until the case goes through
/// [`resolve_points`](crate::resolve_points), which fills it with the case's share of the
/// budget.
#[derive(Debug, PartialEq, Clone)]
pub struct TestCase<B> {
    name: String,
    body: B,
    hidden: bool,
    points: Option<f64>,
}

impl<B> TestCase<B> {
    pub fn new(name: String, body: B, hidden: bool, points: Option<f64>) -> Self {
        Self {
            name,
            body,
            hidden,
            points,
        }
    }

    /// Returns a copy of `self` carrying `points` instead of the current weight.
    pub fn with_points(self, points: f64) -> Self {
        Self {
            points: Some(points),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn points(&self) -> Option<f64> {
        self.points
    }

    /// Weight used for grading. An unresolved case weighs nothing.
    pub fn weight(&self) -> f64 {
        self.points.unwrap_or(0.0)
    }
}

/// Outcome of evaluating one [`TestCase`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TestCaseResult {
    test_case: String,
    message: String,
    passed: bool,
}

impl TestCaseResult {
    pub fn new(test_case: String, message: String, passed: bool) -> Self {
        Self {
            test_case,
            message,
            passed,
        }
    }

    pub fn passed(test_case: String, message: String) -> Self {
        Self::new(test_case, message, true)
    }

    pub fn failed(test_case: String, message: String) -> Self {
        Self::new(test_case, message, false)
    }

    /// Name of the evaluated test case.
    pub fn test_case(&self) -> &str {
        &self.test_case
    }

    /// Diagnostic message. Only meaningful when the case did not pass.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }
}
