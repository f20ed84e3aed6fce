use crate::error::Result;
use crate::suite::TestSuite;
use std::path::Path;

/// Common interface of every test-file backend.
///
/// A backend knows how to parse its own file format into a [`TestSuite`] and how to
/// evaluate the bodies of its test cases. Grading itself is done by the suite.
pub trait TestFile: Sized {
    /// What a test case needs to be evaluated.
    type Body;
    /// Context shared by every case of one run.
    type Environment;

    fn from_file(path: impl AsRef<Path>) -> Result<Self>;

    /// Evaluates every test case in order against `global_environment`, recording exactly
    /// one result per case in the suite.
    ///
    /// Cases run one after the other and may observe the side effects of the previous ones.
    /// A case that cannot be evaluated is recorded as failed; errors are reserved for
    /// misuse, like running a suite that already has all its results.
    fn run(&mut self, global_environment: &mut Self::Environment) -> Result<()>;

    fn suite(&self) -> &TestSuite<Self::Body>;

    fn passed_all(&self) -> bool {
        self.suite().passed_all()
    }

    fn grade(&self) -> f64 {
        self.suite().grade()
    }
}
