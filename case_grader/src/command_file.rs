//! Test files whose cases run a program and check what it prints and returns.
//!
//! The file is JSON:
//!
//! ```json
//! {
//!     "name": "q1",
//!     "points": 4,
//!     "all_or_nothing": false,
//!     "cases": [
//!         { "name": "greets", "args": "--name world", "stdout": "hello world\n" },
//!         { "hidden": true, "points": 1, "stdin": "42\n", "status": 0,
//!           "success_message": "Nice!", "failure_message": "Read the number from stdin." }
//!     ]
//! }
//! ```
//!
//! Unnamed cases are called `<file name> - <position>`. The file-level `points` is the
//! budget shared by the cases that do not specify their own.

mod case;
mod environment;

pub use case::{CommandCase, FAILED_MESSAGE, PASSED_MESSAGE};
pub use environment::{ExecutableArtifact, ExecutionEnvironment};

use crate::error::{GradingError, Result};
use crate::suite::TestSuite;
use crate::test_case::TestCase;
use crate::test_file::TestFile;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
struct CaseSpecUnchecked {
    name: Option<String>,
    #[serde(default)]
    hidden: bool,
    points: Option<f64>,
    args: Option<String>,
    stdin: Option<String>,
    stdout: Option<String>,
    stderr: Option<String>,
    status: Option<i32>,
    success_message: Option<String>,
    failure_message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(try_from = "CaseSpecUnchecked")]
struct CaseSpec {
    name: Option<String>,
    hidden: bool,
    points: Option<f64>,
    args: Option<String>,
    stdin: Option<String>,
    stdout: Option<String>,
    stderr: Option<String>,
    status: Option<i32>,
    success_message: Option<String>,
    failure_message: Option<String>,
    #[serde(skip)]
    body: Option<CommandCase>,
}

impl CaseSpec {
    #[allow(clippy::too_many_arguments)]
    fn build(
        name: Option<String>,
        hidden: bool,
        points: Option<f64>,
        args: Option<String>,
        stdin: Option<String>,
        stdout: Option<String>,
        stderr: Option<String>,
        status: Option<i32>,
        success_message: Option<String>,
        failure_message: Option<String>,
    ) -> std::result::Result<Self, &'static str> {
        let split_args = match &args {
            Some(a) => shlex::split(a).ok_or("args must be a valid shell-like string")?,
            None => vec![],
        };
        let body = CommandCase::build(
            split_args,
            stdin.clone(),
            stdout.clone(),
            stderr.clone(),
            status,
        )?
        .with_success_message(success_message.clone())
        .with_failure_message(failure_message.clone());

        Ok(Self {
            name,
            hidden,
            points,
            args,
            stdin,
            stdout,
            stderr,
            status,
            success_message,
            failure_message,
            body: Some(body),
        })
    }
}

impl TryFrom<CaseSpecUnchecked> for CaseSpec {
    type Error = &'static str;

    fn try_from(value: CaseSpecUnchecked) -> std::result::Result<Self, Self::Error> {
        let CaseSpecUnchecked {
            name,
            hidden,
            points,
            args,
            stdin,
            stdout,
            stderr,
            status,
            success_message,
            failure_message,
        } = value;

        CaseSpec::build(
            name,
            hidden,
            points,
            args,
            stdin,
            stdout,
            stderr,
            status,
            success_message,
            failure_message,
        )
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
struct TestFileSpec {
    name: String,
    points: Option<f64>,
    #[serde(default)]
    all_or_nothing: bool,
    cases: Vec<CaseSpec>,
}

impl TestFileSpec {
    fn into_test_cases(self, path: &str) -> Result<Vec<TestCase<CommandCase>>> {
        let invalid = |reason: String| GradingError::InvalidTestFile {
            path: path.to_string(),
            reason,
        };
        if self.cases.is_empty() {
            return Err(invalid("at least one test case is expected".to_string()));
        }

        let mut names = HashSet::new();
        let mut test_cases = Vec::with_capacity(self.cases.len());
        for (i, spec) in self.cases.into_iter().enumerate() {
            let name = spec
                .name
                .unwrap_or_else(|| format!("{} - {}", self.name, i + 1));
            if !names.insert(name.clone()) {
                return Err(invalid(format!("duplicated test case name '{name}'")));
            }
            let body = spec
                .body
                .ok_or_else(|| invalid(format!("test case '{name}' has no body")))?;
            test_cases.push(TestCase::new(name, body, spec.hidden, spec.points));
        }
        Ok(test_cases)
    }
}

/// A test file whose cases run one program.
#[derive(Debug, PartialEq, Clone)]
pub struct CommandTestFile {
    suite: TestSuite<CommandCase>,
}

impl CommandTestFile {
    /// Parses `source` as the content of the test file at `path`.
    ///
    /// `path` is only used to identify the file in the suite and in errors.
    pub fn from_source(source: &str, path: &str) -> Result<Self> {
        let spec: TestFileSpec = serde_json::from_str(source).map_err(|source| {
            error!("unable to parse test file '{path}'");
            GradingError::Parse {
                path: path.to_string(),
                source,
            }
        })?;
        let name = spec.name.clone();
        let total_points = spec.points;
        let all_or_nothing = spec.all_or_nothing;
        let test_cases = spec.into_test_cases(path)?;
        debug!("Loaded {} test cases from '{path}'", test_cases.len());

        let suite = TestSuite::build(
            name,
            path.to_string(),
            test_cases,
            total_points,
            all_or_nothing,
        )?;
        Ok(Self { suite })
    }
}

impl TestFile for CommandTestFile {
    type Body = CommandCase;
    type Environment = ExecutionEnvironment;

    fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.to_string_lossy().replace('\\', "/");
        info!("📄 Loading test file '{display}'");
        let source = fs::read_to_string(path).map_err(|source| {
            error!("error while reading the test file '{display}'");
            GradingError::Io {
                path: display.clone(),
                source,
            }
        })?;
        Self::from_source(&source, &display)
    }

    fn run(&mut self, global_environment: &mut Self::Environment) -> Result<()> {
        if self.suite.pending().is_empty() {
            return Err(GradingError::SuiteComplete(self.suite.name().to_string()));
        }
        info!(
            "Running '{}' against '{}'",
            self.suite.name(),
            global_environment.program().name()
        );
        while let Some(tc) = self.suite.pending().first() {
            let result = tc.body().execute(tc.name(), global_environment);
            self.suite.record(result)?;
        }
        info!("----------------------------------------------------------");
        Ok(())
    }

    fn suite(&self) -> &TestSuite<CommandCase> {
        &self.suite
    }
}
