use std::{io, path::PathBuf};

/// Every way loading, resolving, recording or grading a test file can fail.
#[derive(Debug, thiserror::Error)]
pub enum GradingError {
    #[error("invalid point value for test case '{test_case}': {value} (expected a finite non-negative number)")]
    InvalidPointType { test_case: String, value: f64 },

    #[error("invalid total points: {0} (expected a finite non-negative number)")]
    InvalidTotalPoints(f64),

    #[error("more points specified in test cases ({pre_specified}) than allowed for the test file ({total_points})")]
    BudgetExceeded {
        pre_specified: f64,
        total_points: f64,
    },

    #[error("division by zero while computing {0}")]
    DivisionGuard(&'static str),

    #[error("unexpected result for test case '{obtained}', expected a result for '{expected}'")]
    UnexpectedResult { expected: String, obtained: String },

    #[error("test suite '{0}' already has a result for every test case")]
    SuiteComplete(String),

    #[error("invalid test file '{path}': {reason}")]
    InvalidTestFile { path: String, reason: String },

    #[error("I/O error on '{path}'")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse test file '{path}'")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("path does not point to an executable: {0:?}")]
    InvalidExecutable(PathBuf),
}

pub type Result<T> = std::result::Result<T, GradingError>;
