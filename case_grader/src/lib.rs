//! Grading of test files made of named, weighted test cases.
//!
//! A [`TestSuite`] holds the cases of one file, their resolved points and the results
//! recorded while running them. [`resolve_points`] turns optional weights into concrete
//! ones, and [`TestFile`] is the interface implemented by each file format and execution
//! backend, like [`command_file::CommandTestFile`].

pub mod command_file;
mod error;
mod points;
pub mod report;
mod suite;
mod test_case;
mod test_file;
#[cfg(test)]
mod utils;

pub use error::{GradingError, Result};
pub use points::{POINTS_EPSILON, resolve_points};
pub use suite::{SuiteState, TestSuite};
pub use test_case::{TestCase, TestCaseResult};
pub use test_file::TestFile;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LoggingMode {
    Silent,
    #[default]
    Normal,
    Verbose,
}

impl LoggingMode {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            LoggingMode::Silent => log::LevelFilter::Off,
            LoggingMode::Normal => log::LevelFilter::Warn,
            LoggingMode::Verbose => log::LevelFilter::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_logging_modes_to_levels() {
        assert_eq!(LoggingMode::default().level_filter(), log::LevelFilter::Warn);
        assert_eq!(LoggingMode::Silent.level_filter(), log::LevelFilter::Off);
        assert_eq!(LoggingMode::Verbose.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn should_deserialize_lowercase_logging_modes() {
        let mode: LoggingMode = serde_json::from_str(r#""verbose""#).unwrap();
        assert_eq!(mode, LoggingMode::Verbose);
    }
}
