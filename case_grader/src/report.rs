//! Human and machine readable summaries of a graded suite.
//!
//! Only the read-only surface of [`TestSuite`] is used here: its name, `passed_all`,
//! `grade` and the ordered `(test case, result)` pairs.

use crate::suite::TestSuite;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Plain text summary: a one-liner when everything passed, the failure messages otherwise.
pub fn render_plain<B>(suite: &TestSuite<B>) -> String {
    if suite.passed_all() {
        return format!("{} passed!", suite.name());
    }
    let mut out = format!("{} results:", suite.name());
    for (_, result) in suite.results().filter(|(_, r)| !r.is_passed()) {
        out.push('\n');
        out.push_str(result.message());
    }
    out
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct CaseReport {
    pub name: String,
    pub hidden: bool,
    pub points: f64,
    pub passed: bool,
    /// `None` for passed cases and for hidden ones when hidden output is withheld.
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct SuiteReport {
    pub name: String,
    pub path: String,
    pub passed_all: bool,
    pub grade: f64,
    pub score: f64,
    pub max_score: f64,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn new<B>(suite: &TestSuite<B>, show_hidden: bool) -> Self {
        let cases = suite
            .results()
            .map(|(tc, r)| CaseReport {
                name: tc.name().to_string(),
                hidden: tc.hidden(),
                points: tc.weight(),
                passed: r.is_passed(),
                message: (!r.is_passed() && (show_hidden || !tc.hidden()))
                    .then(|| r.message().to_string()),
            })
            .collect();
        Self {
            name: suite.name().to_string(),
            path: suite.path().to_string(),
            passed_all: suite.passed_all(),
            grade: suite.grade(),
            score: suite.earned_points(),
            max_score: suite.possible_points(),
            cases,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Json => serde_json::to_string_pretty(self),
            ReportFormat::Text => {
                let mut out = format!(
                    "{}: {:.2}/{:.2} ({:.0}%)",
                    self.name,
                    self.score,
                    self.max_score,
                    self.grade * 100.0
                );
                for case in &self.cases {
                    let status = if case.passed { "passed" } else { "failed" };
                    out.push_str(&format!("\n  {} ({}): {status}", case.name, case.points));
                    if let Some(message) = &case.message {
                        for line in message.lines() {
                            out.push_str("\n    ");
                            out.push_str(line);
                        }
                    }
                }
                Ok(out)
            }
        }
    }
}
