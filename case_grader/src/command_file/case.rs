use crate::command_file::environment::ExecutionEnvironment;
use crate::test_case::TestCaseResult;
use log::{debug, info, warn};
use std::{
    fmt::Display,
    io::{self, Write},
    process::{Output, Stdio},
    thread,
};

pub const PASSED_MESSAGE: &str = "✅ Test case passed";
pub const FAILED_MESSAGE: &str = "❌ Test case failed";

/// Body of a command test case: how to invoke the program and what it must produce.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CommandCase {
    // Configuration
    args: Vec<String>,
    stdin: Option<String>,
    // Expectation
    stdout: Option<String>,
    stderr: Option<String>,
    status: Option<i32>,
    // Feedback
    success_message: Option<String>,
    failure_message: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
struct Mismatch<T> {
    expected: T,
    obtained: Option<T>,
}

impl<T: Display> Mismatch<T> {
    fn describe(&self, what: &str) -> String {
        match &self.obtained {
            Some(obtained) => format!("{what}: expected '{}', obtained '{obtained}'", self.expected),
            None => format!("{what}: expected '{}', obtained nothing", self.expected),
        }
    }
}

fn escaped(s: &str) -> String {
    s.replace('\n', "\\n")
}

impl CommandCase {
    pub fn build(
        args: Vec<String>,
        stdin: Option<String>,
        stdout: Option<String>,
        stderr: Option<String>,
        status: Option<i32>,
    ) -> Result<Self, &'static str> {
        if stdout.is_none() && stderr.is_none() && status.is_none() {
            return Err("at least one expect field must be non-null (stdout, stderr, or status)");
        }

        Ok(Self {
            args,
            stdin,
            stdout,
            stderr,
            status,
            success_message: None,
            failure_message: None,
        })
    }

    /// Extra feedback appended to the message of a passed case.
    pub fn with_success_message(mut self, message: Option<String>) -> Self {
        self.success_message = message;
        self
    }

    /// Extra feedback shown right after the failure header, before the diagnostics.
    pub fn with_failure_message(mut self, message: Option<String>) -> Self {
        self.failure_message = message;
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn passed(&self, name: &str) -> TestCaseResult {
        let mut message = PASSED_MESSAGE.to_string();
        if let Some(ref extra) = self.success_message {
            message.push('\n');
            message.push_str(extra);
        }
        TestCaseResult::passed(name.to_string(), message)
    }

    fn failed(&self, name: &str, diagnostics: &[String]) -> TestCaseResult {
        let mut message = FAILED_MESSAGE.to_string();
        for d in self.failure_message.iter().chain(diagnostics) {
            message.push('\n');
            message.push_str(d);
        }
        TestCaseResult::failed(name.to_string(), message)
    }

    fn unreachable_expectations(&self) -> Vec<String> {
        let mut diagnostics = vec![];
        if let Some(ref expected) = self.stdout {
            diagnostics.push(
                Mismatch {
                    expected: escaped(expected),
                    obtained: None,
                }
                .describe("stdout"),
            );
        }
        if let Some(ref expected) = self.stderr {
            diagnostics.push(
                Mismatch {
                    expected: escaped(expected),
                    obtained: None,
                }
                .describe("stderr"),
            );
        }
        if let Some(expected) = self.status {
            diagnostics.push(
                Mismatch {
                    expected,
                    obtained: None,
                }
                .describe("status"),
            );
        }
        diagnostics
    }

    /// Diagnostics for every expectation `output` does not meet.
    fn compare(&self, output: &Output) -> Vec<String> {
        let mut diagnostics = vec![];

        if let Some(expected) = self.status {
            let obtained = output.status.code();
            if obtained != Some(expected) {
                debug!("  ❌ Failed status assertion.");
                debug!("   -📋 Expected: {expected}");
                debug!("   -📊 Obtained: {obtained:?}");
                diagnostics.push(Mismatch { expected, obtained }.describe("status"));
            }
        }

        if let Some(ref expected) = self.stdout
            && output.stdout != expected.as_bytes()
        {
            let obtained = String::from_utf8_lossy(&output.stdout);
            debug!("  ❌ Failed stdout assertion.");
            debug!("   -📋 Expected: '{}'", escaped(expected));
            debug!("   -📊 Obtained: '{}'", escaped(&obtained));
            diagnostics.push(
                Mismatch {
                    expected: escaped(expected),
                    obtained: Some(escaped(&obtained)),
                }
                .describe("stdout"),
            );
        }

        if let Some(ref expected) = self.stderr
            && output.stderr != expected.as_bytes()
        {
            let obtained = String::from_utf8_lossy(&output.stderr);
            debug!("  ❌ Failed stderr assertion.");
            debug!("   -📋 Expected: '{}'", escaped(expected));
            debug!("   -📊 Obtained: '{}'", escaped(&obtained));
            diagnostics.push(
                Mismatch {
                    expected: escaped(expected),
                    obtained: Some(escaped(&obtained)),
                }
                .describe("stderr"),
            );
        }

        diagnostics
    }

    /// Runs the program of `environment` with this case's input and checks its output.
    ///
    /// Failing to spawn or to wait for the program fails the case.
    pub fn execute(&self, name: &str, environment: &ExecutionEnvironment) -> TestCaseResult {
        info!("🚀 Executing test case: '{name}'");
        let mut cmd = environment.new_cmd();
        debug!("Configuring command '{:?}'", cmd.get_program());
        debug!("- Adding args: '{:?}'", self.args);
        cmd.args(&self.args)
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(handler) => handler,
            Err(err) => {
                warn!("❌ Unable to execute '{}'", environment.program().name());
                debug!("💥 Error: '{err:?}'");
                let mut diagnostics = vec![format!(
                    "unable to execute '{}': {err}",
                    environment.program().name()
                )];
                diagnostics.extend(self.unreachable_expectations());
                return self.failed(name, &diagnostics);
            }
        };

        let mut writer = None;
        if let Some(ref stdin_content) = self.stdin
            && let Some(mut stdin) = child.stdin.take()
        {
            info!("📥 Injecting stdin");
            debug!("📝 stdin: '{}'", escaped(stdin_content));
            let stdin_content = stdin_content.clone();
            writer = Some(thread::spawn(move || {
                stdin.write_all(stdin_content.as_bytes())
            }));
        }

        let output = child.wait_with_output();
        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // the program exited without reading all of its input
                Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("stdin closed before it was fully written: {err}");
                }
                Ok(Err(err)) => warn!("⚠️  Unable to write stdin: {err}"),
                Err(_) => warn!("⚠️  The stdin writer panicked"),
            }
        }

        let output = match output {
            Ok(output) => output,
            Err(err) => {
                warn!("⏱️  Unable to wait for '{}' to finish", environment.program().name());
                debug!("💥 Error: '{err:?}'");
                let mut diagnostics = vec![format!(
                    "unable to wait for '{}': {err}",
                    environment.program().name()
                )];
                diagnostics.extend(self.unreachable_expectations());
                return self.failed(name, &diagnostics);
            }
        };
        debug!("Output details: {output:?}");

        let diagnostics = self.compare(&output);
        if diagnostics.is_empty() {
            info!("✅ Test case passed");
            self.passed(name)
        } else {
            info!("❌ Test case failed");
            self.failed(name, &diagnostics)
        }
    }
}
