use case_grader::{
    LoggingMode, TestFile,
    command_file::{CommandTestFile, ExecutableArtifact, ExecutionEnvironment},
    report::{ReportFormat, SuiteReport},
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogArg {
    Silent,
    Normal,
    Verbose,
}

impl From<LogArg> for LoggingMode {
    fn from(value: LogArg) -> Self {
        match value {
            LogArg::Silent => LoggingMode::Silent,
            LogArg::Normal => LoggingMode::Normal,
            LogArg::Verbose => LoggingMode::Verbose,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

fn parse_env(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

#[derive(Parser, Debug)]
#[command(
    name = "casegrader",
    version,
    about,
    long_about = "Grade PROGRAM against the test cases of TEST_FILE."
)]
struct Cli {
    /// JSON test file.
    test_file: PathBuf,

    /// Program under test.
    program: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Show the messages of hidden test cases.
    #[arg(long)]
    show_hidden: bool,

    /// Log verbosity. `RUST_LOG` takes precedence.
    #[arg(long, value_enum, default_value_t = LogArg::Normal)]
    logging_mode: LogArg,

    /// Extra environment variable for the program, as KEY=VALUE.
    #[arg(long = "env", value_parser = parse_env)]
    envs: Vec<(String, String)>,

    /// Do not inherit the environment of this process.
    #[arg(long)]
    clear_env: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(LoggingMode::from(args.logging_mode).level_filter())
        .parse_default_env()
        .init();

    let mut test_file = CommandTestFile::from_file(&args.test_file)?;

    let program = ExecutableArtifact::build(args.program)?;
    let mut environment = ExecutionEnvironment::build(program)?
        .with_inherited_parent_envs(!args.clear_env);
    for (key, value) in args.envs {
        environment = environment.with_env(key, value);
    }

    test_file.run(&mut environment)?;
    log::info!(
        "Graded '{}': {:.2}",
        test_file.suite().name(),
        test_file.grade()
    );

    let report = SuiteReport::new(test_file.suite(), args.show_hidden);
    println!("{}", report.render(args.format.into())?);

    Ok(())
}
