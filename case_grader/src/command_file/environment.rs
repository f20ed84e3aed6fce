//! The program under test and everything shared by the cases of one run.

use crate::error::{GradingError, Result};
use is_executable::is_executable;
use std::{
    path::{Path, PathBuf},
    process::Command,
};
use tempfile::TempDir;

/// Anything that can be executed, and thus tested, by a command test file.
///
/// # Caveats
/// - It is not necessarily a binary executable. Scripts with a shebang are valid too, as
///   long as the file is executable.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum ExecutableArtifact {
    CompiledProgram { name: String, path: PathBuf },
}

impl ExecutableArtifact {
    pub fn build(path: PathBuf) -> Result<Self> {
        if !path.is_file() || !is_executable(&path) {
            return Err(GradingError::InvalidExecutable(path));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(ExecutableArtifact::CompiledProgram { name, path })
    }

    pub fn new_cmd(&self) -> Command {
        match self {
            ExecutableArtifact::CompiledProgram { path, .. } => Command::new(path),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ExecutableArtifact::CompiledProgram { name, .. } => name,
        }
    }
}

#[derive(Debug)]
enum WorkingDir {
    Temporary(TempDir),
    Fixed(PathBuf),
}

/// Global environment of a command test file run.
///
/// Every case runs in the same working directory with the same environment variables, so
/// files written by one case are visible to the next ones.
#[derive(Debug)]
pub struct ExecutionEnvironment {
    program: ExecutableArtifact,
    envs: Vec<(String, String)>,
    inherit_parent_envs: bool,
    working_dir: WorkingDir,
}

impl ExecutionEnvironment {
    /// Creates an environment running `program` inside a fresh temporary directory.
    pub fn build(program: ExecutableArtifact) -> Result<Self> {
        let tmp_dir = tempfile::tempdir().map_err(|source| {
            log::error!("error while creating a temporary directory");
            GradingError::Io {
                path: std::env::temp_dir().to_string_lossy().into_owned(),
                source,
            }
        })?;
        Ok(Self {
            program,
            envs: vec![],
            inherit_parent_envs: true,
            working_dir: WorkingDir::Temporary(tmp_dir),
        })
    }

    pub fn with_env(mut self, key: String, value: String) -> Self {
        self.envs.push((key, value));
        self
    }

    pub fn with_inherited_parent_envs(mut self, inherit: bool) -> Self {
        self.inherit_parent_envs = inherit;
        self
    }

    /// Runs the cases in `dir` instead of the temporary directory.
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = WorkingDir::Fixed(dir);
        self
    }

    pub fn program(&self) -> &ExecutableArtifact {
        &self.program
    }

    pub fn working_dir(&self) -> &Path {
        match &self.working_dir {
            WorkingDir::Temporary(dir) => dir.path(),
            WorkingDir::Fixed(dir) => dir,
        }
    }

    /// Command for the program under test, configured with this environment.
    pub(crate) fn new_cmd(&self) -> Command {
        let mut cmd = self.program.new_cmd();
        if !self.inherit_parent_envs {
            cmd.env_clear();
        }
        cmd.current_dir(self.working_dir());
        cmd.envs(self.envs.iter().map(|e| (e.0.as_str(), e.1.as_str())));
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;
    use std::str::FromStr;

    #[test]
    fn should_build_a_valid_executable() {
        let path = utils::create_dummy_executable();
        let artifact = ExecutableArtifact::build(path.clone()).unwrap();
        assert_eq!(
            artifact.name(),
            path.file_name().unwrap().to_string_lossy().as_ref()
        );
    }

    #[test]
    fn should_fail_to_build_an_invalid_executable() {
        let err = ExecutableArtifact::build(PathBuf::from_str("invalid_path").unwrap())
            .unwrap_err();
        assert!(matches!(err, GradingError::InvalidExecutable(_)));
    }

    #[test]
    fn should_fail_to_build_from_a_directory() {
        // directories carry x bits too
        let dir = tempfile::tempdir().unwrap();
        let err = ExecutableArtifact::build(dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, GradingError::InvalidExecutable(ref p) if p == dir.path()));
    }

    #[test]
    fn should_run_inside_the_working_dir() {
        let artifact = ExecutableArtifact::build(utils::create_dummy_executable()).unwrap();
        let env = ExecutionEnvironment::build(artifact).unwrap();
        assert!(env.working_dir().is_dir());

        let cmd = env.new_cmd();
        assert_eq!(cmd.get_current_dir(), Some(env.working_dir()));
    }

    #[test]
    fn should_configure_the_environment_variables() {
        let artifact = ExecutableArtifact::build(utils::create_dummy_executable()).unwrap();
        let fixed = tempfile::tempdir().unwrap();
        let env = ExecutionEnvironment::build(artifact)
            .unwrap()
            .with_env("GREETING".to_string(), "hi".to_string())
            .with_inherited_parent_envs(false)
            .with_working_dir(fixed.path().to_path_buf());

        assert_eq!(env.working_dir(), fixed.path());
        let cmd = env.new_cmd();
        let envs: Vec<_> = cmd.get_envs().collect();
        assert!(envs.contains(&(
            std::ffi::OsStr::new("GREETING"),
            Some(std::ffi::OsStr::new("hi"))
        )));
    }
}
