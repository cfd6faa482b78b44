//! External runner configuration and invocation.
//!
//! The runner is an external collaborator: the selector hands it a
//! restrict-to-files argument and a title expression through an environment
//! variable, then gets out of the way. Standard streams are inherited so the
//! runner's interactive output passes straight through, and the child is
//! awaited with no timeout; cancellation is left to normal process-group
//! signal propagation.

use std::path::PathBuf;
use std::process::Command;

use cyretry_core::{Result, RetryError};
use cyretry_ledger::DEFAULT_LEDGER_PATH;
use tracing::debug;

use crate::filter::Selection;

/// How to invoke the external test runner.
///
/// Defaults mirror the production wiring: `yarn cypress run`, spec
/// restriction through `--spec`, and the title expression exported as
/// `CYPRESS_grep` (the `CYPRESS_` prefix is what makes the runner surface
/// it to its grep plugin as config).
///
/// Use the builder pattern to override:
///
/// ```
/// use cyretry_retry::RunnerConfig;
///
/// let config = RunnerConfig::new().program("npx");
/// assert_eq!(config.program, "npx");
/// ```
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Program to spawn.
    pub program: String,

    /// Arguments placed before the selection arguments.
    pub base_args: Vec<String>,

    /// Flag carrying the comma-joined spec list.
    pub spec_flag: String,

    /// Environment variable carrying the title expression.
    pub grep_env: String,

    /// Where the failure ledger lives.
    pub ledger_path: PathBuf,
}

impl RunnerConfig {
    /// Configuration with production defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the program to spawn.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the arguments placed before the selection arguments.
    pub fn base_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the spec-restriction flag.
    pub fn spec_flag(mut self, flag: impl Into<String>) -> Self {
        self.spec_flag = flag.into();
        self
    }

    /// Set the environment variable name for the title expression.
    pub fn grep_env(mut self, name: impl Into<String>) -> Self {
        self.grep_env = name.into();
        self
    }

    /// Set the ledger path.
    pub fn ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    /// Build the runner command for a selection.
    ///
    /// Argument order: base args, the spec restriction, then caller
    /// passthrough args last — passthrough can add runner flags but cannot
    /// displace the structural arguments.
    pub fn command(&self, selection: &Selection, passthrough: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .arg(&self.spec_flag)
            .arg(selection.spec_arg())
            .args(passthrough)
            .env(&self.grep_env, &selection.title_expression);
        cmd
    }

    /// Human-readable rendering of the invocation, for status output.
    pub fn render(&self, selection: &Selection, passthrough: &[String]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.base_args.iter().cloned());
        parts.push(self.spec_flag.clone());
        parts.push(selection.spec_arg());
        parts.extend(passthrough.iter().cloned());
        parts.join(" ")
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "yarn".into(),
            base_args: vec!["cypress".into(), "run".into()],
            spec_flag: "--spec".into(),
            grep_env: "CYPRESS_grep".into(),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
        }
    }
}

/// Spawn the runner with the selection applied and wait for it to finish.
///
/// Returns the child's exit code. A child killed by a signal, or one whose
/// exit code is unavailable, reports 1. A child that fails to spawn at all
/// is a [`RetryError::Spawn`] — deliberately distinct from "tests failed
/// again", which is a normal outcome expressed through the exit code.
pub fn run_retry(
    config: &RunnerConfig,
    selection: &Selection,
    passthrough: &[String],
) -> Result<i32> {
    debug!(
        program = %config.program,
        specs = %selection.spec_arg(),
        "invoking test runner"
    );
    let status = config
        .command(selection, passthrough)
        .status()
        .map_err(|err| RetryError::Spawn {
            program: config.program.clone(),
            source: err,
        })?;
    Ok(status.code().unwrap_or(1))
}
