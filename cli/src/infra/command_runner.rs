//! Infrastructure implementation of the `CommandRunner` port.

use std::os::fd::AsFd as _;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;

/// Production `CommandRunner` backed by `tokio::process`.
///
/// Children inherit stdio so package-manager prompts and progress reach the
/// terminal, and are killed if the runner future is dropped. With
/// `stdout_to_stderr` their stdout is joined to our stderr, keeping stdout
/// free for a JSON document.
pub struct TokioCommandRunner {
    stdout_to_stderr: bool,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(stdout_to_stderr: bool) -> Self {
        Self { stdout_to_stderr }
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        tracing::debug!(program, ?args, stdout_to_stderr = self.stdout_to_stderr, "spawning");
        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args).kill_on_drop(true);
        if self.stdout_to_stderr {
            let fd = std::io::stderr()
                .as_fd()
                .try_clone_to_owned()
                .context("duplicating stderr")?;
            cmd.stdout(Stdio::from(fd));
        }
        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))?;
        tracing::debug!(program, code = ?status.code(), "exited");
        Ok(status)
    }
}
