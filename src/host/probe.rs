//! Timeout-bounded execution of host inspection commands.

use anyhow::{Context, Result, bail};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::HOST_PROBE_TIMEOUT;

/// Builder for a single inspection command whose stdout is captured.
///
/// ```rust,no_run
/// use ue4_docker_config::host::probe::ProbeCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let version = ProbeCommand::new("docker")
///     .args(["version", "--format", "{{.Server.Version}}"])
///     .with_context("Querying Docker daemon version")
///     .execute()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ProbeCommand {
    program: String,
    args: Vec<String>,
    timeout_duration: Duration,
    context: Option<String>,
}

impl ProbeCommand {
    /// Start building a command for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout_duration: HOST_PROBE_TIMEOUT,
            context: None,
        }
    }

    /// Append arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Override the default timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Describe the command for log and error messages.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn describe(&self) -> String {
        format!("{} {}", self.program, self.args.join(" "))
    }

    /// Run the command and return its trimmed stdout.
    ///
    /// # Errors
    ///
    /// Fails if the program cannot be spawned, times out or exits unsuccessfully.
    pub async fn execute(self) -> Result<String> {
        let description = self.describe();
        match &self.context {
            Some(ctx) => tracing::debug!(target: "host", "({}) Executing command: {}", ctx, description),
            None => tracing::debug!(target: "host", "Executing command: {}", description),
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let Ok(result) = timeout(self.timeout_duration, cmd.output()).await else {
            bail!(
                "Command timed out after {} seconds: {}",
                self.timeout_duration.as_secs(),
                description
            );
        };
        let output = result.with_context(|| format!("Failed to execute {description}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} failed: {}", description, stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let result = ProbeCommand::new("definitely-not-a-real-program-ue4")
            .with_context("missing")
            .execute()
            .await;
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_trimmed_stdout() {
        let output = ProbeCommand::new("echo").args(["hello"]).execute().await.unwrap();
        assert_eq!(output, "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let result = ProbeCommand::new("sleep")
            .args(["5"])
            .timeout(Duration::from_millis(50))
            .execute()
            .await;
        assert!(result.unwrap_err().to_string().contains("timed out"));
    }
}
