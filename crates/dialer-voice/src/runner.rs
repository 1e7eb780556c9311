use crate::error::VoiceError;
use std::future::Future;
use std::io::ErrorKind;
use std::process::ExitStatus;
use tokio::process::Command;
use tracing::{info, warn};

/// Agent host command used when `AGENT_COMMAND` is not set.
pub const DEFAULT_AGENT_COMMAND: &str = "dialer-agent";

/// Operating mode the host is started in for SIP calls.
pub const DEV_MODE: &str = "dev";

#[derive(Debug)]
pub enum RunOutcome {
    Exited(ExitStatus),
    /// Shutdown was requested (Ctrl+C for [`AgentRunner::run`]); the host
    /// was killed.
    Interrupted,
}

/// Launches the external agent-hosting process and waits for it.
#[derive(Debug, Clone)]
pub struct AgentRunner {
    program: String,
    args: Vec<String>,
}

impl AgentRunner {
    /// Splits a command line on whitespace. No shell quoting is applied.
    pub fn from_command_line(line: &str) -> Result<Self, VoiceError> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| VoiceError::Config("agent command is empty".to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The full argv that [`run`](Self::run) executes.
    pub fn command_line(&self, mode: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv.push(mode.to_string());
        argv
    }

    /// Runs the host until it exits or the operator presses Ctrl+C.
    pub async fn run(&self, mode: &str) -> Result<RunOutcome, VoiceError> {
        self.run_until(mode, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Runs the host until it exits or `shutdown` completes, killing it in
    /// the latter case.
    pub async fn run_until(
        &self,
        mode: &str,
        shutdown: impl Future<Output = ()>,
    ) -> Result<RunOutcome, VoiceError> {
        info!(command = %self.command_line(mode).join(" "), "starting agent host");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(mode)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    VoiceError::Agent(format!("agent command not found: {}", self.program))
                }
                _ => VoiceError::Agent(format!("failed to spawn {}: {}", self.program, e)),
            })?;

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| {
                    VoiceError::Agent(format!("failed to wait for agent host: {}", e))
                })?;
                info!(%status, "agent host exited");
                Ok(RunOutcome::Exited(status))
            }
            _ = shutdown => {
                match child.kill().await {
                    Ok(()) => info!("agent host stopped"),
                    Err(e) => warn!(error = %e, "failed to kill agent host"),
                }
                Ok(RunOutcome::Interrupted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_appends_mode() {
        let runner = AgentRunner::from_command_line("python agent.py").unwrap();
        assert_eq!(runner.command_line(DEV_MODE), vec!["python", "agent.py", "dev"]);
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            AgentRunner::from_command_line("   "),
            Err(VoiceError::Config(_))
        ));
    }

    #[tokio::test]
    async fn missing_program_reports_not_found() {
        let runner =
            AgentRunner::from_command_line("definitely-not-a-real-agent-host-7f3a").unwrap();
        match runner.run(DEV_MODE).await {
            Err(VoiceError::Agent(msg)) => assert!(msg.contains("not found"), "got: {}", msg),
            other => panic!("expected not-found error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_is_reported() {
        let runner = AgentRunner::from_command_line("true").unwrap();
        match runner.run(DEV_MODE).await.unwrap() {
            RunOutcome::Exited(status) => assert!(status.success()),
            RunOutcome::Interrupted => panic!("not interrupted"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shutdown_kills_running_host() {
        let runner = AgentRunner::from_command_line("sleep").unwrap();
        let started = std::time::Instant::now();

        // `sleep 30` would outlive the test; shutdown fires at once.
        let outcome = runner.run_until("30", async {}).await.unwrap();

        assert!(matches!(outcome, RunOutcome::Interrupted));
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
