use crate::{Error, Result};
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs external programs on behalf of the desktop backends.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs `program` with `args` and returns its trimmed stdout.
    ///
    /// A non-zero exit status is an error.
    async fn run(&self, program: &str, args: &[String]) -> Result<String>;
}

/// Spawns real processes, killing any that outlive the timeout.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String> {
        log::debug!("Running {} {}", program, args.join(" "));

        let mut command = Command::new(program);
        command.args(args).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(output) => output.map_err(|e| Error::Command(format!("{}: {}", program, e)))?,
            Err(_) => {
                return Err(Error::Timeout {
                    program: program.to_string(),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            return Err(Error::Command(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
