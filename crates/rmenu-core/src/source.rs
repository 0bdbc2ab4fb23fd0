//! Dynamic candidate feeds.

use crate::error::{Error, Result};
use std::process::Command;
use tracing::debug;

/// A query-keyed candidate feed.
///
/// `generate` is **blocking**: the session calls it synchronously on every
/// query change and waits for the complete line list before filtering. A
/// hung generator therefore stalls the whole interactive session; hosts
/// that need cancellation should run the source off-thread and adapt it
/// behind this trait.
pub trait CandidateSource {
    fn generate(&mut self, query: &str) -> Result<Vec<String>>;
}

/// Runs an external command with the current query appended as the last
/// argument and reads its whole stdout.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl CandidateSource for CommandSource {
    fn generate(&mut self, query: &str) -> Result<Vec<String>> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(query)
            .output()
            .map_err(|source| Error::SourceSpawn {
                command: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::SourceExit {
                command: self.program.clone(),
                status: output.status,
            });
        }

        let lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_owned)
            .collect();
        debug!(query, lines = lines.len(), "generator produced candidates");
        Ok(lines)
    }
}
