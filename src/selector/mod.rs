//! Resolution of an ambiguous result via an external picker process.
//!
//! Candidates are handed to the picker one per line as
//! `{index}\t{path} (score: {score})` and the choice is read back by parsing
//! the leading index, so the original path is recovered losslessly no matter
//! what characters it contains.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

use crate::scanner::Candidate;

/// Resolves a multi-candidate result to a single choice, or to no choice.
pub trait Selector {
    fn select(&self, candidates: &[Candidate]) -> Result<Option<PathBuf>>;
}

/// Formats the line shown to the picker for one candidate.
pub fn label(index: usize, candidate: &Candidate) -> String {
    format!(
        "{index}\t{} (score: {:.1})",
        candidate.path.display(),
        candidate.score
    )
}

fn parse_choice(line: &str) -> Option<usize> {
    line.split('\t').next()?.trim().parse().ok()
}

/// Runs the configured picker command via `sh -c`, blocking until it exits.
/// A non-zero exit (e.g. a cancelled prompt) is "nothing chosen".
pub struct CommandSelector {
    command: String,
}

impl CommandSelector {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Selector for CommandSelector {
    fn select(&self, candidates: &[Candidate]) -> Result<Option<PathBuf>> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start selector '{}'", self.command))?;

        if let Some(mut stdin) = child.stdin.take() {
            for (index, candidate) in candidates.iter().enumerate() {
                if let Err(e) = writeln!(stdin, "{}", label(index, candidate)) {
                    // Pickers may close their input once a choice is made.
                    log::debug!("selector stopped reading input: {e}");
                    break;
                }
            }
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("selector '{}' failed", self.command))?;
        if !output.status.success() {
            log::debug!("selector exited with {}", output.status);
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }
        match parse_choice(line).and_then(|index| candidates.get(index)) {
            Some(candidate) => Ok(Some(candidate.path.clone())),
            None => bail!("selector returned an unrecognized line: {line:?}"),
        }
    }
}
