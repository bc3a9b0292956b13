//! Client binary abstraction for dependency injection.
//!
//! The completion engine learns its vocabulary by asking the client binary to
//! describe itself. This trait lets tests substitute a scripted source instead
//! of spawning a real process.

use async_trait::async_trait;
use eyre::{Context, Result, eyre};
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::process::Command;

/// Pseudo-subcommand that makes the client print its flags and subcommands
pub const BASH_COMPLETION_ARG: &str = "bash-completion";

/// Source of the raw vocabulary line
#[async_trait]
pub trait VocabularySource: Send + Sync {
    /// Return the raw space-separated vocabulary line
    async fn fetch_vocabulary(&self) -> Result<String>;
}

/// Runs `<program> bash-completion` with a strict timeout
#[derive(Debug, Clone)]
pub struct ClientBinary {
    program: String,
    timeout: Duration,
}

impl ClientBinary {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl VocabularySource for ClientBinary {
    async fn fetch_vocabulary(&self) -> Result<String> {
        let child = Command::new(&self.program)
            .arg(BASH_COMPLETION_ARG)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn '{}'", self.program))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| eyre!("'{}' did not answer within {:?}", self.program, self.timeout))?
            .with_context(|| format!("Failed to wait for '{}'", self.program))?;

        if !output.status.success() {
            return Err(eyre!("'{} {}' exited with {}", self.program, BASH_COMPLETION_ARG, output.status));
        }

        Ok(first_line(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// First non-blank line of the client's output
fn first_line(stdout: &str) -> String {
    let mut lines = stdout.lines().filter(|l| !l.trim().is_empty());
    let first = lines.next().unwrap_or("").to_string();
    let extra = lines.count();
    if extra > 0 {
        log::debug!("Ignoring {extra} extra line(s) of vocabulary output");
    }
    first
}

/// Mock implementation for testing
pub struct MockVocabularySource {
    responses: Arc<Mutex<Vec<Result<String>>>>,
    fallback: String,
    calls: AtomicUsize,
}

impl MockVocabularySource {
    /// Always answer with `line`
    pub fn new(line: &str) -> Self {
        MockVocabularySource {
            responses: Arc::new(Mutex::new(Vec::new())),
            fallback: line.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a one-off response that is served before the fallback line
    pub fn then(self, response: Result<String>) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VocabularySource for MockVocabularySource {
    async fn fetch_vocabulary(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut queued = self.responses.lock().unwrap();
        if queued.is_empty() {
            Ok(self.fallback.clone())
        } else {
            queued.remove(0)
        }
    }
}
