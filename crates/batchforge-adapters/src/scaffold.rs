//! Maven archetype scaffold generator.
//!
//! Runs `mvn archetype:generate` non-interactively inside the request's
//! isolated directory and waits for it, bounded by a timeout. The base
//! project lands in `<parent>/<artifactId>`.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use batchforge_core::{
    application::{ApplicationError, ports::ScaffoldGenerator},
    domain::ProjectCoordinates,
    error::{BatchforgeError, ForgeResult},
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Output lines kept for the failure message.
const TAIL_LINES: usize = 20;

/// Which generator to run and which archetype it expands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldSettings {
    pub command: String,
    pub archetype_group_id: String,
    pub archetype_artifact_id: String,
    pub archetype_version: String,
    pub timeout_secs: u64,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            command: "mvn".into(),
            archetype_group_id: "com.marbl.declarative-batch".into(),
            archetype_artifact_id: "declarative-batch-archetype".into(),
            archetype_version: "0.0.1-SNAPSHOT".into(),
            timeout_secs: 300,
        }
    }
}

/// [`ScaffoldGenerator`] backed by the Maven archetype plugin.
#[derive(Debug, Clone)]
pub struct MavenArchetypeGenerator {
    settings: ScaffoldSettings,
    timeout: Duration,
}

impl MavenArchetypeGenerator {
    pub fn new(settings: ScaffoldSettings) -> Self {
        let timeout = Duration::from_secs(settings.timeout_secs);
        Self { settings, timeout }
    }

    /// Override the time budget with sub-second precision.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn settings(&self) -> &ScaffoldSettings {
        &self.settings
    }

    /// Arguments passed to the generator command.
    pub fn args(&self, coordinates: &ProjectCoordinates) -> Vec<String> {
        let s = &self.settings;
        vec![
            "archetype:generate".into(),
            format!("-DarchetypeGroupId={}", s.archetype_group_id),
            format!("-DarchetypeArtifactId={}", s.archetype_artifact_id),
            format!("-DarchetypeVersion={}", s.archetype_version),
            format!("-DgroupId={}", coordinates.group_id),
            format!("-DartifactId={}", coordinates.artifact_id),
            format!("-Dversion={}", coordinates.version),
            format!("-Dpackage={}", coordinates.package),
            "-DinteractiveMode=false".into(),
        ]
    }

    /// First line of `<command> --version`, to check the generator is runnable.
    pub fn tool_version(&self) -> ForgeResult<String> {
        let output = Command::new(&self.settings.command)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_failed(e))?;

        if !output.status.success() {
            return Err(self.failed(format!("'--version' exited with {}", output.status)));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn wait_with_deadline(&self, child: &mut Child) -> ForgeResult<ExitStatus> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    warn!(timeout = ?self.timeout, "Scaffold command timed out, killing it");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ApplicationError::ScaffoldTimedOut {
                        command: self.settings.command.clone(),
                        timeout_secs: self.timeout.as_secs(),
                    }
                    .into());
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(self.failed(format!("wait failed: {e}"))),
            }
        }
    }

    fn spawn_failed(&self, e: io::Error) -> BatchforgeError {
        if e.kind() == io::ErrorKind::NotFound {
            self.failed("command not found".to_string())
        } else {
            self.failed(e.to_string())
        }
    }

    fn failed(&self, reason: String) -> BatchforgeError {
        ApplicationError::ScaffoldFailed {
            command: self.settings.command.clone(),
            reason,
        }
        .into()
    }
}

impl Default for MavenArchetypeGenerator {
    fn default() -> Self {
        Self::new(ScaffoldSettings::default())
    }
}

impl ScaffoldGenerator for MavenArchetypeGenerator {
    #[instrument(skip_all, fields(artifact = %coordinates.artifact_id, cwd = %parent.display()))]
    fn generate(&self, coordinates: &ProjectCoordinates, parent: &Path) -> ForgeResult<PathBuf> {
        let args = self.args(coordinates);
        info!(command = %self.settings.command, "Running scaffold generator");
        debug!(?args, "Scaffold arguments");

        let mut child = Command::new(&self.settings.command)
            .args(&args)
            .current_dir(parent)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_failed(e))?;

        let stdout = child.stdout.take().map(|out| drain("stdout", out));
        let stderr = child.stderr.take().map(|err| drain("stderr", err));

        // On timeout the readers are left detached; a surviving grandchild may
        // still hold the pipes open.
        let status = self.wait_with_deadline(&mut child)?;
        let stdout_tail = collect(stdout);
        let stderr_tail = collect(stderr);

        if !status.success() {
            let tail = if stderr_tail.is_empty() {
                stdout_tail
            } else {
                stderr_tail
            };
            return Err(self.failed(format!("{status}\n{tail}").trim_end().to_string()));
        }

        let root = parent.join(&coordinates.artifact_id);
        if !root.is_dir() {
            return Err(self.failed(format!(
                "generator succeeded but {} was not created",
                root.display()
            )));
        }
        Ok(root)
    }
}

/// Read a child stream to the end, logging each line and keeping the tail.
fn drain<R: Read + Send + 'static>(stream: &'static str, reader: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut tail = VecDeque::with_capacity(TAIL_LINES);
        for line in BufReader::new(reader).lines().map_while(Result::ok) {
            debug!(target: "batchforge::scaffold", stream, "{line}");
            if tail.len() == TAIL_LINES {
                tail.pop_front();
            }
            tail.push_back(line);
        }
        Vec::from(tail).join("\n")
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
