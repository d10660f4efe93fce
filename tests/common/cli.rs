//! Helpers for driving the `rt` binary against a throwaway root.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// A temporary home with its own ticket root and config file.
pub struct RtWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl RtWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().join("rtckt");
        Self { temp_dir, root }
    }

    /// Path of a ticket file relative to the root.
    pub fn ticket(&self, project: &str, name: &str) -> PathBuf {
        let dir = if project.is_empty() {
            self.root.clone()
        } else {
            self.root.join(project)
        };
        dir.join(format!("{name}.json"))
    }

    pub fn read_ticket(&self, project: &str, name: &str) -> serde_json::Value {
        let text = std::fs::read_to_string(self.ticket(project, name)).expect("read ticket");
        serde_json::from_str(&text).expect("parse ticket")
    }

    fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("write config");
    }

    pub fn home(&self) -> &Path {
        self.temp_dir.path()
    }
}

pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Run `rt` with the workspace root and config, isolated from the user's.
pub fn run_rt<I, S>(workspace: &RtWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::cargo_bin("rt")
        .expect("rt binary")
        .args(args)
        .env("RTCKT_ROOT", &workspace.root)
        .env("RTCKT_CONFIG", workspace.config_path())
        .env("HOME", workspace.home())
        .env_remove("RUST_LOG")
        .output()
        .expect("run rt");

    let result = RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !result.status.success() {
        eprintln!("[{label}] rt failed\nstdout:\n{}\nstderr:\n{}", result.stdout, result.stderr);
    }
    result
}
