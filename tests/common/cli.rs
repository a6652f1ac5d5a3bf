use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

#[derive(Debug)]
pub struct PmlRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl PmlRun {
    pub fn assert_success(&self, label: &str) {
        assert!(
            self.status.success(),
            "{label} failed\nstdout: {}\nstderr: {}",
            self.stdout,
            self.stderr
        );
    }
}

/// Isolated workspace: a fake HOME plus a project directory, so
/// tests never touch the real registry.
pub struct PmlWorkspace {
    pub temp_dir: TempDir,
    pub home: PathBuf,
    pub project_dir: PathBuf,
}

impl PmlWorkspace {
    pub fn new() -> Self {
        Self::with_project_dir("myco")
    }

    pub fn with_project_dir(name: &str) -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let home = temp_dir.path().join("home");
        let project_dir = temp_dir.path().join(name);
        fs::create_dir_all(&home).expect("home dir");
        fs::create_dir_all(&project_dir).expect("project dir");
        Self {
            temp_dir,
            home,
            project_dir,
        }
    }

    /// Path of the project's issues file.
    pub fn issues_path(&self) -> PathBuf {
        self.project_dir.join(".pm").join("issues.jsonl")
    }
}

pub fn run_pml<I, S>(workspace: &PmlWorkspace, args: I) -> PmlRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_pml_in(workspace, &workspace.project_dir, args)
}

pub fn run_pml_in<I, S>(workspace: &PmlWorkspace, cwd: &std::path::Path, args: I) -> PmlRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::cargo_bin("pml").expect("pml binary");
    cmd.current_dir(cwd);
    cmd.args(args);
    cmd.env("HOME", &workspace.home);
    cmd.env("PM_LITE_HOME", workspace.home.join(".pm_lite"));
    cmd.env_remove("PM_PROJECT_ID");
    cmd.env_remove("PM_OWNER");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");

    let output = cmd.output().expect("run pml");
    PmlRun {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: output.status,
    }
}

/// Extract the issue key from `pml create` text output.
///
/// The line looks like: `Created ○ MYCO-202503-001 [P3] [feature] ...`
pub fn created_key(run: &PmlRun) -> String {
    run.stdout
        .split_whitespace()
        .find(|w| w.contains('-') && w.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
        .unwrap_or_else(|| panic!("no key in output: {}", run.stdout))
        .to_string()
}
