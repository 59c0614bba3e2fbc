use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding shell scripts named `ansible` and
/// `ansible-playbook`, for use as `bin_dir` / `--bin-dir`.
///
/// Both scripts run the same body. Each invocation also appends its
/// arguments to `calls.log` in the same directory, so tests can check
/// whether anything was spawned.
pub struct FakeAnsible {
    dir: TempDir,
}

impl FakeAnsible {
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("create fake ansible dir");
        let log = dir.path().join("calls.log");
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$*\" >> '{}'\n{body}\n",
            log.display()
        );

        for name in ["ansible", "ansible-playbook"] {
            let path = dir.path().join(name);
            fs::write(&path, &script).expect("write fake ansible script");
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("make fake ansible executable");
        }

        Self { dir }
    }

    pub fn bin_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn calls_log(&self) -> PathBuf {
        self.dir.path().join("calls.log")
    }

    /// Argument lines of every recorded invocation.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_log())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
