use pidcat_core::adb::{Adb, AdbTarget};
use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::PathBuf;
use std::sync::OnceLock;
use tempfile::TempDir;

// Answers from files next to the invoked path, so one script serves every test.
const SCRIPT: &str = r#"#!/bin/sh
dir=$(dirname "$0")
echo "$*" >> "$dir/calls"
case "$*" in
    *"logcat -c"*) exit 0 ;;
    *"logcat -v"*) cat "$dir/logcat.txt" ;;
    *"shell ps"*) cat "$dir/ps.txt" ;;
    *"shell dumpsys"*) cat "$dir/dumpsys.txt" ;;
    *) exit 1 ;;
esac
"#;

static SCRIPT_DIR: OnceLock<TempDir> = OnceLock::new();

/// Write the executable once per test binary. Tests link to it instead of
/// writing their own so no test spawns a child while an executable is still
/// open for writing.
fn shared_script() -> PathBuf {
    let dir = SCRIPT_DIR.get_or_init(|| {
        let dir = tempfile::tempdir().expect("failed to create script dir");
        let path = dir.path().join("adb");
        fs::write(&path, SCRIPT).expect("failed to write fake adb");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to make fake adb executable");
        dir
    });
    dir.path().join("adb")
}

/// A stand-in `adb` binary that replays canned device output.
pub struct FakeAdb {
    dir: TempDir,
}

impl Default for FakeAdb {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeAdb {
    pub fn new() -> Self {
        let script = shared_script();
        let dir = tempfile::tempdir().expect("failed to create fake adb dir");
        symlink(&script, dir.path().join("adb")).expect("failed to link fake adb");

        let fake = Self { dir };
        fake.with_logcat("").with_ps("").with_dumpsys("")
    }

    pub fn with_logcat(self, text: &str) -> Self {
        self.write("logcat.txt", text)
    }

    pub fn with_ps(self, text: &str) -> Self {
        self.write("ps.txt", text)
    }

    pub fn with_dumpsys(self, text: &str) -> Self {
        self.write("dumpsys.txt", text)
    }

    fn write(self, name: &str, text: &str) -> Self {
        fs::write(self.dir.path().join(name), text).expect("failed to write fake adb data");
        self
    }

    pub fn adb(&self, target: AdbTarget) -> Adb {
        Adb::new(target).with_program(self.dir.path().join("adb").to_string_lossy())
    }

    /// Argument lists the fake was invoked with, oldest first.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
