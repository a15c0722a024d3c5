#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the style-guard binary.
#[macro_export]
macro_rules! style_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("style-guard"))
    };
}

/// Configuration with both external checkers turned off.
pub const CUSTOM_ONLY_CONFIG: &str = r#"
[checkers.pylint]
enabled = false

[checkers.pycodestyle]
enabled = false
"#;

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.style-guard.toml` in the fixture root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".style-guard.toml", content);
    }

    /// A Python file that passes every custom rule.
    pub fn create_clean_python(&self, relative_path: &str) -> PathBuf {
        self.create_file(relative_path, "x = 'a'\n# vim: set ts=4:\n")
    }

    /// Runs git in the fixture root.
    pub fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("Failed to run git");
        assert!(status.status.success(), "git {args:?} failed");
    }

    /// Initializes a repository with an identity and no signing.
    pub fn init_git_repo(&self) {
        self.git(&["init", "-q"]);
        self.git(&["config", "user.email", "test@test.com"]);
        self.git(&["config", "user.name", "Test User"]);
        self.git(&["config", "commit.gpgsign", "false"]);
    }

    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "."]);
        self.git(&["commit", "-q", "-m", message]);
    }

    /// Whether the fixture happens to live inside some git work tree.
    pub fn inside_git_repo(&self) -> bool {
        Command::new("git")
            .args(["rev-parse", "--is-inside-work-tree"])
            .current_dir(self.path())
            .output()
            .is_ok_and(|o| o.status.success())
    }

    /// Writes a fake checker script that logs its arguments to
    /// `<name>.log` and prints one finding per existing file argument.
    #[cfg(unix)]
    pub fn create_fake_checker(&self, name: &str, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let log = self.path().join(format!("tools/{name}.log"));
        let script = self.create_file(
            &format!("tools/{name}"),
            &format!(
                "#!/bin/sh\necho \"$@\" >> '{log}'\nfor f in \"$@\"; do\n  case \"$f\" in\n    \
                 --*) ;;\n    *) [ -e \"$f\" ] && echo \"$f:1: finding from {name}\" ;;\n  \
                 esac\ndone\nexit {exit_code}\n",
                log = log.display()
            ),
        );
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        script
    }

    /// Whether the `file` classifier extensionless scripts depend on is installed.
    pub fn has_file_command() -> bool {
        which::which("file").is_ok()
    }

    /// Reads the argument log of a fake checker.
    pub fn checker_log(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(format!("tools/{name}.log"))).unwrap_or_default()
    }
}
