#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tend::app::App;
use tend::config::Config;
use tend::storage::Storage;

/// A temporary data directory plus the pieces to build apps against it.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.dir.path().to_path_buf())
    }

    pub fn config(&self) -> Config {
        Config::load_from_dir(self.dir.path())
    }

    /// Load a fresh App instance, as a new CLI invocation would.
    pub fn app(&self) -> App {
        App::load(self.storage(), self.config())
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join(".tend.toml");
        std::fs::write(&path, contents).expect("failed to write config");
        path
    }

    pub fn write_blob(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write blob");
        path
    }
}

/// Run the tend binary against this environment's data dir.
#[allow(dead_code)]
pub fn tend_cmd(env: &TestEnv) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("tend").expect("tend binary");
    cmd.env("TEND_DATA_DIR", env.path());
    cmd
}
