//! Shared helpers for `docgraph` integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Runs the `docgraph` binary.
pub struct DocGraphProcess;

impl DocGraphProcess {
    /// Run `docgraph` with `args` and capture its output.
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_with_env(args, &[])
    }

    /// Run `docgraph` with `args` and extra environment variables.
    pub fn spawn_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
        let bin = env!("CARGO_BIN_EXE_docgraph");
        let mut cmd = Command::new(bin);
        cmd.args(args)
            .env_remove("DOCGRAPH_CONFIG")
            .env_remove("DOCGRAPH_INDEX")
            .env_remove("DOCGRAPH_LOG_LEVEL")
            .env("NO_COLOR", "1");
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output().expect("failed to spawn docgraph")
    }

    /// Path to a fixture corpus under `tests/fixtures`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}

/// A throwaway corpus on disk.
pub struct TempCorpus {
    dir: TempDir,
}

impl TempCorpus {
    /// Create a corpus from `(relative path, contents)` pairs.
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let corpus = Self { dir };
        for (rel, contents) in files {
            corpus.write(rel, contents);
        }
        corpus
    }

    /// Write (or overwrite) one file.
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("failed to create folders");
        fs::write(path, contents).expect("failed to write file");
    }

    /// Corpus root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Corpus root as a string argument.
    pub fn arg(&self) -> &str {
        self.dir.path().to_str().expect("non-UTF-8 temp path")
    }
}

/// Stdout of `output` as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of `output` as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
