#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use encoding_rs::UTF_8;
use tempfile::{TempDir, tempdir};

use csv_profile::relation::{LoadOptions, Relation};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// Default load options used across tests: comma delimiter, UTF-8, `NULL`
/// null token, no row limit.
pub fn default_options() -> LoadOptions {
    LoadOptions {
        delimiter: b',',
        encoding: UTF_8,
        null_token: "NULL".to_string(),
        limit: 0,
    }
}

/// Writes `contents` as a CSV in a fresh workspace and loads it.
pub fn load_csv(workspace: &TestWorkspace, contents: &str) -> Relation {
    let path = workspace.write("input.csv", contents);
    Relation::load(&path, &default_options()).expect("load relation")
}

/// The end-to-end sample used throughout: `id` and `score` are numerical,
/// `name` is categorical, and `score` has one NULL.
pub const SAMPLE_CSV: &str = "id,name,score\n1,Alice,90\n2,Bob,NULL\n3,Alice,70\n";
