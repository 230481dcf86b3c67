// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Archaic reference entries shared by the integration tests
pub const ARCHAIC_WORDS: &[&str] = &["ཀཁ", "གང", "ཅཆ", "ཤར"];

/// Modern reference entries shared by the integration tests
pub const MODERN_WORDS: &[&str] = &["ཀཀ", "གཀ", "ཤཀ"];

/// Test fixture helper for creating temporary input directories with documents
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a file under the fixture root, creating parent directories as needed
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Create a document inside `input/` with an optional notes sidecar
    pub fn create_document(&self, name: &str, text: &str, notes_json: Option<&str>) -> PathBuf {
        let path = self.create_file(Path::new("input").join(format!("{name}.txt")), text);
        if let Some(notes_json) = notes_json {
            self.create_file(Path::new("input").join(format!("{name}.notes.json")), notes_json);
        }
        path
    }

    /// Write both reference lists, returning (archaic, modern) paths
    pub fn create_reference_lists(&self) -> (PathBuf, PathBuf) {
        let archaic = self.create_file("res/archaic_words.txt", &ARCHAIC_WORDS.join("\n"));
        let modern_json = serde_json::to_string(MODERN_WORDS).expect("Failed to encode word list");
        let modern = self.create_file("res/modern_words.json", &modern_json);
        (archaic, modern)
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root_path.join("input")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root_path.join("output")
    }
}
