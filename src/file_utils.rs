use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Per-run asset directory layout
#[derive(Debug, Clone)]
pub struct RunDirs {
    /// Root of this run's assets
    pub root: PathBuf,
    /// Generated images
    pub images: PathBuf,
    /// Narration audio and timing data
    pub audio: PathBuf,
    /// Subtitle and timeline artifacts
    pub subtitles: PathBuf,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Create a fresh per-run asset directory tree under `assets_root`.
    /// Runs never share directories, so one run cannot clobber another's
    /// artifacts.
    pub fn create_run_dirs<P: AsRef<Path>>(assets_root: P) -> Result<RunDirs> {
        let run_id = format!(
            "run_{}_{:04x}",
            Local::now().format("%Y%m%d_%H%M%S"),
            rand::random::<u16>()
        );
        let root = assets_root.as_ref().join(run_id);

        let dirs = RunDirs {
            images: root.join("images"),
            audio: root.join("audio"),
            subtitles: root.join("subtitles"),
            root,
        };

        Self::ensure_dir(&dirs.images)?;
        Self::ensure_dir(&dirs.audio)?;
        Self::ensure_dir(&dirs.subtitles)?;

        Ok(dirs)
    }

    // @generates: Output path from directory, stem and extension
    pub fn generate_output_path<P: AsRef<Path>>(
        output_dir: P,
        stem: &str,
        extension: &str,
    ) -> PathBuf {
        let mut output_filename = stem.to_string();
        output_filename.push('.');
        output_filename.push_str(extension);
        output_dir.as_ref().join(output_filename)
    }

    /// Find files with a specific extension in a directory, sorted by name.
    /// The name sort is what keeps generated scene images in order.
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a whole text file (paper text, prompt templates)
    pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }
}
