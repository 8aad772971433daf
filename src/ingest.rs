//! Batch ingestion pipeline
//!
//! Walks an input directory, decodes each WAV header, and writes one XML
//! document per file into a timestamped output directory.

use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::audio::AudioMetadata;
use crate::config::Config;
use crate::document;
use crate::error::{IngestError, Result};

#[derive(Debug)]
pub struct Ingester {
    config: Config,
}

/// Outcome of one batch run.
#[derive(Debug)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub processed: usize,
    pub failures: Vec<FileFailure>,
}

/// Per-file failure recorded in keep-going mode.
#[derive(Debug)]
pub struct FileFailure {
    pub file: PathBuf,
    pub error: IngestError,
}

impl Ingester {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the whole batch: verify the input directory, enumerate its
    /// `.wav` files, create the output directory, process each file in
    /// sequence.
    ///
    /// The first per-file failure aborts the run unless `keep_going` is
    /// set, in which case failures are collected into the summary and the
    /// remaining files are still processed.
    pub fn run(&self) -> Result<RunSummary> {
        let input_dir = &self.config.input_dir;
        if !input_dir.is_dir() {
            return Err(IngestError::InputDirNotFound(input_dir.clone()));
        }

        let wav_files = self.fetch_wav_files(input_dir)?;
        let output_dir = self.create_output_directory(input_dir)?;
        log::info!("Writing documents to: {}", output_dir.display());

        let mut processed = 0;
        let mut failures = Vec::new();
        for file in &wav_files {
            match self.process_file(file, &output_dir) {
                Ok(output_path) => {
                    processed += 1;
                    log::debug!("Generated: {}", output_path.display());
                }
                Err(e) if self.config.keep_going => {
                    log::error!("Skipping {}: {}", file.display(), e);
                    failures.push(FileFailure {
                        file: file.clone(),
                        error: e,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(RunSummary {
            output_dir,
            processed,
            failures,
        })
    }

    /// Non-recursive `*.wav` listing, sorted for a stable processing order.
    fn fetch_wav_files(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut wav_files = Vec::new();
        for entry in fs::read_dir(input_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "wav") {
                wav_files.push(path);
            }
        }
        if wav_files.is_empty() {
            return Err(IngestError::NoWavFiles(input_dir.to_path_buf()));
        }
        wav_files.sort();
        Ok(wav_files)
    }

    /// `<output-root>/<unix-timestamp>/`; the root defaults to an `output`
    /// sibling of the input directory.
    fn create_output_directory(&self, input_dir: &Path) -> Result<PathBuf> {
        let output_root = match &self.config.output_root {
            Some(root) => root.clone(),
            None => input_dir.parent().unwrap_or(Path::new(".")).join("output"),
        };
        let timestamp = OffsetDateTime::now_utc().unix_timestamp();
        let output_dir = output_root.join(timestamp.to_string());
        fs::create_dir_all(&output_dir)?;
        Ok(output_dir)
    }

    /// Decode, render, write. A failed file carries its name in the error
    /// and produces no partial output.
    fn process_file(&self, file: &Path, output_dir: &Path) -> Result<PathBuf> {
        log::info!("Extracting metadata from: {}", file.display());

        let metadata = AudioMetadata::from_file(file)?;
        let file_name = document::xml_file_name(file);
        let xml = document::render_metadata(&metadata)
            .map_err(|e| IngestError::document(file_name.clone(), e))?;

        let output_path = output_dir.join(&file_name);
        fs::write(&output_path, xml)
            .map_err(|e| IngestError::document(file_name, e.into()))?;

        Ok(output_path)
    }
}
