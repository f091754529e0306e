//! Synthesize every manifest entry into an output directory.
//!
//! Each entry is handled on its own: a failed request or write is recorded in
//! the [`GenerationReport`] and the remaining entries are still attempted.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::manifest::{AudioEntry, Manifest};
use crate::{format_bytes, SynthesisEngine};

const RULE_WIDTH: usize = 70;

/// Errors that stop generation as a whole.
#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("Synthesis engine '{engine}' is unavailable: {reason}")]
    DependencyUnavailable { engine: String, reason: String },
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir { path: PathBuf, source: io::Error },
}

/// Why a single entry failed.
#[derive(thiserror::Error, Debug)]
pub enum EntryError {
    #[error("Synthesis failed: {0}")]
    Synthesis(Box<dyn std::error::Error>),
    #[error("Service returned no audio")]
    EmptyAudio,
    #[error("Write failed: {0}")]
    Write(#[from] io::Error),
    #[error("File not created")]
    NotCreated,
}

/// Outcome of one manifest entry: the written size in bytes, or the failure.
#[derive(Debug)]
pub struct EntryOutcome {
    pub filename: &'static str,
    pub result: Result<u64, EntryError>,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl GenerationReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no entry failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &EntryError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.filename, e)))
    }
}

/// Console progress that stops writing after the first failure.
struct Progress<'a> {
    out: &'a mut dyn Write,
    broken: bool,
}

impl<'a> Progress<'a> {
    fn new(out: &'a mut dyn Write) -> Self {
        Self { out, broken: false }
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.broken {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            log::warn!("Progress output unavailable, continuing silently: {e}");
            self.broken = true;
        }
    }
}

/// Writes the clips of a [`Manifest`] into one directory.
pub struct Generator<'m> {
    manifest: &'m Manifest,
    output_dir: PathBuf,
}

impl<'m> Generator<'m> {
    pub fn new(manifest: &'m Manifest, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            output_dir: output_dir.into(),
        }
    }

    /// Generate every entry, writing progress lines to `out`.
    ///
    /// Returns `Err` only when nothing could be attempted: the engine is
    /// unavailable or the output directory cannot be created. Per-entry
    /// failures are reported through [`GenerationReport::is_success`].
    /// Progress output is best effort; a broken `out` never stops generation.
    pub fn generate(
        &self,
        engine: &mut dyn SynthesisEngine,
        out: &mut dyn Write,
    ) -> Result<GenerationReport, GenerateError> {
        let mut progress = Progress::new(out);

        if let Err(e) = engine.check_available() {
            log::error!("{} engine unavailable: {e}", engine.name());
            progress.emit(format_args!(
                "\nCannot generate audio: {} engine unavailable\n   {e}\n",
                engine.name()
            ));
            return Err(GenerateError::DependencyUnavailable {
                engine: engine.name().to_string(),
                reason: e.to_string(),
            });
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| GenerateError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;
        let location =
            fs::canonicalize(&self.output_dir).unwrap_or_else(|_| self.output_dir.clone());

        progress.emit(format_args!(
            "Generating {} audio files...\nOutput directory: {}\n\n",
            self.manifest.len(),
            location.display()
        ));

        let mut report = GenerationReport {
            outcomes: Vec::with_capacity(self.manifest.len()),
        };

        for entry in self.manifest.iter() {
            progress.emit(format_args!(
                "  {:20} | {:25} | ",
                entry.filename, entry.description
            ));

            let result = self.generate_entry(engine, entry);
            match &result {
                Ok(size) => {
                    log::info!("Wrote {} ({size} bytes)", entry.filename);
                    progress.emit(format_args!("ok ({} bytes)\n", format_bytes(*size)));
                }
                Err(e) => {
                    log::warn!("{} failed: {e}", entry.filename);
                    progress.emit(format_args!("FAILED: {e}\n"));
                }
            }

            report.outcomes.push(EntryOutcome {
                filename: entry.filename,
                result,
            });
        }

        let rule = "=".repeat(RULE_WIDTH);
        progress.emit(format_args!(
            "\n{rule}\nSuccessfully generated: {}/{} files\n",
            report.succeeded(),
            report.total()
        ));
        if report.failed() > 0 {
            progress.emit(format_args!("Errors: {} files\n", report.failed()));
        }
        progress.emit(format_args!("Location: {}\n{rule}\n\n", location.display()));

        Ok(report)
    }

    fn generate_entry(
        &self,
        engine: &mut dyn SynthesisEngine,
        entry: &AudioEntry,
    ) -> Result<u64, EntryError> {
        let path = self.output_dir.join(entry.filename);
        log::debug!("Synthesizing {} ({}): {:?}", entry.filename, entry.lang, entry.text);

        let result = engine
            .synthesize(entry.text, entry.lang)
            .map_err(EntryError::Synthesis)?;
        if result.is_empty() {
            return Err(EntryError::EmptyAudio);
        }

        fs::write(&path, &result.audio)?;

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(meta.len()),
            _ => Err(EntryError::NotCreated),
        }
    }
}
