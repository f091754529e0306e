//! # bhasha-audio
//!
//! Generates the fixed set of MP3 clips used by BhashaQuest's number
//! exercises, using a cloud text-to-speech service.
//!
//! ## Features
//!
//! - **Audio manifest**: the built-in table of clips (Nepali and Kannada
//!   number names plus English feedback phrases)
//! - **Generator**: synthesizes every manifest entry into an output directory,
//!   isolating per-entry failures
//! - **Lister**: reports the MP3 files already on disk with their descriptions
//! - **Google Translate TTS**: the default engine (`gtts` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use bhasha_audio::{engines, generate::Generator, manifest::Manifest};
//!
//! let manifest = Manifest::builtin();
//! let mut engine = engines::default_engine(Default::default());
//!
//! let report = Generator::new(&manifest, PathBuf::from("assets/audio"))
//!     .generate(engine.as_mut(), &mut std::io::stdout())?;
//! assert!(report.is_success());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engines;
pub mod generate;
pub mod list;
pub mod manifest;

use std::path::Path;

/// The result of a synthesis (text-to-speech) operation.
///
/// Holds the encoded MP3 stream exactly as the service returned it.
#[derive(Debug, Clone, Default)]
pub struct SynthesisResult {
    /// Encoded MP3 bytes
    pub audio: Vec<u8>,
}

impl SynthesisResult {
    /// Write the audio to `path`, replacing any existing file.
    pub fn write_mp3(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, &self.audio)?;
        Ok(())
    }

    /// Size of the encoded audio in bytes.
    pub fn len(&self) -> usize {
        self.audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty()
    }
}

/// Common interface for text-to-speech synthesis engines.
///
/// Engines are configured when they are constructed; a request only carries
/// the text and the language tag understood by the service.
pub trait SynthesisEngine {
    /// Short engine name used in log and console output.
    fn name(&self) -> &str;

    /// Check that the engine can be used at all.
    ///
    /// Called once before a batch of requests. The default implementation
    /// reports the engine as available.
    fn check_available(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    /// Synthesize speech for `text` in the language `lang`.
    fn synthesize(
        &mut self,
        text: &str,
        lang: &str,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>>;

    /// Synthesize speech and write it to an MP3 file.
    ///
    /// Default implementation calls `synthesize()` then `SynthesisResult::write_mp3()`.
    fn synthesize_to_file(
        &mut self,
        text: &str,
        lang: &str,
        mp3_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.synthesize(text, lang)?.write_mp3(mp3_path)
    }
}

/// Format a byte count with thousands separators (`12345` → `12,345`).
pub fn format_bytes(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
