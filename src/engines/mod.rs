//! Speech synthesis engines.
//!
//! This module contains implementations of text-to-speech engines.
//!
//! # Available Engines
//!
//! Enable engines via Cargo features:
//! - `gtts` - Google Translate text-to-speech over HTTPS (default)
//!
//! When no engine is compiled in, [`default_engine`] hands out an
//! [`Unavailable`] engine so callers can report the missing capability
//! instead of failing at build time.

#[cfg(feature = "gtts")]
pub mod gtts;
pub mod unavailable;

use std::time::Duration;

use derive_builder::Builder;

use crate::SynthesisEngine;

pub use unavailable::Unavailable;

/// Parameters for configuring the default engine.
///
/// ```rust
/// use bhasha_audio::engines::EngineParamsBuilder;
///
/// let params = EngineParamsBuilder::default()
///     .tld("co.in")
///     .slow(true)
///     .build()?;
/// assert_eq!(params.tld, "co.in");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(default, setter(into))]
pub struct EngineParams {
    /// Top-level domain of the Google Translate host (`"com"`, `"co.in"`, ...).
    pub tld: String,
    /// Ask the service for slower speech.
    pub slow: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            tld: "com".to_string(),
            slow: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Build the engine this crate was compiled with.
///
/// Never fails: if the engine is not compiled in or cannot be initialised,
/// the returned engine reports the reason from
/// [`SynthesisEngine::check_available`].
pub fn default_engine(params: EngineParams) -> Box<dyn SynthesisEngine> {
    #[cfg(feature = "gtts")]
    {
        match gtts::GttsEngine::with_params(params) {
            Ok(engine) => Box::new(engine),
            Err(e) => {
                log::warn!("Google TTS client initialisation failed: {e}");
                Box::new(Unavailable::new(format!(
                    "could not initialise the Google TTS client: {e}"
                )))
            }
        }
    }

    #[cfg(not(feature = "gtts"))]
    {
        let _ = params;
        Box::new(Unavailable::new(
            "built without a TTS engine. Rebuild with `--features gtts`",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_falls_back_to_defaults() {
        let params = EngineParamsBuilder::default().slow(true).build().unwrap();
        assert!(params.slow);
        assert_eq!(params.tld, "com");
        assert_eq!(params.timeout, Duration::from_secs(30));
    }

    #[cfg(not(feature = "gtts"))]
    #[test]
    fn default_engine_is_unavailable_without_gtts() {
        let engine = default_engine(EngineParams::default());
        assert!(engine.check_available().is_err());
    }

    #[cfg(feature = "gtts")]
    #[test]
    fn default_engine_is_gtts() {
        let engine = default_engine(EngineParams::default());
        assert_eq!(engine.name(), "gtts");
        assert!(engine.check_available().is_ok());
    }
}
