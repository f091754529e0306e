//! Google Translate text-to-speech engine.
//!
//! Speaks text through the same web endpoint the Google Translate page uses
//! for its "listen" button. No API key is needed, but the endpoint is
//! unofficial and rate limited; heavy use gets HTTP 429.
//!
//! # Request flow
//!
//! 1. The language tag is checked against [`langs`]; unknown tags fail
//!    before any network traffic.
//! 2. Text is cleaned and split into pieces of at most
//!    [`tokenizer::MAX_CHARS`] characters.
//! 3. Each piece is sent as one `batchexecute` RPC. The response carries
//!    base64-encoded MP3 data, which is decoded and appended.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bhasha_audio::{SynthesisEngine, engines::gtts::GttsEngine};
//! use std::path::PathBuf;
//!
//! let mut engine = GttsEngine::new()?;
//! engine.synthesize_to_file("ಒಂದು", "kn", &PathBuf::from("ondu.mp3"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod engine;
pub mod langs;
pub mod tokenizer;

pub use client::GttsError;
pub use engine::GttsEngine;
