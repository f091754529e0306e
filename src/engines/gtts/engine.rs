use crate::engines::EngineParams;
use crate::{SynthesisEngine, SynthesisResult};

use super::client::{GttsClient, GttsError};

/// Google Translate text-to-speech engine.
///
/// ```rust,no_run
/// use bhasha_audio::{SynthesisEngine, engines::{gtts::GttsEngine, EngineParams}};
///
/// let params = EngineParams {
///     tld: "co.in".to_string(),
///     ..Default::default()
/// };
/// let mut engine = GttsEngine::with_params(params)?;
/// let result = engine.synthesize("Try again", "en")?;
/// println!("Received {} bytes of MP3", result.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GttsEngine {
    client: GttsClient,
}

impl GttsEngine {
    /// Create an engine against `translate.google.com` at normal speed.
    pub fn new() -> Result<Self, GttsError> {
        Self::with_params(EngineParams::default())
    }

    pub fn with_params(params: EngineParams) -> Result<Self, GttsError> {
        let client = GttsClient::new(&params.tld, params.slow, params.timeout)?;
        Ok(Self { client })
    }
}

impl SynthesisEngine for GttsEngine {
    fn name(&self) -> &str {
        "gtts"
    }

    fn synthesize(
        &mut self,
        text: &str,
        lang: &str,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>> {
        let audio = self.client.synthesize_text(text, lang)?;
        Ok(SynthesisResult { audio })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_language_without_network() {
        let mut engine = GttsEngine::new().unwrap();
        let err = engine.synthesize("hello", "xx-nowhere").unwrap_err();
        assert!(err.to_string().contains("xx-nowhere"), "{err}");
    }

    #[test]
    fn rejects_text_without_speakable_content() {
        let mut engine = GttsEngine::new().unwrap();
        let err = engine.synthesize(" ... ", "en").unwrap_err();
        assert!(err.to_string().contains("No text"), "{err}");
    }
}
