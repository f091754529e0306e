use crate::{SynthesisEngine, SynthesisResult};

/// Placeholder engine for when no synthesis capability can be used.
///
/// Every call fails with the stored reason.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl SynthesisEngine for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn check_available(&self) -> Result<(), Box<dyn std::error::Error>> {
        Err(self.reason.clone().into())
    }

    fn synthesize(
        &mut self,
        _text: &str,
        _lang: &str,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>> {
        Err(self.reason.clone().into())
    }
}
