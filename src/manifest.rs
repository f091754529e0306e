//! The built-in table of audio clips.
//!
//! Nepali number names have no dedicated voice on the service, so they are
//! spoken through the Hindi voice using romanized text. Kannada uses native
//! script with the Kannada voice.

/// One clip to generate: the output file name and what to say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioEntry {
    /// Output file name, unique within a manifest (e.g. `"ek.mp3"`).
    pub filename: &'static str,
    /// Text sent to the synthesis service.
    pub text: &'static str,
    /// Language tag understood by the service (e.g. `"hi"`, `"kn"`).
    pub lang: &'static str,
    /// Human-readable label shown in progress and listings.
    pub description: &'static str,
}

const fn entry(
    filename: &'static str,
    text: &'static str,
    lang: &'static str,
    description: &'static str,
) -> AudioEntry {
    AudioEntry {
        filename,
        text,
        lang,
        description,
    }
}

static AUDIO_FILES: &[AudioEntry] = &[
    // Nepali numbers (Hindi voice as a pronunciation proxy)
    entry("ek.mp3", "ek", "hi", "Nepali: one"),
    entry("panch.mp3", "paanch", "hi", "Nepali: five"),
    entry("counting.mp3", "ek dui teen", "hi", "Nepali: 1-2-3 counting"),
    entry("das.mp3", "das", "hi", "Nepali: ten"),
    entry("bees.mp3", "bees", "hi", "Nepali: twenty"),
    // Kannada numbers
    entry("ondu.mp3", "ಒಂದು", "kn", "Kannada: one"),
    entry("aidu.mp3", "ಐದು", "kn", "Kannada: five"),
    entry("kan-counting.mp3", "ಒಂದು ಎರಡು ಮೂರು", "kn", "Kannada: 1-2-3 counting"),
    entry("hattu.mp3", "ಹತ್ತು", "kn", "Kannada: ten"),
    entry("ippatthu.mp3", "ಇಪ್ಪತ್ತು", "kn", "Kannada: twenty"),
    // Feedback sounds
    entry("success.mp3", "Correct! Well done!", "en", "Success feedback"),
    entry("error.mp3", "Try again", "en", "Error feedback"),
];

/// Read-only, ordered collection of [`AudioEntry`] values keyed by file name.
#[derive(Debug, Clone, Copy)]
pub struct Manifest {
    entries: &'static [AudioEntry],
}

impl Default for Manifest {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Manifest {
    /// The BhashaQuest clip table.
    pub fn builtin() -> Self {
        Self {
            entries: AUDIO_FILES,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'static, AudioEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its output file name.
    pub fn get(&self, filename: &str) -> Option<&'static AudioEntry> {
        self.entries.iter().find(|e| e.filename == filename)
    }

    /// Description for `filename`, if it is one of ours.
    pub fn description(&self, filename: &str) -> Option<&'static str> {
        self.get(filename).map(|e| e.description)
    }
}

impl IntoIterator for Manifest {
    type Item = &'static AudioEntry;
    type IntoIter = std::slice::Iter<'static, AudioEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
