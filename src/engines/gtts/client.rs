use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::Client;
use reqwest::header::REFERER;
use serde::Serialize;
use serde_json::Value;

use super::langs;
use super::tokenizer::{split_text, MAX_CHARS};

/// RPC id of the text-to-speech call inside `batchexecute`.
pub const RPC_ID: &str = "jQ1olc";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/47.0.2526.106 Safari/537.36";

const TRANSLATE_REFERER: &str = "http://translate.google.com/";

#[derive(thiserror::Error, Debug)]
pub enum GttsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Language not supported: '{0}'")]
    UnsupportedLanguage(String),
    #[error("No text to speak")]
    EmptyText,
    #[error("{status} from TTS API. Probable cause: {cause}")]
    Http { status: u16, cause: String },
    #[error("No audio stream in response. Unsupported language '{0}'?")]
    NoAudio(String),
    #[error("Malformed response: {0}")]
    Response(String),
}

/// The positional parameter list of the TTS RPC: `[text, lang, speed, "null"]`.
///
/// `speed` is `true` for slow speech and `null` otherwise.
#[derive(Serialize)]
struct RpcParameter<'a>(&'a str, &'a str, Option<bool>, &'static str);

/// Blocking client for the Google Translate `batchexecute` endpoint.
pub struct GttsClient {
    http: Client,
    tld: String,
    slow: bool,
}

impl GttsClient {
    pub fn new(tld: &str, slow: bool, timeout: Duration) -> Result<Self, GttsError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            tld: tld.to_string(),
            slow,
        })
    }

    pub fn url(&self) -> String {
        format!(
            "https://translate.google.{}/_/TranslateWebserverUi/data/batchexecute",
            self.tld
        )
    }

    /// Synthesize `text` in `lang`, returning the concatenated MP3 stream.
    pub fn synthesize_text(&self, text: &str, lang: &str) -> Result<Vec<u8>, GttsError> {
        let lang = langs::resolve(lang)?;

        let chunks = split_text(text, MAX_CHARS);
        if chunks.is_empty() {
            return Err(GttsError::EmptyText);
        }

        let mut audio = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            log::debug!(
                "gtts: chunk {}/{} lang={} chars={}",
                i + 1,
                chunks.len(),
                lang,
                chunk.chars().count()
            );
            audio.extend(self.request_chunk(chunk, lang)?);
        }

        Ok(audio)
    }

    fn request_chunk(&self, text: &str, lang: &str) -> Result<Vec<u8>, GttsError> {
        let payload = package_rpc(text, lang, self.slow)?;

        let response = self
            .http
            .post(self.url())
            .header(REFERER, TRANSLATE_REFERER)
            .form(&[("f.req", payload)])
            .send()?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(GttsError::Http {
                status,
                cause: infer_cause(status, &self.tld),
            });
        }

        let body = response.text()?;
        log::debug!("gtts: {} byte response", body.len());
        decode_response(&body, lang)
    }
}

/// Build the `f.req` form value for one chunk of text.
pub fn package_rpc(text: &str, lang: &str, slow: bool) -> Result<String, GttsError> {
    let speed = if slow { Some(true) } else { None };
    let parameter = serde_json::to_string(&RpcParameter(text, lang, speed, "null"))?;
    let rpc = serde_json::json!([[[RPC_ID, parameter, null, "generic"]]]);
    Ok(rpc.to_string())
}

/// Pull the MP3 bytes out of a `batchexecute` response body.
///
/// The body is a `)]}'` guard line followed by length-prefixed JSON arrays.
/// The TTS envelope looks like
/// `[["wrb.fr","jQ1olc","[\"<base64>\"]",null,null,null,"generic"], ...]`.
pub fn decode_response(body: &str, lang: &str) -> Result<Vec<u8>, GttsError> {
    let mut audio = Vec::new();

    for line in body.lines().filter(|l| l.contains(RPC_ID)) {
        let Ok(envelope) = serde_json::from_str::<Value>(line) else {
            log::debug!("gtts: skipping non-JSON response line");
            continue;
        };

        for item in envelope.as_array().into_iter().flatten() {
            let Some(fields) = item.as_array() else {
                continue;
            };
            if fields.get(1).and_then(Value::as_str) != Some(RPC_ID) {
                continue;
            }
            // Payload is null when the service rejects the request
            let Some(payload) = fields.get(2).and_then(Value::as_str) else {
                continue;
            };

            let inner: Vec<Value> = serde_json::from_str(payload)?;
            if let Some(encoded) = inner.first().and_then(Value::as_str) {
                let bytes = STANDARD
                    .decode(encoded)
                    .map_err(|e| GttsError::Response(format!("invalid base64 audio: {e}")))?;
                audio.extend(bytes);
            }
        }
    }

    if audio.is_empty() {
        return Err(GttsError::NoAudio(lang.to_string()));
    }
    Ok(audio)
}

/// Best guess at why the service answered with a non-success status.
fn infer_cause(status: u16, tld: &str) -> String {
    match status {
        403 => "Bad token or upstream API changes".to_string(),
        404 if tld != "com" => format!("Unsupported tld '{tld}'"),
        429 => "Too many requests. Rate limited by the service".to_string(),
        s if s >= 500 => "Upstream API error. Try again later.".to_string(),
        _ => "Unknown".to_string(),
    }
}
