/// Longest piece of text the service accepts in one request, in characters.
pub const MAX_CHARS: usize = 100;

/// Characters after which a piece of text may be split.
const BREAK_PUNCTUATION: &[char] = &['.', '?', '!', ',', ';', ':', '।', '॥', '…', '¿', '¡'];

/// Clean `text` and split it into pieces of at most `max_chars` characters.
///
/// Splits prefer sentence punctuation, then whitespace, and only cut inside a
/// word when nothing else fits. Pieces with nothing speakable in them
/// (punctuation or whitespace only) are dropped, so an empty result means
/// there is nothing to say.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let cleaned = clean_text(text);

    if !is_speakable(&cleaned) {
        return Vec::new();
    }
    if cleaned.chars().count() <= max_chars {
        return vec![cleaned];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for token in split_on_punctuation(&cleaned) {
        for piece in minimize(token, max_chars) {
            let piece_len = piece.chars().count();
            let joined_len = if current.is_empty() {
                piece_len
            } else {
                current_len + 1 + piece_len
            };

            if joined_len > max_chars && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks.retain(|c| is_speakable(c));
    chunks
}

/// Join hyphenated line breaks and collapse runs of whitespace.
pub fn clean_text(text: &str) -> String {
    text.replace("-\n", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_speakable(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

/// Split after every break punctuation mark, keeping the mark with its text.
fn split_on_punctuation(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if BREAK_PUNCTUATION.contains(&ch) {
            let end = idx + ch.len_utf8();
            tokens.push(text[start..end].trim());
            start = end;
        }
    }
    tokens.push(text[start..].trim());

    tokens.retain(|t| !t.is_empty());
    tokens
}

/// Cut a token longer than `max_chars` at whitespace, or mid-word as a last resort.
fn minimize(token: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = token;

    while rest.chars().count() > max_chars {
        // Byte offset of the first char that does not fit
        let hard = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let cut = rest[..hard].rfind(' ').filter(|&i| i > 0).unwrap_or(hard);

        pieces.push(rest[..cut].trim_end().to_string());
        rest = rest[cut..].trim_start();
    }
    if !rest.is_empty() {
        pieces.push(rest.to_string());
    }

    pieces
}
