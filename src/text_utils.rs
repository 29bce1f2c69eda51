//! Text splitting helpers for speech requests.

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest piece sent to the speech endpoint in one request.
pub const MAX_SPEECH_CHUNK_CHARS: usize = 100;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?;:,…]+[.!?;:,…]*").expect("valid regex"));

/// Split `text` into pieces of at most `max_chars` characters.
///
/// Clauses ending in punctuation are packed together while they fit; longer
/// clauses break at spaces, and a single word longer than `max_chars` is cut
/// on character boundaries.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let normalized = WHITESPACE.replace_all(text.trim(), " ");

    let mut chunks = Vec::new();
    let mut current = String::new();
    for clause in CLAUSE.find_iter(&normalized) {
        let clause = clause.as_str().trim();
        if clause.is_empty() {
            continue;
        }
        if clause.chars().count() <= max_chars {
            push_piece(&mut chunks, &mut current, clause, max_chars);
            continue;
        }
        for word in clause.split(' ') {
            for piece in split_long_word(word, max_chars) {
                push_piece(&mut chunks, &mut current, &piece, max_chars);
            }
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn push_piece(chunks: &mut Vec<String>, current: &mut String, piece: &str, max_chars: usize) {
    let current_len = current.chars().count();
    let piece_len = piece.chars().count();
    let separator = usize::from(!current.is_empty());
    if current_len + separator + piece_len > max_chars {
        chunks.push(std::mem::take(current));
    }
    if !current.is_empty() {
        current.push(' ');
    }
    current.push_str(piece);
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<String> {
    if word.chars().count() <= max_chars {
        return vec![word.to_string()];
    }
    word.chars()
        .collect::<Vec<_>>()
        .chunks(max_chars)
        .map(|chars| chars.iter().collect())
        .collect()
}
