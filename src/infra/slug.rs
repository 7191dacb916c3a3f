//! Filename derivation for note titles.

use sha2::{Digest, Sha256};

/// Sanitized stems longer than this many bytes are truncated.
const MAX_STEM_BYTES: usize = 200;

/// Length a truncated stem is cut back to before the hash suffix is added.
const TRUNCATED_STEM_BYTES: usize = 190;

/// Extension used for note files.
pub const NOTE_EXTENSION: &str = "json";

/// Converts a title into a filesystem-safe file stem.
///
/// - Replaces `< > : " / \ | ? *` with underscores
/// - Replaces whitespace and control characters with underscores
/// - Replaces a leading `.` with an underscore (so notes never become hidden files)
/// - Stems longer than 200 bytes are cut to at most 190 bytes on a character
///   boundary and suffixed with `_` and 8 hex digits of the title's SHA-256,
///   so distinct long titles with a shared prefix stay distinct
///
/// Other characters, including non-ASCII letters, are kept as-is.
///
/// # Examples
///
/// ```
/// use jotter::infra::sanitize_title;
///
/// assert_eq!(sanitize_title("Trip: Day 1/2"), "Trip__Day_1_2");
/// assert_eq!(sanitize_title(".env notes"), "_env_notes");
/// ```
pub fn sanitize_title(title: &str) -> String {
    let mut stem: String = title
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.starts_with('.') {
        stem.replace_range(..1, "_");
    }

    if stem.len() <= MAX_STEM_BYTES {
        return stem;
    }

    let mut cut = TRUNCATED_STEM_BYTES;
    while !stem.is_char_boundary(cut) {
        cut -= 1;
    }
    stem.truncate(cut);
    format!("{}_{}", stem, short_hash(title))
}

/// Generates the filename a note with `title` is stored under.
///
/// Format: `{sanitized-title}.json`
///
/// # Examples
///
/// ```
/// use jotter::infra::note_filename;
///
/// assert_eq!(note_filename("API Design"), "API_Design.json");
/// ```
pub fn note_filename(title: &str) -> String {
    format!("{}.{}", sanitize_title(title), NOTE_EXTENSION)
}

/// First 8 hex digits of the SHA-256 of `s`.
fn short_hash(s: &str) -> String {
    let digest = Sha256::digest(s.as_bytes());
    format!("{:x}", digest)[..8].to_string()
}
