//! File I/O operations for notes with atomic writes.

use crate::domain::Note;
use crate::infra::slug::NOTE_EXTENSION;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Errors during file system operations on notes.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("note file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse note at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize note for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    pub(crate) fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Reads a note from a JSON file.
///
/// A UTF-8 byte order mark is tolerated.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the file doesn't exist.
/// Returns `FsError::PermissionDenied` if access is denied.
/// Returns `FsError::Parse` if the file is not valid note JSON.
pub fn read_note_file(path: &Path) -> Result<Note, FsError> {
    let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes[..]);

    serde_json::from_slice(bytes).map_err(|e| FsError::Parse {
        path: path.into(),
        source: e,
    })
}

/// Writes a note to a file path atomically.
///
/// The note is serialized as pretty-printed JSON with a trailing newline,
/// written to a temporary file in the same directory and renamed over the
/// target, so readers never observe a partial file.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the parent directory doesn't exist.
/// Returns `FsError::AtomicWrite` if the atomic rename fails.
pub fn write_note_file(path: &Path, note: &Note) -> Result<(), FsError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    if !parent.is_dir() {
        return Err(FsError::NotFound {
            path: parent.into(),
        });
    }

    let mut content = serde_json::to_string_pretty(note).map_err(|e| FsError::Serialize {
        path: path.into(),
        source: e,
    })?;
    content.push('\n');

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(path, e))?;

    temp.write_all(content.as_bytes())
        .map_err(|e| FsError::from_io(path, e))?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

/// Removes a note file.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the file doesn't exist.
pub fn remove_note_file(path: &Path) -> Result<(), FsError> {
    std::fs::remove_file(path).map_err(|e| FsError::from_io(path, e))
}

/// Lists the note (`.json`) files directly inside a directory.
///
/// Subdirectories are not descended into. Hidden files (starting with `.`)
/// are skipped, which keeps `.git` and editor swap files out of the listing.
///
/// Returns file names relative to the input directory, sorted.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist.
/// Returns `FsError::NotADirectory` if the path is not a directory.
/// Returns `FsError::Io` if the directory cannot be read.
pub fn scan_notes_directory(dir: &Path) -> Result<Vec<PathBuf>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(source) => FsError::from_io(&path, source),
                None => FsError::NotADirectory { path },
            }
        })?;

        if entry.file_type().is_file() && !is_hidden(&entry) && has_note_extension(&entry) {
            files.push(PathBuf::from(entry.file_name()));
        }
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn has_note_extension(entry: &DirEntry) -> bool {
    entry
        .path()
        .extension()
        .is_some_and(|e| e == NOTE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    // ===========================================
    // Test Helpers
    // ===========================================

    fn test_datetime() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn create_test_note() -> Note {
        Note::builder("Test Note")
            .content("Body content.")
            .tags(vec!["draft".to_string()])
            .created(test_datetime())
            .build()
            .unwrap()
    }

    fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    // ===========================================
    // Cycle 1: FsError Type
    // ===========================================

    #[test]
    fn fs_error_not_found_displays_path() {
        let error = FsError::NotFound {
            path: PathBuf::from("/some/path.json"),
        };
        assert!(error.to_string().contains("/some/path.json"));
    }

    #[test]
    fn fs_error_from_io_maps_not_found() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = FsError::from_io(Path::new("/test/path.json"), io_error);
        assert!(matches!(error, FsError::NotFound { .. }));
    }

    #[test]
    fn fs_error_from_io_maps_permission_denied() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let error = FsError::from_io(Path::new("/test/path.json"), io_error);
        assert!(matches!(error, FsError::PermissionDenied { .. }));
    }

    #[test]
    fn fs_error_from_io_maps_other_to_io() {
        let io_error = io::Error::other("some other error");
        let error = FsError::from_io(Path::new("/test/path.json"), io_error);
        assert!(matches!(error, FsError::Io { .. }));
    }

    // ===========================================
    // Cycle 2: read_note_file
    // ===========================================

    #[test]
    fn read_note_file_parses_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(
            &dir,
            "note.json",
            r#"{"title": "Test Note", "content": "Body content."}"#,
        );

        let note = read_note_file(&path).unwrap();
        assert_eq!(note.title(), "Test Note");
        assert_eq!(note.content(), "Body content.");
    }

    #[test]
    fn read_note_file_strips_utf8_bom() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "bom.json", "\u{FEFF}{\"title\": \"Bom\"}");

        let note = read_note_file(&path).unwrap();
        assert_eq!(note.title(), "Bom");
    }

    #[test]
    fn read_note_file_returns_not_found_for_missing_file() {
        let result = read_note_file(Path::new("/nonexistent/path/note.json"));
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn read_note_file_returns_parse_error_for_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "broken.json", "{ not json");

        let result = read_note_file(&path);
        if let Err(FsError::Parse {
            path: error_path, ..
        }) = result
        {
            assert_eq!(error_path, path);
        } else {
            panic!("Expected FsError::Parse");
        }
    }

    #[test]
    fn read_note_file_returns_parse_error_for_non_note_json() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "array.json", "[1, 2, 3]");

        assert!(matches!(read_note_file(&path), Err(FsError::Parse { .. })));
    }

    // ===========================================
    // Cycle 3: write_note_file
    // ===========================================

    #[test]
    fn write_note_file_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Test_Note.json");
        let note = create_test_note();

        write_note_file(&path, &note).unwrap();
        let parsed = read_note_file(&path).unwrap();

        assert_eq!(parsed, note);
    }

    #[test]
    fn write_note_file_is_pretty_with_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pretty.json");

        write_note_file(&path, &create_test_note()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"title\": \"Test Note\""));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn write_note_file_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.json");
        let mut note = create_test_note();

        write_note_file(&path, &note).unwrap();
        note.set_content("Second body");
        write_note_file(&path, &note).unwrap();

        assert_eq!(read_note_file(&path).unwrap().content(), "Second body");
    }

    #[test]
    fn write_note_file_requires_parent_directory() {
        let path = Path::new("/nonexistent/directory/note.json");
        let result = write_note_file(path, &create_test_note());
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn write_note_file_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.json");

        write_note_file(&path, &create_test_note()).unwrap();

        let files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name(), "note.json");
    }

    #[test]
    fn write_note_file_preserves_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unicode.json");
        let note = Note::builder("日本語タイトル")
            .content("emoji: 🎉 greek: αβγ")
            .build()
            .unwrap();

        write_note_file(&path, &note).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("🎉"), "unicode should not be escaped");
        assert_eq!(read_note_file(&path).unwrap().title(), "日本語タイトル");
    }

    // ===========================================
    // Cycle 4: remove_note_file
    // ===========================================

    #[test]
    fn remove_note_file_deletes() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "gone.json", "{}");

        remove_note_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn remove_note_file_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = remove_note_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    // ===========================================
    // Cycle 5: scan_notes_directory
    // ===========================================

    #[test]
    fn scan_finds_json_files_sorted() {
        let dir = TempDir::new().unwrap();
        create_test_file(&dir, "b.json", "{}");
        create_test_file(&dir, "a.json", "{}");

        let files = scan_notes_directory(dir.path()).unwrap();
        assert_eq!(files, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn scan_skips_hidden_other_extensions_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        create_test_file(&dir, "note.json", "{}");
        create_test_file(&dir, ".hidden.json", "{}");
        create_test_file(&dir, "readme.md", "# hi");
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.json"), "{}").unwrap();

        let files = scan_notes_directory(dir.path()).unwrap();
        assert_eq!(files, vec![PathBuf::from("note.json")]);
    }

    #[test]
    fn scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(scan_notes_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn scan_missing_directory_is_not_found() {
        let result = scan_notes_directory(Path::new("/nonexistent/notes"));
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn scan_file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "file.json", "{}");

        let result = scan_notes_directory(&path);
        assert!(matches!(result, Err(FsError::NotADirectory { .. })));
    }
}
