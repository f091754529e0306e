use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::format_bytes;
use crate::manifest::Manifest;

/// Extension of the files a listing picks up.
pub const AUDIO_EXTENSION: &str = "mp3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    pub name: String,
    pub size: u64,
    /// Manifest description, when the file is one of ours.
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    DirectoryMissing(PathBuf),
    Files { dir: PathBuf, files: Vec<ListedFile> },
}

impl Listing {
    /// Listed files; empty when the directory is missing.
    pub fn files(&self) -> &[ListedFile] {
        match self {
            Listing::DirectoryMissing(_) => &[],
            Listing::Files { files, .. } => files,
        }
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        let (dir, files) = match self {
            Listing::DirectoryMissing(dir) => {
                return writeln!(out, "Directory does not exist: {}", dir.display());
            }
            Listing::Files { dir, files } => (dir, files),
        };

        writeln!(out, "\nAudio files in: {}\n", dir.display())?;

        if files.is_empty() {
            writeln!(out, "  (No MP3 files found)")?;
        }
        for file in files {
            let size = format_bytes(file.size);
            match file.description {
                Some(desc) => writeln!(out, "  {:20} | {:>7} bytes | {desc}", file.name, size)?,
                None => writeln!(out, "  {:20} | {:>7} bytes", file.name, size)?,
            }
        }

        writeln!(out, "\n  Total: {} files\n", files.len())
    }
}

/// Collect the MP3 files in `dir`, sorted by name.
///
/// Only reads the filesystem. A missing directory is reported as
/// [`Listing::DirectoryMissing`] rather than an error, and entries that
/// cannot be stat'ed (such as dangling symlinks) are skipped with a warning.
pub fn list(manifest: &Manifest, dir: &Path) -> io::Result<Listing> {
    if !dir.is_dir() {
        log::debug!("{} is not a directory", dir.display());
        return Ok(Listing::DirectoryMissing(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(AUDIO_EXTENSION) {
            continue;
        }

        // Follows symlinks, so a link to a clip is listed with the clip's size
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                continue;
            }
        };
        if !meta.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let description = manifest.description(&name);
        files.push(ListedFile {
            name,
            size: meta.len(),
            description,
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    Ok(Listing::Files { dir, files })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(listing: &Listing) -> String {
        let mut out = Vec::new();
        listing.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_known_and_unknown_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("ek.mp3"), vec![0u8; 1234]).unwrap();
        fs::write(tmp.path().join("unknown.mp3"), vec![0u8; 10]).unwrap();

        let listing = list(&Manifest::builtin(), tmp.path()).unwrap();

        assert_eq!(
            listing.files(),
            &[
                ListedFile {
                    name: "ek.mp3".to_string(),
                    size: 1234,
                    description: Some("Nepali: one"),
                },
                ListedFile {
                    name: "unknown.mp3".to_string(),
                    size: 10,
                    description: None,
                },
            ]
        );

        let text = rendered(&listing);
        let ek_line = text.lines().find(|l| l.contains("ek.mp3")).unwrap();
        assert!(ek_line.contains("1,234 bytes"), "{ek_line}");
        assert!(ek_line.ends_with("| Nepali: one"), "{ek_line}");
        let unknown_line = text.lines().find(|l| l.contains("unknown.mp3")).unwrap();
        assert!(unknown_line.trim_end().ends_with("10 bytes"), "{unknown_line}");
        assert!(text.contains("Total: 2 files"));
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nope");

        let listing = list(&Manifest::builtin(), &dir).unwrap();

        assert_eq!(listing, Listing::DirectoryMissing(dir.clone()));
        assert!(listing.files().is_empty());
        let text = rendered(&listing);
        assert!(text.starts_with("Directory does not exist"), "{text}");
        assert!(!text.contains("bytes"));
        assert!(!dir.exists());
    }

    #[test]
    fn ignores_other_files_and_sorts_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["success.mp3", "notes.txt", "aidu.mp3", "ek.MP3", "bees.mp3"] {
            fs::write(tmp.path().join(name), b"x").unwrap();
        }
        fs::create_dir(tmp.path().join("folder.mp3")).unwrap();

        let listing = list(&Manifest::builtin(), tmp.path()).unwrap();
        let names: Vec<&str> = listing.files().iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["aidu.mp3", "bees.mp3", "success.mp3"]);
    }

    #[test]
    fn empty_directory_says_so() {
        let tmp = tempfile::tempdir().unwrap();
        let listing = list(&Manifest::builtin(), tmp.path()).unwrap();
        let text = rendered(&listing);
        assert!(text.contains("(No MP3 files found)"));
        assert!(text.contains("Total: 0 files"));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("ek.mp3"), b"audio").unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("deleted.mp3"),
            tmp.path().join("stale.mp3"),
        )
        .unwrap();

        let listing = list(&Manifest::builtin(), tmp.path()).unwrap();
        let names: Vec<&str> = listing.files().iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["ek.mp3"]);
        assert!(rendered(&listing).contains("Total: 1 files"));
    }
}
