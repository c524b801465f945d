// src/crawl/store.rs
// =============================================================================
// This module persists extracted content to disk.
//
// Two kinds of artifact:
// - Per-page files: one file per crawled page inside an output directory,
//   named from the URL's path component
// - The snapshot file: a single file holding the most recently extracted
//   page, fully overwritten every time (this is what `ask`/`chat` read)
//
// File naming:
// - Slashes in the URL path become underscores
// - An empty path (the site root) becomes "index"
// - Everything gets a .txt extension
// Note: differently-pathed URLs can normalize to the same filename, and
// the later write wins. Collisions are not detected.
//
// Rust concepts:
// - std::fs for file I/O
// - PathBuf for building paths portably
// =============================================================================

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

// Derives a file name from a URL's path component
//
// Examples:
//   "https://example.com/"              -> "index.txt"
//   "https://example.com/about.html"    -> "_about.html.txt"
//   "https://example.com/docs/faq.html" -> "_docs_faq.html.txt"
pub fn page_file_name(url: &Url) -> String {
    let path = url.path().replace('/', "_");

    // The root path is just "/" which becomes "_"; treat both the truly
    // empty path and that case as the index page
    let stem = if path.is_empty() || path == "_" {
        "index".to_string()
    } else {
        path
    };

    format!("{}.txt", stem)
}

// Saves one crawled page's content into the output directory
//
// The directory is created if it doesn't exist. Writes unconditionally
// overwrite whatever was there before.
//
// Returns: the path the file was written to
pub fn save_page(output_dir: &str, url: &Url, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory '{}'", output_dir))?;

    let file_path = Path::new(output_dir).join(page_file_name(url));
    fs::write(&file_path, content)
        .with_context(|| format!("Failed to write {}", file_path.display()))?;

    Ok(file_path)
}

// Overwrites the snapshot file with freshly extracted content
//
// Parent directories are created as needed. The previous snapshot is
// replaced entirely - no appending, no versioning.
pub fn write_snapshot(snapshot_path: &str, content: &str) -> Result<()> {
    if let Some(parent) = Path::new(snapshot_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory '{}'", parent.display())
            })?;
        }
    }

    fs::write(snapshot_path, content)
        .with_context(|| format!("Failed to write snapshot '{}'", snapshot_path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_becomes_index() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(page_file_name(&url), "index.txt");
    }

    #[test]
    fn test_slashes_become_underscores() {
        let url = Url::parse("https://example.com/docs/faq.html").unwrap();
        assert_eq!(page_file_name(&url), "_docs_faq.html.txt");
    }

    #[test]
    fn test_save_page_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("pages");
        let url = Url::parse("https://example.com/about.html").unwrap();

        let path = save_page(output_dir.to_str().unwrap(), &url, "hello").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn test_snapshot_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("content.txt");
        let snapshot = snapshot.to_str().unwrap();

        write_snapshot(snapshot, "first").unwrap();
        write_snapshot(snapshot, "second").unwrap();

        assert_eq!(fs::read_to_string(snapshot).unwrap(), "second");
    }

    #[test]
    fn test_colliding_paths_map_to_same_file() {
        // Documented behavior: the later write wins
        let a = Url::parse("https://example.com/a/b.html").unwrap();
        let b = Url::parse("https://example.com/a_b.html").unwrap();
        assert_eq!(page_file_name(&a), page_file_name(&b));
    }
}
