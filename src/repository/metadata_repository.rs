use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::error::metadata_errors::{
    LoadMetadataError, ResolvePathError, SaveMetadataError,
};
use crate::model::metadata::{FolderNode, MetadataDocument};

/// the characters a folder-path segment may hold
static SEGMENT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Za-z0-9_.-]+$").unwrap());

/// reads the whole metadata document from disk.
///
/// A missing or empty file yields the canonical empty document; a file that
/// exists but does not parse is a hard [`LoadMetadataError::Corrupt`] error
/// rather than a silent empty default.
pub fn load(path: &Path) -> Result<MetadataDocument, LoadMetadataError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FolderNode::empty()),
        Err(e) => {
            log::error!("Failed to read metadata file {path:?}. Nested exception is {e:?}");
            return Err(LoadMetadataError::Io);
        }
    };
    if contents.trim().is_empty() {
        return Ok(FolderNode::empty());
    }
    serde_json::from_str(&contents).map_err(|e| {
        log::error!("Metadata file {path:?} holds invalid JSON. Nested exception is {e:?}");
        LoadMetadataError::Corrupt
    })
}

/// rewrites the whole metadata document. The bytes go to a temp file first
/// and are renamed into place so a crash mid-write cannot corrupt the
/// previous document.
pub fn save(path: &Path, document: &MetadataDocument) -> Result<(), SaveMetadataError> {
    let serialized = serde_json::to_string_pretty(document).map_err(|e| {
        log::error!("Failed to serialize metadata document. Nested exception is {e:?}");
        SaveMetadataError::Serialize
    })?;
    let temp = path.with_extension("tmp");
    if let Err(e) = fs::write(&temp, serialized) {
        log::error!("Failed to write metadata temp file {temp:?}. Nested exception is {e:?}");
        return Err(SaveMetadataError::Io);
    }
    fs::rename(&temp, path).map_err(|e| {
        log::error!("Failed to swap metadata file {path:?} into place. Nested exception is {e:?}");
        SaveMetadataError::Io
    })
}

/// checks a single path segment against the allowed character set; `.` and
/// `..` are rejected explicitly
pub fn check_segment(segment: &str) -> Result<(), ResolvePathError> {
    if segment == "." || segment == ".." || !SEGMENT_PATTERN.is_match(segment) {
        return Err(ResolvePathError::BadSegment);
    }
    Ok(())
}

/// splits a slash-delimited folder path into validated segments; the empty
/// path is the root and yields no segments
pub fn split_path(path: &str) -> Result<Vec<&str>, ResolvePathError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let segments: Vec<&str> = trimmed.split('/').collect();
    for segment in segments.iter() {
        check_segment(segment)?;
    }
    Ok(segments)
}

/// walks the `folders` mapping segment by segment; every segment must exist
pub fn resolve<'a>(
    document: &'a MetadataDocument,
    path: &str,
) -> Result<&'a FolderNode, ResolvePathError> {
    let mut node = document;
    for segment in split_path(path)? {
        node = node.folders.get(segment).ok_or(ResolvePathError::NotFound)?;
    }
    Ok(node)
}

pub fn resolve_mut<'a>(
    document: &'a mut MetadataDocument,
    path: &str,
) -> Result<&'a mut FolderNode, ResolvePathError> {
    let mut node = document;
    for segment in split_path(path)? {
        node = node
            .folders
            .get_mut(segment)
            .ok_or(ResolvePathError::NotFound)?;
    }
    Ok(node)
}

/// splits a path into `(parent, leaf)` and resolves the parent, for
/// operations that insert or remove a named child. A path with no `/`
/// resolves to the root plus the whole path as the leaf; the empty path has
/// no parent and is rejected.
pub fn resolve_parent_mut<'a, 'p>(
    document: &'a mut MetadataDocument,
    path: &'p str,
) -> Result<(&'a mut FolderNode, &'p str), ResolvePathError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(ResolvePathError::BadSegment);
    }
    let (parent_path, leaf) = match trimmed.rsplit_once('/') {
        Some((parent_path, leaf)) => (parent_path, leaf),
        None => ("", trimmed),
    };
    check_segment(leaf)?;
    let parent = resolve_mut(document, parent_path)?;
    Ok((parent, leaf))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::model::metadata::{FileEntry, FolderNode};
    use crate::test::current_thread_name;

    use super::*;

    fn scratch_file() -> PathBuf {
        PathBuf::from(format!("./{}_repo.json", current_thread_name()))
    }

    fn cleanup() {
        fs::remove_file(scratch_file()).unwrap_or(());
    }

    fn document_with_reports() -> FolderNode {
        let mut document = FolderNode::empty();
        let mut reports = FolderNode::empty();
        reports
            .folders
            .insert(String::from("2024"), FolderNode::empty());
        reports.files.push(FileEntry::new("q1.pdf", "abc123.pdf", 42));
        document.folders.insert(String::from("reports"), reports);
        document
    }

    #[test]
    fn load_missing_file_yields_empty_document() {
        cleanup();
        let loaded = load(&scratch_file()).unwrap();
        assert_eq!(FolderNode::empty(), loaded);
    }

    #[test]
    fn load_empty_file_yields_empty_document() {
        cleanup();
        fs::write(scratch_file(), "").unwrap();
        let loaded = load(&scratch_file()).unwrap();
        assert_eq!(FolderNode::empty(), loaded);
        cleanup();
    }

    #[test]
    fn load_corrupt_file_is_a_loud_error() {
        cleanup();
        fs::write(scratch_file(), "{not json at all").unwrap();
        let result = load(&scratch_file());
        assert_eq!(Err(LoadMetadataError::Corrupt), result);
        cleanup();
    }

    #[test]
    fn save_then_load_round_trips() {
        cleanup();
        let document = document_with_reports();
        save(&scratch_file(), &document).unwrap();
        let loaded = load(&scratch_file()).unwrap();
        assert_eq!(document, loaded);
        cleanup();
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        cleanup();
        save(&scratch_file(), &FolderNode::empty()).unwrap();
        assert!(!scratch_file().with_extension("tmp").exists());
        cleanup();
    }

    #[test]
    fn resolve_root_is_the_document_itself() {
        let document = document_with_reports();
        let node = resolve(&document, "").unwrap();
        assert_eq!(&document, node);
    }

    #[test]
    fn resolve_walks_nested_segments() {
        let document = document_with_reports();
        let node = resolve(&document, "reports/2024").unwrap();
        assert_eq!(&FolderNode::empty(), node);
    }

    #[test]
    fn resolve_tolerates_surrounding_slashes() {
        let document = document_with_reports();
        assert!(resolve(&document, "/reports/").is_ok());
    }

    #[test]
    fn resolve_missing_segment_is_not_found() {
        let document = document_with_reports();
        assert_eq!(
            Err(ResolvePathError::NotFound),
            resolve(&document, "reports/2025")
        );
    }

    #[test]
    fn resolve_rejects_traversal_segments() {
        let document = document_with_reports();
        assert_eq!(
            Err(ResolvePathError::BadSegment),
            resolve(&document, "reports/..")
        );
        assert_eq!(Err(ResolvePathError::BadSegment), resolve(&document, "."));
        assert_eq!(
            Err(ResolvePathError::BadSegment),
            resolve(&document, "re ports")
        );
    }

    #[test]
    fn resolve_parent_of_top_level_path_is_root() {
        let mut document = document_with_reports();
        let (parent, leaf) = resolve_parent_mut(&mut document, "reports").unwrap();
        assert_eq!("reports", leaf);
        assert!(parent.folders.contains_key("reports"));
    }

    #[test]
    fn resolve_parent_of_nested_path() {
        let mut document = document_with_reports();
        let (parent, leaf) = resolve_parent_mut(&mut document, "reports/2024").unwrap();
        assert_eq!("2024", leaf);
        assert!(parent.folders.contains_key("2024"));
    }

    #[test]
    fn resolve_parent_of_root_is_rejected() {
        let mut document = document_with_reports();
        assert!(resolve_parent_mut(&mut document, "").is_err());
        assert!(resolve_parent_mut(&mut document, "/").is_err());
    }
}
