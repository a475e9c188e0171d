use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use uuid::Uuid;

use crate::model::error::file_errors::{DeleteFileError, UploadFileError};
use crate::model::error::metadata_errors::{LoadMetadataError, ResolvePathError};
use crate::model::metadata::{FileEntry, FolderNode};
use crate::model::request::file_requests::UploadRequest;
use crate::repository::metadata_repository::{resolve_mut, split_path};
use crate::repository::MetadataStore;

/// builds the physical file name for an upload: a random token plus the
/// client file's extension, taken verbatim from the client-supplied name
pub fn generate_stored_name(original_name: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    match Path::new(original_name).extension() {
        Some(extension) => format!("{token}.{}", extension.to_string_lossy()),
        None => token,
    }
}

/// saves an uploaded file to disk and records it in the metadata document.
///
/// The physical write happens first; if the metadata step then fails (target
/// folder gone, document unreadable or unwritable) the just-written file is
/// deleted again as a best-effort compensation. Returns the stored name on
/// success.
pub async fn upload_file(
    store: &MetadataStore,
    upload: &mut UploadRequest<'_>,
) -> Result<String, UploadFileError> {
    let original_name = match upload.file.raw_name() {
        Some(name) => {
            // the raw client name is display-only metadata, but strip any
            // directory part before using it
            let raw = name.dangerous_unsafe_unsanitized_raw().as_str();
            match Path::new(raw).file_name() {
                Some(base) => base.to_string_lossy().to_string(),
                None => return Err(UploadFileError::MissingInfo),
            }
        }
        None => return Err(UploadFileError::MissingInfo),
    };
    if split_path(&upload.path).is_err() {
        return Err(UploadFileError::BadPath);
    }
    let stored_name = generate_stored_name(&original_name);
    let size = upload.file.len();
    let _guard = store.lock_writes().await;
    let directory = store.physical_path(&upload.path);
    if let Err(e) = fs::create_dir_all(&directory) {
        log::error!(
            "Failed to create upload directory {directory:?}. Nested exception is {e:?}"
        );
        return Err(UploadFileError::FailWriteDisk);
    }
    let destination = directory.join(&stored_name);
    if let Err(e) = upload.file.persist_to(&destination).await {
        log::error!("Failed to write uploaded file {destination:?}. Nested exception is {e:?}");
        return Err(UploadFileError::FailWriteDisk);
    }
    // the target folder is checked only now, against a fresh document; a
    // folder deleted mid-flight rejects the upload after the fact
    let mut document = match store.load() {
        Ok(document) => document,
        Err(_) => {
            compensate_delete(&destination);
            return Err(UploadFileError::MetadataFailure);
        }
    };
    let folder = match resolve_mut(&mut document, &upload.path) {
        Ok(folder) => folder,
        Err(_) => {
            compensate_delete(&destination);
            return Err(UploadFileError::TargetNotFound);
        }
    };
    folder
        .files
        .push(FileEntry::new(&original_name, &stored_name, size));
    if store.save(&document).is_err() {
        compensate_delete(&destination);
        return Err(UploadFileError::MetadataFailure);
    }
    Ok(stored_name)
}

/// best-effort undo of the physical half of an upload whose metadata half
/// failed; a crash before this runs can still leave an orphan for the
/// startup reconciliation to report
fn compensate_delete(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        log::warn!(
            "Failed to clean up file {path:?} after a failed upload. Nested exception is {e:?}"
        );
    }
}

/// deletes a file's bytes and its metadata entry. A file already gone from
/// disk is tolerated; its metadata entry is still removed.
pub async fn delete_file(
    store: &MetadataStore,
    folder_path: &str,
    stored_name: &str,
) -> Result<(), DeleteFileError> {
    let _guard = store.lock_writes().await;
    let mut document = store.load().map_err(|_| DeleteFileError::MetadataFailure)?;
    let folder = match resolve_mut(&mut document, folder_path) {
        Ok(folder) => folder,
        Err(ResolvePathError::BadSegment) => return Err(DeleteFileError::BadPath),
        Err(ResolvePathError::NotFound) => return Err(DeleteFileError::FolderNotFound),
    };
    let index = folder
        .files
        .iter()
        .position(|f| f.stored_name == stored_name)
        .ok_or(DeleteFileError::NotFound)?;
    // the join is safe: stored names are server-generated and never hold a
    // path separator
    let physical = store.physical_path(folder_path).join(stored_name);
    match fs::remove_file(&physical) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("File {physical:?} was already gone from disk, removing its metadata");
        }
        Err(e) => {
            log::error!("Failed to delete file {physical:?}. Nested exception is {e:?}");
            return Err(DeleteFileError::FileSystemFailure);
        }
    }
    folder.files.remove(index);
    store
        .save(&document)
        .map_err(|_| DeleteFileError::MetadataFailure)?;
    Ok(())
}

/// startup pass that walks the metadata document against the physical tree
/// and converges the two: entries whose physical file is missing are
/// dropped, missing directories are recreated, and physical items with no
/// metadata entry are logged as orphans (the public surface still serves
/// them). The repaired document is only written back if something changed.
pub fn reconcile(store: &MetadataStore) -> Result<(), LoadMetadataError> {
    let mut document = store.load()?;
    let mut changed = false;
    reconcile_node(&mut document, store.upload_root(), "", &mut changed);
    if changed {
        if let Err(e) = store.save(&document) {
            log::error!("Failed to persist reconciled metadata. Nested exception is {e:?}");
        }
    }
    Ok(())
}

fn reconcile_node(node: &mut FolderNode, directory: &Path, path: &str, changed: &mut bool) {
    node.files.retain(|entry| {
        let exists = directory.join(&entry.stored_name).is_file();
        if !exists {
            log::warn!(
                "Dropping metadata entry {} under '{path}': its physical file is missing",
                entry.stored_name
            );
            *changed = true;
        }
        exists
    });
    for (name, child) in node.folders.iter_mut() {
        let child_dir = directory.join(name);
        let child_path = if path.is_empty() {
            name.clone()
        } else {
            format!("{path}/{name}")
        };
        if !child_dir.is_dir() {
            if let Err(e) = fs::create_dir_all(&child_dir) {
                log::error!(
                    "Failed to recreate missing directory {child_dir:?}. Nested exception is {e:?}"
                );
                continue;
            }
            log::warn!("Recreated missing directory for folder '{child_path}'");
        }
        reconcile_node(child, &child_dir, &child_path, changed);
    }
    log_orphans(node, directory, path);
}

fn log_orphans(node: &FolderNode, directory: &Path, path: &str) {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        let known = if entry.path().is_dir() {
            node.folders.contains_key(&name)
        } else {
            node.files.iter().any(|f| f.stored_name == name)
        };
        if !known {
            log::warn!(
                "Orphan '{name}' under '{path}' has no metadata entry; it stays reachable through the public prefix only"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::test::current_thread_name;

    use super::*;

    #[test]
    fn reconcile_drops_dangling_entries_and_recreates_directories() {
        let name = current_thread_name();
        let root = PathBuf::from(format!("./{name}_rec_files"));
        let metadata = PathBuf::from(format!("./{name}_rec_meta.json"));
        fs::remove_dir_all(&root).unwrap_or(());
        fs::remove_file(&metadata).unwrap_or(());
        fs::create_dir_all(&root).unwrap();

        let mut document = FolderNode::empty();
        let mut reports = FolderNode::empty();
        reports
            .files
            .push(FileEntry::new("gone.txt", "deadbeef.txt", 5));
        document.folders.insert(String::from("reports"), reports);
        let store = MetadataStore::new(metadata.clone(), root.clone());
        store.save(&document).unwrap();

        // neither the reports directory nor its file exist on disk
        reconcile(&store).unwrap();

        let repaired = store.load().unwrap();
        assert!(repaired.folders.get("reports").unwrap().files.is_empty());
        assert!(root.join("reports").is_dir());
        fs::remove_dir_all(&root).unwrap_or(());
        fs::remove_file(&metadata).unwrap_or(());
    }

    #[test]
    fn reconcile_keeps_entries_whose_files_exist() {
        let name = current_thread_name();
        let root = PathBuf::from(format!("./{name}_keep_files"));
        let metadata = PathBuf::from(format!("./{name}_keep_meta.json"));
        fs::remove_dir_all(&root).unwrap_or(());
        fs::remove_file(&metadata).unwrap_or(());
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("cafef00d.txt"), "bytes").unwrap();

        let mut document = FolderNode::empty();
        document
            .files
            .push(FileEntry::new("kept.txt", "cafef00d.txt", 5));
        let store = MetadataStore::new(metadata.clone(), root.clone());
        store.save(&document).unwrap();

        reconcile(&store).unwrap();

        assert_eq!(document, store.load().unwrap());
        fs::remove_dir_all(&root).unwrap_or(());
        fs::remove_file(&metadata).unwrap_or(());
    }

    #[test]
    fn stored_name_keeps_the_original_extension() {
        let name = generate_stored_name("report.pdf");
        assert!(name.ends_with(".pdf"));
        assert_eq!(32 + 4, name.len());
    }

    #[test]
    fn stored_name_without_extension_is_just_the_token() {
        let name = generate_stored_name("README");
        assert_eq!(32, name.len());
        assert!(!name.contains('.'));
    }

    #[test]
    fn stored_names_do_not_collide() {
        assert_ne!(generate_stored_name("a.txt"), generate_stored_name("a.txt"));
    }
}
