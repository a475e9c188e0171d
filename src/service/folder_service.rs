use std::fs;
use std::io::ErrorKind;

use crate::model::error::folder_errors::{CreateFolderError, DeleteFolderError, GetFolderError};
use crate::model::error::metadata_errors::ResolvePathError;
use crate::model::metadata::FolderNode;
use crate::model::response::folder_responses::FolderListingResponse;
use crate::repository::metadata_repository::{check_segment, resolve, resolve_mut, resolve_parent_mut};
use crate::repository::MetadataStore;

/// lists the direct files and subfolders of the folder at `path`
pub fn list_folder(
    store: &MetadataStore,
    path: &str,
) -> Result<FolderListingResponse, GetFolderError> {
    let document = store.load().map_err(|_| GetFolderError::MetadataFailure)?;
    let node = resolve(&document, path).map_err(|e| match e {
        ResolvePathError::BadSegment => GetFolderError::BadPath,
        ResolvePathError::NotFound => GetFolderError::NotFound,
    })?;
    Ok(FolderListingResponse::from(path.trim_matches('/'), node))
}

/// creates a folder named `name` under `parent_path`, on disk and in the
/// metadata document
pub async fn create_folder(
    store: &MetadataStore,
    parent_path: &str,
    name: &str,
) -> Result<(), CreateFolderError> {
    if check_segment(name).is_err() {
        return Err(CreateFolderError::InvalidName);
    }
    // hold the write lock across the whole read-modify-write so a racing
    // create cannot lose this one's entry
    let _guard = store.lock_writes().await;
    let mut document = store
        .load()
        .map_err(|_| CreateFolderError::MetadataFailure)?;
    let parent = match resolve_mut(&mut document, parent_path) {
        Ok(parent) => parent,
        Err(ResolvePathError::BadSegment) => return Err(CreateFolderError::BadPath),
        Err(ResolvePathError::NotFound) => return Err(CreateFolderError::ParentNotFound),
    };
    // a physical name collides whether the sibling is a folder or a file
    let name_taken = parent.folders.contains_key(name)
        || parent.files.iter().any(|f| f.stored_name == name);
    if name_taken {
        return Err(CreateFolderError::AlreadyExists);
    }
    let full_path = join_path(parent_path, name);
    if let Err(e) = fs::create_dir_all(store.physical_path(&full_path)) {
        log::error!("Failed to create directory for {full_path}. Nested exception is {e:?}");
        return Err(CreateFolderError::FileSystemFailure);
    }
    parent.folders.insert(name.to_string(), FolderNode::empty());
    store
        .save(&document)
        .map_err(|_| CreateFolderError::MetadataFailure)?;
    Ok(())
}

/// deletes the folder at `path` along with everything under it, on disk and
/// in the metadata document. The root cannot be deleted.
pub async fn delete_folder(store: &MetadataStore, path: &str) -> Result<(), DeleteFolderError> {
    let _guard = store.lock_writes().await;
    let mut document = store
        .load()
        .map_err(|_| DeleteFolderError::MetadataFailure)?;
    let (parent, leaf) = match resolve_parent_mut(&mut document, path) {
        Ok(resolved) => resolved,
        Err(ResolvePathError::BadSegment) => return Err(DeleteFolderError::BadPath),
        Err(ResolvePathError::NotFound) => return Err(DeleteFolderError::FolderNotFound),
    };
    if !parent.folders.contains_key(leaf) {
        return Err(DeleteFolderError::FolderNotFound);
    }
    // remove the physical tree first; only a missing directory is tolerated
    match fs::remove_dir_all(store.physical_path(path)) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Directory for {path} was already gone from disk, removing its metadata");
        }
        Err(e) => {
            log::error!("Failed to remove directory for {path}. Nested exception is {e:?}");
            return Err(DeleteFolderError::FileSystemFailure);
        }
    }
    parent.folders.remove(leaf);
    store
        .save(&document)
        .map_err(|_| DeleteFolderError::MetadataFailure)?;
    Ok(())
}

/// the parent of a slash-delimited path; the parent of a top-level folder is
/// the root (empty path)
pub fn parent_path(path: &str) -> &str {
    let trimmed = path.trim_matches('/');
    match trimmed.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => "",
    }
}

fn join_path(parent: &str, name: &str) -> String {
    let trimmed = parent.trim_matches('/');
    if trimmed.is_empty() {
        name.to_string()
    } else {
        format!("{trimmed}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_path_of_nested_folder() {
        assert_eq!("reports", parent_path("reports/2024"));
        assert_eq!("", parent_path("reports"));
        assert_eq!("", parent_path("/reports/"));
    }

    #[test]
    fn join_path_skips_empty_parent() {
        assert_eq!("reports", join_path("", "reports"));
        assert_eq!("reports/2024", join_path("reports", "2024"));
        assert_eq!("reports/2024", join_path("/reports/", "2024"));
    }
}
