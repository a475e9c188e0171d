use std::path::{Path, PathBuf};

use rocket::tokio::sync::{Mutex, MutexGuard};

use crate::model::error::metadata_errors::{LoadMetadataError, SaveMetadataError};
use crate::model::metadata::MetadataDocument;

pub mod metadata_repository;

/// handle on the persisted metadata document and the physical upload tree.
///
/// Every mutating operation must run its whole read-resolve-mutate-save
/// sequence while holding [`MetadataStore::lock_writes`]; two interleaved
/// read-modify-write cycles would otherwise lose the earlier writer's change.
pub struct MetadataStore {
    metadata_path: PathBuf,
    upload_root: PathBuf,
    write_lock: Mutex<()>,
}

impl MetadataStore {
    pub fn new(metadata_path: PathBuf, upload_root: PathBuf) -> MetadataStore {
        MetadataStore {
            metadata_path,
            upload_root,
            write_lock: Mutex::new(()),
        }
    }

    /// builds the store from the application config
    pub fn open() -> MetadataStore {
        MetadataStore::new(metadata_file(), upload_root())
    }

    /// serializes mutating operations; hold the guard until the document has
    /// been saved back to disk
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub fn load(&self) -> Result<MetadataDocument, LoadMetadataError> {
        metadata_repository::load(&self.metadata_path)
    }

    pub fn save(&self, document: &MetadataDocument) -> Result<(), SaveMetadataError> {
        metadata_repository::save(&self.metadata_path, document)
    }

    pub fn upload_root(&self) -> &Path {
        &self.upload_root
    }

    /// maps a validated slash-delimited folder path onto the physical
    /// directory under the upload root
    pub fn physical_path(&self, path: &str) -> PathBuf {
        let mut physical = self.upload_root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            physical.push(segment);
        }
        physical
    }
}

#[cfg(not(test))]
pub fn upload_root() -> PathBuf {
    use crate::config::FILEDROP_CONFIG;
    PathBuf::from(&FILEDROP_CONFIG.storage.upload_root)
}

#[cfg(test)]
pub fn upload_root() -> PathBuf {
    PathBuf::from(format!("./{}_files", crate::test::current_thread_name()))
}

#[cfg(not(test))]
pub fn metadata_file() -> PathBuf {
    use crate::config::FILEDROP_CONFIG;
    PathBuf::from(&FILEDROP_CONFIG.storage.metadata_file)
}

#[cfg(test)]
pub fn metadata_file() -> PathBuf {
    PathBuf::from(format!("./{}_meta.json", crate::test::current_thread_name()))
}

#[cfg(not(test))]
pub fn credentials_file() -> PathBuf {
    use crate::config::FILEDROP_CONFIG;
    PathBuf::from(&FILEDROP_CONFIG.auth.credentials_file)
}

#[cfg(test)]
pub fn credentials_file() -> PathBuf {
    PathBuf::from(format!("./{}_creds.json", crate::test::current_thread_name()))
}
