use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// a single uploaded file as recorded in the metadata document.
///
/// `stored_name` is the server-generated physical file name (random token +
/// the client's original extension); `original_name` is display-only.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct FileEntry {
    #[serde(rename = "originalName")]
    pub original_name: String,
    #[serde(rename = "storedName")]
    pub stored_name: String,
    pub size: u64,
    #[serde(rename = "uploadDate")]
    pub upload_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl FileEntry {
    pub fn new(original_name: &str, stored_name: &str, size: u64) -> FileEntry {
        FileEntry {
            original_name: original_name.to_string(),
            stored_name: stored_name.to_string(),
            size,
            upload_date: Utc::now(),
            entry_type: String::from("file"),
        }
    }
}

/// a folder in the metadata document. The root of the document is itself a
/// folder node; a folder's name is the key under its parent's `folders` map.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct FolderNode {
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub folders: BTreeMap<String, FolderNode>,
}

impl FolderNode {
    pub fn empty() -> FolderNode {
        FolderNode {
            files: Vec::new(),
            folders: BTreeMap::new(),
        }
    }
}

/// the whole on-disk metadata tree; the document root is an implicit folder
pub type MetadataDocument = FolderNode;
