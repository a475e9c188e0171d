use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::metadata::FileEntry;

/// a file entry as shown in the admin folder listing
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct FileEntryResponse {
    #[serde(rename = "originalName")]
    pub original_name: String,
    #[serde(rename = "storedName")]
    pub stored_name: String,
    pub size: u64,
    #[serde(rename = "uploadDate")]
    pub upload_date: DateTime<Utc>,
}

impl FileEntryResponse {
    pub fn from(f: &FileEntry) -> FileEntryResponse {
        FileEntryResponse {
            original_name: String::from(&f.original_name),
            stored_name: String::from(&f.stored_name),
            size: f.size,
            upload_date: f.upload_date,
        }
    }
}
