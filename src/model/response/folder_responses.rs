use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

use crate::model::metadata::FolderNode;
use crate::model::response::file_responses::FileEntryResponse;
use crate::model::response::BasicMessage;

/// the admin listing of a single folder: its direct files and the names of
/// its direct subfolders
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct FolderListingResponse {
    pub path: String,
    pub folders: Vec<String>,
    pub files: Vec<FileEntryResponse>,
}

impl FolderListingResponse {
    pub fn from(path: &str, node: &FolderNode) -> FolderListingResponse {
        FolderListingResponse {
            path: path.to_string(),
            folders: node.folders.keys().cloned().collect(),
            files: node.files.iter().map(FileEntryResponse::from).collect(),
        }
    }
}

#[derive(Responder)]
pub enum GetFolderResponse {
    #[response(status = 200)]
    Success(Json<FolderListingResponse>),
    #[response(status = 400, content_type = "json")]
    BadPath(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    MetadataError(Json<BasicMessage>),
}
