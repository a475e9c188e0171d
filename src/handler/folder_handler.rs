use rocket::form::Form;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;

use crate::guard::AdminSession;
use crate::handler::listing_redirect;
use crate::model::error::folder_errors::{CreateFolderError, DeleteFolderError, GetFolderError};
use crate::model::request::folder_requests::{CreateFolderRequest, DeleteFolderRequest};
use crate::model::response::folder_responses::GetFolderResponse;
use crate::model::response::BasicMessage;
use crate::repository::MetadataStore;
use crate::service::folder_service;

/// the admin listing: direct files and subfolders of the folder at `path`
#[get("/folder?<path>&<message>")]
pub fn list_folder(
    path: Option<String>,
    message: Option<String>,
    _session: AdminSession,
    store: &State<MetadataStore>,
) -> GetFolderResponse {
    // `message` is the status signal a post-redirect carries; display only
    let _ = message;
    let path = path.unwrap_or_default();
    match folder_service::list_folder(store, &path) {
        Ok(listing) => GetFolderResponse::Success(Json::from(listing)),
        Err(GetFolderError::BadPath) => {
            GetFolderResponse::BadPath(BasicMessage::new("The passed path holds an invalid segment."))
        }
        Err(GetFolderError::NotFound) => GetFolderResponse::FolderNotFound(BasicMessage::new(
            "The folder at the passed path could not be found.",
        )),
        Err(GetFolderError::MetadataFailure) => GetFolderResponse::MetadataError(
            BasicMessage::new("Failed to read folder metadata. Check server logs for details"),
        ),
    }
}

#[post("/folder/create", data = "<request>")]
pub async fn create_folder(
    request: Form<CreateFolderRequest>,
    _session: AdminSession,
    store: &State<MetadataStore>,
) -> Redirect {
    let request = request.into_inner();
    let message =
        match folder_service::create_folder(store, &request.path, &request.folder_name).await {
            Ok(_) => "folder-created",
            Err(CreateFolderError::InvalidName) => "invalid-name",
            Err(CreateFolderError::BadPath) => "bad-path",
            Err(CreateFolderError::AlreadyExists) => "folder-exists",
            Err(CreateFolderError::ParentNotFound) => "parent-not-found",
            Err(CreateFolderError::FileSystemFailure) => "filesystem-error",
            Err(CreateFolderError::MetadataFailure) => "metadata-error",
        };
    listing_redirect(&request.path, message)
}

/// deletes a folder tree; the redirect lands on the parent of the deleted
/// path since the path itself is gone
#[post("/folder/delete", data = "<request>")]
pub async fn delete_folder(
    request: Form<DeleteFolderRequest>,
    _session: AdminSession,
    store: &State<MetadataStore>,
) -> Redirect {
    let request = request.into_inner();
    let message = match folder_service::delete_folder(store, &request.path).await {
        Ok(_) => "folder-deleted",
        Err(DeleteFolderError::BadPath) => "bad-path",
        Err(DeleteFolderError::FolderNotFound) => "folder-not-found",
        Err(DeleteFolderError::FileSystemFailure) => "filesystem-error",
        Err(DeleteFolderError::MetadataFailure) => "metadata-error",
    };
    listing_redirect(folder_service::parent_path(&request.path), message)
}
