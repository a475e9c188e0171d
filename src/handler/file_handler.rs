use rocket::form::Form;
use rocket::response::Redirect;
use rocket::State;

use crate::guard::AdminSession;
use crate::handler::listing_redirect;
use crate::model::error::file_errors::{DeleteFileError, UploadFileError};
use crate::model::request::file_requests::{DeleteFileRequest, UploadRequest};
use crate::repository::MetadataStore;
use crate::service::file_service;

/// accepts a single-file multipart upload targeted at the folder named in
/// the form's `path` field. The size ceiling is enforced by rocket's form
/// limits before this handler runs.
#[post("/upload", data = "<upload>")]
pub async fn upload_file(
    upload: Form<UploadRequest<'_>>,
    _session: AdminSession,
    store: &State<MetadataStore>,
) -> Redirect {
    let mut upload = upload.into_inner();
    let path = upload.path.clone();
    let message = match file_service::upload_file(store, &mut upload).await {
        Ok(stored_name) => {
            log::info!("Stored upload as {stored_name} under '{path}'");
            "uploaded"
        }
        Err(UploadFileError::MissingInfo) => "missing-file-name",
        Err(UploadFileError::BadPath) => "bad-path",
        Err(UploadFileError::TargetNotFound) => "target-not-found",
        Err(UploadFileError::FailWriteDisk) => "filesystem-error",
        Err(UploadFileError::MetadataFailure) => "metadata-error",
    };
    listing_redirect(&path, message)
}

#[post("/file/delete", data = "<request>")]
pub async fn delete_file(
    request: Form<DeleteFileRequest>,
    _session: AdminSession,
    store: &State<MetadataStore>,
) -> Redirect {
    let request = request.into_inner();
    let message =
        match file_service::delete_file(store, &request.path, &request.stored_name).await {
            Ok(_) => "file-deleted",
            Err(DeleteFileError::BadPath) => "bad-path",
            Err(DeleteFileError::FolderNotFound) => "folder-not-found",
            Err(DeleteFileError::NotFound) => "file-not-found",
            Err(DeleteFileError::FileSystemFailure) => "filesystem-error",
            Err(DeleteFileError::MetadataFailure) => "metadata-error",
        };
    listing_redirect(&request.path, message)
}
