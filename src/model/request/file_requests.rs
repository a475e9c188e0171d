use rocket::fs::TempFile;
use rocket::FromForm;

/// a single-file multipart upload; the target folder is submitted alongside
/// the file rather than taken from a route segment
#[derive(FromForm)]
pub struct UploadRequest<'a> {
    pub file: TempFile<'a>,
    /// the slash-delimited path of the target folder; empty means root
    pub path: String,
}

#[derive(FromForm)]
pub struct DeleteFileRequest {
    #[field(name = "storedName")]
    pub stored_name: String,
    /// the slash-delimited path of the containing folder; empty means root
    pub path: String,
}
