use rocket::FromForm;

#[derive(FromForm)]
pub struct CreateFolderRequest {
    /// the name of the new folder, a single path segment
    #[field(name = "folderName")]
    pub folder_name: String,
    /// the slash-delimited path of the parent folder; empty means root
    pub path: String,
}

#[derive(FromForm)]
pub struct DeleteFolderRequest {
    /// the full slash-delimited path of the folder to delete
    pub path: String,
}
