#[derive(PartialEq, Debug)]
pub enum UploadFileError {
    /// the client request is missing the file or its name
    MissingInfo,
    /// the target path holds a malformed segment
    BadPath,
    /// the target folder does not exist in the metadata document. The
    /// physical file has already been written at this point; the handler
    /// compensates by deleting it again
    TargetNotFound,
    /// the file bytes could not be written to disk
    FailWriteDisk,
    /// the metadata document could not be read or persisted
    MetadataFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFileError {
    /// the containing folder path is malformed
    BadPath,
    /// the containing folder does not exist
    FolderNotFound,
    /// no entry with the passed stored name exists in the folder
    NotFound,
    /// the file could not be removed from disk
    FileSystemFailure,
    /// the metadata document could not be read or persisted
    MetadataFailure,
}
