#[derive(PartialEq, Debug)]
pub enum GetFolderError {
    /// the path holds a malformed segment
    BadPath,
    /// a path segment does not exist in the metadata document
    NotFound,
    /// the metadata document could not be read
    MetadataFailure,
}

#[derive(PartialEq, Debug)]
pub enum CreateFolderError {
    /// the folder name is empty, `.`, `..`, or holds a disallowed character
    InvalidName,
    /// the parent path holds a malformed segment
    BadPath,
    /// a child with that name already exists in the parent
    AlreadyExists,
    /// the requested parent folder does not exist
    ParentNotFound,
    /// the file system failed to create the directory
    FileSystemFailure,
    /// the metadata document could not be read or persisted
    MetadataFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFolderError {
    /// the path is empty (the root cannot be deleted) or malformed
    BadPath,
    /// the named folder is not in the metadata document
    FolderNotFound,
    /// the directory tree could not be removed from disk
    FileSystemFailure,
    /// the metadata document could not be read or persisted
    MetadataFailure,
}
