pub mod file_errors;
pub mod folder_errors;
pub mod metadata_errors;
