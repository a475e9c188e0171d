#[derive(PartialEq, Debug)]
pub enum LoadMetadataError {
    /// the metadata file exists but could not be read
    Io,
    /// the metadata file exists but does not hold valid JSON. This is
    /// surfaced loudly instead of being masked with an empty document,
    /// since an empty default would silently discard every existing entry
    Corrupt,
}

#[derive(PartialEq, Debug)]
pub enum SaveMetadataError {
    /// the document could not be serialized
    Serialize,
    /// the metadata file could not be written or swapped into place
    Io,
}

#[derive(PartialEq, Debug)]
pub enum ResolvePathError {
    /// a path segment is empty, `.`, `..`, or holds a disallowed character
    BadSegment,
    /// every segment was well-formed but one of them does not exist
    NotFound,
}
