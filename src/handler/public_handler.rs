use std::path::PathBuf;

use rocket::fs::NamedFile;
use rocket::State;

use crate::repository::MetadataStore;

/// anonymous retrieval under the public prefix. Resolution is purely
/// physical: the metadata document is never consulted, so a file orphaned
/// from metadata is still served. Rocket's segment rules already refuse
/// `..` traversal in `path`.
#[get("/<path..>")]
pub async fn serve_file(path: PathBuf, store: &State<MetadataStore>) -> Option<NamedFile> {
    let physical = store.upload_root().join(path);
    if !physical.is_file() {
        return None;
    }
    NamedFile::open(physical).await.ok()
}
