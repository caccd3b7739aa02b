//! Directory loading: `.txt` files → [`Document`]s.

use std::path::Path;

use tracing::{info, warn};

use crate::document::Document;
use crate::error::{RagError, Result};

/// Load every `.txt` file in a directory as one [`Document`] each.
///
/// The file name (not the full path) becomes the document ID. Files are
/// read whole — documents are assumed small — and visited in sorted
/// file-name order so repeated runs produce the same documents in the
/// same order. Subdirectories and non-`.txt` entries are ignored.
///
/// A file that cannot be read or is not valid UTF-8 is skipped with a
/// warning; it does not abort the run.
///
/// # Errors
///
/// Returns [`RagError::Load`] if `path` does not exist or cannot be
/// listed as a directory.
pub async fn load_directory(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let mut entries = tokio::fs::read_dir(path).await.map_err(|e| RagError::Load {
        path: path.to_path_buf(),
        message: format!("cannot read directory: {e}"),
    })?;

    let mut file_paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| RagError::Load {
        path: path.to_path_buf(),
        message: format!("cannot list directory: {e}"),
    })? {
        let entry_path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);
        if is_file && entry_path.extension().is_some_and(|ext| ext == "txt") {
            file_paths.push(entry_path);
        }
    }
    file_paths.sort();

    let mut documents = Vec::new();
    for file_path in file_paths {
        let Some(name) = file_path.file_name().and_then(|n| n.to_str()) else {
            warn!(path = %file_path.display(), "skipping file with non-UTF-8 name");
            continue;
        };

        match tokio::fs::read_to_string(&file_path).await {
            Ok(text) => documents.push(Document::new(name, text)),
            Err(e) => {
                warn!(path = %file_path.display(), error = %e, "skipping unreadable file");
            }
        }
    }

    info!(directory = %path.display(), document_count = documents.len(), "loaded documents");
    Ok(documents)
}
