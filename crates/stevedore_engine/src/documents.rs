use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::{FileDocument, PrepareError};

/// Limits applied while reading files for transport.
#[derive(Debug, Clone)]
pub struct PrepareSettings {
    pub max_bytes: u64,
}

impl Default for PrepareSettings {
    fn default() -> Self {
        Self {
            max_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Read the listed files and convert them to transportable documents.
///
/// Contents travel base64 encoded; the extension is carried separately so
/// the backend can pick a reader without sniffing.
pub async fn prepare_documents(
    paths: &[PathBuf],
    settings: &PrepareSettings,
) -> Result<Vec<FileDocument>, PrepareError> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        documents.push(prepare_document(path, settings).await?);
    }
    Ok(documents)
}

async fn prepare_document(
    path: &Path,
    settings: &PrepareSettings,
) -> Result<FileDocument, PrepareError> {
    let read_err = |source| PrepareError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(read_err)?;
    if metadata.len() > settings.max_bytes {
        return Err(PrepareError::TooLarge {
            path: path.to_path_buf(),
            max_bytes: settings.max_bytes,
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(read_err)?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileDocument {
        filename,
        extension,
        content: STANDARD.encode(&bytes),
    })
}
