//! Upload store - keeps uploaded images on disk
//!
//! Files land in the upload folder under a sanitized name prefixed with a
//! short random id, so two uploads of `car.jpg` never overwrite each other.
//! The folder is served at [`PUBLIC_PREFIX`].

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{StorageError, StorageResult};

/// URL prefix stored uploads are served under
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Longest file name kept from the client
const MAX_NAME_LEN: usize = 100;

/// An upload written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Sanitized name as given by the client
    pub original_name: String,
    /// Name on disk
    pub stored_name: String,
    pub path: PathBuf,
}

impl StoredUpload {
    /// Path the browser can load the image from
    pub fn public_path(&self) -> String {
        format!("{}/{}", PUBLIC_PREFIX, self.stored_name)
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create the store, creating the folder if needed
    pub async fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> StorageResult<StoredUpload> {
        let original_name = sanitize_file_name(file_name)
            .ok_or_else(|| StorageError::InvalidName(file_name.to_string()))?;

        let id = Uuid::new_v4().simple().to_string();
        let stored_name = format!("{}_{}", &id[..8], original_name);
        let path = self.dir.join(&stored_name);

        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "upload stored");

        Ok(StoredUpload {
            original_name,
            stored_name,
            path,
        })
    }
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes
/// `_`. Directory parts are dropped. Returns `None` if nothing is left.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        return None;
    }

    let mut cleaned = cleaned.to_string();
    if cleaned.len() > MAX_NAME_LEN {
        // Keep the extension, OCR.Space sniffs the type from it.
        let ext = cleaned
            .rsplit_once('.')
            .map(|(_, e)| e.to_string())
            .filter(|e| e.len() < 10);
        cleaned.truncate(MAX_NAME_LEN);
        if let Some(ext) = ext {
            cleaned.truncate(MAX_NAME_LEN - ext.len() - 1);
            cleaned.push('.');
            cleaned.push_str(&ext);
        }
    }
    Some(cleaned)
}
