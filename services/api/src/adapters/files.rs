//! services/api/src/adapters/files.rs
//!
//! This module contains the local filesystem adapter, which is the concrete
//! implementation of the `FileStorageService` port from the `core` crate.
//! The registry only ever sees the opaque path this adapter returns.

use async_trait::async_trait;
use contract_review_core::ports::{FileStorageService, PortError, PortResult};
use std::path::PathBuf;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A blob-storage adapter that writes uploaded files under a single directory.
#[derive(Clone)]
pub struct LocalFileStore {
    upload_dir: PathBuf,
}

impl LocalFileStore {
    /// Creates a new `LocalFileStore` rooted at `upload_dir`.
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }
}

/// Keeps only the final path component and replaces anything that is not a
/// plain filename character, so a crafted name cannot escape the upload dir.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

//=========================================================================================
// `FileStorageService` Trait Implementation
//=========================================================================================

#[async_trait]
impl FileStorageService for LocalFileStore {
    async fn store_file(&self, file_name: &str, bytes: &[u8]) -> PortResult<String> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(file_name));
        let path = self.upload_dir.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(path.to_string_lossy().into_owned())
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_bytes_under_the_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path().to_path_buf());

        let file_ref = store.store_file("msa.pdf", b"contract body").await.unwrap();
        let written = tokio::fs::read(&file_ref).await.unwrap();
        assert_eq!(written, b"contract body");
        assert!(file_ref.starts_with(dir.path().to_str().unwrap()));
    }

    #[tokio::test]
    async fn sanitizes_path_traversal_in_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path().to_path_buf());

        let file_ref = store
            .store_file("../../etc/passwd", b"nope")
            .await
            .unwrap();
        assert!(file_ref.starts_with(dir.path().to_str().unwrap()));
        assert!(file_ref.ends_with("passwd"));
    }
}
