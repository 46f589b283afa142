//! Image upload storage.
//!
//! Uploaded files land on the local filesystem under the configured uploads
//! directory, split into `avatars/` and `posts/`. Filenames are regenerated
//! server side so client-supplied names never reach the disk.

use std::path::PathBuf;

use shared::validation::allowed_image_extension;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("unsupported image type")]
    UnsupportedType,

    #[error("file exceeds the {0} byte upload limit")]
    TooLarge(usize),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy)]
pub enum UploadKind {
    Avatar,
    PostImage,
}

impl UploadKind {
    fn subdir(self) -> &'static str {
        match self {
            UploadKind::Avatar => "avatars",
            UploadKind::PostImage => "posts",
        }
    }
}

#[derive(Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Creates the uploads directory tree if it does not exist yet.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for kind in [UploadKind::Avatar, UploadKind::PostImage] {
            tokio::fs::create_dir_all(self.root.join(kind.subdir())).await?;
        }
        Ok(())
    }

    /// Persists an uploaded image and returns its public URL path.
    pub async fn save(
        &self,
        kind: UploadKind,
        owner: Uuid,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let ext =
            allowed_image_extension(original_filename).ok_or(UploadError::UnsupportedType)?;
        if bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge(self.max_bytes));
        }

        let filename = format!("{}_{}.{}", owner, Uuid::new_v4().simple(), ext);
        let path = self.root.join(kind.subdir()).join(&filename);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "stored upload");
        Ok(format!("/uploads/{}/{}", kind.subdir(), filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_rejects_unknown_extension() {
        let store = UploadStore::new(std::env::temp_dir(), 1024);
        let err = store
            .save(UploadKind::Avatar, Uuid::new_v4(), "payload.exe", b"data")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType));
    }

    #[tokio::test]
    async fn save_rejects_oversized_file() {
        let store = UploadStore::new(std::env::temp_dir(), 4);
        let err = store
            .save(UploadKind::Avatar, Uuid::new_v4(), "pic.png", b"too big")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge(4)));
    }

    #[tokio::test]
    async fn save_writes_file_and_returns_url() {
        let root = std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4()));
        let store = UploadStore::new(&root, 1024);
        store.ensure_dirs().await.unwrap();

        let url = store
            .save(UploadKind::PostImage, Uuid::new_v4(), "photo.JPG", b"abc")
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/posts/"));
        assert!(url.ends_with(".jpg"));

        let on_disk = root.join(url.trim_start_matches("/uploads/"));
        assert_eq!(tokio::fs::read(on_disk).await.unwrap(), b"abc");
    }
}
