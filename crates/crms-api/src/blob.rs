//! Evidence files on local disk, served back under `/files`

use async_trait::async_trait;
use crms_core::{BlobStore, CoreError, CoreResult};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::warn;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub struct LocalBlobStore {
    root: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys are relative paths; anything that would escape the root is refused.
    fn path_for(&self, key: &str) -> CoreResult<PathBuf> {
        let relative = Path::new(key);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(CoreError::Blob(format!("invalid object key {}", key)));
        }
        Ok(self.root.join(relative))
    }
}

/// Write the whole object, removing the partial file if any write fails.
async fn write_or_discard<W>(writer: &mut W, path: &Path, bytes: &[u8]) -> CoreResult<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(bytes).await?;
        writer.flush().await
    }
    .await;
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(path).await {
            warn!("Failed to remove partial object {}: {}", path.display(), cleanup);
        }
        return Err(e.into());
    }
    Ok(())
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> CoreResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => CoreError::Blob(format!("{} already exists", key)),
                _ => CoreError::Io(e),
            })?;
        write_or_discard(&mut file, &path, bytes).await
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("crms-blobs-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_put_and_remove() {
        let root = scratch_dir();
        let store = LocalBlobStore::new(&root, "http://localhost:3000/files/");

        store.put("case/1-abc.jpg", b"jpeg").await.unwrap();
        assert_eq!(fs::read(root.join("case/1-abc.jpg")).await.unwrap(), b"jpeg");
        assert!(store.put("case/1-abc.jpg", b"again").await.is_err());
        assert_eq!(
            store.public_url("case/1-abc.jpg"),
            "http://localhost:3000/files/case/1-abc.jpg"
        );

        store.remove("case/1-abc.jpg").await.unwrap();
        store.remove("case/1-abc.jpg").await.unwrap();
        assert!(!root.join("case/1-abc.jpg").exists());

        let _ = std::fs::remove_dir_all(root);
    }

    struct BrokenDisk;

    impl AsyncWrite for BrokenDisk {
        fn poll_write(
            self: Pin<&mut Self>,
            _: &mut Context<'_>,
            _: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::new(ErrorKind::Other, "disk full")))
        }

        fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_file() {
        let root = scratch_dir();
        fs::create_dir_all(&root).await.unwrap();
        let path = root.join("1-abc.jpg");
        fs::write(&path, b"").await.unwrap();

        let err = write_or_discard(&mut BrokenDisk, &path, b"jpeg").await.unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
        assert!(!path.exists());

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_keys_cannot_escape_root() {
        let store = LocalBlobStore::new(scratch_dir(), "/files");
        assert!(store.put("../outside.txt", b"x").await.is_err());
        assert!(store.put("/etc/passwd", b"x").await.is_err());
    }
}
