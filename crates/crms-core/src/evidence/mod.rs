//! Evidence file handling
//!
//! Files attached to a crime report are written to a [`BlobStore`] under a
//! key derived from the report id; the report keeps the public URLs.

pub mod memory;

pub use memory::MemoryBlobStore;

use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
const ALL_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "heic", "mp4", "mov", "webm", "pdf", "doc", "docx",
];

/// One uploaded file, as received.
#[derive(Debug, Clone)]
pub struct EvidenceUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl EvidenceUpload {
    /// Lowercased extension of the original file name.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        let ext = ext.to_lowercase();
        if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(ext)
        } else {
            None
        }
    }

    /// Photos, videos, PDFs and Word documents are accepted.
    ///
    /// The extension is what the file is served as, so it must always be a
    /// known one, and must belong to the same family as a declared type.
    pub fn check(&self) -> CoreResult<()> {
        if self.bytes.is_empty() {
            return Err(CoreError::validation(format!(
                "{} is empty",
                self.file_name
            )));
        }

        let family = match self.content_type.as_deref() {
            Some(ct) if ct != "application/octet-stream" => {
                if ct.starts_with("image/") {
                    Some(IMAGE_EXTENSIONS)
                } else if ct.starts_with("video/") {
                    Some(VIDEO_EXTENSIONS)
                } else if DOCUMENT_TYPES.contains(&ct) {
                    Some(DOCUMENT_EXTENSIONS)
                } else {
                    None
                }
            }
            _ => Some(ALL_EXTENSIONS),
        };
        let allowed = match (family, self.extension()) {
            (Some(family), Some(ext)) => family.contains(&ext.as_str()),
            _ => false,
        };

        if allowed {
            Ok(())
        } else {
            Err(CoreError::validation(format!(
                "{} is not an accepted evidence type",
                self.file_name
            )))
        }
    }

    /// SHA-256 of the file contents, hex encoded.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

/// Key for a new evidence object: `{crime_id}/{unix_millis}-{random}.{ext}`.
pub fn object_key(crime_id: Uuid, upload: &EvidenceUpload, now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    let ext = upload.extension().unwrap_or_else(|| "bin".to_string());
    format!("{}/{}-{}.{}", crime_id, now.timestamp_millis(), suffix, ext)
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8]) -> CoreResult<()>;

    async fn remove(&self, key: &str) -> CoreResult<()>;

    /// URL under which a stored object is served.
    fn public_url(&self, key: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: Option<&str>) -> EvidenceUpload {
        EvidenceUpload {
            file_name: name.to_string(),
            content_type: content_type.map(str::to_string),
            bytes: b"data".to_vec(),
        }
    }

    #[test]
    fn test_accepted_types() {
        assert!(upload("scene.JPG", Some("image/jpeg")).check().is_ok());
        assert!(upload("clip.mp4", Some("video/mp4")).check().is_ok());
        assert!(upload("statement.pdf", Some("application/pdf")).check().is_ok());
        assert!(upload("statement.docx", None).check().is_ok());
        assert!(upload("photo.png", Some("application/octet-stream")).check().is_ok());
        assert!(upload("payload.exe", Some("application/x-msdownload")).check().is_err());
        assert!(upload("noext", None).check().is_err());
    }

    #[test]
    fn test_extension_must_match_declared_type() {
        assert!(upload("evil.html", Some("image/png")).check().is_err());
        assert!(upload("evil.svg", Some("image/svg+xml")).check().is_err());
        assert!(upload("clip.png", Some("video/mp4")).check().is_err());
        assert!(upload("notes.jpg", Some("application/pdf")).check().is_err());
        assert!(upload("photo", Some("image/jpeg")).check().is_err());
        assert!(upload("page.html", None).check().is_err());
        assert!(upload("scene.jpeg", Some("image/png")).check().is_ok());
        assert!(upload("clip.MOV", Some("video/quicktime")).check().is_ok());
    }

    #[test]
    fn test_empty_file_rejected() {
        let mut empty = upload("a.png", Some("image/png"));
        empty.bytes.clear();
        assert!(empty.check().is_err());
    }

    #[test]
    fn test_object_key_layout() {
        let crime_id = Uuid::new_v4();
        let now = Utc::now();
        let key = object_key(crime_id, &upload("Scene.JPEG", None), now);

        let (prefix, name) = key.split_once('/').unwrap();
        assert_eq!(prefix, crime_id.to_string());
        let (stamp, rest) = name.split_once('-').unwrap();
        assert_eq!(stamp, now.timestamp_millis().to_string());
        let (random, ext) = rest.split_once('.').unwrap();
        assert_eq!(random.len(), 7);
        assert_eq!(ext, "jpeg");
    }

    #[test]
    fn test_content_hash() {
        let hash = upload("a.png", None).content_hash();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, upload("b.png", None).content_hash());
    }
}
