use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use crate::media::domain::upload_policy::{UploadError, UploadPolicy};

/// Raw upload as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A file that has been written under the upload root.
/// `public_path` is the URL path stored in the database.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub public_path: String,
    pub absolute_path: PathBuf,
}

#[derive(Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Validate the upload against `policy` and write it to
    /// `<root>/uploads/<folder>/<uuid>_<filename>`.
    pub async fn store(
        &self,
        policy: &UploadPolicy,
        upload: &ImageUpload,
    ) -> Result<StoredImage, UploadError> {
        policy.check(&upload.file_name, upload.bytes.len() as u64)?;

        let dir = self.root.join("uploads").join(policy.folder);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| UploadError::Storage(e.to_string()))?;

        let unique_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(&upload.file_name));
        let absolute_path = dir.join(&unique_name);

        if let Err(e) = fs::write(&absolute_path, &upload.bytes).await {
            // A partial file may have been left behind
            let _ = fs::remove_file(&absolute_path).await;
            return Err(UploadError::Storage(e.to_string()));
        }

        Ok(StoredImage {
            public_path: format!("/uploads/{}/{}", policy.folder, unique_name),
            absolute_path,
        })
    }

    /// Roll back a freshly stored file after a failed database write.
    pub async fn discard(&self, image: &StoredImage) {
        if let Err(e) = fs::remove_file(&image.absolute_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to discard image {}: {}", image.public_path, e);
            }
        }
    }

    /// Best-effort removal of a previously stored image by its public path.
    /// A missing file is not an error.
    pub async fn remove(&self, public_path: &str) {
        let Some(relative) = public_path.strip_prefix("/uploads/") else {
            warn!("Refusing to remove path outside the upload root: {}", public_path);
            return;
        };

        let absolute = self.root.join("uploads").join(relative);
        if let Err(e) = fs::remove_file(&absolute).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove image {}: {}", public_path, e);
            }
        }
    }
}

fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image");

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

    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn upload(name: &str, size: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            bytes: vec![0xAB; size],
        }
    }

    #[tokio::test]
    async fn stores_file_under_uploads_folder() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let policy = UploadPolicy::entity_image("projects");

        let stored = store.store(&policy, &upload("shot.png", 64)).await.unwrap();

        assert!(stored.public_path.starts_with("/uploads/projects/"));
        assert!(stored.public_path.ends_with("_shot.png"));
        assert!(stored.absolute_path.exists());
        assert_eq!(fs::read(&stored.absolute_path).await.unwrap().len(), 64);
    }

    #[tokio::test]
    async fn stored_names_are_unique_per_upload() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let policy = UploadPolicy::entity_image("projects");

        let first = store.store(&policy, &upload("shot.png", 8)).await.unwrap();
        let second = store.store(&policy, &upload("shot.png", 8)).await.unwrap();

        assert_ne!(first.public_path, second.public_path);
    }

    #[tokio::test]
    async fn rejects_invalid_upload_without_writing() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let policy = UploadPolicy::entity_image("projects");

        let result = store.store(&policy, &upload("malware.exe", 64)).await;

        assert!(matches!(result, Err(UploadError::UnsupportedFormat { .. })));
        assert!(!dir.path().join("uploads").join("projects").exists());
    }

    #[tokio::test]
    async fn sanitizes_hostile_file_names() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let policy = UploadPolicy::entity_image("projects");

        let stored = store
            .store(&policy, &upload("../../etc/pass wd.png", 16))
            .await
            .unwrap();

        // Only the file name component survives, odd characters replaced
        assert!(stored.public_path.ends_with("_pass_wd.png"));
        assert!(stored
            .absolute_path
            .starts_with(dir.path().join("uploads").join("projects")));
    }

    #[tokio::test]
    async fn discard_deletes_the_stored_file() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let policy = UploadPolicy::entity_image("certificates");

        let stored = store.store(&policy, &upload("cert.jpg", 32)).await.unwrap();
        store.discard(&stored).await;

        assert!(!stored.absolute_path.exists());
    }

    #[tokio::test]
    async fn remove_deletes_by_public_path() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let policy = UploadPolicy::profile_image();

        let stored = store.store(&policy, &upload("me.jpg", 32)).await.unwrap();
        store.remove(&stored.public_path).await;

        assert!(!stored.absolute_path.exists());
    }

    #[tokio::test]
    async fn remove_tolerates_missing_files() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        store.remove("/uploads/projects/gone.png").await;
    }

    #[tokio::test]
    async fn remove_ignores_paths_outside_upload_root() {
        let dir = tempdir().unwrap();
        let outside = dir.path().join("keep.txt");
        fs::write(&outside, b"keep").await.unwrap();

        let store = ImageStore::new(dir.path());
        store.remove("/keep.txt").await;

        assert!(outside.exists());
    }
}
