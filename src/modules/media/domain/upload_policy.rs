use std::path::Path;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UploadError {
    #[error("No file was provided")]
    Empty,

    #[error("File size exceeds the {limit_mb}MB limit")]
    TooLarge { limit_mb: u64 },

    #[error("Only {allowed} files are allowed")]
    UnsupportedFormat { allowed: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Constraints applied to a single image upload before it touches disk.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub allowed_extensions: &'static [&'static str],
    pub folder: &'static str,
}

impl UploadPolicy {
    pub const ENTITY_ALLOWED_EXTENSIONS: &'static [&'static str] =
        &["jpg", "jpeg", "png", "gif", "webp"];
    pub const PROFILE_ALLOWED_EXTENSIONS: &'static [&'static str] = &["jpg", "jpeg", "png", "gif"];

    /// Policy for images attached to portfolio entries.
    pub fn entity_image(folder: &'static str) -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            allowed_extensions: Self::ENTITY_ALLOWED_EXTENSIONS,
            folder,
        }
    }

    /// Policy for profile pictures. Tighter size cap, no webp.
    pub fn profile_image() -> Self {
        Self {
            max_file_size_bytes: 5 * 1024 * 1024,
            allowed_extensions: Self::PROFILE_ALLOWED_EXTENSIONS,
            folder: "profiles",
        }
    }

    pub fn check(&self, file_name: &str, size_bytes: u64) -> Result<(), UploadError> {
        if size_bytes == 0 {
            return Err(UploadError::Empty);
        }

        if size_bytes > self.max_file_size_bytes {
            return Err(UploadError::TooLarge {
                limit_mb: self.max_file_size_bytes / (1024 * 1024),
            });
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension {
            Some(ext) if self.allowed_extensions.contains(&ext.as_str()) => Ok(()),
            _ => Err(UploadError::UnsupportedFormat {
                allowed: self.allowed_extensions.join(", "),
            }),
        }
    }
}
