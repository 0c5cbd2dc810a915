//! S3-compatible object store client.
//!
//! Charity photos live under `{charity_id}/logo.{ext}` and are publicly
//! resolvable; certificate documents are private and handed out as
//! presigned URLs.

use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// Maximum accepted image upload size in bytes (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for charity photos
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Validate an image upload before it goes anywhere near the bucket.
/// Returns the violation message, or None when the file is acceptable.
pub fn validate_image(size: usize, content_type: &str) -> Option<String> {
    if size > MAX_IMAGE_BYTES {
        return Some("File size must be less than 5MB".to_string());
    }

    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Some("File must be a JPEG, PNG, or WebP image".to_string());
    }

    None
}

/// S3/MinIO-backed object store
pub struct ObjectStore {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    public_endpoint: String,
    presigned_url_expiry_secs: u32,
}

impl ObjectStore {
    /// Create a new client from configuration. Does not touch the network;
    /// call [`ObjectStore::ensure_bucket_exists`] during startup.
    pub fn new(config: StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create storage bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        Ok(Self {
            bucket,
            region,
            credentials,
            public_endpoint: config.public_endpoint,
            presigned_url_expiry_secs: config.presigned_url_expiry_secs,
        })
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        // Try to create the bucket; an "already exists" response is fine
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                    Ok(())
                } else {
                    // Bucket might exist with a different error; don't block startup
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                    Ok(())
                }
            }
        }
    }

    async fn create_bucket(&self) -> Result<(), AppError> {
        Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await
        .map_err(|e| {
            AppError::Internal(format!(
                "Failed to create bucket '{}': {}",
                self.bucket.name(),
                e
            ))
        })?;

        Ok(())
    }

    /// Upload an object, replacing any existing object under the same key.
    pub async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| {
                AppError::ExternalService(format!("Failed to upload object '{}': {}", key, e))
            })?;

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());
        Ok(key.to_string())
    }

    /// Generate a presigned download URL for a private object (certificate
    /// documents).
    pub async fn presigned_url(&self, key: &str) -> Result<String, AppError> {
        self.bucket
            .presign_get(key, self.presigned_url_expiry_secs, None)
            .await
            .map_err(|e| {
                AppError::ExternalService(format!(
                    "Failed to generate presigned URL for '{}': {}",
                    key, e
                ))
            })
    }

    /// Direct public URL for an object (charity photos). The bucket policy
    /// for anonymous reads is a provisioning concern, not set up here.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }

    /// Storage key for a charity's photo: `{charity_id}/logo.{ext}`
    pub fn charity_photo_key(charity_id: uuid::Uuid, extension: &str) -> String {
        format!("{}/logo.{}", charity_id, extension)
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_validate_image_accepts_allowed_types() {
        assert_eq!(validate_image(1024, "image/jpeg"), None);
        assert_eq!(validate_image(1024, "image/png"), None);
        assert_eq!(validate_image(1024, "image/webp"), None);
    }

    #[test]
    fn test_validate_image_rejects_other_types() {
        assert!(validate_image(1024, "image/gif").is_some());
        assert!(validate_image(1024, "application/pdf").is_some());
        assert!(validate_image(1024, "").is_some());
    }

    #[test]
    fn test_validate_image_size_limit() {
        assert_eq!(validate_image(MAX_IMAGE_BYTES, "image/png"), None);
        assert!(validate_image(MAX_IMAGE_BYTES + 1, "image/png").is_some());
    }

    #[test]
    fn test_charity_photo_key_layout() {
        let id = Uuid::nil();
        assert_eq!(
            ObjectStore::charity_photo_key(id, "png"),
            format!("{}/logo.png", id)
        );
    }
}
