use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    config::Credentials, presigning::PresigningConfig, types::ObjectCannedAcl, Client,
};
use tracing::info;

use crate::errors::AppError;
use crate::settings::StorageConfig;
use crate::storage::UrlSigner;

/// S3-backed signer issuing presigned PUT URLs.
pub struct S3Signer {
    client: Client,
    bucket: String,
    expiry: Duration,
}

impl S3Signer {
    /// Builds the signer from the startup configuration. In production the
    /// static uploader credentials are required; elsewhere the ambient AWS
    /// credential chain is used (local development, CI).
    pub async fn from_config(storage: &StorageConfig, is_production: bool) -> Result<Self, AppError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(storage.region.clone()));

        if is_production {
            let (id, secret) = storage.uploader_keys().ok_or_else(|| {
                AppError::InternalError("Uploader credentials not configured".into())
            })?;
            loader = loader.credentials_provider(Credentials::new(
                id,
                secret,
                None,
                None,
                "plog-uploader",
            ));
        }

        let sdk_config = loader.load().await;

        info!(
            bucket = %storage.bucket,
            region = %storage.region,
            "Initialized S3 signing client"
        );

        Ok(S3Signer {
            client: Client::new(&sdk_config),
            bucket: storage.bucket.clone(),
            expiry: Duration::from_secs(storage.presign_expiry_secs),
        })
    }
}

#[async_trait]
impl UrlSigner for S3Signer {
    async fn presign_put(
        &self,
        object_key: &str,
        content_type: &str,
    ) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(self.expiry)
            .map_err(|e| AppError::InternalError(format!("Invalid presign expiry: {e}")))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key)
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to presign upload: {e}")))?;

        Ok(presigned.uri().to_string())
    }
}
