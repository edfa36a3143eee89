pub mod s3;

use async_trait::async_trait;

use crate::errors::AppError;

#[cfg(test)]
use mockall::automock;

/// Signing capability seam. Produces a time-limited authorization for a
/// single write to one exact object path.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UrlSigner: Send + Sync {
    async fn presign_put(&self, object_key: &str, content_type: &str)
        -> Result<String, AppError>;
}
