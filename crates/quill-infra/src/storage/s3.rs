//! S3-compatible object storage.
//!
//! Works against AWS S3 proper as well as MinIO and other S3 gateways,
//! which is why the client forces path-style addressing.

use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::primitives::ByteStream;
use uuid::Uuid;

use quill_core::ports::{ObjectStorage, StorageError};

/// S3 connection configuration.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Object storage backed by an S3-compatible service.
#[derive(Clone)]
pub struct S3Storage {
    client: s3::Client,
    endpoint: String,
    bucket: String,
}

impl S3Storage {
    pub fn new(config: &S3Config) -> Self {
        let credentials = s3::config::Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "static",
        );

        let sdk_config = s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .region(s3::config::Region::new(config.region.clone()))
            .behavior_version_latest()
            // Path-style addressing (endpoint/bucket/key) is required for
            // MinIO and similar gateways.
            .force_path_style(true)
            .build();

        Self {
            client: s3::Client::from_conf(sdk_config),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
        }
    }

    /// Idempotent bucket provisioning for local setups; safe at startup.
    /// Anything other than "already there" is logged so a bad endpoint or
    /// credentials show up before the first upload fails.
    pub async fn ensure_bucket_exists(&self) {
        if let Err(e) = self
            .client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
        {
            let err = e.into_service_error();
            if !bucket_already_there(&err) {
                tracing::warn!(bucket = %self.bucket, "bucket provisioning failed: {}", err);
            }
        }
    }

    fn extension_for(content_type: &str) -> &'static str {
        match content_type {
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }
}

fn bucket_already_there(err: &s3::operation::create_bucket::CreateBucketError) -> bool {
    err.is_bucket_already_exists() || err.is_bucket_already_owned_by_you()
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        let key = format!(
            "images/{}.{}",
            Uuid::new_v4(),
            Self::extension_for(content_type)
        );

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        Ok(format!("{}/{}/{}", self.endpoint, self.bucket, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s3::operation::create_bucket::CreateBucketError;
    use s3::types::error::{BucketAlreadyExists, BucketAlreadyOwnedByYou};

    #[test]
    fn preexisting_bucket_is_not_a_provisioning_failure() {
        let owned =
            CreateBucketError::BucketAlreadyOwnedByYou(BucketAlreadyOwnedByYou::builder().build());
        let exists =
            CreateBucketError::BucketAlreadyExists(BucketAlreadyExists::builder().build());
        assert!(bucket_already_there(&owned));
        assert!(bucket_already_there(&exists));
    }

    #[test]
    fn extensions_follow_the_content_type() {
        assert_eq!(S3Storage::extension_for("image/png"), "png");
        assert_eq!(S3Storage::extension_for("image/jpeg"), "jpg");
        assert_eq!(S3Storage::extension_for("application/octet-stream"), "jpg");
    }
}
