use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::image::{CreateUploadUrlRequest, ImageInsert, UploadUrlResponse},
    errors::UploadError,
    repositories::image::ImageRepository,
    settings::StorageConfig,
    storage::UrlSigner,
    use_cases::extractors::AuthenticatedUser,
};

/// Issues time-limited write authorizations for image uploads.
///
/// Given an authenticated user, an upload category, and a filename, this
/// validates the filename's content type, reserves a pending image record,
/// asks the signer for a PUT-scoped signed URL, and finalizes the record's
/// path. Validation happens strictly before the record is created, so a
/// rejected filename never leaves a pending row behind.
pub struct UploadAuthorizer<R, S>
where
    R: ImageRepository,
    S: UrlSigner,
{
    pub image_repo: R,
    pub signer: S,
    asset_domain: String,
}

impl<R, S> UploadAuthorizer<R, S>
where
    R: ImageRepository,
    S: UrlSigner,
{
    pub fn new(image_repo: R, signer: S, config: &StorageConfig) -> Self {
        UploadAuthorizer {
            image_repo,
            signer,
            asset_domain: config.asset_domain.trim_end_matches('/').to_string(),
        }
    }

    /// The whole upload-authorization flow for one request.
    ///
    /// Two store operations run in sequence with no transaction; a crash
    /// between them leaves an inert pending record, which readers ignore.
    /// Nothing here is retried.
    pub async fn create_upload_url(
        &self,
        identity: &AuthenticatedUser,
        request: CreateUploadUrlRequest,
    ) -> Result<UploadUrlResponse, UploadError> {
        request.validate()?;

        let content_type = infer_image_content_type(&request.filename)?;

        let record_id = self
            .image_repo
            .create_pending(&ImageInsert {
                id: request.ref_id,
                category: request.category.clone(),
                user_id: identity.id,
            })
            .await?;

        let path = upload_path(&identity.username, &request.category, &record_id);
        let object_key = format!("{}/{}", path, request.filename);

        let signed_url = self.signer.presign_put(&object_key, &content_type).await?;

        self.image_repo
            .finalize_path(&record_id, &object_key)
            .await?;

        tracing::info!(
            user = %identity.username,
            record = %record_id,
            key = %object_key,
            "Issued upload authorization"
        );

        Ok(UploadUrlResponse {
            image_path: public_url(&self.asset_domain, &object_key),
            signed_url,
        })
    }
}

/// Maps a filename to its content type by extension and checks it belongs
/// to the image family. Both failure cases are the client-error class.
pub fn infer_image_content_type(filename: &str) -> Result<String, UploadError> {
    let content_type = mime_guess::from_path(filename)
        .first()
        .ok_or_else(|| UploadError::ContentType(format!("Failed to parse filename: {filename}")))?;

    if content_type.type_() != mime_guess::mime::IMAGE {
        return Err(UploadError::ContentType(format!(
            "File is not an image: {content_type}"
        )));
    }

    Ok(content_type.essence_str().to_string())
}

/// Deterministic storage prefix for one upload:
/// `images/{username}/{category}/{record_id}`.
pub fn upload_path(username: &str, category: &str, record_id: &Uuid) -> String {
    format!("images/{}/{}/{}", username, category, record_id)
}

/// Public URL under the asset domain, percent-encoded per path segment so
/// slashes survive.
pub fn public_url(asset_domain: &str, object_key: &str) -> String {
    let encoded = object_key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    format!("{}/{}", asset_domain.trim_end_matches('/'), encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::repositories::image::MockImageRepository;
    use crate::storage::MockUrlSigner;

    fn authorizer(
        image_repo: MockImageRepository,
        signer: MockUrlSigner,
    ) -> UploadAuthorizer<MockImageRepository, MockUrlSigner> {
        let config = StorageConfig {
            asset_domain: "https://cdn.plog.example".into(),
            ..StorageConfig::default()
        };
        UploadAuthorizer::new(image_repo, signer, &config)
    }

    fn identity() -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            username: "alice".into(),
        }
    }

    fn request(filename: &str, ref_id: Option<Uuid>) -> CreateUploadUrlRequest {
        CreateUploadUrlRequest {
            category: "avatar".into(),
            filename: filename.to_string(),
            ref_id,
        }
    }

    #[tokio::test]
    async fn rejects_filename_without_extension_before_creating_record() {
        // No expectations set: any repository or signer call would panic.
        let authorizer = authorizer(MockImageRepository::new(), MockUrlSigner::new());

        let result = authorizer
            .create_upload_url(&identity(), request("noextension", None))
            .await;

        assert!(matches!(result, Err(UploadError::ContentType(_))));
    }

    #[tokio::test]
    async fn rejects_non_image_type_before_creating_record() {
        let authorizer = authorizer(MockImageRepository::new(), MockUrlSigner::new());

        let result = authorizer
            .create_upload_url(&identity(), request("report.pdf", None))
            .await;

        assert!(matches!(result, Err(UploadError::ContentType(_))));
    }

    #[tokio::test]
    async fn happy_path_derives_path_and_finalizes_record() {
        let record_id = Uuid::new_v4();
        let expected_key = format!("images/alice/avatar/{}/cat.png", record_id);

        let mut image_repo = MockImageRepository::new();
        image_repo
            .expect_create_pending()
            .withf(|insert| insert.category == "avatar" && insert.id.is_none())
            .times(1)
            .returning(move |_| Ok(record_id));
        let key_for_finalize = expected_key.clone();
        image_repo
            .expect_finalize_path()
            .withf(move |id, path| *id == record_id && path == key_for_finalize)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut signer = MockUrlSigner::new();
        let key_for_signer = expected_key.clone();
        signer
            .expect_presign_put()
            .withf(move |key, content_type| key == key_for_signer && content_type == "image/png")
            .times(1)
            .returning(|_, _| Ok("https://bucket.example/signed".to_string()));

        let authorizer = authorizer(image_repo, signer);
        let response = authorizer
            .create_upload_url(&identity(), request("cat.png", None))
            .await
            .unwrap();

        assert_eq!(
            response.image_path,
            format!("https://cdn.plog.example/{}", expected_key)
        );
        assert_eq!(response.signed_url, "https://bucket.example/signed");
    }

    #[tokio::test]
    async fn client_supplied_identifier_is_honored() {
        let ref_id = Uuid::new_v4();

        let mut image_repo = MockImageRepository::new();
        image_repo
            .expect_create_pending()
            .withf(move |insert| insert.id == Some(ref_id))
            .times(1)
            .returning(move |_| Ok(ref_id));
        image_repo
            .expect_finalize_path()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut signer = MockUrlSigner::new();
        signer
            .expect_presign_put()
            .times(1)
            .returning(|_, _| Ok("https://signed".to_string()));

        let authorizer = authorizer(image_repo, signer);
        let response = authorizer
            .create_upload_url(&identity(), request("dog.jpg", Some(ref_id)))
            .await
            .unwrap();

        assert!(response.image_path.contains(&ref_id.to_string()));
    }

    #[tokio::test]
    async fn finalize_failure_propagates_as_unexpected() {
        let record_id = Uuid::new_v4();

        let mut image_repo = MockImageRepository::new();
        image_repo
            .expect_create_pending()
            .times(1)
            .returning(move |_| Ok(record_id));
        image_repo
            .expect_finalize_path()
            .times(1)
            .returning(|_, _| Err(AppError::InternalError("store unavailable".into())));

        let mut signer = MockUrlSigner::new();
        signer
            .expect_presign_put()
            .times(1)
            .returning(|_, _| Ok("https://signed".to_string()));

        let authorizer = authorizer(image_repo, signer);
        let result = authorizer
            .create_upload_url(&identity(), request("cat.png", None))
            .await;

        assert!(matches!(result, Err(UploadError::Unexpected(_))));
    }

    #[tokio::test]
    async fn signer_failure_leaves_record_pending() {
        let record_id = Uuid::new_v4();

        let mut image_repo = MockImageRepository::new();
        image_repo
            .expect_create_pending()
            .times(1)
            .returning(move |_| Ok(record_id));
        // finalize_path must not be called when signing fails.

        let mut signer = MockUrlSigner::new();
        signer
            .expect_presign_put()
            .times(1)
            .returning(|_, _| Err(AppError::InternalError("signing capability down".into())));

        let authorizer = authorizer(image_repo, signer);
        let result = authorizer
            .create_upload_url(&identity(), request("cat.png", None))
            .await;

        assert!(matches!(result, Err(UploadError::Unexpected(_))));
    }

    #[test]
    fn derived_path_matches_contract() {
        let id = Uuid::parse_str("7b1c6f6e-6a5d-4f2b-9a0e-2f4f4a0d1c11").unwrap();
        assert_eq!(
            upload_path("alice", "avatar", &id),
            format!("images/alice/avatar/{}", id)
        );
    }

    #[test]
    fn public_url_percent_encodes_segments_and_keeps_slashes() {
        let url = public_url("https://cdn.plog.example/", "images/alice/avatar/x/my cat.png");
        assert_eq!(
            url,
            "https://cdn.plog.example/images/alice/avatar/x/my%20cat.png"
        );
    }

    #[test]
    fn image_types_are_inferred_from_extension() {
        assert_eq!(infer_image_content_type("cat.png").unwrap(), "image/png");
        assert_eq!(infer_image_content_type("cat.JPG").unwrap(), "image/jpeg");
        assert!(infer_image_content_type("report.pdf").is_err());
        assert!(infer_image_content_type("noextension").is_err());
    }
}
