use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::image::CreateUploadUrlRequest, errors::UploadError,
    handlers::json_error::json_error, use_cases::extractors::AuthenticatedUser, AppState,
};

/// POST /files/create-url
///
/// Issues a signed, time-limited PUT URL for one image object and returns
/// the public URL the object will live at. The identity comes from the
/// session gate; the request never reaches this handler unauthenticated.
#[instrument(skip(state, data))]
pub async fn create_upload_url(
    identity: AuthenticatedUser,
    state: web::Data<AppState>,
    data: web::Json<CreateUploadUrlRequest>,
) -> Result<impl Responder, UploadError> {
    let response = state
        .upload_handler
        .create_upload_url(&identity, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// Catch-all for the create-url resource: only POST is accepted, anything
/// else is answered with a 405 naming the rejected method.
pub async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        &format!("Method {} is not allowed", req.method()),
    )
}
