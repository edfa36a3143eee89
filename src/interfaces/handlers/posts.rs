use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::post::{NewPostRequest, PreviewRequest},
    errors::AppError,
    use_cases::extractors::AuthenticatedUser,
    AppState,
};

#[instrument(skip(identity, state, data))]
pub async fn create_post(
    identity: AuthenticatedUser,
    state: web::Data<AppState>,
    data: web::Json<NewPostRequest>,
) -> Result<impl Responder, AppError> {
    let response = state
        .post_handler
        .create_post(&identity, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state, query))]
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let page = query
        .get("page")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(1);
    let per_page = query
        .get("per_page")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(10)
        .min(100);

    let posts = state.post_handler.list_published(page, per_page).await?;

    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(identity, state))]
pub async fn my_posts(
    identity: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let posts = state.post_handler.list_own_posts(&identity).await?;

    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(slug, state))]
pub async fn get_post_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.post_handler.get_post_by_slug(&slug).await?;

    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_identity, state, data))]
pub async fn preview_markdown(
    _identity: AuthenticatedUser,
    state: web::Data<AppState>,
    data: web::Json<PreviewRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.post_handler.preview(data.into_inner())?;

    Ok(HttpResponse::Ok().json(response))
}
