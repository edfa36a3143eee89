use actix_web::{get, post, web, HttpResponse, Responder};

use crate::entities::token::RefreshTokenRequest;
use crate::entities::user::{LoginUser, NewUser};
use crate::use_cases::extractors::AuthenticatedUser;
use crate::AppState;

#[post("/register")]
pub async fn register(state: web::Data<AppState>, user: web::Json<NewUser>) -> impl Responder {
    match state.auth_handler.register(user.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/login")]
pub async fn login(state: web::Data<AppState>, user: web::Json<LoginUser>) -> impl Responder {
    match state.auth_handler.login(user.into_inner()).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/refresh-token")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> impl Responder {
    match state.auth_handler.refresh_token(&request.refresh_token).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(e) => e.to_http_response(),
    }
}

#[get("/me")]
pub async fn me(identity: AuthenticatedUser, state: web::Data<AppState>) -> impl Responder {
    match state.auth_handler.current_user(&identity.id).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => e.to_http_response(),
    }
}
