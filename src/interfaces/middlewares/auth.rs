use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{
    rc::Rc,
    task::{Context, Poll},
};

use crate::{entities::token::Claims, errors::AuthError, AppState};

/// The session gate. Every non-public route requires a valid bearer token;
/// on success the decoded claims land in request extensions for the
/// `AuthenticatedUser` extractor.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let path = req.path();
            let method = req.method().as_str();

            if is_public_route(path, method) {
                return service.call(req).await;
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(AuthError::MissingCredentials) => {
                    tracing::warn!("Missing or invalid credentials");
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Unauthorized().json(serde_json::json!({
                            "error": "Missing or invalid credentials"
                        })),
                    ));
                }
                Err(AuthError::TokenExpired) => {
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Unauthorized().json(serde_json::json!({
                            "error": "Token has expired"
                        })),
                    ));
                }
                Err(AuthError::InvalidToken) => {
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Unauthorized().json(serde_json::json!({
                            "error": "Invalid token"
                        })),
                    ));
                }
                Err(_) => {
                    tracing::error!("Failed to decode JWT");
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::InternalServerError().json(serde_json::json!({
                            "error": "Internal server error"
                        })),
                    ));
                }
            };

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    if matches!(
        (path, method),
        ("/", "GET")
            | ("/api/v1/health", "GET")
            | ("/api/v1/auth/register", "POST")
            | ("/api/v1/auth/login", "POST")
            | ("/api/v1/auth/refresh-token", "POST")
    ) {
        return true;
    }

    // Published post reads are public; the author's own listing is not.
    method == "GET" && path.starts_with("/api/v1/posts") && path != "/api/v1/posts/mine"
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.auth_handler.token_service.decode_jwt(&token)?;
    Ok(decoded.claims)
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}
