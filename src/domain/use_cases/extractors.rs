use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{entities::token::Claims, errors::AuthError};

/// The authenticated identity, resolved once at the boundary by the auth
/// middleware and handed to handlers explicitly.
/// Usage: add `identity: AuthenticatedUser` as a handler parameter.
/// Returns 401 if the request carries no valid session.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

impl TryFrom<&Claims> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;
        Ok(AuthenticatedUser {
            id,
            email: claims.email.clone(),
            username: claims.username.clone(),
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(AuthenticatedUser::try_from(claims).map_err(Into::into)),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "alice@example.com".into(),
            username: "alice".into(),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn identity_resolves_from_claims() {
        let id = Uuid::new_v4();
        let identity = AuthenticatedUser::try_from(&claims(&id.to_string())).unwrap();
        assert_eq!(identity.id, id);
        assert_eq!(identity.username, "alice");
    }

    #[test]
    fn malformed_subject_is_rejected() {
        assert!(AuthenticatedUser::try_from(&claims("not-a-uuid")).is_err());
    }
}
