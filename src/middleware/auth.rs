use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::models::User;
use crate::repositories::LoginSessionRepository;
use crate::session::get_session_token;

pub const LOGIN_PATH: &str = "/auth/login";

#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

impl AuthUser {
    /// Resolve the session cookie against the login session store installed
    /// on the router as an extension.
    async fn from_parts(parts: &Parts) -> Result<Option<Self>, AppError> {
        let repo = parts
            .extensions
            .get::<LoginSessionRepository>()
            .cloned()
            .ok_or_else(|| AppError::Internal("login session store not configured".to_string()))?;

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = get_session_token(&jar) else {
            return Ok(None);
        };

        Ok(repo.find_user(&token).await?.map(AuthUser::from))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match AuthUser::from_parts(parts).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Redirect::to(LOGIN_PATH).into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

/// For JSON endpoints: answers 401 instead of redirecting to the login page.
pub struct ApiAuthUser(pub AuthUser);

impl<S> FromRequestParts<S> for ApiAuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthUser::from_parts(parts)
            .await?
            .map(ApiAuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

// Optional auth - doesn't redirect, just returns None if not logged in
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(AuthUser::from_parts(parts).await?))
    }
}
