use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;

use super::render;
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuthUser;
use crate::models::{CreateUser, LoginCredentials};
use crate::repositories::{LoginSessionRepository, UserRepository};
use crate::session::{create_session_cookie, get_session_token, remove_session_cookie};

#[derive(Clone)]
pub struct AuthState {
    pub user_repo: UserRepository,
    pub login_session_repo: LoginSessionRepository,
}

// Templates
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
struct RegisterTemplate {
    username: String,
    error: Option<String>,
}

// Handlers
pub async fn login_page(
    State(state): State<AuthState>,
    OptionalAuthUser(auth_user): OptionalAuthUser,
) -> Result<Response> {
    // Redirect to dashboard if already logged in
    if auth_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    if state.user_repo.count().await? == 0 {
        return Ok(Redirect::to("/auth/register").into_response());
    }

    render(&LoginTemplate { error: None })
}

pub async fn login_submit(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(credentials): Form<LoginCredentials>,
) -> Result<Response> {
    let user = state
        .user_repo
        .authenticate(&credentials.username, &credentials.password)
        .await?;

    match user {
        Some(user) => {
            let token = state.login_session_repo.create(&user.id).await?;
            tracing::info!("User {} logged in", user.username);
            let jar = jar.add(create_session_cookie(&token));
            Ok((jar, Redirect::to("/")).into_response())
        }
        None => render(&LoginTemplate {
            error: Some("Invalid username or password".to_string()),
        }),
    }
}

pub async fn register_page(OptionalAuthUser(auth_user): OptionalAuthUser) -> Result<Response> {
    if auth_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    render(&RegisterTemplate {
        username: String::new(),
        error: None,
    })
}

pub async fn register_submit(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(form): Form<CreateUser>,
) -> Result<Response> {
    let rejected = |message: &str| {
        render(&RegisterTemplate {
            username: form.username.trim().to_string(),
            error: Some(message.to_string()),
        })
    };

    if let Some(message) = form.validation_error() {
        return rejected(message);
    }

    if state.user_repo.username_exists(&form.username).await? {
        return rejected("Username already exists");
    }

    let user = match state.user_repo.create(&form.username, &form.password).await {
        Ok(user) => user,
        Err(AppError::Validation(message)) => return rejected(&message),
        Err(e) => return Err(e),
    };
    tracing::info!("Registered user {}", user.username);

    // Auto login
    let token = state.login_session_repo.create(&user.id).await?;
    let jar = jar.add(create_session_cookie(&token));

    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn logout(State(state): State<AuthState>, jar: CookieJar) -> Result<Response> {
    if let Some(token) = get_session_token(&jar) {
        state.login_session_repo.delete(&token).await?;
    }
    let jar = jar.add(remove_session_cookie());
    Ok((jar, Redirect::to("/auth/login")).into_response())
}
