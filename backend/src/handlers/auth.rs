use actix_web::{web, HttpResponse, Result};
use shared::{
    ApiError, ApiSuccess, AuthResponse, LoginRequest, OAuthCallbackRequest, RefreshRequest,
    RegisterRequest,
};

use crate::models::AppState;
use crate::services::auth::{self as auth_service, AuthError};
use crate::services::users as users_service;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/logout", web::post().to(logout))
            .route("/oauth/callback", web::post().to(oauth_callback))
            .route("/profile", web::get().to(profile)),
    );
}

async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();

    // Validate input
    if request.name.is_empty() || request.email.is_empty() || request.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Name, email, and password are required".to_string(),
        }));
    }

    if !request.email.contains('@') {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Email address is not valid".to_string(),
        }));
    }

    if request.password.len() < 6 {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Password must be at least 6 characters".to_string(),
        }));
    }

    match auth_service::register_user(&state.db, &request).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiSuccess::new(user))),
        Err(AuthError::EmailTaken) => Ok(HttpResponse::Conflict().json(ApiError {
            error: "email_taken".to_string(),
            message: "Email is already in use".to_string(),
        })),
        Err(e) => {
            log::error!("Registration error: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "registration_error".to_string(),
                message: "Failed to register user".to_string(),
            }))
        }
    }
}

async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> Result<HttpResponse> {
    let request = body.into_inner();

    if request.email.is_empty() || request.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Email and password are required".to_string(),
        }));
    }

    match auth_service::login(&state.db, &state.config, &request).await {
        Ok((user, tokens)) => {
            Ok(HttpResponse::Ok().json(ApiSuccess::new(AuthResponse { tokens, user })))
        }
        Err(AuthError::InvalidCredentials) => Ok(HttpResponse::Unauthorized().json(ApiError {
            error: "authentication_error".to_string(),
            message: "Invalid email or password".to_string(),
        })),
        Err(e) => {
            log::error!("Login error: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to log in".to_string(),
            }))
        }
    }
}

async fn refresh(
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();

    if request.refresh_token.is_empty() {
        return Ok(HttpResponse::Forbidden().json(ApiError {
            error: "refresh_error".to_string(),
            message: "No refresh token provided".to_string(),
        }));
    }

    match auth_service::refresh_session(&state.db, &state.config, &request.refresh_token).await {
        Ok((user, tokens)) => {
            Ok(HttpResponse::Ok().json(ApiSuccess::new(AuthResponse { tokens, user })))
        }
        Err(AuthError::InvalidCredentials) => Ok(HttpResponse::Unauthorized().json(ApiError {
            error: "refresh_error".to_string(),
            message: "Refresh token was rejected".to_string(),
        })),
        Err(AuthError::RefreshMismatch) => Ok(HttpResponse::Forbidden().json(ApiError {
            error: "refresh_error".to_string(),
            message: "Refresh token was rejected".to_string(),
        })),
        Err(e) => {
            log::error!("Refresh error: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to refresh session".to_string(),
            }))
        }
    }
}

/// Logout never fails for lack of a valid token: an unresolvable session is
/// already logged out.
async fn logout(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
) -> Result<HttpResponse> {
    let token = crate::middleware::auth::bearer_token(&req).unwrap_or_default();

    match auth_service::logout(&state.db, &state.config, token).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiSuccess::new(serde_json::json!({
            "message": "Logged out"
        })))),
        Err(e) => {
            log::error!("Logout error: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to log out".to_string(),
            }))
        }
    }
}

async fn oauth_callback(
    state: web::Data<AppState>,
    body: web::Json<OAuthCallbackRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();

    if request.provider.is_empty() || request.provider_id.is_empty() || request.email.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Provider, provider id, and email are required".to_string(),
        }));
    }

    match auth_service::login_oauth(&state.db, &state.config, &request).await {
        Ok((user, tokens)) => {
            Ok(HttpResponse::Ok().json(ApiSuccess::new(AuthResponse { tokens, user })))
        }
        Err(e) => {
            log::error!("OAuth login error: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to log in with provider".to_string(),
            }))
        }
    }
}

async fn profile(state: web::Data<AppState>, req: actix_web::HttpRequest) -> Result<HttpResponse> {
    let user_id = match crate::middleware::auth::extract_user_id(&req, &state.config) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiError {
                error: "unauthorized".to_string(),
                message: "Invalid or missing token".to_string(),
            }));
        }
    };

    match users_service::find_by_id(&state.db, user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiSuccess::new(user.to_shared()))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "User not found".to_string(),
        })),
        Err(e) => {
            log::error!("Error fetching user: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to fetch user".to_string(),
            }))
        }
    }
}
