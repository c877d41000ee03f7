use actix_web::{web, HttpResponse, Result};
use shared::{AddGroupMemberRequest, ApiError, ApiSuccess, CreateGroupRequest};

use crate::models::AppState;
use crate::services::groups::{self as groups_service, GroupError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/groups")
            .route("", web::post().to(create_group))
            .route("", web::get().to(list_groups))
            .route("/{id}/members", web::post().to(add_member))
            .route("/{id}/members", web::get().to(list_members)),
    );
}

async fn create_group(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    body: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse> {
    if crate::middleware::auth::extract_user_id(&req, &state.config).is_err() {
        return Ok(unauthorized());
    }

    let request = body.into_inner();

    if request.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Group name is required".to_string(),
        }));
    }

    match groups_service::create_group(&state.db, &request).await {
        Ok(group) => Ok(HttpResponse::Created().json(ApiSuccess::new(group))),
        Err(e) => {
            log::error!("Error creating group: {:?}", e);
            Ok(internal_error("Failed to create group"))
        }
    }
}

async fn list_groups(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
) -> Result<HttpResponse> {
    if crate::middleware::auth::extract_user_id(&req, &state.config).is_err() {
        return Ok(unauthorized());
    }

    match groups_service::list_groups(&state.db).await {
        Ok(groups) => Ok(HttpResponse::Ok().json(ApiSuccess::new(groups))),
        Err(e) => {
            log::error!("Error listing groups: {:?}", e);
            Ok(internal_error("Failed to list groups"))
        }
    }
}

async fn add_member(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<i64>,
    body: web::Json<AddGroupMemberRequest>,
) -> Result<HttpResponse> {
    if crate::middleware::auth::extract_user_id(&req, &state.config).is_err() {
        return Ok(unauthorized());
    }

    let group_id = path.into_inner();

    match groups_service::add_member(&state.db, group_id, body.user_id).await {
        Ok(member) => Ok(HttpResponse::Created().json(ApiSuccess::new(member))),
        Err(GroupError::NotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Group not found".to_string(),
        })),
        Err(GroupError::AlreadyMember) => Ok(HttpResponse::Conflict().json(ApiError {
            error: "already_member".to_string(),
            message: "User is already a member of this group".to_string(),
        })),
        Err(e) => {
            log::error!("Error adding group member: {:?}", e);
            Ok(internal_error("Failed to add group member"))
        }
    }
}

async fn list_members(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if crate::middleware::auth::extract_user_id(&req, &state.config).is_err() {
        return Ok(unauthorized());
    }

    match groups_service::list_members(&state.db, path.into_inner()).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiSuccess::new(members))),
        Err(e) => {
            log::error!("Error listing group members: {:?}", e);
            Ok(internal_error("Failed to list group members"))
        }
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiError {
        error: "unauthorized".to_string(),
        message: "Invalid or missing token".to_string(),
    })
}

fn internal_error(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiError {
        error: "internal_error".to_string(),
        message: message.to_string(),
    })
}
