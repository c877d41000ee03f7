use actix_web::{web, HttpResponse, Result};
use shared::{ApiError, ApiSuccess, CreateTicketContributionRequest, CreateTicketRequest};

use crate::models::AppState;
use crate::services::tickets::{self as tickets_service, TicketError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tickets")
            .route("", web::post().to(create_ticket))
            .route("/{id}", web::get().to(get_ticket))
            .route("/{id}/contributions", web::post().to(add_contribution))
            .route("/{id}/contributions", web::get().to(list_contributions)),
    );
}

async fn create_ticket(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    body: web::Json<CreateTicketRequest>,
) -> Result<HttpResponse> {
    if crate::middleware::auth::extract_user_id(&req, &state.config).is_err() {
        return Ok(unauthorized());
    }

    let request = body.into_inner();

    if request.ticket_number.is_empty() || request.lottery.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Ticket number and lottery are required".to_string(),
        }));
    }

    if request.cost < 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Ticket cost cannot be negative".to_string(),
        }));
    }

    match tickets_service::create_ticket(&state.db, &request).await {
        Ok(ticket) => Ok(HttpResponse::Created().json(ApiSuccess::new(ticket))),
        Err(e) => {
            log::error!("Error creating ticket: {:?}", e);
            Ok(internal_error("Failed to create ticket"))
        }
    }
}

async fn get_ticket(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if crate::middleware::auth::extract_user_id(&req, &state.config).is_err() {
        return Ok(unauthorized());
    }

    match tickets_service::get_ticket(&state.db, path.into_inner()).await {
        Ok(Some(ticket)) => Ok(HttpResponse::Ok().json(ApiSuccess::new(ticket))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Ticket not found".to_string(),
        })),
        Err(e) => {
            log::error!("Error fetching ticket: {:?}", e);
            Ok(internal_error("Failed to fetch ticket"))
        }
    }
}

async fn add_contribution(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CreateTicketContributionRequest>,
) -> Result<HttpResponse> {
    if crate::middleware::auth::extract_user_id(&req, &state.config).is_err() {
        return Ok(unauthorized());
    }

    let request = body.into_inner();

    if request.amount_contributed <= 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Contribution amount must be positive".to_string(),
        }));
    }

    match tickets_service::add_contribution(&state.db, path.into_inner(), &request).await {
        Ok(contribution) => Ok(HttpResponse::Created().json(ApiSuccess::new(contribution))),
        Err(TicketError::NotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Ticket not found".to_string(),
        })),
        Err(e) => {
            log::error!("Error adding contribution: {:?}", e);
            Ok(internal_error("Failed to add contribution"))
        }
    }
}

async fn list_contributions(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if crate::middleware::auth::extract_user_id(&req, &state.config).is_err() {
        return Ok(unauthorized());
    }

    match tickets_service::list_contributions(&state.db, path.into_inner()).await {
        Ok(contributions) => Ok(HttpResponse::Ok().json(ApiSuccess::new(contributions))),
        Err(e) => {
            log::error!("Error listing contributions: {:?}", e);
            Ok(internal_error("Failed to list contributions"))
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
