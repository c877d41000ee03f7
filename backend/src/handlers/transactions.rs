use actix_web::{web, HttpResponse, Result};
use shared::{ApiError, ApiSuccess, CreateTransactionRequest};

use crate::models::AppState;
use crate::services::transactions::{self as transactions_service, TransactionError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::post().to(create_transaction))
            .route("", web::get().to(list_own_transactions)),
    );
}

async fn create_transaction(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    body: web::Json<CreateTransactionRequest>,
) -> Result<HttpResponse> {
    if crate::middleware::auth::extract_user_id(&req, &state.config).is_err() {
        return Ok(unauthorized());
    }

    let request = body.into_inner();

    if request.amount <= 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Transaction amount must be positive".to_string(),
        }));
    }

    match transactions_service::create_transaction(&state.db, &request).await {
        Ok(transaction) => Ok(HttpResponse::Created().json(ApiSuccess::new(transaction))),
        Err(TransactionError::UserNotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "User not found".to_string(),
        })),
        Err(e) => {
            log::error!("Error creating transaction: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to create transaction".to_string(),
            }))
        }
    }
}

async fn list_own_transactions(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
) -> Result<HttpResponse> {
    let user_id = match crate::middleware::auth::extract_user_id(&req, &state.config) {
        Ok(id) => id,
        Err(_) => return Ok(unauthorized()),
    };

    match transactions_service::list_for_user(&state.db, user_id).await {
        Ok(transactions) => Ok(HttpResponse::Ok().json(ApiSuccess::new(transactions))),
        Err(e) => {
            log::error!("Error listing transactions: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list transactions".to_string(),
            }))
        }
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiError {
        error: "unauthorized".to_string(),
        message: "Invalid or missing token".to_string(),
    })
}
