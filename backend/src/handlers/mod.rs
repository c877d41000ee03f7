use actix_web::web;

pub mod auth;
pub mod groups;
pub mod tickets;
pub mod transactions;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(auth::configure)
            .configure(groups::configure)
            .configure(tickets::configure)
            .configure(transactions::configure),
    );
}
