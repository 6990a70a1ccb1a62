pub mod contacts;

use actix_web::{web, HttpResponse, Responder};

use crate::database::SharedStore;

pub async fn health(store: web::Data<SharedStore>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}

/// Register every route. Expects a `web::Data<SharedStore>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/contacts/search/", web::post().to(contacts::search_contacts))
        .route("/contacts/get-all/", web::get().to(contacts::get_all_contacts))
        .route("/contacts/new/", web::post().to(contacts::create_contact))
        .route(
            "/contacts/delete-by-number/{phonenumber}",
            web::delete().to(contacts::delete_contact_by_number),
        )
        .route(
            "/contacts/delete-by-number/",
            web::delete().to(contacts::delete_contact_without_number),
        )
        .route("/contacts/delete-by-name/", web::delete().to(contacts::delete_contact_by_name))
        .route("/contacts/delete-all/", web::delete().to(contacts::delete_all_contacts));
}
