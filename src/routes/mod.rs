use actix_web::{error, web, HttpResponse};
use serde_json::json;

pub mod destination;
pub mod health;
pub mod itinerary;
pub mod photo;

/// Registers every route under its public path. Malformed JSON bodies get the
/// same `{"error": ...}` shape as validation failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let body = json!({ "error": err.to_string() });
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route(
                    "/itineraries/generate",
                    web::post().to(itinerary::generate),
                )
                .route("/destinations", web::get().to(destination::search))
                .route("/places/photo", web::get().to(photo::get_photo)),
        );
}
