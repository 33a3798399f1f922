use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::sync::Arc;

use crate::services::itinerary_generation_service::ItineraryGenerator;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    places: &'static str,
    version: &'static str,
}

pub async fn health_check(generator: web::Data<Arc<ItineraryGenerator>>) -> impl Responder {
    let places = if generator.is_configured() {
        "configured"
    } else {
        "unconfigured"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: "OK",
        places,
        version: env!("CARGO_PKG_VERSION"),
    })
}
