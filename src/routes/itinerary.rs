use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::sync::Arc;

use crate::models::trip::TripRequest;
use crate::services::itinerary_generation_service::ItineraryGenerator;

/*
    /api/itineraries/generate
*/
pub async fn generate(
    request: web::Json<TripRequest>,
    generator: web::Data<Arc<ItineraryGenerator>>,
) -> impl Responder {
    let request = request.into_inner();

    if let Err(e) = request.validate() {
        log::debug!("Rejected trip request: {}", e);
        return HttpResponse::BadRequest().json(json!({ "error": e.to_string() }));
    }

    let itinerary = generator.generate(&request).await;
    HttpResponse::Ok().json(itinerary)
}
