use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::PlacesError;
use crate::services::itinerary_generation_service::ItineraryGenerator;

const DEFAULT_MAX_WIDTH: u32 = 800;
const MAX_WIDTH_LIMIT: u32 = 1600;

#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    #[serde(default)]
    pub reference: String,
    pub maxwidth: Option<u32>,
}

/*
    /api/places/photo?reference={photo_reference}&maxwidth={px}
*/
pub async fn get_photo(
    query: web::Query<PhotoQuery>,
    generator: web::Data<Arc<ItineraryGenerator>>,
) -> impl Responder {
    let query = query.into_inner();
    let reference = query.reference.trim();
    if reference.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "reference is required" }));
    }

    let Some(directory) = generator.directory() else {
        return HttpResponse::NotFound().json(json!({ "error": "photos are unavailable" }));
    };

    let max_width = query
        .maxwidth
        .unwrap_or(DEFAULT_MAX_WIDTH)
        .clamp(1, MAX_WIDTH_LIMIT);

    match directory.fetch_photo(reference, max_width).await {
        Ok(photo) => HttpResponse::Ok()
            .content_type(photo.content_type)
            .body(photo.bytes),
        Err(PlacesError::Configuration(e)) => {
            log::debug!("Photo {} unavailable: {}", reference, e);
            HttpResponse::NotFound().json(json!({ "error": "photos are unavailable" }))
        }
        Err(e) => {
            log::warn!("Photo {} could not be fetched: {}", reference, e);
            HttpResponse::BadGateway().json(json!({ "error": "photo could not be fetched" }))
        }
    }
}
