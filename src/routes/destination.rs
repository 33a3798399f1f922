use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;

use crate::services::destination_resolver::{DestinationResolver, ResolvedDestination};
use crate::services::itinerary_generation_service::ItineraryGenerator;

#[derive(Debug, Deserialize)]
pub struct DestinationQuery {
    #[serde(default)]
    pub search: String,
    pub limit: Option<usize>,
}

/*
    /api/destinations?search={text}&limit={n}
*/
pub async fn search(
    query: web::Query<DestinationQuery>,
    generator: web::Data<Arc<ItineraryGenerator>>,
) -> impl Responder {
    let query = query.into_inner();

    let destinations = match generator.directory() {
        Some(directory) => DestinationResolver::resolve(directory, &query.search, query.limit).await,
        None => Vec::<ResolvedDestination>::new(),
    };

    HttpResponse::Ok().json(destinations)
}
