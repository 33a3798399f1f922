#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::{web, App};
use async_trait::async_trait;

use trip_planner_api::error::PlacesError;
use trip_planner_api::models::place::{CoordinateValue, RawPlace};
use trip_planner_api::routes;
use trip_planner_api::services::detail_enricher::EnrichmentConfig;
use trip_planner_api::services::itinerary_generation_service::{
    ItineraryGenerationConfig, ItineraryGenerator,
};
use trip_planner_api::services::places::{
    DirectoryResponse, DirectoryStatus, PlaceField, PlacePhoto, PlacesDirectory,
};

pub type SearchReply = Result<DirectoryResponse<Vec<RawPlace>>, PlacesError>;
pub type DetailReply = Result<DirectoryResponse<Option<RawPlace>>, PlacesError>;

/// In-memory places directory. Searches are matched by query prefix
/// ("attractions", "restaurants", ...); unmatched searches return ZERO_RESULTS.
#[derive(Default)]
pub struct MockDirectory {
    searches: Mutex<Vec<(String, SearchReply)>>,
    details: Mutex<HashMap<String, DetailReply>>,
    destinations: Mutex<Option<SearchReply>>,
    photos: Mutex<HashMap<String, PlacePhoto>>,
    pub search_log: Mutex<Vec<String>>,
    pub detail_log: Mutex<Vec<String>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, prefix: &str, reply: SearchReply) -> Self {
        self.searches.lock().unwrap().push((prefix.to_string(), reply));
        self
    }

    pub fn with_places(self, prefix: &str, places: Vec<RawPlace>) -> Self {
        self.with_search(prefix, Ok(DirectoryResponse::new(DirectoryStatus::Ok, places)))
    }

    pub fn with_detail(self, place_id: &str, reply: DetailReply) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(place_id.to_string(), reply);
        self
    }

    pub fn with_destinations(self, places: Vec<RawPlace>) -> Self {
        *self.destinations.lock().unwrap() =
            Some(Ok(DirectoryResponse::new(DirectoryStatus::Ok, places)));
        self
    }

    pub fn with_photo(self, reference: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.photos.lock().unwrap().insert(
            reference.to_string(),
            PlacePhoto {
                content_type: content_type.to_string(),
                bytes: bytes.to_vec(),
            },
        );
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.search_log.lock().unwrap().clone()
    }

    pub fn detail_requests(&self) -> Vec<String> {
        self.detail_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesDirectory for MockDirectory {
    async fn text_search(&self, query: &str, _fields: &[PlaceField]) -> SearchReply {
        self.search_log.lock().unwrap().push(query.to_string());
        self.searches
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| query.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Ok(DirectoryResponse::with_status(DirectoryStatus::ZeroResults)))
    }

    async fn get_details(&self, place_id: &str, _fields: &[PlaceField]) -> DetailReply {
        self.detail_log.lock().unwrap().push(place_id.to_string());
        self.details
            .lock()
            .unwrap()
            .get(place_id)
            .cloned()
            .unwrap_or_else(|| Ok(DirectoryResponse::with_status(DirectoryStatus::ZeroResults)))
    }

    async fn find_place_from_query(&self, _query: &str, _fields: &[PlaceField]) -> SearchReply {
        self.destinations
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(DirectoryResponse::with_status(DirectoryStatus::ZeroResults)))
    }

    async fn fetch_photo(&self, reference: &str, _max_width: u32) -> Result<PlacePhoto, PlacesError> {
        self.photos
            .lock()
            .unwrap()
            .get(reference)
            .cloned()
            .ok_or_else(|| PlacesError::ProviderDenied {
                status: "NOT_FOUND".to_string(),
            })
    }
}

pub fn place(id: &str, name: &str, lat: f64, lng: f64) -> RawPlace {
    RawPlace {
        formatted_address: Some(format!("{} Street", name)),
        rating: Some(4.5),
        latitude: Some(CoordinateValue::Plain(lat)),
        longitude: Some(CoordinateValue::Plain(lng)),
        ..RawPlace::new(name, id)
    }
}

pub fn places(prefix: &str, count: usize) -> Vec<RawPlace> {
    (0..count)
        .map(|i| {
            place(
                &format!("{}{}", prefix, i),
                &format!("{} {}", prefix, i),
                35.0 + i as f64 / 100.0,
                139.0 + i as f64 / 100.0,
            )
        })
        .collect()
}

/// Generator config with no pause between detail batches
pub fn fast_config() -> ItineraryGenerationConfig {
    ItineraryGenerationConfig {
        enrichment: EnrichmentConfig {
            batch_size: 5,
            batch_delay: std::time::Duration::ZERO,
        },
        ..Default::default()
    }
}

pub fn generator(directory: Arc<MockDirectory>) -> ItineraryGenerator {
    let directory: Arc<dyn PlacesDirectory> = directory;
    ItineraryGenerator::with_config(Some(directory), fast_config())
}

pub struct TestApp {
    pub generator: Arc<ItineraryGenerator>,
}

impl TestApp {
    pub fn new(directory: Option<Arc<MockDirectory>>) -> Self {
        let directory = directory.map(|d| d as Arc<dyn PlacesDirectory>);
        Self {
            generator: Arc::new(ItineraryGenerator::with_config(directory, fast_config())),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.generator.clone()))
            .configure(routes::configure)
    }
}
