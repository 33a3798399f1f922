//! Google Places client
//!
//! Implements [`PlacesDirectory`] against the Places web service JSON API.
//!
//! ## Setup
//! 1. Get a Google Maps API key from Google Cloud Console
//! 2. Enable the Places API
//! 3. Set the environment variable: `GOOGLE_MAPS_API_KEY=your_api_key_here`
//!
//! The client has an explicit lifecycle: [`GooglePlacesClient::init`] builds it
//! (and fails fast without a key), [`GooglePlacesClient::teardown`] releases it.
//! Callers hand the initialised client to the engine; there is no global state.
//!
//! The API key only ever appears in requests this client sends. Photo links
//! handed out with places point at the service's own photo route, and
//! transport errors are stripped of their request URL before being reported.

use std::{env, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{DirectoryResponse, DirectoryStatus, PlaceField, PlacePhoto, PlacesDirectory};
use crate::error::PlacesError;
use crate::models::place::{CoordinateValue, PhotoReference, RawPlace};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PHOTO_MAX_WIDTH: u32 = 800;
pub const DEFAULT_PHOTO_ROUTE: &str = "/api/places/photo";

#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub photo_max_width: u32,
    /// Public path photo links are built against
    pub photo_route: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            photo_max_width: DEFAULT_PHOTO_MAX_WIDTH,
            photo_route: DEFAULT_PHOTO_ROUTE.to_string(),
        }
    }
}

impl PlacesConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Read `GOOGLE_MAPS_API_KEY`, `PLACES_BASE_URL` and `PLACES_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("GOOGLE_MAPS_API_KEY").ok(),
            base_url: env::var("PLACES_BASE_URL").unwrap_or(defaults.base_url),
            timeout: env::var("PLACES_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            ..defaults
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    status: String,
    #[serde(default)]
    results: Vec<GooglePlace>,
    #[serde(default)]
    candidates: Vec<GooglePlace>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsBody {
    status: String,
    result: Option<GooglePlace>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GooglePlace {
    name: Option<String>,
    place_id: Option<String>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    #[serde(default)]
    photos: Vec<GooglePhoto>,
    geometry: Option<GoogleGeometry>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GooglePhoto {
    photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: Option<GoogleLatLng>,
}

#[derive(Debug, Deserialize)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

pub struct GooglePlacesClient {
    http_client: reqwest::Client,
    config: PlacesConfig,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn init(config: PlacesConfig) -> Result<Self, PlacesError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PlacesError::Configuration("GOOGLE_MAPS_API_KEY environment variable not set".into())
            })?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PlacesError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        log::info!("Places client initialised against {}", config.base_url);

        Ok(Self {
            http_client,
            config,
            api_key,
        })
    }

    pub fn teardown(self) {
        log::info!("Places client for {} shut down", self.config.base_url);
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let base = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("key", self.api_key.as_str()));

        Url::parse_with_params(&base, &all_params)
            .map_err(|e| PlacesError::Configuration(format!("Invalid places base URL: {}", e)))
    }

    /// Link to the service's photo route; never carries the API key.
    fn photo_url(&self, photo_reference: &str) -> Option<String> {
        if photo_reference.trim().is_empty() {
            return None;
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("reference", photo_reference)
            .append_pair("maxwidth", &self.config.photo_max_width.to_string())
            .finish();
        Some(format!("{}?{}", self.config.photo_route, query))
    }

    async fn fetch_text(&self, url: Url) -> Result<String, PlacesError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| self.convert_reqwest_error(e))?;

        response
            .text()
            .await
            .map_err(|e| self.convert_reqwest_error(e))
    }

    /// Request URLs carry the key, so they are dropped from the message.
    fn convert_reqwest_error(&self, error: reqwest::Error) -> PlacesError {
        if error.is_timeout() {
            return PlacesError::Timeout(self.config.timeout.as_secs());
        }
        PlacesError::Network(error.without_url().to_string())
    }

    fn to_raw_place(&self, place: GooglePlace) -> RawPlace {
        let (latitude, longitude) = match place.geometry.and_then(|g| g.location) {
            Some(location) => (
                Some(CoordinateValue::Plain(location.lat)),
                Some(CoordinateValue::Plain(location.lng)),
            ),
            None => (None, None),
        };

        let photos = place
            .photos
            .iter()
            .filter_map(|photo| photo.photo_reference.as_deref())
            .filter_map(|reference| self.photo_url(reference))
            .map(PhotoReference::DirectUrl)
            .collect();

        RawPlace {
            name: place.name.unwrap_or_default(),
            place_id: place.place_id,
            formatted_address: place.formatted_address,
            rating: place.rating,
            photos,
            latitude,
            longitude,
            types: place.types,
        }
    }

    fn parse_search(&self, text: &str) -> Result<DirectoryResponse<Vec<RawPlace>>, PlacesError> {
        let body: SearchBody = serde_json::from_str(text)
            .map_err(|e| PlacesError::Malformed(format!("Failed to parse places response: {}", e)))?;

        let status = DirectoryStatus::parse(&body.status);
        if let Some(message) = &body.error_message {
            log::warn!("Places API {}: {}", body.status, message);
        }

        let places = body
            .results
            .into_iter()
            .chain(body.candidates)
            .map(|place| self.to_raw_place(place))
            .collect();

        Ok(DirectoryResponse::new(status, places))
    }

    fn parse_details(&self, text: &str) -> Result<DirectoryResponse<Option<RawPlace>>, PlacesError> {
        let body: DetailsBody = serde_json::from_str(text)
            .map_err(|e| PlacesError::Malformed(format!("Failed to parse details response: {}", e)))?;

        if let Some(message) = &body.error_message {
            log::warn!("Places details API {}: {}", body.status, message);
        }

        Ok(DirectoryResponse::new(
            DirectoryStatus::parse(&body.status),
            body.result.map(|place| self.to_raw_place(place)),
        ))
    }
}

#[async_trait]
impl PlacesDirectory for GooglePlacesClient {
    async fn text_search(
        &self,
        query: &str,
        _fields: &[PlaceField],
    ) -> Result<DirectoryResponse<Vec<RawPlace>>, PlacesError> {
        // Text search has no field mask; it always returns the basic fields.
        let url = self.endpoint("place/textsearch/json", &[("query", query)])?;
        log::debug!("Places text search: {}", query);
        let text = self.fetch_text(url).await?;
        self.parse_search(&text)
    }

    async fn get_details(
        &self,
        place_id: &str,
        fields: &[PlaceField],
    ) -> Result<DirectoryResponse<Option<RawPlace>>, PlacesError> {
        let field_mask = PlaceField::join(fields);
        let url = self.endpoint(
            "place/details/json",
            &[("place_id", place_id), ("fields", field_mask.as_str())],
        )?;
        let text = self.fetch_text(url).await?;
        self.parse_details(&text)
    }

    async fn find_place_from_query(
        &self,
        query: &str,
        fields: &[PlaceField],
    ) -> Result<DirectoryResponse<Vec<RawPlace>>, PlacesError> {
        let field_mask = PlaceField::join(fields);
        let url = self.endpoint(
            "place/findplacefromtext/json",
            &[
                ("input", query),
                ("inputtype", "textquery"),
                ("fields", field_mask.as_str()),
            ],
        )?;
        let text = self.fetch_text(url).await?;
        self.parse_search(&text)
    }

    async fn fetch_photo(&self, reference: &str, max_width: u32) -> Result<PlacePhoto, PlacesError> {
        let width = max_width.to_string();
        let url = self.endpoint(
            "place/photo",
            &[("maxwidth", width.as_str()), ("photo_reference", reference)],
        )?;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| self.convert_reqwest_error(e))?;

        if !response.status().is_success() {
            return Err(PlacesError::ProviderDenied {
                status: response.status().as_u16().to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.convert_reqwest_error(e))?;

        Ok(PlacePhoto {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::{Candidate, Coordinates, EnrichedPlace, PlaceCategory};
    use crate::models::trip::{ActivityLevel, BudgetTier};
    use crate::services::allocator::Allocator;
    use crate::services::places::SEARCH_FIELDS;
    use crate::services::recommendation_service::RecommendationService;

    fn client() -> GooglePlacesClient {
        GooglePlacesClient::init(PlacesConfig {
            base_url: "https://places.example.com/api/".to_string(),
            ..PlacesConfig::with_api_key("test-key")
        })
        .expect("client should build")
    }

    #[test]
    fn test_init_requires_api_key() {
        let err = GooglePlacesClient::init(PlacesConfig::default())
            .err()
            .expect("missing key should fail");
        assert!(matches!(err, PlacesError::Configuration(_)));

        let blank = GooglePlacesClient::init(PlacesConfig::with_api_key("  "));
        assert!(matches!(blank, Err(PlacesError::Configuration(_))));
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let url = client()
            .endpoint("place/textsearch/json", &[("query", "attractions in São Paulo")])
            .unwrap();
        assert_eq!(url.path(), "/api/place/textsearch/json");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "attractions in São Paulo".to_string()),
                ("key".to_string(), "test-key".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_search_results() {
        let body = r#"{
            "status": "OK",
            "results": [{
                "name": "Senso-ji",
                "place_id": "abc123",
                "formatted_address": "2-3-1 Asakusa, Taito City",
                "rating": 4.5,
                "photos": [{"photo_reference": "ref-1"}],
                "geometry": {"location": {"lat": 35.7148, "lng": 139.7967}},
                "types": ["tourist_attraction", "place_of_worship"]
            }]
        }"#;

        let response = client().parse_search(body).unwrap();
        assert!(response.status.is_ok());
        assert_eq!(response.payload.len(), 1);

        let place = &response.payload[0];
        assert_eq!(place.place_id.as_deref(), Some("abc123"));
        assert_eq!(place.coordinates(), Some(Coordinates::new(35.7148, 139.7967)));
        let photos = place.photo_urls();
        assert_eq!(photos, vec!["/api/places/photo?reference=ref-1&maxwidth=800"]);
    }

    #[test]
    fn test_api_key_never_reaches_itinerary_output() {
        let client = GooglePlacesClient::init(PlacesConfig::with_api_key("SECRET-SERVER-KEY"))
            .expect("client should build");
        let body = r#"{
            "status": "OK",
            "results": [{
                "name": "Meiji Jingu",
                "place_id": "meiji",
                "photos": [{"photo_reference": "r"}],
                "geometry": {"location": {"lat": 35.67, "lng": 139.69}}
            }]
        }"#;

        let raw = client.parse_search(body).unwrap().payload.remove(0);
        let place = EnrichedPlace::unchanged(
            Candidate::from_raw(&raw, PlaceCategory::Attraction).unwrap(),
        );
        let attractions = vec![place];
        let days = Allocator::new("Tokyo", BudgetTier::Moderate, ActivityLevel::Moderate)
            .allocate(&attractions, &[], 1);
        let cards = RecommendationService::compile(&attractions, &[]);

        let json = serde_json::to_string(&(days, cards)).unwrap();
        assert!(json.contains("/api/places/photo?reference=r"));
        assert!(!json.contains("SECRET-SERVER-KEY"));
    }

    #[tokio::test]
    async fn test_network_errors_omit_request_url() {
        // Nothing listens on port 1, so the connection is refused.
        let client = GooglePlacesClient::init(PlacesConfig {
            base_url: "http://127.0.0.1:1/maps/api".to_string(),
            timeout: Duration::from_secs(2),
            ..PlacesConfig::with_api_key("SECRET-SERVER-KEY")
        })
        .expect("client should build");

        let err = client
            .text_search("museums in Oslo", SEARCH_FIELDS)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(!err.to_string().contains("SECRET-SERVER-KEY"));
    }

    #[test]
    fn test_parse_find_place_candidates() {
        let body = r#"{
            "status": "OK",
            "candidates": [{"name": "Paris", "formatted_address": "Paris, France", "place_id": "paris"}]
        }"#;
        let response = client().parse_search(body).unwrap();
        assert_eq!(response.payload.len(), 1);
        assert_eq!(response.payload[0].name, "Paris");
        assert!(response.payload[0].coordinates().is_none());
    }

    #[test]
    fn test_parse_denied_status() {
        let body = r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#;
        let response = client().parse_search(body).unwrap();
        assert_eq!(response.status, DirectoryStatus::RequestDenied);
        assert!(response.payload.is_empty());
    }

    #[test]
    fn test_parse_details_and_malformed() {
        let body = r#"{"status": "OK", "result": {"name": "Louvre", "place_id": "louvre", "rating": 4.7}}"#;
        let response = client().parse_details(body).unwrap();
        let place = response.payload.expect("detail record");
        assert_eq!(place.rating, Some(4.7));

        let err = client().parse_details("<html>").unwrap_err();
        assert!(matches!(err, PlacesError::Malformed(_)));
    }
}
