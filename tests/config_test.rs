use std::env;
use std::time::Duration;

use serial_test::serial;

use trip_planner_api::error::PlacesError;
use trip_planner_api::services::itinerary_generation_service::ItineraryGenerationConfig;
use trip_planner_api::services::places::google::{GooglePlacesClient, PlacesConfig};

const VARS: [&str; 5] = [
    "GOOGLE_MAPS_API_KEY",
    "PLACES_BASE_URL",
    "PLACES_TIMEOUT_SECS",
    "PLACES_BATCH_SIZE",
    "PLACES_BATCH_DELAY_MS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let places = PlacesConfig::from_env();
    assert!(places.api_key.is_none());
    assert_eq!(places.base_url, "https://maps.googleapis.com/maps/api");
    assert_eq!(places.timeout, Duration::from_secs(10));

    let generation = ItineraryGenerationConfig::from_env();
    assert_eq!(generation.enrichment.batch_size, 5);
    assert_eq!(generation.enrichment.batch_delay, Duration::from_millis(150));

    assert!(matches!(
        GooglePlacesClient::init(places),
        Err(PlacesError::Configuration(_))
    ));
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("GOOGLE_MAPS_API_KEY", "test-key");
    env::set_var("PLACES_BASE_URL", "http://localhost:9999/maps/api");
    env::set_var("PLACES_TIMEOUT_SECS", "3");
    env::set_var("PLACES_BATCH_SIZE", "2");
    env::set_var("PLACES_BATCH_DELAY_MS", "0");

    let places = PlacesConfig::from_env();
    assert_eq!(places.api_key.as_deref(), Some("test-key"));
    assert_eq!(places.base_url, "http://localhost:9999/maps/api");
    assert_eq!(places.timeout, Duration::from_secs(3));
    let client = GooglePlacesClient::init(places).expect("key is set");
    client.teardown();

    let generation = ItineraryGenerationConfig::from_env();
    assert_eq!(generation.enrichment.batch_size, 2);
    assert!(generation.enrichment.batch_delay.is_zero());

    clear_env();
}

#[test]
#[serial]
fn test_unparseable_values_keep_defaults() {
    clear_env();
    env::set_var("PLACES_TIMEOUT_SECS", "soon");
    env::set_var("PLACES_BATCH_SIZE", "-1");

    assert_eq!(PlacesConfig::from_env().timeout, Duration::from_secs(10));
    assert_eq!(ItineraryGenerationConfig::from_env().enrichment.batch_size, 5);

    clear_env();
}
