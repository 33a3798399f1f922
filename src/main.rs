use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_planner_api::routes;
use trip_planner_api::services::itinerary_generation_service::{
    ItineraryGenerationConfig, ItineraryGenerator,
};
use trip_planner_api::services::places::google::{GooglePlacesClient, PlacesConfig};
use trip_planner_api::services::places::PlacesDirectory;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let directory: Option<Arc<dyn PlacesDirectory>> =
        match GooglePlacesClient::init(PlacesConfig::from_env()) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                log::warn!("Places directory unavailable, serving fallback itineraries: {}", e);
                None
            }
        };

    let generator = Arc::new(ItineraryGenerator::with_config(
        directory,
        ItineraryGenerationConfig::from_env(),
    ));

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(generator.clone()))
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
