use std::{env, sync::Arc, time::Duration};

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::PlacesError;
use crate::models::itinerary::{Itinerary, ItinerarySource};
use crate::models::place::{Candidate, PlaceCategory};
use crate::models::trip::TripRequest;
use crate::services::allocator::Allocator;
use crate::services::budget_service::{BudgetService, BASE_DAILY_COST};
use crate::services::candidate_fetcher::{CandidateFetcher, SearchOutcome, SearchResult};
use crate::services::decision::{decide, Action, Stage, StageOutcome};
use crate::services::destination_resolver::DestinationResolver;
use crate::services::detail_enricher::{
    DetailEnricher, EnrichmentConfig, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE,
};
use crate::services::fallback_service::{FallbackReason, FallbackService};
use crate::services::places::PlacesDirectory;
use crate::services::recommendation_service::RecommendationService;
use crate::services::travel_tips::travel_tips;

fn fallback_reason(error: &PlacesError) -> FallbackReason {
    match StageOutcome::from_error(error) {
        StageOutcome::ConfigurationMissing => FallbackReason::ConfigurationMissing,
        StageOutcome::NetworkError => FallbackReason::NetworkError(error.to_string()),
        _ => match error {
            PlacesError::ProviderDenied { status } => FallbackReason::ProviderDenied(status.clone()),
            other => FallbackReason::ProviderDenied(other.to_string()),
        },
    }
}

#[derive(Debug, Clone)]
pub struct ItineraryGenerationConfig {
    pub enrichment: EnrichmentConfig,
    pub base_daily_cost: f64,
    pub resolve_destination: bool,
}

impl Default for ItineraryGenerationConfig {
    fn default() -> Self {
        Self {
            enrichment: EnrichmentConfig::default(),
            base_daily_cost: BASE_DAILY_COST,
            resolve_destination: true,
        }
    }
}

impl ItineraryGenerationConfig {
    /// Read `PLACES_BATCH_SIZE` and `PLACES_BATCH_DELAY_MS`, keeping defaults otherwise
    pub fn from_env() -> Self {
        let batch_size = env::var("PLACES_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BATCH_SIZE);
        let batch_delay = env::var("PLACES_BATCH_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_BATCH_DELAY);

        Self {
            enrichment: EnrichmentConfig {
                batch_size,
                batch_delay,
            },
            ..Default::default()
        }
    }
}

pub struct ItineraryGenerator {
    directory: Option<Arc<dyn PlacesDirectory>>,
    config: ItineraryGenerationConfig,
}

impl ItineraryGenerator {
    /// `None` means no places credential is available; every request then
    /// takes the fallback path.
    pub fn new(directory: Option<Arc<dyn PlacesDirectory>>) -> Self {
        Self::with_config(directory, ItineraryGenerationConfig::default())
    }

    pub fn with_config(
        directory: Option<Arc<dyn PlacesDirectory>>,
        config: ItineraryGenerationConfig,
    ) -> Self {
        Self { directory, config }
    }

    pub fn directory(&self) -> Option<&dyn PlacesDirectory> {
        self.directory.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.directory.is_some()
    }

    /// Generate an itinerary. Always returns a complete itinerary, falling
    /// back to a generic plan when the places directory cannot be used.
    pub async fn generate(&self, request: &TripRequest) -> Itinerary {
        self.generate_cancellable(request, &CancellationToken::new())
            .await
    }

    pub async fn generate_cancellable(
        &self,
        request: &TripRequest,
        cancel: &CancellationToken,
    ) -> Itinerary {
        let Some(directory) = self.directory() else {
            return self.fallback(request, &FallbackReason::ConfigurationMissing);
        };

        let destination = request.destination().to_string();
        let anchor = self.resolve_anchor(directory, &destination, cancel).await;

        // Get attractions and restaurants
        let (attraction_search, restaurant_search) =
            CandidateFetcher::fetch_all(directory, &anchor, &request.interests, cancel).await;

        let attractions = match self.search_candidates(attraction_search, PlaceCategory::Attraction) {
            Ok(candidates) => candidates,
            Err(reason) => return self.fallback(request, &reason),
        };
        let restaurants = match self.search_candidates(restaurant_search, PlaceCategory::Restaurant) {
            Ok(candidates) => candidates,
            Err(reason) => return self.fallback(request, &reason),
        };

        if attractions.is_empty() && restaurants.is_empty() {
            return self.fallback(request, &FallbackReason::NoCandidates);
        }

        // Enrich both lists in one pass, then split them back apart
        let attraction_count = attractions.len();
        let mut combined = attractions;
        combined.extend(restaurants);

        let mut enriched = DetailEnricher::new(directory, self.config.enrichment.clone())
            .enrich(combined)
            .await;
        let enriched_restaurants = enriched.split_off(attraction_count.min(enriched.len()));
        let enriched_attractions = enriched;

        let trip_days = request.trip_days();
        let days = Allocator::new(&destination, request.budget_tier, request.activity_level)
            .allocate(&enriched_attractions, &enriched_restaurants, trip_days);
        let recommendations =
            RecommendationService::compile(&enriched_attractions, &enriched_restaurants);

        log::info!(
            "Generated itinerary for '{}': {} days, {} attractions, {} restaurants, {} recommendations",
            destination,
            days.len(),
            enriched_attractions.len(),
            enriched_restaurants.len(),
            recommendations.len()
        );

        Itinerary {
            id: Uuid::new_v4(),
            trip_days,
            budget_tier: request.budget_tier,
            days,
            recommendations,
            budget: BudgetService::estimate_with_base(
                self.config.base_daily_cost,
                trip_days,
                request.budget_tier,
            ),
            tips: travel_tips(request),
            source: ItinerarySource::Places,
            generated_at: Utc::now(),
            destination,
        }
    }

    /// Locate the anchor text for category searches; falls back to the raw destination
    async fn resolve_anchor(
        &self,
        directory: &dyn PlacesDirectory,
        destination: &str,
        cancel: &CancellationToken,
    ) -> String {
        if !self.config.resolve_destination {
            return destination.to_string();
        }

        DestinationResolver::resolve_cancellable(directory, destination, Some(1), cancel)
            .await
            .first()
            .map(|resolved| resolved.anchor_text().to_string())
            .unwrap_or_else(|| destination.to_string())
    }

    fn search_candidates(
        &self,
        result: SearchResult,
        category: PlaceCategory,
    ) -> Result<Vec<Candidate>, FallbackReason> {
        let outcome = StageOutcome::from_search(&result);
        match decide(Stage::Search, outcome) {
            Action::Continue => Ok(result
                .map(SearchOutcome::into_candidates)
                .unwrap_or_default()),
            Action::SkipLocally | Action::InvokeFallback => {
                let reason = match &result {
                    Err(e) => fallback_reason(e),
                    Ok(_) => FallbackReason::NoCandidates,
                };
                log::warn!("{:?} search ended in {:?}: {}", category, outcome, reason);
                Err(reason)
            }
        }
    }

    fn fallback(&self, request: &TripRequest, reason: &FallbackReason) -> Itinerary {
        let mut itinerary = FallbackService::generate(request, reason);
        itinerary.budget = BudgetService::estimate_with_base(
            self.config.base_daily_cost,
            itinerary.trip_days,
            request.budget_tier,
        );
        itinerary
    }
}
