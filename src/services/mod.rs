pub mod allocator;
pub mod budget_service;
pub mod candidate_fetcher;
pub mod decision;
pub mod destination_resolver;
pub mod detail_enricher;
pub mod fallback_service;
pub mod itinerary_generation_service;
pub mod places;
pub mod recommendation_service;
pub mod travel_tips;
