use std::collections::HashSet;

use crate::models::itinerary::RecommendationCard;
use crate::models::place::{EnrichedPlace, PlaceCategory};

pub struct RecommendationService;

impl RecommendationService {
    /// Merge attractions and restaurants into de-duplicated cards. Places
    /// without finite coordinates are dropped.
    pub fn compile(
        attractions: &[EnrichedPlace],
        restaurants: &[EnrichedPlace],
    ) -> Vec<RecommendationCard> {
        let attraction_ids: HashSet<&str> = attractions.iter().map(|p| p.place_id()).collect();
        let mut seen: HashSet<&str> = HashSet::new();

        attractions
            .iter()
            .chain(restaurants)
            .filter(|place| seen.insert(place.place_id()))
            .filter_map(|place| {
                let coordinates = place.place.coordinates.filter(|c| c.is_valid())?;
                let category = if attraction_ids.contains(place.place_id()) {
                    PlaceCategory::Attraction
                } else {
                    PlaceCategory::Restaurant
                };

                Some(RecommendationCard {
                    id: place.place.place_id.clone(),
                    name: place.place.name.clone(),
                    address: place.place.formatted_address.clone(),
                    rating: place.place.rating,
                    photo: place.place.first_photo(),
                    lat: coordinates.lat,
                    lng: coordinates.lng,
                    category,
                })
            })
            .collect()
    }
}

/// Highest rated first; ties keep their original order.
pub fn sort_by_rating(cards: &mut [RecommendationCard]) {
    cards.sort_by(|a, b| b.rating.total_cmp(&a.rating));
}

pub fn filter_by_category(
    cards: &[RecommendationCard],
    category: PlaceCategory,
) -> Vec<RecommendationCard> {
    cards
        .iter()
        .filter(|card| card.category == category)
        .cloned()
        .collect()
}
