use chrono::Utc;
use uuid::Uuid;

use crate::models::itinerary::{
    Activity, DayPlan, Itinerary, ItinerarySource, Meal, MealType, TimeSlot,
};
use crate::models::place::FALLBACK_ID_PREFIX;
use crate::models::trip::TripRequest;
use crate::services::allocator::{day_title, meal_types};
use crate::services::budget_service::BudgetService;
use crate::services::travel_tips::travel_tips;

/// Why the generic itinerary was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    ConfigurationMissing,
    ProviderDenied(String),
    NetworkError(String),
    NoCandidates,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::ConfigurationMissing => write!(f, "places directory not configured"),
            FallbackReason::ProviderDenied(status) => write!(f, "places directory denied: {}", status),
            FallbackReason::NetworkError(err) => write!(f, "places directory unreachable: {}", err),
            FallbackReason::NoCandidates => write!(f, "no attractions or restaurants found"),
        }
    }
}

const FALLBACK_ACTIVITIES: [(TimeSlot, &str, &str); 3] = [
    (
        TimeSlot::Morning,
        "Explore the City Center",
        "Get oriented with a relaxed walk through the heart of",
    ),
    (
        TimeSlot::Afternoon,
        "Visit a Local Museum",
        "Learn about the history and culture of",
    ),
    (
        TimeSlot::Evening,
        "Sunset Stroll and Local Market",
        "Catch the sunset and browse an evening market in",
    ),
];

fn fallback_restaurant(meal_type: MealType) -> (&'static str, &'static str) {
    match meal_type {
        MealType::Breakfast => ("Local Café", "Café"),
        MealType::Lunch => ("Neighborhood Bistro", "Bistro"),
        MealType::Dinner => ("Popular Local Restaurant", "Local cuisine"),
    }
}

pub struct FallbackService;

impl FallbackService {
    /// Build a generic itinerary without any external calls. Never fails.
    pub fn generate(request: &TripRequest, reason: &FallbackReason) -> Itinerary {
        let destination = request.destination().to_string();
        let trip_days = request.trip_days();
        log::warn!(
            "Generating fallback itinerary for '{}' ({} days): {}",
            destination,
            trip_days,
            reason
        );

        let days = (1..=trip_days)
            .map(|day| Self::day_plan(request, &destination, day))
            .collect();

        Itinerary {
            id: Uuid::new_v4(),
            trip_days,
            budget_tier: request.budget_tier,
            days,
            recommendations: Vec::new(),
            budget: BudgetService::estimate(trip_days, request.budget_tier),
            tips: travel_tips(request),
            source: ItinerarySource::Fallback,
            generated_at: Utc::now(),
            destination,
        }
    }

    fn day_plan(request: &TripRequest, destination: &str, day: u32) -> DayPlan {
        let activities = FALLBACK_ACTIVITIES
            .iter()
            .map(|(time_slot, name, description)| Activity {
                time_slot: *time_slot,
                name: name.to_string(),
                description: format!("{} {}.", description, destination),
                location: destination.to_string(),
                cost: request.budget_tier.activity_cost().to_string(),
                place_id: format!("{}day{}-{}", FALLBACK_ID_PREFIX, day, time_slot.as_str()),
                coordinates: None,
                photo: None,
            })
            .collect();

        let meals = meal_types(request.budget_tier)
            .into_iter()
            .map(|meal_type| {
                let (restaurant, cuisine) = fallback_restaurant(meal_type);
                Meal {
                    meal_type,
                    restaurant: restaurant.to_string(),
                    cuisine: cuisine.to_string(),
                    place_id: format!("{}day{}-{}", FALLBACK_ID_PREFIX, day, meal_type.as_str()),
                    coordinates: None,
                    location: destination.to_string(),
                    photo: None,
                }
            })
            .collect();

        DayPlan {
            day,
            title: day_title(day),
            description: format!("A flexible day exploring {} at your own pace.", destination),
            activities,
            meals,
            transportation: request.activity_level.transportation().to_string(),
        }
    }
}
