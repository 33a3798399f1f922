use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::place::{Coordinates, PlaceCategory};
use super::trip::BudgetTier;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Activity {
    pub time_slot: TimeSlot,
    pub name: String,
    pub description: String,
    pub location: String,
    pub cost: String,
    pub place_id: String,
    pub coordinates: Option<Coordinates>,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Meal {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub restaurant: String,
    pub cuisine: String,
    pub place_id: String,
    pub coordinates: Option<Coordinates>,
    pub location: String,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayPlan {
    pub day: u32,
    pub title: String,
    pub description: String,
    pub activities: Vec<Activity>,
    pub meals: Vec<Meal>,
    pub transportation: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BudgetItem {
    pub item: String,
    pub cost: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BudgetEstimate {
    pub total: i64,
    pub breakdown: Vec<BudgetItem>,
    pub total_cost_display: String,
}

/// Flat, coordinate-valid view of a place offered to the user for review.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecommendationCard {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub photo: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub category: PlaceCategory,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItinerarySource {
    Places,
    Fallback,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Itinerary {
    pub id: Uuid,
    pub destination: String,
    pub trip_days: u32,
    pub budget_tier: BudgetTier,
    pub days: Vec<DayPlan>,
    pub recommendations: Vec<RecommendationCard>,
    pub budget: BudgetEstimate,
    pub tips: Vec<String>,
    pub source: ItinerarySource,
    pub generated_at: DateTime<Utc>,
}

impl Itinerary {
    /// Copy of this itinerary with one recommendation removed.
    pub fn without_recommendation(&self, place_id: &str) -> Itinerary {
        let mut copy = self.clone();
        copy.recommendations.retain(|card| card.id != place_id);
        copy
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ItinerarySource::Fallback
    }

    pub fn total_activities(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }
}
