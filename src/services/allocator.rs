use crate::models::itinerary::{Activity, DayPlan, Meal, MealType, TimeSlot};
use crate::models::place::{EnrichedPlace, PLACEHOLDER_ID_PREFIX};
use crate::models::trip::{ActivityLevel, BudgetTier};

const DAY_THEMES: [&str; 7] = [
    "Highlights",
    "Culture & Landmarks",
    "Local Favorites",
    "Hidden Gems",
    "Neighborhood Walks",
    "Scenic Views",
    "Relaxed Discoveries",
];

const GENERIC_TYPES: [&str; 6] = [
    "restaurant",
    "food",
    "point_of_interest",
    "establishment",
    "meal_takeaway",
    "meal_delivery",
];

const DEFAULT_CUISINE: &str = "Local cuisine";

/// Upper bound of attractions any single day receives
pub fn attractions_per_day(total: usize, days: usize) -> usize {
    if days == 0 {
        return 0;
    }
    total.div_ceil(days)
}

/// Spread `count` activities over Morning, Afternoon, Evening
pub fn slot_counts(count: usize) -> [usize; 3] {
    let per_slot = count / 3;
    let extra = count % 3;
    let mut counts = [per_slot; 3];
    for slot in counts.iter_mut().take(extra) {
        *slot += 1;
    }
    counts
}

/// Restaurant indices (breakfast, lunch, dinner) for a 0-based day index.
/// Offsets rotate the pool so neighbouring days rarely repeat a meal.
pub fn restaurant_indices(day_index: usize, restaurants: usize) -> Option<(usize, usize, usize)> {
    if restaurants == 0 {
        return None;
    }
    Some((
        (day_index + 2) % restaurants,
        day_index % restaurants,
        (day_index + 1) % restaurants,
    ))
}

pub fn meal_types(tier: BudgetTier) -> Vec<MealType> {
    let mut meals = vec![MealType::Breakfast, MealType::Lunch];
    if tier.includes_dinner() {
        meals.push(MealType::Dinner);
    }
    meals
}

pub fn day_title(day: u32) -> String {
    if day == 1 {
        return "Day 1: Arrival & Highlights".to_string();
    }
    let theme = DAY_THEMES[(day as usize - 1) % DAY_THEMES.len()];
    format!("Day {}: {}", day, theme)
}

/// Humanise the first specific category hint (`japanese_restaurant` -> "Japanese")
pub fn cuisine_from_types(types: &[String]) -> String {
    types
        .iter()
        .map(|t| t.to_lowercase())
        .find(|t| !GENERIC_TYPES.contains(&t.as_str()))
        .map(|t| {
            t.trim_end_matches("_restaurant")
                .split('_')
                .filter(|word| !word.is_empty())
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|cuisine| !cuisine.is_empty())
        .unwrap_or_else(|| DEFAULT_CUISINE.to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct Allocator<'a> {
    destination: &'a str,
    budget_tier: BudgetTier,
    activity_level: ActivityLevel,
}

impl<'a> Allocator<'a> {
    pub fn new(destination: &'a str, budget_tier: BudgetTier, activity_level: ActivityLevel) -> Self {
        Self {
            destination,
            budget_tier,
            activity_level,
        }
    }

    pub fn allocate(
        &self,
        attractions: &[EnrichedPlace],
        restaurants: &[EnrichedPlace],
        days: u32,
    ) -> Vec<DayPlan> {
        let per_day = attractions_per_day(attractions.len(), days as usize);

        (0..days as usize)
            .map(|day_index| {
                let start = (day_index * per_day).min(attractions.len());
                let end = ((day_index + 1) * per_day).min(attractions.len());
                let day_attractions = &attractions[start..end];

                let activities = if day_attractions.is_empty() {
                    self.placeholder_activities(day_index as u32 + 1)
                } else {
                    self.schedule_attractions(day_attractions)
                };
                let meals = self.assign_meals(day_index, restaurants);

                self.day_plan(day_index as u32 + 1, activities, meals)
            })
            .collect()
    }

    fn day_plan(&self, day: u32, activities: Vec<Activity>, meals: Vec<Meal>) -> DayPlan {
        DayPlan {
            day,
            title: day_title(day),
            description: format!(
                "Discover {} with {} planned {}.",
                self.destination,
                activities.len(),
                if activities.len() == 1 { "stop" } else { "stops" }
            ),
            activities,
            meals,
            transportation: self.activity_level.transportation().to_string(),
        }
    }

    fn schedule_attractions(&self, attractions: &[EnrichedPlace]) -> Vec<Activity> {
        let counts = slot_counts(attractions.len());
        let mut remaining = attractions.iter();

        TimeSlot::ALL
            .iter()
            .zip(counts)
            .flat_map(|(slot, count)| {
                remaining
                    .by_ref()
                    .take(count)
                    .map(|place| self.activity_for(*slot, place))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn activity_for(&self, time_slot: TimeSlot, place: &EnrichedPlace) -> Activity {
        let candidate = &place.place;
        let mut description = format!("Visit {}", candidate.name);
        if candidate.rating > 0.0 {
            description.push_str(&format!(", rated {:.1}/5 by visitors", candidate.rating));
        }
        description.push('.');

        Activity {
            time_slot,
            name: candidate.name.clone(),
            description,
            location: location_text(candidate.formatted_address.as_str(), self.destination),
            cost: self.budget_tier.activity_cost().to_string(),
            place_id: candidate.place_id.clone(),
            coordinates: candidate.coordinates,
            photo: candidate.first_photo(),
        }
    }

    fn placeholder_activities(&self, day: u32) -> Vec<Activity> {
        let templates = [
            (
                TimeSlot::Morning,
                "Morning Neighborhood Walk",
                format!("Start the day wandering the streets of {}.", self.destination),
            ),
            (
                TimeSlot::Afternoon,
                "Afternoon Landmark Visit",
                format!("Spend the afternoon at one of {}'s well-known landmarks.", self.destination),
            ),
            (
                TimeSlot::Evening,
                "Evening Local Experience",
                format!("Wind down with an evening out in {}.", self.destination),
            ),
        ];

        templates
            .into_iter()
            .map(|(time_slot, name, description)| Activity {
                time_slot,
                name: name.to_string(),
                description,
                location: self.destination.to_string(),
                cost: self.budget_tier.activity_cost().to_string(),
                place_id: format!("{}day{}-{}", PLACEHOLDER_ID_PREFIX, day, time_slot.as_str()),
                coordinates: None,
                photo: None,
            })
            .collect()
    }

    fn assign_meals(&self, day_index: usize, restaurants: &[EnrichedPlace]) -> Vec<Meal> {
        let Some((breakfast, lunch, dinner)) = restaurant_indices(day_index, restaurants.len())
        else {
            return Vec::new();
        };

        meal_types(self.budget_tier)
            .into_iter()
            .map(|meal_type| {
                let index = match meal_type {
                    MealType::Breakfast => breakfast,
                    MealType::Lunch => lunch,
                    MealType::Dinner => dinner,
                };
                self.meal_for(meal_type, &restaurants[index])
            })
            .collect()
    }

    fn meal_for(&self, meal_type: MealType, place: &EnrichedPlace) -> Meal {
        let candidate = &place.place;
        Meal {
            meal_type,
            restaurant: candidate.name.clone(),
            cuisine: cuisine_from_types(&candidate.types),
            place_id: candidate.place_id.clone(),
            coordinates: candidate.coordinates,
            location: location_text(candidate.formatted_address.as_str(), self.destination),
            photo: candidate.first_photo(),
        }
    }
}

fn location_text(address: &str, destination: &str) -> String {
    if address.trim().is_empty() {
        destination.to_string()
    } else {
        address.to_string()
    }
}
