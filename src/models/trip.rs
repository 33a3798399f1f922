use serde::{Deserialize, Serialize};

use crate::error::RequestError;

pub const DEFAULT_TRIP_DAYS: u32 = 3;
pub const MIN_TRIP_DAYS: u32 = 1;
pub const MAX_TRIP_DAYS: u32 = 14;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TripRequest {
    pub destination: String,
    #[serde(default)]
    pub days: Option<i64>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub budget_tier: BudgetTier,
    #[serde(default)]
    pub travel_group: Option<String>,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

impl TripRequest {
    pub fn new(destination: impl Into<String>, days: i64) -> Self {
        Self {
            destination: destination.into(),
            days: Some(days),
            interests: Vec::new(),
            budget_tier: BudgetTier::default(),
            travel_group: None,
            activity_level: ActivityLevel::default(),
        }
    }

    pub fn with_budget_tier(mut self, tier: BudgetTier) -> Self {
        self.budget_tier = tier;
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_activity_level(mut self, level: ActivityLevel) -> Self {
        self.activity_level = level;
        self
    }

    pub fn with_travel_group(mut self, group: impl Into<String>) -> Self {
        self.travel_group = Some(group.into());
        self
    }

    /// Number of days to plan, clamped to the supported range
    pub fn trip_days(&self) -> u32 {
        match self.days {
            Some(days) => days.clamp(MIN_TRIP_DAYS as i64, MAX_TRIP_DAYS as i64) as u32,
            None => DEFAULT_TRIP_DAYS,
        }
    }

    pub fn destination(&self) -> &str {
        self.destination.trim()
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.destination().is_empty() {
            return Err(RequestError::EmptyDestination);
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl BudgetTier {
    /// Scales the base trip cost
    pub fn multiplier(&self) -> f64 {
        match self {
            BudgetTier::Budget => 0.6,
            BudgetTier::Moderate => 1.0,
            BudgetTier::Luxury => 1.8,
        }
    }

    /// Display range attached to every planned activity
    pub fn activity_cost(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "Free - $20",
            BudgetTier::Moderate => "$20 - $50",
            BudgetTier::Luxury => "$50 - $150",
        }
    }

    pub fn includes_dinner(&self) -> bool {
        !matches!(self, BudgetTier::Budget)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "budget",
            BudgetTier::Moderate => "moderate",
            BudgetTier::Luxury => "luxury",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Relaxed,
    #[default]
    Moderate,
    Active,
}

impl ActivityLevel {
    /// How the traveller gets around on a given day
    pub fn transportation(&self) -> &'static str {
        match self {
            ActivityLevel::Relaxed => "Taxis or rideshare between stops, with plenty of rest time",
            ActivityLevel::Moderate => "Public transit with short walks between nearby stops",
            ActivityLevel::Active => "Walking and cycling between sights, transit for longer hops",
        }
    }
}
