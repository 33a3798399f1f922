use crate::models::trip::{ActivityLevel, BudgetTier, TripRequest};

/// Ordered, deterministic tips for a trip request
pub fn travel_tips(request: &TripRequest) -> Vec<String> {
    let destination = request.destination();

    vec![
        format!(
            "Check opening hours and seasonal closures for attractions in {} before you go.",
            destination
        ),
        budget_tip(request.budget_tier).to_string(),
        activity_tip(request.activity_level).to_string(),
        group_tip(request.travel_group.as_deref()).to_string(),
        "Keep digital and paper copies of your travel documents and bookings.".to_string(),
    ]
}

fn budget_tip(tier: BudgetTier) -> &'static str {
    match tier {
        BudgetTier::Budget => {
            "Look for free walking tours, city passes and lunch specials to stretch your budget."
        }
        BudgetTier::Moderate => "Book popular attractions online in advance to skip the queues.",
        BudgetTier::Luxury => {
            "Reserve tasting menus and private guides early, as they sell out quickly."
        }
    }
}

fn activity_tip(level: ActivityLevel) -> &'static str {
    match level {
        ActivityLevel::Relaxed => "Leave room for rest between stops; an unplanned afternoon is part of the trip.",
        ActivityLevel::Moderate => "Group nearby sights together to cut down on travel time between stops.",
        ActivityLevel::Active => "Wear comfortable shoes and carry water; you will cover a lot of ground each day.",
    }
}

fn group_tip(group: Option<&str>) -> &'static str {
    match group.map(|g| g.trim().to_lowercase()).as_deref() {
        Some("solo") => "Share your daily plans with someone at home and keep your phone charged.",
        Some("couple") => "Plan one special dinner or sunset spot to make the trip memorable.",
        Some("family") => "Schedule breaks and check which attractions offer family or child tickets.",
        Some("friends") => "Agree on a shared budget up front and split costs with a payment app.",
        Some("business") => "Keep evenings flexible around meetings and note transit times to your venue.",
        _ => "Learn a few words of the local language; a greeting goes a long way.",
    }
}
