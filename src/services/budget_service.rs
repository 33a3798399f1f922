use crate::models::itinerary::{BudgetEstimate, BudgetItem};
use crate::models::trip::BudgetTier;

pub const BASE_DAILY_COST: f64 = 1500.0;

/// Share of the total per category. Each share is rounded on its own, so the
/// breakdown may not add up to the total exactly.
const BREAKDOWN_SHARES: [(&str, f64); 4] = [
    ("Flights", 0.40),
    ("Accommodation", 0.35),
    ("Activities", 0.15),
    ("Food", 0.10),
];

pub struct BudgetService;

impl BudgetService {
    /// Estimate the whole trip: base cost x tier multiplier x days
    pub fn estimate(days: u32, tier: BudgetTier) -> BudgetEstimate {
        Self::estimate_with_base(BASE_DAILY_COST, days, tier)
    }

    pub fn estimate_with_base(base_cost: f64, days: u32, tier: BudgetTier) -> BudgetEstimate {
        let total = (base_cost * tier.multiplier() * days as f64).round() as i64;

        BudgetEstimate {
            total,
            breakdown: Self::breakdown(total),
            total_cost_display: format_currency(total),
        }
    }

    pub fn breakdown(total: i64) -> Vec<BudgetItem> {
        BREAKDOWN_SHARES
            .iter()
            .map(|(item, share)| BudgetItem {
                item: item.to_string(),
                cost: (total as f64 * share).round() as i64,
            })
            .collect()
    }
}

/// `6000` -> `"$6,000"`
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
