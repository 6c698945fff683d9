// Budget-constrained hotel selection via 0/1 knapsack

use serde::{Deserialize, Serialize};

use crate::catalog::Hotel;

/// One optimal selection under the budget and rating constraints.
///
/// Several subsets can tie at the same total rating; the reconstruction
/// picks one of them deterministically from the DP table, so this is *an*
/// optimum, not necessarily the unique one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub hotels: Vec<Hotel>,
    pub total_rating: f64,
    pub total_cost: u32,
}

impl Selection {
    /// Recommendation text for display, including the budget left over.
    pub fn summary(&self, budget: u32) -> String {
        let mut out = String::from("Recommended hotel combinations\n\n");
        out.push_str(&format!("Overall rating: {}\n\n", self.total_rating));
        out.push_str("Selected hotel:\n");
        for h in &self.hotels {
            out.push_str(&format!("{} - ${} - {}\n", h.name, h.price, h.rating));
        }
        out.push_str(&format!("\nTotal cost: ${}", self.total_cost));
        out.push_str(&format!(
            "\nRemaining budget: ${}",
            budget.saturating_sub(self.total_cost)
        ));
        out
    }
}

/// Chooses the hotel subset maximizing total rating with total price within
/// `budget`, considering only hotels rated at least `min_rating`.
///
/// Exact dynamic program over integer budget units: `best[i][w]` is the
/// maximum achievable rating using the first `i` hotels with spend `<= w`.
/// Runs in `hotels x budget` time and space, so the caller must keep the
/// budget a bounded small integer.
pub fn select_within_budget(hotels: &[Hotel], budget: u32, min_rating: f64) -> Selection {
    let n = hotels.len();
    let budget = budget as usize;
    let mut best = vec![vec![0.0_f64; budget + 1]; n + 1];

    for i in 1..=n {
        let hotel = &hotels[i - 1];
        let price = hotel.price as usize;
        let eligible = hotel.rating >= min_rating;
        for w in 0..=budget {
            let skip = best[i - 1][w];
            best[i][w] = if eligible && price <= w {
                skip.max(best[i - 1][w - price] + hotel.rating)
            } else {
                skip
            };
        }
    }

    // Walk the table backward: a hotel is in the selection exactly when
    // including it changed the optimum at that state boundary.
    let mut selected = Vec::new();
    let mut w = budget;
    for i in (1..=n).rev() {
        if w == 0 {
            break;
        }
        if best[i][w] != best[i - 1][w] {
            let hotel = &hotels[i - 1];
            w -= hotel.price as usize;
            selected.push(hotel.clone());
        }
    }
    selected.reverse();

    let total_cost = selected.iter().map(|h| h.price).sum();
    Selection {
        total_rating: best[n][budget],
        total_cost,
        hotels: selected,
    }
}
