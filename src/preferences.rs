//! Buyer preferences for a single search request.
//!
//! Captured once from CLI flags or the interactive wizard and passed by
//! reference into every comparison; never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Everything the buyer told us about what they want
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserPreferences {
    /// Preferred locality (e.g., "Chembur")
    pub location: String,
    /// Free-text budget, single value or range (e.g., "1 Cr - 1.5 Cr")
    #[serde(default)]
    pub budget: String,
    /// Expected carpet area in sq ft (e.g., "800")
    #[serde(default)]
    pub carpet_area: String,
    /// Preferred floor or other placement requirements (e.g., "higher floor")
    #[serde(default)]
    pub floor_preference: String,
    /// Comma-separated amenity wishlist (e.g., "Parking, Gym")
    #[serde(default)]
    pub preferred_amenities: String,
    /// Financing requirements (e.g., "Pre-approved Loan")
    #[serde(default)]
    pub financing: String,
}

impl UserPreferences {
    /// Split the comma-separated amenity wishlist into normalized entries.
    /// Entries are trimmed and lowercased; empties are dropped.
    pub fn amenity_list(&self) -> Vec<String> {
        self.preferred_amenities
            .split(',')
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect()
    }
}
