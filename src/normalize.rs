//! Free-text budget and area normalization.
//!
//! Listing prices and areas arrive as whatever the model pulled out of the
//! ad copy ("Approx. Rs. 1.2 Cr", "820 sq ft", "Negotiable"). This module
//! turns them into comparable numbers in canonical units: rupees for money,
//! square feet for area. Parse failure is a first-class outcome, never zero.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::AreaField;

// Tokens dropped from budget text before numeric parsing
static BUDGET_NOISE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"approx\.|rs\.|[₹,]").expect("Invalid budget noise regex")
});

/// Magnitude suffixes in descending specificity so "crores" wins over "cr"
const MAGNITUDE_SUFFIXES: [(&str, f64); 7] = [
    ("crores", 10_000_000.0),
    ("crore", 10_000_000.0),
    ("cr", 10_000_000.0),
    ("lakhs", 100_000.0),
    ("lakh", 100_000.0),
    ("lacs", 100_000.0),
    ("lac", 100_000.0),
];

/// A closed rupee interval. A `None` bound is unknown; both `None` means the
/// text could not be parsed at all (indeterminate, not zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRange {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl BudgetRange {
    pub const INDETERMINATE: BudgetRange = BudgetRange { low: None, high: None };

    /// A degenerate range for a single quoted price
    pub fn point(value: f64) -> Self {
        Self {
            low: Some(value),
            high: Some(value),
        }
    }

    /// True when neither bound could be determined
    pub fn is_indeterminate(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// Interval overlap test. A missing bound on either side automatically
    /// satisfies its half of the test, so partially-known ranges still
    /// compare rather than degrading to "unclear".
    pub fn overlaps(&self, other: &BudgetRange) -> bool {
        let low_ok = match (self.low, other.high) {
            (Some(low), Some(high)) => low <= high,
            _ => true,
        };
        let high_ok = match (self.high, other.low) {
            (Some(high), Some(low)) => high >= low,
            _ => true,
        };
        low_ok && high_ok
    }
}

/// Parse a free-text budget into a rupee range.
///
/// Handles "1 Cr - 1.5 Cr", "80 Lac", "Approx. Rs. 95,00,000" and plain
/// rupee amounts. A hyphen splits the text into two independently-parsed
/// sides; without one the value collapses to a point range. Anything
/// non-numeric after suffix stripping yields [`BudgetRange::INDETERMINATE`].
pub fn parse_budget(text: &str) -> BudgetRange {
    let lowered = text.to_lowercase();
    let cleaned = BUDGET_NOISE_RE.replace_all(&lowered, "");

    let parts: Vec<&str> = cleaned.split('-').collect();
    if parts.len() == 2 {
        match (parse_magnitude(parts[0]), parse_magnitude(parts[1])) {
            (Some(low), Some(high)) => BudgetRange {
                low: Some(low),
                high: Some(high),
            },
            // A half-parsed range is worse than an honest unknown
            _ => BudgetRange::INDETERMINATE,
        }
    } else {
        match parse_magnitude(&cleaned) {
            Some(value) => BudgetRange::point(value),
            None => BudgetRange::INDETERMINATE,
        }
    }
}

/// Parse one side of a budget expression into rupees
fn parse_magnitude(part: &str) -> Option<f64> {
    let part = part.trim();
    for (token, multiplier) in MAGNITUDE_SUFFIXES {
        if let Some(rest) = part.strip_suffix(token) {
            return rest.trim().parse::<f64>().ok().map(|v| v * multiplier);
        }
    }
    part.parse::<f64>().ok()
}

/// Parse a free-text area expression into square feet.
/// Returns `None` when the residue is not numeric.
pub fn parse_area(text: &str) -> Option<f64> {
    let cleaned = text
        .to_lowercase()
        .replace("sq ft", "")
        .replace("sq.ft.", "")
        .replace("sqft", "")
        .replace(',', "");
    cleaned.trim().parse::<f64>().ok()
}

/// Pick the area text out of whichever shape the extraction produced.
/// Carpet area is preferred over built-up; an empty field falls through.
/// Returns the raw text so the caller can distinguish "unparseable" from
/// "absent".
pub fn area_from_field(field: &AreaField) -> Option<String> {
    match field {
        AreaField::Breakdown { carpet, built_up } => carpet
            .as_ref()
            .map(|v| v.as_text())
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                built_up
                    .as_ref()
                    .map(|v| v.as_text())
                    .filter(|s| !s.trim().is_empty())
            }),
        AreaField::Value(value) => Some(value.as_text()).filter(|s| !s.trim().is_empty()),
    }
}
