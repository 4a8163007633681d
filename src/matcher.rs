//! Compares one extracted property against the buyer's preferences.
//!
//! `match_listing` is a pure function: missing or unparseable data produces
//! a "cannot determine" finding, never an error. Findings are appended in a
//! fixed criterion order (location, budget, area, floor, amenities,
//! financing, builder reputation) so the result is deterministic for a
//! given input. The scorer later does substring checks against these
//! strings, so their exact wording matters.

use crate::extract::{Highlights, PropertyAttributes};
use crate::normalize;
use crate::preferences::UserPreferences;
use crate::search::Listing;

/// Relative difference under which an area counts as "close"
const AREA_CLOSENESS: f64 = 0.1;

/// Qualitative comparison findings for one listing, with back-references
/// to where they came from
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub listing: Listing,
    pub attributes: PropertyAttributes,
    pub findings: Vec<String>,
}

/// Compare one property against the buyer's preferences
pub fn match_listing(
    attributes: &PropertyAttributes,
    prefs: &UserPreferences,
    listing: &Listing,
) -> ComparisonResult {
    let mut findings = Vec::new();

    location_findings(&mut findings, attributes, prefs, listing);
    budget_findings(&mut findings, attributes, prefs);
    area_findings(&mut findings, attributes, prefs);
    floor_findings(&mut findings, prefs, listing);
    amenity_findings(&mut findings, attributes, prefs);
    financing_findings(&mut findings, prefs, listing);
    builder_findings(&mut findings, attributes);

    ComparisonResult {
        listing: listing.clone(),
        attributes: attributes.clone(),
        findings,
    }
}

/// Location matches when the preferred locality shows up in the extracted
/// highlights or anywhere in the listing text
fn location_findings(
    out: &mut Vec<String>,
    attributes: &PropertyAttributes,
    prefs: &UserPreferences,
    listing: &Listing,
) {
    let wanted = prefs.location.to_lowercase();

    let in_highlights = match &attributes.locality_highlights {
        Some(Highlights::One(text)) => text.to_lowercase().contains(&wanted),
        Some(Highlights::Many(items)) => {
            items.iter().any(|item| item.to_lowercase().contains(&wanted))
        }
        None => false,
    };

    if in_highlights
        || listing.title.to_lowercase().contains(&wanted)
        || listing.snippet.to_lowercase().contains(&wanted)
    {
        out.push("Location: Matches preferred location.".to_string());
    } else {
        out.push("Location: Might not match preferred location.".to_string());
    }
}

fn budget_findings(out: &mut Vec<String>, attributes: &PropertyAttributes, prefs: &UserPreferences) {
    let price = attributes
        .price
        .as_deref()
        .filter(|p| !p.trim().is_empty());
    let Some(price) = price else {
        out.push("Budget: No price information found.".to_string());
        return;
    };

    let wanted = normalize::parse_budget(&prefs.budget);
    let offered = normalize::parse_budget(price);
    if wanted.is_indeterminate() || offered.is_indeterminate() {
        out.push("Budget: Price information unclear for comparison.".to_string());
    } else if wanted.overlaps(&offered) {
        out.push("Budget: Potentially within budget.".to_string());
    } else {
        out.push("Budget: Potentially outside budget.".to_string());
    }
}

/// Area comparison only runs when the buyer stated a preferred area.
/// Distinguishes "extracted text we couldn't parse" from "nothing extracted".
fn area_findings(out: &mut Vec<String>, attributes: &PropertyAttributes, prefs: &UserPreferences) {
    let Some(preferred) = normalize::parse_area(&prefs.carpet_area) else {
        return;
    };

    let raw = attributes
        .area_sqft
        .as_ref()
        .and_then(normalize::area_from_field);
    let Some(raw) = raw else {
        out.push("Area: No area information found.".to_string());
        return;
    };

    match normalize::parse_area(&raw) {
        None => out.push("Area: Could not determine area for comparison.".to_string()),
        Some(actual) => {
            let relative = (preferred - actual).abs() / preferred;
            if relative < AREA_CLOSENESS {
                out.push(format!("Area: Close to preferred area ({} sq ft).", preferred));
            } else if actual > preferred {
                out.push(format!("Area: Larger than preferred area ({} sq ft).", preferred));
            } else {
                out.push(format!("Area: Smaller than preferred area ({} sq ft).", preferred));
            }
        }
    }
}

fn floor_findings(out: &mut Vec<String>, prefs: &UserPreferences, listing: &Listing) {
    let wanted = prefs.floor_preference.trim().to_lowercase();
    if wanted.is_empty() {
        return;
    }

    if listing.title.to_lowercase().contains(&wanted)
        || listing.snippet.to_lowercase().contains(&wanted)
    {
        out.push(format!("Floor Preference: Mentions preferred floor ({}).", wanted));
    } else {
        out.push(format!(
            "Floor Preference: Does not mention preferred floor ({}).",
            wanted
        ));
    }
}

/// Partition the amenity wishlist into found and missing. The two sets are
/// disjoint and together cover every preference.
fn amenity_findings(
    out: &mut Vec<String>,
    attributes: &PropertyAttributes,
    prefs: &UserPreferences,
) {
    let wanted = prefs.amenity_list();
    if wanted.is_empty() {
        out.push("Amenities: No preferred amenities specified.".to_string());
        return;
    }

    let offered: Vec<String> = attributes
        .amenities
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|a| a.trim().to_lowercase())
        .collect();

    let (found, missing): (Vec<String>, Vec<String>) =
        wanted.into_iter().partition(|a| offered.contains(a));

    if found.is_empty() {
        out.push("Amenities: Does not mention any preferred amenities.".to_string());
        return;
    }

    out.push(format!(
        "Amenities: Includes preferred amenities: {}.",
        found.join(", ")
    ));
    if !missing.is_empty() {
        out.push(format!(
            "Amenities: Missing some preferred amenities: {}.",
            missing.join(", ")
        ));
    }
}

fn financing_findings(out: &mut Vec<String>, prefs: &UserPreferences, listing: &Listing) {
    let wanted = prefs.financing.trim().to_lowercase();
    if wanted.is_empty() {
        return;
    }

    if listing.title.to_lowercase().contains(&wanted)
        || listing.snippet.to_lowercase().contains(&wanted)
    {
        out.push(format!(
            "Financing: Mentions related financing options ({}).",
            wanted
        ));
    } else {
        out.push(format!(
            "Financing: Does not mention related financing options ({}).",
            wanted
        ));
    }
}

/// Purely informational; the content is surfaced later, not scored
fn builder_findings(out: &mut Vec<String>, attributes: &PropertyAttributes) {
    let has_highlights = attributes
        .builder_reputation_highlights
        .as_deref()
        .is_some_and(|h| !h.trim().is_empty());
    if has_highlights {
        out.push("Builder Reputation: Highlights mentioned in listing.".to_string());
    }
}
