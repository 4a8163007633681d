//! Structured attribute extraction from listing free text.
//!
//! A listing's title and snippet go to the language model with a JSON
//! schema prompt; the response comes back as a [`PropertyAttributes`]
//! record or a per-listing extraction error. Failures never abort a run,
//! they just drop the listing from ranking.

use serde::Deserialize;

use crate::error::{HomescoutError, Result};
use crate::llm::TextModel;
use crate::search::Listing;

/// A field the model may emit as either a bare number or free text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Number(f64),
    Text(String),
}

impl TextOrNumber {
    /// Render as text for downstream parsing; whole numbers lose the ".0"
    pub fn as_text(&self) -> String {
        match self {
            TextOrNumber::Number(n) => format!("{}", n),
            TextOrNumber::Text(s) => s.clone(),
        }
    }
}

/// Area as the model reports it: either a plain value or a carpet/built-up
/// breakdown. Shape differences stop here; the matcher only ever sees the
/// normalized result.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AreaField {
    Breakdown {
        #[serde(default)]
        carpet: Option<TextOrNumber>,
        #[serde(default)]
        built_up: Option<TextOrNumber>,
    },
    Value(TextOrNumber),
}

/// Locality highlights arrive as one string or a list of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Highlights {
    One(String),
    Many(Vec<String>),
}

/// Structured extraction output for one listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyAttributes {
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub area_sqft: Option<AreaField>,
    #[serde(default)]
    pub bedrooms: Option<TextOrNumber>,
    #[serde(default)]
    pub bathrooms: Option<TextOrNumber>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub builder: Option<String>,
    #[serde(default)]
    pub builder_reputation_highlights: Option<String>,
    #[serde(default)]
    pub locality_highlights: Option<Highlights>,
}

const EXTRACTION_PROMPT: &str = r#"You are an AI Property Assistant. Analyze the following property listing and extract the information as a JSON object. Do not include any other text or explanations in your response.

{
  "price": "approximate price if mentioned",
  "area_sqft": "carpet or built-up area in square feet if mentioned",
  "bedrooms": "number of bedrooms if mentioned",
  "bathrooms": "number of bathrooms if mentioned",
  "amenities": ["list of key amenities mentioned"],
  "builder": "name of the builder/constructor if mentioned",
  "builder_reputation_highlights": "any highlights about the builder's reputation or past projects mentioned in the listing",
  "locality_highlights": "key highlights or features of the locality mentioned"
}

Title: {{title}}
Description: {{snippet}}

If a piece of information is not available, set its value to null or an empty list/string. Ensure the output is a valid JSON object."#;

/// Build the extraction prompt for one listing
pub fn build_prompt(listing: &Listing) -> String {
    EXTRACTION_PROMPT
        .replace("{{title}}", &listing.title)
        .replace("{{snippet}}", &listing.snippet)
}

/// Run one listing through the model and parse the attribute record.
/// Every failure mode maps to [`HomescoutError::ExtractionError`] with a
/// reason, except rate-limit exhaustion which keeps its own variant.
pub fn extract_attributes(model: &dyn TextModel, listing: &Listing) -> Result<PropertyAttributes> {
    let prompt = build_prompt(listing);
    let raw = model.generate(&prompt)?;
    let json_text = strip_code_fencing(&raw);

    if !json_text.starts_with('{') {
        let preview: String = json_text.chars().take(50).collect();
        return Err(HomescoutError::ExtractionError(format!(
            "response is not a JSON object: {}...",
            preview
        )));
    }

    serde_json::from_str(&json_text).map_err(|e| {
        HomescoutError::ExtractionError(format!("could not parse attributes: {}", e))
    })
}

/// Strip markdown code fencing from a string (e.g., ```json ... ```)
/// Also handles cases where there's text before the code block
pub fn strip_code_fencing(s: &str) -> String {
    let trimmed = s.trim();

    // Prefer an explicit ```json block, even with preamble text before it
    if let Some(json_start) = trimmed.find("```json") {
        let after_fence = &trimmed[json_start + 7..];
        if let Some(end_fence) = after_fence.find("```") {
            return after_fence[..end_fence].trim().to_string();
        }
        return after_fence.trim().to_string();
    }

    // Generic code block
    if let Some(code_start) = trimmed.find("```\n") {
        let after_fence = &trimmed[code_start + 4..];
        if let Some(end_fence) = after_fence.find("```") {
            return after_fence[..end_fence].trim().to_string();
        }
        return after_fence.trim().to_string();
    }

    // Bare ``` prefix/suffix on otherwise clean responses
    let without_prefix = trimmed.strip_prefix("```").unwrap_or(trimmed);
    let without_suffix = without_prefix
        .trim()
        .strip_suffix("```")
        .unwrap_or(without_prefix);

    without_suffix.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_includes_listing_text() {
        let listing = Listing {
            title: "2 BHK in Chembur".to_string(),
            snippet: "Spacious flat near the station".to_string(),
            url: "https://example.com/listing".to_string(),
        };
        let prompt = build_prompt(&listing);
        assert!(prompt.contains("2 BHK in Chembur"));
        assert!(prompt.contains("Spacious flat near the station"));
        assert!(prompt.contains("\"area_sqft\""));
    }

    #[test]
    fn test_parse_attributes_full_record() {
        let json = r#"{
            "price": "1.2 Cr",
            "area_sqft": 820,
            "bedrooms": 2,
            "bathrooms": "2",
            "amenities": ["Parking", "Gym"],
            "builder": "Acme Constructions",
            "builder_reputation_highlights": "30 years of on-time delivery",
            "locality_highlights": "Close to Chembur station"
        }"#;

        let attrs: PropertyAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.price.as_deref(), Some("1.2 Cr"));
        assert!(matches!(
            attrs.area_sqft,
            Some(AreaField::Value(TextOrNumber::Number(n))) if n == 820.0
        ));
        assert_eq!(attrs.amenities.as_ref().unwrap().len(), 2);
        assert!(matches!(attrs.locality_highlights, Some(Highlights::One(_))));
    }

    #[test]
    fn test_parse_attributes_area_breakdown() {
        let json = r#"{"area_sqft": {"carpet": "750", "built_up": 900}}"#;
        let attrs: PropertyAttributes = serde_json::from_str(json).unwrap();
        match attrs.area_sqft {
            Some(AreaField::Breakdown { carpet, built_up }) => {
                assert_eq!(carpet.unwrap().as_text(), "750");
                assert_eq!(built_up.unwrap().as_text(), "900");
            }
            other => panic!("expected breakdown, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_attributes_locality_list_and_nulls() {
        let json = r#"{
            "price": null,
            "area_sqft": null,
            "amenities": null,
            "locality_highlights": ["Near metro", "Good schools"]
        }"#;
        let attrs: PropertyAttributes = serde_json::from_str(json).unwrap();
        assert!(attrs.price.is_none());
        assert!(attrs.area_sqft.is_none());
        assert!(attrs.amenities.is_none());
        assert!(matches!(
            attrs.locality_highlights,
            Some(Highlights::Many(ref items)) if items.len() == 2
        ));
    }

    #[test]
    fn test_text_or_number_renders_whole_numbers() {
        assert_eq!(TextOrNumber::Number(820.0).as_text(), "820");
        assert_eq!(TextOrNumber::Number(820.5).as_text(), "820.5");
        assert_eq!(TextOrNumber::Text("820 sq ft".into()).as_text(), "820 sq ft");
    }

    #[test]
    fn test_strip_code_fencing() {
        // With ```json prefix
        let input = "```json\n{\"foo\": \"bar\"}\n```";
        assert_eq!(strip_code_fencing(input), "{\"foo\": \"bar\"}");

        // With ``` prefix only
        let input = "```\n{\"foo\": \"bar\"}\n```";
        assert_eq!(strip_code_fencing(input), "{\"foo\": \"bar\"}");

        // Already clean JSON
        let input = "{\"foo\": \"bar\"}";
        assert_eq!(strip_code_fencing(input), "{\"foo\": \"bar\"}");

        // With preamble text before code block
        let input = "Here's the listing data:\n\n```json\n{\"foo\": \"bar\"}\n```";
        assert_eq!(strip_code_fencing(input), "{\"foo\": \"bar\"}");
    }
}
