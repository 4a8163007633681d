//! Scores comparison findings and ranks properties.
//!
//! Scoring is a pure sum over a fixed point table; each finding contributes
//! at most one entry's points. Ranking is a stable descending sort, so ties
//! keep the original discovery order and re-ranking an already-sorted batch
//! changes nothing.

use crate::matcher::ComparisonResult;

/// Point weights applied by substring match against each finding string.
/// Earlier entries win when a finding could match more than one phrase.
const POINT_TABLE: [(&str, u32); 5] = [
    ("Matches preferred location", 5),
    ("Potentially within budget", 4),
    ("Close to preferred area", 3),
    ("Includes preferred amenities", 2),
    ("Mentions preferred floor", 1),
];

/// A property with its score and final position
#[derive(Debug, Clone)]
pub struct RankedProperty {
    pub comparison: ComparisonResult,
    pub score: u32,
    /// 1-based position after sorting
    pub rank: usize,
}

/// Sum the point table over a property's findings
pub fn score(comparison: &ComparisonResult) -> u32 {
    comparison
        .findings
        .iter()
        .map(|finding| {
            POINT_TABLE
                .iter()
                .find(|(phrase, _)| finding.contains(phrase))
                .map(|(_, points)| *points)
                .unwrap_or(0)
        })
        .sum()
}

/// Order comparisons by descending score. The sort is stable: equal scores
/// keep their relative input order. Top-K selection is the caller's call.
pub fn rank(comparisons: Vec<ComparisonResult>) -> Vec<RankedProperty> {
    let mut ranked: Vec<RankedProperty> = comparisons
        .into_iter()
        .map(|comparison| RankedProperty {
            score: score(&comparison),
            comparison,
            rank: 0,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    for (index, property) in ranked.iter_mut().enumerate() {
        property.rank = index + 1;
    }
    ranked
}
