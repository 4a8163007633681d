//! Shared display helpers

/// Format a rupee amount the way Indian listings quote it
pub fn format_rupees(amount: f64) -> String {
    if amount >= 10_000_000.0 {
        format!("₹{:.2} Cr", amount / 10_000_000.0)
    } else if amount >= 100_000.0 {
        format!("₹{:.2} Lac", amount / 100_000.0)
    } else {
        format!("₹{:.0}", amount)
    }
}

/// Truncate a string for one-line display
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
