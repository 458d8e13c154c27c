use crate::disclosure::normalize::DisclosureLine;
use regex::Regex;

/// Builds the `domain , seller_id` pattern for one disclosure entry.
///
/// Both values arrive from untrusted chain input and are escaped, so they only
/// ever match literally. The domain is lowercased to line up with normalized
/// lines; the seller id is used exactly as given.
fn disclosure_pattern(domain: &str, seller_id: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"{}\s*,\s*{}",
        regex::escape(&domain.to_lowercase()),
        regex::escape(seller_id)
    ))
}

/// True when any normalized line discloses `seller_id` under `domain`.
/// Trailing fields (relationship, certification id) are ignored.
pub fn matches(domain: &str, seller_id: &str, lines: &[DisclosureLine]) -> bool {
    let pattern = match disclosure_pattern(domain, seller_id) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(%domain, %seller_id, error = %e, "disclosure pattern rejected");
            return false;
        }
    };
    lines.iter().any(|line| pattern.is_match(line))
}
