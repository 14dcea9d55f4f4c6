use ranker_state::Rating;

/// Shown in place of a missing cover image.
pub const COVER_PLACEHOLDER: &str = "🎵";

/// Render a rating as five stars, e.g. `★★★⯨☆` for 3.5.
pub fn stars(rating: Rating) -> String {
    let full = usize::from(rating.full_stars());
    let half = usize::from(rating.has_half_star());
    let empty = 5 - full - half;

    format!("{}{}{}", "★".repeat(full), "⯨".repeat(half), "☆".repeat(empty))
}

/// `value`, or `placeholder` if it is blank.
pub fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(Rating::new(3.5).unwrap()), "★★★⯨☆");
        assert_eq!(stars(Rating::MAX), "★★★★★");
        assert_eq!(stars(Rating::MIN), "⯨☆☆☆☆");
        assert_eq!(stars(Rating::new(2.0).unwrap()), "★★☆☆☆");
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder("1999", "?"), "1999");
        assert_eq!(or_placeholder("  ", "?"), "?");
    }
}
