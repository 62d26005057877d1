use rust_decimal::Decimal;

/// Returns true if the application is running in development mode.
/// Checks if BACKEND_URL contains "localhost".
pub fn is_dev_mode() -> bool {
    option_env!("BACKEND_URL")
        .map(|url| url.contains("localhost"))
        .unwrap_or(false)
}

/// Formats a price for display, e.g. `€49.00`.
pub fn format_price(amount: Decimal) -> String {
    format!("€{:.2}", amount.round_dp(2))
}

/// Renders a 1-5 rating as stars.
pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec!(49)), "€49.00");
        assert_eq!(format_price(dec!(12.345)), "€12.34");
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(stars(0), "☆☆☆☆☆");
    }
}
