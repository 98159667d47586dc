use num_format::{Locale, ToFormattedString as _};

/// Cedi sign used on every rendered amount.
pub const CURRENCY_SYMBOL: &str = "₵";

/// Formats an amount as `₵1,234.56` (en grouping, two decimals).
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round();
    let sign = if cents < 0.0 { "-" } else { "" };
    let cents = cents.abs() as u64;
    let whole = (cents / 100).to_formatted_string(&Locale::en);
    format!("{sign}{CURRENCY_SYMBOL}{whole}.{:02}", cents % 100)
}

/// Plain two-decimal rendering used in dense tables.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_pads_cents() {
        assert_eq!(format_currency(0.0), "₵0.00");
        assert_eq!(format_currency(600.0), "₵600.00");
        assert_eq!(format_currency(1234.5), "₵1,234.50");
        assert_eq!(format_currency(1_000_000.006), "₵1,000,000.01");
        assert_eq!(format_currency(-12.346), "-₵12.35");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_currency(-0.001), "₵0.00");
    }

    #[test]
    fn plain_amounts_keep_two_decimals() {
        assert_eq!(format_amount(50.0), "50.00");
        assert_eq!(format_amount(7.4567), "7.46");
    }
}
