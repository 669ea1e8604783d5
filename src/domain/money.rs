/// Amounts are plain reals. Display is the only place precision is fixed:
/// two decimals for currency, one for percentages.
pub type Amount = f64;

/// Coerce user input into an amount.
/// Unparseable, non-finite and negative input all become 0.
/// Example: "12.5" -> 12.5, "abc" -> 0.0, "-3" -> 0.0
pub fn coerce_amount(input: &str) -> Amount {
    match input.trim().parse::<Amount>() {
        Ok(value) => sanitize_amount(value),
        Err(_) => 0.0,
    }
}

/// Replace non-finite or negative values with 0.
pub fn sanitize_amount(value: Amount) -> Amount {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Format an amount with two decimals.
/// Example: 50.0 -> "50.00", -12.346 -> "-12.35"
pub fn format_amount(amount: Amount) -> String {
    // Avoid printing "-0.00" for a negative zero.
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{:.2}", amount)
}

/// Format an amount with a currency symbol in front of the absolute value.
/// Example: ("$", -4.5) -> "-$4.50"
pub fn format_currency(symbol: &str, amount: Amount) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, format_amount(amount.abs()))
}

/// Percentage of `part` in `total`, 0 when the quotient is not finite.
pub fn percentage(part: Amount, total: Amount) -> f64 {
    let pct = part / total * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

/// Format a percentage with one decimal.
/// Example: (60.0, 100.0) -> "60.0", (5.0, 0.0) -> "0.0"
pub fn format_percentage(part: Amount, total: Amount) -> String {
    let pct = percentage(part, total);
    let pct = if pct == 0.0 { 0.0 } else { pct };
    format!("{:.1}", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount("50"), 50.0);
        assert_eq!(coerce_amount(" 12.5 "), 12.5);
        assert_eq!(coerce_amount(".5"), 0.5);
        assert_eq!(coerce_amount("0"), 0.0);
    }

    #[test]
    fn test_coerce_amount_invalid_input() {
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount("12abc"), 0.0);
        assert_eq!(coerce_amount("-3"), 0.0);
        assert_eq!(coerce_amount("NaN"), 0.0);
        assert_eq!(coerce_amount("inf"), 0.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(50.0), "50.00");
        assert_eq!(format_amount(12.346), "12.35");
        assert_eq!(format_amount(0.1 + 0.2), "0.30");
        assert_eq!(format_amount(-50.0), "-50.00");
        assert_eq!(format_amount(-0.0), "0.00");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("$", 10.0), "$10.00");
        assert_eq!(format_currency("$", -4.5), "-$4.50");
        assert_eq!(format_currency("€", 0.0), "€0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(60.0, 100.0), "60.0");
        assert_eq!(format_percentage(1.0, 3.0), "33.3");
        assert_eq!(format_percentage(0.0, 0.0), "0.0");
        assert_eq!(format_percentage(5.0, 0.0), "0.0");
    }
}
