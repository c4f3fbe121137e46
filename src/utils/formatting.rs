use rust_decimal::Decimal;

/// Symbol prefix for the currencies we know how to display, falling back to
/// the ISO code followed by a space.
pub fn currency_symbol(currency: &str) -> String {
    match currency {
        "" | "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" | "CNY" => "¥".to_string(),
        "INR" => "₹".to_string(),
        other => format!("{} ", other),
    }
}

/// Format a cost rounded to two decimals, e.g. `$1,234.50`. Missing costs
/// render as `-`.
pub fn format_cost(amount: Option<Decimal>, currency: &str) -> String {
    match amount {
        None => "-".to_string(),
        Some(a) => format_amount(a, currency, 2),
    }
}

/// Format a unit price, keeping up to four decimals since prices are often
/// fractions of a cent.
pub fn format_price(amount: Option<Decimal>, currency: &str) -> String {
    match amount {
        None => "-".to_string(),
        Some(a) => {
            let rounded = a.round_dp(4).normalize();
            let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
            format!("{}{}{}", sign, currency_symbol(currency), group_thousands(&rounded.abs().to_string()))
        }
    }
}

/// Format a signed cost change, e.g. `+$12.00` or `-$3.10`.
pub fn format_cost_change(diff: Decimal, currency: &str) -> String {
    let rounded = diff.round_dp(2);
    if rounded.is_zero() {
        return format_amount(Decimal::ZERO, currency, 2);
    }
    let sign = if rounded.is_sign_negative() { "" } else { "+" };
    format!("{}{}", sign, format_amount(rounded, currency, 2))
}

/// Format a quantity with at most four decimals and no trailing zeros.
pub fn format_quantity(quantity: Option<Decimal>) -> String {
    match quantity {
        None => "-".to_string(),
        Some(q) => {
            let rounded = q.round_dp(4).normalize();
            let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
            format!("{}{}", sign, group_thousands(&rounded.abs().to_string()))
        }
    }
}

/// Percentage change from `past` to `current`, or `None` when there is no
/// meaningful baseline.
pub fn format_percent_change(past: Option<Decimal>, current: Option<Decimal>) -> Option<String> {
    let past = past?;
    let current = current.unwrap_or(Decimal::ZERO);
    if past.is_zero() {
        return None;
    }
    let pct = ((current - past) / past * Decimal::ONE_HUNDRED).round_dp(0);
    let sign = if pct.is_sign_positive() && !pct.is_zero() { "+" } else { "" };
    Some(format!("{}{}%", sign, pct.normalize()))
}

fn format_amount(amount: Decimal, currency: &str, dp: u32) -> String {
    let rounded = amount.round_dp(dp);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let digits = format!("{:.*}", dp as usize, rounded.abs());
    format!("{}{}{}", sign, currency_symbol(currency), group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}
