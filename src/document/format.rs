//! Display formatting for money and quantities

/// Format an amount as US dollars, e.g. `$1,234.56`. Non-finite amounts print as `$0.00`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, dollars, cents % 100)
}

/// Quantity with its unit; fractional quantities are rounded for display
pub fn format_quantity(quantity: f64, unit: &str) -> String {
    let quantity = if quantity.is_finite() { quantity } else { 0.0 };
    let shown = format!("{:.0}", quantity.round());
    if unit.is_empty() {
        shown
    } else {
        format!("{} {}", shown, unit)
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
