//! Rupee formatting with Indian digit grouping (`₹12,34,567.89`).

/// Format an amount in rupees for display.
///
/// Rounds half away from zero to whole paise and always shows two decimals.
/// Digits are grouped as lakh/crore: the last three, then pairs. Amounts too
/// large to count in paise keep their full rupee digits with `.00`, since
/// `f64` carries no paise at that magnitude. Non-finite amounts render as
/// `0.00` without a currency sign.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }
    let paise = (amount.abs() * 100.0).round();
    let sign = if amount < 0.0 && paise > 0.0 { "-" } else { "" };
    if paise >= u64::MAX as f64 {
        let rupees = format!("{:.0}", amount.abs().trunc());
        return format!("{sign}₹{}.00", group_indian(&rupees));
    }
    let paise = paise as u64;
    format!(
        "{sign}₹{}.{:02}",
        group_indian(&(paise / 100).to_string()),
        paise % 100
    )
}

/// Format a plain number with two decimals and Indian grouping, no sign symbol.
pub fn format_amount(amount: f64) -> String {
    format_inr(amount).replacen('₹', "", 1)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Format a GST percentage for display: `18%`, `0.25%`.
pub fn format_rate(rate: f64) -> String {
    let rate = crate::numeric::coerce(rate);
    if rate.fract() == 0.0 {
        format!("{rate:.0}%")
    } else {
        let s = format!("{rate:.2}");
        format!("{}%", s.trim_end_matches('0').trim_end_matches('.'))
    }
}
