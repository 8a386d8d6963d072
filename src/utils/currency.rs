//! Currency formatting for console reports
//!
//! JSON output always carries the plain 2-dp decimal string; the helpers
//! here only add thousand separators for human-readable tables.

use crate::types::MonetaryAmount;

/// Format an amount with thousand separators and two decimals
///
/// # Examples
/// ```
/// use storefront_analytics::types::MonetaryAmount;
/// use storefront_analytics::utils::currency::format_amount;
///
/// assert_eq!(format_amount(&MonetaryAmount::parse("1234567.5").unwrap()), "1,234,567.50");
/// assert_eq!(format_amount(&MonetaryAmount::ZERO), "0.00");
/// ```
pub fn format_amount(amount: &MonetaryAmount) -> String {
    let plain = amount.to_string();
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!("{}.{}", group_thousands(whole), fraction)
}

/// Insert `,` every three digits from the right
pub fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut result = String::with_capacity(chars.len() + chars.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}
