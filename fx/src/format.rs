//! Currency display formatting.

use cambio_common::{Catalog, Currency, RESULT_SCALE};
use rust_decimal::Decimal;

/// Format a value as currency text for display.
///
/// Known symbols are prefixed (`€0.92`, `$1,234.56`); catalog entries
/// without a symbol, and codes missing from the catalog entirely, fall back
/// to `{CODE} {value}`. Always exactly two fraction digits, with thousands
/// grouping.
pub fn format_currency(value: &Decimal, currency: &Currency, catalog: &Catalog) -> String {
    let rounded = value.round_dp(RESULT_SCALE);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let number = group_thousands(&format!("{:.2}", rounded.abs()));

    match catalog.get(currency).and_then(|info| info.symbol.as_deref()) {
        Some(symbol) if negative => format!("-{symbol}{number}"),
        Some(symbol) => format!("{symbol}{number}"),
        None if negative => format!("{currency} -{number}"),
        None => format!("{currency} {number}"),
    }
}

/// Insert a comma every three digits of the integer part.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    out
}
