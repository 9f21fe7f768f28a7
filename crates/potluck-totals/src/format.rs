//! Unit-Aware Formatter
//!
//! Renders base-unit quantities the way the lists show them: grams switch
//! to kilograms from 1000 up, liters always carry one decimal digit.
//! Grams and kilograms are grouped the `en-US` way (`1,234`); liters are
//! plain fixed-point (`1500.0`).

use crate::item::ItemKind;

/// Grams at which dish quantities switch to kilograms
pub const KILOGRAM_THRESHOLD: f64 = 1000.0;

/// Render a quantity with its unit suffix
pub fn format_quantity(value: f64, kind: ItemKind) -> String {
    if !value.is_finite() {
        return format!("{}{}", value, kind.base_unit());
    }
    match kind {
        ItemKind::Dish if value >= KILOGRAM_THRESHOLD => {
            format!("{}kg", one_decimal(value / 1000.0))
        }
        ItemKind::Dish => format!("{}g", grouped(value)),
        ItemKind::Drink => format!("{}L", fixed_one_decimal(value)),
    }
}

/// Fixed-point with one fraction digit, rounding the exact binary value.
///
/// Only multiples of a quarter with an odd numerator sit exactly between
/// two tenths; those round up. Everything else is rounded correctly by
/// the exact decimal expansion `{:.1}` works from, so `1.15` (stored as
/// `1.1499..`) renders `1.1`.
fn fixed_one_decimal(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let quarters = magnitude * 4.0;

    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (quarters as u64 * 5 + 1) / 2;
        format!("{}{}.{}", sign, tenths / 10, tenths % 10)
    } else {
        format!("{}{:.1}", sign, magnitude)
    }
}

/// Exactly one fraction digit, rounded half away from zero
fn one_decimal(value: f64) -> String {
    let tenths = (value.abs() * 10.0).round() as u64;
    let sign = if value < 0.0 && tenths > 0 { "-" } else { "" };
    format!("{}{}.{}", sign, group_digits(tenths / 10), tenths % 10)
}

/// Up to three fraction digits, trailing zeros dropped
fn grouped(value: f64) -> String {
    let thousandths = (value.abs() * 1000.0).round() as u64;
    let sign = if value < 0.0 && thousandths > 0 { "-" } else { "" };
    let whole = group_digits(thousandths / 1000);
    let fraction = thousandths % 1000;

    if fraction == 0 {
        format!("{}{}", sign, whole)
    } else {
        let digits = format!("{:03}", fraction);
        format!("{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

fn group_digits(n: u64) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gram_kilogram_boundary() {
        assert_eq!(format_quantity(999.0, ItemKind::Dish), "999g");
        assert_eq!(format_quantity(1000.0, ItemKind::Dish), "1.0kg");
        assert_eq!(format_quantity(1050.0, ItemKind::Dish), "1.1kg");
        assert_eq!(format_quantity(1500.0, ItemKind::Dish), "1.5kg");
        assert_eq!(format_quantity(950.0, ItemKind::Dish), "950g");
    }

    #[test]
    fn test_large_kilograms_are_grouped() {
        assert_eq!(format_quantity(1_234_560.0, ItemKind::Dish), "1,234.6kg");
    }

    #[test]
    fn test_fractional_grams() {
        assert_eq!(format_quantity(12.5, ItemKind::Dish), "12.5g");
        assert_eq!(format_quantity(0.0, ItemKind::Dish), "0g");
        assert_eq!(format_quantity(0.1234, ItemKind::Dish), "0.123g");
    }

    #[test]
    fn test_negative_grams_keep_grouping() {
        assert_eq!(format_quantity(-5000.0, ItemKind::Dish), "-5,000g");
    }

    #[test]
    fn test_liters_always_one_decimal() {
        assert_eq!(format_quantity(2.0, ItemKind::Drink), "2.0L");
        assert_eq!(format_quantity(0.5, ItemKind::Drink), "0.5L");
        assert_eq!(format_quantity(0.75, ItemKind::Drink), "0.8L");
        assert_eq!(format_quantity(1500.0, ItemKind::Drink), "1500.0L");
    }

    #[test]
    fn test_liters_round_stored_value() {
        assert_eq!(format_quantity(0.35, ItemKind::Drink), "0.3L");
        assert_eq!(format_quantity(1.15, ItemKind::Drink), "1.1L");
        assert_eq!(format_quantity(1.45, ItemKind::Drink), "1.4L");
        assert_eq!(format_quantity(0.25, ItemKind::Drink), "0.3L");
        assert_eq!(format_quantity(2.5, ItemKind::Drink), "2.5L");
        assert_eq!(format_quantity(-0.25, ItemKind::Drink), "-0.3L");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(1234567), "1,234,567");
    }
}
