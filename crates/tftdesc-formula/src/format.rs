//! Number and stat formatting shared by formula evaluation and template
//! substitution.

use crate::types::Stat;

/// Round to two decimal places, ties to even (`0.125` -> `0.12`).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// `x * 100` truncated toward zero.
pub fn as_percent_int(x: f64) -> i64 {
    (x * 100.0).trunc() as i64
}

/// Shortest display form of a number: whole values print without a decimal
/// point, everything else with the shortest round-tripping representation.
pub fn format_number(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}

/// Append a stat: `N% AP` / `N% AD` for percent-scaled stats, `N HP` otherwise.
pub fn with_stat_suffix(value: &str, stat: Stat) -> String {
    if stat.is_percent_scaled() {
        format!("{}% {}", value, stat)
    } else {
        format!("{} {}", value, stat)
    }
}

/// Whether `s` is nothing but ASCII digits, optionally with decimal points.
pub fn is_bare_number(s: &str) -> bool {
    let mut digits = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => {}
            _ => return false,
        }
    }
    digits > 0
}

/// Format a number substituted straight into a template.
///
/// Values strictly between 0 and 1 are ratios and print as a truncated
/// percentage (`0.35` -> `35`). Whole values print without a decimal point;
/// the rest are rounded to two places.
pub fn format_template_number(x: f64) -> String {
    if x > 0.0 && x < 1.0 {
        as_percent_int(x).to_string()
    } else {
        format_scaled_number(x)
    }
}

/// Format a number that has already been scaled by a template multiplier:
/// whole values without a decimal point, the rest rounded to two places.
pub fn format_scaled_number(x: f64) -> String {
    if x.fract() == 0.0 {
        format_number(x)
    } else {
        format_number(round2(x))
    }
}
