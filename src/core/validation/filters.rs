//! Input normalizers
//!
//! Applied to mutation inputs before validation, so that "  Shoes " and
//! "Shoes" are the same name and a price is always stored with two decimals.

use regex::Regex;
use std::sync::OnceLock;

/// Trim surrounding whitespace
pub fn trim(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

/// Trim and lowercase
pub fn lowercase(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_lowercase())
}

/// Round to `decimals` places
///
/// Values too large to scale are returned unchanged.
pub fn round_decimals(value: Option<f64>, decimals: u32) -> Option<f64> {
    value.map(|num| {
        let factor = 10_f64.powi(decimals as i32);
        let scaled = num * factor;
        if scaled.is_finite() {
            scaled.round() / factor
        } else {
            num
        }
    })
}

/// Derive a URL slug from free text: ASCII alphanumerics are kept
/// (lowercased), every other run of characters becomes a single `-`.
pub fn slugify(text: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators = SEPARATORS.get_or_init(|| {
        Regex::new(r"[^a-z0-9]+").unwrap_or_else(|e| unreachable!("static regex: {e}"))
    });

    separators
        .replace_all(&text.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        assert_eq!(trim(Some("  hello  ".into())), Some("hello".into()));
        assert_eq!(trim(Some("   ".into())), Some(String::new()));
        assert_eq!(trim(None), None);
    }

    #[test]
    fn test_lowercase() {
        assert_eq!(lowercase(Some(" About-US ".into())), Some("about-us".into()));
    }

    #[test]
    fn test_round_decimals_two_places() {
        assert_eq!(round_decimals(Some(3.14159), 2), Some(3.14));
        assert_eq!(round_decimals(Some(2.555), 1), Some(2.6));
        assert_eq!(round_decimals(Some(-3.456), 1), Some(-3.5));
        assert_eq!(round_decimals(None, 2), None);
    }

    #[test]
    fn test_round_decimals_keeps_unscalable_values() {
        assert_eq!(round_decimals(Some(1e307), 2), Some(1e307));
        assert_eq!(round_decimals(Some(f64::MAX), 2), Some(f64::MAX));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Summer Shoes"), "summer-shoes");
        assert_eq!(slugify("  T-Shirts & Tops!  "), "t-shirts-tops");
        assert_eq!(slugify("Über"), "ber");
        assert_eq!(slugify("***"), "");
    }
}
