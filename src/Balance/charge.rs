//! Net ionic charge written after `^`: `SO4^2-`, `Fe^3+`, `Na^+`, `e^-`.
use regex::Regex;
use std::sync::LazyLock;

static CHARGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<magnitude>\d*)(?P<sign>[+-])$").expect("charge pattern must compile")
});

// (charge, overflow): a magnitude that does not fit i64 saturates
fn scan_charge(formula: &str) -> (i64, bool) {
    let Some((_body, segment)) = formula.split_once('^') else {
        let bare = formula.trim();
        return (if bare == "e" || bare == "e-" { -1 } else { 0 }, false);
    };
    let Some(cap) = CHARGE.captures(segment.trim()) else {
        return (0, false);
    };
    let (magnitude, overflow) = match &cap["magnitude"] {
        "" => (1, false),
        digits => match digits.parse::<i64>() {
            Ok(magnitude) => (magnitude, false),
            Err(_) => (i64::MAX, true),
        },
    };
    if &cap["sign"] == "-" {
        (-magnitude, overflow)
    } else {
        (magnitude, overflow)
    }
}

/// Signed charge of a formula. A bare electron ("e" or "e-") without `^` is -1,
/// a formula without a charge segment (or with one that has no sign) is neutral.
/// A magnitude too large for `i64` saturates.
pub fn charge(formula: &str) -> i64 {
    scan_charge(formula).0
}

/// [`charge`], or `None` when the magnitude does not fit `i64`
pub fn charge_checked(formula: &str) -> Option<i64> {
    let (charge, overflow) = scan_charge(formula);
    (!overflow).then_some(charge)
}

/// charge with an explicit sign for positive values: +2, 0, -1
pub fn signed(charge: i64) -> String {
    if charge > 0 {
        format!("+{}", charge)
    } else {
        charge.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge() {
        assert_eq!(charge("SO4^2-"), -2);
        assert_eq!(charge("Fe^3+"), 3);
        assert_eq!(charge("Na^+"), 1);
        assert_eq!(charge("e^-"), -1);
        assert_eq!(charge("H2O"), 0);
        assert_eq!(charge("PO4^3-"), -3);
        assert_eq!(charge("Cr2O7^2-"), -2);
    }

    #[test]
    fn test_bare_electron() {
        assert_eq!(charge("e"), -1);
        assert_eq!(charge("e-"), -1);
        assert_eq!(charge("Ne"), 0);
    }

    #[test]
    fn test_segment_without_sign_is_neutral() {
        assert_eq!(charge("Fe^3"), 0);
        assert_eq!(charge("Fe^"), 0);
        assert_eq!(charge("Fe^+3"), 0);
        assert_eq!(charge("Fe^x+"), 0);
    }

    #[test]
    fn test_huge_magnitude_saturates() {
        assert_eq!(charge("X^99999999999999999999-"), -i64::MAX);
        assert_eq!(charge("X^99999999999999999999+"), i64::MAX);
        assert_eq!(charge_checked("X^99999999999999999999+"), None);
        assert_eq!(charge_checked("SO4^2-"), Some(-2));
        assert_eq!(charge_checked("e"), Some(-1));
    }

    #[test]
    fn test_signed() {
        assert_eq!(signed(2), "+2");
        assert_eq!(signed(0), "0");
        assert_eq!(signed(-1), "-1");
    }
}
