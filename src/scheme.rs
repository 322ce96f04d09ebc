//! Card schemes and the static prefix table used to detect them.
//!
//! Each scheme carries its accepted number lengths and its CVV length.
//! Prefixes live in [`PREFIX_TABLE`], ordered from the
//! widest prefix to the narrowest so overlapping ranges resolve the same way
//! every time.

use std::fmt;

/// Payment card networks known to the form.
///
/// The set is closed at compile time; `Unknown` is what detection reports for
/// an empty or unmatched digit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CardScheme {
    /// Visa - Prefix 4, lengths 13, 16, 19
    Visa,
    /// Mastercard - Prefix 51-55, 2221-2720, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Discover - Prefix 6011, 644-649, 65, length 16-19
    Discover,
    /// Diners Club - Prefix 300-305, 36, 38, 39, length 14-19
    DinersClub,
    /// JCB - Prefix 3528-3589, length 16-19
    Jcb,
    /// UnionPay - Prefix 62, length 16-19
    UnionPay,
    /// Maestro - Prefix 5018, 5020, 5038, 5893, 6304, 6759, 6761-6763, length 12-19
    Maestro,
    /// Mir - Prefix 2200-2204, length 16-19
    Mir,
    /// No prefix matched.
    Unknown,
}

impl CardScheme {
    /// Every scheme that can be detected, in table order.
    pub const KNOWN: [CardScheme; 9] = [
        Self::Visa,
        Self::Mastercard,
        Self::Amex,
        Self::Discover,
        Self::DinersClub,
        Self::Jcb,
        Self::UnionPay,
        Self::Maestro,
        Self::Mir,
    ];

    /// Returns the valid number lengths for this scheme.
    ///
    /// `Unknown` has none, so an unmatched number never has a valid length.
    #[inline]
    pub const fn valid_lengths(&self) -> &'static [u8] {
        match self {
            Self::Visa => &[13, 16, 19],
            Self::Mastercard => &[16],
            Self::Amex => &[15],
            Self::Discover => &[16, 17, 18, 19],
            Self::DinersClub => &[14, 15, 16, 17, 18, 19],
            Self::Jcb => &[16, 17, 18, 19],
            Self::UnionPay => &[16, 17, 18, 19],
            Self::Maestro => &[12, 13, 14, 15, 16, 17, 18, 19],
            Self::Mir => &[16, 17, 18, 19],
            Self::Unknown => &[],
        }
    }

    /// Returns true if the given length is valid for this scheme.
    #[inline]
    pub const fn is_valid_length(&self, length: usize) -> bool {
        let valid = self.valid_lengths();
        let mut i = 0;
        while i < valid.len() {
            if valid[i] as usize == length {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Number of CVV digits printed on cards of this scheme.
    ///
    /// `Unknown` reports 3, the length used by every scheme except Amex.
    #[inline]
    pub const fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }

    /// Returns a human-readable name for the scheme.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::DinersClub => "Diners Club",
            Self::Jcb => "JCB",
            Self::UnionPay => "UnionPay",
            Self::Maestro => "Maestro",
            Self::Mir => "Mir",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true for every scheme except `Unknown`.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for CardScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An inclusive range of numeric prefixes of a fixed width.
///
/// `PrefixRange::new(2, 51, 55)` matches any number starting with 51..=55.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRange {
    width: u8,
    low: u32,
    high: u32,
}

impl PrefixRange {
    /// Creates a range of `width`-digit prefixes from `low` to `high`.
    pub const fn new(width: u8, low: u32, high: u32) -> Self {
        Self { width, low, high }
    }

    /// Creates a range holding a single prefix.
    pub const fn exact(width: u8, prefix: u32) -> Self {
        Self::new(width, prefix, prefix)
    }

    /// Number of leading digits this range inspects.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Returns true if the leading `width` digits fall inside the range.
    ///
    /// Sequences shorter than the width never match. Any non-digit inside the
    /// inspected prefix makes the match fail.
    pub fn matches(&self, digits: &[u8]) -> bool {
        let width = self.width();
        if digits.len() < width {
            return false;
        }
        let mut value: u32 = 0;
        for &d in &digits[..width] {
            if d > 9 {
                return false;
            }
            value = value * 10 + u32::from(d);
        }
        (self.low..=self.high).contains(&value)
    }

    /// Returns true if some digit sequence could match both ranges.
    pub(crate) fn overlaps(&self, other: &PrefixRange) -> bool {
        let (narrow, wide) = if self.width <= other.width {
            (self, other)
        } else {
            (other, self)
        };
        let shift = 10u32.pow(u32::from(wide.width - narrow.width));
        let wide_low = wide.low / shift;
        let wide_high = wide.high / shift;
        wide_low <= narrow.high && narrow.low <= wide_high
    }
}

/// Prefix table consulted by detection, widest prefixes first.
pub static PREFIX_TABLE: &[(PrefixRange, CardScheme)] = &[
    // 4-digit prefixes
    (PrefixRange::new(4, 2200, 2204), CardScheme::Mir),
    (PrefixRange::new(4, 2221, 2720), CardScheme::Mastercard),
    (PrefixRange::new(4, 3528, 3589), CardScheme::Jcb),
    (PrefixRange::exact(4, 5018), CardScheme::Maestro),
    (PrefixRange::exact(4, 5020), CardScheme::Maestro),
    (PrefixRange::exact(4, 5038), CardScheme::Maestro),
    (PrefixRange::exact(4, 5893), CardScheme::Maestro),
    (PrefixRange::exact(4, 6011), CardScheme::Discover),
    (PrefixRange::exact(4, 6304), CardScheme::Maestro),
    (PrefixRange::exact(4, 6759), CardScheme::Maestro),
    (PrefixRange::new(4, 6761, 6763), CardScheme::Maestro),
    // 3-digit prefixes
    (PrefixRange::new(3, 300, 305), CardScheme::DinersClub),
    (PrefixRange::new(3, 644, 649), CardScheme::Discover),
    // 2-digit prefixes
    (PrefixRange::exact(2, 34), CardScheme::Amex),
    (PrefixRange::exact(2, 36), CardScheme::DinersClub),
    (PrefixRange::exact(2, 37), CardScheme::Amex),
    (PrefixRange::new(2, 38, 39), CardScheme::DinersClub),
    (PrefixRange::new(2, 51, 55), CardScheme::Mastercard),
    (PrefixRange::exact(2, 62), CardScheme::UnionPay),
    (PrefixRange::exact(2, 65), CardScheme::Discover),
    // 1-digit prefixes
    (PrefixRange::exact(1, 4), CardScheme::Visa),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_valid_lengths() {
        assert!(CardScheme::Visa.is_valid_length(16));
        assert!(CardScheme::Visa.is_valid_length(13));
        assert!(CardScheme::Visa.is_valid_length(19));
        assert!(!CardScheme::Visa.is_valid_length(15));

        assert!(CardScheme::Amex.is_valid_length(15));
        assert!(!CardScheme::Amex.is_valid_length(16));

        assert!(CardScheme::Mastercard.is_valid_length(16));
        assert!(!CardScheme::Mastercard.is_valid_length(15));

        for len in 0..=20 {
            assert!(!CardScheme::Unknown.is_valid_length(len));
        }
    }

    #[test]
    fn test_scheme_names() {
        assert_eq!(CardScheme::Visa.name(), "Visa");
        assert_eq!(CardScheme::Amex.name(), "American Express");
        assert_eq!(CardScheme::Mastercard.to_string(), "Mastercard");
        assert_eq!(CardScheme::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_cvv_lengths() {
        assert_eq!(CardScheme::Amex.cvv_length(), 4);
        assert_eq!(CardScheme::Visa.cvv_length(), 3);
        assert_eq!(CardScheme::Unknown.cvv_length(), 3);
    }

    #[test]
    fn test_prefix_range_matching() {
        let mc = PrefixRange::new(2, 51, 55);
        assert!(mc.matches(&[5, 1]));
        assert!(mc.matches(&[5, 5, 0, 0]));
        assert!(!mc.matches(&[5]));
        assert!(!mc.matches(&[5, 6]));
        assert!(!mc.matches(&[5, 12]));
    }

    #[test]
    fn test_overlap_detection() {
        let visa = PrefixRange::exact(1, 4);
        assert!(visa.overlaps(&PrefixRange::exact(2, 42)));
        assert!(!visa.overlaps(&PrefixRange::exact(2, 51)));
        assert!(PrefixRange::new(2, 51, 55).overlaps(&PrefixRange::exact(4, 5300)));
        assert!(!PrefixRange::new(4, 2200, 2204).overlaps(&PrefixRange::new(4, 2221, 2720)));
    }

    #[test]
    fn test_table_ordered_widest_first() {
        for pair in PREFIX_TABLE.windows(2) {
            assert!(
                pair[0].0.width() >= pair[1].0.width(),
                "{:?} listed before a wider prefix {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_table_has_no_cross_scheme_overlap() {
        // A longer number must never switch from one scheme to another.
        for (i, (a, scheme_a)) in PREFIX_TABLE.iter().enumerate() {
            for (b, scheme_b) in &PREFIX_TABLE[i + 1..] {
                if scheme_a != scheme_b {
                    assert!(
                        !a.overlaps(b),
                        "{scheme_a} {a:?} overlaps {scheme_b} {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_known_scheme_has_a_prefix() {
        for scheme in CardScheme::KNOWN {
            assert!(
                PREFIX_TABLE.iter().any(|(_, s)| *s == scheme),
                "{scheme} has no prefix"
            );
        }
        assert!(!PREFIX_TABLE.iter().any(|(_, s)| *s == CardScheme::Unknown));
    }

    #[test]
    fn test_scheme_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardScheme>();
    }
}
