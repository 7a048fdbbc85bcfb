//! Points-to-currency conversion.
//!
//! All arithmetic is exact integer arithmetic over minor currency units.
//! Results are rounded to the nearest minor unit with ties going to the even
//! neighbour, which matches the rounding of the legacy payout sheets.

use super::LedgerDomainError;
use std::fmt;
use std::num::NonZeroU32;

const MINOR_UNITS_PER_MAJOR: u64 = 100;
const MAX_FRACTION_DIGITS: usize = 2;

/// Monetary value of a fixed number of reward points.
///
/// The reference deployment pays 0.50 USD for every 15 points, i.e.
/// `ConversionRate::new(50, 15)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversionRate {
    minor_units: u64,
    per_points: NonZeroU32,
}

impl ConversionRate {
    /// Minor units paid per [`Self::DEFAULT_PER_POINTS`] points by default.
    pub const DEFAULT_MINOR_UNITS: u64 = 50;
    /// Point bundle the default rate is quoted against.
    pub const DEFAULT_PER_POINTS: u32 = 15;

    /// Creates a rate paying `minor_units` for every `per_points` points.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::ZeroRatePoints`] when `per_points` is
    /// zero.
    pub fn new(minor_units: u64, per_points: u32) -> Result<Self, LedgerDomainError> {
        let bundle = NonZeroU32::new(per_points).ok_or(LedgerDomainError::ZeroRatePoints)?;
        Ok(Self {
            minor_units,
            per_points: bundle,
        })
    }

    /// Creates a rate from a decimal major-unit amount such as `"0.5"`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidAmount`] for malformed amounts and
    /// [`LedgerDomainError::ZeroRatePoints`] when `per_points` is zero.
    pub fn from_decimal(amount: &str, per_points: u32) -> Result<Self, LedgerDomainError> {
        Self::new(parse_minor_units(amount)?, per_points)
    }

    /// Returns the minor units paid per point bundle.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.minor_units
    }

    /// Returns the size of the point bundle.
    #[must_use]
    pub const fn per_points(self) -> u32 {
        self.per_points.get()
    }

    /// Converts `points` into minor currency units.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::CreditOverflow`] when the result does not
    /// fit in an `i64` balance.
    pub fn credit_for(self, points: u32) -> Result<i64, LedgerDomainError> {
        let numerator = u128::from(points) * u128::from(self.minor_units);
        let denominator = u128::from(self.per_points.get());
        let quotient = numerator.div_euclid(denominator);
        let doubled_remainder = numerator.rem_euclid(denominator) * 2;
        let round_up = doubled_remainder > denominator
            || (doubled_remainder == denominator && quotient.rem_euclid(2) == 1);
        let rounded = if round_up { quotient + 1 } else { quotient };
        i64::try_from(rounded).map_err(|_| LedgerDomainError::CreditOverflow { points })
    }
}

impl Default for ConversionRate {
    fn default() -> Self {
        Self {
            minor_units: Self::DEFAULT_MINOR_UNITS,
            per_points: NonZeroU32::MIN.saturating_add(Self::DEFAULT_PER_POINTS - 1),
        }
    }
}

impl fmt::Display for ConversionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02} per {} points",
            self.minor_units.div_euclid(MINOR_UNITS_PER_MAJOR),
            self.minor_units.rem_euclid(MINOR_UNITS_PER_MAJOR),
            self.per_points
        )
    }
}

/// Parses a non-negative decimal major-unit amount into minor units.
///
/// Accepts at most two fractional digits: `"0.5"` is 50 and `"12"` is 1200.
///
/// # Errors
///
/// Returns [`LedgerDomainError::InvalidAmount`] for signs, exponents, extra
/// fractional digits, empty input, or values that overflow `u64`.
pub fn parse_minor_units(value: &str) -> Result<u64, LedgerDomainError> {
    let invalid = || LedgerDomainError::InvalidAmount(value.to_owned());
    let trimmed = value.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let is_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());

    if (whole.is_empty() && fraction.is_empty())
        || !is_digits(whole)
        || !is_digits(fraction)
        || fraction.len() > MAX_FRACTION_DIGITS
    {
        return Err(invalid());
    }

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| invalid())?
    };
    let padded_fraction = format!("{fraction:0<width$}", width = MAX_FRACTION_DIGITS);
    let fraction_units = padded_fraction.parse::<u64>().map_err(|_| invalid())?;

    whole_units
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .and_then(|units| units.checked_add(fraction_units))
        .ok_or_else(invalid)
}
