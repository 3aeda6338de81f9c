//! # Money Module
//!
//! Prices and cart totals as whole cents.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Two units of a $99.99 product, summed as floats:                       │
//! │                                                                         │
//! │    99.99 + 99.99 = 199.98000000000002  ❌                                │
//! │                                                                         │
//! │  Summed as cents:                                                       │
//! │    9999 + 9999 = 19998 cents = $199.98                                 │
//! │                                                                         │
//! │  The product API sends prices as decimal numbers. They are converted   │
//! │  ONCE, at the wire boundary, with `Money::from_decimal`. Everything    │
//! │  after that is integer arithmetic.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price = Money::from_cents(9999); // $99.99
//!
//! let doubled = price * 2u32;
//! assert_eq!(doubled.cents(), 19998);
//!
//! let total: Money = [price, price].into_iter().sum();
//! assert_eq!(total, doubled);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// An amount of money in cents.
///
/// Signed, so a negative price read from the wire can be represented and
/// then rejected by validation. Serializes as the raw cent count.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.price ──┬──► CartLineItem.line_total ──► Cart.total_price     │
/// │                  │                                                      │
/// │                  └──► ProductInfo shows "$99.99"                        │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_cents(4999); // $49.99
    /// assert_eq!(price.to_string(), "$49.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units (as sent by the product API)
    /// into cents, rounding half away from zero.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 cent
    /// range.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(99.99), Some(Money::from_cents(9999)));
    /// assert_eq!(Money::from_decimal(0.125), Some(Money::from_cents(13)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the amount in major units as a decimal number.
    ///
    /// Only meant for writing the wire format back out.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents below the whole unit, 0-99 regardless of sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(9999);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 19998);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats the amount with a caller-supplied currency symbol.
    ///
    /// `Display` always uses `$`; the page uses this with the configured
    /// symbol.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let price = Money::from_cents(4999);
        assert_eq!(price.dollars(), 49);
        assert_eq!(price.cents_part(), 99);

        let refund = Money::from_cents(-205);
        assert_eq!(refund.dollars(), -2);
        assert_eq!(refund.cents_part(), 5);
    }

    #[test]
    fn test_from_decimal_rounds_to_nearest_cent() {
        assert_eq!(Money::from_decimal(99.99).unwrap().cents(), 9999);
        assert_eq!(Money::from_decimal(9.999).unwrap().cents(), 1000);
        assert_eq!(Money::from_decimal(0.0).unwrap().cents(), 0);
        assert_eq!(Money::from_decimal(-1.5).unwrap().cents(), -150);
    }

    #[test]
    fn test_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
        assert!(Money::from_decimal(1e300).is_none());
    }

    #[test]
    fn test_from_decimal_rejects_first_cent_past_i64() {
        // 2^63 cents
        assert!(Money::from_decimal(9.223372036854776e16).is_none());
        assert!(Money::from_decimal(9.0e16).is_some());
        assert_eq!(
            Money::from_decimal(-9.223372036854776e16),
            Some(Money::from_cents(i64::MIN))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(9999).to_string(), "$99.99");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-205).to_string(), "-$2.05");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(19998).format_with("€"), "€199.98");
    }

    #[test]
    fn test_arithmetic() {
        let phone = Money::from_cents(9999);
        let case = Money::from_cents(1250);

        assert_eq!(phone + case, Money::from_cents(11249));
        assert_eq!(phone - case, Money::from_cents(8749));
        assert_eq!(case * 4u32, Money::from_cents(5000));

        let mut total = Money::zero();
        total += phone;
        total += phone;
        assert_eq!(total, Money::from_cents(19998));
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![Money::from_cents(9999), Money::from_cents(9999)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 19998);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(4).cents(), i64::MAX);
    }
}
