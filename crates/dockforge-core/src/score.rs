//! AllocationScore - fixed-point objective value
//!
//! Objective terms such as `ship.length / dock.length` are fractional. They
//! are stored as integer micro-units, so sums are exact and equal
//! assignments compare equal regardless of summation order.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Number of micro-units per objective unit.
pub const SCORE_SCALE: i64 = 1_000_000;

/// A single-level objective score in micro-units. Higher is better.
///
/// # Examples
///
/// ```
/// use dockforge_core::AllocationScore;
///
/// let a = AllocationScore::from_f64(2.5).unwrap();
/// let b = AllocationScore::from_f64(-0.25).unwrap();
///
/// assert_eq!((a + b).to_f64(), 2.25);
/// assert!(a > b);
/// assert!(AllocationScore::from_f64(f64::NAN).is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AllocationScore {
    micros: i64,
}

impl AllocationScore {
    /// The zero score (the empty assignment).
    pub const ZERO: AllocationScore = AllocationScore { micros: 0 };

    /// Creates a score from raw micro-units.
    #[inline]
    pub const fn of_micros(micros: i64) -> Self {
        AllocationScore { micros }
    }

    /// Converts a real value, rounding to the nearest micro-unit.
    ///
    /// Returns `None` for non-finite values and values outside the
    /// representable range.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * SCORE_SCALE as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which itself does not fit
        if scaled >= i64::MAX as f64 || scaled < i64::MIN as f64 {
            return None;
        }
        Some(AllocationScore::of_micros(scaled as i64))
    }

    /// Returns the raw micro-units.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.micros
    }

    /// Returns the score as a real value.
    pub fn to_f64(&self) -> f64 {
        self.micros as f64 / SCORE_SCALE as f64
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.micros > 0
    }

    /// Adds two scores, returning `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.micros.checked_add(other.micros).map(Self::of_micros)
    }

    /// Subtracts two scores, returning `None` on overflow.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.micros.checked_sub(other.micros).map(Self::of_micros)
    }
}

impl Ord for AllocationScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.micros.cmp(&other.micros)
    }
}

impl PartialOrd for AllocationScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for AllocationScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        AllocationScore::of_micros(self.micros + other.micros)
    }
}

impl Sub for AllocationScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        AllocationScore::of_micros(self.micros - other.micros)
    }
}

impl Neg for AllocationScore {
    type Output = Self;

    fn neg(self) -> Self {
        AllocationScore::of_micros(-self.micros)
    }
}

impl std::iter::Sum for AllocationScore {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(AllocationScore::ZERO, Add::add)
    }
}

impl fmt::Debug for AllocationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AllocationScore({})", self.to_f64())
    }
}

impl fmt::Display for AllocationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
