// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Core Primitives
//!
//! The half-open resource interval `[min, max)` and its relations.
//!
//! Two different relations are defined on intervals and they must not be
//! confused:
//!
//! - *inclusion* ([`Interval::includes`]) is a partial order. Two intervals
//!   that overlap without either containing the other are incomparable, and
//!   incomparability is not transitive, so inclusion cannot drive a sorted
//!   container.
//! - *precedence* ([`Interval::precedence_cmp`]) is a total order that extends
//!   inclusion: lower bounds ascending, and on a tie the wider interval first.
//!   A proper superset therefore always precedes its subsets.

use crate::err::InvalidRangeError;
use num_traits::CheckedSub;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Range, Sub};

/// A non-empty half-open interval `[min, max)` of resource units.
///
/// The lower bound is included, the upper bound is not. Construction rejects
/// `min >= max`, so every value of this type covers at least one unit.
///
/// `Interval` intentionally does not implement [`Ord`]. Its precedence order
/// is available as [`Interval::precedence_cmp`] and, for ordered containers,
/// through [`crate::order::ByPrecedence`].
///
/// # Examples
///
/// ```
/// use resunits_core::primitives::Interval;
///
/// let interval = Interval::new(1, 5).unwrap();
/// assert_eq!(interval.min(), 1);
/// assert_eq!(interval.max(), 5);
/// assert_eq!(interval.size(), 4);
/// assert!(interval.contains_point(4));
/// assert!(!interval.contains_point(5));
///
/// assert!(Interval::new(5, 5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    min_inclusive: T,
    max_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates the interval `[min, max)`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRangeError`] if `min >= max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_core::primitives::Interval;
    ///
    /// let interval = Interval::new(3, 5).unwrap();
    /// assert_eq!(interval.min(), 3);
    ///
    /// let err = Interval::new(5, 3).unwrap_err();
    /// assert_eq!(err.min(), 5);
    /// ```
    #[inline]
    pub fn new(min: T, max: T) -> Result<Self, InvalidRangeError<T>>
    where
        T: Ord + Copy,
    {
        if min < max {
            Ok(Self {
                min_inclusive: min,
                max_exclusive: max,
            })
        } else {
            Err(InvalidRangeError::new(min, max))
        }
    }

    /// Creates the interval `[min, max)` without checking the bounds.
    ///
    /// The caller guarantees `min < max`. This is checked in debug builds
    /// only. It exists for algorithms that derive bounds from intervals that
    /// are already valid, such as the leftovers of a split.
    #[inline]
    pub fn new_unchecked(min: T, max: T) -> Self
    where
        T: Ord + Copy + fmt::Debug,
    {
        debug_assert!(min < max, "Interval::new_unchecked: {:?} >= {:?}", min, max);
        Self {
            min_inclusive: min,
            max_exclusive: max,
        }
    }

    /// Returns the lower bound, which is inclusive.
    #[inline]
    pub fn min(&self) -> T
    where
        T: Copy,
    {
        self.min_inclusive
    }

    /// Returns the upper bound, which is exclusive.
    #[inline]
    pub fn max(&self) -> T
    where
        T: Copy,
    {
        self.max_exclusive
    }

    /// Returns the number of units covered, `max - min`.
    ///
    /// This is always positive. On a signed domain a run can be wider than
    /// `T::max_value()`, in which case the subtraction overflows; use
    /// [`Interval::checked_size`] when that can happen.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_core::primitives::Interval;
    ///
    /// assert_eq!(Interval::new(2u32, 5).unwrap().size(), 3);
    /// ```
    #[inline]
    pub fn size(&self) -> T
    where
        T: Copy + Sub<Output = T>,
    {
        self.max_exclusive - self.min_inclusive
    }

    /// Like [`Interval::size`], but returns `None` if the width does not fit in `T`.
    #[inline]
    pub fn checked_size(&self) -> Option<T>
    where
        T: CheckedSub,
    {
        self.max_exclusive.checked_sub(&self.min_inclusive)
    }

    /// Checks whether the unit `x` lies in `[min, max)`.
    #[inline]
    pub fn contains_point(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.min_inclusive && x < self.max_exclusive
    }

    /// Checks whether `self` contains every unit of `other`.
    ///
    /// The relation is non-strict: an interval includes itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5).unwrap();
    /// let b = Interval::new(2, 4).unwrap();
    /// let c = Interval::new(0, 6).unwrap();
    /// assert!(a.includes(&b));
    /// assert!(a.includes(&a));
    /// assert!(!a.includes(&c));
    /// ```
    #[inline]
    pub fn includes(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.min_inclusive <= other.min_inclusive && other.max_exclusive <= self.max_exclusive
    }

    /// Checks whether `self` includes `other` and the two differ.
    #[inline]
    pub fn properly_includes(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.includes(other) && self != other
    }

    /// Checks whether the two intervals share at least one unit.
    ///
    /// Intervals that only touch, like `[1, 3)` and `[3, 5)`, do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.min_inclusive < other.max_exclusive && other.min_inclusive < self.max_exclusive
    }

    /// Checks whether one interval ends exactly where the other begins.
    #[inline]
    pub fn touches(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        self.max_exclusive == other.min_inclusive || other.max_exclusive == self.min_inclusive
    }

    /// Returns the units shared by both intervals, or `None` if they do not
    /// overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_core::primitives::Interval;
    ///
    /// let a = Interval::new(0, 10).unwrap();
    /// let b = Interval::new(5, 15).unwrap();
    /// let c = Interval::new(10, 15).unwrap();
    /// assert_eq!(a.intersection(&b), Some(Interval::new(5, 10).unwrap()));
    /// assert_eq!(a.intersection(&c), None);
    /// ```
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self>
    where
        T: Ord + Copy,
    {
        let min = self.min_inclusive.max(other.min_inclusive);
        let max = self.max_exclusive.min(other.max_exclusive);
        (min < max).then_some(Self {
            min_inclusive: min,
            max_exclusive: max,
        })
    }

    /// Compares two intervals under the precedence order.
    ///
    /// Lower bounds are compared ascending; on equal lower bounds the upper
    /// bounds are compared *descending*, so the wider interval comes first.
    /// `Ordering::Less` means `self` precedes `other`. Two intervals are
    /// `Equal` only if they are identical.
    ///
    /// The order is a linear extension of inclusion: if `self` properly
    /// includes `other`, then `self` precedes `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_core::primitives::Interval;
    /// use std::cmp::Ordering;
    ///
    /// let wide = Interval::new(0, 3).unwrap();
    /// let narrow = Interval::new(0, 1).unwrap();
    /// let later = Interval::new(1, 10).unwrap();
    /// assert_eq!(wide.precedence_cmp(&narrow), Ordering::Less);
    /// assert_eq!(narrow.precedence_cmp(&later), Ordering::Less);
    /// assert_eq!(wide.precedence_cmp(&wide), Ordering::Equal);
    /// ```
    #[inline]
    pub fn precedence_cmp(&self, other: &Self) -> Ordering
    where
        T: Ord,
    {
        self.min_inclusive
            .cmp(&other.min_inclusive)
            .then_with(|| other.max_exclusive.cmp(&self.max_exclusive))
    }

    /// Checks whether `self` strictly precedes `other` under
    /// [`Interval::precedence_cmp`].
    #[inline]
    pub fn precedes(&self, other: &Self) -> bool
    where
        T: Ord,
    {
        self.precedence_cmp(other) == Ordering::Less
    }

    /// Converts the interval to the equivalent `min..max` range.
    #[inline]
    pub fn to_range(&self) -> Range<T>
    where
        T: Copy,
    {
        self.min_inclusive..self.max_exclusive
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    /// Formats the interval as `{min, max}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_core::primitives::Interval;
    ///
    /// let interval = Interval::new(1, 5).unwrap();
    /// assert_eq!(interval.to_string(), "{1, 5}");
    /// ```
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.min_inclusive, self.max_exclusive)
    }
}

impl<T: Ord + Copy> TryFrom<Range<T>> for Interval<T> {
    type Error = InvalidRangeError<T>;

    #[inline]
    fn try_from(r: Range<T>) -> Result<Self, Self::Error> {
        Interval::new(r.start, r.end)
    }
}

impl<T: Ord + Copy> TryFrom<(T, T)> for Interval<T> {
    type Error = InvalidRangeError<T>;

    #[inline]
    fn try_from((min, max): (T, T)) -> Result<Self, Self::Error> {
        Interval::new(min, max)
    }
}

impl<T> From<Interval<T>> for Range<T> {
    #[inline]
    fn from(interval: Interval<T>) -> Self {
        interval.min_inclusive..interval.max_exclusive
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Interval;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
    use std::fmt::Display;

    impl<T: Serialize> Serialize for Interval<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            (&self.min_inclusive, &self.max_exclusive).serialize(serializer)
        }
    }

    impl<'de, T> Deserialize<'de> for Interval<T>
    where
        T: Deserialize<'de> + Ord + Copy + Display,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let (min, max) = <(T, T)>::deserialize(deserializer)?;
            Interval::new(min, max).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[inline]
    fn iv(a: i32, b: i32) -> Interval<i32> {
        Interval::new(a, b).unwrap()
    }

    fn is_comparable(a: &Interval<i32>, b: &Interval<i32>) -> bool {
        a.includes(b) || b.includes(a)
    }

    /// Intervals `j` with `i` preceding `j`, one for each shape of the
    /// relation table (shifted right, shared upper bound, nested, shared lower
    /// bound).
    fn successors(i: Interval<i32>) -> Vec<Interval<i32>> {
        vec![
            iv(i.min() + 1, i.max() + 1),
            iv(i.min() + 1, i.max()),
            iv(i.min() + 1, i.max() - 1),
            iv(i.min(), i.max() - 1),
        ]
    }

    #[test]
    fn test_new_rejects_empty_and_inverted() {
        assert_eq!(Interval::new(3, 3), Err(InvalidRangeError::new(3, 3)));
        assert_eq!(Interval::new(5u8, 3u8), Err(InvalidRangeError::new(5, 3)));
        assert!(Interval::new(-4i64, 9i64).is_ok());
    }

    #[test]
    fn test_size_is_width() {
        assert_eq!(iv(10, 20).size(), 10);
        assert_eq!(iv(-3, -2).size(), 1);
    }

    #[test]
    fn test_checked_size_reports_overflow() {
        assert_eq!(iv(10, 20).checked_size(), Some(10));
        assert_eq!(Interval::new(-27i8, 100i8).unwrap().checked_size(), Some(127));
        assert_eq!(Interval::new(-100i8, 100i8).unwrap().checked_size(), None);
        assert_eq!(Interval::new(0u8, 255u8).unwrap().checked_size(), Some(255));
    }

    #[test]
    fn test_contains_point_half_open() {
        let i = iv(10, 20);
        assert!(i.contains_point(10));
        assert!(i.contains_point(19));
        assert!(!i.contains_point(20));
        assert!(!i.contains_point(9));
    }

    #[test]
    fn test_includes_is_non_strict() {
        let a = iv(1, 5);
        assert!(a.includes(&a));
        assert!(!a.properly_includes(&a));
        assert!(a.properly_includes(&iv(1, 4)));
        assert!(a.properly_includes(&iv(2, 5)));
        assert!(!iv(1, 4).includes(&a));
    }

    #[test]
    fn test_overlaps_and_touches() {
        let a = iv(1, 3);
        assert!(a.touches(&iv(3, 5)));
        assert!(iv(3, 5).touches(&a));
        assert!(!a.overlaps(&iv(3, 5)));
        assert!(a.overlaps(&iv(2, 5)));
        assert!(!a.touches(&iv(4, 5)));
    }

    #[test]
    fn test_relation_table() {
        let i = iv(10, 20);

        // Lower bound of j above i's: i precedes j in every column.
        let j = iv(11, 21);
        assert!(i.precedes(&j) && !is_comparable(&i, &j));
        let j = iv(11, 20);
        assert!(i.precedes(&j) && i.properly_includes(&j));
        let j = iv(11, 19);
        assert!(i.precedes(&j) && i.properly_includes(&j));

        // Equal lower bounds: the wider one comes first.
        let j = iv(10, 21);
        assert!(j.precedes(&i) && j.properly_includes(&i));
        let j = iv(10, 20);
        assert_eq!(i.precedence_cmp(&j), Ordering::Equal);
        assert!(is_comparable(&i, &j));
        let j = iv(10, 19);
        assert!(i.precedes(&j) && i.properly_includes(&j));

        // Lower bound of j below i's: j precedes i in every column.
        let j = iv(9, 21);
        assert!(j.precedes(&i) && j.properly_includes(&i));
        let j = iv(9, 20);
        assert!(j.precedes(&i) && j.properly_includes(&i));
        let j = iv(9, 19);
        assert!(j.precedes(&i) && !is_comparable(&i, &j));
    }

    #[test]
    fn test_precedence_is_transitive_over_relation_shapes() {
        let i = iv(10, 20);
        for j in successors(i) {
            for k in successors(j) {
                assert!(i.precedes(&j) && j.precedes(&k));
                assert!(i.precedes(&k), "{} should precede {}", i, k);
                assert_eq!(k.precedence_cmp(&i), Ordering::Greater);
            }
        }
    }

    #[test]
    fn test_precedence_total_and_extends_inclusion_randomised() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let random_interval = |rng: &mut ChaCha8Rng| {
            let a = rng.random_range(0..12);
            let b = rng.random_range(a + 1..=13);
            iv(a, b)
        };

        for _ in 0..2_000 {
            let i = random_interval(&mut rng);
            let j = random_interval(&mut rng);
            let k = random_interval(&mut rng);

            // Exactly one of: i precedes j, j precedes i, i == j.
            let outcomes = [i.precedes(&j), j.precedes(&i), i == j];
            assert_eq!(outcomes.iter().filter(|&&o| o).count(), 1);
            assert_eq!(i.precedence_cmp(&j), j.precedence_cmp(&i).reverse());

            if i.precedes(&j) && j.precedes(&k) {
                assert!(i.precedes(&k));
            }
            if i.properly_includes(&j) {
                assert!(i.precedes(&j), "{} includes {} but does not precede it", i, j);
            }
        }
    }

    #[test]
    fn test_intersection() {
        assert_eq!(iv(0, 10).intersection(&iv(5, 15)), Some(iv(5, 10)));
        assert_eq!(iv(0, 10).intersection(&iv(2, 3)), Some(iv(2, 3)));
        assert_eq!(iv(0, 10).intersection(&iv(10, 15)), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Interval::try_from(2..7), Ok(iv(2, 7)));
        assert!(Interval::try_from(7..7).is_err());
        assert_eq!(Interval::try_from((1, 2)), Ok(iv(1, 2)));
        let r: Range<i32> = iv(4, 9).into();
        assert_eq!(r, 4..9);
        assert_eq!(iv(4, 9).to_range(), 4..9);
    }

    #[test]
    fn test_display() {
        assert_eq!(iv(-1, 5).to_string(), "{-1, 5}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_bounds() {
        let json = serde_json::to_string(&iv(1, 4)).unwrap();
        assert_eq!(json, "[1,4]");
        let back: Interval<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, iv(1, 4));
        assert!(serde_json::from_str::<Interval<i32>>("[4,1]").is_err());
    }
}
