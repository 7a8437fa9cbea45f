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

//! IntervalSet: a sorted, disjoint, non-adjacent sequence of `Interval<T>`.
//!
//! Invariants (held before and after every public mutation):
//!    - intervals are sorted ascending by `min()`, which for disjoint
//!      intervals coincides with the precedence order
//!    - no two intervals overlap
//!    - no two neighbours touch; touching runs are merged on insertion
//!
//! Mutation is deliberately narrow. `insert` only accepts units that are not
//! yet covered and `remove` only accepts units that a single stored interval
//! covers. Anything else is a contract violation reported as an error, with
//! the set left unchanged.
//!
//! Complexity:
//!    - insert, remove, includes, contains_point: `O(log n)` search plus an
//!      `O(n)` worst-case shift of the underlying vector
//!    - includes_set, intersection: `O(n + m)`

use crate::err::{IntervalSetError, WindowQueryError};
use crate::window::{CandidateWindows, WindowQuery};
use resunits_core::{UnitDomain, order::Precedence, primitives::Interval};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::ops::Deref;
use tracing::{debug, instrument, trace};

/// A collection of sorted, disjoint, non-adjacent half-open intervals.
///
/// Each stored interval is one maximal run of contiguous units, so the
/// element count is as small as possible for the covered units.
///
/// # Examples
///
/// ```
/// use resunits_set::{Interval, IntervalSet};
///
/// let iv = |a, b| Interval::new(a, b).unwrap();
///
/// let mut free = IntervalSet::new();
/// free.insert(iv(10, 11)).unwrap();
/// free.insert(iv(9, 10)).unwrap();
/// free.insert(iv(11, 12)).unwrap();
/// assert_eq!(free.as_slice(), &[iv(9, 12)]);
///
/// free.remove(iv(10, 11)).unwrap();
/// assert_eq!(free.as_slice(), &[iv(9, 10), iv(11, 12)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntervalSet<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> Default for IntervalSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntervalSet<T> {
    /// Creates a new, empty `IntervalSet`.
    ///
    /// The underlying vector does not allocate until the first insertion.
    #[inline]
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Creates a new, empty `IntervalSet` able to hold at least `capacity`
    /// runs without reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            intervals: Vec::with_capacity(capacity),
        }
    }

    /// Builds a set by inserting each interval in turn.
    ///
    /// Touching intervals are merged. Overlapping ones are a contract
    /// violation and fail the whole construction.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalSetError::OverlapViolation`] for the first interval
    /// that overlaps units inserted before it.
    pub fn from_intervals<I>(intervals: I) -> Result<Self, IntervalSetError<T>>
    where
        I: IntoIterator<Item = Interval<T>>,
        T: Ord + Copy + Debug + Display,
    {
        let mut set = Self::new();
        for interval in intervals {
            set.insert(interval)?;
        }
        Ok(set)
    }

    /// Returns the number of stored runs.
    ///
    /// This is not the number of covered units; see [`IntervalSet::size`].
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if no unit is covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns the stored runs in ascending order.
    #[inline]
    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.intervals
    }

    /// Iterates over the stored runs in ascending order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<T>> {
        self.intervals.iter()
    }

    /// Consumes the set and returns its runs in ascending order.
    #[inline]
    pub fn into_intervals(self) -> Vec<Interval<T>> {
        self.intervals
    }

    /// Returns the total number of covered units.
    ///
    /// The total is accumulated in `T` and overflows once it exceeds
    /// `T::max_value()`, which a signed domain reaches well before it runs
    /// out of units. [`IntervalSet::checked_size`] reports that case instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_set::{Interval, IntervalSet};
    ///
    /// let set = IntervalSet::from_intervals([
    ///     Interval::new(100, 101).unwrap(),
    ///     Interval::new(200, 202).unwrap(),
    ///     Interval::new(300, 303).unwrap(),
    /// ])
    /// .unwrap();
    /// assert_eq!(set.len(), 3);
    /// assert_eq!(set.size(), 6);
    /// ```
    #[inline]
    pub fn size(&self) -> T
    where
        T: UnitDomain,
    {
        self.intervals
            .iter()
            .fold(T::zero(), |covered, interval| covered + interval.size())
    }

    /// Like [`IntervalSet::size`], but returns `None` if the total does not fit in `T`.
    #[inline]
    pub fn checked_size(&self) -> Option<T>
    where
        T: UnitDomain,
    {
        self.intervals.iter().try_fold(T::zero(), |covered, interval| {
            covered.checked_add(&interval.checked_size()?)
        })
    }

    /// Finds the index of the first stored interval that `interval` precedes.
    ///
    /// Everything before the returned index precedes or equals `interval`.
    /// Because stored intervals are disjoint, the element just before the
    /// index is the only one that can include `interval`.
    #[inline]
    fn upper_bound(&self, interval: &Interval<T>) -> usize
    where
        T: Ord,
    {
        self.intervals
            .partition_point(|stored| stored.precedence_cmp(interval) != Ordering::Greater)
    }

    /// Finds the index of the first stored interval that ends after `point`.
    #[inline]
    fn find_first_ending_after(&self, point: T) -> usize
    where
        T: Ord + Copy,
    {
        self.intervals
            .partition_point(|stored| stored.max() <= point)
    }

    /// Returns the stored neighbour around `index` that shares units with
    /// `interval`, if any.
    ///
    /// Only the two neighbours of the insertion point need checking: anything
    /// further left ends before the left neighbour starts, and anything
    /// further right starts after the right neighbour ends.
    #[inline]
    fn overlapping_neighbour(&self, index: usize, interval: &Interval<T>) -> Option<Interval<T>>
    where
        T: Ord + Copy,
    {
        let left = index.checked_sub(1).map(|i| self.intervals[i]);
        let right = self.intervals.get(index).copied();
        left.into_iter()
            .chain(right)
            .find(|stored| stored.overlaps(interval))
    }

    /// Inserts units that are not covered yet, merging with touching runs.
    ///
    /// At most two runs are absorbed: the one ending at `interval.min()` and
    /// the one starting at `interval.max()`.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalSetError::OverlapViolation`] if any unit of
    /// `interval` is already covered. The set is not modified in that case.
    pub fn insert(&mut self, interval: Interval<T>) -> Result<(), IntervalSetError<T>>
    where
        T: Ord + Copy + Debug + Display,
    {
        let index = self.upper_bound(&interval);
        if let Some(existing) = self.overlapping_neighbour(index, &interval) {
            debug!(%interval, %existing, "Rejected insert of covered units");
            return Err(IntervalSetError::OverlapViolation { interval, existing });
        }

        // Runs in `merge_start..merge_end` are replaced by the merged interval.
        let mut merge_start = index;
        let mut merge_end = index;
        let mut min = interval.min();
        let mut max = interval.max();

        if merge_start > 0 && self.intervals[merge_start - 1].max() == min {
            merge_start -= 1;
            min = self.intervals[merge_start].min();
        }
        if merge_end < self.intervals.len() && self.intervals[merge_end].min() == max {
            max = self.intervals[merge_end].max();
            merge_end += 1;
        }

        let merged = Interval::new_unchecked(min, max);
        let absorbed = merge_end - merge_start;
        match absorbed {
            // Case 1: Nothing touches. Plain insertion.
            0 => self.intervals.insert(merge_start, merged),
            // Case 2: One neighbour touches. Widen it in place.
            1 => self.intervals[merge_start] = merged,
            // Case 3: The new units bridge two runs. Keep the left slot, drop the right.
            _ => {
                self.intervals[merge_start] = merged;
                self.intervals.remove(merge_start + 1);
            }
        }
        trace!(%interval, %merged, absorbed, "Inserted units");

        debug_assert!(Self::are_invariants_held(&self.intervals));
        Ok(())
    }

    /// Removes units covered by a single stored run, splitting it if needed.
    ///
    /// The run that contains `interval` is replaced by up to two leftovers,
    /// `[run.min, interval.min)` and `[interval.max, run.max)`, kept in
    /// ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalSetError::NotFound`] if no stored run includes
    /// `interval`. The set is not modified in that case.
    pub fn remove(&mut self, interval: Interval<T>) -> Result<(), IntervalSetError<T>>
    where
        T: Ord + Copy + Debug + Display,
    {
        let index = self.upper_bound(&interval);
        let container_index = match index.checked_sub(1) {
            Some(i) if self.intervals[i].includes(&interval) => i,
            _ => {
                debug!(%interval, "Rejected removal of uncovered units");
                return Err(IntervalSetError::NotFound { interval });
            }
        };

        let container = self.intervals[container_index];
        let left = (container.min() < interval.min())
            .then(|| Interval::new_unchecked(container.min(), interval.min()));
        let right = (interval.max() < container.max())
            .then(|| Interval::new_unchecked(interval.max(), container.max()));

        match (left, right) {
            (None, None) => {
                self.intervals.remove(container_index);
            }
            (Some(leftover), None) | (None, Some(leftover)) => {
                self.intervals[container_index] = leftover;
            }
            (Some(left), Some(right)) => {
                self.intervals[container_index] = left;
                self.intervals.insert(container_index + 1, right);
            }
        }
        trace!(
            %interval,
            %container,
            leftovers = usize::from(left.is_some()) + usize::from(right.is_some()),
            "Removed units"
        );

        debug_assert!(Self::are_invariants_held(&self.intervals));
        Ok(())
    }

    /// Returns `true` if a single stored run covers every unit of `interval`.
    ///
    /// Since runs are maximal, this is the same as every unit being covered.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_set::{Interval, IntervalSet};
    ///
    /// let iv = |a, b| Interval::new(a, b).unwrap();
    /// let set = IntervalSet::from_intervals([iv(10, 20), iv(30, 40)]).unwrap();
    /// assert!(set.includes(&iv(14, 16)));
    /// assert!(!set.includes(&iv(15, 25)));
    /// ```
    #[inline]
    pub fn includes(&self, interval: &Interval<T>) -> bool
    where
        T: Ord,
    {
        self.upper_bound(interval)
            .checked_sub(1)
            .is_some_and(|i| self.intervals[i].includes(interval))
    }

    /// Returns `true` if every unit covered by `other` is covered by `self`.
    ///
    /// Both sets are swept once in ascending order. The sweep stops early as
    /// soon as a run of `other` precedes the current run of `self` without
    /// being included by it, since no later run of `self` can include it.
    #[instrument(level = "trace", skip_all, fields(lhs = self.len(), rhs = other.len()))]
    pub fn includes_set(&self, other: &Self) -> bool
    where
        T: Ord,
    {
        let mut cursor = 0usize;
        'needed: for needed in &other.intervals {
            while let Some(candidate) = self.intervals.get(cursor) {
                if candidate.includes(needed) {
                    // The same run may include the next needed run as well.
                    continue 'needed;
                }
                if needed.precedes(candidate) {
                    return false;
                }
                cursor += 1;
            }
            return false;
        }
        true
    }

    /// Same answer as [`IntervalSet::includes_set`], found by a binary search
    /// per run of `other` over the not yet visited suffix of `self`.
    ///
    /// Faster when `other` has few runs and `self` has many.
    pub fn includes_set_by_search(&self, other: &Self) -> bool
    where
        T: Ord,
    {
        let mut start = 0usize;
        for needed in &other.intervals {
            let index = start
                + self.intervals[start..]
                    .partition_point(|stored| stored.precedence_cmp(needed) != Ordering::Greater);
            match index.checked_sub(1) {
                Some(container) if self.intervals[container].includes(needed) => {
                    start = container;
                }
                _ => return false,
            }
        }
        true
    }

    /// Returns `true` if the unit `point` is covered.
    #[inline]
    pub fn contains_point(&self, point: T) -> bool
    where
        T: Ord + Copy,
    {
        let candidate_index = self.find_first_ending_after(point);
        candidate_index < self.intervals.len() && self.intervals[candidate_index].min() <= point
    }

    /// Computes the units covered by both sets.
    ///
    /// Two cursors walk both sequences; the one whose current run ends first
    /// advances. Overlaps are emitted in ascending order and can neither
    /// overlap nor touch each other, because the inputs are maximal runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_set::{Interval, IntervalSet};
    ///
    /// let iv = |a, b| Interval::new(a, b).unwrap();
    /// let a = IntervalSet::from_intervals([iv(0, 10)]).unwrap();
    /// let b = IntervalSet::from_intervals([iv(5, 15)]).unwrap();
    /// assert_eq!(a.intersection(&b).as_slice(), &[iv(5, 10)]);
    /// ```
    #[instrument(level = "trace", skip_all, fields(lhs = self.len(), rhs = other.len()))]
    pub fn intersection(&self, other: &Self) -> Self
    where
        T: Ord + Copy,
    {
        let lhs = &self.intervals;
        let rhs = &other.intervals;
        let mut output = Self::with_capacity(lhs.len().min(rhs.len()));
        let (mut lhs_cursor, mut rhs_cursor) = (0usize, 0usize);

        while lhs_cursor < lhs.len() && rhs_cursor < rhs.len() {
            let lhs_interval = lhs[lhs_cursor];
            let rhs_interval = rhs[rhs_cursor];

            if let Some(overlap) = lhs_interval.intersection(&rhs_interval) {
                output.intervals.push(overlap);
            }

            if lhs_interval.max() < rhs_interval.max() {
                lhs_cursor += 1;
            } else {
                rhs_cursor += 1;
            }
        }

        debug_assert!(Self::are_invariants_held(&output.intervals));
        output
    }

    /// Computes the units of the set that fall inside `bounds`.
    #[inline]
    pub fn intersection_with_interval(&self, bounds: &Interval<T>) -> Self
    where
        T: Ord + Copy,
    {
        let mut output = Self::new();
        let mut index = self.find_first_ending_after(bounds.min());
        while index < self.intervals.len() && self.intervals[index].min() < bounds.max() {
            if let Some(overlap) = self.intervals[index].intersection(bounds) {
                output.intervals.push(overlap);
            }
            index += 1;
        }

        debug_assert!(Self::are_invariants_held(&output.intervals));
        output
    }

    /// Enumerates every window of exactly `width` units that fits inside a
    /// stored run, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`WindowQueryError::NonPositiveWidth`] if `width` is not
    /// positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_set::{Interval, IntervalSet};
    ///
    /// let iv = |a, b| Interval::new(a, b).unwrap();
    /// let set = IntervalSet::from_intervals([iv(10, 13)]).unwrap();
    /// let windows: Vec<_> = set.candidate_windows(2).unwrap().collect();
    /// assert_eq!(windows, vec![iv(10, 12), iv(11, 13)]);
    /// ```
    #[inline]
    pub fn candidate_windows(&self, width: T) -> Result<CandidateWindows<'_, T>, WindowQueryError<T>>
    where
        T: UnitDomain,
    {
        Ok(self.windows(WindowQuery::new(width)?))
    }

    /// Enumerates the windows described by `query`.
    ///
    /// The returned iterator borrows the set. It is cheap to clone, and
    /// calling this again starts a fresh enumeration.
    #[inline]
    pub fn windows(&self, query: WindowQuery<T>) -> CandidateWindows<'_, T>
    where
        T: UnitDomain,
    {
        CandidateWindows::new(&self.intervals, query)
    }

    /// Compares two sets lexicographically under the precedence order.
    ///
    /// Runs are compared pairwise in stored order and the first difference
    /// decides. If one set is a prefix of the other, the longer one has more
    /// to offer and comes first, so any non-empty set precedes the empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_set::{Interval, IntervalSet};
    /// use std::cmp::Ordering;
    ///
    /// let iv = |a, b| Interval::new(a, b).unwrap();
    /// let whole = IntervalSet::from_intervals([iv(0, 3)]).unwrap();
    /// let split = IntervalSet::from_intervals([iv(0, 1), iv(2, 3)]).unwrap();
    /// assert_eq!(whole.precedence_cmp(&split), Ordering::Less);
    /// assert_eq!(IntervalSet::new().precedence_cmp(&whole), Ordering::Greater);
    /// ```
    pub fn precedence_cmp(&self, other: &Self) -> Ordering
    where
        T: Ord,
    {
        for (lhs, rhs) in self.intervals.iter().zip(&other.intervals) {
            match lhs.precedence_cmp(rhs) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        other.intervals.len().cmp(&self.intervals.len())
    }

    /// A debug-only check that neighbours neither overlap nor touch.
    ///
    /// In release builds, this function is a no-op and compiles away.
    #[inline]
    #[cfg(debug_assertions)]
    fn are_invariants_held(intervals: &[Interval<T>]) -> bool
    where
        T: Ord + Copy,
    {
        intervals
            .windows(2)
            .all(|window| window[0].max() < window[1].min())
    }

    /// A release-build stub for `are_invariants_held`. Always returns `true`.
    #[inline]
    #[cfg(not(debug_assertions))]
    fn are_invariants_held(_intervals: &[Interval<T>]) -> bool {
        true
    }
}

impl<T: Ord> Precedence for IntervalSet<T> {
    #[inline]
    fn precedence_cmp(&self, other: &Self) -> Ordering {
        IntervalSet::precedence_cmp(self, other)
    }
}

impl<T> TryFrom<Vec<Interval<T>>> for IntervalSet<T>
where
    T: Ord + Copy + Debug + Display,
{
    type Error = IntervalSetError<T>;

    #[inline]
    fn try_from(intervals: Vec<Interval<T>>) -> Result<Self, Self::Error> {
        Self::from_intervals(intervals)
    }
}

impl<T: Display> Display for IntervalSet<T> {
    /// Formats the set as `{{a, b}, {c, d}}` in stored order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", interval)?;
        }
        write!(f, "}}")
    }
}

/// Read-only slice view of the stored runs.
impl<T> Deref for IntervalSet<T> {
    type Target = [Interval<T>];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.intervals
    }
}

impl<'a, T> IntoIterator for &'a IntervalSet<T> {
    type Item = &'a Interval<T>;
    type IntoIter = std::slice::Iter<'a, Interval<T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::IntervalSet;
    use resunits_core::primitives::Interval;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
    use std::fmt::{Debug, Display};

    impl<T: Serialize> Serialize for IntervalSet<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.intervals.serialize(serializer)
        }
    }

    impl<'de, T> Deserialize<'de> for IntervalSet<T>
    where
        T: Deserialize<'de> + Ord + Copy + Debug + Display,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let intervals = Vec::<Interval<T>>::deserialize(deserializer)?;
            IntervalSet::from_intervals(intervals).map_err(D::Error::custom)
        }
    }
}
