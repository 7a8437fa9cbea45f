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

//! Candidate placement windows.
//!
//! A window is a sub-interval of a requested width that fits entirely inside
//! one stored run. Windows are offered to an allocation policy; ranking and
//! choosing among them happens outside this crate.

use crate::err::WindowQueryError;
use resunits_core::{UnitDomain, primitives::Interval};
use std::iter::FusedIterator;

/// Describes which windows to enumerate.
///
/// `width` is the number of units each window covers. `stride` is the
/// distance between the lower bounds of consecutive windows in the same run,
/// `1` unless set with [`WindowQuery::with_stride`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowQuery<T> {
    width: T,
    stride: T,
}

impl<T: UnitDomain> WindowQuery<T> {
    /// Creates a query for windows of `width` units at every position.
    ///
    /// # Errors
    ///
    /// Returns [`WindowQueryError::NonPositiveWidth`] if `width <= 0`.
    #[inline]
    pub fn new(width: T) -> Result<Self, WindowQueryError<T>> {
        if width <= T::zero() {
            return Err(WindowQueryError::NonPositiveWidth(width));
        }
        Ok(Self {
            width,
            stride: T::one(),
        })
    }

    /// Only offer every `stride`-th position within each run.
    ///
    /// # Errors
    ///
    /// Returns [`WindowQueryError::NonPositiveStride`] if `stride <= 0`.
    #[inline]
    pub fn with_stride(self, stride: T) -> Result<Self, WindowQueryError<T>> {
        if stride <= T::zero() {
            return Err(WindowQueryError::NonPositiveStride(stride));
        }
        Ok(Self { stride, ..self })
    }

    /// Returns the number of units each window covers.
    #[inline]
    pub fn width(&self) -> T {
        self.width
    }

    /// Returns the distance between consecutive window starts in a run.
    #[inline]
    pub fn stride(&self) -> T {
        self.stride
    }
}

/// Lazily yields the windows of a [`WindowQuery`] over a sorted run slice.
///
/// Runs narrower than the requested width contribute nothing. Within a run
/// of `[min, max)` the windows start at `min, min + stride, ...` up to and
/// including `max - width`.
#[derive(Debug, Clone)]
pub struct CandidateWindows<'a, T> {
    runs: std::slice::Iter<'a, Interval<T>>,
    query: WindowQuery<T>,
    next_min: T,
    last_min: T,
    in_run: bool,
}

impl<'a, T: UnitDomain> CandidateWindows<'a, T> {
    #[inline]
    pub(crate) fn new(runs: &'a [Interval<T>], query: WindowQuery<T>) -> Self {
        Self {
            runs: runs.iter(),
            query,
            next_min: T::zero(),
            last_min: T::zero(),
            in_run: false,
        }
    }

    #[inline]
    pub fn query(&self) -> WindowQuery<T> {
        self.query
    }
}

impl<'a, T: UnitDomain> Iterator for CandidateWindows<'a, T> {
    type Item = Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.in_run {
                let min = self.next_min;
                // `checked_add` keeps runs ending near `T::max_value()` from wrapping.
                match min.checked_add(&self.query.stride) {
                    Some(next) if next <= self.last_min => self.next_min = next,
                    _ => self.in_run = false,
                }
                return Some(Interval::new_unchecked(min, min + self.query.width));
            }

            let run = self.runs.next()?;
            // A signed run can be wider than `T::max_value()`, so never take its size.
            let last_min = run
                .max()
                .checked_sub(&self.query.width)
                .filter(|&last| last >= run.min());
            if let Some(last_min) = last_min {
                self.next_min = run.min();
                self.last_min = last_min;
                self.in_run = true;
            }
        }
    }
}

impl<'a, T: UnitDomain> FusedIterator for CandidateWindows<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervalset::IntervalSet;

    #[inline]
    fn iv(a: u8, b: u8) -> Interval<u8> {
        Interval::new(a, b).unwrap()
    }

    #[test]
    fn test_query_validation() {
        assert_eq!(WindowQuery::new(0i32), Err(WindowQueryError::NonPositiveWidth(0)));
        assert_eq!(WindowQuery::new(-2i32), Err(WindowQueryError::NonPositiveWidth(-2)));
        let q = WindowQuery::new(3i32).unwrap();
        assert_eq!(q.width(), 3);
        assert_eq!(q.stride(), 1);
        assert_eq!(q.with_stride(0), Err(WindowQueryError::NonPositiveStride(0)));
        assert_eq!(q.with_stride(2).unwrap().stride(), 2);
    }

    #[test]
    fn test_stride_skips_positions() {
        let s = IntervalSet::from_intervals([iv(0, 7), iv(10, 12)]).unwrap();
        let query = WindowQuery::new(2).unwrap().with_stride(2).unwrap();
        let windows: Vec<_> = s.windows(query).collect();
        assert_eq!(windows, vec![iv(0, 2), iv(2, 4), iv(4, 6), iv(10, 12)]);
    }

    #[test]
    fn test_run_ending_at_domain_max_does_not_overflow() {
        let s = IntervalSet::from_intervals([iv(250, 255)]).unwrap();
        let windows: Vec<_> = s.candidate_windows(2).unwrap().collect();
        assert_eq!(
            windows,
            vec![iv(250, 252), iv(251, 253), iv(252, 254), iv(253, 255)]
        );

        let query = WindowQuery::new(1).unwrap().with_stride(200).unwrap();
        let windows: Vec<_> = s.windows(query).collect();
        assert_eq!(windows, vec![iv(250, 251)]);
    }

    #[test]
    fn test_signed_run_wider_than_domain_max() {
        let run = Interval::new(-100i8, 100i8).unwrap();
        let s = IntervalSet::from_intervals([run]).unwrap();

        let windows: Vec<_> = s.candidate_windows(100).unwrap().collect();
        assert_eq!(windows.len(), 101);
        assert_eq!(windows.first(), Some(&Interval::new(-100, 0).unwrap()));
        assert_eq!(windows.last(), Some(&Interval::new(0, 100).unwrap()));
        assert!(windows.iter().all(|w| run.includes(w)));

        let windows: Vec<_> = s.candidate_windows(127).unwrap().collect();
        assert_eq!(windows.len(), 74);
        assert_eq!(windows.last(), Some(&Interval::new(-27, 100).unwrap()));
    }

    #[test]
    fn test_run_narrower_than_width_is_skipped() {
        let s = IntervalSet::from_intervals([Interval::new(-128i8, -120i8).unwrap()]).unwrap();
        assert_eq!(s.candidate_windows(9).unwrap().count(), 0);
        assert_eq!(s.candidate_windows(8).unwrap().count(), 1);
    }

    #[test]
    fn test_exhausted_iterator_stays_exhausted() {
        let s = IntervalSet::from_intervals([iv(0, 1)]).unwrap();
        let mut windows = s.candidate_windows(1).unwrap();
        assert_eq!(windows.next(), Some(iv(0, 1)));
        assert_eq!(windows.next(), None);
        assert_eq!(windows.next(), None);
    }
}
