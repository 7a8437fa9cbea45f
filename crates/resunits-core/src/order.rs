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

//! The precedence order as a named comparator.
//!
//! Resource values are ranked by *precedence* rather than by their own
//! relational operators: `Less` means "comes first", which for resources
//! means "offers more". [`ByPrecedence`] lifts the comparator into [`Ord`]
//! for sorting and ordered containers.

use crate::primitives::Interval;
use std::cmp::Ordering;
use std::ops::Deref;

/// A total order in which supersets come before their subsets.
pub trait Precedence {
    /// Returns `Ordering::Less` if `self` precedes `other`.
    fn precedence_cmp(&self, other: &Self) -> Ordering;

    /// Checks whether `self` strictly precedes `other`.
    #[inline]
    fn precedes(&self, other: &Self) -> bool {
        self.precedence_cmp(other) == Ordering::Less
    }
}

impl<T: Ord> Precedence for Interval<T> {
    #[inline]
    fn precedence_cmp(&self, other: &Self) -> Ordering {
        Interval::precedence_cmp(self, other)
    }
}

/// Orders the wrapped value by [`Precedence`].
///
/// # Examples
///
/// ```
/// use resunits_core::order::ByPrecedence;
/// use resunits_core::primitives::Interval;
///
/// let mut v = vec![
///     ByPrecedence(Interval::new(0, 1).unwrap()),
///     ByPrecedence(Interval::new(1, 2).unwrap()),
///     ByPrecedence(Interval::new(0, 3).unwrap()),
/// ];
/// v.sort();
/// assert_eq!(v[0].0, Interval::new(0, 3).unwrap());
/// assert_eq!(v[1].0, Interval::new(0, 1).unwrap());
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash)]
pub struct ByPrecedence<X>(pub X);

impl<X> ByPrecedence<X> {
    #[inline]
    pub fn into_inner(self) -> X {
        self.0
    }
}

impl<X> Deref for ByPrecedence<X> {
    type Target = X;

    #[inline]
    fn deref(&self) -> &X {
        &self.0
    }
}

impl<X: Precedence> PartialEq for ByPrecedence<X> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.precedence_cmp(&other.0) == Ordering::Equal
    }
}

impl<X: Precedence> Eq for ByPrecedence<X> {}

impl<X: Precedence> PartialOrd for ByPrecedence<X> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<X: Precedence> Ord for ByPrecedence<X> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.precedence_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[inline]
    fn iv(a: i64, b: i64) -> Interval<i64> {
        Interval::new(a, b).unwrap()
    }

    #[test]
    fn test_btreeset_iterates_in_precedence_order() {
        let set: BTreeSet<_> = [iv(5, 6), iv(0, 1), iv(0, 4), iv(2, 9), iv(0, 2)]
            .into_iter()
            .map(ByPrecedence)
            .collect();
        let order: Vec<_> = set.into_iter().map(ByPrecedence::into_inner).collect();
        assert_eq!(order, vec![iv(0, 4), iv(0, 2), iv(0, 1), iv(2, 9), iv(5, 6)]);
    }

    #[test]
    fn test_equal_only_when_identical() {
        assert_eq!(ByPrecedence(iv(1, 3)), ByPrecedence(iv(1, 3)));
        assert_ne!(ByPrecedence(iv(1, 3)), ByPrecedence(iv(1, 4)));
        assert!(ByPrecedence(iv(1, 4)) < ByPrecedence(iv(1, 3)));
    }

    #[test]
    fn test_trait_and_inherent_agree() {
        let a = iv(3, 8);
        let b = iv(4, 5);
        assert_eq!(Precedence::precedence_cmp(&a, &b), a.precedence_cmp(&b));
        assert!(Precedence::precedes(&a, &b));
    }
}
