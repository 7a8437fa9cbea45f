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

use resunits_core::{err::ParseIntervalError, primitives::Interval};
use std::fmt::{Debug, Display};

/// Contract violations reported by [`crate::intervalset::IntervalSet`] mutations.
///
/// A rejected operation leaves the set untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalSetError<T> {
    /// `insert` was given units that are already covered, for example
    /// because the same resource was allocated twice.
    OverlapViolation {
        interval: Interval<T>,
        existing: Interval<T>,
    },
    /// `remove` was given units that no single stored interval covers.
    NotFound { interval: Interval<T> },
}

impl<T: Display> Display for IntervalSetError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntervalSetError::OverlapViolation { interval, existing } => {
                write!(
                    f,
                    "Interval {} overlaps stored interval {}",
                    interval, existing
                )
            }
            IntervalSetError::NotFound { interval } => {
                write!(f, "Interval {} is not covered by the set", interval)
            }
        }
    }
}

impl<T: Debug + Display> std::error::Error for IntervalSetError<T> {}

/// Errors produced while reading the textual form `{{a, b}, {c, d}, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseIntervalSetError<T> {
    /// The token stream is malformed, or an interval in it is invalid.
    Malformed(ParseIntervalError),
    /// The text lists intervals that overlap one another.
    Overlap(IntervalSetError<T>),
}

impl<T> From<ParseIntervalError> for ParseIntervalSetError<T> {
    #[inline]
    fn from(e: ParseIntervalError) -> Self {
        ParseIntervalSetError::Malformed(e)
    }
}

impl<T> From<IntervalSetError<T>> for ParseIntervalSetError<T> {
    #[inline]
    fn from(e: IntervalSetError<T>) -> Self {
        ParseIntervalSetError::Overlap(e)
    }
}

impl<T: Display> Display for ParseIntervalSetError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseIntervalSetError::Malformed(e) => write!(f, "Malformed interval set: {}", e),
            ParseIntervalSetError::Overlap(e) => write!(f, "Invalid interval set: {}", e),
        }
    }
}

impl<T: Debug + Display + 'static> std::error::Error for ParseIntervalSetError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseIntervalSetError::Malformed(e) => Some(e),
            ParseIntervalSetError::Overlap(e) => Some(e),
        }
    }
}

/// Rejected parameters of a [`crate::window::WindowQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowQueryError<T> {
    /// Windows must cover at least one unit.
    NonPositiveWidth(T),
    /// Consecutive windows must advance by at least one unit.
    NonPositiveStride(T),
}

impl<T: Display> Display for WindowQueryError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowQueryError::NonPositiveWidth(w) => {
                write!(f, "Window width must be positive, got {}", w)
            }
            WindowQueryError::NonPositiveStride(s) => {
                write!(f, "Window stride must be positive, got {}", s)
            }
        }
    }
}

impl<T: Debug + Display> std::error::Error for WindowQueryError<T> {}
