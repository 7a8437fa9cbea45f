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

//! Maximal disjoint interval sets for resource allocators.
//!
//! An [`IntervalSet`] tracks which resource units are free (or used) as the
//! minimal list of maximal runs. An allocation policy built on top of it
//! asks for [`candidate windows`](IntervalSet::candidate_windows), checks
//! [`containment`](IntervalSet::includes), and records its decisions through
//! [`insert`](IntervalSet::insert) and [`remove`](IntervalSet::remove).
//! Choosing among candidates is left to the policy.

pub mod err;
pub mod intervalset;
pub mod parse;
pub mod window;

pub use intervalset::IntervalSet;
pub use resunits_core::{UnitDomain, order::Precedence, primitives::Interval};
