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

//! # Resource Units
//!
//! Half-open resource intervals `[min, max)` over a discrete, totally
//! ordered domain, together with the precedence order used to keep
//! collections of them sorted.

use num_traits::PrimInt;
use std::fmt::{Debug, Display};

pub mod err;
pub mod order;
pub mod parse;
pub mod primitives;

/// The domain an interval ranges over: resource unit indices such as core
/// ids, address offsets or time slots.
///
/// Any primitive integer, signed or unsigned, qualifies.
pub trait UnitDomain: PrimInt + Debug + Display {}
impl<T> UnitDomain for T where T: PrimInt + Debug + Display {}
