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

use std::fmt::{Debug, Display};

/// Returned when an interval would be empty or inverted, i.e. `min >= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidRangeError<T> {
    min: T,
    max: T,
}

impl<T: Copy> InvalidRangeError<T> {
    #[inline]
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn min(&self) -> T {
        self.min
    }

    #[inline]
    pub fn max(&self) -> T {
        self.max
    }
}

impl<T: Display> Display for InvalidRangeError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid range: lower bound {} must be less than upper bound {}",
            self.min, self.max
        )
    }
}

impl<T: Debug + Display> std::error::Error for InvalidRangeError<T> {}

/// The kinds of token that make up the textual form of intervals and sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    OpenBrace,
    CloseBrace,
    Comma,
    Value,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::OpenBrace => write!(f, "'{{'"),
            TokenKind::CloseBrace => write!(f, "'}}'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Value => write!(f, "a value"),
        }
    }
}

/// Errors produced while reading the textual form `{min, max}`.
///
/// Any of these fails the whole parse; no partial value is produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseIntervalError {
    /// The input ended while a token of the given kind was still expected.
    UnexpectedEnd { expected: TokenKind },
    /// A token other than the expected one was found.
    UnexpectedToken { expected: TokenKind, found: String },
    /// A value token could not be read as a unit of the domain.
    InvalidValue(String),
    /// Both bounds were read, but `min >= max`.
    InvalidRange { min: String, max: String },
    /// Well-formed input was followed by more tokens.
    TrailingInput(String),
}

impl Display for ParseIntervalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseIntervalError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            ParseIntervalError::UnexpectedToken { expected, found } => {
                write!(f, "Expected {}, found '{}'", expected, found)
            }
            ParseIntervalError::InvalidValue(token) => {
                write!(f, "Invalid unit value '{}'", token)
            }
            ParseIntervalError::InvalidRange { min, max } => {
                write!(
                    f,
                    "Invalid range: lower bound {} must be less than upper bound {}",
                    min, max
                )
            }
            ParseIntervalError::TrailingInput(token) => {
                write!(f, "Unexpected trailing input starting at '{}'", token)
            }
        }
    }
}

impl std::error::Error for ParseIntervalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_display_names_both_bounds() {
        let e = InvalidRangeError::new(5, 3);
        assert_eq!(e.min(), 5);
        assert_eq!(e.max(), 3);
        assert_eq!(
            e.to_string(),
            "Invalid range: lower bound 5 must be less than upper bound 3"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let e = ParseIntervalError::UnexpectedToken {
            expected: TokenKind::Comma,
            found: "}".to_string(),
        };
        assert_eq!(e.to_string(), "Expected ',', found '}'");

        let e = ParseIntervalError::UnexpectedEnd {
            expected: TokenKind::OpenBrace,
        };
        assert_eq!(e.to_string(), "Unexpected end of input, expected '{'");
    }
}
