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

//! Reading the textual form of interval sets.
//!
//! ```text
//! set := '{' [ interval { ',' interval } ] '}'
//! ```
//!
//! Intervals are inserted in the order they appear, so touching entries are
//! merged and overlapping entries fail the parse.

use crate::err::ParseIntervalSetError;
use crate::intervalset::IntervalSet;
use resunits_core::{
    UnitDomain,
    err::{ParseIntervalError, TokenKind},
    parse::{Lexer, Token, parse_interval},
};
use std::str::FromStr;

/// Reads one set from the lexer, leaving any following tokens in it.
pub fn parse_interval_set<T: UnitDomain>(
    lexer: &mut Lexer<'_>,
) -> Result<IntervalSet<T>, ParseIntervalSetError<T>> {
    lexer.expect(TokenKind::OpenBrace)?;
    let mut set = IntervalSet::new();
    if lexer.peek() == Some(Token::CloseBrace) {
        lexer.next();
        return Ok(set);
    }

    loop {
        let interval = parse_interval(lexer)?;
        set.insert(interval)?;
        match lexer.next() {
            Some(Token::Comma) => continue,
            Some(Token::CloseBrace) => return Ok(set),
            Some(token) => {
                return Err(ParseIntervalError::UnexpectedToken {
                    expected: TokenKind::CloseBrace,
                    found: token.as_str().to_string(),
                }
                .into());
            }
            None => {
                return Err(ParseIntervalError::UnexpectedEnd {
                    expected: TokenKind::CloseBrace,
                }
                .into());
            }
        }
    }
}

impl<T: UnitDomain> FromStr for IntervalSet<T> {
    type Err = ParseIntervalSetError<T>;

    /// Parses the `{{a, b}, {c, d}}` form produced by `Display`.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_set::IntervalSet;
    ///
    /// let set: IntervalSet<u64> = "{{0, 4}, {4, 6}, {9, 10}}".parse().unwrap();
    /// assert_eq!(set.to_string(), "{{0, 6}, {9, 10}}");
    /// assert!("{{0, 4}, {3, 6}}".parse::<IntervalSet<u64>>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lexer = Lexer::new(s);
        let set = parse_interval_set(&mut lexer)?;
        lexer.finish()?;
        Ok(set)
    }
}
