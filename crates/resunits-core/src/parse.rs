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

//! Reading the textual form of resource intervals.
//!
//! The grammar is token based and whitespace insensitive:
//!
//! ```text
//! interval := '{' value ',' value '}'
//! ```
//!
//! The [`Lexer`] is public so that containers of intervals can extend the
//! grammar with their own delimiters.

use crate::UnitDomain;
use crate::err::{ParseIntervalError, TokenKind};
use crate::primitives::Interval;
use std::str::FromStr;

/// A single token of the textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token<'a> {
    OpenBrace,
    CloseBrace,
    Comma,
    Value(&'a str),
}

impl<'a> Token<'a> {
    #[inline]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::OpenBrace => TokenKind::OpenBrace,
            Token::CloseBrace => TokenKind::CloseBrace,
            Token::Comma => TokenKind::Comma,
            Token::Value(_) => TokenKind::Value,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'a str {
        match *self {
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::Comma => ",",
            Token::Value(s) => s,
        }
    }
}

/// Splits input into braces, commas and value words, skipping whitespace.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    rest: &'a str,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Returns the next token without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<Token<'a>> {
        self.clone().next()
    }

    /// Consumes the next token, requiring it to be of kind `expected`.
    pub fn expect(&mut self, expected: TokenKind) -> Result<Token<'a>, ParseIntervalError> {
        match self.next() {
            Some(token) if token.kind() == expected => Ok(token),
            Some(token) => Err(ParseIntervalError::UnexpectedToken {
                expected,
                found: token.as_str().to_string(),
            }),
            None => Err(ParseIntervalError::UnexpectedEnd { expected }),
        }
    }

    /// Fails if any token is left.
    pub fn finish(mut self) -> Result<(), ParseIntervalError> {
        match self.next() {
            Some(token) => Err(ParseIntervalError::TrailingInput(
                token.as_str().to_string(),
            )),
            None => Ok(()),
        }
    }
}

#[inline]
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | ',')
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rest = self.rest.trim_start();
        let mut chars = self.rest.chars();
        let token = match chars.next()? {
            '{' => Token::OpenBrace,
            '}' => Token::CloseBrace,
            ',' => Token::Comma,
            _ => {
                let end = self.rest.find(is_delimiter).unwrap_or(self.rest.len());
                let (word, rest) = self.rest.split_at(end);
                self.rest = rest;
                return Some(Token::Value(word));
            }
        };
        self.rest = chars.as_str();
        Some(token)
    }
}

impl<'a> std::iter::FusedIterator for Lexer<'a> {}

fn parse_value<T: UnitDomain>(token: Token<'_>) -> Result<T, ParseIntervalError> {
    let text = token.as_str();
    T::from_str_radix(text, 10).map_err(|_| ParseIntervalError::InvalidValue(text.to_string()))
}

/// Reads one interval `{min, max}` from the lexer.
///
/// Tokens after the closing brace are left in the lexer.
pub fn parse_interval<T: UnitDomain>(
    lexer: &mut Lexer<'_>,
) -> Result<Interval<T>, ParseIntervalError> {
    lexer.expect(TokenKind::OpenBrace)?;
    let min_token = lexer.expect(TokenKind::Value)?;
    let min = parse_value::<T>(min_token)?;
    lexer.expect(TokenKind::Comma)?;
    let max_token = lexer.expect(TokenKind::Value)?;
    let max = parse_value::<T>(max_token)?;
    lexer.expect(TokenKind::CloseBrace)?;

    Interval::new(min, max).map_err(|_| ParseIntervalError::InvalidRange {
        min: min_token.as_str().to_string(),
        max: max_token.as_str().to_string(),
    })
}

impl<T: UnitDomain> FromStr for Interval<T> {
    type Err = ParseIntervalError;

    /// Parses the `{min, max}` form produced by `Display`.
    ///
    /// # Examples
    ///
    /// ```
    /// use resunits_core::primitives::Interval;
    ///
    /// let interval: Interval<u32> = " { 3 , 9 } ".parse().unwrap();
    /// assert_eq!(interval, Interval::new(3, 9).unwrap());
    /// assert!("{9, 3}".parse::<Interval<u32>>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lexer = Lexer::new(s);
        let interval = parse_interval(&mut lexer)?;
        lexer.finish()?;
        Ok(interval)
    }
}
