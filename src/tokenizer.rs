//! Shell-style token stream for command lines.
//!
//! Splits a command line into tokens on demand with support for:
//! - Unescaped spaces as separators (runs of separators collapse)
//! - Backslash escapes (`\ `, `\"`, `\\`, or any other character taken literally)
//! - Double-quoted verbatim regions in which spaces do not separate
//!
//! The stream keeps a forward-only cursor into the original text, so
//! `consumed()` and `remaining()` are exact substring views: their
//! concatenation always reassembles the original input, separators
//! included. The trie layer relies on this to hand a fallback handler
//! the unconsumed remainder verbatim.

use crate::error::TokenError;

/// A lazily-advancing stream of unescaped tokens over one command line.
///
/// Created per dispatch call and discarded when dispatch returns; the
/// cursor only ever advances.
#[derive(Debug)]
pub struct TokenStream<'a> {
    source: &'a str,
    cursor: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self { source, cursor: 0 }
    }

    /// Returns the original input text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns everything already consumed, for diagnostics.
    pub fn consumed(&self) -> &'a str {
        &self.source[..self.cursor]
    }

    /// Returns everything not yet consumed, separators preserved.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.cursor..]
    }

    /// Returns true if another token can be produced.
    ///
    /// Trailing separators do not count as a token; malformed trailing
    /// input (a lone escape, an unclosed quote) does, so the error
    /// surfaces from the `next()` call instead of being skipped.
    pub fn has_more(&self) -> bool {
        self.remaining().chars().any(|c| c != ' ')
    }

    /// Advances the cursor past everything that remains.
    ///
    /// Used by stream-consumer parameters that take the raw remainder.
    pub fn drain(&mut self) {
        self.cursor = self.source.len();
    }

    /// Produces the next token and advances the cursor past it and the
    /// separator run that follows, so `remaining()` starts exactly at
    /// the next token.
    ///
    /// Fails with `EndOfStream` if only separators remain, and with
    /// `UnterminatedQuote`/`TrailingEscape` on malformed input. The
    /// cursor does not advance on failure.
    pub fn next(&mut self) -> Result<String, TokenError> {
        let source = self.source;
        let bytes = source.as_bytes();

        let mut start = self.cursor;
        while start < bytes.len() && bytes[start] == b' ' {
            start += 1;
        }
        if start == bytes.len() {
            return Err(TokenError::EndOfStream);
        }

        let mut token = String::new();
        let mut in_quotes = false;
        let mut end = bytes.len();
        let mut chars = source[start..].char_indices();
        loop {
            let Some((offset, c)) = chars.next() else {
                if in_quotes {
                    return Err(TokenError::UnterminatedQuote);
                }
                break;
            };
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => token.push(escaped),
                    None => return Err(TokenError::TrailingEscape),
                },
                '"' => in_quotes = !in_quotes,
                ' ' if !in_quotes => {
                    end = start + offset;
                    break;
                }
                _ => token.push(c),
            }
        }

        // Swallow the trailing separator run as well.
        while end < bytes.len() && bytes[end] == b' ' {
            end += 1;
        }
        self.cursor = end;
        Ok(token)
    }
}
