//! # Object/Array Splitter
//!
//! Walks the interior of an array and yields its top-level elements left to
//! right. Objects are yielded as [`ObjectView`]s without looking inside them;
//! strings are yielded as their raw text. Numbers, literals and nested arrays
//! are stepped over.
//!
//! The walk is lazy and `Clone`, so a caller can restart it from any point.

use crate::brackets::matching_close;
use crate::error::{ConfigError, ConfigResult};
use crate::lexer::{TokenBuffer, TokenKind};
use crate::scalar::ObjectView;

/// One top-level array element.
#[derive(Clone, Copy, Debug)]
pub enum Element<'t, 'a> {
    /// `{ ... }`
    Object(ObjectView<'t, 'a>),
    /// `"..."`
    Str(&'a str),
}

/// Iterator over the elements between two token indices.
#[derive(Clone, Debug)]
pub struct Elements<'t, 'a> {
    buf: &'t TokenBuffer<'a>,
    pos: usize,
    end: usize,
}

impl<'t, 'a> Elements<'t, 'a> {
    /// Walks tokens `start..end` (the interior of a bracket pair).
    #[must_use]
    pub(crate) fn new(buf: &'t TokenBuffer<'a>, start: usize, end: usize) -> Self {
        Self {
            buf,
            pos: start,
            end,
        }
    }

    /// Only the object elements, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns error if an element object never closes.
    pub fn objects(self) -> ConfigResult<Vec<ObjectView<'t, 'a>>> {
        let mut objects = Vec::new();
        for element in self {
            if let Element::Object(obj) = element? {
                objects.push(obj);
            }
        }
        Ok(objects)
    }
}

impl<'t, 'a> Iterator for Elements<'t, 'a> {
    type Item = ConfigResult<Element<'t, 'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let tokens = &self.buf.tokens()[..self.end];
        while self.pos < self.end {
            let i = self.pos;
            match tokens[i].kind {
                TokenKind::OpenBrace => {
                    return Some(match matching_close(tokens, i) {
                        Some(close) => {
                            self.pos = close + 1;
                            Ok(Element::Object(ObjectView::new(self.buf, i, close)))
                        }
                        None => {
                            self.pos = self.end;
                            Err(ConfigError::UnterminatedElement(tokens[i].start))
                        }
                    });
                }
                TokenKind::OpenBracket => {
                    self.pos = matching_close(tokens, i).map_or(self.end, |close| close + 1);
                }
                TokenKind::Str => {
                    self.pos += 1;
                    return Some(Ok(Element::Str(self.buf.text(i))));
                }
                _ => self.pos += 1,
            }
        }
        None
    }
}
