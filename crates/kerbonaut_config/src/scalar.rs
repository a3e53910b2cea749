//! # Scalar Extractor
//!
//! Typed field lookup inside one object of a document.
//!
//! Every lookup is total: it returns either the found value or the caller's
//! default. Keys only match at the object's own nesting level, so a
//! `"HeadDiffuse"` inside `"bodyTextures"` is invisible to a lookup on the
//! enclosing record.
//!
//! ## Value rules
//!
//! The value is the token right after `"key" :`.
//!
//! - string: a non-empty string token
//! - float: a number token that parses as `f32`
//! - boolean: a `true` or `false` token

use crate::brackets::matching_close;
use crate::lexer::{Token, TokenBuffer, TokenKind};
use crate::splitter::Elements;

/// A value type the extractor can read from a single token.
pub trait Scalar: Sized {
    /// Converts the token, or `None` if it does not hold this type.
    fn from_token(token: &Token, src: &str) -> Option<Self>;
}

impl Scalar for f32 {
    fn from_token(token: &Token, src: &str) -> Option<Self> {
        match token.kind {
            TokenKind::Number => token.text(src).parse().ok(),
            _ => None,
        }
    }
}

impl Scalar for bool {
    fn from_token(token: &Token, _src: &str) -> Option<Self> {
        match token.kind {
            TokenKind::True => Some(true),
            TokenKind::False => Some(false),
            _ => None,
        }
    }
}

impl Scalar for String {
    fn from_token(token: &Token, src: &str) -> Option<Self> {
        match token.kind {
            TokenKind::Str if token.start < token.end => Some(token.text(src).to_owned()),
            _ => None,
        }
    }
}

/// An object: the tokens between a matched `{` and `}`.
#[derive(Clone, Copy, Debug)]
pub struct ObjectView<'t, 'a> {
    buf: &'t TokenBuffer<'a>,
    open: usize,
    close: usize,
}

impl<'t, 'a> ObjectView<'t, 'a> {
    /// View over the brace pair at token indices `open` and `close`.
    #[must_use]
    pub(crate) fn new(buf: &'t TokenBuffer<'a>, open: usize, close: usize) -> Self {
        Self { buf, open, close }
    }

    /// The object at the start of the buffer, if the buffer starts with a closed `{`.
    #[must_use]
    pub fn root(buf: &'t TokenBuffer<'a>) -> Option<Self> {
        let first = buf.tokens().first()?;
        if first.kind != TokenKind::OpenBrace {
            return None;
        }
        matching_close(buf.tokens(), 0).map(|close| Self::new(buf, 0, close))
    }

    /// Source text between the braces, exclusive.
    #[must_use]
    pub fn text(&self) -> &'a str {
        let tokens = self.buf.tokens();
        &self.buf.source()[tokens[self.open].end..tokens[self.close].start]
    }

    /// Byte offset of the opening brace.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.buf.tokens()[self.open].start
    }

    /// Token index of the value following the first top-level `"key":`.
    fn value_index(&self, key: &str) -> Option<usize> {
        let tokens = self.buf.tokens();
        let mut depth = 0usize;
        let mut i = self.open + 1;
        while i < self.close {
            match tokens[i].kind {
                TokenKind::OpenBrace | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseBrace | TokenKind::CloseBracket => depth = depth.saturating_sub(1),
                TokenKind::Str
                    if depth == 0
                        && i + 2 < self.close
                        && tokens[i + 1].kind == TokenKind::Colon
                        && self.buf.text(i) == key =>
                {
                    return Some(i + 2);
                }
                _ => {}
            }
            i += 1;
        }
        None
    }

    /// Permissive typed lookup: the value under `key`, or `default` when the
    /// key is absent or its value is not a `T`.
    #[must_use]
    pub fn parse_or_default<T: Scalar>(&self, key: &str, default: T) -> T {
        self.value_index(key)
            .and_then(|i| T::from_token(&self.buf.tokens()[i], self.buf.source()))
            .unwrap_or(default)
    }

    /// String value under `key`. Empty strings count as absent.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        let i = self.value_index(key)?;
        let token = &self.buf.tokens()[i];
        (token.kind == TokenKind::Str && token.start < token.end)
            .then(|| token.text(self.buf.source()))
    }

    /// Float value under `key`, or `default`.
    #[must_use]
    pub fn get_f32(&self, key: &str, default: f32) -> f32 {
        self.parse_or_default(key, default)
    }

    /// Boolean value under `key`, or `default`.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.parse_or_default(key, default)
    }

    /// Nested object under `key`, if present and closed inside this object.
    #[must_use]
    pub fn get_object(&self, key: &str) -> Option<Self> {
        let open = self.nested(key, TokenKind::OpenBrace)?;
        let close = matching_close(&self.buf.tokens()[..self.close], open)?;
        Some(Self::new(self.buf, open, close))
    }

    /// Nested array under `key`, if present and closed inside this object.
    #[must_use]
    pub fn get_array(&self, key: &str) -> Option<ArrayView<'t, 'a>> {
        let open = self.nested(key, TokenKind::OpenBracket)?;
        let close = matching_close(&self.buf.tokens()[..self.close], open)?;
        Some(ArrayView {
            buf: self.buf,
            open,
            close,
        })
    }

    fn nested(&self, key: &str, kind: TokenKind) -> Option<usize> {
        self.value_index(key)
            .filter(|&i| self.buf.tokens()[i].kind == kind)
    }
}

/// An array: the tokens between a matched `[` and `]`.
#[derive(Clone, Copy, Debug)]
pub struct ArrayView<'t, 'a> {
    buf: &'t TokenBuffer<'a>,
    open: usize,
    close: usize,
}

impl<'t, 'a> ArrayView<'t, 'a> {
    /// Lazy walk over the array's top-level elements.
    #[must_use]
    pub fn elements(&self) -> Elements<'t, 'a> {
        Elements::new(self.buf, self.open + 1, self.close)
    }

    /// True if the array holds no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.close == self.open + 1
    }

    /// Byte offset of the opening bracket.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.buf.tokens()[self.open].start
    }
}
