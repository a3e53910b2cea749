//! # Document Lexer
//!
//! Turns document text into a flat token list over a byte cursor.
//!
//! ## Token Set
//!
//! ```text
//! {  }  [  ]  :  ,  "string"  number  true  false  null  identifier
//! ```
//!
//! String tokens span the raw bytes *between* the quotes. A backslash escapes
//! the next byte, so `\"` never closes a string, but escapes are not decoded.
//! Bytes outside the token set are skipped.

use crate::error::{ConfigError, ConfigResult};

/// Kind of a lexed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// Quoted string; the span excludes the quotes.
    Str,
    /// Run of number characters (digits, sign, point, exponent).
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// Any other bare word.
    Ident,
}

impl TokenKind {
    /// Closing kind for an opening bracket kind.
    #[must_use]
    pub const fn closer(self) -> Option<Self> {
        match self {
            Self::OpenBrace => Some(Self::CloseBrace),
            Self::OpenBracket => Some(Self::CloseBracket),
            _ => None,
        }
    }
}

/// A token and its byte span in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Byte offset of the first byte (first content byte for strings).
    pub start: usize,
    /// Byte offset one past the last byte (the closing quote for strings).
    pub end: usize,
}

impl Token {
    /// Source text covered by this token.
    #[inline]
    #[must_use]
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

/// Streaming lexer over a document.
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `src`.
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    /// Lexes the whole text.
    ///
    /// # Errors
    ///
    /// Returns error if a string literal is never closed.
    pub fn tokenize(src: &str) -> ConfigResult<Vec<Token>> {
        Lexer::new(src).collect()
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.pos += 1;
        Token {
            kind,
            start,
            end: self.pos,
        }
    }

    fn string(&mut self) -> ConfigResult<Token> {
        let open = self.pos;
        let start = open + 1;
        let mut i = start;
        while i < self.src.len() {
            match self.src[i] {
                b'\\' => i += 2,
                b'"' => {
                    self.pos = i + 1;
                    return Ok(Token {
                        kind: TokenKind::Str,
                        start,
                        end: i,
                    });
                }
                _ => i += 1,
            }
        }
        self.pos = self.src.len();
        Err(ConfigError::UnterminatedString(open))
    }

    fn run(&mut self, accept: impl Fn(u8) -> bool) -> (usize, usize) {
        let start = self.pos;
        while self.pos < self.src.len() && accept(self.src[self.pos]) {
            self.pos += 1;
        }
        (start, self.pos)
    }

    fn number(&mut self) -> Token {
        let (start, end) =
            self.run(|c| c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.' | b'e' | b'E'));
        Token {
            kind: TokenKind::Number,
            start,
            end,
        }
    }

    fn word(&mut self) -> Token {
        let (start, end) = self.run(|c| c.is_ascii_alphanumeric() || c == b'_');
        let kind = match &self.src[start..end] {
            b"true" => TokenKind::True,
            b"false" => TokenKind::False,
            b"null" => TokenKind::Null,
            _ => TokenKind::Ident,
        };
        Token { kind, start, end }
    }
}

impl Iterator for Lexer<'_> {
    type Item = ConfigResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.src.len() {
            let c = self.src[self.pos];
            let token = match c {
                b'{' => self.single(TokenKind::OpenBrace),
                b'}' => self.single(TokenKind::CloseBrace),
                b'[' => self.single(TokenKind::OpenBracket),
                b']' => self.single(TokenKind::CloseBracket),
                b':' => self.single(TokenKind::Colon),
                b',' => self.single(TokenKind::Comma),
                b'"' => return Some(self.string()),
                b'-' | b'.' | b'0'..=b'9' => self.number(),
                c if c.is_ascii_alphabetic() || c == b'_' => self.word(),
                _ => {
                    // Whitespace and anything outside the token set.
                    self.pos += 1;
                    continue;
                }
            };
            return Some(Ok(token));
        }
        None
    }
}

/// Source text paired with its tokens.
///
/// Views into a document (objects, arrays) borrow from this buffer.
#[derive(Debug)]
pub struct TokenBuffer<'a> {
    src: &'a str,
    tokens: Vec<Token>,
}

impl<'a> TokenBuffer<'a> {
    /// Lexes `src` into a buffer.
    ///
    /// # Errors
    ///
    /// Returns error if a string literal is never closed.
    pub fn new(src: &'a str) -> ConfigResult<Self> {
        Ok(Self {
            src,
            tokens: Lexer::tokenize(src)?,
        })
    }

    /// The source text.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.src
    }

    /// All tokens, in source order.
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Text of the token at `index`.
    #[inline]
    #[must_use]
    pub fn text(&self, index: usize) -> &'a str {
        self.tokens[index].text(self.src)
    }

    /// Index of the token starting at byte `offset`.
    #[must_use]
    pub fn index_at(&self, offset: usize) -> Option<usize> {
        self.tokens.binary_search_by_key(&offset, |t| t.start).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::tokenize(src).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_structural_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds(r#"{"a": [1, -2.5], "b": true, "c": false, "d": null}"#),
            vec![
                OpenBrace, Str, Colon, OpenBracket, Number, Comma, Number, CloseBracket, Comma,
                Str, Colon, True, Comma, Str, Colon, False, Comma, Str, Colon, Null, CloseBrace,
            ]
        );
    }

    #[test]
    fn test_string_span_excludes_quotes() {
        let src = r#"  "meshName"  "#;
        let tokens = Lexer::tokenize(src).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(src), "meshName");
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let src = r#""say \"hi\"" x"#;
        let tokens = Lexer::tokenize(src).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].text(src), r#"say \"hi\""#);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
    }

    #[test]
    fn test_braces_inside_string_are_text() {
        let src = r#"{"name": "a{b}[c]"}"#;
        assert_eq!(
            kinds(src),
            vec![
                TokenKind::OpenBrace,
                TokenKind::Str,
                TokenKind::Colon,
                TokenKind::Str,
                TokenKind::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let result = Lexer::tokenize(r#"{"name": "Jeb"#);
        assert!(matches!(result, Err(ConfigError::UnterminatedString(9))));
    }

    #[test]
    fn test_number_with_exponent() {
        let src = "1.5e-3";
        let tokens = Lexer::tokenize(src).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(src).parse::<f32>().unwrap(), 1.5e-3);
    }

    #[test]
    fn test_non_ascii_inside_string() {
        let src = r#"{"kerbalName": "Jébediah"}"#;
        let buf = TokenBuffer::new(src).unwrap();
        assert_eq!(buf.text(3), "Jébediah");
    }

    #[test]
    fn test_index_at_offset() {
        let buf = TokenBuffer::new("{ [ ] }").unwrap();
        assert_eq!(buf.index_at(2), Some(1));
        assert_eq!(buf.index_at(1), None);
    }
}
