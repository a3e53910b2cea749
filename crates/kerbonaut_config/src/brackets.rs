//! # Bracket Matcher
//!
//! Finds the closer for an opening `{` or `[` by depth counting.
//!
//! Only brackets of the *same kind* move the depth: brace matching ignores
//! square brackets and vice versa. Depth is counted over tokens, so bracket
//! characters inside quoted strings never take part.

use crate::lexer::{Token, TokenBuffer};

/// Index of the token closing the bracket token at `open`.
///
/// Returns `None` if `open` is not an opening bracket or if depth never
/// returns to zero before the end of `tokens`.
#[must_use]
pub fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let opener = tokens.get(open)?.kind;
    let closer = opener.closer()?;

    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token.kind == opener {
            depth += 1;
        } else if token.kind == closer {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Byte offset of the character closing the bracket at byte `open_offset`.
///
/// Returns `None` if the text does not lex, if no bracket starts at
/// `open_offset`, or if the bracket is never closed.
#[must_use]
pub fn match_bracket(text: &str, open_offset: usize) -> Option<usize> {
    let buf = TokenBuffer::new(text).ok()?;
    let open = buf.index_at(open_offset)?;
    matching_close(buf.tokens(), open).map(|close| buf.tokens()[close].start)
}
