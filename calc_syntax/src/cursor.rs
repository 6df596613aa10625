use thiserror::Error;

use crate::token::Token;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum CursorError {
    #[error("end of input")]
    EndOfInput,
    #[error("seek out of range: {target}")]
    OutOfRange { target: usize },
}

/// A read position over a token slice that can be rewound.
///
/// `pos` is always within `0..=len`; `pos == len` means everything has been
/// read. The only way to move backwards is `seek`, which accepts positions
/// that name an actual token, so a rewind target must have been recorded
/// before that token was read.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub fn read(&mut self) -> Result<&'a Token, CursorError> {
        let token = self.tokens.get(self.pos).ok_or(CursorError::EndOfInput)?;
        self.pos += 1;
        Ok(token)
    }

    pub fn seek(&mut self, target: usize) -> Result<(), CursorError> {
        if target >= self.tokens.len() {
            return Err(CursorError::OutOfRange { target });
        }
        self.pos = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<Token> {
        vec![
            Token::open_paren(),
            Token::number("1"),
            Token::add(),
            Token::number("2"),
            Token::close_paren(),
        ]
    }

    #[test]
    fn reads_in_order() {
        let tokens = tokens();
        let mut cursor = Cursor::new(&tokens);
        k9::assert_equal!(cursor.len(), 5);
        for (i, expected) in tokens.iter().enumerate() {
            k9::assert_equal!(cursor.pos(), i);
            k9::assert_equal!(cursor.read(), Ok(expected));
        }
        k9::assert_equal!(cursor.pos(), 5);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn read_at_end_does_not_advance() {
        let tokens = tokens();
        let mut cursor = Cursor::new(&tokens);
        while cursor.read().is_ok() {}
        k9::assert_equal!(cursor.read(), Err(CursorError::EndOfInput));
        k9::assert_equal!(cursor.read(), Err(CursorError::EndOfInput));
        k9::assert_equal!(cursor.pos(), 5);
        k9::assert_equal!(cursor.peek(), None);
    }

    #[test]
    fn seek_then_read() {
        let tokens = tokens();
        let mut cursor = Cursor::new(&tokens);
        for target in (0..tokens.len()).rev() {
            k9::assert_equal!(cursor.seek(target), Ok(()));
            k9::assert_equal!(cursor.peek(), Some(&tokens[target]));
            k9::assert_equal!(cursor.read(), Ok(&tokens[target]));
            k9::assert_equal!(cursor.pos(), target + 1);
        }
    }

    #[test]
    fn seek_out_of_range() {
        let tokens = tokens();
        let mut cursor = Cursor::new(&tokens);
        cursor.read().unwrap();
        k9::assert_equal!(cursor.seek(5), Err(CursorError::OutOfRange { target: 5 }));
        k9::assert_equal!(cursor.seek(99), Err(CursorError::OutOfRange { target: 99 }));
        k9::assert_equal!(cursor.pos(), 1);
    }

    #[test]
    fn empty_sequence() {
        let mut cursor = Cursor::new(&[]);
        assert!(cursor.is_empty());
        assert!(cursor.is_exhausted());
        k9::assert_equal!(cursor.read(), Err(CursorError::EndOfInput));
        k9::assert_equal!(cursor.seek(0), Err(CursorError::OutOfRange { target: 0 }));
        k9::assert_equal!(cursor.pos(), 0);
    }
}
