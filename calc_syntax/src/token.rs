use std::fmt;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum TokenClass {
    Number,
    OpenParen,
    CloseParen,
    Add,
    Subtract,
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenClass::*;
        match self {
            Number => write!(f, "number"),
            OpenParen => write!(f, "open paren"),
            CloseParen => write!(f, "close paren"),
            Add => write!(f, "add"),
            Subtract => write!(f, "subtract"),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Token {
    pub class: TokenClass,
    pub value: String,
}

impl Token {
    pub fn number<S: Into<String>>(digits: S) -> Self {
        Token {
            class: TokenClass::Number,
            value: digits.into(),
        }
    }

    pub fn open_paren() -> Self {
        Self::punctuation(TokenClass::OpenParen, "(")
    }

    pub fn close_paren() -> Self {
        Self::punctuation(TokenClass::CloseParen, ")")
    }

    pub fn add() -> Self {
        Self::punctuation(TokenClass::Add, "+")
    }

    pub fn subtract() -> Self {
        Self::punctuation(TokenClass::Subtract, "-")
    }

    fn punctuation(class: TokenClass, value: &str) -> Self {
        Token {
            class,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
