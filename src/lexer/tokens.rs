use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Reserved words, keyed by their upper-case spelling.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("PROGRAM", TokenKind::Program);
        map.insert("VAR", TokenKind::Var);
        map.insert("DIV", TokenKind::Div);
        map.insert("INTEGER", TokenKind::Integer);
        map.insert("REAL", TokenKind::Real);
        map.insert("STRING", TokenKind::String);
        map.insert("BEGIN", TokenKind::Begin);
        map.insert("END", TokenKind::End);
        map.insert("PROCEDURE", TokenKind::Procedure);
        map.insert("FUNCTION", TokenKind::Function);
        map.insert("IF", TokenKind::If);
        map.insert("THEN", TokenKind::Then);
        map.insert("ELSE", TokenKind::Else);
        map.insert("WHILE", TokenKind::While);
        map.insert("DO", TokenKind::Do);
        map.insert("FOR", TokenKind::For);
        map.insert("TO", TokenKind::To);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    /// An identifier immediately followed by `(` outside a declaration.
    /// The parenthesis is consumed together with the name.
    Call,

    IntegerConst,
    RealConst,
    StringConst,

    OpenParen,
    CloseParen,

    Assign, // :=
    Equal,  // =
    Less,
    Greater,

    Dot,
    Semicolon,
    Colon,
    Comma,

    Plus,
    Minus,
    Star,
    Slash,

    // Reserved
    Program,
    Var,
    Begin,
    End,
    Procedure,
    Function,
    If,
    Then,
    Else,
    While,
    Do,
    For,
    To,
    Div,
    Integer,
    Real,
    String,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({}, {:?})", self.kind, self.value)
    }
}
