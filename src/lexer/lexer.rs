use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Consumes the text a pattern matched. Returns `None` for text that
/// produces no token (whitespace, comments).
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).expect("token pattern must compile"),
        handler,
    }
}

lazy_static! {
    // Tried in order; every pattern is anchored to the current position.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^\{[^}]*\}", skip_handler),
        pattern(r"^[a-zA-Z][a-zA-Z0-9]*", symbol_handler),
        pattern(r"^[0-9]+\.[0-9]+", real_handler),
        pattern(r"^[0-9]+", integer_handler),
        pattern(r"^'[^']*'", string_handler),
        pattern(r"^:=", MK_DEFAULT_HANDLER!(TokenKind::Assign, ":=")),
        pattern(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Minus, "-")),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Equal, "=")),
    ];
}

/// Produces tokens one at a time from a source text.
pub struct Lexer {
    source: Rc<str>,
    pos: usize,
    file: Rc<String>,
    /// Set after `PROCEDURE`/`FUNCTION` so the routine's own name is not
    /// read as a call marker.
    is_declaration: bool,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: Rc::from(source),
            pos: 0,
            file: file_name,
            is_declaration: false,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span covering the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    /// Returns the next token, or an `EOF` token once the source is exhausted.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        let source = Rc::clone(&self.source);

        while !self.at_eof() {
            let remainder = &source[self.pos..];
            let mut matched = false;

            for pattern in PATTERNS.iter() {
                if let Some(found) = pattern.regex.find(remainder) {
                    matched = true;
                    if let Some(token) = (pattern.handler)(self, found.as_str()) {
                        return Ok(token);
                    }
                    break;
                }
            }

            if !matched {
                let token = self.at().map(String::from).unwrap_or_default();
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token },
                    self.position(),
                ));
            }
        }

        Ok(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span_of(0)))
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn integer_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    Some(MK_TOKEN!(TokenKind::IntegerConst, String::from(matched), span))
}

fn real_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    Some(MK_TOKEN!(TokenKind::RealConst, String::from(matched), span))
}

// No escape processing: the literal is whatever sits between the quotes.
fn string_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let span = lexer.span_of(matched.len());
    let string_literal = String::from(&matched[1..matched.len() - 1]);
    lexer.advance_n(matched.len());
    Some(MK_TOKEN!(TokenKind::StringConst, string_literal, span))
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    if let Some(kind) = RESERVED_LOOKUP.get(matched.to_uppercase().as_str()) {
        let span = lexer.span_of(matched.len());
        lexer.advance_n(matched.len());
        lexer.is_declaration = matches!(kind, TokenKind::Procedure | TokenKind::Function);
        return Some(MK_TOKEN!(*kind, matched.to_uppercase(), span));
    }

    let followed_by_paren = lexer.remainder()[matched.len()..].starts_with('(');

    if followed_by_paren && !lexer.is_declaration {
        let span = lexer.span_of(matched.len() + 1);
        lexer.advance_n(matched.len() + 1);
        Some(MK_TOKEN!(TokenKind::Call, String::from(matched), span))
    } else {
        let span = lexer.span_of(matched.len());
        lexer.advance_n(matched.len());
        lexer.is_declaration = false;
        Some(MK_TOKEN!(TokenKind::Identifier, String::from(matched), span))
    }
}

/// Runs the lexer to completion. The returned tokens always end with `EOF`.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
