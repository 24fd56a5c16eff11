//! Unit tests for the lexer module.
//!
//! Covers reserved words, identifiers and call markers, numeric and string
//! constants, operators, comments and lexical errors.

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.pas".to_string()))
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_reserved_words() {
    let source = "PROGRAM VAR DIV INTEGER REAL STRING BEGIN END PROCEDURE FUNCTION IF THEN ELSE WHILE DO FOR TO";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Program,
            TokenKind::Var,
            TokenKind::Div,
            TokenKind::Integer,
            TokenKind::Real,
            TokenKind::String,
            TokenKind::Begin,
            TokenKind::End,
            TokenKind::Procedure,
            TokenKind::Function,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Do,
            TokenKind::For,
            TokenKind::To,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_reserved_words_ignore_case() {
    let tokens = tokenize("begin End wHiLe", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Begin);
    assert_eq!(tokens[0].value, "BEGIN");
    assert_eq!(tokens[1].kind, TokenKind::End);
    assert_eq!(tokens[2].kind, TokenKind::While);
    assert_eq!(tokens[2].value, "WHILE");
}

#[test]
fn test_identifiers_keep_their_spelling() {
    let tokens = tokenize("alpha Beta x1", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "alpha");
    assert_eq!(tokens[1].value, "Beta");
    assert_eq!(tokens[2].value, "x1");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_identifier_followed_by_paren_is_call() {
    let tokens = tokenize("WRITELN(x)", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Call);
    assert_eq!(tokens[0].value, "WRITELN");
    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 8);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::CloseParen);
}

#[test]
fn test_space_before_paren_is_not_call() {
    assert_eq!(
        kinds("foo (1)"),
        vec![
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::IntegerConst,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_declared_routine_name_is_not_call() {
    assert_eq!(
        kinds("PROCEDURE Foo(a : INTEGER); FUNCTION Bar(b : REAL) : REAL;"),
        vec![
            TokenKind::Procedure,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Integer,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::Function,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Real,
            TokenKind::CloseParen,
            TokenKind::Colon,
            TokenKind::Real,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_reserved_word_never_consumes_paren() {
    assert_eq!(
        kinds("IF(a"),
        vec![
            TokenKind::If,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntegerConst);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::RealConst);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntegerConst);
    assert_eq!(tokens[2].value, "0");
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    assert_eq!(
        kinds("5."),
        vec![TokenKind::IntegerConst, TokenKind::Dot, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_string_constant() {
    let tokens = tokenize("'hello world' ''", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringConst);
    assert_eq!(tokens[0].value, "hello world");
    assert_eq!(tokens[0].span.end.0, 13);
    assert_eq!(tokens[1].kind, TokenKind::StringConst);
    assert_eq!(tokens[1].value, "");
}

#[test]
fn test_tokenize_operators_and_punctuation() {
    assert_eq!(
        kinds(":= : ; , + - * / ( ) . < > ="),
        vec![
            TokenKind::Assign,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Dot,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Equal,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_assign_without_spaces() {
    assert_eq!(
        kinds("x:=1"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::IntegerConst,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("{ a comment\n spanning lines } x { another }"),
        vec![TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_empty_source_yields_eof() {
    let tokens = tokenize("", None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].value, "EOF");
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x", None);

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_unrecognised_character() {
    let error = tokenize("x := #", Some("test.pas".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 5);
    assert_eq!(error.get_position().1.as_str(), "test.pas");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnrecognisedToken {
            token: "#".to_string()
        }
    );
}

#[test]
fn test_unterminated_comment_is_error() {
    let error = tokenize("x { never closed", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_unterminated_string_is_error() {
    let error = tokenize("'open", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x", None).unwrap();

    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}
