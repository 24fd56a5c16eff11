#![allow(clippy::module_inception)]

use std::{
    fmt::Write as _,
    io::{BufRead, Write},
    rc::Rc,
};

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorTip},
    interpreter::interpreter::Interpreter,
    parser::parser::parse,
    semantic::analyzer::analyze,
};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantic;

extern crate regex;

/// Byte offset into a source text, tagged with the name of that source.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the whole pipeline over `source`: lex and parse, analyze, then
/// interpret with `input` feeding `READLN` and `output` receiving `WRITELN`.
pub fn run<R: BufRead, W: Write>(
    source: &str,
    file: Option<String>,
    input: R,
    output: W,
) -> Result<(), Error> {
    let program = parse(source, file)?;
    debug!(program = %program.name, "parsed");

    let analysis = analyze(&program)?;
    debug!(scopes = analysis.scopes.len(), "analyzed");

    let mut interpreter = Interpreter::new(&program, &analysis, input, output);
    interpreter.interpret()?;
    debug!("interpreted");

    Ok(())
}

/// Finds the line holding byte `position` of `source`.
///
/// Returns the 1-based line number, the line text and the offset of the
/// position within that line. Positions at or past the end of the text
/// resolve to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        last = (line_number, line.to_string(), line.trim_end().len());
        start = end;
        line_number += 1;
    }

    last
}

/// Renders `error` against the source it was raised for.
///
/// ```text
/// Error: UnexpectedTokenDetailed (Unexpected token: `END`, expected Semicolon)
/// -> main.pas
///   |
/// 3 | x := 1 END
///   | -------^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(rendered, "Error: {}: {}", error.get_error_name(), error);
    } else {
        let _ = writeln!(
            rendered,
            "Error: {} ({})",
            error.get_error_name(),
            error.get_tip()
        );
    }
    let _ = writeln!(rendered, "-> {}", position.1);
    let _ = writeln!(rendered, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(rendered, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = write!(rendered, "{:>padding$} {:->arrows$}", "|", "^");

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    const SOURCE: &str = "PROGRAM P;\nBEGIN\n    x := #\nEND.\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 4);
        assert_eq!(line_number, 1);
        assert_eq!(line, "PROGRAM P;\n");
        assert_eq!(line_pos, 4);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 26);
        assert_eq!(line_number, 3);
        assert_eq!(line, "    x := #\n");
        assert_eq!(line_pos, 9);
    }

    #[test]
    fn test_get_line_past_end_of_source() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 500);
        assert_eq!(line_number, 4);
        assert_eq!(line, "END.\n");
        assert_eq!(line_pos, 4);
    }

    #[test]
    fn test_format_error_points_at_offending_character() {
        let error = Error::new(
            ErrorImpl::UnrecognisedToken {
                token: String::from("#"),
            },
            Position(26, Rc::new(String::from("main.pas"))),
        );

        let rendered = super::format_error(&error, SOURCE);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Error: UnrecognisedToken: invalid character: \"#\"");
        assert_eq!(lines[1], "-> main.pas");
        assert_eq!(lines[3], "3 | x := #");
        assert_eq!(lines[4], "  | -----^");
    }
}
