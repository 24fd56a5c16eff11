use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::IdentifierAlreadyDeclared { .. } => "IdentifierAlreadyDeclared",
            ErrorImpl::IdentifierNotDeclared { .. } => "IdentifierNotDeclared",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::SymbolNotBound { .. } => "SymbolNotBound",
            ErrorImpl::VariableNotInitialised { .. } => "VariableNotInitialised",
            ErrorImpl::NotAValue { .. } => "NotAValue",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::IntegerOverflow => "IntegerOverflow",
            ErrorImpl::CallDepthExceeded { .. } => "CallDepthExceeded",
            ErrorImpl::InvalidInput { .. } => "InvalidInput",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    /// Which stage of the pipeline raised the error.
    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::Syntax,
            ErrorImpl::IdentifierAlreadyDeclared { .. } => ErrorKind::DuplicateDeclaration,
            ErrorImpl::IdentifierNotDeclared { .. } => ErrorKind::UndeclaredIdentifier,
            ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::ArgumentTypeMatchError { .. }
            | ErrorImpl::NotCallable { .. } => ErrorKind::TypeMismatch,
            ErrorImpl::SymbolNotBound { .. }
            | ErrorImpl::VariableNotInitialised { .. }
            | ErrorImpl::NotAValue { .. } => ErrorKind::RuntimeBinding,
            ErrorImpl::MissingReturnValue { .. }
            | ErrorImpl::InvalidOperands { .. }
            | ErrorImpl::InvalidOperand { .. }
            | ErrorImpl::DivisionByZero
            | ErrorImpl::IntegerOverflow
            | ErrorImpl::CallDepthExceeded { .. }
            | ErrorImpl::InvalidInput { .. }
            | ErrorImpl::Io { .. } => ErrorKind::Runtime,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::IdentifierAlreadyDeclared { identifier } => ErrorTip::Suggestion(format!(
                "Duplicate identifier `{}` found",
                identifier
            )),
            ErrorImpl::IdentifierNotDeclared { identifier } => ErrorTip::Suggestion(format!(
                "Symbol(identifier) not found `{}`",
                identifier
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Can't assign `{}` to `{}`",
                received, expected
            )),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::NotCallable { identifier } => ErrorTip::Suggestion(format!(
                "`{}` is not a procedure or function",
                identifier
            )),
            ErrorImpl::SymbolNotBound { identifier } => ErrorTip::Suggestion(format!(
                "`{}` is not bound in any active frame",
                identifier
            )),
            ErrorImpl::VariableNotInitialised { identifier } => ErrorTip::Suggestion(format!(
                "Variable `{}` is read before it is assigned",
                identifier
            )),
            ErrorImpl::NotAValue { identifier } => ErrorTip::Suggestion(format!(
                "`{}` names a procedure or function, not a value",
                identifier
            )),
            ErrorImpl::MissingReturnValue { routine } => ErrorTip::Suggestion(format!(
                "`{}` did not assign a result, did you forget `{} := ...`?",
                routine, routine
            )),
            ErrorImpl::InvalidOperands { operator, left, right } => ErrorTip::Suggestion(
                format!("Cannot apply `{}` to `{}` and `{}`", operator, left, right),
            ),
            ErrorImpl::InvalidOperand { operator, operand } => ErrorTip::Suggestion(format!(
                "Cannot apply unary `{}` to `{}`",
                operator, operand
            )),
            ErrorImpl::DivisionByZero => ErrorTip::Suggestion(String::from(
                "The right operand of a division evaluated to zero",
            )),
            ErrorImpl::IntegerOverflow => ErrorTip::Suggestion(String::from(
                "The result does not fit in a 64-bit integer",
            )),
            ErrorImpl::CallDepthExceeded { depth } => ErrorTip::Suggestion(format!(
                "More than {} calls are active, is the recursion missing a base case?",
                depth
            )),
            ErrorImpl::InvalidInput { input, expected } => ErrorTip::Suggestion(format!(
                "Could not read `{}` as {}",
                input, expected
            )),
            ErrorImpl::Io { message } => ErrorTip::Suggestion(message.clone()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

/// Error taxonomy, one entry per failure class the pipeline can report.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    DuplicateDeclaration,
    UndeclaredIdentifier,
    TypeMismatch,
    RuntimeBinding,
    Runtime,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("invalid character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("duplicate identifier {identifier:?} found")]
    IdentifierAlreadyDeclared { identifier: String },
    #[error("symbol (identifier) not found {identifier:?}")]
    IdentifierNotDeclared { identifier: String },
    #[error("can't assign {received} to {expected}")]
    TypeMatchError { expected: String, received: String },
    #[error("argument types do not match: expected {expected}, received {received}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("{identifier:?} is not callable")]
    NotCallable { identifier: String },
    #[error("{identifier:?} is not bound in any frame")]
    SymbolNotBound { identifier: String },
    #[error("variable {identifier:?} read before assignment")]
    VariableNotInitialised { identifier: String },
    #[error("{identifier:?} does not hold a value")]
    NotAValue { identifier: String },
    #[error("{routine:?} returned no value")]
    MissingReturnValue { routine: String },
    #[error("invalid operands for {operator}: {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("invalid operand for unary {operator}: {operand}")]
    InvalidOperand { operator: String, operand: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("call depth exceeded {depth}")]
    CallDepthExceeded { depth: usize },
    #[error("invalid input {input:?}, expected {expected}")]
    InvalidInput { input: String, expected: String },
    #[error("i/o error: {message}")]
    Io { message: String },
}
