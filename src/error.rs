use std::fmt;

use thiserror::Error;

/// A failure while tokenizing, parsing, or evaluating an expression.
///
/// The grammar is closed: only numeric literals, the free variable `x`,
/// arithmetic operators, and a fixed set of function and constant names
/// resolve. Everything else is rejected here rather than evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unexpected character '{0}' in expression")]
    UnexpectedChar(char),
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),
    #[error("function '{0}' is missing its argument")]
    MissingArgument(&'static str),
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("malformed expression")]
    Malformed,
    #[error("expression is empty")]
    Empty,
}

/// A failure while validating an integration request, detected before
/// any expression is parsed or evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("integration limit is not finite")]
    NonFiniteLimit,
    #[error("lower limit {lower} is not below upper limit {upper}")]
    EmptyInterval { lower: f64, upper: f64 },
    #[error("interval count must be positive")]
    ZeroIntervals,
}

/// The integration method a computation failure originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Trapezoid,
    Simpson,
    MonteCarlo,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Trapezoid => "trapezoidal",
            Method::Simpson => "Simpson",
            Method::MonteCarlo => "Monte Carlo",
        };
        f.write_str(name)
    }
}

/// Any failure an integration request can surface.
///
/// Validation happens first and never touches the evaluator. A parse
/// failure surfaces as [`Error::Expression`]. A sampling failure inside
/// one of the integration methods is wrapped as [`Error::Computation`]
/// naming the method; the remaining methods are not attempted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid expression: {0}")]
    Expression(EvalError),
    #[error("{method} integration failed: {source}")]
    Computation { method: Method, source: EvalError },
}

pub type Result<T> = std::result::Result<T, Error>;
