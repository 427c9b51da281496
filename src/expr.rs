pub mod ast;
pub mod parser;
pub mod token;

pub use ast::{Expr, UnaryFunc};
pub use parser::parse;
pub use token::{tokenize, Token};

use crate::error::EvalError;

/// A compiled expression in the free variable `x`.
///
/// Parsing happens once; the compiled form is immutable and can be
/// evaluated at any number of points. Undefined real math (log of a
/// negative, division by zero) yields IEEE-754 NaN/Inf per element
/// rather than an error.
///
/// # Examples
///
/// ```
/// use numquad::expr::Function;
///
/// let f = Function::parse("x**2 + 1").unwrap();
/// assert_eq!(f.eval(3.0), 10.0);
/// assert_eq!(f.eval_many(&[0.0, 1.0, 2.0]), vec![1.0, 2.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    expr: Expr,
    source: String,
}

impl Function {
    /// Compiles an expression string.
    pub fn parse(src: &str) -> Result<Function, EvalError> {
        let expr = parser::parse(src)?;
        Ok(Function {
            expr,
            source: src.to_string(),
        })
    }

    /// Evaluates at a single point.
    pub fn eval(&self, x: f64) -> f64 {
        self.expr.eval(x)
    }

    /// Evaluates the whole batch in one call.
    ///
    /// The output always has the same length as `xs`.
    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.expr.eval(x)).collect()
    }

    /// The original expression text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Parses `expression` and evaluates it over `xs` in one call.
///
/// On success the output has exactly the length of `xs`; on failure the
/// parse error is returned and nothing is evaluated.
///
/// # Examples
///
/// ```
/// use numquad::expr::evaluate;
///
/// let ys = evaluate("x**2", &[0.0, 1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(ys, vec![0.0, 1.0, 4.0, 9.0]);
/// ```
pub fn evaluate(expression: &str, xs: &[f64]) -> Result<Vec<f64>, EvalError> {
    let f = Function::parse(expression)?;
    Ok(f.eval_many(xs))
}
